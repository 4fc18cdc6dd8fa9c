use crate::dom;
use crate::events;
use crate::WebDriver;
use std::cell::RefCell;
use std::rc::Rc;
use viz_core::{panel_layout, GroupSpec, Parameters, SliderSpec};
use wasm_bindgen::JsCast;
use web_sys as web;

const PANEL_STYLE: &str = "position:fixed;top:0;right:16px;width:240px;padding:6px 8px;\
background:#1a1a1a;color:#eee;font:11px sans-serif;z-index:10";

fn element(document: &web::Document, tag: &str) -> anyhow::Result<web::Element> {
    document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create <{}>: {:?}", tag, e))
}

fn append(parent: &web::Element, child: &web::Element) -> anyhow::Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("append: {:?}", e))
}

/// Find or create the panel root. Clicks on the panel still reach the window
/// click handler, as with any other page element.
fn panel_root(document: &web::Document, panel_id: &str) -> anyhow::Result<web::Element> {
    if let Some(el) = document.get_element_by_id(panel_id) {
        return Ok(el);
    }
    let root = element(document, "div")?;
    root.set_id(panel_id);
    _ = root.set_attribute("style", PANEL_STYLE);
    let body = document.body().ok_or_else(|| anyhow::anyhow!("no body"))?;
    body.append_child(&root)
        .map_err(|e| anyhow::anyhow!("append panel: {:?}", e))?;
    Ok(root)
}

fn build_slider(
    document: &web::Document,
    spec: &SliderSpec,
    driver: &Rc<RefCell<WebDriver>>,
) -> anyhow::Result<web::Element> {
    let row = element(document, "label")?;
    _ = row.set_attribute("style", "display:flex;align-items:center;gap:6px;margin:2px 0");
    let name = element(document, "span")?;
    _ = name.set_attribute("style", "width:64px");
    name.set_text_content(Some(spec.id.label()));
    let readout = element(document, "span")?;
    _ = readout.set_attribute("style", "width:36px;text-align:right");
    readout.set_text_content(Some(&format!("{:.2}", spec.initial)));

    let input: web::HtmlInputElement = element(document, "input")?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("input cast: {:?}", e))?;
    input.set_type("range");
    input.set_min(&spec.min.to_string());
    input.set_max(&spec.max.to_string());
    input.set_step(&spec.step.to_string());
    input.set_value(&spec.initial.to_string());
    _ = input.set_attribute("style", "flex:1");
    _ = input.set_attribute("data-param", spec.id.label());

    let id = spec.id;
    let driver = driver.clone();
    let input_for_cb = input.clone();
    let readout_for_cb = readout.clone();
    dom::add_listener(&input, "input", move |_ev: web::Event| {
        let text = input_for_cb.value();
        match id.parse_value(&text) {
            Some(v) => {
                readout_for_cb.set_text_content(Some(&format!("{:.2}", v)));
                events::dispatch(&driver, id.command(v));
            }
            None => log::warn!("[panel] ignoring non-numeric {} value {:?}", id.label(), text),
        }
    });

    append(&row, &name)?;
    append(&row, &input)?;
    append(&row, &readout)?;
    Ok(row)
}

fn build_group(
    document: &web::Document,
    group: &GroupSpec,
    driver: &Rc<RefCell<WebDriver>>,
) -> anyhow::Result<web::Element> {
    let fieldset = element(document, "fieldset")?;
    _ = fieldset.set_attribute("style", "border:1px solid #333;margin:4px 0");
    let legend = element(document, "legend")?;
    legend.set_text_content(Some(group.group.title()));
    append(&fieldset, &legend)?;
    for spec in &group.sliders {
        let row = build_slider(document, spec, driver)?;
        append(&fieldset, &row)?;
    }
    Ok(fieldset)
}

/// Mount the "Colors" and "Bloom" groups and bind each slider to the driver.
pub fn mount(
    document: &web::Document,
    panel_id: &str,
    params: &Parameters,
    driver: &Rc<RefCell<WebDriver>>,
) -> anyhow::Result<()> {
    let root = panel_root(document, panel_id)?;
    for group in panel_layout(params) {
        let el = build_group(document, &group, driver)?;
        append(&root, &el)?;
    }
    log::info!("[panel] mounted in #{}", panel_id);
    Ok(())
}
