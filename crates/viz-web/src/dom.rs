use viz_core::{Error, VisualizerConfig, OVERRIDE_KEYS};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Attach `handler` to `target` for the page lifetime.
pub fn add_listener<E, F>(target: &web::EventTarget, event: &str, handler: F)
where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::error!("[dom] listener `{}` error: {:?}", event, e);
    }
    closure.forget();
}

/// Match the canvas backing store to its CSS size times devicePixelRatio.
/// Returns the new backing size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = ((rect.width() * dpr) as u32).max(1);
        let h_px = ((rect.height() * dpr) as u32).max(1);
        canvas.set_width(w_px);
        canvas.set_height(h_px);
    }
    (canvas.width(), canvas.height())
}

/// Window inner size in CSS pixels.
pub fn viewport_css_size() -> (f32, f32) {
    let Some(w) = web::window() else {
        return (0.0, 0.0);
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width as f32, height as f32)
}

/// Text of a page-supplied shader override, if the element exists.
pub fn shader_override(document: &web::Document, element_id: &str) -> Option<String> {
    document
        .get_element_by_id(element_id)
        .map(|el| el.text_content().unwrap_or_default())
}

/// Apply `data-*` attributes on the canvas on top of the defaults.
pub fn read_config(document: &web::Document) -> Result<VisualizerConfig, Error> {
    let mut cfg = VisualizerConfig::default();
    let Some(canvas) = document.get_element_by_id(&cfg.canvas_id) else {
        return Ok(cfg);
    };
    for key in OVERRIDE_KEYS {
        if let Some(value) = canvas.get_attribute(&format!("data-{key}")) {
            cfg.apply_override(key, &value)?;
        }
    }
    Ok(cfg)
}
