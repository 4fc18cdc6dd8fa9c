use crate::dom;
use crate::WebDriver;
use std::cell::RefCell;
use std::rc::Rc;
use viz_core::{Command, PointerOffset};
use web_sys as web;

/// Hand a command to the driver. Events arrive between frames, so the
/// driver is normally free; if not, the command is dropped with a warning.
pub(crate) fn dispatch(driver: &Rc<RefCell<WebDriver>>, cmd: Command) {
    match driver.try_borrow_mut() {
        Ok(mut d) => d.dispatch(cmd),
        Err(_) => log::warn!("[events] driver busy; dropped {:?}", cmd),
    }
}

/// Window-level listeners: pointer steering, play on click, pause on
/// double-click, and canvas resize.
pub fn wire_window_events(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    driver: &Rc<RefCell<WebDriver>>,
) {
    {
        let driver = driver.clone();
        dom::add_listener(window, "pointermove", move |ev: web::PointerEvent| {
            let (vw, vh) = dom::viewport_css_size();
            let offset = PointerOffset::from_client(ev.client_x() as f32, ev.client_y() as f32, vw, vh);
            dispatch(&driver, Command::PointerMoved(offset));
        });
    }
    {
        let driver = driver.clone();
        dom::add_listener(window, "click", move |_ev: web::MouseEvent| {
            dispatch(&driver, Command::PlayClicked);
        });
    }
    {
        let driver = driver.clone();
        dom::add_listener(window, "dblclick", move |_ev: web::MouseEvent| {
            dispatch(&driver, Command::PauseClicked);
        });
    }
    {
        let driver = driver.clone();
        let canvas = canvas.clone();
        dom::add_listener(window, "resize", move |_ev: web::Event| {
            let (width, height) = dom::sync_canvas_backing_size(&canvas);
            dispatch(&driver, Command::Resized { width, height });
        });
    }
}
