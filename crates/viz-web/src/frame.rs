use crate::WebDriver;
use std::cell::RefCell;
use std::rc::Rc;
use viz_core::TickOutcome;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_frame(slot: &TickSlot) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = slot.borrow().as_ref() {
        if let Err(e) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            log::error!("[frame] requestAnimationFrame error: {:?}", e);
        }
    }
}

/// Drive `driver.tick()` from requestAnimationFrame. The callback re-arms
/// itself only while the driver keeps running; on `Halt` it drops its own
/// closure and the loop ends.
pub fn start_loop(driver: Rc<RefCell<WebDriver>>) {
    let tick: TickSlot = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let outcome = match driver.try_borrow_mut() {
            Ok(mut d) => d.tick(),
            // A handler still holds the driver; skip this frame
            Err(_) => TickOutcome::Continue,
        };
        match outcome {
            TickOutcome::Continue => request_frame(&tick_clone),
            TickOutcome::Halt => {
                log::info!("[frame] loop halted");
                // Breaks the Rc cycle between the slot and its closure
                drop(tick_clone.borrow_mut().take());
            }
        }
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
