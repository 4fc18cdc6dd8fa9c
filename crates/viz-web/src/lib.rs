#![cfg(target_arch = "wasm32")]
//! Browser frontend: wires the canvas, WebGPU, WebAudio and the control
//! panel to a [`viz_core::Driver`].

mod audio;
mod dom;
mod events;
mod frame;
mod panel;
mod render;

use std::cell::RefCell;
use std::rc::Rc;
use viz_core::{
    Command, Driver, InstantClock, Parameters, ShaderSources, Viewport, FRAGMENT_SHADER_ID,
    VERTEX_SHADER_ID,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub(crate) type WebDriver = Driver<render::GpuCompositor, audio::WebSound, InstantClock>;

thread_local! {
    static DRIVER: RefCell<Option<Rc<RefCell<WebDriver>>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("viz-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Stop the render loop and any playing audio. The loop cannot be restarted.
#[wasm_bindgen]
pub fn stop() {
    let driver = DRIVER.with(|slot| slot.borrow().clone());
    match driver {
        Some(d) => match d.try_borrow_mut() {
            Ok(mut d) => d.stop(),
            Err(_) => log::warn!("stop: driver busy"),
        },
        None => log::warn!("stop: not started"),
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let cfg = dom::read_config(&document)?;
    let shaders = ShaderSources::with_overrides(
        dom::shader_override(&document, VERTEX_SHADER_ID),
        dom::shader_override(&document, FRAGMENT_SHADER_ID),
    )?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(&cfg.canvas_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", cfg.canvas_id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("#{} is not a canvas: {:?}", cfg.canvas_id, e))?;
    let (width, height) = dom::sync_canvas_backing_size(&canvas);

    let compositor = render::GpuCompositor::new(&canvas, &cfg, &shaders).await?;
    let sound = audio::WebSound::new(cfg.fft_size);
    let audio_ctx = sound.context();
    let params = Parameters::default();
    let driver = Rc::new(RefCell::new(Driver::new(
        params,
        Viewport::new(width, height),
        compositor,
        sound,
        InstantClock::default(),
    )));
    DRIVER.with(|slot| *slot.borrow_mut() = Some(driver.clone()));

    panel::mount(&document, &cfg.panel_id, &params, &driver)?;
    events::wire_window_events(&window, &canvas, &driver);

    driver.borrow_mut().start();
    frame::start_loop(driver.clone());

    match audio_ctx {
        Some(ctx) => spawn_local(load_soundtrack(ctx, cfg.audio_src, driver)),
        None => events::dispatch(&driver, Command::AudioLoadFailed),
    }
    Ok(())
}

async fn load_soundtrack(ctx: web::AudioContext, url: String, driver: Rc<RefCell<WebDriver>>) {
    match audio::load_buffer(&ctx, &url).await {
        Ok(buffer) => {
            let duration_sec = buffer.duration();
            log::info!("[audio] loaded {} ({:.1}s)", url, duration_sec);
            match driver.try_borrow_mut() {
                Ok(mut d) => {
                    d.audio_mut().set_buffer(buffer);
                    d.dispatch(Command::AudioLoaded { duration_sec });
                }
                Err(_) => log::error!("[audio] driver busy; soundtrack discarded"),
            }
        }
        Err(e) => {
            log::error!("[audio] {:#}", e);
            events::dispatch(&driver, Command::AudioLoadFailed);
        }
    }
}
