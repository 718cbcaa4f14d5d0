#![cfg(target_arch = "wasm32")]
use crate::app::App;
use crate::cadence::Cadence;
use crate::constants::{CANVAS_ID, COMPANION_DECAY_INTERVAL_SEC, STATS_SAVE_INTERVAL_SEC};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod audio;
mod cadence;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod panels;
mod render;
mod storage;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// The start overlay's buttons are the user gesture that unlocks audio.
fn wire_overlay_buttons(document: &web::Document, app: &Rc<RefCell<App>>) {
    for id in ["overlay-ok", "overlay-close"] {
        let app = app.clone();
        dom::add_click_listener(document, id, move || {
            let mut a = app.borrow_mut();
            a.paused = false;
            a.ensure_audio();
            if let Some(hz) = a.settings.tone_hz {
                a.play_tone(hz);
            }
            if let Some(d) = dom::window_document() {
                overlay::hide(&d);
            }
        });
    }
}

fn wire_teardown(app: &Rc<RefCell<App>>) {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move || {
        let mut a = app.borrow_mut();
        a.flush_stats();
        if let Some(rig) = a.audio.as_mut() {
            rig.close();
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("stillpoint starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    wire_canvas_resize(&canvas);
    let ctx2d = render::context_2d(&canvas)?;

    let seed: u64 = rand::random();
    let app = Rc::new(RefCell::new(App::load(seed)));

    wire_overlay_buttons(&document, &app);
    events::wire_global_keydown(app.clone());
    events::wire_key_set(app.clone());
    events::wire_pointer_handlers(&canvas, app.clone());
    panels::wire_panels(&document, app.clone());
    wire_teardown(&app);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        app,
        canvas,
        ctx2d,
        document,
        last_instant: Instant::now(),
        save_clock: Cadence::new(STATS_SAVE_INTERVAL_SEC),
        decay_clock: Cadence::new(COMPANION_DECAY_INTERVAL_SEC),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
