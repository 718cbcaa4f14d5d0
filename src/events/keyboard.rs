use crate::app::App;
use crate::constants::VOLUME_STEP;
use crate::input::tone_index_for_digit;
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keys the tunnel polls every frame rather than reacting to once.
const HELD_KEYS: [&str; 9] = [
    "w", "a", "s", "d", "ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight", " ",
];

#[inline]
fn is_held_key(key: &str) -> bool {
    HELD_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

/// Typing in a journal field must not steer the tunnel or fire shortcuts.
fn from_text_field(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"))
        .unwrap_or(false)
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, app: &Rc<RefCell<App>>) {
    if from_text_field(ev) {
        return;
    }
    let key = ev.key();
    if let Some(i) = tone_index_for_digit(&key) {
        app.borrow_mut().play_tone_index(i);
        return;
    }
    match key.as_str() {
        "b" | "B" => app.borrow_mut().toggle_breath(),
        "n" | "N" => app.borrow_mut().next_ambience(),
        "m" | "M" => app.borrow_mut().stop_tone(),
        "x" | "X" => app.borrow_mut().stop_ambience(),
        "+" | "=" => app.borrow_mut().nudge_volume(VOLUME_STEP),
        "-" | "_" => app.borrow_mut().nudge_volume(-VOLUME_STEP),
        "h" | "H" => {
            if let Some(doc) = crate::dom::window_document() {
                overlay::toggle(&doc);
            }
        }
        "p" | "P" => {
            let mut a = app.borrow_mut();
            a.paused = !a.paused;
            log::info!("[keys] paused={}", a.paused);
        }
        _ => return,
    }
    log::debug!("[keys] {}", key);
}

pub fn wire_global_keydown(app: Rc<RefCell<App>>) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            handle_global_keydown(&ev, &app);
        }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Track held movement keys in the app's key set.
pub fn wire_key_set(app: Rc<RefCell<App>>) {
    let Some(window) = web::window() else {
        return;
    };

    let app_down = app.clone();
    let down = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        let key = ev.key();
        if from_text_field(&ev) || !is_held_key(&key) {
            return;
        }
        app_down.borrow_mut().keys.press(&key);
        // keep arrows/space from scrolling the page
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keydown", down.as_ref().unchecked_ref());
    down.forget();

    let app_up = app.clone();
    let up = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        app_up.borrow_mut().keys.release(&ev.key());
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keyup", up.as_ref().unchecked_ref());
    up.forget();

    // Focus loss swallows keyup events.
    let blur = Closure::wrap(Box::new(move || {
        app.borrow_mut().keys.clear();
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref());
    blur.forget();
}
