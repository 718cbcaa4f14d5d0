use crate::app::App;
use crate::input::css_to_canvas;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pointer position in canvas backing-store pixels.
fn canvas_px(canvas: &web::HtmlCanvasElement, client_x: f64, client_y: f64) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let css = Vec2::new((client_x - rect.left()) as f32, (client_y - rect.top()) as f32);
    css_to_canvas(
        css,
        Vec2::new(rect.width() as f32, rect.height() as f32),
        Vec2::new(canvas.width() as f32, canvas.height() as f32),
    )
}

/// Drags and touch swipes steer the tunnel cursor by their delta.
pub fn wire_pointer_handlers(canvas: &web::HtmlCanvasElement, app: Rc<RefCell<App>>) {
    wire_pointerdown(canvas, app.clone());
    wire_pointermove(canvas, app.clone());
    wire_pointerup(app.clone());
    wire_touch(canvas, app);
}

fn wire_pointerdown(canvas: &web::HtmlCanvasElement, app: Rc<RefCell<App>>) {
    let c = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = canvas_px(&c, ev.client_x() as f64, ev.client_y() as f64);
        let mut a = app.borrow_mut();
        a.pointer.begin(pos);
        // first gesture is what the browser needs to allow audio
        a.ensure_audio();
        _ = c.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(canvas: &web::HtmlCanvasElement, app: Rc<RefCell<App>>) {
    let c = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if ev.pointer_type() == "touch" {
            return;
        }
        let pos = canvas_px(&c, ev.client_x() as f64, ev.client_y() as f64);
        app.borrow_mut().pointer.move_to(pos);
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerup(app: Rc<RefCell<App>>) {
    let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        app.borrow_mut().pointer.end();
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
        _ = wnd.add_event_listener_with_callback("pointercancel", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

// Touch moves go through the touch list so multi-finger swipes follow the first finger.
fn wire_touch(canvas: &web::HtmlCanvasElement, app: Rc<RefCell<App>>) {
    let c = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        let Some(t) = ev.touches().get(0) else {
            return;
        };
        let pos = canvas_px(&c, t.client_x() as f64, t.client_y() as f64);
        let mut a = app.borrow_mut();
        if !a.pointer.down {
            a.pointer.begin(pos);
        }
        a.pointer.move_to(pos);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
    closure.forget();
}
