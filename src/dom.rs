use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::debug!("[dom] no #{} to wire", element_id);
    }
}

/// Wire a click on every element matching `selector`, passing its `data-value`.
pub fn add_value_click_listeners(
    document: &web::Document,
    selector: &str,
    handler: impl Fn(String) + 'static,
) {
    let nodes = match document.query_selector_all(selector) {
        Ok(n) => n,
        Err(e) => {
            log::warn!("[dom] bad selector {}: {:?}", selector, e);
            return;
        }
    };
    let handler = std::rc::Rc::new(handler);
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<web::HtmlElement>().ok()) else {
            continue;
        };
        let Some(value) = el.dataset().get("value") else {
            continue;
        };
        let handler = handler.clone();
        let closure = Closure::wrap(Box::new(move || handler(value.clone())) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn input_value(document: &web::Document, id: &str) -> Option<String> {
    let el = document.get_element_by_id(id)?;
    if let Some(i) = el.dyn_ref::<web::HtmlInputElement>() {
        return Some(i.value());
    }
    if let Some(t) = el.dyn_ref::<web::HtmlTextAreaElement>() {
        return Some(t.value());
    }
    el.dyn_ref::<web::HtmlSelectElement>().map(|s| s.value())
}

/// Call `handler` with the element's value whenever it changes.
pub fn add_change_listener(
    document: &web::Document,
    element_id: &str,
    handler: impl Fn(String) + 'static,
) {
    let Some(el) = document.get_element_by_id(element_id) else {
        log::debug!("[dom] no #{} to wire", element_id);
        return;
    };
    let id = element_id.to_string();
    let closure = Closure::wrap(Box::new(move || {
        if let Some(v) = window_document().and_then(|d| input_value(&d, &id)) {
            handler(v);
        }
    }) as Box<dyn FnMut()>);
    _ = el.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn set_input_value(document: &web::Document, id: &str, value: &str) {
    if let Some(i) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    {
        i.set_value(value);
    }
}

pub fn clear_input(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        if let Some(i) = el.dyn_ref::<web::HtmlInputElement>() {
            i.set_value("");
        } else if let Some(t) = el.dyn_ref::<web::HtmlTextAreaElement>() {
            t.set_value("");
        }
    }
}

#[inline]
pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}
