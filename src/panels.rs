use crate::app::App;
use crate::dom;
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use stillpoint_core::{
    find_tone, CareAction, DreamMood, InsightKind, ManifestCategory, SoundCategory,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(s.to_string())).ok()
}

/// Redraw every journal list and the companion status from app state.
pub fn refresh(document: &web::Document, app: &App) {
    overlay::render_dreams(document, &app.dreams);
    overlay::render_manifestations(document, &app.manifestations);
    overlay::render_insights(document, &app.insights);
    overlay::render_companion(document, &app.stats);
}

pub fn wire_panels(document: &web::Document, app: Rc<RefCell<App>>) {
    wire_audio_buttons(document, &app);
    wire_companion(document, &app);
    wire_journals(document, &app);
    for list in ["dream-list", "manifest-list", "insight-list"] {
        wire_list_actions(document, list, app.clone());
    }
    refresh(document, &app.borrow());
}

fn wire_audio_buttons(document: &web::Document, app: &Rc<RefCell<App>>) {
    let a = app.clone();
    dom::add_value_click_listeners(document, ".tone-button", move |v| {
        let Ok(hz) = v.parse::<f32>() else {
            log::warn!("[audio] bad tone button value {:?}", v);
            return;
        };
        if let Some(d) = find_tone(hz) {
            overlay::show_tone(d);
        }
        a.borrow_mut().play_tone(hz);
    });

    let a = app.clone();
    dom::add_value_click_listeners(document, ".ambience-button", move |v| {
        match SoundCategory::from_label(&v) {
            Some(c) => a.borrow_mut().play_ambience(c),
            None => log::warn!("[audio] unknown soundscape {:?}", v),
        }
    });

    let a = app.clone();
    dom::add_click_listener(document, "tone-stop", move || a.borrow_mut().stop_tone());
    let a = app.clone();
    dom::add_click_listener(document, "ambience-stop", move || {
        a.borrow_mut().stop_ambience()
    });
    let a = app.clone();
    dom::add_click_listener(document, "breath-toggle", move || {
        a.borrow_mut().toggle_breath()
    });

    let fade = app.borrow().settings.tone_fade_out_sec;
    dom::set_input_value(document, "tone-fade", &format!("{fade:.1}"));
    let a = app.clone();
    dom::add_change_listener(document, "tone-fade", move |v| match v.parse::<f64>() {
        Ok(sec) => a.borrow_mut().set_fade_out(sec),
        Err(_) => log::warn!("[audio] bad fade-out value {:?}", v),
    });
}

fn wire_companion(document: &web::Document, app: &Rc<RefCell<App>>) {
    let a = app.clone();
    dom::add_value_click_listeners(document, ".care-button", move |v| {
        let Some(action) = parse_enum::<CareAction>(&v) else {
            log::warn!("[panels] unknown care action {:?}", v);
            return;
        };
        let mut app = a.borrow_mut();
        app.care(action);
        if let Some(doc) = dom::window_document() {
            overlay::render_companion(&doc, &app.stats);
        }
    });

    let a = app.clone();
    dom::add_click_listener(document, "garden-water", move || {
        let mut app = a.borrow_mut();
        app.water_garden();
        if let Some(doc) = dom::window_document() {
            overlay::render_companion(&doc, &app.stats);
        }
    });
}

fn wire_journals(document: &web::Document, app: &Rc<RefCell<App>>) {
    let a = app.clone();
    dom::add_click_listener(document, "dream-save", move || {
        let Some(doc) = dom::window_document() else {
            return;
        };
        let text = dom::input_value(&doc, "dream-text").unwrap_or_default();
        let mood = dom::input_value(&doc, "dream-mood")
            .and_then(|m| parse_enum::<DreamMood>(&m))
            .unwrap_or(DreamMood::Peaceful);
        let mut app = a.borrow_mut();
        if let Some(entry) = app.add_dream(&text, mood) {
            dom::set_text(&doc, "dream-analysis", &entry.analysis.summary);
            dom::clear_input(&doc, "dream-text");
        }
        overlay::render_dreams(&doc, &app.dreams);
    });

    let a = app.clone();
    dom::add_click_listener(document, "manifest-save", move || {
        let Some(doc) = dom::window_document() else {
            return;
        };
        let text = dom::input_value(&doc, "manifest-text").unwrap_or_default();
        let category = dom::input_value(&doc, "manifest-category")
            .and_then(|c| parse_enum::<ManifestCategory>(&c))
            .unwrap_or(ManifestCategory::Spiritual);
        let mut app = a.borrow_mut();
        app.add_manifestation(&text, category);
        dom::clear_input(&doc, "manifest-text");
        overlay::render_manifestations(&doc, &app.manifestations);
    });

    let a = app.clone();
    dom::add_click_listener(document, "insight-save", move || {
        let Some(doc) = dom::window_document() else {
            return;
        };
        let text = dom::input_value(&doc, "insight-text").unwrap_or_default();
        let kind = dom::input_value(&doc, "insight-kind")
            .and_then(|k| parse_enum::<InsightKind>(&k))
            .unwrap_or(InsightKind::Feeling);
        let intensity = dom::input_value(&doc, "insight-intensity")
            .and_then(|v| v.parse::<u8>().ok())
            .unwrap_or(5);
        let mut app = a.borrow_mut();
        app.add_insight(kind, &text, intensity);
        dom::clear_input(&doc, "insight-text");
        overlay::render_insights(&doc, &app.insights);
    });
}

/// One delegated listener per list handles the per-row delete and
/// "manifested" buttons, which are re-rendered on every change.
fn wire_list_actions(document: &web::Document, list_id: &str, app: Rc<RefCell<App>>) {
    let Some(list) = document.get_element_by_id(list_id) else {
        return;
    };
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let Some(target) = ev
            .target()
            .and_then(|t| t.dyn_into::<web::HtmlElement>().ok())
        else {
            return;
        };
        let data = target.dataset();
        let mut a = app.borrow_mut();
        if let Some(id) = data.get("delete") {
            a.delete_record(&id);
        } else if let Some(id) = data.get("manifested") {
            a.mark_manifested(&id);
        } else {
            return;
        }
        if let Some(doc) = dom::window_document() {
            refresh(&doc, &a);
        }
    }) as Box<dyn FnMut(_)>);
    _ = list.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}
