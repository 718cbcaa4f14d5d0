use crate::constants::{BREATH_LABEL_ID, HUD_ID, OVERLAY_ID};
use crate::dom;
use stillpoint_core::{
    BreathTimer, DreamEntry, FrequencyDescriptor, GameStats, Journal, Manifestation, PsychicInsight,
    TunnelSim,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const TOAST_ID: &str = "toast";
const TOAST_MS: i32 = 2500;

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        let cl = el.class_list();
        _ = cl.remove_1("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        let cl = el.class_list();
        _ = cl.add_1("hidden");
        _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        if el.class_list().contains("hidden") {
            return true;
        }
        return el
            .get_attribute("style")
            .map(|s| s.contains("display:none"))
            .unwrap_or(false);
    }
    false
}

#[inline]
pub fn toggle(document: &web::Document) {
    if is_hidden(document) {
        show(document);
    } else {
        hide(document);
    }
}

/// Score, combo, level and companion line, rewritten every frame.
pub fn update_hud(document: &web::Document, sim: &TunnelSim, stats: &GameStats) {
    let Some(el) = document.get_element_by_id(HUD_ID) else {
        return;
    };
    let combo = sim.combo();
    let combo_text = if combo > 1 {
        format!(" • Combo x{}", combo)
    } else {
        String::new()
    };
    let text = format!(
        "Score {} • Lights {}{} • Level {} ({} xp) • {} is {}",
        sim.score(),
        sim.collected(),
        combo_text,
        stats.achievements.level(),
        stats.achievements.total_xp(),
        stats.pet.name,
        stats.pet.mood()
    );
    el.set_text_content(Some(&text));
}

pub fn update_breath_label(document: &web::Document, breath: Option<&BreathTimer>) {
    let text = match breath {
        Some(b) => format!("{} • cycle {}", b.phase().label(), b.cycles() + 1),
        None => String::new(),
    };
    dom::set_text(document, BREATH_LABEL_ID, &text);
}

pub fn show_tone(d: &FrequencyDescriptor) {
    if let Some(doc) = dom::window_document() {
        dom::set_text(&doc, "tone-name", &format!("{} Hz • {}", d.hz, d.name));
        dom::set_text(&doc, "tone-description", d.description);
        dom::set_text(&doc, "tone-benefits", &d.benefits.join(" · "));
    }
}

/// Briefly show a message, then hide it again.
pub fn toast(text: &str) {
    let Some(doc) = dom::window_document() else {
        return;
    };
    let Some(el) = doc.get_element_by_id(TOAST_ID) else {
        return;
    };
    el.set_text_content(Some(text));
    _ = el.class_list().add_1("visible");
    let hide = Closure::once(move || {
        _ = el.class_list().remove_1("visible");
    });
    if let Some(w) = web::window() {
        _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
            hide.as_ref().unchecked_ref(),
            TOAST_MS,
        );
    }
    hide.forget();
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn render_dreams(document: &web::Document, dreams: &Journal<DreamEntry>) {
    let Some(el) = document.get_element_by_id("dream-list") else {
        return;
    };
    let html: String = dreams
        .entries()
        .iter()
        .map(|d| {
            let lucid = if d.analysis.lucid { " <em>lucid</em>" } else { "" };
            format!(
                "<li><p>{}</p><small>{}{}</small> <button data-delete=\"{}\">×</button></li>",
                escape(&d.content),
                escape(&d.analysis.summary),
                lucid,
                d.id
            )
        })
        .collect();
    el.set_inner_html(&html);
}

pub fn render_manifestations(document: &web::Document, list: &Journal<Manifestation>) {
    let Some(el) = document.get_element_by_id("manifest-list") else {
        return;
    };
    let html: String = list
        .entries()
        .iter()
        .map(|m| {
            let done = if m.manifested {
                "<span>✓</span>".to_string()
            } else {
                format!("<button data-manifested=\"{}\">✓</button>", m.id)
            };
            format!(
                "<li><p>{}</p>{} <button data-delete=\"{}\">×</button></li>",
                escape(&m.affirmation),
                done,
                m.id
            )
        })
        .collect();
    el.set_inner_html(&html);
}

pub fn render_insights(document: &web::Document, list: &Journal<PsychicInsight>) {
    let Some(el) = document.get_element_by_id("insight-list") else {
        return;
    };
    let html: String = list
        .entries()
        .iter()
        .map(|i| {
            format!(
                "<li><p>{} ({}/10)</p><small>{}</small> <button data-delete=\"{}\">×</button></li>",
                escape(&i.content),
                i.intensity,
                escape(&i.reflection),
                i.id
            )
        })
        .collect();
    el.set_inner_html(&html);
}

pub fn render_companion(document: &web::Document, stats: &GameStats) {
    let pet = &stats.pet;
    dom::set_text(
        document,
        "pet-status",
        &format!(
            "{} feels {} • hunger {:.0} • happiness {:.0} • energy {:.0} • cleanliness {:.0}",
            pet.name,
            pet.mood(),
            pet.hunger.get(),
            pet.happiness.get(),
            pet.energy.get(),
            pet.cleanliness.get()
        ),
    );
    let garden = &stats.garden;
    let bloom = if garden.in_full_bloom() { " • in full bloom" } else { "" };
    dom::set_text(
        document,
        "garden-status",
        &format!(
            "growth {:.0} • health {:.0}{}",
            garden.growth.get(),
            garden.health.get(),
            bloom
        ),
    );
}
