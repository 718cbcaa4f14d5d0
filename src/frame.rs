use crate::app::App;
use crate::audio;
use crate::cadence::Cadence;
use crate::constants::*;
use crate::overlay;
use crate::render;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use stillpoint_core::{BreathPhase, PhaseChange, TunnelInput};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub app: Rc<RefCell<App>>,
    pub canvas: web::HtmlCanvasElement,
    pub ctx2d: web::CanvasRenderingContext2d,
    pub document: web::Document,
    pub last_instant: Instant,
    pub save_clock: Cadence,
    pub decay_clock: Cadence,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        // Clamp so a backgrounded tab does not fast-forward the session.
        let dt = (now - self.last_instant).min(Duration::from_secs_f32(MAX_FRAME_DT_SEC));
        self.last_instant = now;

        let mut app = self.app.borrow_mut();
        if let Some(rig) = app.audio.as_mut() {
            rig.tone.poll();
        }

        if !app.paused {
            if app.settings.breath_enabled {
                let changes = app.breath.tick(dt);
                for change in &changes {
                    on_breath_change(&mut app, change);
                }
            }

            let input = TunnelInput {
                movement: app.keys.movement(),
                pointer_delta: app.pointer.take_delta() / render::Viewport::of(&self.canvas).scale,
                boost: app.keys.boost(),
            };
            let pickups = app.tunnel.step(dt, input);
            if !pickups.is_empty() {
                if let Some(rig) = &app.audio {
                    for p in &pickups {
                        audio::pickup_chime(&rig.ctx, p.combo);
                    }
                }
                let unlocks = app.stats.record_pickups(&pickups);
                app.announce(&unlocks);
                app.mark_stats_dirty();
            }
        }

        // Needs decay on wall-clock time, paused or not.
        if self.decay_clock.tick(dt.as_secs_f32()) {
            app.decay_companions();
            overlay::render_companion(&self.document, &app.stats);
        }
        if self.save_clock.tick(dt.as_secs_f32()) {
            app.flush_stats();
        }

        let breath = app.settings.breath_enabled.then_some(&app.breath);
        render::draw_frame(&self.ctx2d, &self.canvas, &app.tunnel, breath);
        overlay::update_hud(&self.document, &app.tunnel, &app.stats);
        overlay::update_breath_label(&self.document, breath);
    }
}

fn on_breath_change(app: &mut App, change: &PhaseChange) {
    log::debug!(
        "[breath] {} -> {} at {:?}",
        change.from.label(),
        change.to.label(),
        change.at
    );
    let (pulse_ms, cue_hz) = match change.to {
        BreathPhase::Inhale => (HAPTIC_INHALE_MS, CUE_INHALE_HZ),
        BreathPhase::Hold => (HAPTIC_HOLD_MS, CUE_HOLD_HZ),
        BreathPhase::Exhale => (HAPTIC_EXHALE_MS, CUE_EXHALE_HZ),
    };
    if app.settings.haptics {
        if let Some(w) = web::window() {
            // Unsupported on desktop browsers; returns false there.
            _ = w.navigator().vibrate_with_duration(pulse_ms);
        }
    }
    if let Some(rig) = &app.audio {
        audio::play_cue(&rig.ctx, cue_hz, CUE_GAIN, CUE_SEC);
    }
    if change.from == BreathPhase::Exhale {
        app.record_breath_cycle();
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        if let Err(e) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
    }
}
