use crate::constants::*;
use glam::Vec2;
use stillpoint_core::constants::RING_RADIUS;
use stillpoint_core::{project, BreathPhase, BreathTimer, TunnelSim};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Simulation space is laid out for a 600px tall view; larger canvases scale up.
const DESIGN_EXTENT: f32 = 600.0;

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("get_context: {:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!("not a 2d context: {:?}", e))
}

pub struct Viewport {
    pub centre: Vec2,
    pub scale: f32,
    pub size: Vec2,
}

impl Viewport {
    pub fn of(canvas: &web::HtmlCanvasElement) -> Self {
        let size = Vec2::new(canvas.width() as f32, canvas.height() as f32);
        Self {
            centre: size * 0.5,
            scale: size.min_element().max(1.0) / DESIGN_EXTENT,
            size,
        }
    }

    #[inline]
    fn to_screen(&self, p: Vec2) -> Vec2 {
        self.centre + p * self.scale
    }
}

#[inline]
fn hsla(hue: f32, sat: u8, light: u8, alpha: f32) -> String {
    format!(
        "hsla({:.0},{}%,{}%,{:.3})",
        hue.rem_euclid(360.0),
        sat,
        light,
        alpha.clamp(0.0, 1.0)
    )
}

fn circle(ctx: &web::CanvasRenderingContext2d, at: Vec2, r: f32) {
    ctx.begin_path();
    _ = ctx.arc(at.x as f64, at.y as f64, r.max(0.0) as f64, 0.0, std::f64::consts::TAU);
}

pub fn clear(ctx: &web::CanvasRenderingContext2d, vp: &Viewport) {
    let [r, g, b] = BACKGROUND_RGB;
    ctx.set_fill_style_str(&format!("rgb({},{},{})", r, g, b));
    ctx.fill_rect(0.0, 0.0, vp.size.x as f64, vp.size.y as f64);
}

pub fn draw_orbs(ctx: &web::CanvasRenderingContext2d, vp: &Viewport, sim: &TunnelSim) {
    for orb in sim.orbs() {
        let at = orb.pos * vp.size;
        ctx.set_fill_style_str(&hsla(orb.hue, 60, 60, ORB_ALPHA));
        circle(ctx, at, orb.radius * vp.scale);
        ctx.fill();
    }
}

pub fn draw_tunnel(ctx: &web::CanvasRenderingContext2d, vp: &Viewport, sim: &TunnelSim) {
    let focal = sim.params.focal;
    let max_z = sim.params.max_z;
    // Far rings first so near ones paint over them.
    let mut rings: Vec<_> = sim.rings().map(|(_, r)| r).collect();
    rings.sort_by(|a, b| b.z.total_cmp(&a.z));

    ctx.set_line_width(RING_LINE_WIDTH);
    for ring in rings {
        let (pos, k) = project(ring.offset, ring.z, focal);
        let at = vp.to_screen(pos);
        let fade = 1.0 - ring.z / max_z;
        ctx.set_stroke_style_str(&hsla(ring.hue, 70, 60, fade * 0.8));
        circle(ctx, at, RING_RADIUS * k * vp.scale);
        ctx.stroke();
        if ring.collectible && !ring.collected {
            ctx.set_fill_style_str(&hsla(ring.hue, 90, 75, fade));
            circle(ctx, at, COLLECTIBLE_RADIUS * k * vp.scale);
            ctx.fill();
        }
    }
}

pub fn draw_particles(ctx: &web::CanvasRenderingContext2d, vp: &Viewport, sim: &TunnelSim) {
    let life = stillpoint_core::constants::PARTICLE_LIFE_SEC;
    for p in sim.particles() {
        ctx.set_fill_style_str(&hsla(p.hue, 90, 70, p.life / life));
        circle(ctx, vp.to_screen(p.pos), 2.5 * vp.scale);
        ctx.fill();
    }
}

pub fn draw_player(ctx: &web::CanvasRenderingContext2d, vp: &Viewport, sim: &TunnelSim) {
    ctx.set_stroke_style_str("rgba(230,240,255,0.9)");
    ctx.set_line_width(2.0);
    let at = vp.to_screen(sim.player());
    ctx.begin_path();
    _ = ctx.arc(
        at.x as f64,
        at.y as f64,
        PLAYER_RADIUS * vp.scale as f64,
        0.0,
        std::f64::consts::TAU,
    );
    ctx.stroke();
}

/// The breathing guide: an orb that swells on inhale and shrinks on exhale.
pub fn draw_breath_orb(ctx: &web::CanvasRenderingContext2d, vp: &Viewport, breath: &BreathTimer) {
    let r = (BREATH_ORB_MIN + BREATH_ORB_SPAN * breath.expansion()) * vp.scale;
    let hue = match breath.phase() {
        BreathPhase::Inhale => 190.0,
        BreathPhase::Hold => 265.0,
        BreathPhase::Exhale => 150.0,
    };
    ctx.set_fill_style_str(&hsla(hue, 70, 55, 0.18));
    circle(ctx, vp.centre, r);
    ctx.fill();
    ctx.set_stroke_style_str(&hsla(hue, 80, 70, 0.6));
    ctx.set_line_width(2.0);
    circle(ctx, vp.centre, r);
    ctx.stroke();
}

pub fn draw_frame(
    ctx: &web::CanvasRenderingContext2d,
    canvas: &web::HtmlCanvasElement,
    sim: &TunnelSim,
    breath: Option<&BreathTimer>,
) {
    let vp = Viewport::of(canvas);
    clear(ctx, &vp);
    draw_orbs(ctx, &vp, sim);
    if let Some(b) = breath {
        draw_breath_orb(ctx, &vp, b);
    }
    draw_tunnel(ctx, &vp, sim);
    draw_particles(ctx, &vp, sim);
    draw_player(ctx, &vp, sim);
}
