//! Tunnel flight simulation.
//!
//! Rings fly toward the viewer and are projected with a perspective divide.
//! The player steers a cursor offset from screen centre; collectible rings
//! that pass close enough to it are picked up, feeding a combo that lapses
//! after `COMBO_WINDOW_MS` without a pickup. The simulation advances only by
//! the `dt` it is handed and owns its own clock, so it is independent of the
//! frame cadence that drives it.

use crate::constants::*;
use crate::pool::{Arena, Handle};
use glam::Vec2;
use rand::prelude::*;
use smallvec::SmallVec;
use std::time::Duration;

/// Perspective scale factor for a point at depth `z`.
#[inline]
pub fn perspective_scale(z: f32, focal: f32) -> f32 {
    focal / (focal + z.max(0.0))
}

/// Project a lateral offset at depth `z` onto the screen plane (still
/// relative to the screen centre). Returns the projected offset and scale.
#[inline]
pub fn project(offset: Vec2, z: f32, focal: f32) -> (Vec2, f32) {
    let k = perspective_scale(z, focal);
    (offset * k, k)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    pub z: f32,
    pub offset: Vec2,
    pub hue: f32,
    pub collectible: bool,
    pub collected: bool,
    /// How many times this slot has been sent back to the far end.
    pub recycled: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub hue: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Orb {
    /// Normalized screen position, both axes in \[0, 1\].
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub hue: f32,
}

/// Per-frame steering, already reduced from keys and pointer.
#[derive(Clone, Copy, Debug, Default)]
pub struct TunnelInput {
    /// Keyboard direction, each axis in \[-1, 1\].
    pub movement: Vec2,
    /// Pointer/touch movement since last frame in screen pixels.
    pub pointer_delta: Vec2,
    pub boost: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pickup {
    pub ring: Handle,
    pub at: Duration,
    pub combo: u32,
    pub points: u32,
    pub position: Vec2,
    pub hue: f32,
}

/// Consecutive-pickup counter with a lapse window.
#[derive(Clone, Debug)]
pub struct ComboTracker {
    window: Duration,
    combo: u32,
    last: Option<Duration>,
}

impl Default for ComboTracker {
    fn default() -> Self {
        Self::new(Duration::from_millis(COMBO_WINDOW_MS))
    }
}

impl ComboTracker {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            combo: 0,
            last: None,
        }
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Current combo as seen at `now`; zero once the window has lapsed.
    pub fn live_combo(&self, now: Duration) -> u32 {
        match self.last {
            Some(t) if now.saturating_sub(t) < self.window => self.combo,
            _ => 0,
        }
    }

    pub fn register(&mut self, now: Duration) -> u32 {
        self.combo = match self.last {
            Some(t) if now.saturating_sub(t) < self.window => self.combo + 1,
            _ => 1,
        };
        self.last = Some(now);
        self.combo
    }

    pub fn reset(&mut self) {
        self.combo = 0;
        self.last = None;
    }
}

#[derive(Clone, Debug)]
pub struct TunnelParams {
    pub ring_count: usize,
    pub max_z: f32,
    pub recycle_z: f32,
    pub focal: f32,
    pub pickup_radius: f32,
    pub pickup_z_band: f32,
    pub collectible_chance: f64,
    pub combo_window: Duration,
}

impl Default for TunnelParams {
    fn default() -> Self {
        Self {
            ring_count: RING_COUNT,
            max_z: RING_MAX_Z,
            recycle_z: RING_RECYCLE_Z,
            focal: FOCAL_LENGTH,
            pickup_radius: PICKUP_RADIUS,
            pickup_z_band: PICKUP_Z_BAND,
            collectible_chance: COLLECTIBLE_CHANCE,
            combo_window: Duration::from_millis(COMBO_WINDOW_MS),
        }
    }
}

pub struct TunnelSim {
    pub params: TunnelParams,
    rings: Arena<Ring>,
    particles: Arena<Particle>,
    orbs: Arena<Orb>,
    player: Vec2,
    combo: ComboTracker,
    score: u64,
    collected: u32,
    best_combo: u32,
    clock: Duration,
    rng: StdRng,
}

impl TunnelSim {
    pub fn new(params: TunnelParams, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut rings = Arena::with_capacity(params.ring_count);
        let spacing = params.max_z / params.ring_count.max(1) as f32;
        for i in 0..params.ring_count {
            let mut ring = fresh_ring(&mut rng, &params);
            ring.z = spacing * (i + 1) as f32;
            // Capacity equals ring_count, so this cannot fail.
            _ = rings.insert(ring);
        }
        let mut orbs = Arena::with_capacity(ORB_COUNT);
        for _ in 0..ORB_COUNT {
            _ = orbs.insert(Orb {
                pos: Vec2::new(rng.gen(), rng.gen()),
                vel: Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)).normalize_or_zero(),
                radius: rng.gen_range(20.0..80.0),
                hue: rng.gen_range(180.0..300.0),
            });
        }
        let combo = ComboTracker::new(params.combo_window);
        Self {
            params,
            rings,
            particles: Arena::with_capacity(PARTICLE_POOL_SIZE),
            orbs,
            player: Vec2::ZERO,
            combo,
            score: 0,
            collected: 0,
            best_combo: 0,
            clock: Duration::ZERO,
            rng,
        }
    }

    pub fn rings(&self) -> impl Iterator<Item = (Handle, &Ring)> {
        self.rings.iter()
    }

    pub fn ring(&self, handle: Handle) -> Option<&Ring> {
        self.rings.get(handle)
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().map(|(_, p)| p)
    }

    pub fn orbs(&self) -> impl Iterator<Item = &Orb> {
        self.orbs.iter().map(|(_, o)| o)
    }

    pub fn player(&self) -> Vec2 {
        self.player
    }

    pub fn set_player(&mut self, offset: Vec2) {
        self.player = offset.clamp_length_max(PLAYER_MAX_OFFSET);
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn collected(&self) -> u32 {
        self.collected
    }

    pub fn best_combo(&self) -> u32 {
        self.best_combo
    }

    pub fn combo(&self) -> u32 {
        self.combo.live_combo(self.clock)
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn step(&mut self, dt: Duration, input: TunnelInput) -> SmallVec<[Pickup; 2]> {
        let dt_sec = dt.as_secs_f32();
        self.clock += dt;

        let steer = input.movement.clamp_length_max(1.0) * PLAYER_MOVE_PER_SEC * dt_sec
            + input.pointer_delta;
        self.set_player(self.player + steer);

        let speed = if input.boost { BOOST_SPEED } else { BASE_SPEED };
        let dz = speed * dt_sec * Z_UNITS_PER_SEC;

        let mut pickups: SmallVec<[Pickup; 2]> = SmallVec::new();
        let focal = self.params.focal;
        let band = self.params.pickup_z_band;
        let radius = self.params.pickup_radius;
        let recycle_z = self.params.recycle_z;
        let player = self.player;
        let now = self.clock;
        let mut to_recycle: SmallVec<[Handle; 4]> = SmallVec::new();

        for (handle, ring) in self.rings.iter_mut() {
            ring.z -= dz;
            if ring.collectible && !ring.collected && ring.z < band {
                let (pos, _) = project(ring.offset, ring.z, focal);
                if pos.distance(player) < radius {
                    ring.collected = true;
                    pickups.push(Pickup {
                        ring: handle,
                        at: now,
                        combo: 0,
                        points: 0,
                        position: pos,
                        hue: ring.hue,
                    });
                }
            }
            if ring.z < recycle_z {
                to_recycle.push(handle);
            }
        }

        for handle in to_recycle {
            let fresh = fresh_ring(&mut self.rng, &self.params);
            if let Some(ring) = self.rings.get_mut(handle) {
                let recycled = ring.recycled + 1;
                *ring = Ring { recycled, ..fresh };
            }
        }

        for p in pickups.iter_mut() {
            p.combo = self.combo.register(now);
            p.points = PICKUP_BASE_SCORE * p.combo;
            self.score += p.points as u64;
            self.collected += 1;
            self.best_combo = self.best_combo.max(p.combo);
            log::debug!(
                "[tunnel] pickup combo={} points={} score={}",
                p.combo,
                p.points,
                self.score
            );
        }
        for p in &pickups {
            self.spawn_burst(p.position, p.hue);
        }

        self.step_particles(dt_sec);
        self.step_orbs(dt_sec);
        pickups
    }

    fn spawn_burst(&mut self, at: Vec2, hue: f32) {
        for i in 0..BURST_PARTICLES {
            let angle = i as f32 / BURST_PARTICLES as f32 * std::f32::consts::TAU
                + self.rng.gen_range(-0.2..0.2);
            let speed = PARTICLE_SPEED * self.rng.gen_range(0.5..1.0);
            let particle = Particle {
                pos: at,
                vel: Vec2::from_angle(angle) * speed,
                life: PARTICLE_LIFE_SEC,
                hue: hue + self.rng.gen_range(-20.0..20.0),
            };
            if self.particles.insert(particle).is_err() {
                log::debug!("[tunnel] particle pool exhausted");
                break;
            }
        }
    }

    fn step_particles(&mut self, dt_sec: f32) {
        let damping = (-2.5 * dt_sec).exp();
        self.particles.retain(|p| {
            p.pos += p.vel * dt_sec;
            p.vel *= damping;
            p.life -= dt_sec;
            p.life > 0.0
        });
    }

    fn step_orbs(&mut self, dt_sec: f32) {
        let step = ORB_DRIFT_PER_SEC / 1000.0 * dt_sec;
        for (_, orb) in self.orbs.iter_mut() {
            orb.pos += orb.vel * step;
            orb.pos.x = orb.pos.x.rem_euclid(1.0);
            orb.pos.y = orb.pos.y.rem_euclid(1.0);
        }
    }
}

fn fresh_ring(rng: &mut StdRng, params: &TunnelParams) -> Ring {
    Ring {
        z: params.max_z,
        offset: Vec2::new(
            rng.gen_range(-RING_OFFSET_SPAN..RING_OFFSET_SPAN),
            rng.gen_range(-RING_OFFSET_SPAN..RING_OFFSET_SPAN),
        ),
        hue: rng.gen_range(0.0..360.0),
        collectible: rng.gen_bool(params.collectible_chance),
        collected: false,
        recycled: 0,
    }
}
