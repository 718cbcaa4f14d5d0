// Tunnel flight: projection, ring recycling, pickups, combo window and bursts.

use glam::Vec2;
use std::time::Duration;
use stillpoint_core::constants::*;
use stillpoint_core::*;

const FRAME: Duration = Duration::from_micros(16_667);

#[test]
fn perspective_scale_shrinks_with_depth() {
    assert_eq!(perspective_scale(0.0, 300.0), 1.0);
    assert!((perspective_scale(300.0, 300.0) - 0.5).abs() < 1e-6);
    let mut prev = perspective_scale(0.0, 300.0);
    for z in (10..2000).step_by(10) {
        let k = perspective_scale(z as f32, 300.0);
        assert!(k < prev, "scale not decreasing at z={z}");
        prev = k;
    }
    let (p, k) = project(Vec2::new(100.0, -50.0), 300.0, 300.0);
    assert!((k - 0.5).abs() < 1e-6);
    assert!((p - Vec2::new(50.0, -25.0)).length() < 1e-4);
}

#[test]
fn no_ring_escapes_the_recycle_threshold() {
    let params = TunnelParams::default();
    let mut sim = TunnelSim::new(params.clone(), 7);
    let mut recycled_seen = 0;
    for i in 0..5000 {
        let input = TunnelInput {
            boost: i % 3 == 0,
            ..Default::default()
        };
        sim.step(FRAME, input);
        for (_, ring) in sim.rings() {
            assert!(ring.z >= params.recycle_z, "ring escaped: z={}", ring.z);
            assert!(ring.z <= params.max_z);
            if ring.recycled > 0 {
                recycled_seen += 1;
            }
        }
    }
    assert!(recycled_seen > 0);
    assert_eq!(sim.rings().count(), params.ring_count);
}

#[test]
fn huge_step_recycles_everything_to_the_far_end() {
    let params = TunnelParams::default();
    let mut sim = TunnelSim::new(params.clone(), 1);
    sim.step(Duration::from_secs(30), TunnelInput::default());
    for (_, ring) in sim.rings() {
        assert_eq!(ring.z, params.max_z);
        assert_eq!(ring.recycled, 1);
        assert!(!ring.collected);
        assert!((0.0..360.0).contains(&ring.hue));
    }
}

#[test]
fn recycled_rings_get_fresh_visuals() {
    let mut sim = TunnelSim::new(TunnelParams::default(), 99);
    let before: Vec<f32> = sim.rings().map(|(_, r)| r.hue).collect();
    sim.step(Duration::from_secs(30), TunnelInput::default());
    let after: Vec<f32> = sim.rings().map(|(_, r)| r.hue).collect();
    let changed = before.iter().zip(&after).filter(|(a, b)| a != b).count();
    assert!(changed > before.len() / 2);
}

#[test]
fn combo_increments_inside_window_and_resets_after_gap() {
    let mut c = ComboTracker::default();
    assert_eq!(c.register(Duration::from_millis(0)), 1);
    assert_eq!(c.register(Duration::from_millis(1500)), 2);
    assert_eq!(c.register(Duration::from_millis(3499)), 3);
    // Exactly the window counts as a lapse.
    assert_eq!(c.register(Duration::from_millis(5499)), 1);
    assert_eq!(c.register(Duration::from_millis(6000)), 2);
    assert_eq!(c.live_combo(Duration::from_millis(7000)), 2);
    assert_eq!(c.live_combo(Duration::from_millis(8000)), 0);
    assert_eq!(c.register(Duration::from_millis(9000)), 1);
}

fn centered_collectible_params() -> TunnelParams {
    TunnelParams {
        ring_count: 4,
        collectible_chance: 1.0,
        ..Default::default()
    }
}

#[test]
fn flying_straight_collects_rings_near_the_cursor() {
    let params = centered_collectible_params();
    let mut sim = TunnelSim::new(params, 3);
    let mut pickups = Vec::new();
    for _ in 0..2000 {
        // Track the nearest ring so every collectible passes over the cursor.
        let target = sim
            .rings()
            .min_by(|a, b| a.1.z.total_cmp(&b.1.z))
            .map(|(_, r)| r.offset * perspective_scale(r.z, FOCAL_LENGTH))
            .unwrap_or_default();
        sim.set_player(target);
        pickups.extend(sim.step(FRAME, TunnelInput::default()));
    }
    assert!(!pickups.is_empty(), "expected at least one pickup");
    assert_eq!(sim.collected() as usize, pickups.len());
    let total: u64 = pickups.iter().map(|p| p.points as u64).sum();
    assert_eq!(sim.score(), total);
    for p in &pickups {
        assert_eq!(p.points, PICKUP_BASE_SCORE * p.combo);
        assert!(p.combo >= 1);
    }
    assert!(sim.best_combo() >= 1);

    let mut stats = GameStats::default();
    stats.record_pickups(&pickups);
    assert_eq!(stats.total_score, sim.score());
    assert_eq!(stats.best_combo, sim.best_combo());
    assert!(stats.achievements.get("first_orb").unwrap().unlocked);
}

#[test]
fn a_ring_is_collected_at_most_once_per_pass() {
    let params = TunnelParams {
        ring_count: 1,
        collectible_chance: 1.0,
        pickup_radius: 10_000.0,
        ..Default::default()
    };
    let mut sim = TunnelSim::new(params.clone(), 5);
    let pass = Duration::from_secs_f32(params.max_z / Z_UNITS_PER_SEC);
    let mut count = 0;
    let mut t = Duration::ZERO;
    while t < pass {
        count += sim.step(FRAME, TunnelInput::default()).len();
        t += FRAME;
    }
    assert_eq!(count, 1);
}

#[test]
fn pickups_spawn_bursts_that_fade_out() {
    let params = TunnelParams {
        ring_count: 1,
        collectible_chance: 1.0,
        pickup_radius: 10_000.0,
        ..Default::default()
    };
    let mut sim = TunnelSim::new(params, 11);
    let mut got = false;
    for _ in 0..1000 {
        if !sim.step(FRAME, TunnelInput::default()).is_empty() {
            got = true;
            break;
        }
    }
    assert!(got);
    assert_eq!(sim.particles().count(), BURST_PARTICLES);
    sim.step(Duration::from_secs_f32(PARTICLE_LIFE_SEC + 0.1), TunnelInput::default());
    assert_eq!(sim.particles().count(), 0);
}

#[test]
fn player_offset_is_clamped() {
    let mut sim = TunnelSim::new(TunnelParams::default(), 2);
    let input = TunnelInput {
        movement: Vec2::new(1.0, 0.0),
        ..Default::default()
    };
    for _ in 0..600 {
        sim.step(FRAME, input);
    }
    assert!((sim.player().length() - PLAYER_MAX_OFFSET).abs() < 1e-3);
    assert!(sim.player().x > 0.0);
}

#[test]
fn orbs_stay_on_screen() {
    let mut sim = TunnelSim::new(TunnelParams::default(), 8);
    for _ in 0..1000 {
        sim.step(Duration::from_millis(100), TunnelInput::default());
    }
    assert_eq!(sim.orbs().count(), ORB_COUNT);
    for orb in sim.orbs() {
        assert!((0.0..=1.0).contains(&orb.pos.x));
        assert!((0.0..=1.0).contains(&orb.pos.y));
    }
}
