// Breathing guide: phase order, boundary timing and reset behavior.

use std::time::Duration;
use stillpoint_core::{BreathPhase, BreathTimer};

const FRAME: Duration = Duration::from_micros(16_667);

#[test]
fn starts_in_inhale_with_zero_progress() {
    let t = BreathTimer::default();
    assert_eq!(t.phase(), BreathPhase::Inhale);
    assert_eq!(t.progress(), 0.0);
    assert_eq!(t.cycles(), 0);
}

#[test]
fn phases_cycle_in_order_with_nominal_durations() {
    let mut t = BreathTimer::default();
    let mut changes = Vec::new();
    let mut elapsed = Duration::ZERO;
    while elapsed < Duration::from_secs(60) {
        changes.extend(t.tick(FRAME));
        elapsed += FRAME;
    }
    assert!(changes.len() >= 12, "expected several cycles, got {}", changes.len());

    let expected = [BreathPhase::Hold, BreathPhase::Exhale, BreathPhase::Inhale];
    for (i, c) in changes.iter().enumerate() {
        assert_eq!(c.to, expected[i % 3], "wrong phase at transition {i}");
        assert_eq!(c.from.next(), c.to);
    }

    // Boundaries land on exact multiples of the pattern.
    let nominal = [4000u64, 4000, 6000];
    let mut boundary = 0u64;
    for (i, c) in changes.iter().enumerate() {
        boundary += nominal[i % 3];
        assert_eq!(c.at, Duration::from_millis(boundary));
    }
}

#[test]
fn observed_phase_lengths_are_within_one_frame() {
    let mut t = BreathTimer::default();
    let mut now = Duration::ZERO;
    let mut last_change = Duration::ZERO;
    let mut observed = Vec::new();
    for _ in 0..3000 {
        now += FRAME;
        for c in t.tick(FRAME) {
            observed.push((c.from, now - last_change));
            last_change = now;
        }
    }
    for (phase, len) in observed.iter().skip(1) {
        let nominal = t.pattern().duration_of(*phase);
        let diff = if *len > nominal { *len - nominal } else { nominal - *len };
        assert!(diff <= FRAME, "{phase:?} lasted {len:?}, nominal {nominal:?}");
    }
}

#[test]
fn large_step_emits_every_crossed_boundary() {
    let mut t = BreathTimer::default();
    let changes = t.tick(Duration::from_millis(14_000 + 4_500));
    let phases: Vec<_> = changes.iter().map(|c| c.to).collect();
    assert_eq!(
        phases,
        vec![BreathPhase::Hold, BreathPhase::Exhale, BreathPhase::Inhale, BreathPhase::Hold]
    );
    assert_eq!(t.cycles(), 1);
    assert_eq!(t.phase(), BreathPhase::Hold);
    assert!((t.progress() - 0.125).abs() < 1e-4);
}

#[test]
fn reset_restarts_at_inhale() {
    let mut t = BreathTimer::default();
    t.tick(Duration::from_millis(9_000));
    assert_eq!(t.phase(), BreathPhase::Exhale);
    t.reset();
    assert_eq!(t.phase(), BreathPhase::Inhale);
    assert_eq!(t.progress(), 0.0);
    assert_eq!(t.cycles(), 0);
}

#[test]
fn expansion_follows_the_breath() {
    let mut t = BreathTimer::default();
    t.tick(Duration::from_millis(2_000));
    assert!((t.expansion() - 0.5).abs() < 1e-4);
    t.tick(Duration::from_millis(3_000));
    assert_eq!(t.expansion(), 1.0);
    t.tick(Duration::from_millis(6_000));
    assert!((t.expansion() - 0.5).abs() < 1e-4);
}
