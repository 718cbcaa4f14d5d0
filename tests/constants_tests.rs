// Host-side tests for front-end tuning constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn haptic_pulses_are_short_and_distinct() {
    for ms in [HAPTIC_INHALE_MS, HAPTIC_HOLD_MS, HAPTIC_EXHALE_MS] {
        assert!(ms > 0 && ms <= 200);
    }
    assert!(HAPTIC_HOLD_MS < HAPTIC_INHALE_MS);
    assert!(HAPTIC_INHALE_MS < HAPTIC_EXHALE_MS);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn cues_stay_quiet() {
    assert!(CUE_GAIN > 0.0 && CUE_GAIN < 0.3);
    assert!(CHIME_GAIN > 0.0 && CHIME_GAIN < 0.3);
    assert!(CUE_SEC > 0.0 && CHIME_SEC > 0.0);
}

#[test]
fn chime_tops_out_near_an_octave() {
    let top = CHIME_BASE_HZ * CHIME_STEP_RATIO.powi(CHIME_MAX_STEPS as i32);
    assert!((top / CHIME_BASE_HZ - 2.0).abs() < 0.01, "top ratio {}", top / CHIME_BASE_HZ);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn frame_clamp_and_save_interval_are_sane() {
    assert!(MAX_FRAME_DT_SEC > 0.016 && MAX_FRAME_DT_SEC <= 0.25);
    assert!(STATS_SAVE_INTERVAL_SEC > MAX_FRAME_DT_SEC);
    assert!(COMPANION_DECAY_INTERVAL_SEC >= STATS_SAVE_INTERVAL_SEC);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn breathing_orb_and_volume_ranges() {
    assert!(BREATH_ORB_MIN > 0.0 && BREATH_ORB_SPAN > 0.0);
    assert!(ORB_ALPHA > 0.0 && ORB_ALPHA < 1.0);
    assert!(VOLUME_STEP > 0.0 && VOLUME_STEP < 0.5);
}
