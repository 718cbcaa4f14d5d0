// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn no_keys_means_no_movement() {
    let keys = KeySet::default();
    assert_eq!(keys.movement(), Vec2::ZERO);
    assert!(!keys.boost());
}

#[test]
fn wasd_and_arrows_steer_the_same_way() {
    let mut wasd = KeySet::default();
    wasd.press("d");
    wasd.press("w");
    let mut arrows = KeySet::default();
    arrows.press("ArrowRight");
    arrows.press("ArrowUp");
    assert_eq!(wasd.movement(), arrows.movement());
    let m = wasd.movement();
    assert!(m.x > 0.0 && m.y < 0.0);
    assert!((m.length() - 1.0).abs() < 1e-5, "diagonal is normalized");
}

#[test]
fn opposite_keys_cancel() {
    let mut keys = KeySet::default();
    keys.press("a");
    keys.press("d");
    assert_eq!(keys.movement(), Vec2::ZERO);
}

#[test]
fn key_case_is_ignored_for_letters() {
    let mut keys = KeySet::default();
    keys.press("W");
    assert!(keys.is_down("w"));
    keys.release("w");
    assert!(!keys.is_down("W"));
    // named keys keep their case
    keys.press("ArrowLeft");
    assert!(keys.is_down("ArrowLeft"));
}

#[test]
fn space_boosts_and_clear_releases_everything() {
    let mut keys = KeySet::default();
    keys.press(" ");
    keys.press("s");
    assert!(keys.boost());
    keys.clear();
    assert!(!keys.boost());
    assert_eq!(keys.movement(), Vec2::ZERO);
}

#[test]
fn pointer_delta_only_accumulates_while_down() {
    let mut p = PointerState::default();
    p.move_to(Vec2::new(10.0, 10.0));
    assert_eq!(p.take_delta(), Vec2::ZERO);

    p.begin(Vec2::new(10.0, 10.0));
    p.move_to(Vec2::new(15.0, 12.0));
    p.move_to(Vec2::new(20.0, 8.0));
    assert_eq!(p.take_delta(), Vec2::new(10.0, -2.0));
    assert_eq!(p.take_delta(), Vec2::ZERO, "delta is consumed");

    p.end();
    p.move_to(Vec2::new(100.0, 100.0));
    assert_eq!(p.take_delta(), Vec2::ZERO);
}

#[test]
fn digits_pick_solfeggio_tones() {
    assert_eq!(tone_index_for_digit("1"), Some(0));
    assert_eq!(tone_index_for_digit("9"), Some(8));
    assert_eq!(tone_index_for_digit("0"), None);
    assert_eq!(tone_index_for_digit("q"), None);
}

#[test]
fn css_positions_scale_to_backing_store() {
    let p = css_to_canvas(
        Vec2::new(50.0, 25.0),
        Vec2::new(100.0, 50.0),
        Vec2::new(200.0, 100.0),
    );
    assert_eq!(p, Vec2::new(100.0, 50.0));
    // zero-size layout falls back to the raw position
    let q = css_to_canvas(Vec2::new(3.0, 4.0), Vec2::ZERO, Vec2::new(200.0, 100.0));
    assert_eq!(q, Vec2::new(3.0, 4.0));
}
