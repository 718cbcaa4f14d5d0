// Host-side tests for the save and decay timers.

#![allow(dead_code)]
mod cadence {
    include!("../src/cadence.rs");
}

use cadence::*;

#[test]
fn fires_once_per_interval_of_frame_time() {
    let mut c = Cadence::new(5.0);
    let fired = (0..9).filter(|_| c.tick(0.5)).count();
    assert_eq!(fired, 0, "4.5 s is short of the interval");
    assert!(c.tick(0.5));
    let fired = (0..20).filter(|_| c.tick(0.5)).count();
    assert_eq!(fired, 2);
}

#[test]
fn negative_frame_time_does_not_rewind() {
    let mut c = Cadence::new(1.0);
    assert!(!c.tick(0.9));
    assert!(!c.tick(-5.0));
    assert!(c.tick(0.1));
}

#[test]
fn a_change_recorded_at_startup_is_written_by_the_first_flush() {
    let mut stats = Pending::default();
    stats.mark();
    assert!(stats.is_set());
    assert!(stats.take(), "first flush must write");
    assert!(!stats.take(), "nothing left after the write");
}

#[test]
fn clean_state_skips_the_flush() {
    let mut stats = Pending::default();
    assert!(!stats.take());
    stats.mark();
    stats.mark();
    assert!(stats.take());
    assert!(!stats.is_set());
}
