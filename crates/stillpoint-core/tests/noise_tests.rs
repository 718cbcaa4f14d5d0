// Ambience synthesis: buffer shape, category character and filter routing.

use stillpoint_core::constants::*;
use stillpoint_core::*;

const SR: f32 = 44_100.0;

fn window_len() -> usize {
    (SR * 0.033).ceil() as usize
}

#[test]
fn buffers_are_two_seconds_of_stereo() {
    for c in SoundCategory::ALL {
        let buf = synthesize(c, SR, 1);
        assert_eq!(buf.channels.len(), 2, "{c:?}");
        assert_eq!(buf.len(), (SR * AMBIENCE_BUFFER_SEC) as usize, "{c:?}");
        for ch in &buf.channels {
            assert!(ch.iter().all(|v| v.is_finite() && v.abs() <= 1.0), "{c:?} out of range");
        }
    }
}

#[test]
fn fire_crackles_in_every_window() {
    for seed in 0..8 {
        let buf = synthesize(SoundCategory::Fire, SR, seed);
        for ch in &buf.channels {
            for (i, w) in ch.chunks_exact(window_len()).enumerate() {
                let peak = w.iter().fold(0.0_f32, |m, v| m.max(v.abs()));
                assert!(
                    peak > CRACKLE_THRESHOLD,
                    "seed {seed} window {i} has no crackle (peak {peak})"
                );
            }
        }
    }
}

#[test]
fn rain_stays_smooth() {
    for seed in 0..8 {
        let buf = synthesize(SoundCategory::Rain, SR, seed);
        assert!(
            buf.peak() <= CRACKLE_THRESHOLD,
            "seed {seed} rain peak {}",
            buf.peak()
        );
    }
}

#[test]
fn rain_and_fire_differ_at_lower_sample_rates() {
    let sr = 22_050.0;
    let fire = synthesize(SoundCategory::Fire, sr, 4);
    let rain = synthesize(SoundCategory::Rain, sr, 4);
    assert!(fire.peak() > CRACKLE_THRESHOLD);
    assert!(rain.peak() <= CRACKLE_THRESHOLD);
}

#[test]
fn same_seed_same_buffer() {
    let a = synthesize(SoundCategory::Wind, SR, 42);
    let b = synthesize(SoundCategory::Wind, SR, 42);
    assert_eq!(a.channels, b.channels);
    let c = synthesize(SoundCategory::Wind, SR, 43);
    assert_ne!(a.channels, c.channels);
}

#[test]
fn loop_point_is_continuous() {
    for c in [SoundCategory::Rain, SoundCategory::Wind] {
        let buf = synthesize(c, SR, 9);
        for ch in &buf.channels {
            let jump = (ch[ch.len() - 1] - ch[0]).abs();
            assert!(jump < 0.25, "{c:?} loop jump {jump}");
        }
    }
}

#[test]
fn only_ocean_swells() {
    for c in SoundCategory::ALL {
        assert_eq!(c.lfo().is_some(), c == SoundCategory::Ocean);
    }
    let lfo = SoundCategory::Ocean.lfo().unwrap();
    assert!((lfo.rate_hz - 0.1).abs() < 1e-6);
    assert!(lfo.depth_hz < SoundCategory::Ocean.filter().frequency_hz);
}

#[test]
fn filters_are_tuned_per_category() {
    assert_eq!(SoundCategory::Wind.filter().kind, FilterKind::Bandpass);
    assert_eq!(SoundCategory::Rain.filter().kind, FilterKind::Lowpass);
    for c in SoundCategory::ALL {
        let f = c.filter();
        assert!(f.frequency_hz > 0.0 && f.q > 0.0, "{c:?}");
    }
}
