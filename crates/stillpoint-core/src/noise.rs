//! Procedural ambience buffers.
//!
//! Every category is synthesised from scratch into a fixed-length stereo
//! buffer that the web frontend loops through a biquad filter. Nothing is
//! cached between category switches.

use crate::constants::*;
use rand::prelude::*;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCategory {
    Rain,
    Ocean,
    Wind,
    Forest,
    Fire,
}

impl SoundCategory {
    pub const ALL: [SoundCategory; 5] = [
        SoundCategory::Rain,
        SoundCategory::Ocean,
        SoundCategory::Wind,
        SoundCategory::Forest,
        SoundCategory::Fire,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SoundCategory::Rain => "rain",
            SoundCategory::Ocean => "ocean",
            SoundCategory::Wind => "wind",
            SoundCategory::Forest => "forest",
            SoundCategory::Fire => "fire",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.label() == s)
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn filter(self) -> FilterSpec {
        match self {
            SoundCategory::Rain => FilterSpec {
                kind: FilterKind::Lowpass,
                frequency_hz: 2500.0,
                q: 0.7,
            },
            SoundCategory::Ocean => FilterSpec {
                kind: FilterKind::Lowpass,
                frequency_hz: 600.0,
                q: 1.0,
            },
            SoundCategory::Wind => FilterSpec {
                kind: FilterKind::Bandpass,
                frequency_hz: 400.0,
                q: 0.5,
            },
            SoundCategory::Forest => FilterSpec {
                kind: FilterKind::Bandpass,
                frequency_hz: 3000.0,
                q: 0.8,
            },
            SoundCategory::Fire => FilterSpec {
                kind: FilterKind::Lowpass,
                frequency_hz: 1800.0,
                q: 0.9,
            },
        }
    }

    /// Slow modulation of the filter centre frequency, if the category swells.
    pub fn lfo(self) -> Option<LfoSpec> {
        match self {
            SoundCategory::Ocean => Some(LfoSpec {
                rate_hz: OCEAN_LFO_HZ,
                depth_hz: 400.0,
            }),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    Lowpass,
    Bandpass,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterSpec {
    pub kind: FilterKind,
    pub frequency_hz: f32,
    pub q: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LfoSpec {
    pub rate_hz: f32,
    pub depth_hz: f32,
}

/// Interleaving-free stereo sample storage, one `Vec` per channel, ready for
/// `AudioBuffer::copy_to_channel`.
#[derive(Clone, Debug)]
pub struct NoiseBuffer {
    pub sample_rate: f32,
    pub channels: Vec<Vec<f32>>,
}

impl NoiseBuffer {
    pub fn len(&self) -> usize {
        self.channels.first().map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flat_map(|c| c.iter())
            .fold(0.0_f32, |m, v| m.max(v.abs()))
    }
}

pub fn synthesize(category: SoundCategory, sample_rate: f32, seed: u64) -> NoiseBuffer {
    let len = (sample_rate * AMBIENCE_BUFFER_SEC) as usize;
    let fade = ((sample_rate * AMBIENCE_CROSSFADE_SEC) as usize).min(len / 2);
    let mut rng = StdRng::seed_from_u64(seed);
    let channels = (0..AMBIENCE_CHANNELS)
        .map(|_| {
            // Render past the end so the overrun can be folded into the head.
            let raw = match category {
                SoundCategory::Rain => rain(&mut rng, len + fade),
                SoundCategory::Ocean => ocean(&mut rng, len + fade, sample_rate),
                SoundCategory::Wind => wind(&mut rng, len + fade),
                SoundCategory::Forest => forest(&mut rng, len + fade, sample_rate),
                SoundCategory::Fire => fire(&mut rng, len + fade, sample_rate),
            };
            fold_loop(raw, len)
        })
        .collect();
    NoiseBuffer {
        sample_rate,
        channels,
    }
}

#[inline]
fn white(rng: &mut StdRng) -> f32 {
    rng.gen::<f32>() * 2.0 - 1.0
}

// Pink noise via three leaky integrators (Paul Kellet's economy filter).
fn rain(rng: &mut StdRng, len: usize) -> Vec<f32> {
    const RAIN_PEAK: f32 = 0.45;
    let (mut b0, mut b1, mut b2) = (0.0_f32, 0.0_f32, 0.0_f32);
    (0..len)
        .map(|_| {
            let w = white(rng);
            b0 = 0.99765 * b0 + w * 0.099_046;
            b1 = 0.963 * b1 + w * 0.296_516_4;
            b2 = 0.57 * b2 + w * 1.052_691_3;
            let pink = (b0 + b1 + b2 + w * 0.1848) * 0.05;
            pink.clamp(-RAIN_PEAK, RAIN_PEAK)
        })
        .collect()
}

fn ocean(rng: &mut StdRng, len: usize, sample_rate: f32) -> Vec<f32> {
    // One full swell per buffer so the loop point lands on the same phase.
    let swell_hz = 1.0 / AMBIENCE_BUFFER_SEC;
    let mut last = 0.0_f32;
    (0..len)
        .map(|i| {
            let t = i as f32 / sample_rate;
            let env = 0.55 + 0.45 * (TAU * swell_hz * t).sin();
            last = 0.9 * last + 0.1 * white(rng);
            (last * 2.5 * env).clamp(-0.8, 0.8)
        })
        .collect()
}

// Brown noise: a leaky random walk.
fn wind(rng: &mut StdRng, len: usize) -> Vec<f32> {
    let mut last = 0.0_f32;
    (0..len)
        .map(|_| {
            last = (last + 0.02 * white(rng)) / 1.02;
            (last * 3.5).clamp(-1.0, 1.0)
        })
        .collect()
}

fn forest(rng: &mut StdRng, len: usize, sample_rate: f32) -> Vec<f32> {
    let mut out: Vec<f32> = (0..len).map(|_| white(rng) * 0.04).collect();
    let chirps = rng.gen_range(4..9);
    for _ in 0..chirps {
        let chirp_len = (sample_rate * rng.gen_range(0.03..0.08)) as usize;
        if chirp_len == 0 || chirp_len >= len {
            continue;
        }
        let start = rng.gen_range(0..len - chirp_len);
        let f0 = rng.gen_range(2000.0..4000.0_f32);
        let sweep = rng.gen_range(500.0..1500.0_f32);
        let amp = rng.gen_range(0.15..0.3_f32);
        for j in 0..chirp_len {
            let p = j as f32 / chirp_len as f32;
            let t = j as f32 / sample_rate;
            let f = f0 + sweep * p;
            let env = (std::f32::consts::PI * p).sin();
            out[start + j] += amp * env * (TAU * f * t).sin();
        }
    }
    out.iter_mut().for_each(|v| *v = v.clamp(-1.0, 1.0));
    out
}

// Low noise bed with dense enough crackles that every ~33ms window holds one.
fn fire(rng: &mut StdRng, len: usize, sample_rate: f32) -> Vec<f32> {
    const BED: f32 = 0.08;
    let mut out: Vec<f32> = (0..len).map(|_| white(rng) * BED).collect();
    let min_gap = ((sample_rate * 0.004) as usize).max(1);
    let max_gap = ((sample_rate * 0.020) as usize).max(min_gap + 1);
    let tail = ((sample_rate * 0.003) as usize).max(1);
    let mut pos = rng.gen_range(0..max_gap);
    while pos < len {
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let amp = rng.gen_range(0.7..1.0_f32);
        for j in 0..tail {
            let idx = pos + j;
            if idx >= len {
                break;
            }
            let decay = (-(j as f32) / (tail as f32 * 0.3)).exp();
            out[idx] += sign * amp * decay;
        }
        pos += rng.gen_range(min_gap..max_gap);
    }
    out.iter_mut().for_each(|v| *v = v.clamp(-1.0, 1.0));
    out
}

/// Fold the samples rendered past `len` into the head with a linear
/// crossfade, so sample `len - 1` runs straight into sample 0 on loop.
fn fold_loop(mut raw: Vec<f32>, len: usize) -> Vec<f32> {
    let fade = raw.len().saturating_sub(len);
    for i in 0..fade {
        let t = i as f32 / fade as f32;
        raw[i] = raw[i] * t + raw[len + i] * (1.0 - t);
    }
    raw.truncate(len);
    raw
}
