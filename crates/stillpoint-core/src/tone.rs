use crate::constants::*;
use crate::playback::{Playback, StopOutcome};
use thiserror::Error;

/// Basic oscillator shape used by the tone player in the web front-end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Saw,
    Triangle,
}

/// Static description of a named healing frequency.
///
/// Fields:
/// - `hz`: oscillator frequency in Hertz
/// - `name`: short display name (e.g. "Love Frequency")
/// - `description`: one-line blurb shown in the panel
/// - `color`: CSS color used for the panel glow and tunnel tint
/// - `benefits`: short tags listed under the tone
#[derive(Clone, Copy, Debug)]
pub struct FrequencyDescriptor {
    pub hz: f32,
    pub name: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    pub benefits: &'static [&'static str],
}

pub const SOLFEGGIO: &[FrequencyDescriptor] = &[
    FrequencyDescriptor {
        hz: 174.0,
        name: "Foundation",
        description: "Grounding tone for release of tension",
        color: "#8b5cf6",
        benefits: &["pain relief", "security"],
    },
    FrequencyDescriptor {
        hz: 285.0,
        name: "Restoration",
        description: "Associated with tissue and energy field repair",
        color: "#6366f1",
        benefits: &["healing", "regeneration"],
    },
    FrequencyDescriptor {
        hz: 396.0,
        name: "Liberation",
        description: "Letting go of guilt and fear",
        color: "#ef4444",
        benefits: &["grounding", "release fear"],
    },
    FrequencyDescriptor {
        hz: 417.0,
        name: "Change",
        description: "Undoing situations and facilitating change",
        color: "#f97316",
        benefits: &["clearing", "new beginnings"],
    },
    FrequencyDescriptor {
        hz: 528.0,
        name: "Love Frequency",
        description: "Transformation and miracles",
        color: "#22c55e",
        benefits: &["love", "clarity", "peace"],
    },
    FrequencyDescriptor {
        hz: 639.0,
        name: "Connection",
        description: "Harmonising relationships",
        color: "#06b6d4",
        benefits: &["harmony", "communication"],
    },
    FrequencyDescriptor {
        hz: 741.0,
        name: "Expression",
        description: "Awakening intuition and self-expression",
        color: "#3b82f6",
        benefits: &["intuition", "problem solving"],
    },
    FrequencyDescriptor {
        hz: 852.0,
        name: "Intuition",
        description: "Returning to spiritual order",
        color: "#a855f7",
        benefits: &["awareness", "inner strength"],
    },
    FrequencyDescriptor {
        hz: 963.0,
        name: "Crown",
        description: "Oneness and higher perspective",
        color: "#e879f9",
        benefits: &["unity", "enlightenment"],
    },
];

pub const CHAKRAS: &[FrequencyDescriptor] = &[
    FrequencyDescriptor {
        hz: 396.0,
        name: "Root",
        description: "Muladhara, stability and safety",
        color: "#ef4444",
        benefits: &["grounding"],
    },
    FrequencyDescriptor {
        hz: 417.0,
        name: "Sacral",
        description: "Svadhisthana, creativity and flow",
        color: "#f97316",
        benefits: &["creativity"],
    },
    FrequencyDescriptor {
        hz: 528.0,
        name: "Solar Plexus",
        description: "Manipura, confidence and will",
        color: "#eab308",
        benefits: &["confidence"],
    },
    FrequencyDescriptor {
        hz: 639.0,
        name: "Heart",
        description: "Anahata, compassion",
        color: "#22c55e",
        benefits: &["compassion"],
    },
    FrequencyDescriptor {
        hz: 741.0,
        name: "Throat",
        description: "Vishuddha, expression",
        color: "#3b82f6",
        benefits: &["expression"],
    },
    FrequencyDescriptor {
        hz: 852.0,
        name: "Third Eye",
        description: "Ajna, insight",
        color: "#6366f1",
        benefits: &["insight"],
    },
    FrequencyDescriptor {
        hz: 963.0,
        name: "Crown",
        description: "Sahasrara, connection",
        color: "#a855f7",
        benefits: &["connection"],
    },
];

pub fn find_tone(hz: f32) -> Option<&'static FrequencyDescriptor> {
    SOLFEGGIO
        .iter()
        .chain(CHAKRAS.iter())
        .find(|d| (d.hz - hz).abs() < 0.5)
}

#[derive(Debug, Error, PartialEq)]
pub enum ToneError {
    #[error("frequency must be a positive finite number, got {0}")]
    InvalidFrequency(f32),
}

pub fn validate_frequency(hz: f32) -> Result<f32, ToneError> {
    if hz.is_finite() && hz > 0.0 {
        Ok(hz)
    } else {
        Err(ToneError::InvalidFrequency(hz))
    }
}

/// Linear fade lengths applied to the tone's gain node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneEnvelope {
    pub fade_in_sec: f64,
    pub fade_out_sec: f64,
    pub peak_gain: f32,
}

impl Default for ToneEnvelope {
    fn default() -> Self {
        Self {
            fade_in_sec: TONE_FADE_IN_SEC,
            fade_out_sec: TONE_FADE_OUT_DEFAULT_SEC,
            peak_gain: TONE_PEAK_GAIN,
        }
    }
}

impl ToneEnvelope {
    pub fn with_fade_out(mut self, sec: f64) -> Self {
        self.fade_out_sec = sec.clamp(TONE_FADE_OUT_MIN_SEC, TONE_FADE_OUT_MAX_SEC);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneRequest {
    pub hz: f32,
    pub waveform: Waveform,
}

/// What the audio layer must do to honour a `play` call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TonePlan {
    /// Previous oscillator to fade out quickly and release at this time.
    pub teardown_until: Option<f64>,
    pub request: ToneRequest,
    pub start_at: f64,
    pub peak_at: f64,
    pub peak_gain: f32,
}

/// Decides oscillator lifecycles for one tone panel. No glide: a new
/// frequency always means a new oscillator.
#[derive(Clone, Debug, Default)]
pub struct ToneController {
    playback: Playback,
    current: Option<ToneRequest>,
    envelope: ToneEnvelope,
}

impl ToneController {
    pub fn new(envelope: ToneEnvelope) -> Self {
        Self {
            envelope,
            ..Default::default()
        }
    }

    pub fn envelope(&self) -> ToneEnvelope {
        self.envelope
    }

    /// Applies to the next stop; clamped to the allowed release range.
    pub fn set_fade_out(&mut self, sec: f64) {
        self.envelope = self.envelope.with_fade_out(sec);
    }

    pub fn current(&self) -> Option<ToneRequest> {
        if self.playback.is_playing() {
            self.current
        } else {
            None
        }
    }

    pub fn play(
        &mut self,
        hz: f32,
        waveform: Option<Waveform>,
        now: f64,
    ) -> Result<TonePlan, ToneError> {
        let hz = validate_frequency(hz)?;
        let teardown_until = match self.playback.stop(now, TONE_SWITCH_FADE_SEC) {
            StopOutcome::Release { release_until } => Some(release_until),
            StopOutcome::AlreadyStopped => None,
        };
        let request = ToneRequest {
            hz,
            waveform: waveform.unwrap_or_default(),
        };
        self.playback.start(now);
        self.current = Some(request);
        Ok(TonePlan {
            teardown_until,
            request,
            start_at: now,
            peak_at: now + self.envelope.fade_in_sec,
            peak_gain: self.envelope.peak_gain,
        })
    }

    pub fn stop(&mut self, now: f64) -> StopOutcome {
        self.playback.stop(now, self.envelope.fade_out_sec)
    }

    pub fn poll(&mut self, now: f64) -> bool {
        self.playback.poll(now)
    }

    /// Roll back a `play` whose oscillator could not be built: nothing is
    /// sounding, so there is nothing to fade.
    pub fn abandon(&mut self, now: f64) {
        self.playback.stop(now, 0.0);
        self.playback.poll(now);
        self.current = None;
    }
}
