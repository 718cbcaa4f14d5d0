use crate::constants::{EXHALE_MS, HOLD_MS, INHALE_MS};
use smallvec::SmallVec;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
}

impl BreathPhase {
    pub fn next(self) -> Self {
        match self {
            BreathPhase::Inhale => BreathPhase::Hold,
            BreathPhase::Hold => BreathPhase::Exhale,
            BreathPhase::Exhale => BreathPhase::Inhale,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BreathPhase::Inhale => "Breathe in",
            BreathPhase::Hold => "Hold",
            BreathPhase::Exhale => "Breathe out",
        }
    }
}

/// Nominal length of each phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BreathPattern {
    pub inhale: Duration,
    pub hold: Duration,
    pub exhale: Duration,
}

impl Default for BreathPattern {
    fn default() -> Self {
        Self {
            inhale: Duration::from_millis(INHALE_MS),
            hold: Duration::from_millis(HOLD_MS),
            exhale: Duration::from_millis(EXHALE_MS),
        }
    }
}

impl BreathPattern {
    pub fn duration_of(&self, phase: BreathPhase) -> Duration {
        match phase {
            BreathPhase::Inhale => self.inhale,
            BreathPhase::Hold => self.hold,
            BreathPhase::Exhale => self.exhale,
        }
    }

    pub fn cycle(&self) -> Duration {
        self.inhale + self.hold + self.exhale
    }
}

/// Emitted when the guide moves into a new phase.
///
/// `at` is the simulated time of the boundary (time since the timer was last
/// reset), not the time of the frame that noticed it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseChange {
    pub from: BreathPhase,
    pub to: BreathPhase,
    pub at: Duration,
}

/// Three-phase breathing guide stepped by measured frame deltas.
///
/// Overshoot past a boundary is carried into the next phase, so boundaries
/// land on exact multiples of the pattern no matter how the frames fall.
#[derive(Clone, Debug)]
pub struct BreathTimer {
    pattern: BreathPattern,
    phase: BreathPhase,
    in_phase: Duration,
    total: Duration,
    cycles: u32,
}

impl Default for BreathTimer {
    fn default() -> Self {
        Self::new(BreathPattern::default())
    }
}

impl BreathTimer {
    pub fn new(pattern: BreathPattern) -> Self {
        Self {
            pattern,
            phase: BreathPhase::Inhale,
            in_phase: Duration::ZERO,
            total: Duration::ZERO,
            cycles: 0,
        }
    }

    pub fn phase(&self) -> BreathPhase {
        self.phase
    }

    pub fn pattern(&self) -> BreathPattern {
        self.pattern
    }

    /// Completed inhale-hold-exhale cycles since the last reset.
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Fraction of the current phase elapsed, in \[0, 1).
    pub fn progress(&self) -> f32 {
        let d = self.pattern.duration_of(self.phase);
        if d.is_zero() {
            return 0.0;
        }
        (self.in_phase.as_secs_f32() / d.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Visual scale for the breathing orb: grows on inhale, stays full on
    /// hold, shrinks on exhale. Range \[0, 1\].
    pub fn expansion(&self) -> f32 {
        let p = self.progress();
        match self.phase {
            BreathPhase::Inhale => p,
            BreathPhase::Hold => 1.0,
            BreathPhase::Exhale => 1.0 - p,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.pattern);
    }

    pub fn tick(&mut self, dt: Duration) -> SmallVec<[PhaseChange; 2]> {
        let mut out = SmallVec::new();
        if self.pattern.cycle().is_zero() {
            return out;
        }
        self.in_phase += dt;
        self.total += dt;
        loop {
            let d = self.pattern.duration_of(self.phase);
            if self.in_phase < d {
                break;
            }
            self.in_phase -= d;
            let from = self.phase;
            let to = from.next();
            if to == BreathPhase::Inhale {
                self.cycles += 1;
            }
            self.phase = to;
            out.push(PhaseChange {
                from,
                to,
                at: self.total - self.in_phase,
            });
        }
        out
    }
}
