//! Companion pet and meditation garden.
//!
//! Needs decay with wall-clock time between visits. Every value goes through
//! `Meter`, which keeps it inside \[0, 100\].

use crate::constants::{METER_MAX, METER_MIN};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Meter(f32);

impl Meter {
    pub const FULL: Meter = Meter(METER_MAX);
    pub const EMPTY: Meter = Meter(METER_MIN);

    pub fn new(v: f32) -> Self {
        if v.is_nan() {
            return Self::EMPTY;
        }
        Meter(v.clamp(METER_MIN, METER_MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }

    pub fn add(&mut self, delta: f32) {
        *self = Meter::new(self.0 + delta);
    }
}

impl From<f32> for Meter {
    fn from(v: f32) -> Self {
        Meter::new(v)
    }
}

impl From<Meter> for f32 {
    fn from(m: Meter) -> Self {
        m.0
    }
}

// Decay per hour of absence.
const HUNGER_DECAY_PER_HOUR: f32 = 8.0;
const HAPPINESS_DECAY_PER_HOUR: f32 = 5.0;
const ENERGY_DECAY_PER_HOUR: f32 = 4.0;
const CLEANLINESS_DECAY_PER_HOUR: f32 = 3.0;
const GARDEN_HEALTH_DECAY_PER_HOUR: f32 = 2.0;
const GARDEN_GROWTH_PER_MINUTE: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareAction {
    Feed,
    Play,
    Rest,
    Clean,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub name: String,
    pub hunger: Meter,
    pub happiness: Meter,
    pub energy: Meter,
    pub cleanliness: Meter,
    /// Unix milliseconds of the last decay or care action.
    pub last_update_ms: u64,
}

impl Pet {
    pub fn new(name: impl Into<String>, now_ms: u64) -> Self {
        Self {
            name: name.into(),
            hunger: Meter::FULL,
            happiness: Meter::FULL,
            energy: Meter::FULL,
            cleanliness: Meter::FULL,
            last_update_ms: now_ms,
        }
    }

    /// Apply decay for the time since the last update. Clock skew backwards is
    /// treated as no time passing.
    pub fn decay(&mut self, now_ms: u64) {
        if self.last_update_ms == 0 {
            self.last_update_ms = now_ms;
            return;
        }
        let hours = hours_between(self.last_update_ms, now_ms);
        self.hunger.add(-HUNGER_DECAY_PER_HOUR * hours);
        self.happiness.add(-HAPPINESS_DECAY_PER_HOUR * hours);
        self.energy.add(-ENERGY_DECAY_PER_HOUR * hours);
        self.cleanliness.add(-CLEANLINESS_DECAY_PER_HOUR * hours);
        self.last_update_ms = self.last_update_ms.max(now_ms);
    }

    pub fn care(&mut self, action: CareAction, now_ms: u64) {
        self.decay(now_ms);
        match action {
            CareAction::Feed => {
                self.hunger.add(25.0);
                self.cleanliness.add(-5.0);
            }
            CareAction::Play => {
                self.happiness.add(20.0);
                self.energy.add(-10.0);
                self.hunger.add(-5.0);
            }
            CareAction::Rest => self.energy.add(30.0),
            CareAction::Clean => {
                self.cleanliness.add(40.0);
                self.happiness.add(5.0);
            }
        }
    }

    /// Mean of all needs; drives the mood label in the panel.
    pub fn wellbeing(&self) -> f32 {
        (self.hunger.get() + self.happiness.get() + self.energy.get() + self.cleanliness.get())
            / 4.0
    }

    pub fn mood(&self) -> &'static str {
        match self.wellbeing() {
            w if w >= 80.0 => "radiant",
            w if w >= 50.0 => "content",
            w if w >= 25.0 => "restless",
            _ => "neglected",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Garden {
    pub growth: Meter,
    pub health: Meter,
    pub last_update_ms: u64,
}

impl Garden {
    pub fn new(now_ms: u64) -> Self {
        Self {
            growth: Meter::EMPTY,
            health: Meter::FULL,
            last_update_ms: now_ms,
        }
    }

    pub fn decay(&mut self, now_ms: u64) {
        if self.last_update_ms == 0 {
            self.last_update_ms = now_ms;
            return;
        }
        let hours = hours_between(self.last_update_ms, now_ms);
        self.health.add(-GARDEN_HEALTH_DECAY_PER_HOUR * hours);
        self.last_update_ms = self.last_update_ms.max(now_ms);
    }

    pub fn water(&mut self, now_ms: u64) {
        self.decay(now_ms);
        self.health.add(30.0);
    }

    /// Meditation time grows the garden, scaled by its health.
    pub fn nurture(&mut self, meditated_minutes: f32) {
        let factor = self.health.get() / METER_MAX;
        self.growth
            .add(GARDEN_GROWTH_PER_MINUTE * meditated_minutes.max(0.0) * factor);
    }

    pub fn in_full_bloom(&self) -> bool {
        self.growth >= Meter::FULL
    }
}

fn hours_between(from_ms: u64, to_ms: u64) -> f32 {
    to_ms.saturating_sub(from_ms) as f32 / 3_600_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meter_clamps_and_rejects_nan() {
        assert_eq!(Meter::new(150.0).get(), 100.0);
        assert_eq!(Meter::new(-3.0).get(), 0.0);
        assert_eq!(Meter::new(f32::NAN).get(), 0.0);
        let mut m = Meter::new(90.0);
        m.add(50.0);
        assert_eq!(m, Meter::FULL);
    }
}
