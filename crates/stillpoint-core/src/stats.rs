//! Persisted session state and the single place that turns engine events
//! into achievement progress.

use crate::achievements::{Achievement, AchievementBook, Unlock};
use crate::companion::{CareAction, Garden, Pet};
use crate::journal::{DreamEntry, Journal, Manifestation, PsychicInsight};
use crate::noise::SoundCategory;
use crate::persist::Persisted;
use crate::tone::{CHAKRAS, SOLFEGGIO};
use crate::tunnel::Pickup;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub const STATS_KEY: &str = "stillpoint.stats";
pub const DREAMS_KEY: &str = "stillpoint.dreams";
pub const MANIFESTATIONS_KEY: &str = "stillpoint.manifestations";
pub const INSIGHTS_KEY: &str = "stillpoint.insights";
pub const SETTINGS_KEY: &str = "stillpoint.settings";

const MS_PER_DAY: u64 = 86_400_000;

pub type Unlocks = SmallVec<[Unlock; 2]>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    pub achievements: AchievementBook,
    pub pet: Pet,
    pub garden: Garden,
    pub total_score: u64,
    pub best_combo: u32,
    pub lights_collected: u32,
    pub breath_cycles: u32,
    pub care_actions: u32,
    /// Rounded Hz of every distinct tone played.
    pub tones_played: Vec<u32>,
    pub soundscapes_heard: Vec<SoundCategory>,
    /// Distinct days (unix ms / day) with a session.
    pub meditation_days: Vec<u64>,
    pub dreams_recorded: u32,
}

impl Default for GameStats {
    fn default() -> Self {
        Self {
            achievements: AchievementBook::default(),
            pet: Pet::new("Lumen", 0),
            garden: Garden::new(0),
            total_score: 0,
            best_combo: 0,
            lights_collected: 0,
            breath_cycles: 0,
            care_actions: 0,
            tones_played: Vec::new(),
            soundscapes_heard: Vec::new(),
            meditation_days: Vec::new(),
            dreams_recorded: 0,
        }
    }
}

impl Persisted for GameStats {
    const KEY: &'static str = STATS_KEY;
    const VERSION: u32 = 2;

    // v1 stored only the bare achievements array.
    fn migrate(from_version: u32, data: serde_json::Value) -> Option<Self> {
        if from_version != 1 {
            return None;
        }
        let list: Vec<Achievement> = serde_json::from_value(data).ok()?;
        Some(Self {
            achievements: AchievementBook::from_list(list),
            ..Self::default()
        })
    }
}

impl GameStats {
    pub fn record_session(&mut self, now_ms: u64) -> Unlocks {
        self.decay_companions(now_ms);
        let day = now_ms / MS_PER_DAY;
        if !self.meditation_days.contains(&day) {
            self.meditation_days.push(day);
        }
        self.achievements
            .raise_to("daily_devotion", self.meditation_days.len() as u32)
    }

    pub fn record_breath_cycle(&mut self) -> Unlocks {
        self.breath_cycles += 1;
        let mut out = Unlocks::new();
        for id in ["first_breath", "steady_breather", "breath_master"] {
            out.extend(self.achievements.award(id, 1));
        }
        self.garden.nurture(self.breath_pattern_minutes());
        out.extend(
            self.achievements
                .raise_to("gardener", self.garden.growth.get() as u32),
        );
        out
    }

    pub fn record_tone(&mut self, hz: f32) -> Unlocks {
        let key = hz.round() as u32;
        if !self.tones_played.contains(&key) {
            self.tones_played.push(key);
        }
        let mut out = self.achievements.award("tone_seeker", 1);
        let solfeggio = count_covered(SOLFEGGIO.iter().map(|d| d.hz), &self.tones_played);
        let chakras = count_covered(CHAKRAS.iter().map(|d| d.hz), &self.tones_played);
        out.extend(self.achievements.raise_to("frequency_explorer", solfeggio));
        out.extend(self.achievements.raise_to("chakra_aligned", chakras));
        out
    }

    pub fn record_ambience(&mut self, category: SoundCategory) -> Unlocks {
        if !self.soundscapes_heard.contains(&category) {
            self.soundscapes_heard.push(category);
        }
        let mut out = self.achievements.award("nature_listener", 1);
        out.extend(
            self.achievements
                .raise_to("soundscape_collector", self.soundscapes_heard.len() as u32),
        );
        out
    }

    pub fn record_pickups(&mut self, pickups: &[Pickup]) -> Unlocks {
        let mut out = Unlocks::new();
        for p in pickups {
            self.total_score += p.points as u64;
            self.lights_collected += 1;
            self.best_combo = self.best_combo.max(p.combo);
            out.extend(self.achievements.award("first_orb", 1));
            out.extend(self.achievements.award("orb_gatherer", 1));
            out.extend(self.achievements.raise_to("combo_five", p.combo));
            out.extend(self.achievements.raise_to("combo_ten", p.combo));
        }
        out
    }

    pub fn record_dream(&mut self) -> Unlocks {
        self.dreams_recorded += 1;
        let mut out = self.achievements.award("dreamer", 1);
        out.extend(self.achievements.award("dream_weaver", 1));
        out
    }

    pub fn record_manifestation(&mut self) -> Unlocks {
        self.achievements.award("manifestor", 1)
    }

    pub fn record_insight(&mut self) -> Unlocks {
        self.achievements.award("intuitive", 1)
    }

    pub fn care(&mut self, action: CareAction, now_ms: u64) -> Unlocks {
        self.pet.care(action, now_ms);
        self.care_actions += 1;
        self.achievements.award("caretaker", 1)
    }

    /// Periodic decay of pet needs and garden health up to `now_ms`.
    pub fn decay_companions(&mut self, now_ms: u64) {
        self.pet.decay(now_ms);
        self.garden.decay(now_ms);
    }

    pub fn water_garden(&mut self, now_ms: u64) {
        self.garden.water(now_ms);
    }

    fn breath_pattern_minutes(&self) -> f32 {
        crate::breath::BreathPattern::default().cycle().as_secs_f32() / 60.0
    }
}

fn count_covered(table: impl Iterator<Item = f32>, played: &[u32]) -> u32 {
    table
        .filter(|hz| played.contains(&(hz.round() as u32)))
        .count() as u32
}

impl Persisted for Journal<DreamEntry> {
    const KEY: &'static str = DREAMS_KEY;
    const VERSION: u32 = 1;
}

impl Persisted for Journal<Manifestation> {
    const KEY: &'static str = MANIFESTATIONS_KEY;
    const VERSION: u32 = 1;
}

impl Persisted for Journal<PsychicInsight> {
    const KEY: &'static str = INSIGHTS_KEY;
    const VERSION: u32 = 1;
}

/// Panel choices restored on the next visit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeditationSettings {
    pub tone_hz: Option<f32>,
    pub ambience: Option<SoundCategory>,
    pub volume: f32,
    pub breath_enabled: bool,
    pub haptics: bool,
    /// Tone release time; clamped to the allowed range when applied.
    pub tone_fade_out_sec: f64,
}

impl Default for MeditationSettings {
    fn default() -> Self {
        Self {
            tone_hz: None,
            ambience: None,
            volume: crate::constants::AMBIENCE_DEFAULT_VOLUME,
            breath_enabled: true,
            haptics: true,
            tone_fade_out_sec: crate::constants::TONE_FADE_OUT_DEFAULT_SEC,
        }
    }
}

impl Persisted for MeditationSettings {
    const KEY: &'static str = SETTINGS_KEY;
    const VERSION: u32 = 1;
}
