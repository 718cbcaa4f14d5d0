use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Id of the capstone achievement unlocked by completing every other one.
pub const ENLIGHTENED_ID: &str = "enlightened";

pub const XP_PER_LEVEL: u32 = 500;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub progress: u32,
    pub max_progress: u32,
    pub unlocked: bool,
    pub xp: u32,
}

// (id, name, description, max_progress, xp)
const CATALOG: &[(&str, &str, &str, u32, u32)] = &[
    ("first_breath", "First Breath", "Complete one breathing cycle", 1, 50),
    ("steady_breather", "Steady Breather", "Complete 10 breathing cycles", 10, 100),
    ("breath_master", "Breath Master", "Complete 100 breathing cycles", 100, 300),
    ("tone_seeker", "Tone Seeker", "Play a healing frequency", 1, 50),
    ("frequency_explorer", "Frequency Explorer", "Play all nine solfeggio tones", 9, 200),
    ("chakra_aligned", "Chakra Aligned", "Play all seven chakra tones", 7, 200),
    ("nature_listener", "Nature Listener", "Start an ambient soundscape", 1, 50),
    ("soundscape_collector", "Soundscape Collector", "Listen to all five soundscapes", 5, 150),
    ("first_orb", "First Light", "Collect a light in the tunnel", 1, 50),
    ("orb_gatherer", "Light Gatherer", "Collect 50 lights", 50, 200),
    ("combo_five", "Flow State", "Reach a combo of 5", 5, 150),
    ("combo_ten", "Deep Flow", "Reach a combo of 10", 10, 300),
    ("dreamer", "Dreamer", "Record a dream", 1, 50),
    ("dream_weaver", "Dream Weaver", "Record 10 dreams", 10, 200),
    ("manifestor", "Manifestor", "Create a manifestation", 1, 50),
    ("intuitive", "Intuitive", "Record a psychic insight", 1, 50),
    ("caretaker", "Caretaker", "Care for your companion 10 times", 10, 150),
    ("gardener", "Gardener", "Grow the garden to full bloom", 100, 250),
    ("daily_devotion", "Daily Devotion", "Meditate on 7 separate days", 7, 300),
    (ENLIGHTENED_ID, "Enlightened One", "Unlock every other achievement", 19, 1000),
];

pub fn catalog() -> Vec<Achievement> {
    CATALOG
        .iter()
        .map(|(id, name, description, max_progress, xp)| Achievement {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            progress: 0,
            max_progress: *max_progress,
            unlocked: false,
            xp: *xp,
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct Unlock {
    pub id: String,
    pub name: String,
    pub xp: u32,
}

/// The player's achievement list.
///
/// Progress only moves up (saturating at `max_progress`) until an explicit
/// `reset`, and `unlocked` flips exactly when progress reaches the maximum.
/// The capstone tracks how many of the other achievements are unlocked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Achievement>", into = "Vec<Achievement>")]
pub struct AchievementBook {
    achievements: Vec<Achievement>,
}

impl Default for AchievementBook {
    fn default() -> Self {
        Self {
            achievements: catalog(),
        }
    }
}

impl AchievementBook {
    pub fn from_list(achievements: Vec<Achievement>) -> Self {
        let mut book = Self { achievements };
        book.merge_catalog();
        book
    }

    pub fn all(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn get(&self, id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }

    pub fn award(&mut self, id: &str, amount: u32) -> SmallVec<[Unlock; 2]> {
        let target = self.get(id).map(|a| a.progress.saturating_add(amount));
        match target {
            Some(v) => self.raise_to(id, v),
            None => {
                log::warn!("[achievements] unknown id {}", id);
                SmallVec::new()
            }
        }
    }

    /// Raise progress to `value` if that is higher than the current progress.
    /// Used for "reach N" style goals (combo, garden growth).
    pub fn raise_to(&mut self, id: &str, value: u32) -> SmallVec<[Unlock; 2]> {
        let mut unlocks = SmallVec::new();
        if id == ENLIGHTENED_ID {
            // Derived from the others; never set directly.
            return unlocks;
        }
        if let Some(a) = self.achievements.iter_mut().find(|a| a.id == id) {
            if let Some(u) = apply_progress(a, value) {
                unlocks.push(u);
            }
        }
        if !unlocks.is_empty() {
            unlocks.extend(self.sync_capstone());
        }
        unlocks
    }

    pub fn unlocked_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.unlocked).count()
    }

    pub fn total_xp(&self) -> u32 {
        self.achievements
            .iter()
            .filter(|a| a.unlocked)
            .map(|a| a.xp)
            .sum()
    }

    pub fn level(&self) -> u32 {
        1 + self.total_xp() / XP_PER_LEVEL
    }

    pub fn reset(&mut self) {
        self.achievements = catalog();
    }

    fn sync_capstone(&mut self) -> Option<Unlock> {
        let others = self
            .achievements
            .iter()
            .filter(|a| a.id != ENLIGHTENED_ID && a.unlocked)
            .count() as u32;
        let capstone = self
            .achievements
            .iter_mut()
            .find(|a| a.id == ENLIGHTENED_ID)?;
        apply_progress(capstone, others)
    }

    // Stored lists from older builds may lack newer catalog entries.
    fn merge_catalog(&mut self) {
        for entry in catalog() {
            if self.get(&entry.id).is_none() {
                self.achievements.push(entry);
            }
        }
        for a in &mut self.achievements {
            a.progress = a.progress.min(a.max_progress);
            a.unlocked = a.progress >= a.max_progress;
        }
        self.sync_capstone();
    }
}

impl From<Vec<Achievement>> for AchievementBook {
    fn from(list: Vec<Achievement>) -> Self {
        Self::from_list(list)
    }
}

impl From<AchievementBook> for Vec<Achievement> {
    fn from(book: AchievementBook) -> Self {
        book.achievements
    }
}

fn apply_progress(a: &mut Achievement, value: u32) -> Option<Unlock> {
    a.progress = a.progress.max(value.min(a.max_progress));
    if !a.unlocked && a.progress >= a.max_progress {
        a.unlocked = true;
        log::info!("[achievements] unlocked {}", a.id);
        return Some(Unlock {
            id: a.id.clone(),
            name: a.name.clone(),
            xp: a.xp,
        });
    }
    None
}
