//! Capped, newest-first record lists: dream journal, manifestation board and
//! psychic insights.
//!
//! Lookups are linear scans; lists never exceed `JOURNAL_CAP` entries, so an
//! index would buy nothing.

use crate::constants::JOURNAL_CAP;
use serde::{Deserialize, Serialize};

pub trait Record {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Journal<T> {
    entries: Vec<T>,
}

impl<T> Default for Journal<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Record> Journal<T> {
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prepend, dropping the oldest entries beyond the cap. Ids are
    /// timestamps, so a clash within the same millisecond gets a `-N` suffix.
    pub fn add(&mut self, mut entry: T) {
        if self.get(entry.id()).is_some() {
            let base = entry.id().to_string();
            let mut n = 1;
            while self.get(&format!("{base}-{n}")).is_some() {
                n += 1;
            }
            entry.set_id(format!("{base}-{n}"));
        }
        self.entries.insert(0, entry);
        self.entries.truncate(JOURNAL_CAP);
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.entries.iter_mut().find(|e| e.id() == id)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id() != id);
        self.entries.len() != before
    }
}

// ---------------- Dreams ----------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DreamMood {
    Peaceful,
    Joyful,
    Anxious,
    Mysterious,
    Dark,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DreamAnalysis {
    pub symbols: Vec<String>,
    pub themes: Vec<String>,
    pub lucid: bool,
    pub summary: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DreamEntry {
    pub id: String,
    pub timestamp: u64,
    pub content: String,
    pub mood: DreamMood,
    pub analysis: DreamAnalysis,
}

impl Record for DreamEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

// (keyword, symbol meaning)
const DREAM_SYMBOLS: &[(&str, &str)] = &[
    ("water", "emotions and the unconscious"),
    ("ocean", "emotions and the unconscious"),
    ("fly", "freedom and transcendence"),
    ("flying", "freedom and transcendence"),
    ("fall", "loss of control"),
    ("falling", "loss of control"),
    ("house", "the self and its rooms"),
    ("door", "new opportunities"),
    ("snake", "transformation"),
    ("teeth", "anxiety about appearance"),
    ("chase", "avoidance"),
    ("chased", "avoidance"),
    ("light", "awareness and guidance"),
    ("forest", "the unknown within"),
    ("mountain", "ambition and obstacles"),
    ("death", "endings and renewal"),
    ("baby", "new beginnings"),
];

const LUCID_MARKERS: &[&str] = &["lucid", "realized i was dreaming", "knew i was dreaming", "control the dream"];

pub fn analyze_dream(content: &str, mood: DreamMood) -> DreamAnalysis {
    let lower = content.to_lowercase();
    let mut symbols: Vec<String> = Vec::new();
    let mut themes: Vec<String> = Vec::new();
    for (keyword, meaning) in DREAM_SYMBOLS {
        if lower.contains(keyword) {
            if !symbols.iter().any(|s| s == keyword) {
                symbols.push(keyword.to_string());
            }
            if !themes.iter().any(|t| t == meaning) {
                themes.push(meaning.to_string());
            }
        }
    }
    let lucid = LUCID_MARKERS.iter().any(|m| lower.contains(m));
    let tone = match mood {
        DreamMood::Peaceful => "a calm inner landscape",
        DreamMood::Joyful => "an open, expansive heart",
        DreamMood::Anxious => "unresolved tension seeking attention",
        DreamMood::Mysterious => "your intuition reaching for the surface",
        DreamMood::Dark => "shadow material ready to be integrated",
    };
    let summary = if themes.is_empty() {
        format!("This dream reflects {tone}.")
    } else {
        format!("This dream speaks of {} and reflects {tone}.", themes.join(", "))
    };
    DreamAnalysis {
        symbols,
        themes,
        lucid,
        summary,
    }
}

impl DreamEntry {
    pub fn new(timestamp: u64, content: impl Into<String>, mood: DreamMood) -> Self {
        let content = content.into();
        let analysis = analyze_dream(&content, mood);
        Self {
            id: timestamp.to_string(),
            timestamp,
            content,
            mood,
            analysis,
        }
    }
}

// ---------------- Manifestations ----------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestCategory {
    Abundance,
    Love,
    Health,
    Career,
    Spiritual,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifestation {
    pub id: String,
    pub timestamp: u64,
    pub intention: String,
    pub category: ManifestCategory,
    pub manifested: bool,
    pub affirmation: String,
}

impl Record for Manifestation {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Manifestation {
    pub fn new(timestamp: u64, intention: impl Into<String>, category: ManifestCategory) -> Self {
        let intention = intention.into();
        let affirmation = affirmation_for(&intention, category);
        Self {
            id: timestamp.to_string(),
            timestamp,
            intention,
            category,
            manifested: false,
            affirmation,
        }
    }
}

fn affirmation_for(intention: &str, category: ManifestCategory) -> String {
    let opener = match category {
        ManifestCategory::Abundance => "Abundance flows to me freely",
        ManifestCategory::Love => "I am worthy of deep love",
        ManifestCategory::Health => "My body is vibrant and whole",
        ManifestCategory::Career => "My work expresses my gifts",
        ManifestCategory::Spiritual => "I am connected to all that is",
    };
    format!("{opener}. {}", intention.trim())
}

// ---------------- Psychic insights ----------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Vision,
    Feeling,
    Message,
    Synchronicity,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PsychicInsight {
    pub id: String,
    pub timestamp: u64,
    pub kind: InsightKind,
    pub content: String,
    pub intensity: u8,
    pub reflection: String,
}

impl Record for PsychicInsight {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

const REFLECTIONS: &[&str] = &[
    "Sit with this for a moment before acting on it.",
    "Notice where this appears again over the next few days.",
    "Write down what your body felt when this arrived.",
    "Ask what this is inviting you to release.",
];

impl PsychicInsight {
    /// `intensity` is clamped to 1..=10. The reflection is picked from a
    /// fixed set by content, so the same text always gets the same prompt.
    pub fn new(timestamp: u64, kind: InsightKind, content: impl Into<String>, intensity: u8) -> Self {
        let content = content.into();
        let pick = content.bytes().fold(0usize, |h, b| h.wrapping_mul(31).wrapping_add(b as usize));
        Self {
            id: timestamp.to_string(),
            timestamp,
            kind,
            intensity: intensity.clamp(1, 10),
            reflection: REFLECTIONS[pick % REFLECTIONS.len()].to_string(),
            content,
        }
    }
}
