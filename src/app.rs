use crate::audio::AudioRig;
use crate::cadence::Pending;
use crate::input::{KeySet, PointerState};
use crate::overlay;
use crate::storage::LocalStore;
use stillpoint_core::constants::{TONE_FADE_OUT_MAX_SEC, TONE_FADE_OUT_MIN_SEC};
use stillpoint_core::{
    load, save, BreathPattern, BreathTimer, CareAction, DreamEntry, DreamMood, GameStats,
    InsightKind, Journal, Manifestation, ManifestCategory, MeditationSettings,
    Persisted, PsychicInsight, SoundCategory, TunnelParams, TunnelSim, Unlock, SOLFEGGIO,
};

/// Everything one page session owns, shared as `Rc<RefCell<App>>`.
pub struct App {
    pub audio: Option<AudioRig>,
    audio_refused: bool,
    store: Option<LocalStore>,
    pub stats: GameStats,
    pub settings: MeditationSettings,
    pub dreams: Journal<DreamEntry>,
    pub manifestations: Journal<Manifestation>,
    pub insights: Journal<PsychicInsight>,
    pub breath: BreathTimer,
    pub tunnel: TunnelSim,
    pub keys: KeySet,
    pub pointer: PointerState,
    pub paused: bool,
    stats_pending: Pending,
}

impl App {
    pub fn load(seed: u64) -> Self {
        let store = LocalStore::open();
        #[allow(clippy::type_complexity)]
        let (stats, settings, dreams, manifestations, insights): (
            GameStats,
            MeditationSettings,
            Journal<DreamEntry>,
            Journal<Manifestation>,
            Journal<PsychicInsight>,
        ) = match &store {
            Some(s) => (load(s), load(s), load(s), load(s), load(s)),
            None => Default::default(),
        };
        let mut app = Self {
            audio: None,
            audio_refused: false,
            store,
            stats,
            settings,
            dreams,
            manifestations,
            insights,
            breath: BreathTimer::new(BreathPattern::default()),
            tunnel: TunnelSim::new(TunnelParams::default(), seed),
            keys: KeySet::default(),
            pointer: PointerState::default(),
            paused: true,
            stats_pending: Pending::default(),
        };
        let unlocks = app.stats.record_session(now_ms());
        app.announce(&unlocks);
        app.stats_pending.mark();
        log::info!(
            "[store] loaded: level {} ({} xp), {} dreams",
            app.stats.achievements.level(),
            app.stats.achievements.total_xp(),
            app.dreams.len()
        );
        app
    }

    /// Build audio on first use. A refused context is not retried.
    pub fn ensure_audio(&mut self) -> Option<&mut AudioRig> {
        if self.audio.is_none() && !self.audio_refused {
            self.audio = AudioRig::build(&self.settings);
            self.audio_refused = self.audio.is_none();
            if let Some(rig) = &mut self.audio {
                if let Some(cat) = self.settings.ambience {
                    if let Err(e) = rig.ambience.play(cat) {
                        log::warn!("{e:#}");
                    }
                }
            }
        }
        self.audio.as_mut()
    }

    pub fn play_tone(&mut self, hz: f32) {
        let Some(rig) = self.ensure_audio() else {
            return;
        };
        if let Err(e) = rig.tone.play(hz, None) {
            log::warn!("[audio] {e:#}");
            return;
        }
        self.settings.tone_hz = Some(hz);
        let unlocks = self.stats.record_tone(hz);
        self.announce(&unlocks);
        self.save_settings();
        self.save_stats();
    }

    pub fn play_tone_index(&mut self, i: usize) {
        if let Some(d) = SOLFEGGIO.get(i) {
            overlay::show_tone(d);
            self.play_tone(d.hz);
        }
    }

    pub fn stop_tone(&mut self) {
        if let Some(rig) = self.audio.as_mut() {
            rig.tone.stop();
        }
        self.settings.tone_hz = None;
        self.save_settings();
    }

    pub fn play_ambience(&mut self, category: SoundCategory) {
        let Some(rig) = self.ensure_audio() else {
            return;
        };
        if let Err(e) = rig.ambience.play(category) {
            log::warn!("{e:#}");
            return;
        }
        self.settings.ambience = Some(category);
        let unlocks = self.stats.record_ambience(category);
        self.announce(&unlocks);
        self.save_settings();
        self.save_stats();
    }

    pub fn next_ambience(&mut self) {
        let next = match self.settings.ambience {
            Some(c) => c.next(),
            None => SoundCategory::Rain,
        };
        self.play_ambience(next);
    }

    pub fn stop_ambience(&mut self) {
        if let Some(rig) = self.audio.as_mut() {
            rig.ambience.stop();
        }
        self.settings.ambience = None;
        self.save_settings();
    }

    pub fn nudge_volume(&mut self, delta: f32) {
        self.settings.volume = (self.settings.volume + delta).clamp(0.0, 1.0);
        if let Some(rig) = &self.audio {
            rig.ambience.set_volume(self.settings.volume);
        }
        self.save_settings();
    }

    pub fn set_fade_out(&mut self, sec: f64) {
        self.settings.tone_fade_out_sec = sec.clamp(TONE_FADE_OUT_MIN_SEC, TONE_FADE_OUT_MAX_SEC);
        if let Some(rig) = self.audio.as_mut() {
            rig.tone.set_fade_out(self.settings.tone_fade_out_sec);
        }
        self.save_settings();
    }

    /// Disabling discards progress; enabling starts again at inhale.
    pub fn toggle_breath(&mut self) {
        self.settings.breath_enabled = !self.settings.breath_enabled;
        self.breath.reset();
        log::info!("[breath] enabled={}", self.settings.breath_enabled);
        self.save_settings();
    }

    pub fn record_breath_cycle(&mut self) {
        let unlocks = self.stats.record_breath_cycle();
        self.announce(&unlocks);
        self.stats_pending.mark();
    }

    pub fn care(&mut self, action: CareAction) {
        let unlocks = self.stats.care(action, now_ms());
        self.announce(&unlocks);
        self.save_stats();
    }

    pub fn decay_companions(&mut self) {
        self.stats.decay_companions(now_ms());
        self.stats_pending.mark();
    }

    pub fn water_garden(&mut self) {
        self.stats.water_garden(now_ms());
        self.save_stats();
    }

    pub fn add_dream(&mut self, content: &str, mood: DreamMood) -> Option<&DreamEntry> {
        if content.trim().is_empty() {
            return None;
        }
        self.dreams.add(DreamEntry::new(now_ms(), content.trim(), mood));
        let unlocks = self.stats.record_dream();
        self.announce(&unlocks);
        persist(&mut self.store, &self.dreams);
        self.save_stats();
        self.dreams.entries().first()
    }

    pub fn add_manifestation(&mut self, intention: &str, category: ManifestCategory) {
        if intention.trim().is_empty() {
            return;
        }
        self.manifestations
            .add(Manifestation::new(now_ms(), intention, category));
        let unlocks = self.stats.record_manifestation();
        self.announce(&unlocks);
        persist(&mut self.store, &self.manifestations);
        self.save_stats();
    }

    pub fn mark_manifested(&mut self, id: &str) {
        if let Some(m) = self.manifestations.get_mut(id) {
            m.manifested = true;
            persist(&mut self.store, &self.manifestations);
        }
    }

    pub fn add_insight(&mut self, kind: InsightKind, content: &str, intensity: u8) {
        if content.trim().is_empty() {
            return;
        }
        self.insights
            .add(PsychicInsight::new(now_ms(), kind, content.trim(), intensity));
        let unlocks = self.stats.record_insight();
        self.announce(&unlocks);
        persist(&mut self.store, &self.insights);
        self.save_stats();
    }

    pub fn delete_record(&mut self, id: &str) {
        if self.dreams.remove(id) {
            persist(&mut self.store, &self.dreams);
        } else if self.manifestations.remove(id) {
            persist(&mut self.store, &self.manifestations);
        } else if self.insights.remove(id) {
            persist(&mut self.store, &self.insights);
        }
    }

    pub fn mark_stats_dirty(&mut self) {
        self.stats_pending.mark();
    }

    pub fn flush_stats(&mut self) {
        if self.stats_pending.take() {
            persist(&mut self.store, &self.stats);
        }
    }

    fn save_stats(&mut self) {
        self.stats_pending.mark();
        self.flush_stats();
    }

    fn save_settings(&mut self) {
        persist(&mut self.store, &self.settings);
    }

    pub fn announce(&self, unlocks: &[Unlock]) {
        for u in unlocks {
            overlay::toast(&format!("Achievement unlocked: {} (+{} xp)", u.name, u.xp));
        }
    }
}

fn persist<T: Persisted>(store: &mut Option<LocalStore>, value: &T) {
    let Some(store) = store.as_mut() else {
        return;
    };
    if let Err(e) = save(store, value) {
        log::warn!("[store] {}", e);
    }
}

#[inline]
pub fn now_ms() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}
