// Typed persistence: round-trips, corrupt values, versions and migration.

use stillpoint_core::*;

fn played_stats() -> GameStats {
    let mut stats = GameStats::default();
    stats.record_session(1_700_000_000_000);
    stats.record_tone(528.0);
    stats.record_tone(396.0);
    stats.record_ambience(SoundCategory::Rain);
    for _ in 0..3 {
        stats.record_breath_cycle();
    }
    stats.care(CareAction::Feed, 1_700_000_100_000);
    stats.record_dream();
    stats.total_score = 420;
    stats.best_combo = 6;
    stats.pet.happiness = Meter::new(62.5);
    stats
}

#[test]
fn missing_key_loads_default() {
    let store = MemoryStore::new();
    let stats: GameStats = load(&store);
    assert_eq!(stats, GameStats::default());
}

#[test]
fn game_stats_round_trip() {
    let mut store = MemoryStore::new();
    let stats = played_stats();
    save(&mut store, &stats).unwrap();
    let loaded: GameStats = load(&store);
    assert_eq!(loaded, stats);
}

#[test]
fn journals_and_settings_round_trip() {
    let mut store = MemoryStore::new();
    let mut dreams: Journal<DreamEntry> = Journal::default();
    dreams.add(DreamEntry::new(1, "I was flying over the ocean", DreamMood::Joyful));
    dreams.add(DreamEntry::new(2, "A door in the forest", DreamMood::Mysterious));
    save(&mut store, &dreams).unwrap();

    let settings = MeditationSettings {
        tone_hz: Some(528.0),
        ambience: Some(SoundCategory::Ocean),
        volume: 0.25,
        breath_enabled: false,
        haptics: true,
        ..MeditationSettings::default()
    };
    save(&mut store, &settings).unwrap();

    assert_eq!(load::<Journal<DreamEntry>, _>(&store), dreams);
    assert_eq!(load::<MeditationSettings, _>(&store), settings);
}

#[test]
fn saved_value_is_versioned_envelope() {
    let mut store = MemoryStore::new();
    save(&mut store, &MeditationSettings::default()).unwrap();
    let raw = store.get(SETTINGS_KEY).unwrap();
    let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(v["version"], 1);
    assert_eq!(v["data"]["breathEnabled"], true);
}

fn assert_corrupt_falls_back<T>(key: &str)
where
    T: Persisted + PartialEq + std::fmt::Debug,
{
    for junk in [
        "",
        "{",
        "not json at all",
        "[1,2,3]",
        r#"{"version": 1}"#,
        r#"{"version": "x", "data": {}}"#,
        r#"{"version": 999, "data": {}}"#,
    ] {
        let mut store = MemoryStore::new();
        store.set(key, junk).unwrap();
        let value: T = load(&store);
        assert_eq!(value, T::default(), "key {key} with {junk:?}");
    }
}

#[test]
fn corrupt_values_fall_back_to_defaults() {
    assert_corrupt_falls_back::<GameStats>(STATS_KEY);
    assert_corrupt_falls_back::<Journal<DreamEntry>>(DREAMS_KEY);
    assert_corrupt_falls_back::<Journal<Manifestation>>(MANIFESTATIONS_KEY);
    assert_corrupt_falls_back::<Journal<PsychicInsight>>(INSIGHTS_KEY);
    assert_corrupt_falls_back::<MeditationSettings>(SETTINGS_KEY);
}

#[test]
fn current_version_with_wrong_shape_falls_back() {
    let mut store = MemoryStore::new();
    store
        .set(STATS_KEY, r#"{"version": 2, "data": {"totalScore": "lots"}}"#)
        .unwrap();
    assert_eq!(load::<GameStats, _>(&store), GameStats::default());
}

#[test]
fn v1_bare_achievement_array_is_migrated() {
    let mut book = AchievementBook::default();
    book.award("dreamer", 1);
    book.award("steady_breather", 4);
    let legacy = serde_json::json!({
        "version": 1,
        "data": serde_json::to_value(&book).unwrap(),
    });
    let mut store = MemoryStore::new();
    store.set(STATS_KEY, &legacy.to_string()).unwrap();

    let stats: GameStats = load(&store);
    assert_eq!(stats.achievements, book);
    assert_eq!(stats.total_score, 0);
}

#[test]
fn settings_fill_missing_fields() {
    let mut store = MemoryStore::new();
    store
        .set(SETTINGS_KEY, r#"{"version": 1, "data": {"volume": 0.8}}"#)
        .unwrap();
    let s: MeditationSettings = load(&store);
    assert_eq!(s.volume, 0.8);
    assert!(s.breath_enabled);
    assert_eq!(s.tone_hz, None);
    assert_eq!(
        s.tone_fade_out_sec,
        stillpoint_core::constants::TONE_FADE_OUT_DEFAULT_SEC
    );
}

#[test]
fn clear_removes_the_key() {
    let mut store = MemoryStore::new();
    save(&mut store, &played_stats()).unwrap();
    clear::<GameStats, _>(&mut store);
    assert!(store.get(STATS_KEY).is_none());
}
