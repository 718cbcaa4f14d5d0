// Achievement progress, unlocking and the enlightened capstone.

use stillpoint_core::*;

#[test]
fn catalog_has_twenty_locked_entries() {
    let book = AchievementBook::default();
    assert_eq!(book.all().len(), 20);
    assert!(book.all().iter().all(|a| !a.unlocked && a.progress == 0));
    assert_eq!(book.get(ENLIGHTENED_ID).map(|a| a.max_progress), Some(19));
    assert_eq!(book.level(), 1);
}

#[test]
fn progress_is_monotonic_and_unlocks_at_max() {
    let mut book = AchievementBook::default();
    let mut prev = 0;
    for i in 0..12 {
        let unlocks = book.award("steady_breather", 1);
        let a = book.get("steady_breather").unwrap();
        assert!(a.progress >= prev);
        prev = a.progress;
        assert_eq!(a.unlocked, a.progress >= a.max_progress);
        if i == 9 {
            assert_eq!(unlocks.len(), 1);
            assert_eq!(unlocks[0].id, "steady_breather");
        } else {
            assert!(unlocks.is_empty(), "unexpected unlock at step {i}");
        }
    }
    assert_eq!(book.get("steady_breather").unwrap().progress, 10);
}

#[test]
fn raise_to_never_lowers_progress() {
    let mut book = AchievementBook::default();
    book.raise_to("combo_ten", 7);
    book.raise_to("combo_ten", 3);
    assert_eq!(book.get("combo_ten").unwrap().progress, 7);
    assert!(!book.get("combo_ten").unwrap().unlocked);
}

#[test]
fn capstone_cannot_be_awarded_directly() {
    let mut book = AchievementBook::default();
    assert!(book.award(ENLIGHTENED_ID, 100).is_empty());
    assert_eq!(book.get(ENLIGHTENED_ID).unwrap().progress, 0);
}

#[test]
fn capstone_unlocks_after_all_others() {
    let mut book = AchievementBook::default();
    let ids: Vec<(String, u32)> = book
        .all()
        .iter()
        .filter(|a| a.id != ENLIGHTENED_ID)
        .map(|a| (a.id.clone(), a.max_progress))
        .collect();
    let mut last = Vec::new();
    for (n, (id, max)) in ids.iter().enumerate() {
        last = book.raise_to(id, *max).to_vec();
        let cap = book.get(ENLIGHTENED_ID).unwrap();
        assert_eq!(cap.progress as usize, n + 1);
    }
    assert_eq!(last.len(), 2);
    assert_eq!(last[1].id, ENLIGHTENED_ID);
    assert_eq!(book.unlocked_count(), 20);
    assert!(book.level() > 1);
}

#[test]
fn unknown_ids_are_ignored() {
    let mut book = AchievementBook::default();
    assert!(book.award("no_such_thing", 5).is_empty());
    assert_eq!(book, AchievementBook::default());
}

#[test]
fn reset_restores_catalog() {
    let mut book = AchievementBook::default();
    book.award("dreamer", 1);
    assert_eq!(book.unlocked_count(), 1);
    book.reset();
    assert_eq!(book, AchievementBook::default());
}
