use chrono::NaiveDate;
use tempfile::tempdir;

use spellright::{
    profile::Profile,
    progress::{SessionOutcome, StreakChange},
    settings::{SettingsPatch, SkillLevel, ThemeKind},
    store::{KvStore, SqliteStore, StorageKey},
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn profile_survives_reopen() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("nested").join("spellright.db");

    {
        let mut profile = Profile::open(Box::new(SqliteStore::open(&db).unwrap())).unwrap();
        assert!(profile.settings_record().is_first_run());
        profile.complete_onboarding("  Grace  ", SkillLevel::Advanced);
        profile.update_settings(&SettingsPatch {
            theme: Some(ThemeKind::Midnight),
            daily_goal: Some(100),
            ..Default::default()
        });
        profile.add_xp(230);
        profile.increment_words_learned();
        profile.increment_words_learned();
        let change = profile.record_session_outcome(
            &SessionOutcome {
                words_learned_before: 0,
                accuracy: 80,
                word_count: 5,
            },
            date(2025, 10, 12),
        );
        assert_eq!(change, StreakChange::Restarted);
    }

    let profile = Profile::open(Box::new(SqliteStore::open(&db).unwrap())).unwrap();
    assert!(profile.is_onboarded());
    assert_eq!(profile.user_name(), "Grace");
    assert!(profile.settings_record().is_loaded());

    let settings = profile.settings();
    assert_eq!(settings.initial_level, SkillLevel::Advanced);
    assert_eq!(settings.theme, ThemeKind::Midnight);
    assert_eq!(settings.daily_goal, 100);

    let stats = profile.stats();
    assert_eq!(stats.total_xp, 230);
    assert_eq!(stats.level, 3);
    assert_eq!(stats.words_learned, 2);
    assert_eq!(stats.accuracy, 80);
    assert_eq!(stats.current_streak, 1);
    assert_eq!(profile.last_practice(), Some(date(2025, 10, 12)));
}

#[test]
fn streak_extends_across_reopen_on_next_day() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("spellright.db");

    {
        let mut profile = Profile::open(Box::new(SqliteStore::open(&db).unwrap())).unwrap();
        assert_eq!(profile.update_streak(date(2025, 10, 12)), StreakChange::Restarted);
        assert_eq!(profile.update_streak(date(2025, 10, 12)), StreakChange::Unchanged);
    }

    let mut profile = Profile::open(Box::new(SqliteStore::open(&db).unwrap())).unwrap();
    assert_eq!(profile.update_streak(date(2025, 10, 13)), StreakChange::Extended);
    assert_eq!(profile.stats().current_streak, 2);
    assert_eq!(profile.stats().longest_streak, 2);
}

#[test]
fn corrupt_stats_fall_back_to_defaults() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("spellright.db");

    {
        let mut store = SqliteStore::open(&db).unwrap();
        store.set(StorageKey::Stats, "{ not json").unwrap();
        store.set(StorageKey::Onboarded, "true").unwrap();
    }

    let profile = Profile::open(Box::new(SqliteStore::open(&db).unwrap())).unwrap();
    assert!(profile.is_onboarded());
    assert!(!profile.stats_record().is_loaded());
    assert_eq!(profile.stats().total_xp, 0);
    assert_eq!(profile.stats().level, 1);
}

#[test]
fn reset_wipes_everything_on_disk() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("spellright.db");

    {
        let mut profile = Profile::open(Box::new(SqliteStore::open(&db).unwrap())).unwrap();
        profile.complete_onboarding("Ada", SkillLevel::Beginner);
        profile.add_xp(40);
        profile.reset().unwrap();
        assert!(!profile.is_onboarded());
    }

    let profile = Profile::open(Box::new(SqliteStore::open(&db).unwrap())).unwrap();
    assert!(!profile.is_onboarded());
    assert_eq!(profile.user_name(), "");
    assert_eq!(profile.stats().total_xp, 0);
}
