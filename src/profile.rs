//! The persisted user profile: onboarding flag, name, settings and stats.
//!
//! Every mutation updates memory first and then writes through to the
//! [`KvStore`]. Write failures are logged and swallowed, so the in-memory
//! profile can run ahead of what is on disk until the next successful write.

use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::progress::{SessionOutcome, StreakChange, UserStats};
use crate::settings::{SettingsPatch, SkillLevel, UserSettings};
use crate::store::{KvStore, StorageKey};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A persisted record and where its current value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Persisted<T> {
    /// `load` has not run yet
    #[default]
    NotYetLoaded,
    /// Nothing usable was stored; running on defaults
    Default(T),
    /// Read from storage, or written by this process
    Loaded(T),
}

impl<T: Copy + Default> Persisted<T> {
    pub fn value(&self) -> T {
        match self {
            Persisted::NotYetLoaded => T::default(),
            Persisted::Default(v) | Persisted::Loaded(v) => *v,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Persisted::Loaded(_))
    }

    pub fn is_first_run(&self) -> bool {
        !self.is_loaded()
    }
}

pub struct Profile {
    store: Box<dyn KvStore>,
    onboarded: bool,
    user_name: String,
    settings: Persisted<UserSettings>,
    stats: Persisted<UserStats>,
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("onboarded", &self.onboarded)
            .field("user_name", &self.user_name)
            .field("settings", &self.settings)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Profile {
    /// Wrap a store without reading it. Call [`Profile::load`] before use.
    pub fn new(store: Box<dyn KvStore>) -> Self {
        Self {
            store,
            onboarded: false,
            user_name: String::new(),
            settings: Persisted::NotYetLoaded,
            stats: Persisted::NotYetLoaded,
        }
    }

    /// Read every record. Missing keys and undecodable JSON both fall back to defaults;
    /// only a failing store is an error.
    pub fn load(&mut self) -> Result<()> {
        self.onboarded = self.store.get(StorageKey::Onboarded)?.is_some();
        self.user_name = self.store.get(StorageKey::UserName)?.unwrap_or_default();
        self.settings = self.read_record::<UserSettings>(StorageKey::Settings)?;
        self.stats = match self.read_record::<UserStats>(StorageKey::Stats)? {
            Persisted::Loaded(stats) => Persisted::Loaded(stats.normalized()),
            other => other,
        };
        debug!("profile loaded: {:?}", self);
        Ok(())
    }

    pub fn open(store: Box<dyn KvStore>) -> Result<Self> {
        let mut profile = Self::new(store);
        profile.load()?;
        Ok(profile)
    }

    fn read_record<T: DeserializeOwned + Default>(&self, key: StorageKey) -> Result<Persisted<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(Persisted::Default(T::default()));
        };
        match serde_json::from_str::<T>(&raw) {
            Ok(value) => Ok(Persisted::Loaded(value)),
            Err(e) => {
                warn!("ignoring malformed {} record: {e}", key.as_str());
                Ok(Persisted::Default(T::default()))
            }
        }
    }

    fn write(&mut self, entries: &[(StorageKey, String)], what: &str) {
        let written = match entries {
            [(key, value)] => self.store.set(*key, value),
            _ => self.store.multi_set(entries),
        };
        if let Err(e) = written {
            warn!("failed to persist {what}: {e}");
        }
    }

    fn encode<T: Serialize>(value: &T) -> String {
        serde_json::to_string(value).unwrap_or_default()
    }

    pub fn is_onboarded(&self) -> bool {
        self.onboarded
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn settings(&self) -> UserSettings {
        self.settings.value()
    }

    pub fn stats(&self) -> UserStats {
        self.stats.value()
    }

    pub fn settings_record(&self) -> Persisted<UserSettings> {
        self.settings
    }

    pub fn stats_record(&self) -> Persisted<UserStats> {
        self.stats
    }

    pub fn last_practice(&self) -> Option<NaiveDate> {
        match self.store.get(StorageKey::LastPractice) {
            Ok(Some(raw)) => NaiveDate::parse_from_str(&raw, DATE_FORMAT).ok(),
            Ok(None) => None,
            Err(e) => {
                warn!("failed to read last practice date: {e}");
                None
            }
        }
    }

    pub fn complete_onboarding(&mut self, name: &str, level: SkillLevel) {
        let settings = UserSettings {
            initial_level: level,
            ..self.settings()
        };
        self.onboarded = true;
        self.user_name = name.trim().to_string();
        self.settings = Persisted::Loaded(settings);
        info!("onboarded {} at {level} level", self.user_name);
        let entries = [
            (StorageKey::Onboarded, "true".to_string()),
            (StorageKey::UserName, self.user_name.clone()),
            (StorageKey::Settings, Self::encode(&settings)),
        ];
        self.write(&entries, "onboarding");
    }

    pub fn update_settings(&mut self, patch: &SettingsPatch) -> UserSettings {
        let updated = self.settings().apply(patch);
        self.settings = Persisted::Loaded(updated);
        self.write(&[(StorageKey::Settings, Self::encode(&updated))], "settings");
        updated
    }

    fn save_stats(&mut self, stats: UserStats, what: &str) {
        self.stats = Persisted::Loaded(stats);
        self.write(&[(StorageKey::Stats, Self::encode(&stats))], what);
    }

    pub fn add_xp(&mut self, amount: u32) -> UserStats {
        let mut stats = self.stats();
        stats.add_xp(amount);
        self.save_stats(stats, "xp");
        stats
    }

    pub fn increment_words_learned(&mut self) -> UserStats {
        let mut stats = self.stats();
        stats.increment_words_learned();
        self.save_stats(stats, "words learned");
        stats
    }

    /// Blend in a session's accuracy, weighted by the current words-learned count
    pub fn update_accuracy(&mut self, session_accuracy: u8, session_word_count: u32) -> UserStats {
        let mut stats = self.stats();
        stats.update_accuracy(session_accuracy, session_word_count);
        self.save_stats(stats, "accuracy");
        stats
    }

    pub fn update_streak(&mut self, today: NaiveDate) -> StreakChange {
        let mut stats = self.stats();
        let change = stats.apply_streak(self.last_practice(), today);
        if change != StreakChange::Unchanged {
            self.stats = Persisted::Loaded(stats);
            let entries = [
                (StorageKey::Stats, Self::encode(&stats)),
                (StorageKey::LastPractice, today.format(DATE_FORMAT).to_string()),
            ];
            self.write(&entries, "streak");
        }
        change
    }

    /// Apply everything a finished drill changes in one write: streak, practice date, accuracy.
    pub fn record_session_outcome(&mut self, outcome: &SessionOutcome, today: NaiveDate) -> StreakChange {
        let mut stats = self.stats();
        let change = stats.apply_streak(self.last_practice(), today);
        stats.record_session_outcome(outcome);
        self.stats = Persisted::Loaded(stats);
        let mut entries = vec![(StorageKey::Stats, Self::encode(&stats))];
        if change != StreakChange::Unchanged {
            entries.push((StorageKey::LastPractice, today.format(DATE_FORMAT).to_string()));
        }
        self.write(&entries, "session outcome");
        info!(
            "session recorded: accuracy {}% over {} words, streak {:?} -> {}",
            outcome.accuracy, outcome.word_count, change, stats.current_streak
        );
        change
    }

    /// Wipe every record and return to first-run defaults
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear()?;
        self.onboarded = false;
        self.user_name.clear();
        self.settings = Persisted::Default(UserSettings::default());
        self.stats = Persisted::Default(UserStats::default());
        Ok(())
    }
}
