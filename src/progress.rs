use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const XP_PER_LEVEL: u32 = 100;

/// Aggregate practice statistics, persisted as one JSON record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStats {
    #[serde(rename = "totalXP")]
    pub total_xp: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub words_learned: u32,
    /// Running accuracy percentage, 0..=100
    pub accuracy: u8,
    pub level: u32,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            total_xp: 0,
            current_streak: 0,
            longest_streak: 0,
            words_learned: 0,
            accuracy: 0,
            level: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    /// Already practiced today
    Unchanged,
    /// Practiced yesterday; streak grew by one
    Extended,
    /// First practice ever, or a gap of two days or more
    Restarted,
}

/// What a finished drill contributes to the running accuracy.
/// `words_learned_before` is captured when the drill starts, before any
/// words-learned increments from that drill land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    pub words_learned_before: u32,
    pub accuracy: u8,
    pub word_count: u32,
}

pub fn level_for(total_xp: u32) -> u32 {
    total_xp / XP_PER_LEVEL + 1
}

/// Weighted running average of accuracy, rounded to the nearest percent
pub fn blend_accuracy(
    prior_accuracy: u8,
    prior_words: u32,
    session_accuracy: u8,
    session_words: u32,
) -> u8 {
    let total = prior_words as u64 + session_words as u64;
    if total == 0 {
        return prior_accuracy;
    }
    let weighted =
        prior_accuracy as u64 * prior_words as u64 + session_accuracy as u64 * session_words as u64;
    let blended = (weighted as f64 / total as f64).round();
    blended.clamp(0.0, 100.0) as u8
}

impl UserStats {
    /// Restore the derived `level` after loading a record written elsewhere
    pub fn normalized(mut self) -> Self {
        self.level = level_for(self.total_xp);
        self.accuracy = self.accuracy.min(100);
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self
    }

    pub fn add_xp(&mut self, amount: u32) {
        self.total_xp = self.total_xp.saturating_add(amount);
        self.level = level_for(self.total_xp);
    }

    pub fn increment_words_learned(&mut self) {
        self.words_learned = self.words_learned.saturating_add(1);
    }

    pub fn apply_streak(&mut self, last_practice: Option<NaiveDate>, today: NaiveDate) -> StreakChange {
        let change = match last_practice {
            Some(last) if last == today => return StreakChange::Unchanged,
            Some(last) if today.pred_opt() == Some(last) => {
                self.current_streak = self.current_streak.saturating_add(1);
                StreakChange::Extended
            }
            _ => {
                self.current_streak = 1;
                StreakChange::Restarted
            }
        };
        self.longest_streak = self.longest_streak.max(self.current_streak);
        change
    }

    /// Blend a session's accuracy in, weighting by the current `words_learned`.
    /// Call before the session's words-learned increments are applied.
    pub fn update_accuracy(&mut self, session_accuracy: u8, session_word_count: u32) {
        self.accuracy = blend_accuracy(
            self.accuracy,
            self.words_learned,
            session_accuracy,
            session_word_count,
        );
    }

    /// Blend against the snapshot taken at session start, regardless of
    /// increments made while the session ran.
    pub fn record_session_outcome(&mut self, outcome: &SessionOutcome) {
        if outcome.word_count == 0 {
            return;
        }
        self.accuracy = blend_accuracy(
            self.accuracy,
            outcome.words_learned_before,
            outcome.accuracy,
            outcome.word_count,
        );
    }

    pub fn xp_into_level(&self) -> u32 {
        self.total_xp % XP_PER_LEVEL
    }

    pub fn xp_for_next_level(&self) -> u32 {
        self.level * XP_PER_LEVEL
    }

    pub fn daily_goal_progress(&self, daily_goal: u32) -> u32 {
        if daily_goal == 0 {
            return 0;
        }
        self.total_xp % daily_goal
    }
}
