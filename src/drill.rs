use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpellError};
use crate::progress::SessionOutcome;
use crate::results;
use crate::scoring::{self, is_match};
use crate::word_bank::Word;

pub const XP_PER_CORRECT: u32 = 10;

const STARTING_MASTERY: u8 = 7;
const MAX_MASTERY: u8 = 10;

/// Shown after a miss. Stand-in for generated feedback.
pub const TIPS: [&str; 6] = [
    "Remember: I before E except after C",
    "Double letters are common in English",
    "Break the word into syllables",
    "Look for common prefixes and suffixes",
    "Sound it out slowly",
    "Think about word patterns you know",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub word: Word,
    pub correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Presenting { index: usize },
    Feedback { index: usize, correct: bool },
    Complete,
}

/// What a submit produced; the caller applies the rewards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub correct: bool,
    pub xp_awarded: u32,
    pub tip: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Next { index: usize },
    /// Last word done; carries the serialized results for the results view
    Complete { payload: String },
}

/// One practice round over a fixed word list
#[derive(Debug, Clone)]
pub struct DrillSession {
    words: Vec<Word>,
    phase: Phase,
    input: String,
    results: Vec<SessionResult>,
    tip: Option<&'static str>,
    mastery: u8,
    xp_per_correct: u32,
    words_learned_at_start: u32,
}

impl DrillSession {
    pub fn new(words: Vec<Word>) -> Result<Self> {
        if words.is_empty() {
            return Err(SpellError::EmptySession);
        }
        Ok(Self {
            words,
            phase: Phase::Presenting { index: 0 },
            input: String::new(),
            results: Vec::new(),
            tip: None,
            mastery: STARTING_MASTERY,
            xp_per_correct: XP_PER_CORRECT,
            words_learned_at_start: 0,
        })
    }

    pub fn with_xp_reward(mut self, xp_per_correct: u32) -> Self {
        self.xp_per_correct = xp_per_correct;
        self
    }

    /// Words-learned count before this session, used to weight the accuracy blend
    pub fn with_baseline(mut self, words_learned: u32) -> Self {
        self.words_learned_at_start = words_learned;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn index(&self) -> usize {
        match self.phase {
            Phase::Presenting { index } | Phase::Feedback { index, .. } => index,
            Phase::Complete => self.words.len(),
        }
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn current_word(&self) -> Option<&Word> {
        match self.phase {
            Phase::Presenting { index } | Phase::Feedback { index, .. } => self.words.get(index),
            Phase::Complete => None,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn results(&self) -> &[SessionResult] {
        &self.results
    }

    pub fn tip(&self) -> Option<&'static str> {
        self.tip
    }

    pub fn mastery(&self) -> u8 {
        self.mastery
    }

    pub fn feedback_visible(&self) -> bool {
        matches!(self.phase, Phase::Feedback { .. })
    }

    pub fn is_correct(&self) -> bool {
        matches!(self.phase, Phase::Feedback { correct: true, .. })
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// Letters may be typed only while a word is presented and not yet full length
    pub fn can_type(&self) -> bool {
        match (self.phase, self.current_word()) {
            (Phase::Presenting { .. }, Some(word)) => self.input.chars().count() < word.len(),
            _ => false,
        }
    }

    pub fn can_submit(&self) -> bool {
        matches!(self.phase, Phase::Presenting { .. }) && !self.input.is_empty()
    }

    pub fn letter_marks(&self) -> Vec<scoring::Outcome> {
        self.current_word()
            .map(|w| scoring::letter_marks(&self.input, &w.text))
            .unwrap_or_default()
    }

    /// Returns false when the keystroke was ignored
    pub fn append_letter(&mut self, ch: char) -> bool {
        if !ch.is_alphabetic() || !self.can_type() {
            return false;
        }
        // one key, one letter
        let mut lower = ch.to_lowercase();
        let (Some(letter), None) = (lower.next(), lower.next()) else {
            return false;
        };
        self.input.push(letter);
        true
    }

    pub fn backspace(&mut self) -> bool {
        if !matches!(self.phase, Phase::Presenting { .. }) {
            return false;
        }
        self.input.pop().is_some()
    }

    pub fn submit<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Submission> {
        let Phase::Presenting { index } = self.phase else {
            return None;
        };
        if self.input.is_empty() {
            return None;
        }
        let word = self.words.get(index)?.clone();
        let correct = is_match(&self.input, &word.text);
        debug!("submitted {:?} for {:?}: correct={correct}", self.input, word.text);

        self.results.push(SessionResult { word, correct });
        self.phase = Phase::Feedback { index, correct };

        let submission = if correct {
            self.tip = None;
            self.mastery = (self.mastery + 1).min(MAX_MASTERY);
            Submission {
                correct,
                xp_awarded: self.xp_per_correct,
                tip: None,
            }
        } else {
            self.tip = TIPS.choose(rng).copied();
            Submission {
                correct,
                xp_awarded: 0,
                tip: self.tip,
            }
        };
        Some(submission)
    }

    pub fn advance(&mut self) -> Option<Advance> {
        let Phase::Feedback { index, .. } = self.phase else {
            return None;
        };
        if index + 1 < self.words.len() {
            self.input.clear();
            self.tip = None;
            self.phase = Phase::Presenting { index: index + 1 };
            Some(Advance::Next { index: index + 1 })
        } else {
            self.phase = Phase::Complete;
            Some(Advance::Complete {
                payload: results::encode_payload(&self.results),
            })
        }
    }

    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|r| r.correct).count()
    }

    pub fn outcome(&self) -> SessionOutcome {
        SessionOutcome {
            words_learned_before: self.words_learned_at_start,
            accuracy: scoring::percentage(self.correct_count(), self.results.len()).unwrap_or(0),
            word_count: self.results.len() as u32,
        }
    }

    /// `results.len() == index + (feedback visible ? 1 : 0)` while active
    pub fn invariant_holds(&self) -> bool {
        match self.phase {
            Phase::Presenting { index } => self.results.len() == index,
            Phase::Feedback { index, .. } => self.results.len() == index + 1,
            Phase::Complete => self.results.len() == self.words.len(),
        }
    }
}
