use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpellError};

static WORDS_DIR: Dir = include_dir!("src/words");

pub const DEFAULT_BANK: &str = "english";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Difficulty preference from settings; `Mixed` draws from the whole bank
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DifficultyFilter {
    Easy,
    Medium,
    Hard,
    #[default]
    Mixed,
}

impl DifficultyFilter {
    pub const ALL: [DifficultyFilter; 4] = [
        DifficultyFilter::Easy,
        DifficultyFilter::Medium,
        DifficultyFilter::Hard,
        DifficultyFilter::Mixed,
    ];

    pub fn admits(&self, difficulty: Difficulty) -> bool {
        match self {
            DifficultyFilter::Mixed => true,
            DifficultyFilter::Easy => difficulty == Difficulty::Easy,
            DifficultyFilter::Medium => difficulty == Difficulty::Medium,
            DifficultyFilter::Hard => difficulty == Difficulty::Hard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: String,
    #[serde(rename = "word")]
    pub text: String,
    pub difficulty: Difficulty,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetics: Option<String>,
}

impl Word {
    pub fn new(id: &str, text: &str, difficulty: Difficulty, category: &str) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            difficulty,
            category: category.to_string(),
            hint: None,
            phonetics: None,
        }
    }

    pub fn with_hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// One day of the bundled weekly progress chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressPoint {
    pub date: String,
    pub xp: u32,
    pub accuracy: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WordBank {
    pub name: String,
    words: Vec<Word>,
    #[serde(default)]
    progress: Vec<ProgressPoint>,
}

impl WordBank {
    pub fn load(name: &str) -> Result<Self> {
        let file_name = format!("{name}.json");
        let file = WORDS_DIR
            .get_file(&file_name)
            .ok_or_else(|| SpellError::WordBankMissing(file_name.clone()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| SpellError::WordBankMissing(file_name.clone()))?;
        Ok(serde_json::from_str(contents)?)
    }

    pub fn english() -> Result<Self> {
        Self::load(DEFAULT_BANK)
    }

    pub fn from_words(name: &str, words: Vec<Word>) -> Self {
        Self {
            name: name.to_string(),
            words,
            progress: Vec::new(),
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Words for one drill: the first `count` words admitted by `filter`, in bank order.
    /// A filter with no matching words yields an empty list.
    pub fn select(&self, filter: DifficultyFilter, count: usize) -> Vec<Word> {
        self.words
            .iter()
            .filter(|w| filter.admits(w.difficulty))
            .take(count)
            .cloned()
            .collect()
    }

    pub fn weekly_progress(&self) -> &[ProgressPoint] {
        &self.progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_bank_loads() {
        let bank = WordBank::english().unwrap();
        assert_eq!(bank.name, "english");
        assert_eq!(bank.words().len(), 12);
        assert_eq!(bank.words()[0].text, "apple");
        assert_eq!(bank.words()[0].hint.as_deref(), Some("A red or green fruit"));
        assert_eq!(bank.weekly_progress().len(), 7);
    }

    #[test]
    fn test_missing_bank() {
        let err = WordBank::load("klingon").unwrap_err();
        assert!(matches!(err, SpellError::WordBankMissing(_)));
    }

    #[test]
    fn test_mixed_takes_bank_order() {
        let bank = WordBank::english().unwrap();
        let words = bank.select(DifficultyFilter::Mixed, 5);
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["apple", "banana", "elephant", "beautiful", "necessary"]
        );
    }

    #[test]
    fn test_filter_by_difficulty() {
        let bank = WordBank::english().unwrap();
        let hard = bank.select(DifficultyFilter::Hard, 5);
        assert_eq!(hard.len(), 4);
        assert!(hard.iter().all(|w| w.difficulty == Difficulty::Hard));

        let easy = bank.select(DifficultyFilter::Easy, 2);
        assert_eq!(easy.len(), 2);
    }

    #[test]
    fn test_filter_with_no_matches_is_empty() {
        let bank = WordBank::from_words(
            "tiny",
            vec![Word::new("1", "cat", Difficulty::Easy, "Animals")],
        );
        assert!(bank.select(DifficultyFilter::Hard, 5).is_empty());
    }

    #[test]
    fn test_word_json_uses_word_key() {
        let word = Word::new("1", "apple", Difficulty::Easy, "Food").with_hint("fruit");
        let json = serde_json::to_string(&word).unwrap();
        assert!(json.contains("\"word\":\"apple\""));
        assert!(json.contains("\"difficulty\":\"easy\""));
        assert!(!json.contains("phonetics"));
    }
}
