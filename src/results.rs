use log::warn;

use crate::drill::SessionResult;
use crate::scoring::percentage;

pub fn encode_payload(results: &[SessionResult]) -> String {
    serde_json::to_string(results).unwrap_or_else(|_| "[]".to_string())
}

/// Missing or undecodable payloads read as an empty result list
pub fn decode_payload(payload: Option<&str>) -> Vec<SessionResult> {
    let Some(raw) = payload else {
        return Vec::new();
    };
    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!("discarding unreadable results payload: {e}");
        Vec::new()
    })
}

/// Everything the results view shows for a finished drill
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsSummary {
    pub results: Vec<SessionResult>,
    pub correct_count: usize,
    /// `None` for an empty drill
    pub accuracy: Option<u8>,
}

impl ResultsSummary {
    pub fn new(results: Vec<SessionResult>) -> Self {
        let correct_count = results.iter().filter(|r| r.correct).count();
        let accuracy = percentage(correct_count, results.len());
        Self {
            results,
            correct_count,
            accuracy,
        }
    }

    pub fn from_payload(payload: Option<&str>) -> Self {
        Self::new(decode_payload(payload))
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn is_perfect(&self) -> bool {
        self.accuracy == Some(100)
    }

    pub fn missed(&self) -> impl Iterator<Item = &SessionResult> {
        self.results.iter().filter(|r| !r.correct)
    }

    pub fn encouragement(&self) -> &'static str {
        match self.accuracy {
            None => "No words attempted yet. Start a drill to see your results.",
            Some(100) => "Perfect score! You're a spelling champion!",
            Some(a) if a >= 80 => "Great job! Keep practicing to maintain your accuracy.",
            Some(a) if a >= 60 => "Good effort! Review the words you missed and try again.",
            Some(_) => "Keep practicing! Focus on the patterns and hints provided.",
        }
    }
}
