use serde::{Deserialize, Serialize};

use super::scoring;

/// Scoring parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub notes_budget: i32,
    pub bonus_budget: i32,
    pub perfect_sentence_threshold: f64,
    pub max_bonus_sentences: u32,
}

impl ScoreConfig {
    pub fn max_total(&self) -> i32 {
        self.notes_budget + self.bonus_budget
    }
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            notes_budget: scoring::NOTES_BUDGET,
            bonus_budget: scoring::BONUS_BUDGET,
            perfect_sentence_threshold: scoring::PERFECT_SENTENCE_THRESHOLD,
            max_bonus_sentences: scoring::MAX_BONUS_SENTENCES,
        }
    }
}
