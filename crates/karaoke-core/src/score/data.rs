use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// Running totals of one player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreCalculationData {
    pub correct_normal_beats: i32,
    pub correct_golden_beats: i32,
    pub perfect_sentence_count: i32,
    pub total_sentence_count: i32,
    pub highest_scored_beat: Option<i32>,
    /// Game-rule adjustment added on top of the budgeted points
    pub mod_score: i32,
}

/// Wire form of [`ScoreCalculationData`] exchanged between peers
pub type ScoreSnapshot = ScoreCalculationData;

/// Who computes the score of a player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
pub enum ScoreAuthority {
    /// Scored from local assessment events
    #[default]
    Local,
    /// Mirrors snapshots received from the owning peer
    Remote,
}

impl ScoreAuthority {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Score split into its parts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub normal: i32,
    pub golden: i32,
    pub bonus: i32,
    pub mod_score: i32,
    pub total: i32,
    pub max_normal: i32,
    pub max_golden: i32,
    pub max_bonus: i32,
}

impl ScoreBreakdown {
    /// Sum of the budgeted parts, without the mod score
    pub fn unmodified(&self) -> i32 {
        self.normal + self.golden + self.bonus
    }
}
