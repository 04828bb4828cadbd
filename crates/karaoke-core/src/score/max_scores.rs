use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::scoring::BUDGET_TOLERANCE;

/// Maximum points for normal and golden notes of a voice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxScores {
    pub normal_beats: i32,
    pub golden_beats: i32,
    pub max_normal: i32,
    pub max_golden: i32,
}

impl MaxScores {
    /// Split `notes_budget` between normal and golden beats.
    ///
    /// A golden beat is worth twice a normal beat. Rounding overhang is taken
    /// from the normal maximum only, so the maxima always add up to the budget
    /// when there is at least one scorable beat.
    pub fn compute(normal_beats: i32, golden_beats: i32, notes_budget: i32) -> Self {
        let normal_beats = normal_beats.max(0);
        let golden_beats = golden_beats.max(0);

        let (max_normal, max_golden) = match (normal_beats, golden_beats) {
            (0, 0) => (0, 0),
            (_, 0) => (notes_budget, 0),
            (0, _) => (0, notes_budget),
            _ => {
                let beat_value =
                    notes_budget as f64 / (normal_beats as f64 + 2.0 * golden_beats as f64);
                let exact_normal = beat_value * normal_beats as f64;
                let exact_golden = 2.0 * beat_value * golden_beats as f64;

                let mismatch = (exact_normal + exact_golden - notes_budget as f64).abs();
                if mismatch > BUDGET_TOLERANCE {
                    warn!(
                        "Note maxima {} + {} deviate from budget {} by {}",
                        exact_normal, exact_golden, notes_budget, mismatch
                    );
                }

                let mut max_normal = exact_normal.ceil() as i32;
                let max_golden = exact_golden.ceil() as i32;
                let overhang = max_normal + max_golden - notes_budget;
                if overhang > 0 {
                    max_normal -= overhang;
                }
                (max_normal, max_golden)
            }
        };

        Self {
            normal_beats,
            golden_beats,
            max_normal,
            max_golden,
        }
    }

    pub fn total(&self) -> i32 {
        self.max_normal + self.max_golden
    }
}
