//! Score calculation.
//!
//! This module contains:
//! - `MaxScores` - split of the notes budget between normal and golden beats
//! - `ScoreCalculator` - running score of one player
//! - `ScoreCalculationData`, `ScoreSnapshot` - running totals, exchangeable between peers
//! - `ScoreBreakdown` - score split into its parts

mod calculator;
mod data;
mod max_scores;

pub use calculator::*;
pub use data::*;
pub use max_scores::*;
