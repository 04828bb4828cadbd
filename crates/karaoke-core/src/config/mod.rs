//! Tunables for parsing and scoring.
//!
//! This module contains:
//! - `ScoreConfig` - point budgets and the perfect-sentence threshold
//! - `ParseOptions` - initial encoding and encoding restart limit
//! - Constants for the default values of both

mod parse_options;
mod score_config;

pub use parse_options::*;
pub use score_config::*;

/// Point budget constants.
///
/// A full performance of the notes yields `NOTES_BUDGET` points, all perfect
/// sentences add `BONUS_BUDGET`. Together they make `MAX_TOTAL`.
pub mod scoring {
    /// Points shared by all normal and golden notes of a voice.
    pub const NOTES_BUDGET: i32 = 9000;

    /// Points for perfectly sung sentences.
    pub const BONUS_BUDGET: i32 = 1000;

    /// Upper bound of the unmodified score.
    pub const MAX_TOTAL: i32 = NOTES_BUDGET + BONUS_BUDGET;

    /// Minimum sentence fraction that counts as perfect.
    pub const PERFECT_SENTENCE_THRESHOLD: f64 = 0.95;

    /// Sentence count at which the bonus is already fully earned.
    pub const MAX_BONUS_SENTENCES: u32 = 20;

    /// Allowed deviation between the unrounded note maxima and the budget.
    pub const BUDGET_TOLERANCE: f64 = 0.01;
}

/// Chart parsing constants.
pub mod parser {
    /// How often a declared `#ENCODING` may restart the parse.
    pub const MAX_ENCODING_RESTARTS: u32 = 1;

    /// Sentences flushed at a voice switch or at the end use this as linebreak
    /// offset past their last note.
    pub const IMPLICIT_LINEBREAK_OFFSET: i32 = 0;
}
