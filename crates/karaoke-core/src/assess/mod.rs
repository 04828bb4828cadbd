//! Performance assessment.
//!
//! This module contains:
//! - `BeatAnalyzedEvent` - pitch detector output for one beat
//! - `PerformanceAssessment` - maps beats onto notes and sentences
//! - `NoteAssessedEvent`, `SentenceAssessedEvent` - results for passed notes and sentences
//! - `SentenceRating` - verdict for a sung sentence

mod assessed;
mod engine;
mod event;
mod rating;

pub use assessed::*;
pub use engine::*;
pub use event::*;
pub use rating::*;
