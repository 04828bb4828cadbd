//! # karaoke-core
//!
//! Core library for karaoke chart parsing and performance scoring.
//!
//! This crate provides:
//! - The chart data model (notes, sentences, voices, header)
//! - A parser and writer for UltraStar-style chart text
//! - Beat timing conversion
//! - Per-beat performance assessment and the bounded score calculation

pub mod assess;
pub mod chart;
pub mod config;
pub mod error;
pub mod io;
pub mod parser;
pub mod score;
pub mod session;
pub mod timing;
pub mod writer;

// Re-export from assess module
pub use assess::{
    BeatAnalyzedEvent, NoteAssessedEvent, PerformanceAssessment, PitchEvent,
    SentenceAssessedEvent, SentenceRating, midi_note_frequency,
};

// Re-export from chart module
pub use chart::{
    BeatRange, Chart, ChartHeader, Note, NoteId, NoteType, Sentence, SentenceId, Voice,
};

// Re-export from config module
pub use config::{ParseOptions, ScoreConfig};

// Re-export from error module
pub use error::{Error, ParseError, ParseErrorKind, Result};

// Re-export from io module
pub use io::{load_chart, load_chart_with, save_chart};

// Re-export from parser module
pub use parser::{ParseWarning, ParsedChart, WarningKind, content_hash, parse_chart, parse_chart_bytes};

// Re-export from score module
pub use score::{
    MaxScores, ScoreAuthority, ScoreBreakdown, ScoreCalculationData, ScoreCalculator, ScoreSnapshot,
};

// Re-export from session module
pub use session::PerformanceSession;

// Re-export from timing module
pub use timing::{BeatTiming, UltraStarTiming};

// Re-export from writer module
pub use writer::write_chart;
