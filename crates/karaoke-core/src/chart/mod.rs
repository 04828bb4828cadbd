//! Chart data model.
//!
//! This module contains the types a parsed chart is made of:
//! - `Note`, `NoteType` - sung syllables and their prefix table
//! - `Sentence` - lyric phrases ending at a linebreak
//! - `Voice`, `NoteId`, `SentenceId` - singable parts and indices into them
//! - `ChartHeader`, `Chart` - song metadata plus voices
//! - `BeatRange` - half-open beat windows (medley ranges)

mod header;
mod note;
mod range;
mod sentence;
mod song;
mod voice;

pub use header::*;
pub use note::*;
pub use range::*;
pub use sentence::*;
pub use song::*;
pub use voice::*;
