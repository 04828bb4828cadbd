use serde::Serialize;
use tracing::error;

use crate::assess::SentenceRating;
use crate::chart::{Note, NoteId, NoteType, Sentence, SentenceId};

/// Drop beats outside `[start, end)`; they indicate a bug in the caller.
fn beats_inside(what: &str, start: i32, end: i32, beats: Vec<i32>) -> Vec<i32> {
    debug_assert!(
        beats.iter().all(|b| (start..end).contains(b)),
        "{what} assessed with beats outside [{start}, {end}): {beats:?}"
    );
    let (inside, outside): (Vec<i32>, Vec<i32>) =
        beats.into_iter().partition(|b| (start..end).contains(b));
    if !outside.is_empty() {
        error!(
            "{} assessed with beats {:?} outside [{}, {}), ignoring them",
            what, outside, start, end
        );
    }
    inside
}

/// All beats of a note have passed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteAssessedEvent {
    pub note_id: NoteId,
    pub note_type: NoteType,
    pub start_beat: i32,
    pub length: i32,
    correct_beats: Vec<i32>,
}

impl NoteAssessedEvent {
    pub fn new(note_id: NoteId, note: &Note, correct_beats: Vec<i32>) -> Self {
        let correct_beats =
            beats_inside("Note", note.start_beat, note.end_beat(), correct_beats);
        Self {
            note_id,
            note_type: note.note_type,
            start_beat: note.start_beat,
            length: note.length,
            correct_beats,
        }
    }

    /// Correctly sung beats, ascending
    pub fn correct_beats(&self) -> &[i32] {
        &self.correct_beats
    }

    pub fn fraction(&self) -> f64 {
        if self.length <= 0 {
            return 0.0;
        }
        self.correct_beats.len() as f64 / self.length as f64
    }
}

/// All beats of a sentence have passed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceAssessedEvent {
    pub sentence_id: SentenceId,
    pub min_beat: i32,
    pub max_beat: i32,
    /// Beats of the sentence that can earn points
    pub scorable_beats: i32,
    correct_beats: Vec<i32>,
    pub rating: SentenceRating,
}

impl SentenceAssessedEvent {
    pub fn new(
        sentence_id: SentenceId,
        sentence: &Sentence,
        correct_beats: Vec<i32>,
        perfect_threshold: f64,
    ) -> Self {
        let correct_beats = beats_inside(
            "Sentence",
            sentence.min_beat(),
            sentence.max_beat(),
            correct_beats,
        );
        let scorable_beats = sentence.scorable_beat_count();
        let fraction = if scorable_beats > 0 {
            correct_beats.len() as f64 / scorable_beats as f64
        } else {
            0.0
        };
        Self {
            sentence_id,
            min_beat: sentence.min_beat(),
            max_beat: sentence.max_beat(),
            scorable_beats,
            correct_beats,
            rating: SentenceRating::from_fraction(fraction, perfect_threshold),
        }
    }

    pub fn correct_beats(&self) -> &[i32] {
        &self.correct_beats
    }

    pub fn fraction(&self) -> f64 {
        if self.scorable_beats <= 0 {
            return 0.0;
        }
        self.correct_beats.len() as f64 / self.scorable_beats as f64
    }
}
