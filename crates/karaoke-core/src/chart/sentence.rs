use serde::{Deserialize, Serialize};

use crate::chart::Note;

/// Returned when a note starts before the end of the sentence it is added to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteOverlap {
    pub start_beat: i32,
    pub sentence_end: i32,
}

/// A lyric phrase: notes in beat order, followed by a linebreak
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    notes: Vec<Note>,
    linebreak_beat: i32,
}

impl Sentence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sentence from notes, rejecting overlaps.
    pub fn from_notes(
        notes: impl IntoIterator<Item = Note>,
        linebreak_beat: i32,
    ) -> Result<Self, NoteOverlap> {
        let mut sentence = Self::new();
        for note in notes {
            sentence.add_note(note)?;
        }
        sentence.linebreak_beat = linebreak_beat;
        Ok(sentence)
    }

    /// Append a note after the already occupied beats.
    pub fn add_note(&mut self, note: Note) -> Result<(), NoteOverlap> {
        if let Some(last) = self.notes.last()
            && note.start_beat < last.end_beat()
        {
            return Err(NoteOverlap {
                start_beat: note.start_beat,
                sentence_end: last.end_beat(),
            });
        }
        self.notes.push(note);
        Ok(())
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn linebreak_beat(&self) -> i32 {
        self.linebreak_beat
    }

    pub fn set_linebreak_beat(&mut self, beat: i32) {
        self.linebreak_beat = beat;
    }

    /// Start of the first note (the linebreak beat for an empty sentence)
    pub fn min_beat(&self) -> i32 {
        self.notes
            .first()
            .map(|n| n.start_beat)
            .unwrap_or(self.linebreak_beat)
    }

    /// End of the last note (the linebreak beat for an empty sentence)
    pub fn max_beat(&self) -> i32 {
        self.notes
            .last()
            .map(|n| n.end_beat())
            .unwrap_or(self.linebreak_beat)
    }

    pub fn extended_max_beat(&self) -> i32 {
        self.max_beat().max(self.linebreak_beat)
    }

    /// Total length of notes that can earn points
    pub fn scorable_beat_count(&self) -> i32 {
        self.notes
            .iter()
            .filter(|n| n.is_scorable())
            .map(|n| n.length)
            .sum()
    }

    pub fn contains_beat(&self, beat: i32) -> bool {
        self.min_beat() <= beat && beat < self.max_beat()
    }

    /// Lyrics of all notes joined together
    pub fn text(&self) -> String {
        self.notes.iter().map(|n| n.text.as_str()).collect()
    }
}
