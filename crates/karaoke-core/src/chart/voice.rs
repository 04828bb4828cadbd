use serde::{Deserialize, Serialize};

use crate::chart::{Note, Sentence};

/// Index of a note within all notes of a voice, in beat order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub usize);

/// Index of a sentence within a voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SentenceId(pub usize);

/// One singable part of a chart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Voice {
    name: String,
    display_name: Option<String>,
    sentences: Vec<Sentence>,
    /// First note id of each sentence
    #[serde(skip)]
    note_offsets: Vec<usize>,
    #[serde(skip)]
    note_count: usize,
}

impl Voice {
    /// Name of the implicit voice of a chart without `P` lines
    pub const SOLO_NAME: &'static str = "";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn solo() -> Self {
        Self::new(Self::SOLO_NAME)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_solo(&self) -> bool {
        self.name == Self::SOLO_NAME
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn set_display_name(&mut self, display_name: Option<String>) {
        self.display_name = display_name;
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn last_sentence(&self) -> Option<&Sentence> {
        self.sentences.last()
    }

    /// Append a sentence without ordering checks.
    ///
    /// The parser applies the ordering policy before calling this.
    pub fn push_sentence(&mut self, sentence: Sentence) {
        self.note_offsets.push(self.note_count);
        self.note_count += sentence.notes().len();
        self.sentences.push(sentence);
    }

    pub fn sentence(&self, id: SentenceId) -> Option<&Sentence> {
        self.sentences.get(id.0)
    }

    pub fn note_count(&self) -> usize {
        self.note_count
    }

    pub fn is_empty(&self) -> bool {
        self.note_count == 0
    }

    /// All notes in beat order with their ids
    pub fn notes(&self) -> impl Iterator<Item = (NoteId, &Note)> {
        self.sentences
            .iter()
            .flat_map(|s| s.notes())
            .enumerate()
            .map(|(i, n)| (NoteId(i), n))
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        let sentence_index = self.sentence_index_of_note(id)?;
        let offset = self.note_offsets[sentence_index];
        self.sentences[sentence_index].notes().get(id.0 - offset)
    }

    /// Ids of the notes of a sentence
    pub fn note_ids(&self, id: SentenceId) -> impl Iterator<Item = NoteId> + use<> {
        let range = match (self.note_offsets.get(id.0), self.sentences.get(id.0)) {
            (Some(&offset), Some(sentence)) => offset..offset + sentence.notes().len(),
            _ => 0..0,
        };
        range.map(NoteId)
    }

    /// Sentence containing the given note
    pub fn sentence_of_note(&self, id: NoteId) -> Option<SentenceId> {
        self.sentence_index_of_note(id).map(SentenceId)
    }

    fn sentence_index_of_note(&self, id: NoteId) -> Option<usize> {
        if id.0 >= self.note_count {
            return None;
        }
        // last sentence starting at or before id; empty sentences sharing an
        // offset sort before the sentence that owns it
        let index = self.note_offsets.partition_point(|&offset| offset <= id.0);
        index.checked_sub(1)
    }

    pub fn note_at_beat(&self, beat: i32) -> Option<(NoteId, &Note)> {
        let sentence = self.sentence_at_beat(beat)?;
        self.note_ids(sentence)
            .zip(self.sentences[sentence.0].notes())
            .find(|(_, note)| note.contains_beat(beat))
    }

    pub fn sentence_at_beat(&self, beat: i32) -> Option<SentenceId> {
        self.sentences
            .iter()
            .position(|s| s.contains_beat(beat))
            .map(SentenceId)
    }

    /// Start of the first note, if any
    pub fn min_beat(&self) -> Option<i32> {
        self.notes().map(|(_, n)| n.start_beat).min()
    }

    /// End of the last note, if any
    pub fn max_beat(&self) -> Option<i32> {
        self.notes().map(|(_, n)| n.end_beat()).max()
    }
}
