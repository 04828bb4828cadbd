use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::assess::{BeatAnalyzedEvent, NoteAssessedEvent, SentenceAssessedEvent};
use crate::chart::{BeatRange, NoteId, SentenceId, Voice};
use crate::config::scoring::PERFECT_SENTENCE_THRESHOLD;

/// Tracks which beats of one voice a player sang correctly.
///
/// Driven by the beat clock: one [`BeatAnalyzedEvent`] per beat, then
/// [`on_note_analyzed`](Self::on_note_analyzed) and
/// [`on_sentence_analyzed`](Self::on_sentence_analyzed) once all beats of a
/// note or sentence have passed.
#[derive(Debug, Clone)]
pub struct PerformanceAssessment {
    voice: Arc<Voice>,
    scorable_range: BeatRange,
    medley_range: Option<BeatRange>,
    first_open_beat: i32,
    processed_beats: HashSet<i32>,
    correct_beats: HashMap<NoteId, BTreeSet<i32>>,
    perfect_threshold: f64,
}

impl PerformanceAssessment {
    pub fn new(voice: Arc<Voice>) -> Self {
        let scorable_range = match (voice.min_beat(), voice.max_beat()) {
            (Some(start), Some(end)) => BeatRange::new(start, end),
            _ => BeatRange::new(0, 0),
        };
        debug!(
            "Assessing voice '{}' over beats {}",
            voice.name(),
            scorable_range
        );
        Self {
            voice,
            scorable_range,
            medley_range: None,
            first_open_beat: i32::MIN,
            processed_beats: HashSet::new(),
            correct_beats: HashMap::new(),
            perfect_threshold: PERFECT_SENTENCE_THRESHOLD,
        }
    }

    /// Fraction of correct beats rated as a perfect sentence
    pub fn with_perfect_threshold(mut self, threshold: f64) -> Self {
        self.perfect_threshold = threshold;
        self
    }

    pub fn perfect_threshold(&self) -> f64 {
        self.perfect_threshold
    }

    pub fn voice(&self) -> &Arc<Voice> {
        &self.voice
    }

    pub fn scorable_range(&self) -> BeatRange {
        self.scorable_range
    }

    pub fn medley_range(&self) -> Option<BeatRange> {
        self.medley_range
    }

    /// Restrict assessment to a beat window; `None` assesses the whole voice
    pub fn set_medley_range(&mut self, range: Option<BeatRange>) {
        self.medley_range = range;
    }

    /// Ignore all beats before `beat`. Never moves backward.
    pub fn skip_to_beat(&mut self, beat: i32) {
        self.first_open_beat = self.first_open_beat.max(beat);
    }

    /// Record one analyzed beat.
    ///
    /// Returns the note the beat was sung correctly for.
    pub fn on_beat_analyzed(&mut self, event: &BeatAnalyzedEvent) -> Option<NoteId> {
        let beat = event.beat;
        if !self.scorable_range.contains(beat) || beat < self.first_open_beat {
            return None;
        }
        if let Some(medley) = self.medley_range
            && !medley.contains(beat)
        {
            return None;
        }
        if !self.processed_beats.insert(beat) {
            warn!(
                "Beat {} of voice '{}' analyzed twice, ignoring",
                beat,
                self.voice.name()
            );
            return None;
        }

        if event.pitch_event.is_none() {
            return None;
        }
        let note_id = event.note_at_beat?;
        let note = self.voice.note(note_id)?;
        if !note.contains_beat(beat) {
            warn!(
                "Beat {} reported for note {:?} covering [{}, {}), ignoring",
                beat,
                note_id,
                note.start_beat,
                note.end_beat()
            );
            return None;
        }

        if note.is_scorable() && event.rounded_recorded_midi_note == note.pitch {
            self.correct_beats.entry(note_id).or_default().insert(beat);
            Some(note_id)
        } else {
            None
        }
    }

    /// Correctly sung beats of a note so far
    pub fn correct_beats_of(&self, note_id: NoteId) -> impl Iterator<Item = i32> + '_ {
        self.correct_beats
            .get(&note_id)
            .into_iter()
            .flat_map(|beats| beats.iter().copied())
    }

    /// Assess a note whose beats have all passed.
    ///
    /// Returns `None` for an id that is not part of the voice.
    pub fn on_note_analyzed(&self, note_id: NoteId) -> Option<NoteAssessedEvent> {
        let note = self.voice.note(note_id)?;
        let beats = self.correct_beats_of(note_id).collect();
        Some(NoteAssessedEvent::new(note_id, note, beats))
    }

    /// Assess a sentence whose beats have all passed.
    pub fn on_sentence_analyzed(&self, sentence_id: SentenceId) -> Option<SentenceAssessedEvent> {
        let sentence = self.voice.sentence(sentence_id)?;
        let beats = self
            .voice
            .note_ids(sentence_id)
            .flat_map(|id| self.correct_beats_of(id))
            .collect();
        Some(SentenceAssessedEvent::new(
            sentence_id,
            sentence,
            beats,
            self.perfect_threshold,
        ))
    }
}
