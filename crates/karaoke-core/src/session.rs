//! Assessment and scoring of one player singing one voice.

use std::sync::Arc;

use tracing::debug;

use crate::assess::{BeatAnalyzedEvent, PerformanceAssessment, SentenceAssessedEvent};
use crate::chart::{BeatRange, Chart, NoteId, SentenceId, Voice};
use crate::config::ScoreConfig;
use crate::error::{Error, Result};
use crate::score::{ScoreBreakdown, ScoreCalculator};

/// Wires a [`PerformanceAssessment`] to a [`ScoreCalculator`].
///
/// Notes and sentences are assessed as soon as the beat clock passes their
/// end beat.
pub struct PerformanceSession {
    voice: Arc<Voice>,
    assessment: PerformanceAssessment,
    calculator: ScoreCalculator,
    next_note: usize,
    next_sentence: usize,
    current_beat: i32,
    sentence_results: Vec<SentenceAssessedEvent>,
}

impl PerformanceSession {
    pub fn new(voice: Arc<Voice>, config: ScoreConfig) -> Self {
        Self {
            assessment: PerformanceAssessment::new(voice.clone())
                .with_perfect_threshold(config.perfect_sentence_threshold),
            calculator: ScoreCalculator::new(voice.clone(), config),
            voice,
            next_note: 0,
            next_sentence: 0,
            current_beat: i32::MIN,
            sentence_results: Vec::new(),
        }
    }

    /// Session for the named voice of a chart, or its first voice
    pub fn for_chart(chart: &Chart, voice_name: Option<&str>, config: ScoreConfig) -> Result<Self> {
        let voice = match voice_name {
            Some(name) => chart.voice(name),
            None => chart.first_voice(),
        }
        .ok_or_else(|| Error::VoiceNotFound(voice_name.unwrap_or_default().to_string()))?;

        let mut session = Self::new(voice.clone(), config);
        if let Some(range) = chart.medley_range() {
            session.set_medley_range(Some(range));
        }
        Ok(session)
    }

    pub fn voice(&self) -> &Arc<Voice> {
        &self.voice
    }

    pub fn assessment(&self) -> &PerformanceAssessment {
        &self.assessment
    }

    pub fn calculator(&self) -> &ScoreCalculator {
        &self.calculator
    }

    pub fn calculator_mut(&mut self) -> &mut ScoreCalculator {
        &mut self.calculator
    }

    /// Sentence results in the order they were assessed
    pub fn sentence_results(&self) -> &[SentenceAssessedEvent] {
        &self.sentence_results
    }

    pub fn set_medley_range(&mut self, range: Option<BeatRange>) {
        self.assessment.set_medley_range(range);
        self.calculator.set_medley_range(range);
    }

    pub fn skip_to_beat(&mut self, beat: i32) {
        self.assessment.skip_to_beat(beat);
        self.calculator.skip_to_beat(beat);
    }

    /// Feed one analyzed beat.
    ///
    /// Returns the sentences completed by it.
    pub fn process(&mut self, event: &BeatAnalyzedEvent) -> Vec<SentenceAssessedEvent> {
        self.assessment.on_beat_analyzed(event);
        self.advance_to(event.beat.saturating_add(1))
    }

    /// Assess every note and sentence ending at or before `beat`.
    pub fn advance_to(&mut self, beat: i32) -> Vec<SentenceAssessedEvent> {
        if beat <= self.current_beat {
            return Vec::new();
        }
        self.current_beat = beat;

        while let Some(note) = self.voice.note(NoteId(self.next_note))
            && note.end_beat() <= beat
        {
            if let Some(event) = self.assessment.on_note_analyzed(NoteId(self.next_note)) {
                self.calculator.on_note_assessed(&event);
            }
            self.next_note += 1;
        }

        let mut completed = Vec::new();
        while let Some(sentence) = self.voice.sentence(SentenceId(self.next_sentence))
            && sentence.max_beat() <= beat
        {
            if let Some(event) = self
                .assessment
                .on_sentence_analyzed(SentenceId(self.next_sentence))
            {
                debug!(
                    "Sentence {} of voice '{}' rated {}",
                    self.next_sentence,
                    self.voice.name(),
                    event.rating
                );
                self.calculator.on_sentence_assessed(&event);
                completed.push(event);
            }
            self.next_sentence += 1;
        }

        self.sentence_results.extend(completed.iter().cloned());
        completed
    }

    /// Assess everything not assessed yet
    pub fn finish(&mut self) -> Vec<SentenceAssessedEvent> {
        self.advance_to(i32::MAX)
    }

    pub fn total_score(&self) -> i32 {
        self.calculator.total_score()
    }

    pub fn breakdown(&self) -> ScoreBreakdown {
        self.calculator.breakdown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assess::SentenceRating;
    use crate::chart::{Note, NoteType, Sentence};

    fn test_voice() -> Arc<Voice> {
        let mut voice = Voice::new("P1");
        voice.push_sentence(
            Sentence::from_notes(
                [
                    Note::new(NoteType::Normal, 0, 2, 60, "a"),
                    Note::new(NoteType::Golden, 2, 2, 62, "b"),
                ],
                5,
            )
            .unwrap(),
        );
        voice.push_sentence(
            Sentence::from_notes([Note::new(NoteType::Normal, 6, 2, 64, "c")], 8).unwrap(),
        );
        Arc::new(voice)
    }

    fn sing_all(session: &mut PerformanceSession, end: i32, miss: &[i32]) {
        for beat in 0..end {
            let note = session.voice().note_at_beat(beat).map(|(id, n)| (id, n.pitch));
            let event = match note {
                Some((id, pitch)) if !miss.contains(&beat) => {
                    BeatAnalyzedEvent::sung(beat, Some(id), pitch)
                }
                Some((id, _)) => BeatAnalyzedEvent::silent(beat, Some(id)),
                None => BeatAnalyzedEvent::silent(beat, None),
            };
            session.process(&event);
        }
    }

    #[test]
    fn test_perfect_performance() {
        let mut session = PerformanceSession::new(test_voice(), ScoreConfig::default());
        sing_all(&mut session, 8, &[]);
        session.finish();

        assert_eq!(session.total_score(), 10000);
        assert_eq!(session.sentence_results().len(), 2);
        assert!(
            session
                .sentence_results()
                .iter()
                .all(|s| s.rating == SentenceRating::Perfect)
        );
    }

    #[test]
    fn test_rating_follows_configured_threshold() {
        let config = ScoreConfig {
            perfect_sentence_threshold: 0.5,
            ..ScoreConfig::default()
        };
        let mut session = PerformanceSession::new(test_voice(), config);
        sing_all(&mut session, 8, &[0, 1]);
        session.finish();

        let first = &session.sentence_results()[0];
        assert!((first.fraction() - 0.5).abs() < 1e-9);
        assert_eq!(first.rating, SentenceRating::Perfect);
        assert_eq!(session.calculator().data().perfect_sentence_count, 2);
    }

    #[test]
    fn test_sentence_completes_on_its_last_beat() {
        let mut session = PerformanceSession::new(test_voice(), ScoreConfig::default());
        for beat in 0..3 {
            let (id, note) = session.voice().note_at_beat(beat).unwrap();
            let event = BeatAnalyzedEvent::sung(beat, Some(id), note.pitch);
            assert!(session.process(&event).is_empty());
        }
        let event = BeatAnalyzedEvent::sung(3, Some(NoteId(1)), 62);
        let completed = session.process(&event);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].sentence_id, SentenceId(0));
    }

    #[test]
    fn test_total_score_never_decreases() {
        let mut session = PerformanceSession::new(test_voice(), ScoreConfig::default());
        let mut last = 0;
        for beat in 0..8 {
            let note = session.voice().note_at_beat(beat).map(|(id, n)| (id, n.pitch));
            let event = match note {
                Some((id, pitch)) if beat % 3 != 0 => BeatAnalyzedEvent::sung(beat, Some(id), pitch),
                _ => BeatAnalyzedEvent::silent(beat, note.map(|(id, _)| id)),
            };
            session.process(&event);
            assert!(session.total_score() >= last);
            last = session.total_score();
        }
        session.finish();
        assert!(session.total_score() >= last);
        assert!(session.breakdown().unmodified() <= 10000);
    }

    #[test]
    fn test_skip_to_beat_drops_earlier_beats() {
        let mut session = PerformanceSession::new(test_voice(), ScoreConfig::default());
        session.skip_to_beat(6);
        sing_all(&mut session, 8, &[]);
        session.finish();

        let data = session.calculator().data();
        assert_eq!(data.correct_normal_beats, 2);
        assert_eq!(data.correct_golden_beats, 0);
        assert_eq!(data.perfect_sentence_count, 1);
    }

    #[test]
    fn test_for_chart_unknown_voice() {
        let chart = Chart::new(Default::default(), String::new(), vec![(*test_voice()).clone()]);
        assert!(PerformanceSession::for_chart(&chart, Some("p1"), ScoreConfig::default()).is_ok());
        assert!(matches!(
            PerformanceSession::for_chart(&chart, Some("P3"), ScoreConfig::default()),
            Err(Error::VoiceNotFound(name)) if name == "P3"
        ));
    }
}
