use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::assess::{NoteAssessedEvent, SentenceAssessedEvent};
use crate::chart::{BeatRange, SentenceId, Voice};
use crate::config::ScoreConfig;
use crate::score::{MaxScores, ScoreAuthority, ScoreBreakdown, ScoreCalculationData, ScoreSnapshot};

/// Turns assessment events of one player into a bounded score.
#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    voice: Arc<Voice>,
    config: ScoreConfig,
    authority: ScoreAuthority,
    medley_range: Option<BeatRange>,
    max_scores: MaxScores,
    data: ScoreCalculationData,
    /// Beats before this one are not scored anymore
    next_scorable_beat: i32,
    scored_beats: HashSet<i32>,
    assessed_sentences: HashSet<SentenceId>,
}

impl ScoreCalculator {
    pub fn new(voice: Arc<Voice>, config: ScoreConfig) -> Self {
        Self::with_authority(voice, config, ScoreAuthority::Local)
    }

    /// Calculator for a player scored on another peer
    pub fn remote(voice: Arc<Voice>, config: ScoreConfig) -> Self {
        Self::with_authority(voice, config, ScoreAuthority::Remote)
    }

    fn with_authority(voice: Arc<Voice>, config: ScoreConfig, authority: ScoreAuthority) -> Self {
        let mut calculator = Self {
            voice,
            config,
            authority,
            medley_range: None,
            max_scores: MaxScores::default(),
            data: ScoreCalculationData::default(),
            next_scorable_beat: i32::MIN,
            scored_beats: HashSet::new(),
            assessed_sentences: HashSet::new(),
        };
        calculator.update_max_scores();
        debug!(
            "{} score calculator for voice '{}'",
            authority.as_str(),
            calculator.voice.name()
        );
        calculator
    }

    pub fn authority(&self) -> ScoreAuthority {
        self.authority
    }

    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }

    pub fn max_scores(&self) -> MaxScores {
        self.max_scores
    }

    pub fn data(&self) -> &ScoreCalculationData {
        &self.data
    }

    pub fn next_scorable_beat(&self) -> i32 {
        self.next_scorable_beat
    }

    pub fn medley_range(&self) -> Option<BeatRange> {
        self.medley_range
    }

    /// Recount scorable beats and sentences inside the active range.
    pub fn update_max_scores(&mut self) {
        let mut normal_beats = 0;
        let mut golden_beats = 0;
        for (_, note) in self.voice.notes() {
            if !note.is_scorable() {
                continue;
            }
            let beats = match self.medley_range {
                Some(range) => {
                    (note.end_beat().min(range.end) - note.start_beat.max(range.start)).max(0)
                }
                None => note.length,
            };
            if note.note_type.is_golden() {
                golden_beats += beats;
            } else {
                normal_beats += beats;
            }
        }

        self.max_scores = MaxScores::compute(normal_beats, golden_beats, self.config.notes_budget);
        self.data.total_sentence_count = self
            .voice
            .sentences()
            .iter()
            .filter(|s| {
                s.scorable_beat_count() > 0 && self.sentence_in_range(s.min_beat(), s.max_beat())
            })
            .count() as i32;

        debug!(
            "Max scores for voice '{}': normal {} ({} beats), golden {} ({} beats), {} sentences",
            self.voice.name(),
            self.max_scores.max_normal,
            normal_beats,
            self.max_scores.max_golden,
            golden_beats,
            self.data.total_sentence_count
        );
    }

    fn sentence_in_range(&self, min_beat: i32, max_beat: i32) -> bool {
        self.medley_range
            .is_none_or(|range| range.covers(min_beat, max_beat))
    }

    fn beat_in_range(&self, beat: i32) -> bool {
        self.medley_range.is_none_or(|range| range.contains(beat))
    }

    pub fn set_medley_range(&mut self, range: Option<BeatRange>) {
        self.medley_range = range;
        self.update_max_scores();
    }

    pub fn on_note_assessed(&mut self, event: &NoteAssessedEvent) {
        if self.authority == ScoreAuthority::Remote {
            return;
        }
        if !event.note_type.is_scorable() {
            if !event.correct_beats().is_empty() {
                warn!(
                    "{} note {:?} reported {} correct beats, ignoring",
                    event.note_type,
                    event.note_id,
                    event.correct_beats().len()
                );
            }
            return;
        }

        for &beat in event.correct_beats() {
            if beat < self.next_scorable_beat || !self.beat_in_range(beat) {
                continue;
            }
            if !self.scored_beats.insert(beat) {
                warn!("Beat {} was already scored, ignoring", beat);
                continue;
            }
            if event.note_type.is_golden() {
                self.data.correct_golden_beats += 1;
            } else {
                self.data.correct_normal_beats += 1;
            }
            self.data.highest_scored_beat = Some(
                self.data
                    .highest_scored_beat
                    .map_or(beat, |highest| highest.max(beat)),
            );
        }
    }

    pub fn on_sentence_assessed(&mut self, event: &SentenceAssessedEvent) {
        if self.authority == ScoreAuthority::Remote {
            return;
        }
        if event.scorable_beats <= 0
            || event.max_beat <= self.next_scorable_beat
            || !self.sentence_in_range(event.min_beat, event.max_beat)
        {
            return;
        }
        if !self.assessed_sentences.insert(event.sentence_id) {
            warn!("Sentence {:?} was already assessed, ignoring", event.sentence_id);
            return;
        }
        if event.fraction() >= self.config.perfect_sentence_threshold {
            self.data.perfect_sentence_count += 1;
        }
    }

    pub fn set_mod_score(&mut self, mod_score: i32) {
        self.data.mod_score = mod_score;
    }

    /// Stop scoring beats before `beat`. Never moves backward.
    pub fn skip_to_beat(&mut self, beat: i32) {
        if beat > self.next_scorable_beat {
            self.next_scorable_beat = beat;
        } else {
            debug!(
                "Ignoring skip to beat {}, already at {}",
                beat, self.next_scorable_beat
            );
        }
    }

    pub fn snapshot(&self) -> ScoreSnapshot {
        self.data.clone()
    }

    /// Replace all running totals with a snapshot.
    ///
    /// Scoring resumes after the snapshot's highest scored beat.
    pub fn load_snapshot(&mut self, snapshot: ScoreSnapshot) {
        self.next_scorable_beat = snapshot
            .highest_scored_beat
            .map_or(i32::MIN, |highest| highest.saturating_add(1));
        self.data = snapshot;
        self.scored_beats.clear();
        self.assessed_sentences.clear();
        info!(
            "Loaded score snapshot for voice '{}', resuming at beat {}",
            self.voice.name(),
            self.next_scorable_beat
        );
    }

    pub fn normal_score(&self) -> i32 {
        scaled(
            self.max_scores.max_normal,
            self.data.correct_normal_beats,
            self.max_scores.normal_beats,
        )
    }

    pub fn golden_score(&self) -> i32 {
        scaled(
            self.max_scores.max_golden,
            self.data.correct_golden_beats,
            self.max_scores.golden_beats,
        )
    }

    pub fn bonus_score(&self) -> i32 {
        let sentences = self
            .data
            .total_sentence_count
            .min(self.config.max_bonus_sentences as i32);
        if sentences <= 0 || self.data.perfect_sentence_count <= 0 {
            return 0;
        }
        let numerator = self.config.bonus_budget as i64 * self.data.perfect_sentence_count as i64;
        let bonus = (numerator + sentences as i64 - 1) / sentences as i64;
        bonus.min(self.config.bonus_budget as i64) as i32
    }

    pub fn mod_score(&self) -> i32 {
        self.data.mod_score
    }

    pub fn total_score(&self) -> i32 {
        self.normal_score() + self.golden_score() + self.bonus_score() + self.data.mod_score
    }

    pub fn breakdown(&self) -> ScoreBreakdown {
        ScoreBreakdown {
            normal: self.normal_score(),
            golden: self.golden_score(),
            bonus: self.bonus_score(),
            mod_score: self.data.mod_score,
            total: self.total_score(),
            max_normal: self.max_scores.max_normal,
            max_golden: self.max_scores.max_golden,
            max_bonus: self.config.bonus_budget,
        }
    }
}

/// `floor(max * correct / total)`, 0 without beats
fn scaled(max: i32, correct: i32, total: i32) -> i32 {
    if total <= 0 || correct <= 0 {
        return 0;
    }
    (max as i64 * correct as i64 / total as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Note, NoteId, NoteType, Sentence};

    fn voice(sentences: Vec<Vec<Note>>) -> Arc<Voice> {
        let mut voice = Voice::solo();
        for notes in sentences {
            let end = notes.last().map(|n| n.end_beat()).unwrap_or(0);
            voice.push_sentence(Sentence::from_notes(notes, end).unwrap());
        }
        Arc::new(voice)
    }

    fn note_event(voice: &Voice, id: usize, beats: Vec<i32>) -> NoteAssessedEvent {
        NoteAssessedEvent::new(NoteId(id), voice.note(NoteId(id)).unwrap(), beats)
    }

    fn sentence_event(voice: &Voice, id: usize, beats: Vec<i32>) -> SentenceAssessedEvent {
        SentenceAssessedEvent::new(
            SentenceId(id),
            voice.sentence(SentenceId(id)).unwrap(),
            beats,
            ScoreConfig::default().perfect_sentence_threshold,
        )
    }

    #[test]
    fn test_full_normal_note() {
        let voice = voice(vec![vec![Note::new(NoteType::Normal, 0, 4, 60, "a")]]);
        let mut calculator = ScoreCalculator::new(voice.clone(), ScoreConfig::default());
        calculator.on_note_assessed(&note_event(&voice, 0, vec![0, 1, 2, 3]));

        assert_eq!(calculator.normal_score(), calculator.max_scores().max_normal);
        assert_eq!(calculator.normal_score(), 9000);
        assert_eq!(calculator.golden_score(), 0);
    }

    #[test]
    fn test_partial_scores_are_floored() {
        let voice = voice(vec![vec![
            Note::new(NoteType::Normal, 0, 3, 60, "a"),
            Note::new(NoteType::Golden, 3, 2, 62, "b"),
        ]]);
        let mut calculator = ScoreCalculator::new(voice.clone(), ScoreConfig::default());
        calculator.on_note_assessed(&note_event(&voice, 0, vec![0]));
        calculator.on_note_assessed(&note_event(&voice, 1, vec![3]));

        // max normal 3857 over 3 beats, max golden 5143 over 2 beats
        assert_eq!(calculator.normal_score(), 1285);
        assert_eq!(calculator.golden_score(), 2571);
    }

    #[test]
    fn test_rap_golden_counts_as_golden() {
        let voice = voice(vec![vec![
            Note::new(NoteType::Normal, 0, 2, 60, "a"),
            Note::new(NoteType::RapGolden, 2, 1, 60, "b"),
        ]]);
        let calculator = ScoreCalculator::new(voice, ScoreConfig::default());
        assert_eq!(calculator.max_scores().normal_beats, 2);
        assert_eq!(calculator.max_scores().golden_beats, 1);
        assert_eq!(calculator.max_scores().total(), 9000);
    }

    #[test]
    fn test_duplicate_beats_scored_once() {
        let voice = voice(vec![vec![Note::new(NoteType::Normal, 0, 4, 60, "a")]]);
        let mut calculator = ScoreCalculator::new(voice.clone(), ScoreConfig::default());
        calculator.on_note_assessed(&note_event(&voice, 0, vec![0, 1]));
        calculator.on_note_assessed(&note_event(&voice, 0, vec![0, 1]));
        assert_eq!(calculator.data().correct_normal_beats, 2);
        assert_eq!(calculator.data().highest_scored_beat, Some(1));
    }

    #[test]
    fn test_bonus_cap() {
        let notes: Vec<Vec<Note>> = (0..25)
            .map(|i| vec![Note::new(NoteType::Normal, i * 4, 2, 60, "a")])
            .collect();
        let voice = voice(notes);
        let mut calculator = ScoreCalculator::new(voice.clone(), ScoreConfig::default());
        assert_eq!(calculator.data().total_sentence_count, 25);

        for i in 0..25 {
            let start = i as i32 * 4;
            calculator.on_sentence_assessed(&sentence_event(&voice, i, vec![start, start + 1]));
            if i == 19 {
                assert_eq!(calculator.bonus_score(), 1000);
            }
        }
        assert_eq!(calculator.data().perfect_sentence_count, 25);
        assert_eq!(calculator.bonus_score(), 1000);
    }

    #[test]
    fn test_bonus_rounds_up() {
        let notes: Vec<Vec<Note>> = (0..3)
            .map(|i| vec![Note::new(NoteType::Normal, i * 4, 2, 60, "a")])
            .collect();
        let voice = voice(notes);
        let mut calculator = ScoreCalculator::new(voice.clone(), ScoreConfig::default());
        calculator.on_sentence_assessed(&sentence_event(&voice, 0, vec![0, 1]));
        calculator.on_sentence_assessed(&sentence_event(&voice, 1, vec![4]));
        assert_eq!(calculator.data().perfect_sentence_count, 1);
        assert_eq!(calculator.bonus_score(), 334);
    }

    #[test]
    fn test_mod_score_is_added() {
        let voice = voice(vec![vec![Note::new(NoteType::Normal, 0, 4, 60, "a")]]);
        let mut calculator = ScoreCalculator::new(voice.clone(), ScoreConfig::default());
        calculator.on_note_assessed(&note_event(&voice, 0, vec![0, 1, 2, 3]));
        calculator.set_mod_score(-500);
        assert_eq!(calculator.total_score(), 8500);
        assert_eq!(calculator.breakdown().unmodified(), 9000);
    }

    #[test]
    fn test_skip_to_beat_only_moves_forward() {
        let voice = voice(vec![vec![Note::new(NoteType::Normal, 0, 8, 60, "a")]]);
        let mut calculator = ScoreCalculator::new(voice.clone(), ScoreConfig::default());
        calculator.skip_to_beat(4);
        calculator.skip_to_beat(2);
        assert_eq!(calculator.next_scorable_beat(), 4);

        calculator.on_note_assessed(&note_event(&voice, 0, (0..8).collect()));
        assert_eq!(calculator.data().correct_normal_beats, 4);
    }

    #[test]
    fn test_snapshot_resume() {
        let voice = voice(vec![
            vec![Note::new(NoteType::Normal, 0, 4, 60, "a")],
            vec![Note::new(NoteType::Normal, 4, 4, 60, "b")],
        ]);
        let mut first = ScoreCalculator::new(voice.clone(), ScoreConfig::default());
        first.on_note_assessed(&note_event(&voice, 0, vec![0, 1, 2, 3]));
        first.on_sentence_assessed(&sentence_event(&voice, 0, vec![0, 1, 2, 3]));
        let snapshot = first.snapshot();

        let mut resumed = ScoreCalculator::new(voice.clone(), ScoreConfig::default());
        resumed.load_snapshot(snapshot);
        assert_eq!(resumed.next_scorable_beat(), 4);
        assert_eq!(resumed.total_score(), first.total_score());

        // already counted beats and sentences are not scored again
        resumed.on_note_assessed(&note_event(&voice, 0, vec![0, 1, 2, 3]));
        resumed.on_sentence_assessed(&sentence_event(&voice, 0, vec![0, 1, 2, 3]));
        assert_eq!(resumed.data().correct_normal_beats, 4);
        assert_eq!(resumed.data().perfect_sentence_count, 1);

        resumed.on_note_assessed(&note_event(&voice, 1, vec![4, 5, 6, 7]));
        resumed.on_sentence_assessed(&sentence_event(&voice, 1, vec![4, 5, 6, 7]));
        assert_eq!(resumed.total_score(), 10000);
    }

    #[test]
    fn test_remote_ignores_events() {
        let voice = voice(vec![vec![Note::new(NoteType::Normal, 0, 4, 60, "a")]]);
        let mut calculator = ScoreCalculator::remote(voice.clone(), ScoreConfig::default());
        calculator.on_note_assessed(&note_event(&voice, 0, vec![0, 1, 2, 3]));
        assert_eq!(calculator.total_score(), 0);

        calculator.load_snapshot(ScoreSnapshot {
            correct_normal_beats: 2,
            total_sentence_count: 1,
            highest_scored_beat: Some(1),
            ..Default::default()
        });
        assert_eq!(calculator.normal_score(), 4500);
    }

    #[test]
    fn test_medley_range_limits_beats_and_sentences() {
        let voice = voice(vec![
            vec![Note::new(NoteType::Normal, 0, 4, 60, "a")],
            vec![Note::new(NoteType::Normal, 4, 4, 60, "b")],
            vec![Note::new(NoteType::Golden, 8, 4, 60, "c")],
        ]);
        let mut calculator = ScoreCalculator::new(voice.clone(), ScoreConfig::default());
        calculator.set_medley_range(Some(BeatRange::new(4, 10)));

        assert_eq!(calculator.max_scores().normal_beats, 4);
        assert_eq!(calculator.max_scores().golden_beats, 2);
        assert_eq!(calculator.data().total_sentence_count, 1);

        calculator.on_note_assessed(&note_event(&voice, 0, vec![0, 1]));
        assert_eq!(calculator.data().correct_normal_beats, 0);
    }
}
