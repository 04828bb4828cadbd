use serde::{Deserialize, Serialize};

use crate::chart::NoteId;

/// Detected pitch for one beat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchEvent {
    pub midi_note: i32,
    pub frequency: f32,
}

/// Output of the pitch detector for one beat of one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatAnalyzedEvent {
    pub beat: i32,
    #[serde(default)]
    pub pitch_event: Option<PitchEvent>,
    /// Note of the player's voice covering the beat
    #[serde(default)]
    pub note_at_beat: Option<NoteId>,
    pub recorded_midi_note: i32,
    /// Recorded pitch snapped to the nearest semitone
    pub rounded_recorded_midi_note: i32,
}

impl BeatAnalyzedEvent {
    /// Event for a beat where the player sang `midi_note`
    pub fn sung(beat: i32, note_at_beat: Option<NoteId>, midi_note: i32) -> Self {
        Self {
            beat,
            pitch_event: Some(PitchEvent {
                midi_note,
                frequency: midi_note_frequency(midi_note),
            }),
            note_at_beat,
            recorded_midi_note: midi_note,
            rounded_recorded_midi_note: midi_note,
        }
    }

    /// Event for a beat without detected pitch
    pub fn silent(beat: i32, note_at_beat: Option<NoteId>) -> Self {
        Self {
            beat,
            pitch_event: None,
            note_at_beat,
            recorded_midi_note: 0,
            rounded_recorded_midi_note: 0,
        }
    }
}

/// Equal-tempered frequency of a MIDI note (A4 = 69 = 440 Hz)
pub fn midi_note_frequency(midi_note: i32) -> f32 {
    440.0 * 2f32.powf((midi_note - 69) as f32 / 12.0)
}
