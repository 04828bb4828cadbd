//! Conversion between beats and playback time.
//!
//! Scoring itself only deals in beats; hosts use a `BeatTiming` to drive the
//! beat clock from the audio position.

/// Maps beats to milliseconds of song audio and back.
pub trait BeatTiming {
    /// Audio position (ms) at which the given beat starts.
    fn beat_to_millis(&self, beat: f64) -> f64;

    /// Beat at the given audio position (ms), possibly fractional.
    fn millis_to_beat(&self, millis: f64) -> f64;

    /// Beat currently being sung at the given position.
    fn current_beat(&self, millis: f64) -> i32 {
        self.millis_to_beat(millis).floor() as i32
    }
}

/// UltraStar chart timing: a constant BPM counted in quarter beats,
/// offset by the gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UltraStarTiming {
    pub bpm: f64,
    pub gap_ms: f64,
}

impl UltraStarTiming {
    /// Chart beats per musical beat
    const BEATS_PER_BPM_BEAT: f64 = 4.0;

    pub fn new(bpm: f64, gap_ms: f64) -> Self {
        Self { bpm, gap_ms }
    }

    fn millis_per_beat(&self) -> f64 {
        60_000.0 / (self.bpm * Self::BEATS_PER_BPM_BEAT)
    }
}

impl BeatTiming for UltraStarTiming {
    fn beat_to_millis(&self, beat: f64) -> f64 {
        self.gap_ms + beat * self.millis_per_beat()
    }

    fn millis_to_beat(&self, millis: f64) -> f64 {
        if self.bpm <= 0.0 {
            return 0.0;
        }
        (millis - self.gap_ms) / self.millis_per_beat()
    }
}
