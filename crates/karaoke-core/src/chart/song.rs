use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::chart::{BeatRange, ChartHeader, Voice};
use crate::timing::UltraStarTiming;

/// A parsed song: header metadata plus the voices to sing
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    header: ChartHeader,
    /// Identity of the chart body, independent of the header
    hash: String,
    voices: Vec<Arc<Voice>>,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Chart {
    pub fn new(header: ChartHeader, hash: String, voices: Vec<Voice>) -> Self {
        Self {
            header,
            hash,
            voices: voices.into_iter().map(Arc::new).collect(),
            path: None,
        }
    }

    pub fn header(&self) -> &ChartHeader {
        &self.header
    }

    /// Header fields may change after parsing; notes may not.
    pub fn header_mut(&mut self) -> &mut ChartHeader {
        &mut self.header
    }

    pub fn title(&self) -> &str {
        &self.header.title
    }

    pub fn artist(&self) -> &str {
        &self.header.artist
    }

    pub fn bpm(&self) -> f64 {
        self.header.bpm
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.header.title = title.into();
    }

    pub fn set_artist(&mut self, artist: impl Into<String>) {
        self.header.artist = artist.into();
    }

    pub fn set_bpm(&mut self, bpm: f64) {
        self.header.bpm = bpm;
    }

    pub fn set_gap(&mut self, gap: Option<f64>) {
        self.header.gap = gap;
    }

    pub fn set_medley_beats(&mut self, start: Option<i32>, end: Option<i32>) {
        self.header.medley_start_beat = start;
        self.header.medley_end_beat = end;
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn voices(&self) -> &[Arc<Voice>] {
        &self.voices
    }

    pub fn voice(&self, name: &str) -> Option<&Arc<Voice>> {
        self.voices
            .iter()
            .find(|v| v.name().eq_ignore_ascii_case(name))
    }

    /// The voice to use when the caller did not pick one
    pub fn first_voice(&self) -> Option<&Arc<Voice>> {
        self.voices.first()
    }

    pub fn is_duet(&self) -> bool {
        self.voices.len() > 1 || self.voices.iter().any(|v| !v.is_solo())
    }

    pub fn note_count(&self) -> usize {
        self.voices.iter().map(|v| v.note_count()).sum()
    }

    pub fn medley_range(&self) -> Option<BeatRange> {
        self.header.medley_range()
    }

    pub fn timing(&self) -> UltraStarTiming {
        UltraStarTiming::new(self.header.bpm, self.header.gap.unwrap_or(0.0))
    }

    /// File the chart was loaded from
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: Option<PathBuf>) {
        self.path = path;
    }

    /// Take over everything parsed from `other`, keeping the current path.
    pub(crate) fn replace_contents(&mut self, other: Chart) {
        self.header = other.header;
        self.hash = other.hash;
        self.voices = other.voices;
    }
}
