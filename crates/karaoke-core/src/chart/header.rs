use serde::{Deserialize, Serialize};

use crate::chart::BeatRange;

/// Song metadata from the `#KEY:value` lines of a chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartHeader {
    pub artist: String,
    pub title: String,
    pub bpm: f64,
    /// Audio file referenced by `#MP3`
    pub audio_path: String,
    /// Milliseconds before beat 0
    pub gap: Option<f64>,
    pub video: Option<String>,
    pub video_gap: Option<f64>,
    pub background: Option<String>,
    pub cover: Option<String>,
    pub genre: Option<String>,
    pub language: Option<String>,
    pub year: Option<String>,
    pub edition: Option<String>,
    pub creator: Option<String>,
    pub version: Option<String>,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub preview_start: Option<f64>,
    pub preview_end: Option<f64>,
    pub medley_start_beat: Option<i32>,
    pub medley_end_beat: Option<i32>,
    /// Keys without a dedicated slot, lower-cased, in file order
    pub unknown_fields: Vec<(String, String)>,
}

impl ChartHeader {
    pub fn unknown_field(&self, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.unknown_fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or replace an unrecognized field
    pub fn set_unknown_field(&mut self, key: &str, value: impl Into<String>) {
        let key = key.to_lowercase();
        let value = value.into();
        match self.unknown_fields.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.unknown_fields.push((key, value)),
        }
    }

    pub fn medley_range(&self) -> Option<BeatRange> {
        match (self.medley_start_beat, self.medley_end_beat) {
            (Some(start), Some(end)) if start < end => Some(BeatRange::new(start, end)),
            _ => None,
        }
    }

    /// Header entries in canonical order, keys lower-cased.
    ///
    /// Voice display names are not part of the header; the writer emits them
    /// from the voices.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = vec![
            ("title".into(), self.title.clone()),
            ("artist".into(), self.artist.clone()),
            ("mp3".into(), self.audio_path.clone()),
            ("bpm".into(), self.bpm.to_string()),
        ];

        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                entries.push((key.to_string(), value));
            }
        };
        push("gap", self.gap.map(|v| v.to_string()));
        push("video", self.video.clone());
        push("videogap", self.video_gap.map(|v| v.to_string()));
        push("background", self.background.clone());
        push("cover", self.cover.clone());
        push("genre", self.genre.clone());
        push("language", self.language.clone());
        push("year", self.year.clone());
        push("edition", self.edition.clone());
        push("creator", self.creator.clone());
        push("version", self.version.clone());
        push("start", self.start.map(|v| v.to_string()));
        push("end", self.end.map(|v| v.to_string()));
        push("previewstart", self.preview_start.map(|v| v.to_string()));
        push("previewend", self.preview_end.map(|v| v.to_string()));
        push("medleystartbeat", self.medley_start_beat.map(|v| v.to_string()));
        push("medleyendbeat", self.medley_end_beat.map(|v| v.to_string()));

        entries.extend(self.unknown_fields.iter().cloned());
        entries
    }
}
