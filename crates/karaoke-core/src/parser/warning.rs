use serde::Serialize;
use thiserror::Error;

/// Recoverable problem found while parsing; the chart is still usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum WarningKind {
    #[error("Malformed header line '{0}' skipped")]
    MalformedHeader(String),

    #[error("Repeated header field #{0} ignored")]
    RepeatedHeader(String),

    #[error("Unknown encoding '{0}', keeping current encoding")]
    UnknownEncoding(String),

    #[error("Declared encoding {declared} ignored, byte order mark selects {bom}")]
    EncodingOverriddenByBom { declared: String, bom: String },

    #[error(
        "Sentence starting at beat {start_beat} overlaps previous sentence ending at beat {previous_end}, dropped"
    )]
    SentenceDropped { start_beat: i32, previous_end: i32 },

    #[error("Linebreak at beat {given} is before the end of its sentence, moved to beat {corrected}")]
    LinebreakCorrected { given: i32, corrected: i32 },

    #[error("Linebreak without an open sentence ignored")]
    DanglingLinebreak,

    #[error("{0} sentence(s) before the first voice marker discarded")]
    SoloVoiceDiscarded(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("line {line}: {kind}")]
pub struct ParseWarning {
    pub line: usize,
    pub kind: WarningKind,
}

impl ParseWarning {
    pub fn new(line: usize, kind: WarningKind) -> Self {
        Self { line, kind }
    }
}

/// Collects warnings and mirrors each one to the log
#[derive(Debug, Default)]
pub(crate) struct Warnings(Vec<ParseWarning>);

impl Warnings {
    pub fn push(&mut self, line: usize, kind: WarningKind) {
        let warning = ParseWarning::new(line, kind);
        tracing::warn!("{}", warning);
        self.0.push(warning);
    }

    pub fn into_vec(self) -> Vec<ParseWarning> {
        self.0
    }
}
