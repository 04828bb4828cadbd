use std::path::PathBuf;

use thiserror::Error;

/// Reason a chart could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("Missing required header field #{0}")]
    MissingRequiredField(&'static str),

    #[error("Duplicate header field #{0}")]
    DuplicateHeader(String),

    #[error("Incomplete note: '{0}'")]
    IncompleteNote(String),

    #[error("Unknown note type '{0}'")]
    UnknownNoteType(char),

    #[error("Note at beat {start_beat} overlaps with existing sentence ending at beat {sentence_end}")]
    NoteOverlapsSentence { start_beat: i32, sentence_end: i32 },

    #[error(
        "Sentence starting at beat {start_beat} conflicts with linebreak of previous sentence at beat {linebreak_beat}"
    )]
    LinebreakConflict { start_beat: i32, linebreak_beat: i32 },

    #[error("Invalid number for {field}: '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("Invalid instruction: '{0}'")]
    InvalidInstruction(String),

    #[error(
        "File declares encoding {declared} but the text was decoded as {current} and no restart is left"
    )]
    EncodingMismatch { declared: String, current: String },
}

/// Hard parse error with the 1-based line it was detected on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to parse chart {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Song does not contain any notes")]
    NoNotes,

    #[error("Chart was not loaded from a file")]
    NotLoadedFromFile,

    #[error("Voice not found: {0}")]
    VoiceNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_includes_line() {
        let err = ParseError::new(
            7,
            ParseErrorKind::InvalidNumber {
                field: "previewstart".to_string(),
                value: "abc".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "line 7: Invalid number for previewstart: 'abc'"
        );
    }

    #[test]
    fn test_file_error_display_includes_path() {
        let err = Error::Parse {
            path: PathBuf::from("songs/a.txt"),
            source: ParseError::new(1, ParseErrorKind::UnknownNoteType('X')),
        };
        assert_eq!(
            err.to_string(),
            "Failed to parse chart songs/a.txt: line 1: Unknown note type 'X'"
        );
    }
}
