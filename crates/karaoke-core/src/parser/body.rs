use tracing::debug;

use crate::chart::{Note, NoteType, Sentence, Voice};
use crate::config::parser::IMPLICIT_LINEBREAK_OFFSET;
use crate::error::{ParseError, ParseErrorKind};

use super::warning::{WarningKind, Warnings};

/// Line-driven state machine turning body lines into voices
pub(crate) struct BodyParser<'w> {
    voices: Vec<Voice>,
    current: usize,
    sentence: Option<Sentence>,
    explicit_voices: bool,
    warnings: &'w mut Warnings,
}

impl<'w> BodyParser<'w> {
    pub fn new(warnings: &'w mut Warnings) -> Self {
        Self {
            voices: vec![Voice::solo()],
            current: 0,
            sentence: None,
            explicit_voices: false,
            warnings,
        }
    }

    /// Feed all body lines. `first_line_no` is the 1-based number of `lines[0]`.
    pub fn parse(mut self, lines: &[&str], first_line_no: usize) -> Result<Vec<Voice>, ParseError> {
        let mut last_line_no = first_line_no;
        for (offset, raw) in lines.iter().enumerate() {
            let line_no = first_line_no + offset;
            last_line_no = line_no;
            let line = raw.trim_start();
            let Some(first) = line.chars().next() else {
                continue;
            };

            match first {
                '#' => {}
                'P' => self.switch_voice(line, line_no)?,
                ':' | '*' | 'F' | 'R' | 'G' => {
                    let note = parse_note(line).map_err(|kind| ParseError::new(line_no, kind))?;
                    self.add_note(note, line_no)?;
                }
                '-' => self.close_sentence(line, line_no)?,
                'E' => {
                    debug!("End of chart at line {}", line_no);
                    self.flush_sentence(line_no)?;
                    return Ok(self.voices);
                }
                _ => {
                    return Err(ParseError::new(
                        line_no,
                        ParseErrorKind::InvalidInstruction(line.trim_end().to_string()),
                    ));
                }
            }
        }

        self.flush_sentence(last_line_no)?;
        Ok(self.voices)
    }

    fn switch_voice(&mut self, line: &str, line_no: usize) -> Result<(), ParseError> {
        let token: String = line[1..].chars().filter(|c| !c.is_whitespace()).collect();
        if token.is_empty() {
            return Err(ParseError::new(
                line_no,
                ParseErrorKind::InvalidInstruction(line.trim_end().to_string()),
            ));
        }
        let name = format!("P{}", token);

        self.flush_sentence(line_no)?;

        if !self.explicit_voices {
            self.explicit_voices = true;
            let solo = self.voices.remove(0);
            if !solo.sentences().is_empty() {
                self.warnings.push(
                    line_no,
                    WarningKind::SoloVoiceDiscarded(solo.sentences().len()),
                );
            }
        }

        self.current = match self.voices.iter().position(|v| v.name() == name) {
            Some(index) => index,
            None => {
                debug!("New voice {} at line {}", name, line_no);
                self.voices.push(Voice::new(name));
                self.voices.len() - 1
            }
        };
        Ok(())
    }

    fn add_note(&mut self, note: Note, line_no: usize) -> Result<(), ParseError> {
        let sentence = self.sentence.get_or_insert_with(Sentence::new);
        sentence.add_note(note).map_err(|overlap| {
            ParseError::new(
                line_no,
                ParseErrorKind::NoteOverlapsSentence {
                    start_beat: overlap.start_beat,
                    sentence_end: overlap.sentence_end,
                },
            )
        })
    }

    /// Handle `- <start> [<end>]`
    fn close_sentence(&mut self, line: &str, line_no: usize) -> Result<(), ParseError> {
        let value = line[1..].split_whitespace().next().unwrap_or_default();
        let given = value.parse::<i32>().map_err(|_| {
            ParseError::new(
                line_no,
                ParseErrorKind::InvalidNumber {
                    field: "linebreak".to_string(),
                    value: value.to_string(),
                },
            )
        })?;

        let Some(mut sentence) = self.sentence.take() else {
            self.warnings.push(line_no, WarningKind::DanglingLinebreak);
            return Ok(());
        };

        let linebreak = if given < sentence.max_beat() {
            let corrected = sentence.max_beat().saturating_add(1);
            self.warnings
                .push(line_no, WarningKind::LinebreakCorrected { given, corrected });
            corrected
        } else {
            given
        };
        sentence.set_linebreak_beat(linebreak);
        self.append_sentence(sentence, line_no)
    }

    /// Close the open sentence without an explicit linebreak
    fn flush_sentence(&mut self, line_no: usize) -> Result<(), ParseError> {
        if let Some(mut sentence) = self.sentence.take() {
            let linebreak = sentence.max_beat().saturating_add(IMPLICIT_LINEBREAK_OFFSET);
            sentence.set_linebreak_beat(linebreak);
            self.append_sentence(sentence, line_no)?;
        }
        Ok(())
    }

    /// Append with the ordering policy: overlapping sentences are dropped,
    /// sentences starting inside the previous linebreak are rejected.
    fn append_sentence(&mut self, sentence: Sentence, line_no: usize) -> Result<(), ParseError> {
        let voice = &mut self.voices[self.current];
        if let Some(previous) = voice.last_sentence() {
            let start_beat = sentence.min_beat();
            if start_beat < previous.max_beat() {
                self.warnings.push(
                    line_no,
                    WarningKind::SentenceDropped {
                        start_beat,
                        previous_end: previous.max_beat(),
                    },
                );
                return Ok(());
            }
            if start_beat < previous.linebreak_beat() {
                return Err(ParseError::new(
                    line_no,
                    ParseErrorKind::LinebreakConflict {
                        start_beat,
                        linebreak_beat: previous.linebreak_beat(),
                    },
                ));
            }
        }
        voice.push_sentence(sentence);
        Ok(())
    }
}

/// Parse `<prefix> <start> <length> <pitch> <text>`.
///
/// The text is everything after the single separator following the pitch,
/// so leading spaces in lyrics survive.
pub(crate) fn parse_note(line: &str) -> Result<Note, ParseErrorKind> {
    let incomplete = || ParseErrorKind::IncompleteNote(line.trim_end().to_string());

    let prefix = line.chars().next().ok_or_else(incomplete)?;
    let note_type = NoteType::from_prefix(prefix).ok_or(ParseErrorKind::UnknownNoteType(prefix))?;

    let mut rest = &line[prefix.len_utf8()..];
    let mut numbers = [0i32; 3];
    for (slot, field) in numbers.iter_mut().zip(["start beat", "length", "pitch"]) {
        rest = rest.trim_start();
        if rest.is_empty() {
            return Err(incomplete());
        }
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let token = &rest[..end];
        *slot = token.parse().map_err(|_| ParseErrorKind::InvalidNumber {
            field: field.to_string(),
            value: token.to_string(),
        })?;
        rest = &rest[end..];
    }

    let mut chars = rest.chars();
    let text = match chars.next() {
        Some(separator) if separator.is_whitespace() => chars.as_str(),
        _ => return Err(incomplete()),
    };

    let [start_beat, length, pitch] = numbers;
    if length <= 0 {
        return Err(incomplete());
    }
    if start_beat.checked_add(length).is_none() {
        return Err(ParseErrorKind::InvalidNumber {
            field: "length".to_string(),
            value: length.to_string(),
        });
    }

    Ok(Note::new(note_type, start_beat, length, pitch, text))
}
