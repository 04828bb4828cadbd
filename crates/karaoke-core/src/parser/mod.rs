//! Chart text parser.
//!
//! Parsing runs in two passes over the lines of a chart:
//! 1. `header` - `#KEY:value` lines until the first other line
//! 2. `body` - a state machine over note, linebreak, voice and end lines
//!
//! Hard errors abort with a [`ParseError`]; recoverable problems are returned
//! as [`ParseWarning`]s next to the chart.

mod body;
mod header;
mod warning;

pub use warning::{ParseWarning, WarningKind};

use encoding_rs::Encoding;
use tracing::debug;

use crate::chart::Chart;
use crate::config::ParseOptions;
use crate::error::{ParseError, ParseErrorKind};

use body::BodyParser;
use header::parse_header;
use warning::Warnings;

/// A successfully parsed chart and the problems that were tolerated
#[derive(Debug, Clone)]
pub struct ParsedChart {
    pub chart: Chart,
    pub warnings: Vec<ParseWarning>,
}

/// Outcome of one pass over the decoded text
enum Pass {
    Done(ParsedChart),
    Restart {
        encoding: &'static Encoding,
        line: usize,
    },
}

/// Parse already decoded chart text.
///
/// `#ENCODING` declarations are ignored since the text is decoded already.
pub fn parse_chart(text: &str) -> Result<ParsedChart, ParseError> {
    match parse_pass(text, None, false)? {
        Pass::Done(parsed) => Ok(parsed),
        // no current encoding means no restart is ever requested
        Pass::Restart { line, .. } => unreachable!("restart requested at line {line} without encoding"),
    }
}

/// Decode and parse chart bytes.
///
/// A BOM overrides both `options.encoding` and any `#ENCODING` declaration.
/// Without one, a header declaring a different encoding makes the bytes
/// decoded again and parsing start over, at most
/// `options.max_encoding_restarts` times.
pub fn parse_chart_bytes(bytes: &[u8], options: ParseOptions) -> Result<ParsedChart, ParseError> {
    let bom = Encoding::for_bom(bytes).map(|(encoding, _)| encoding);
    let mut encoding = bom.unwrap_or(options.encoding);
    let mut restarts = 0;

    loop {
        let (text, used_encoding, had_errors) = encoding.decode(bytes);
        if had_errors {
            debug!("Chart is not valid {}, replaced invalid bytes", used_encoding.name());
        }

        match parse_pass(&text, Some(used_encoding), bom.is_some())? {
            Pass::Done(parsed) => return Ok(parsed),
            Pass::Restart {
                encoding: declared,
                line,
            } => {
                if restarts >= options.max_encoding_restarts {
                    return Err(ParseError::new(
                        line,
                        ParseErrorKind::EncodingMismatch {
                            declared: declared.name().to_string(),
                            current: used_encoding.name().to_string(),
                        },
                    ));
                }
                debug!(
                    "Chart declares encoding {}, re-reading (was {})",
                    declared.name(),
                    used_encoding.name()
                );
                restarts += 1;
                encoding = declared;
            }
        }
    }
}

/// `current` is the encoding the text was decoded with, if any. A declaration
/// that disagrees with it requests a restart unless `bom` pinned the encoding.
fn parse_pass(
    text: &str,
    current: Option<&'static Encoding>,
    bom: bool,
) -> Result<Pass, ParseError> {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    let lines: Vec<&str> = text.lines().collect();
    let mut warnings = Warnings::default();

    let section = parse_header(&lines, &mut warnings)?;
    if let (Some(current), Some((declared, line))) = (current, section.declared_encoding)
        && declared != current
    {
        if !bom {
            return Ok(Pass::Restart {
                encoding: declared,
                line,
            });
        }
        warnings.push(
            line,
            WarningKind::EncodingOverriddenByBom {
                declared: declared.name().to_string(),
                bom: current.name().to_string(),
            },
        );
    }

    let body_lines = &lines[section.body_start..];
    let hash = content_hash(body_lines);

    let mut voices = BodyParser::new(&mut warnings).parse(body_lines, section.body_start + 1)?;
    for voice in &mut voices {
        let display_name = section
            .voice_names
            .iter()
            .find(|(name, _)| name == voice.name())
            .map(|(_, display)| display.clone());
        voice.set_display_name(display_name);
    }

    Ok(Pass::Done(ParsedChart {
        chart: Chart::new(section.header, hash, voices),
        warnings: warnings.into_vec(),
    }))
}

/// CRC-32 over the body lines joined without line terminators
pub fn content_hash(body_lines: &[&str]) -> String {
    let mut hasher = crc32fast::Hasher::new();
    for line in body_lines {
        hasher.update(line.as_bytes());
    }
    format!("{:08x}", hasher.finalize())
}
