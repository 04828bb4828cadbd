use encoding_rs::Encoding;
use tracing::debug;

use crate::chart::ChartHeader;
use crate::error::{ParseError, ParseErrorKind};

use super::warning::{WarningKind, Warnings};

/// Result of the header pass
#[derive(Debug)]
pub(crate) struct HeaderSection {
    pub header: ChartHeader,
    /// Display names per voice (`P1` -> "Alice"), first declaration wins
    pub voice_names: Vec<(String, String)>,
    /// Declared encoding and the line declaring it
    pub declared_encoding: Option<(&'static Encoding, usize)>,
    /// Index of the first line after the header
    pub body_start: usize,
}

/// Fields captured during the header loop itself
#[derive(Debug, Default)]
struct RequiredFields {
    artist: Option<String>,
    bpm: Option<f64>,
    audio_path: Option<String>,
    title: Option<String>,
    preview_start: Option<f64>,
    preview_end: Option<f64>,
}

pub(crate) fn parse_header(
    lines: &[&str],
    warnings: &mut Warnings,
) -> Result<HeaderSection, ParseError> {
    let mut required = RequiredFields::default();
    let mut voice_names: Vec<(String, String)> = Vec::new();
    let mut declared_encoding = None;
    // key, value, line
    let mut other_fields: Vec<(String, String, usize)> = Vec::new();

    let mut body_start = lines.len();
    for (index, raw) in lines.iter().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let Some(content) = line.strip_prefix('#') else {
            body_start = index;
            break;
        };

        let Some((key, value)) = content.split_once(':') else {
            warnings.push(line_no, WarningKind::MalformedHeader(line.to_string()));
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            warnings.push(line_no, WarningKind::MalformedHeader(line.to_string()));
            continue;
        }

        if key == "encoding" {
            if declared_encoding.is_none() {
                declared_encoding = resolve_encoding(value, line_no, warnings)
                    .map(|encoding| (encoding, line_no));
            }
            continue;
        }

        if let Some(voice) = voice_name_key(&key) {
            if voice_names.iter().any(|(v, _)| *v == voice) {
                debug!("Ignoring repeated display name for voice {}", voice);
            } else {
                voice_names.push((voice, value.to_string()));
            }
            continue;
        }

        if capture_required(&mut required, &key, value, line_no, warnings)? {
            continue;
        }

        if other_fields.iter().any(|(k, _, _)| *k == key) {
            return Err(ParseError::new(line_no, ParseErrorKind::DuplicateHeader(key)));
        }
        other_fields.push((key, value.to_string(), line_no));
    }

    let missing = |name| ParseError::new(body_start, ParseErrorKind::MissingRequiredField(name));
    let mut header = ChartHeader {
        artist: required.artist.ok_or_else(|| missing("ARTIST"))?,
        bpm: required.bpm.ok_or_else(|| missing("BPM"))?,
        audio_path: required.audio_path.ok_or_else(|| missing("MP3"))?,
        title: required.title.ok_or_else(|| missing("TITLE"))?,
        preview_start: required.preview_start,
        preview_end: required.preview_end,
        ..Default::default()
    };

    for (key, value, line_no) in other_fields {
        assign_optional(&mut header, key, value)
            .map_err(|kind| ParseError::new(line_no, kind))?;
    }

    Ok(HeaderSection {
        header,
        voice_names,
        declared_encoding,
        body_start,
    })
}

/// Store one of the fields with a dedicated slot.
///
/// Returns `Ok(false)` when the key has no dedicated slot.
fn capture_required(
    required: &mut RequiredFields,
    key: &str,
    value: &str,
    line_no: usize,
    warnings: &mut Warnings,
) -> Result<bool, ParseError> {
    let number = |field: &str| {
        parse_number(field, value).map_err(|kind| ParseError::new(line_no, kind))
    };

    let already_set = match key {
        "artist" => set_once(&mut required.artist, || Ok(value.to_string()))?,
        "title" => set_once(&mut required.title, || Ok(value.to_string()))?,
        "mp3" => set_once(&mut required.audio_path, || Ok(value.to_string()))?,
        "bpm" => set_once(&mut required.bpm, || number(key))?,
        "previewstart" => set_once(&mut required.preview_start, || number(key))?,
        _ if key.starts_with("previewend") => set_once(&mut required.preview_end, || number(key))?,
        _ => return Ok(false),
    };

    if already_set {
        warnings.push(line_no, WarningKind::RepeatedHeader(key.to_string()));
    }
    Ok(true)
}

/// Fill `slot` if empty. Returns whether it was already set.
fn set_once<T>(
    slot: &mut Option<T>,
    value: impl FnOnce() -> Result<T, ParseError>,
) -> Result<bool, ParseError> {
    if slot.is_some() {
        return Ok(true);
    }
    *slot = Some(value()?);
    Ok(false)
}

fn assign_optional(
    header: &mut ChartHeader,
    key: String,
    value: String,
) -> Result<(), ParseErrorKind> {
    match key.as_str() {
        "gap" => header.gap = Some(parse_number(&key, &value)?),
        "videogap" => header.video_gap = Some(parse_number(&key, &value)?),
        "start" => header.start = Some(parse_number(&key, &value)?),
        "end" => header.end = Some(parse_number(&key, &value)?),
        "medleystartbeat" => header.medley_start_beat = Some(parse_beat(&key, &value)?),
        "medleyendbeat" => header.medley_end_beat = Some(parse_beat(&key, &value)?),
        "video" => header.video = Some(value),
        "background" => header.background = Some(value),
        "cover" => header.cover = Some(value),
        "genre" => header.genre = Some(value),
        "language" => header.language = Some(value),
        "year" => header.year = Some(value),
        "edition" => header.edition = Some(value),
        "creator" => header.creator = Some(value),
        "version" => header.version = Some(value),
        _ => header.unknown_fields.push((key, value)),
    }
    Ok(())
}

/// `p1` and `duetsingerp1` name voice `P1`
fn voice_name_key(key: &str) -> Option<String> {
    let digits = key
        .strip_prefix("duetsingerp")
        .or_else(|| key.strip_prefix('p'))?;
    let mut chars = digits.chars();
    match (chars.next(), chars.next()) {
        (Some(d), None) if d.is_ascii_digit() => Some(format!("P{}", d)),
        _ => None,
    }
}

fn resolve_encoding(
    value: &str,
    line_no: usize,
    warnings: &mut Warnings,
) -> Option<&'static Encoding> {
    if value.eq_ignore_ascii_case("auto") {
        return None;
    }
    let label = if value.eq_ignore_ascii_case("utf8") {
        "UTF-8"
    } else {
        value
    };
    let encoding = Encoding::for_label(label.as_bytes());
    if encoding.is_none() {
        warnings.push(line_no, WarningKind::UnknownEncoding(value.to_string()));
    }
    encoding
}

/// Parse a header number, accepting `,` as decimal separator
pub(crate) fn parse_number(field: &str, value: &str) -> Result<f64, ParseErrorKind> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseErrorKind::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        })
}

fn parse_beat(field: &str, value: &str) -> Result<i32, ParseErrorKind> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| ParseErrorKind::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        })
}
