//! Chart text writer.
//!
//! Produces canonical chart text that parses back to the same voices,
//! sentences and notes.

use std::fmt::Write as _;

use crate::chart::{Chart, Voice};
use crate::error::{Error, Result};

/// Serialize a chart to UltraStar text.
///
/// Fails with [`Error::NoNotes`] when no voice contains a note.
pub fn write_chart(chart: &Chart) -> Result<String> {
    if chart.voices().iter().all(|v| v.is_empty()) {
        return Err(Error::NoNotes);
    }

    let mut output = String::new();

    for (key, value) in chart.header().entries() {
        let _ = writeln!(output, "#{}:{}", key.to_uppercase(), value);
    }
    for voice in chart.voices() {
        if let Some(display_name) = voice.display_name()
            && !voice.is_solo()
        {
            let _ = writeln!(output, "#{}:{}", voice.name().to_uppercase(), display_name);
        }
    }

    let duet = chart.is_duet();
    for voice in chart.voices() {
        if duet {
            let _ = writeln!(output, "{}", voice.name());
        }
        write_voice(&mut output, voice);
    }

    output.push_str("E\n");
    Ok(output)
}

fn write_voice(output: &mut String, voice: &Voice) {
    for sentence in voice.sentences() {
        let mut notes: Vec<_> = sentence.notes().iter().filter(|n| n.length > 0).collect();
        if notes.is_empty() {
            continue;
        }
        notes.sort_by_key(|n| n.start_beat);

        for note in notes {
            let _ = writeln!(
                output,
                "{} {} {} {} {}",
                note.note_type.prefix(),
                note.start_beat,
                note.length,
                note.pitch,
                note.text
            );
        }
        let _ = writeln!(output, "- {}", sentence.extended_max_beat());
    }
}
