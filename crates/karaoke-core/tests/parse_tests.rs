//! Integration tests for chart parsing and writing
//!
//! These tests go through the public API only: text in, chart and warnings out,
//! and back to text.

use karaoke_core::chart::{NoteType, Voice};
use karaoke_core::error::ParseErrorKind;
use karaoke_core::parser::{WarningKind, parse_chart};
use karaoke_core::writer::write_chart;

const HEADER: &str = "#ARTIST:A\n#BPM:100\n#MP3:a.mp3\n#TITLE:T\n";

fn chart_text(body: &str) -> String {
    format!("{HEADER}{body}")
}

fn assert_well_formed(voice: &Voice) {
    for sentence in voice.sentences() {
        for pair in sentence.notes().windows(2) {
            assert!(pair[0].end_beat() <= pair[1].start_beat);
        }
    }
    for pair in voice.sentences().windows(2) {
        assert!(pair[0].max_beat() <= pair[1].min_beat());
    }
}

/// Charts covering the body syntax
fn sample_charts() -> Vec<String> {
    vec![
        chart_text(": 0 4 60 Hel-\n: 4 4 62 lo\n- 8\nE\n"),
        chart_text(
            ": 0 2 60 one\n* 2 2 62 two \nF 4 1 0 ~\n- 6\nR 6 2 0 rap\nG 8 2 0 gold\n- 12 14\n: 12 3 57 end\nE\n",
        ),
        format!(
            "{HEADER}#P1:Alice\n#DUETSINGERP2:Bob\nP1\n: 0 2 60 a\n- 3\n: 4 2 61 b\nP2\n: 1 2 55 c\n- 4\n: 6 1 55 d\nE\n"
        ),
        chart_text(": 0 2 60 open end\n: 2 2 60 without linebreak\n"),
    ]
}

mod parse_scenarios {
    use super::*;

    #[test]
    fn test_example_chart() {
        let parsed = parse_chart(&chart_text(": 0 4 60 Hel-\n: 4 4 62 lo\n- 8\nE\n")).unwrap();
        let chart = parsed.chart;

        assert!(parsed.warnings.is_empty());
        assert_eq!(chart.voices().len(), 1);
        let voice = &chart.voices()[0];
        assert_eq!(voice.sentences().len(), 1);

        let sentence = &voice.sentences()[0];
        let notes = sentence.notes();
        assert_eq!(notes.len(), 2);
        assert_eq!((notes[0].start_beat, notes[1].start_beat), (0, 4));
        assert_eq!((notes[0].length, notes[1].length), (4, 4));
        assert_eq!((notes[0].pitch, notes[1].pitch), (60, 62));
        assert_eq!(notes[0].text, "Hel-");
        assert_eq!(sentence.linebreak_beat(), 8);
    }

    #[test]
    fn test_invalid_preview_start_is_hard_error() {
        let text = format!("{HEADER}#previewstart:not-a-number\n: 0 1 60 a\nE\n");
        let err = parse_chart(&text).unwrap_err();
        assert_eq!(err.line, 5);
        assert_eq!(
            err.kind,
            ParseErrorKind::InvalidNumber {
                field: "previewstart".to_string(),
                value: "not-a-number".to_string(),
            }
        );
        assert!(err.to_string().contains("previewstart"));
    }

    #[test]
    fn test_note_past_last_beat_is_hard_error() {
        let err = parse_chart(&chart_text(": 2147483647 5 60 a\nE\n")).unwrap_err();
        assert_eq!(err.line, 5);
        assert!(matches!(err.kind, ParseErrorKind::InvalidNumber { .. }));
    }

    #[test]
    fn test_early_linebreak_is_corrected() {
        let parsed = parse_chart(&chart_text(": 0 5 60 a\n- 2\n: 7 1 60 b\nE\n")).unwrap();
        let voice = &parsed.chart.voices()[0];

        assert_eq!(voice.sentences()[0].linebreak_beat(), 6);
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(
            parsed.warnings[0].kind,
            WarningKind::LinebreakCorrected {
                given: 2,
                corrected: 6
            }
        );
    }

    #[test]
    fn test_missing_required_field() {
        let err = parse_chart("#ARTIST:A\n#BPM:100\n#TITLE:T\n: 0 1 60 a\nE\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingRequiredField("MP3"));
    }

    #[test]
    fn test_lines_after_end_are_ignored() {
        let parsed = parse_chart(&chart_text(": 0 1 60 a\nE\nthis is not chart content\n")).unwrap();
        assert_eq!(parsed.chart.note_count(), 1);
    }

    #[test]
    fn test_hash_ignores_header() {
        let body = ": 0 4 60 Hel-\n: 4 4 62 lo\n- 8\nE\n";
        let first = parse_chart(&chart_text(body)).unwrap().chart;
        let second = parse_chart(&format!("#TITLE:Other\n#ARTIST:B\n#MP3:b.ogg\n#BPM:120\n{body}"))
            .unwrap()
            .chart;
        assert_eq!(first.hash(), second.hash());

        let third = parse_chart(&chart_text(": 0 4 61 Hel-\nE\n")).unwrap().chart;
        assert_ne!(first.hash(), third.hash());
    }

    #[test]
    fn test_duet_voices_and_display_names() {
        let parsed = parse_chart(&sample_charts()[2]).unwrap();
        let chart = parsed.chart;

        assert!(chart.is_duet());
        let p1 = chart.voice("P1").unwrap();
        let p2 = chart.voice("P2").unwrap();
        assert_eq!(p1.display_name(), Some("Alice"));
        assert_eq!(p2.display_name(), Some("Bob"));
        assert_eq!(p1.sentences().len(), 2);
        assert_eq!(p2.note_count(), 2);
    }

    #[test]
    fn test_note_types() {
        let chart = parse_chart(&sample_charts()[1]).unwrap().chart;
        let types: Vec<NoteType> = chart.voices()[0].notes().map(|(_, n)| n.note_type).collect();
        assert_eq!(
            types,
            vec![
                NoteType::Normal,
                NoteType::Golden,
                NoteType::Freestyle,
                NoteType::Rap,
                NoteType::RapGolden,
                NoteType::Normal,
            ]
        );
    }
}

mod structure_properties {
    use super::*;

    #[test]
    fn test_parsed_voices_are_well_formed() {
        for text in sample_charts() {
            let chart = parse_chart(&text).unwrap().chart;
            for voice in chart.voices() {
                assert_well_formed(voice);
            }
        }
    }

    #[test]
    fn test_overlapping_sentence_is_dropped() {
        let parsed = parse_chart(&chart_text(": 0 4 60 a\n- 4\n: 2 1 60 b\n- 5\n: 6 1 60 c\nE\n"))
            .unwrap();
        let voice = &parsed.chart.voices()[0];

        assert_eq!(voice.sentences().len(), 2);
        assert_well_formed(voice);
        assert!(
            parsed
                .warnings
                .iter()
                .any(|w| matches!(w.kind, WarningKind::SentenceDropped { start_beat: 2, .. }))
        );
    }

    #[test]
    fn test_sentence_before_previous_linebreak_is_error() {
        let err = parse_chart(&chart_text(": 0 4 60 a\n- 8\n: 6 1 60 b\nE\n")).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::LinebreakConflict {
                start_beat: 6,
                linebreak_beat: 8
            }
        );
    }
}

mod round_trip {
    use super::*;

    #[test]
    fn test_write_then_parse_keeps_structure() {
        for text in sample_charts() {
            let first = parse_chart(&text).unwrap().chart;
            let written = write_chart(&first).unwrap();
            let second = parse_chart(&written).unwrap().chart;

            assert_eq!(first.voices(), second.voices(), "chart:\n{text}");
            assert_eq!(first.header(), second.header());
        }
    }

    #[test]
    fn test_writing_is_idempotent() {
        for text in sample_charts() {
            let once = write_chart(&parse_chart(&text).unwrap().chart).unwrap();
            let twice = write_chart(&parse_chart(&once).unwrap().chart).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_unknown_headers_survive() {
        let text = format!("{HEADER}#GAP:1200,5\n#MYTAG:keep me\n: 0 1 60 a\nE\n");
        let chart = parse_chart(&text).unwrap().chart;
        assert_eq!(chart.header().gap, Some(1200.5));

        let written = write_chart(&chart).unwrap();
        assert!(written.contains("#MYTAG:keep me\n"));
        assert!(written.contains("#GAP:1200.5\n"));
    }
}
