//! Info command for showing chart metadata.

use anyhow::Result;
use karaoke_core::{BeatTiming, Chart, load_chart};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ChartInfo<'a> {
    title: &'a str,
    artist: &'a str,
    bpm: f64,
    gap: Option<f64>,
    hash: &'a str,
    duration_secs: f64,
    medley: Option<String>,
    warnings: usize,
    voices: Vec<VoiceInfo<'a>>,
}

#[derive(Debug, Serialize)]
struct VoiceInfo<'a> {
    name: &'a str,
    display_name: Option<&'a str>,
    sentences: usize,
    notes: usize,
    first_beat: Option<i32>,
    last_beat: Option<i32>,
}

fn chart_info(chart: &Chart, warnings: usize) -> ChartInfo<'_> {
    let voices: Vec<VoiceInfo> = chart
        .voices()
        .iter()
        .map(|voice| VoiceInfo {
            name: voice.name(),
            display_name: voice.display_name(),
            sentences: voice.sentences().len(),
            notes: voice.note_count(),
            first_beat: voice.min_beat(),
            last_beat: voice.max_beat(),
        })
        .collect();
    let last_beat = voices.iter().filter_map(|v| v.last_beat).max().unwrap_or(0);

    ChartInfo {
        title: chart.title(),
        artist: chart.artist(),
        bpm: chart.bpm(),
        gap: chart.header().gap,
        hash: chart.hash(),
        duration_secs: chart.timing().beat_to_millis(last_beat as f64) / 1000.0,
        medley: chart.medley_range().map(|r| r.to_string()),
        warnings,
        voices,
    }
}

/// Print chart metadata
pub fn run(file: &str, json: bool) -> Result<()> {
    let parsed = load_chart(file)?;
    let info = chart_info(&parsed.chart, parsed.warnings.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{} - {}", info.artist, info.title);
    println!("  BPM      : {}", info.bpm);
    if let Some(gap) = info.gap {
        println!("  GAP      : {} ms", gap);
    }
    println!("  HASH     : {}", info.hash);
    println!("  DURATION : {:.1} s", info.duration_secs);
    if let Some(medley) = &info.medley {
        println!("  MEDLEY   : {}", medley);
    }
    if info.warnings > 0 {
        println!("  WARNINGS : {}", info.warnings);
    }
    for voice in &info.voices {
        let name = if voice.name.is_empty() { "solo" } else { voice.name };
        match voice.display_name {
            Some(display) => println!(
                "  {} ({}): {} sentences, {} notes",
                name, display, voice.sentences, voice.notes
            ),
            None => println!("  {}: {} sentences, {} notes", name, voice.sentences, voice.notes),
        }
    }

    Ok(())
}
