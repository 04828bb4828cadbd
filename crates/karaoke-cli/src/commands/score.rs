//! Score command for replaying recorded pitch logs.

use anyhow::{Context, Result};
use karaoke_core::{
    BeatAnalyzedEvent, PerformanceSession, SentenceAssessedEvent, Voice, load_chart,
};
use tracing::info;

use crate::config::CliConfig;
use crate::console::{format_score_console, format_sentence_line};

/// Fill in the note reference for events recorded without one
fn with_note(voice: &Voice, mut event: BeatAnalyzedEvent) -> BeatAnalyzedEvent {
    if event.note_at_beat.is_none() {
        event.note_at_beat = voice.note_at_beat(event.beat).map(|(id, _)| id);
    }
    event
}

fn read_pitch_log(path: &str) -> Result<Vec<BeatAnalyzedEvent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read pitch log {}", path))?;
    let mut events: Vec<BeatAnalyzedEvent> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse pitch log {}", path))?;
    events.sort_by_key(|e| e.beat);
    Ok(events)
}

/// Replay a pitch log through a performance session
pub fn run(
    chart_path: &str,
    pitch_log: &str,
    voice: Option<&str>,
    snapshot: Option<&str>,
    config_path: Option<&str>,
) -> Result<()> {
    let config = CliConfig::load(config_path)?;
    let chart = load_chart(chart_path)?.chart;
    let events = read_pitch_log(pitch_log)?;
    info!("Replaying {} beat events", events.len());

    let mut session = PerformanceSession::for_chart(&chart, voice, config.scoring)?;
    let voice = session.voice().clone();

    let print_sentences = |completed: Vec<SentenceAssessedEvent>| {
        for event in completed {
            let lyrics = voice
                .sentence(event.sentence_id)
                .map(|s| s.text())
                .unwrap_or_default();
            println!("{}", format_sentence_line(&lyrics, &event));
        }
    };

    for event in events {
        let event = with_note(&voice, event);
        print_sentences(session.process(&event));
    }
    print_sentences(session.finish());

    println!("{}", format_score_console(&chart, voice.name(), &session.breakdown()));

    if let Some(snapshot_path) = snapshot {
        let json = serde_json::to_string_pretty(&session.calculator().snapshot())?;
        std::fs::write(snapshot_path, json)?;
        eprintln!("Snapshot written to: {}", snapshot_path);
    }

    Ok(())
}
