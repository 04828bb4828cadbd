//! Console output formatting with colored display

use std::fmt::Write as _;

use karaoke_core::{Chart, ParseWarning, ScoreBreakdown, SentenceAssessedEvent, SentenceRating};
use owo_colors::OwoColorize;

/// Format a score breakdown for console display.
///
/// Returns a multi-line string with a boxed format.
pub fn format_score_console(chart: &Chart, voice: &str, breakdown: &ScoreBreakdown) -> String {
    let mut output = String::new();

    let voice_label = if voice.is_empty() {
        String::new()
    } else {
        format!(" [{}]", voice)
    };
    let title = format!("  {} - {}{}", chart.artist(), chart.title().bold(), voice_label);
    let border_width = (chart.artist().len() + chart.title().len() + voice_label.len() + 6).max(40);
    let border = "━".repeat(border_width);
    let border_dim = border.dimmed();

    let _ = writeln!(output, "{}", border_dim);
    let _ = writeln!(output, "{}", title);
    let _ = writeln!(output, "{}", border_dim);
    let _ = writeln!(
        output,
        "  NORMAL : {} / {}",
        breakdown.normal.cyan(),
        breakdown.max_normal
    );
    let _ = writeln!(
        output,
        "  GOLDEN : {} / {}",
        breakdown.golden.truecolor(255, 200, 0),
        breakdown.max_golden
    );
    let _ = writeln!(
        output,
        "  BONUS  : {} / {}",
        breakdown.bonus.green(),
        breakdown.max_bonus
    );
    if breakdown.mod_score != 0 {
        let _ = writeln!(output, "  MOD    : {:+}", breakdown.mod_score);
    }
    let _ = writeln!(output, "  TOTAL  : {}", breakdown.total.bold());
    let _ = write!(output, "{}", border_dim);

    output
}

/// One line per assessed sentence
pub fn format_sentence_line(voice_lyrics: &str, event: &SentenceAssessedEvent) -> String {
    format!(
        "  {:>5}-{:<5} {:<8} {}",
        event.min_beat,
        event.max_beat,
        format_colored_rating(&event.rating),
        voice_lyrics.trim()
    )
}

/// Format rating with color
pub fn format_colored_rating(rating: &SentenceRating) -> String {
    let name = rating.as_str();
    match rating {
        SentenceRating::Perfect => name.truecolor(255, 200, 0).bold().to_string(),
        SentenceRating::Great => name.green().to_string(),
        SentenceRating::Good => name.cyan().to_string(),
        SentenceRating::NotBad => name.blue().to_string(),
        SentenceRating::Bad => name.purple().to_string(),
        SentenceRating::Awful => name.red().to_string(),
    }
}

pub fn format_warning(warning: &ParseWarning) -> String {
    format!("  {} {}", "warning:".yellow(), warning)
}
