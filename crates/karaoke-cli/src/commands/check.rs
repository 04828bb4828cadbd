//! Check command for validating charts.

use anyhow::{Result, bail};
use karaoke_core::load_chart;
use owo_colors::OwoColorize;

use crate::console::format_warning;

/// Parse every chart and report the outcome per file
pub fn run(files: &[String]) -> Result<()> {
    let mut failed = 0;

    for file in files {
        match load_chart(file) {
            Ok(parsed) => {
                println!(
                    "{} {} ({} notes, {} warnings)",
                    "OK".green(),
                    file,
                    parsed.chart.note_count(),
                    parsed.warnings.len()
                );
                for warning in &parsed.warnings {
                    println!("{}", format_warning(warning));
                }
            }
            Err(e) => {
                failed += 1;
                println!("{} {}", "FAILED".red(), e);
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} charts failed to parse", failed, files.len());
    }
    Ok(())
}
