//! Format command for rewriting charts canonically.

use anyhow::Result;
use karaoke_core::{load_chart, save_chart, write_chart};

/// Parse a chart and write it back in canonical form
pub fn run(file: &str, output: Option<&str>) -> Result<()> {
    let parsed = load_chart(file)?;
    if !parsed.warnings.is_empty() {
        eprintln!(
            "{} warning(s) while reading {}, output may differ from input",
            parsed.warnings.len(),
            file
        );
    }

    if let Some(output_path) = output {
        save_chart(output_path, &parsed.chart)?;
        eprintln!("Formatted to: {}", output_path);
    } else {
        print!("{}", write_chart(&parsed.chart)?);
    }

    Ok(())
}
