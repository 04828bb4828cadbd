//! Loading and saving chart files.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::chart::Chart;
use crate::config::ParseOptions;
use crate::error::{Error, Result};
use crate::parser::{ParseWarning, ParsedChart, parse_chart_bytes};
use crate::writer::write_chart;

/// Read and parse a chart file with default options
pub fn load_chart<P: AsRef<Path>>(path: P) -> Result<ParsedChart> {
    load_chart_with(path, ParseOptions::default())
}

pub fn load_chart_with<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<ParsedChart> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let mut parsed = parse_chart_bytes(&bytes, options).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        "Loaded {:?}: {} voice(s), {} warning(s)",
        path,
        parsed.chart.voices().len(),
        parsed.warnings.len()
    );
    parsed.chart.set_path(Some(path.to_path_buf()));
    Ok(parsed)
}

/// Write a chart as UTF-8 text
pub fn save_chart<P: AsRef<Path>>(path: P, chart: &Chart) -> Result<()> {
    let text = write_chart(chart)?;
    fs::write(path.as_ref(), text)?;
    info!("Saved chart to {:?}", path.as_ref());
    Ok(())
}

impl Chart {
    /// Re-read the chart from the file it was loaded from.
    ///
    /// On failure the chart is left unchanged.
    pub fn reload(&mut self) -> Result<Vec<ParseWarning>> {
        let path = self.path().ok_or(Error::NotLoadedFromFile)?.to_path_buf();
        let parsed = load_chart(&path)?;
        self.replace_contents(parsed.chart);
        Ok(parsed.warnings)
    }
}
