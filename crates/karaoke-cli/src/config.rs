//! CLI configuration file.
//!
//! ```toml
//! [scoring]
//! notes_budget = 9000
//! bonus_budget = 1000
//! perfect_sentence_threshold = 0.95
//! max_bonus_sentences = 20
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use karaoke_core::ScoreConfig;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub scoring: ScoreConfig,
}

impl CliConfig {
    /// Load from a TOML file, or defaults when no file is given
    pub fn load(path: Option<&str>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let path = Path::new(path);
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}
