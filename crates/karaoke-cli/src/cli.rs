//! CLI argument definitions for karaoke.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "karaoke")]
#[command(about = "Karaoke chart checker and performance scorer", version)]
pub struct Args {
    /// Scoring configuration (TOML)
    #[arg(long, global = true, value_name = "FILE", env = "KARAOKE_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse charts and report errors and warnings
    Check {
        /// Chart files
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Show chart metadata and statistics
    Info {
        /// Chart file
        file: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rewrite a chart in canonical form
    Format {
        /// Chart file
        file: String,
        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Replay a recorded pitch log and score it
    Score {
        /// Chart file
        chart: String,
        /// Pitch log (JSON array of beat events)
        pitch_log: String,
        /// Voice to score (P1, P2, ...; defaults to the first voice)
        #[arg(long)]
        voice: Option<String>,
        /// Write the final score snapshot to this file (JSON)
        #[arg(long, value_name = "FILE")]
        snapshot: Option<String>,
    },
}
