mod cli;
mod commands;
mod config;
mod console;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Default to warn when RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("karaoke=warn,karaoke_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Check { files } => commands::check::run(&files),
        Command::Info { file, json } => commands::info::run(&file, json),
        Command::Format { file, output } => commands::format::run(&file, output.as_deref()),
        Command::Score {
            chart,
            pitch_log,
            voice,
            snapshot,
        } => commands::score::run(
            &chart,
            &pitch_log,
            voice.as_deref(),
            snapshot.as_deref(),
            args.config.as_deref(),
        ),
    }
}
