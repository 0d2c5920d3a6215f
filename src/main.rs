//! Headless runner for the sidecraft world simulation.

mod config;
mod headless;
mod scripted_input;

use anyhow::{Context, Result};
use clap::Parser;
use headless::HeadlessConfig;
use scripted_input::ScriptedInputPlayer;
use sidecraft_testkit::JsonlSink;
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_TICKS: u64 = 600;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless side-scrolling block world runner", long_about = None)]
struct Args {
    /// TOML configuration file (defaults to config/sidecraft.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the world seed from the configuration
    #[arg(long)]
    seed: Option<u64>,

    /// Number of simulation steps; defaults to the script length, or 600
    #[arg(long)]
    ticks: Option<u64>,

    /// JSON input script to play back
    #[arg(long)]
    script: Option<PathBuf>,

    /// Write a JSONL record of every step to this path
    #[arg(long)]
    event_log: Option<PathBuf>,

    /// Save the effective configuration to this path and continue
    #[arg(long)]
    write_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    info!("Starting sidecraft v{}", env!("CARGO_PKG_VERSION"));

    let mut sim = match &args.config {
        Some(path) => config::load_strict(path)?,
        None => config::load_from_path(Path::new(config::DEFAULT_CONFIG_PATH)),
    };
    if let Some(seed) = args.seed {
        sim.seed = seed;
    }
    if let Some(path) = &args.write_config {
        config::save_to_path(&sim, path)
            .with_context(|| format!("Failed to save config to {}", path.display()))?;
    }

    let script = args
        .script
        .as_deref()
        .map(ScriptedInputPlayer::from_path)
        .transpose()?;
    let ticks = args
        .ticks
        .or_else(|| script.as_ref().map(ScriptedInputPlayer::total_ticks))
        .unwrap_or(DEFAULT_TICKS);
    let event_log = args.event_log.as_deref().map(JsonlSink::create).transpose()?;

    let summary = headless::run(HeadlessConfig {
        sim,
        script,
        ticks,
        event_log,
    })?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
