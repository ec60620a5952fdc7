//! # AdaptiveDrive
//!
//! Command-line front end for the contextual playlist engine.
//!
//! ## Usage
//!
//! ```bash
//! # Which mode does this context select?
//! adaptive-drive classify --speed 95 --time 23
//!
//! # Ranked playlist with the logic debugger
//! adaptive-drive generate --speed 40 --time 21.5 --weather rain --verbose
//!
//! # Follow live context updates
//! sensor-feed | adaptive-drive watch
//! ```

use adaptive_drive::catalog::Catalog;
use adaptive_drive::cli::{self, Command};
use adaptive_drive::config::RuntimeConfig;
use adaptive_drive::context::DriveContext;
use adaptive_drive::playlist::PlaylistGenerator;
use adaptive_drive::{completion, report, session};
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Catalog from the command line flag, else the config, else the built-in set.
fn resolve_catalog(flag: Option<PathBuf>, config: &RuntimeConfig) -> Result<Catalog> {
    let path = flag.or_else(|| config.catalog_path.clone());
    if path.is_none() {
        debug!("No catalog configured, using built-in demo catalog");
    }
    Catalog::load_or_builtin(path.as_deref())
}

fn build_generator<'a>(catalog: &'a Catalog, config: &RuntimeConfig) -> PlaylistGenerator<'a> {
    PlaylistGenerator::new(catalog.tracks())
        .with_thresholds(config.thresholds)
        .with_policy(config.weather.clone())
}

fn load_config(path: Option<&Path>) -> Result<RuntimeConfig> {
    match path {
        Some(path) => RuntimeConfig::load_from(path),
        None => RuntimeConfig::load(),
    }
}

/// Main entry point for AdaptiveDrive.
///
/// Logging is controlled via `RUST_LOG`:
/// - `RUST_LOG=debug adaptive-drive generate` - Mode and group sizes
/// - `RUST_LOG=adaptive_drive::algorithm=trace adaptive-drive generate` - Per-track scores
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();
    let config = load_config(args.config.as_deref())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Classify { context } => {
            let context = DriveContext::from(&context);
            let mode = config.thresholds.classify(&context);
            info!("Classified {context}");
            writeln!(out, "{mode}")?;
        }
        Command::Generate { context, catalog, verbose, json } => {
            let context = DriveContext::from(&context);
            let catalog = resolve_catalog(catalog, &config)?;
            let generator = build_generator(&catalog, &config);
            let playlist = generator.generate(&context);

            if json {
                serde_json::to_writer_pretty(&mut out, &playlist)?;
                writeln!(out)?;
            } else {
                if verbose {
                    report::write_debugger(&mut out, &context, &playlist)?;
                    writeln!(out)?;
                }
                report::write_playlist(&mut out, &playlist)?;
            }
        }
        Command::Watch { catalog, settle_ms } => {
            let catalog = resolve_catalog(catalog, &config)?;
            let generator = build_generator(&catalog, &config);
            let window = settle_ms.map_or_else(|| config.settle_window(), Duration::from_millis);

            let evaluated = session::watch(io::BufReader::new(io::stdin()), &mut out, &generator, window)?;
            info!("Input closed after {evaluated} evaluations");
        }
        Command::Batch { input, catalog } => {
            let content = fs::read_to_string(&input)
                .with_context(|| format!("Failed to read contexts from {}", input.display()))?;
            let contexts: Vec<DriveContext> = serde_json::from_str(&content)
                .with_context(|| format!("{} is not a JSON array of contexts", input.display()))?;

            let catalog = resolve_catalog(catalog, &config)?;
            let generator = build_generator(&catalog, &config);

            info!("Evaluating {} contexts", contexts.len());
            for (context, playlist) in contexts.iter().zip(generator.generate_batch(&contexts)) {
                report::write_debugger(&mut out, context, &playlist)?;
                report::write_playlist(&mut out, &playlist)?;
                writeln!(out)?;
            }
        }
        Command::Catalog { catalog } => {
            let catalog = resolve_catalog(catalog, &config)?;
            for track in catalog.tracks() {
                writeln!(
                    out,
                    "{:>4}  {} - {} [{}] {}",
                    track.id,
                    track.artist,
                    track.title,
                    track.track_type,
                    track.duration_label()
                )?;
            }
        }
        Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::write_completions(completion::shell_to_completion_shell(&shell), &mut cmd, &mut out);
        }
    }

    Ok(())
}
