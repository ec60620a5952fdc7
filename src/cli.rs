//! # Command-Line Interface Module
//!
//! Defines the `adaptive-drive` command line using Clap derive macros.
//!
//! ## Commands
//!
//! - `classify`: Print the operating mode for a context
//! - `generate`: Print the ranked playlist for a context
//! - `watch`: Read JSON contexts from stdin, debounce, print playlists
//! - `batch`: Evaluate a JSON array of contexts
//! - `catalog`: List the catalog
//! - `completion`: Generate shell completions
//!
//! ## Examples
//!
//! ```bash
//! adaptive-drive classify --speed 95 --time 23
//! adaptive-drive generate --speed 40 --time 21.5 --weather rain --verbose
//! sensor-feed | adaptive-drive watch --settle-ms 250
//! ```

use crate::context::{DriveContext, Weather};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser)]
#[command(name = "adaptive-drive")]
#[command(about = "AdaptiveDrive: Real-time contextual playlist engine for driving")]
#[command(version)]
pub struct Args {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, env = "ADAPTIVE_DRIVE_CONFIG")]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// A driving context given on the command line.
#[derive(ClapArgs, Debug, Clone)]
pub struct ContextArgs {
    /// Vehicle speed in km/h
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub speed: f64,

    /// Hour of day, 24h clock, fractions allowed (21.5 = 21:30)
    #[arg(long = "time", default_value_t = 9.0, allow_negative_numbers = true)]
    pub time_of_day: f64,

    /// Weather tag: clear, rain, storm, snow, fog (others have no effect)
    #[arg(long, default_value = "clear")]
    pub weather: Weather,
}

impl From<&ContextArgs> for DriveContext {
    fn from(args: &ContextArgs) -> Self {
        DriveContext::new(args.speed, args.time_of_day, args.weather)
    }
}

/// Enumeration of all available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Classify a context into an operating mode
    ///
    /// Prints one of HIGH_SPEED_FOCUS, NIGHT_MODE_RELAX or STANDARD_ADAPTIVE.
    Classify {
        #[command(flatten)]
        context: ContextArgs,
    },

    /// Generate the ranked playlist for a context
    ///
    /// Tracks matching the mode's preferred types come first; weather only
    /// reorders tracks inside each group.
    Generate {
        #[command(flatten)]
        context: ContextArgs,

        /// Catalog JSON file (overrides the config; built-in demo otherwise)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Show the rule and filter that produced the playlist
        #[arg(short, long)]
        verbose: bool,

        /// Print the playlist as JSON
        #[arg(long, conflicts_with = "verbose")]
        json: bool,
    },

    /// Follow a stream of contexts on stdin
    ///
    /// Reads one JSON object per line, e.g.
    /// {"speed": 80, "timeOfDay": 22, "weather": "rain"}.
    /// A context is evaluated only after no newer one arrived within the
    /// settling window.
    Watch {
        /// Catalog JSON file (overrides the config; built-in demo otherwise)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Settling window in milliseconds (overrides the config)
        #[arg(long)]
        settle_ms: Option<u64>,
    },

    /// Evaluate every context in a JSON array file
    Batch {
        /// File containing a JSON array of contexts
        input: PathBuf,

        /// Catalog JSON file (overrides the config; built-in demo otherwise)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// List the catalog
    Catalog {
        /// Catalog JSON file (overrides the config; built-in demo otherwise)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Generate shell completions
    ///
    /// Usage: adaptive-drive completion bash > ~/.local/share/bash-completion/completions/adaptive-drive
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
