//! Real-time contextual playlist engine for driving.
//!
//! Given the current driving context (speed, time of day, weather), picks an
//! operating mode and re-ranks a fixed track catalog to suit it.
//!
//! Core modules:
//! - [`context`] - The drive context snapshot
//! - [`mode`] - Mode classification
//! - [`playlist`] - Playlist generation (stable partition + tie-break)
//! - [`algorithm`] - Weather tie-break scoring
//! - [`catalog`] - Track catalog and loading
//!
//! ### Supporting Modules
//!
//! - [`debounce`] - Settling-window debouncer for bursts of context updates
//! - [`session`] - Stdin watch loop built on the debouncer
//! - [`config`] - Configuration file and config directory management
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//! - [`report`] - Plain-text rendering
//!
//! ## Quick Start Example
//!
//! ```
//! use adaptive_drive::catalog::Catalog;
//! use adaptive_drive::context::{DriveContext, Weather};
//! use adaptive_drive::mode::{classify, OperatingMode};
//! use adaptive_drive::playlist::PlaylistGenerator;
//!
//! let context = DriveContext::new(110.0, 14.0, Weather::Rain);
//! assert_eq!(classify(&context), OperatingMode::HighSpeedFocus);
//!
//! let catalog = Catalog::builtin();
//! let generator = PlaylistGenerator::new(catalog.tracks());
//! let playlist = generator.generate(&context);
//!
//! println!("Rule: {}", playlist.mode());
//! println!("Filter: {} priority", playlist.active_filter());
//! for track in playlist.tracks() {
//!     println!("{} - {}", track.artist, track.title);
//! }
//! ```
//!
//! ## Decision Rules
//!
//! | Condition (first match wins) | Mode                | Ranked first      |
//! |------------------------------|---------------------|-------------------|
//! | speed > 90 km/h              | `HIGH_SPEED_FOCUS`  | energetic, focus  |
//! | hour > 20 or hour < 5        | `NIGHT_MODE_RELAX`  | calm, ambient     |
//! | otherwise                    | `STANDARD_ADAPTIVE` | everything (mixed)|
//!
//! Weather never changes the mode. It nudges tracks up or down inside their
//! group, see [`algorithm::WeatherPolicy`].
//!
//! ## Error Handling
//!
//! Classification and generation cannot fail. Loading configuration or a
//! catalog file returns `anyhow::Result` with context about which file was
//! at fault.

pub mod algorithm;
pub mod catalog;
pub mod cli;
pub mod completion;
pub mod config;
pub mod context;
pub mod debounce;
pub mod mode;
pub mod playlist;
pub mod report;
pub mod session;
