//! # Track Catalog
//!
//! The fixed, in-memory list of candidate tracks. The engine only ever reads
//! from a [`Catalog`]; loading happens once, up front, either from a JSON
//! file or from the built-in demo set.
//!
//! ## File Format
//!
//! A JSON array of tracks:
//!
//! ```json
//! [
//!   { "id": "t1", "title": "Neon Highway", "artist": "Synth Rider",
//!     "type": "energetic", "bpm": 128, "duration_secs": 214 }
//! ]
//! ```
//!
//! `bpm` and `duration_secs` are optional. Unknown `type` tags load as
//! [`TrackType::Unknown`].

use anyhow::{Context, Result};
use log::{debug, info};
use path_absolutize::Absolutize;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Mood/energy class of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackType {
    Energetic,
    Calm,
    Ambient,
    Focus,
    #[serde(other)]
    Unknown,
}

impl TrackType {
    pub const ALL: [TrackType; 5] = [
        TrackType::Energetic,
        TrackType::Calm,
        TrackType::Ambient,
        TrackType::Focus,
        TrackType::Unknown,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TrackType::Energetic => "energetic",
            TrackType::Calm => "calm",
            TrackType::Ambient => "ambient",
            TrackType::Focus => "focus",
            TrackType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TrackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "energetic" => TrackType::Energetic,
            "calm" => TrackType::Calm,
            "ambient" => TrackType::Ambient,
            "focus" => TrackType::Focus,
            _ => TrackType::Unknown,
        })
    }
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Music {
    /// Unique within its catalog.
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(rename = "type")]
    pub track_type: TrackType,
    /// Tempo in beats per minute. Used by the weather tie-break.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpm: Option<u32>,
    /// Display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u32>,
}

impl Music {
    #[must_use]
    pub fn new(id: &str, title: &str, artist: &str, track_type: TrackType) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            track_type,
            bpm: None,
            duration_secs: None,
        }
    }

    #[must_use]
    pub fn with_bpm(self, bpm: u32) -> Self {
        Self {
            bpm: Some(bpm),
            ..self
        }
    }

    #[must_use]
    pub fn with_duration(self, duration_secs: u32) -> Self {
        Self {
            duration_secs: Some(duration_secs),
            ..self
        }
    }

    /// `m:ss`, or `-:--` when the duration is unknown.
    #[must_use]
    pub fn duration_label(&self) -> String {
        self.duration_secs.map_or_else(
            || "-:--".to_string(),
            |secs| format!("{}:{:02}", secs / 60, secs % 60),
        )
    }
}

/// An immutable, ordered set of tracks with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    tracks: Vec<Music>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first id that appears twice.
    pub fn new(tracks: Vec<Music>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(tracks.len());
        if let Some(duplicate) = tracks.iter().find(|track| !seen.insert(track.id.as_str())) {
            anyhow::bail!("Duplicate track id `{}' in catalog", duplicate.id);
        }
        Ok(Self { tracks })
    }

    /// Load a catalog from a JSON array file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not a JSON array of tracks, or
    /// contains duplicate ids.
    pub fn load(path: &Path) -> Result<Self> {
        let shown = path.absolutize().map_or_else(|_| path.to_path_buf(), |p| p.into_owned());
        debug!("Loading catalog from {}", shown.display());

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", shown.display()))?;
        let tracks: Vec<Music> = serde_json::from_str(&content)
            .with_context(|| format!("Catalog file {} is not a JSON array of tracks", shown.display()))?;
        let catalog = Self::new(tracks)
            .with_context(|| format!("Invalid catalog in {}", shown.display()))?;

        info!("Loaded {} tracks from {}", catalog.len(), shown.display());
        Ok(catalog)
    }

    /// Load from `path` when given, otherwise fall back to [`Catalog::builtin`].
    ///
    /// # Errors
    ///
    /// Same as [`Catalog::load`].
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin().clone()),
        }
    }

    /// The demo catalog shipped with the binary.
    #[must_use]
    pub fn builtin() -> &'static Catalog {
        &BUILTIN_CATALOG
    }

    #[must_use]
    pub fn tracks(&self) -> &[Music] {
        &self.tracks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

lazy_static::lazy_static! {
    /// Mixed demo set covering every mood class, interleaved so that
    /// reordering is visible in every mode.
    static ref BUILTIN_CATALOG: Catalog = Catalog {
        tracks: vec![
            Music::new("1", "Neon Highway", "Synth Rider", TrackType::Energetic).with_bpm(128).with_duration(214),
            Music::new("2", "Midnight Rain", "Lo-Fi Dreams", TrackType::Calm).with_bpm(72).with_duration(187),
            Music::new("3", "Deep Work", "Alpha Waves", TrackType::Focus).with_bpm(95).with_duration(301),
            Music::new("4", "Northern Lights", "Aurora Drift", TrackType::Ambient).with_bpm(60).with_duration(342),
            Music::new("5", "Turbo Charge", "Velocity", TrackType::Energetic).with_bpm(140).with_duration(198),
            Music::new("6", "Quiet Roads", "The Slow Lane", TrackType::Calm).with_bpm(80).with_duration(225),
            Music::new("7", "Clear Mind", "Binaural Labs", TrackType::Focus).with_bpm(110).with_duration(276),
            Music::new("8", "Open Sky", "Cloud Atlas", TrackType::Ambient).with_bpm(68).with_duration(410),
            Music::new("9", "Sunday Cruise", "Easy Drive", TrackType::Energetic).with_bpm(115).with_duration(203),
            Music::new("10", "Harbour Lights", "Tidewater", TrackType::Calm).with_bpm(88).with_duration(244),
        ],
    };
}
