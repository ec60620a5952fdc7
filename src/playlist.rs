//! # Playlist Generator
//!
//! Turns a [`DriveContext`] into an ordered view of the catalog.
//!
//! ## Algorithm
//!
//! 1. Classify the context into an [`OperatingMode`].
//! 2. Look up the mode's [`TypePriority`].
//! 3. Stable-partition the catalog: tracks of a priority type first, the rest
//!    after, each group in catalog order.
//! 4. Reorder *inside* each group by the [`WeatherPolicy`] tie-break.
//! 5. Concatenate the groups.
//!
//! The result is a re-ranking, never a filter: every catalog track appears
//! exactly once. Generation cannot fail; an empty catalog yields an empty
//! playlist.
//!
//! ## Example
//!
//! ```
//! use adaptive_drive::catalog::Catalog;
//! use adaptive_drive::context::{DriveContext, Weather};
//! use adaptive_drive::mode::OperatingMode;
//! use adaptive_drive::playlist::generate;
//!
//! let catalog = Catalog::builtin();
//! let night = DriveContext::new(40.0, 22.5, Weather::Clear);
//! let playlist = generate(catalog.tracks(), &night);
//!
//! assert_eq!(playlist.mode(), OperatingMode::NightModeRelax);
//! assert_eq!(playlist.len(), catalog.len());
//! ```

use crate::algorithm::WeatherPolicy;
use crate::catalog::Music;
use crate::context::DriveContext;
use crate::mode::{ModeThresholds, OperatingMode, TypePriority};
use log::{debug, warn};
use rayon::prelude::*;
use serde::Serialize;

/// Label reported when there is no first track to derive a filter from.
pub const MIXED_FILTER: &str = "MIXED";

/// Ordered result of one evaluation, borrowing from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Playlist<'a> {
    mode: OperatingMode,
    /// Length of the leading priority group.
    matching: usize,
    tracks: Vec<&'a Music>,
}

impl<'a> Playlist<'a> {
    #[must_use]
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    #[must_use]
    pub fn tracks(&self) -> &[&'a Music] {
        &self.tracks
    }

    #[must_use]
    pub fn into_tracks(self) -> Vec<&'a Music> {
        self.tracks
    }

    /// Number of leading tracks whose type matches the mode's priority.
    #[must_use]
    pub fn matching_len(&self) -> usize {
        self.matching
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&'a Music> {
        self.tracks.first().copied()
    }

    /// Upper-cased type of the first track, or [`MIXED_FILTER`] when empty.
    #[must_use]
    pub fn active_filter(&self) -> String {
        self.first()
            .map_or_else(|| MIXED_FILTER.to_string(), |track| track.track_type.as_str().to_uppercase())
    }
}

/// Catalog plus the policies used to rank it.
#[derive(Debug, Clone)]
pub struct PlaylistGenerator<'a> {
    catalog: &'a [Music],
    thresholds: ModeThresholds,
    policy: WeatherPolicy,
}

impl<'a> PlaylistGenerator<'a> {
    /// Generator with default thresholds and weather policy.
    #[must_use]
    pub fn new(catalog: &'a [Music]) -> Self {
        Self {
            catalog,
            thresholds: ModeThresholds::default(),
            policy: WeatherPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_thresholds(self, thresholds: ModeThresholds) -> Self {
        Self { thresholds, ..self }
    }

    #[must_use]
    pub fn with_policy(self, policy: WeatherPolicy) -> Self {
        Self { policy, ..self }
    }

    #[must_use]
    pub fn thresholds(&self) -> &ModeThresholds {
        &self.thresholds
    }

    #[must_use]
    pub fn catalog(&self) -> &'a [Music] {
        self.catalog
    }

    /// Classify `context` and rank the catalog for it.
    #[must_use]
    pub fn generate(&self, context: &DriveContext) -> Playlist<'a> {
        if !context.is_within_range() {
            warn!("Context `{context}' is outside the expected range; evaluating anyway");
        }

        let mode = self.thresholds.classify(context);
        let priority = mode.priority();

        let (mut matching, mut rest) = partition_by_priority(self.catalog, priority);
        self.policy.order_group(&mut matching, context.weather);
        self.policy.order_group(&mut rest, context.weather);

        debug!(
            "{mode}: {} priority tracks, {} others (weather: {})",
            matching.len(),
            rest.len(),
            context.weather
        );

        let matching_len = matching.len();
        matching.append(&mut rest);

        Playlist {
            mode,
            matching: matching_len,
            tracks: matching,
        }
    }

    /// Evaluate many contexts in parallel.
    ///
    /// Results come back in input order, so the last element belongs to the
    /// most recent context.
    #[must_use]
    pub fn generate_batch(&self, contexts: &[DriveContext]) -> Vec<Playlist<'a>> {
        contexts
            .par_iter()
            .map(|context| self.generate(context))
            .collect()
    }
}

/// Rank `catalog` for `context` with default thresholds and policy.
#[must_use]
pub fn generate<'a>(catalog: &'a [Music], context: &DriveContext) -> Playlist<'a> {
    PlaylistGenerator::new(catalog).generate(context)
}

/// Split into (matching, rest), each keeping catalog order.
fn partition_by_priority(catalog: &[Music], priority: TypePriority) -> (Vec<&Music>, Vec<&Music>) {
    catalog
        .iter()
        .partition(|track| priority.matches(track.track_type))
}
