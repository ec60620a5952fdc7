//! Weather tie-break scoring.
//!
//! Scores only ever reorder tracks *within* a priority group; which group a
//! track belongs to is decided by the operating mode alone.
//!
//! ## Formula
//!
//! ```text
//! adjustment(track, weather) = type_adjustment[weather][track.type]
//!                            - (fast_tempo_penalty  if weather is rough
//!                                                   and track.bpm > fast_tempo_bpm)
//! ```
//!
//! Higher adjustments sort earlier. Tracks with equal adjustments keep their
//! catalog order.

use crate::catalog::{Music, TrackType};
use crate::context::Weather;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configurable weather scoring policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherPolicy {
    /// Additive adjustment per weather, per track type. Missing entries are 0.
    pub type_adjustments: BTreeMap<Weather, BTreeMap<TrackType, f64>>,
    /// Conditions under which fast tracks are demoted.
    pub rough_weather: Vec<Weather>,
    /// Tracks strictly faster than this count as fast.
    pub fast_tempo_bpm: u32,
    pub fast_tempo_penalty: f64,
}

impl Default for WeatherPolicy {
    fn default() -> Self {
        let type_adjustments = [
            (Weather::Rain, TrackType::Energetic, -0.5),
            (Weather::Storm, TrackType::Energetic, -1.0),
            (Weather::Snow, TrackType::Calm, 0.5),
            (Weather::Fog, TrackType::Focus, 0.5),
        ]
        .into_iter()
        .fold(BTreeMap::new(), |mut map: BTreeMap<_, BTreeMap<_, _>>, (weather, track_type, adjustment)| {
            map.entry(weather).or_default().insert(track_type, adjustment);
            map
        });

        Self {
            type_adjustments,
            rough_weather: vec![Weather::Rain, Weather::Storm, Weather::Snow],
            fast_tempo_bpm: 120,
            fast_tempo_penalty: 0.25,
        }
    }
}

impl WeatherPolicy {
    /// A policy that scores every track 0, leaving catalog order untouched.
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            type_adjustments: BTreeMap::new(),
            rough_weather: Vec::new(),
            fast_tempo_bpm: u32::MAX,
            fast_tempo_penalty: 0.0,
        }
    }

    /// Tie-break score of `track` under `weather`. Higher ranks earlier.
    #[must_use]
    pub fn adjustment(&self, track: &Music, weather: Weather) -> f64 {
        let type_adjustment = self
            .type_adjustments
            .get(&weather)
            .and_then(|by_type| by_type.get(&track.track_type))
            .copied()
            .unwrap_or(0.0);

        let tempo_penalty = match track.bpm {
            Some(bpm) if bpm > self.fast_tempo_bpm && self.rough_weather.contains(&weather) => {
                self.fast_tempo_penalty
            }
            _ => 0.0,
        };

        let score = type_adjustment - tempo_penalty;
        log::trace!("Weather `{weather}' adjustment for `{}': {score:.3}", track.title);
        score
    }

    /// Stable sort of `group` by descending adjustment.
    ///
    /// Uses `total_cmp`, so a NaN from a hand-edited config still yields a
    /// well-defined order.
    pub fn order_group(&self, group: &mut Vec<&Music>, weather: Weather) {
        let mut scored: Vec<(f64, &Music)> = group
            .iter()
            .map(|&track| (self.adjustment(track, weather), track))
            .collect();

        // `sort_by` is stable, equal scores keep catalog order.
        scored.sort_by(|(a, _), (b, _)| b.total_cmp(a));

        group.clear();
        group.extend(scored.into_iter().map(|(_, track)| track));
    }
}
