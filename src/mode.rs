//! # Mode Classifier
//!
//! Maps a [`DriveContext`] to exactly one [`OperatingMode`].
//!
//! ## Decision Order
//!
//! First match wins:
//!
//! ```text
//! speed > 90                      => HIGH_SPEED_FOCUS
//! hour  > 20  or  hour < 5        => NIGHT_MODE_RELAX
//! otherwise                       => STANDARD_ADAPTIVE
//! ```
//!
//! Speed is checked before the clock: fast driving needs focus regardless of
//! the hour. All comparisons are strict, so 90 km/h, 20:00 and 05:00 all
//! land in `STANDARD_ADAPTIVE`.
//!
//! Weather is deliberately absent here. It only affects ordering inside the
//! generator, see [`crate::algorithm`].

use crate::catalog::TrackType;
use crate::context::DriveContext;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named decision bucket derived from a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperatingMode {
    HighSpeedFocus,
    NightModeRelax,
    StandardAdaptive,
}

/// Which track types a mode ranks first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypePriority {
    /// Only the listed types belong to the leading group.
    Types(&'static [TrackType]),
    /// Every type belongs to the leading group; nothing is demoted.
    Mixed,
}

impl TypePriority {
    #[must_use]
    pub fn matches(self, track_type: TrackType) -> bool {
        match self {
            TypePriority::Types(types) => types.contains(&track_type),
            TypePriority::Mixed => true,
        }
    }
}

impl OperatingMode {
    pub const ALL: [OperatingMode; 3] = [
        OperatingMode::HighSpeedFocus,
        OperatingMode::NightModeRelax,
        OperatingMode::StandardAdaptive,
    ];

    /// Label shown by the logic debugger.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OperatingMode::HighSpeedFocus => "HIGH_SPEED_FOCUS",
            OperatingMode::NightModeRelax => "NIGHT_MODE_RELAX",
            OperatingMode::StandardAdaptive => "STANDARD_ADAPTIVE",
        }
    }

    /// Track types this mode ranks first.
    #[must_use]
    pub fn priority(self) -> TypePriority {
        match self {
            OperatingMode::HighSpeedFocus => {
                TypePriority::Types(&[TrackType::Energetic, TrackType::Focus])
            }
            OperatingMode::NightModeRelax => {
                TypePriority::Types(&[TrackType::Calm, TrackType::Ambient])
            }
            OperatingMode::StandardAdaptive => TypePriority::Mixed,
        }
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boundaries used by the classifier.
///
/// Defaults reproduce the fixed rule (90 km/h, after 20:00, before 05:00).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeThresholds {
    /// Speeds strictly above this are high-speed driving.
    pub high_speed_kmh: f64,
    /// Hours strictly after this are night.
    pub night_starts_after: f64,
    /// Hours strictly before this are night.
    pub night_ends_before: f64,
}

impl Default for ModeThresholds {
    fn default() -> Self {
        Self {
            high_speed_kmh: 90.0,
            night_starts_after: 20.0,
            night_ends_before: 5.0,
        }
    }
}

impl ModeThresholds {
    /// Classify `context` against these boundaries.
    ///
    /// Total for every input: NaN or out-of-range numbers simply fail the
    /// comparisons they are part of and fall through to later rules.
    #[must_use]
    pub fn classify(&self, context: &DriveContext) -> OperatingMode {
        let mode = if context.speed > self.high_speed_kmh {
            OperatingMode::HighSpeedFocus
        } else if context.time_of_day > self.night_starts_after
            || context.time_of_day < self.night_ends_before
        {
            OperatingMode::NightModeRelax
        } else {
            OperatingMode::StandardAdaptive
        };

        log::trace!("Classified `{context}' as {mode}");
        mode
    }
}

/// Classify `context` with the default boundaries.
///
/// # Examples
///
/// ```
/// use adaptive_drive::context::{DriveContext, Weather};
/// use adaptive_drive::mode::{classify, OperatingMode};
///
/// let late_fast = DriveContext::new(95.0, 23.0, Weather::Clear);
/// assert_eq!(classify(&late_fast), OperatingMode::HighSpeedFocus);
/// ```
#[must_use]
pub fn classify(context: &DriveContext) -> OperatingMode {
    ModeThresholds::default().classify(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Weather;

    fn ctx(speed: f64, time_of_day: f64) -> DriveContext {
        DriveContext::new(speed, time_of_day, Weather::Clear)
    }

    #[test]
    fn test_speed_boundary_is_exclusive() {
        assert_eq!(classify(&ctx(90.0, 12.0)), OperatingMode::StandardAdaptive);
        assert_eq!(classify(&ctx(90.01, 12.0)), OperatingMode::HighSpeedFocus);
        assert_eq!(classify(&ctx(91.0, 12.0)), OperatingMode::HighSpeedFocus);
    }

    #[test]
    fn test_evening_boundary_is_exclusive() {
        assert_eq!(classify(&ctx(0.0, 20.0)), OperatingMode::StandardAdaptive);
        assert_eq!(classify(&ctx(0.0, 20.01)), OperatingMode::NightModeRelax);
    }

    #[test]
    fn test_morning_boundary_is_exclusive() {
        assert_eq!(classify(&ctx(0.0, 4.99)), OperatingMode::NightModeRelax);
        assert_eq!(classify(&ctx(0.0, 5.0)), OperatingMode::StandardAdaptive);
        assert_eq!(classify(&ctx(0.0, 0.0)), OperatingMode::NightModeRelax);
    }

    #[test]
    fn test_speed_takes_priority_over_night() {
        assert_eq!(classify(&ctx(95.0, 23.0)), OperatingMode::HighSpeedFocus);
        assert_eq!(classify(&ctx(95.0, 3.0)), OperatingMode::HighSpeedFocus);
    }

    #[test]
    fn test_weather_never_changes_mode() {
        for weather in Weather::ALL {
            for (speed, hour) in [(0.0, 9.0), (95.0, 9.0), (30.0, 22.0)] {
                let clear = classify(&ctx(speed, hour));
                let other = classify(&DriveContext::new(speed, hour, weather));
                assert_eq!(clear, other, "weather {weather} changed the mode");
            }
        }
    }

    #[test]
    fn test_out_of_range_inputs_still_classify() {
        assert_eq!(classify(&ctx(-10.0, 12.0)), OperatingMode::StandardAdaptive);
        assert_eq!(classify(&ctx(0.0, 30.0)), OperatingMode::NightModeRelax);
        assert_eq!(classify(&ctx(0.0, -1.0)), OperatingMode::NightModeRelax);
        assert_eq!(classify(&ctx(f64::NAN, f64::NAN)), OperatingMode::StandardAdaptive);
        assert_eq!(classify(&ctx(f64::INFINITY, 12.0)), OperatingMode::HighSpeedFocus);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = ModeThresholds {
            high_speed_kmh: 120.0,
            night_starts_after: 22.0,
            night_ends_before: 6.0,
        };

        assert_eq!(thresholds.classify(&ctx(100.0, 12.0)), OperatingMode::StandardAdaptive);
        assert_eq!(thresholds.classify(&ctx(0.0, 21.0)), OperatingMode::StandardAdaptive);
        assert_eq!(thresholds.classify(&ctx(0.0, 5.5)), OperatingMode::NightModeRelax);
    }

    #[test]
    fn test_priority_mapping() {
        let focus = OperatingMode::HighSpeedFocus.priority();
        assert!(focus.matches(TrackType::Energetic));
        assert!(focus.matches(TrackType::Focus));
        assert!(!focus.matches(TrackType::Calm));

        let night = OperatingMode::NightModeRelax.priority();
        assert!(night.matches(TrackType::Calm));
        assert!(night.matches(TrackType::Ambient));
        assert!(!night.matches(TrackType::Energetic));
        assert!(!night.matches(TrackType::Unknown));

        let standard = OperatingMode::StandardAdaptive.priority();
        assert_eq!(standard, TypePriority::Mixed);
        assert!(TrackType::ALL.iter().all(|&t| standard.matches(t)));
    }

    #[test]
    fn test_mode_labels() {
        let labels: Vec<_> = OperatingMode::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(labels, ["HIGH_SPEED_FOCUS", "NIGHT_MODE_RELAX", "STANDARD_ADAPTIVE"]);

        let json = serde_json::to_string(&OperatingMode::NightModeRelax).unwrap();
        assert_eq!(json, "\"NIGHT_MODE_RELAX\"");
    }
}
