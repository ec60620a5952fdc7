//! # Drive Context
//!
//! The snapshot of driving conditions every decision is made from. A
//! [`DriveContext`] is a plain value: callers build a fresh one on every
//! sensor update and never patch fields in place.
//!
//! ## JSON Shape
//!
//! ```json
//! { "speed": 72.5, "timeOfDay": 21.25, "weather": "rain" }
//! ```
//!
//! Weather tags outside the known set parse into [`Weather::Unknown`]
//! instead of failing, so a new tag from a sensor never breaks evaluation.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Weather conditions reported alongside speed and time.
///
/// Weather never decides the operating mode. It only reorders tracks inside
/// a priority group, see [`crate::algorithm::WeatherPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    Storm,
    Snow,
    Fog,
    /// Any tag the engine has no rule for.
    #[serde(other)]
    Unknown,
}

impl Weather {
    /// Every weather tag, in declaration order.
    pub const ALL: [Weather; 6] = [
        Weather::Clear,
        Weather::Rain,
        Weather::Storm,
        Weather::Snow,
        Weather::Fog,
        Weather::Unknown,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Weather::Clear => "clear",
            Weather::Rain => "rain",
            Weather::Storm => "storm",
            Weather::Snow => "snow",
            Weather::Fog => "fog",
            Weather::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsing is total: unrecognized tags become [`Weather::Unknown`].
impl FromStr for Weather {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "clear" => Weather::Clear,
            "rain" => Weather::Rain,
            "storm" => Weather::Storm,
            "snow" => Weather::Snow,
            "fog" => Weather::Fog,
            _ => Weather::Unknown,
        })
    }
}

/// Immutable snapshot of the current driving conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveContext {
    /// Vehicle speed in km/h. `0.0` means stationary.
    pub speed: f64,
    /// Hour of day on a 24h clock, fractional hours allowed.
    #[serde(alias = "time_of_day")]
    pub time_of_day: f64,
    #[serde(default)]
    pub weather: Weather,
}

impl DriveContext {
    #[must_use]
    pub const fn new(speed: f64, time_of_day: f64, weather: Weather) -> Self {
        Self {
            speed,
            time_of_day,
            weather,
        }
    }

    /// Whether the numeric fields sit inside their declared ranges.
    ///
    /// The engine evaluates out-of-range contexts anyway; this only exists so
    /// callers and logs can flag suspicious sensor input.
    #[must_use]
    pub fn is_within_range(&self) -> bool {
        self.speed >= 0.0 && (0.0..24.0).contains(&self.time_of_day)
    }
}

/// Stationary, 9:00 AM, clear skies.
impl Default for DriveContext {
    fn default() -> Self {
        Self::new(0.0, 9.0, Weather::Clear)
    }
}

impl fmt::Display for DriveContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} km/h @ ", self.speed)?;
        if (0.0..24.0).contains(&self.time_of_day) {
            #[allow(clippy::cast_possible_truncation)]
            let total_minutes = (self.time_of_day * 60.0).floor() as i64;
            write!(f, "{:02}:{:02}", total_minutes / 60, total_minutes % 60)?;
        } else {
            // Out-of-range hours are shown raw rather than as a clock time.
            write!(f, "{}h", self.time_of_day)?;
        }
        write!(f, " ({})", self.weather)
    }
}
