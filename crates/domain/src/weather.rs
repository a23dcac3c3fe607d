//! Weather observations reported for the house location.
//!
//! The weather provider reports values per hour of the day. Readings taken
//! near the end of an hour are attributed to the following one.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Timelike};
use serde::Serialize;

use crate::error::ValidationError;
use crate::time::Timestamp;

const SECONDS_PER_HOUR: i64 = 3_600;

/// From this minute on, a reading is attributed to the next hour.
const ROUND_UP_FROM_MINUTE: u32 = 45;

/// Hour of the day, `0..=23`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct HourOfDay(u32);

impl HourOfDay {
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidHour`] for values above 23.
    pub fn new(hour: u32) -> Result<Self, ValidationError> {
        if hour > 23 {
            return Err(ValidationError::InvalidHour(hour));
        }
        Ok(Self(hour))
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for HourOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}h", self.0)
    }
}

/// Sunrise or sunset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SunEvent {
    Sunrise,
    Sunset,
}

impl SunEvent {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sunrise => "sunrise",
            Self::Sunset => "sunset",
        }
    }
}

impl fmt::Display for SunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SunEvent {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sunrise" => Ok(Self::Sunrise),
            "sunset" => Ok(Self::Sunset),
            other => Err(ValidationError::UnknownSunEvent(other.to_string())),
        }
    }
}

/// Wind observed at one hour: speed in km/h, direction in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Wind {
    pub speed: f64,
    pub direction: f64,
}

/// The reported hour a reading taken at `at` is compared against.
///
/// Minutes `45..=59` round up to the next hour, anything earlier truncates.
/// Returns `None` only when the rounded instant is out of range.
#[must_use]
pub fn reported_hour(at: Timestamp) -> Option<Timestamp> {
    let mut seconds = at.timestamp();
    if at.minute() >= ROUND_UP_FROM_MINUTE {
        seconds = seconds.checked_add(SECONDS_PER_HOUR / 4)?;
    }
    DateTime::from_timestamp(seconds - seconds.rem_euclid(SECONDS_PER_HOUR), 0)
}
