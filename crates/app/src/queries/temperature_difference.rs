//! Maximum temperature difference between an indoor and an outdoor sensor.
//!
//! Readings of the two sensors are paired when their timestamps are at most
//! `tolerance` apart (inclusive). For every inside reading the outside match
//! yielding the largest absolute difference is kept, and the overall maximum
//! is returned. Units are normalised to Celsius before subtracting.

use chrono::{DateTime, Duration, Utc};
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::SensorId;
use smarthome_domain::time::{Period, Timestamp};
use smarthome_domain::value::InstantValue;

use crate::ports::InstantValueRepository;

/// Out-of-band value reported when no pair of readings is comparable.
pub const NO_COMPARABLE_PAIR: f64 = -1.0;

/// Outcome of a temperature comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TemperatureComparison {
    Difference(f64),
    NoComparablePair,
}

impl TemperatureComparison {
    /// The difference in degrees Celsius, or [`NO_COMPARABLE_PAIR`].
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Difference(value) => value,
            Self::NoComparablePair => NO_COMPARABLE_PAIR,
        }
    }
}

pub struct TemperatureDifferenceQuery<I> {
    instants: I,
    tolerance: Duration,
}

impl<I: InstantValueRepository> TemperatureDifferenceQuery<I> {
    pub fn new(instants: I, tolerance: Duration) -> Self {
        Self {
            instants,
            tolerance,
        }
    }

    /// Largest difference between `inside` and `outside` over `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] when `start > end`, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn max_temperature_difference(
        &self,
        inside: &SensorId,
        outside: &SensorId,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<TemperatureComparison, SmartHomeError> {
        let period = Period::new(start, end)?;
        let inside = celsius_series(
            self.instants
                .find_by_sensor_within_period(inside, &period)
                .await?,
        );
        let mut outside = celsius_series(
            self.instants
                .find_by_sensor_within_period(outside, &period)
                .await?,
        );
        if inside.is_empty() || outside.is_empty() {
            return Ok(TemperatureComparison::NoComparablePair);
        }
        outside.sort_by_key(|(at, _)| *at);

        let mut best: Option<f64> = None;
        for (at, temperature) in inside {
            let from = at
                .checked_sub_signed(self.tolerance)
                .unwrap_or(DateTime::<Utc>::MIN_UTC);
            let to = at
                .checked_add_signed(self.tolerance)
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
            let lower = outside.partition_point(|(t, _)| *t < from);
            let upper = outside.partition_point(|(t, _)| *t <= to);
            for (_, other) in &outside[lower..upper] {
                let difference = (temperature - other).abs();
                if best.is_none_or(|current| difference > current) {
                    best = Some(difference);
                }
            }
        }
        Ok(best.map_or(
            TemperatureComparison::NoComparablePair,
            TemperatureComparison::Difference,
        ))
    }
}

pub(crate) fn celsius_series(values: Vec<InstantValue>) -> Vec<(Timestamp, f64)> {
    values
        .into_iter()
        .filter_map(|value| match value.reading().temperature_celsius() {
            Some(celsius) => Some((value.recorded_at(), celsius)),
            None => {
                tracing::warn!(
                    sensor_id = %value.sensor_id(),
                    reading = %value.reading(),
                    "skipping reading that is not a temperature"
                );
                None
            }
        })
        .collect()
}
