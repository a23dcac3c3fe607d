//! In-memory implementation of [`WeatherGateway`].
//!
//! Serves hourly observations loaded up front. Every house location gets the
//! same answers.

use std::future::Future;

use smarthome_app::ports::WeatherGateway;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::location::GpsCode;
use smarthome_domain::weather::{HourOfDay, SunEvent, Wind};

use crate::error::NotReported;
use crate::table::Table;

/// Weather table keyed by hour of the day.
#[derive(Clone)]
pub struct MemoryWeatherGateway {
    temperatures: Table<HourOfDay, f64>,
    winds: Table<HourOfDay, Wind>,
    sun_events: Table<SunEvent, f64>,
}

impl MemoryWeatherGateway {
    #[must_use]
    pub fn new() -> Self {
        Self {
            temperatures: Table::new("weather_temperatures"),
            winds: Table::new("weather_winds"),
            sun_events: Table::new("weather_sun_events"),
        }
    }

    /// Set the outside temperature reported at `hour`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the table lock is poisoned.
    pub fn report_temperature(&self, hour: HourOfDay, celsius: f64) -> Result<(), SmartHomeError> {
        self.temperatures.write(|rows| rows.insert(hour, celsius))?;
        Ok(())
    }

    /// Set the wind reported at `hour`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the table lock is poisoned.
    pub fn report_wind(&self, hour: HourOfDay, wind: Wind) -> Result<(), SmartHomeError> {
        self.winds.write(|rows| rows.insert(hour, wind))?;
        Ok(())
    }

    /// Set the decimal hour of `event`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the table lock is poisoned.
    pub fn report_sun_event(&self, event: SunEvent, hour: f64) -> Result<(), SmartHomeError> {
        self.sun_events.write(|rows| rows.insert(event, hour))?;
        Ok(())
    }
}

impl Default for MemoryWeatherGateway {
    fn default() -> Self {
        Self::new()
    }
}

fn lookup<K, V>(table: &Table<K, V>, what: &'static str, key: &K) -> Result<V, SmartHomeError>
where
    K: Ord + ToString,
    V: Clone,
{
    table.get(key)?.ok_or_else(|| {
        NotReported {
            what,
            key: key.to_string(),
        }
        .into()
    })
}

impl WeatherGateway for MemoryWeatherGateway {
    fn instantaneous_temperature(
        &self,
        _gps: &GpsCode,
        hour: HourOfDay,
    ) -> impl Future<Output = Result<f64, SmartHomeError>> + Send {
        let result = lookup(&self.temperatures, "temperature", &hour);
        async move { result }
    }

    fn instantaneous_wind(
        &self,
        _gps: &GpsCode,
        hour: HourOfDay,
    ) -> impl Future<Output = Result<Wind, SmartHomeError>> + Send {
        let result = lookup(&self.winds, "wind", &hour);
        async move { result }
    }

    fn sun_event_hour(
        &self,
        _gps: &GpsCode,
        event: SunEvent,
    ) -> impl Future<Output = Result<f64, SmartHomeError>> + Send {
        let result = lookup(&self.sun_events, "hour", &event);
        async move { result }
    }
}
