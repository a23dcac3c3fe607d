//! Weather service: outside conditions at the house location.

use std::collections::BTreeMap;

use chrono::{Duration, Timelike};
use smarthome_domain::error::{NotFoundError, SmartHomeError, ValidationError};
use smarthome_domain::id::SensorId;
use smarthome_domain::location::GpsCode;
use smarthome_domain::time::{Period, Timestamp};
use smarthome_domain::weather::{self, HourOfDay, SunEvent, Wind};

use crate::ports::{HouseRepository, InstantValueRepository, WeatherGateway};
use crate::queries::TemperatureComparison;
use crate::queries::temperature_difference::celsius_series;

pub struct WeatherService<H, I, W> {
    houses: H,
    instants: I,
    gateway: W,
    tolerance: Duration,
}

impl<H, I, W> WeatherService<H, I, W>
where
    H: HouseRepository,
    I: InstantValueRepository,
    W: WeatherGateway,
{
    pub fn new(houses: H, instants: I, gateway: W, tolerance: Duration) -> Self {
        Self {
            houses,
            instants,
            gateway,
            tolerance,
        }
    }

    /// Outside temperature in degrees Celsius at `hour` of the day.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidHour`] for hours above 23,
    /// [`SmartHomeError::NotFound`] without a house,
    /// [`ValidationError::MissingField`] when the house has no location, or
    /// a gateway error.
    #[tracing::instrument(skip(self))]
    pub async fn temperature_for_hour(&self, hour: u32) -> Result<f64, SmartHomeError> {
        let hour = HourOfDay::new(hour)?;
        let gps = self.house_gps().await?;
        self.gateway.instantaneous_temperature(&gps, hour).await
    }

    /// Wind at `hour` of the day.
    ///
    /// # Errors
    ///
    /// Same as [`Self::temperature_for_hour`].
    #[tracing::instrument(skip(self))]
    pub async fn wind_for_hour(&self, hour: u32) -> Result<Wind, SmartHomeError> {
        let hour = HourOfDay::new(hour)?;
        let gps = self.house_gps().await?;
        self.gateway.instantaneous_wind(&gps, hour).await
    }

    /// Decimal hour of sunrise or sunset at the house location.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] without a house,
    /// [`ValidationError::MissingField`] when the house has no location, or
    /// a gateway error.
    #[tracing::instrument(skip(self))]
    pub async fn sun_event_hour(&self, event: SunEvent) -> Result<f64, SmartHomeError> {
        let gps = self.house_gps().await?;
        self.gateway.sun_event_hour(&gps, event).await
    }

    /// Largest difference between `inside` readings over `[start, end]` and
    /// the reported outside temperature of the matching hour.
    ///
    /// Each reading is compared against its [`weather::reported_hour`] and
    /// kept only when that hour lies within the tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPeriod`] when `start > end`. When at
    /// least one reading is in the period, the errors of
    /// [`Self::temperature_for_hour`] apply.
    #[tracing::instrument(skip(self))]
    pub async fn max_temperature_difference(
        &self,
        inside: &SensorId,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<TemperatureComparison, SmartHomeError> {
        let period = Period::new(start, end)?;
        let readings = celsius_series(
            self.instants
                .find_by_sensor_within_period(inside, &period)
                .await?,
        );
        if readings.is_empty() {
            return Ok(TemperatureComparison::NoComparablePair);
        }
        let gps = self.house_gps().await?;

        let mut outside: BTreeMap<HourOfDay, f64> = BTreeMap::new();
        let mut best: Option<f64> = None;
        for (at, temperature) in readings {
            let Some(reported) = weather::reported_hour(at) else {
                continue;
            };
            if (at - reported).abs() > self.tolerance {
                tracing::debug!(%at, %reported, "reading too far from a reported hour");
                continue;
            }
            let hour = HourOfDay::new(reported.hour())?;
            let other = match outside.get(&hour) {
                Some(other) => *other,
                None => {
                    let fetched = self.gateway.instantaneous_temperature(&gps, hour).await?;
                    outside.insert(hour, fetched);
                    fetched
                }
            };
            let difference = (temperature - other).abs();
            if best.is_none_or(|current| difference > current) {
                best = Some(difference);
            }
        }
        Ok(best.map_or(
            TemperatureComparison::NoComparablePair,
            TemperatureComparison::Difference,
        ))
    }

    async fn house_gps(&self) -> Result<GpsCode, SmartHomeError> {
        let house = self.houses.find_the_house().await?.ok_or_else(|| NotFoundError {
            entity: "House",
            id: "<the house>".to_string(),
        })?;
        let location = house
            .location()
            .ok_or(ValidationError::MissingField("house location"))?;
        Ok(location.gps)
    }
}
