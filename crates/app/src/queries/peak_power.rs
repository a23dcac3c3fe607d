//! Peak power consumption of the house over a period.
//!
//! Each average reported by the grid power meter closes an instant of
//! `cadence` length. The consumption of that instant is the grid average plus
//! every power-source reading taken within `[end - cadence, end]`.

use std::collections::{BTreeMap, HashMap};

use chrono::Duration;
use smarthome_domain::error::{NotFoundError, SmartHomeError};
use smarthome_domain::functionality::{Behavior, SensorBehavior};
use smarthome_domain::id::{DeviceId, SensorFunctionalityId};
use smarthome_domain::time::{Period, Timestamp};

use crate::ports::{InstantValueRepository, PeriodValueRepository, SensorRepository};

pub struct PeakPowerQuery<S, I, P> {
    sensors: S,
    instants: I,
    periods: P,
    grid_meter: DeviceId,
    cadence: Duration,
}

impl<S, I, P> PeakPowerQuery<S, I, P>
where
    S: SensorRepository,
    I: InstantValueRepository,
    P: PeriodValueRepository,
{
    pub fn new(sensors: S, instants: I, periods: P, grid_meter: DeviceId, cadence: Duration) -> Self {
        Self {
            sensors,
            instants,
            periods,
            grid_meter,
            cadence,
        }
    }

    /// Highest instant consumption within `[start, end]`, `0.0` without grid data.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] when `start > end`,
    /// [`SmartHomeError::NotFound`] when the grid meter has no power average
    /// sensor, or a storage error from the repositories.
    #[tracing::instrument(skip(self))]
    pub async fn peak_power_consumption(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<f64, SmartHomeError> {
        let period = Period::new(start, end)?;
        let grid_functionality = SensorFunctionalityId::new(SensorBehavior::PowerAverage.tag())?;
        let grid_sensor = self
            .sensors
            .find_by_device_and_functionality(&self.grid_meter, &grid_functionality)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| NotFoundError {
                entity: "GridPowerMeterSensor",
                id: self.grid_meter.to_string(),
            })?;
        let grid_values = self
            .periods
            .find_by_sensor_within_period(grid_sensor.id(), &period)
            .await?;

        // One reading per device and timestamp; a later one overwrites.
        let source_functionality =
            SensorFunctionalityId::new(SensorBehavior::SpecificTimePowerConsumption.tag())?;
        let mut sources: HashMap<DeviceId, BTreeMap<Timestamp, f64>> = HashMap::new();
        for sensor in self
            .sensors
            .find_by_functionality(&source_functionality)
            .await?
        {
            let readings = sources.entry(sensor.device_id().clone()).or_default();
            for value in self
                .instants
                .find_by_sensor_within_period(sensor.id(), &period)
                .await?
            {
                match value.reading().scalar() {
                    Some(watts) => {
                        readings.insert(value.recorded_at(), watts);
                    }
                    None => {
                        tracing::warn!(sensor_id = %sensor.id(), reading = %value.reading(), "skipping non-numeric power reading");
                    }
                }
            }
        }

        let mut peak = 0.0_f64;
        for grid_value in grid_values {
            let Some(grid_watts) = grid_value.reading().scalar() else {
                tracing::warn!(sensor_id = %grid_sensor.id(), reading = %grid_value.reading(), "skipping non-numeric grid reading");
                continue;
            };
            let instant_end = grid_value.end();
            let instant_start = instant_end
                .checked_sub_signed(self.cadence)
                .unwrap_or(chrono::DateTime::<chrono::Utc>::MIN_UTC);
            let sources_watts: f64 = sources
                .values()
                .flat_map(|readings| readings.range(instant_start..=instant_end))
                .map(|(_, watts)| watts)
                .sum();
            peak = peak.max(grid_watts + sources_watts);
        }
        Ok(peak)
    }
}
