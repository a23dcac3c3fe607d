//! Value service: record sensor values and read them back per device.

use std::collections::BTreeMap;

use smarthome_domain::error::{NotFoundError, SmartHomeError, ValidationError};
use smarthome_domain::id::{DeviceId, SensorFunctionalityId, SensorId, ValueId};
use smarthome_domain::location::GpsCode;
use smarthome_domain::sensor::Sensor;
use smarthome_domain::time::{Period, Timestamp};
use smarthome_domain::value::{
    InstantLocationValue, InstantValue, Measurement, PeriodValue, ValueKind,
};

use crate::ports::{
    InstantLocationValueRepository, InstantValueRepository, PeriodValueRepository,
    SensorRepository,
};

/// The three value stores, one per value shape.
#[derive(Debug, Clone)]
pub struct ValueStores<I, P, L> {
    pub instants: I,
    pub periods: P,
    pub locations: L,
}

impl<I, P, L> ValueStores<I, P, L>
where
    I: InstantValueRepository,
    P: PeriodValueRepository,
    L: InstantLocationValueRepository,
{
    /// Values of `sensor` within `period`, read from the store matching its value kind.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn within_period(
        &self,
        sensor: &Sensor,
        period: &Period,
    ) -> Result<Vec<Measurement>, SmartHomeError> {
        let id = sensor.id();
        Ok(match sensor.value_kind() {
            ValueKind::Instant => self
                .instants
                .find_by_sensor_within_period(id, period)
                .await?
                .into_iter()
                .map(Measurement::Instant)
                .collect(),
            ValueKind::Period => self
                .periods
                .find_by_sensor_within_period(id, period)
                .await?
                .into_iter()
                .map(Measurement::Period)
                .collect(),
            ValueKind::InstantLocation => self
                .locations
                .find_by_sensor_within_period(id, period)
                .await?
                .into_iter()
                .map(Measurement::InstantLocation)
                .collect(),
        })
    }

    /// The latest value of `sensor`, read from the store matching its value kind.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn last_recorded(&self, sensor: &Sensor) -> Result<Option<Measurement>, SmartHomeError> {
        let id = sensor.id();
        Ok(match sensor.value_kind() {
            ValueKind::Instant => self
                .instants
                .find_last_recorded(id)
                .await?
                .map(Measurement::Instant),
            ValueKind::Period => self
                .periods
                .find_by_sensor(id)
                .await?
                .into_iter()
                .max_by_key(PeriodValue::end)
                .map(Measurement::Period),
            ValueKind::InstantLocation => self
                .locations
                .find_last_recorded(id)
                .await?
                .map(Measurement::InstantLocation),
        })
    }
}

/// Application service for recording and reading measurements.
pub struct ValueService<S, I, P, L> {
    sensors: S,
    stores: ValueStores<I, P, L>,
}

impl<S, I, P, L> ValueService<S, I, P, L>
where
    S: SensorRepository,
    I: InstantValueRepository,
    P: PeriodValueRepository,
    L: InstantLocationValueRepository,
{
    /// Create a new service backed by the sensor repository and value stores.
    pub fn new(sensors: S, stores: ValueStores<I, P, L>) -> Self {
        Self { sensors, stores }
    }

    async fn sensor_of_kind(
        &self,
        sensor_id: &SensorId,
        actual: ValueKind,
    ) -> Result<Sensor, SmartHomeError> {
        let sensor = self.sensors.find_by_id(sensor_id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Sensor",
                id: sensor_id.to_string(),
            }
        })?;
        let expected = sensor.value_kind();
        if expected != actual {
            return Err(ValidationError::ValueKindMismatch { expected, actual }.into());
        }
        Ok(sensor)
    }

    /// Record a reading taken at `recorded_at`.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the sensor does not exist,
    /// [`SmartHomeError::Validation`] when the sensor does not record instant
    /// values or the measurement does not fit its units, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn record_instant(
        &self,
        sensor_id: &SensorId,
        measurement: &str,
        recorded_at: Timestamp,
    ) -> Result<ValueId, SmartHomeError> {
        let sensor = self.sensor_of_kind(sensor_id, ValueKind::Instant).await?;
        let value = InstantValue::builder()
            .sensor_id(sensor.id().clone())
            .reading(sensor.reading(measurement)?)
            .recorded_at(recorded_at)
            .build()?;
        self.stores.instants.save(value).await
    }

    /// Record a reading aggregated over `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the sensor does not exist,
    /// [`SmartHomeError::Validation`] when the sensor does not record period
    /// values, the measurement does not fit its units or `start > end`, or a
    /// storage error.
    #[tracing::instrument(skip(self))]
    pub async fn record_period(
        &self,
        sensor_id: &SensorId,
        measurement: &str,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<ValueId, SmartHomeError> {
        let sensor = self.sensor_of_kind(sensor_id, ValueKind::Period).await?;
        let value = PeriodValue::builder()
            .sensor_id(sensor.id().clone())
            .reading(sensor.reading(measurement)?)
            .start(start)
            .end(end)
            .build()?;
        self.stores.periods.save(value).await
    }

    /// Record a reading taken at `recorded_at` and `gps`.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the sensor does not exist,
    /// [`SmartHomeError::Validation`] when the sensor does not record located
    /// values or the measurement does not fit its units, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn record_instant_location(
        &self,
        sensor_id: &SensorId,
        measurement: &str,
        recorded_at: Timestamp,
        gps: GpsCode,
    ) -> Result<ValueId, SmartHomeError> {
        let sensor = self
            .sensor_of_kind(sensor_id, ValueKind::InstantLocation)
            .await?;
        let value = InstantLocationValue::builder()
            .sensor_id(sensor.id().clone())
            .reading(sensor.reading(measurement)?)
            .recorded_at(recorded_at)
            .gps(gps)
            .build()?;
        self.stores.locations.save(value).await
    }

    /// Every value recorded by the sensors of a device within `period`,
    /// grouped by sensor functionality. A functionality whose sensors have no
    /// value in the period maps to an empty list.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repositories.
    pub async fn measurements_in_period(
        &self,
        device_id: &DeviceId,
        period: &Period,
    ) -> Result<BTreeMap<SensorFunctionalityId, Vec<Measurement>>, SmartHomeError> {
        let mut grouped: BTreeMap<SensorFunctionalityId, Vec<Measurement>> = BTreeMap::new();
        for sensor in self.sensors.find_by_device(device_id).await? {
            let values = self.stores.within_period(&sensor, period).await?;
            grouped
                .entry(sensor.functionality_id().clone())
                .or_default()
                .extend(values);
        }
        Ok(grouped)
    }

    /// The latest value recorded by any sensor of a device with the given functionality.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repositories.
    pub async fn last_measurement(
        &self,
        device_id: &DeviceId,
        functionality_id: &SensorFunctionalityId,
    ) -> Result<Option<Measurement>, SmartHomeError> {
        let mut latest: Option<Measurement> = None;
        for sensor in self
            .sensors
            .find_by_device_and_functionality(device_id, functionality_id)
            .await?
        {
            if let Some(candidate) = self.stores.last_recorded(&sensor).await? {
                let newer = latest
                    .as_ref()
                    .is_none_or(|current| candidate.observed_at() > current.observed_at());
                if newer {
                    latest = Some(candidate);
                }
            }
        }
        Ok(latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{InMemoryStore, at, store};
    use std::sync::Arc;

    type Shared = Arc<InMemoryStore>;
    type Service = ValueService<Shared, Shared, Shared, Shared>;

    fn make_service() -> Service {
        let store = store();
        store.put_room("Room001", 2.5);
        store.put_device("Device001", "Room001");
        store.put_sensor("Sensor001", "Device001", "TemperatureCelsius");
        store.put_sensor("Sensor002", "Device001", "PowerAverage");
        store.put_sensor("Sensor003", "Device001", "Sunrise");
        store.put_sensor("Sensor004", "Device001", "TemperatureCelsius");
        ValueService::new(
            store.clone(),
            ValueStores {
                instants: store.clone(),
                periods: store.clone(),
                locations: store,
            },
        )
    }

    fn sensor(value: &str) -> SensorId {
        SensorId::new(value).unwrap()
    }

    fn device() -> DeviceId {
        DeviceId::new("Device001").unwrap()
    }

    #[tokio::test]
    async fn should_record_instant_value_for_instant_sensor() {
        let svc = make_service();
        svc.record_instant(&sensor("Sensor001"), "21.5", at(8, 0))
            .await
            .unwrap();

        let last = svc
            .last_measurement(
                &device(),
                &SensorFunctionalityId::new("TemperatureCelsius").unwrap(),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(last.reading().to_string(), "21.5 ºC");
    }

    #[tokio::test]
    async fn should_reject_value_of_wrong_kind() {
        let svc = make_service();
        let result = svc
            .record_instant(&sensor("Sensor002"), "300", at(8, 0))
            .await;
        assert!(matches!(
            result,
            Err(SmartHomeError::Validation(ValidationError::ValueKindMismatch {
                expected: ValueKind::Period,
                actual: ValueKind::Instant,
            }))
        ));
    }

    #[tokio::test]
    async fn should_reject_value_for_unknown_sensor() {
        let svc = make_service();
        let result = svc.record_instant(&sensor("Ghost"), "1", at(8, 0)).await;
        assert!(matches!(result, Err(SmartHomeError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_reject_period_value_with_inverted_bounds() {
        let svc = make_service();
        let result = svc
            .record_period(&sensor("Sensor002"), "300", at(9, 0), at(8, 45))
            .await;
        assert!(matches!(
            result,
            Err(SmartHomeError::Validation(ValidationError::InvalidPeriod))
        ));
    }

    #[tokio::test]
    async fn should_group_device_measurements_by_functionality() {
        let svc = make_service();
        let gps = GpsCode::new(41.15, -8.61).unwrap();
        svc.record_instant(&sensor("Sensor001"), "20", at(8, 0))
            .await
            .unwrap();
        svc.record_instant(&sensor("Sensor004"), "22", at(8, 30))
            .await
            .unwrap();
        svc.record_instant(&sensor("Sensor001"), "25", at(12, 0))
            .await
            .unwrap();
        svc.record_period(&sensor("Sensor002"), "300", at(8, 0), at(8, 15))
            .await
            .unwrap();
        svc.record_instant_location(&sensor("Sensor003"), "6.5", at(8, 10), gps)
            .await
            .unwrap();

        let period = Period::new(at(8, 0), at(9, 0)).unwrap();
        let grouped = svc.measurements_in_period(&device(), &period).await.unwrap();

        let temperature = SensorFunctionalityId::new("TemperatureCelsius").unwrap();
        let power = SensorFunctionalityId::new("PowerAverage").unwrap();
        let sunrise = SensorFunctionalityId::new("Sunrise").unwrap();
        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped[&temperature].len(), 2);
        assert_eq!(grouped[&power][0].kind(), ValueKind::Period);
        assert_eq!(grouped[&sunrise][0].kind(), ValueKind::InstantLocation);
    }

    #[tokio::test]
    async fn should_return_latest_across_sensors_of_functionality() {
        let svc = make_service();
        svc.record_instant(&sensor("Sensor001"), "20", at(8, 0))
            .await
            .unwrap();
        svc.record_instant(&sensor("Sensor004"), "23", at(9, 0))
            .await
            .unwrap();
        svc.record_instant(&sensor("Sensor001"), "21", at(8, 30))
            .await
            .unwrap();

        let last = svc
            .last_measurement(
                &device(),
                &SensorFunctionalityId::new("TemperatureCelsius").unwrap(),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(last.sensor_id(), &sensor("Sensor004"));
        assert_eq!(last.observed_at(), at(9, 0));
    }

    #[tokio::test]
    async fn should_return_none_when_nothing_recorded() {
        let svc = make_service();
        let last = svc
            .last_measurement(&device(), &SensorFunctionalityId::new("Sunrise").unwrap())
            .await
            .unwrap();
        assert!(last.is_none());
    }

    #[tokio::test]
    async fn should_list_functionality_without_values_as_empty() {
        let svc = make_service();
        svc.record_instant(&sensor("Sensor001"), "20", at(12, 0))
            .await
            .unwrap();

        let period = Period::new(at(8, 0), at(9, 0)).unwrap();
        let grouped = svc.measurements_in_period(&device(), &period).await.unwrap();

        let temperature = SensorFunctionalityId::new("TemperatureCelsius").unwrap();
        assert_eq!(grouped.len(), 3);
        assert!(grouped[&temperature].is_empty());
        assert!(grouped.values().all(Vec::is_empty));
    }
}
