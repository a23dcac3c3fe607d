//! In-memory implementation of [`SensorRepository`].

use std::future::Future;

use smarthome_app::ports::SensorRepository;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::{DeviceId, SensorFunctionalityId, SensorId};
use smarthome_domain::sensor::Sensor;

use crate::table::Table;

/// In-memory sensor repository.
#[derive(Clone)]
pub struct MemorySensorRepository {
    table: Table<SensorId, Sensor>,
}

impl MemorySensorRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: Table::new("sensors"),
        }
    }

    fn matching(&self, keep: impl Fn(&Sensor) -> bool) -> Result<Vec<Sensor>, SmartHomeError> {
        Ok(self.table.select(keep)?)
    }
}

impl Default for MemorySensorRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorRepository for MemorySensorRepository {
    fn save(&self, sensor: Sensor) -> impl Future<Output = Result<Sensor, SmartHomeError>> + Send {
        let result = self.table.insert_new("Sensor", sensor.id().clone(), sensor);
        async move { result }
    }

    fn find_by_id(
        &self,
        id: &SensorId,
    ) -> impl Future<Output = Result<Option<Sensor>, SmartHomeError>> + Send {
        let result = self.table.get(id).map_err(SmartHomeError::from);
        async move { result }
    }

    fn exists_by_id(
        &self,
        id: &SensorId,
    ) -> impl Future<Output = Result<bool, SmartHomeError>> + Send {
        let result = self.table.contains(id).map_err(SmartHomeError::from);
        async move { result }
    }

    fn find_by_device(
        &self,
        device_id: &DeviceId,
    ) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send {
        let result = self.matching(|sensor| sensor.device_id() == device_id);
        async move { result }
    }

    fn find_by_device_and_functionality(
        &self,
        device_id: &DeviceId,
        functionality_id: &SensorFunctionalityId,
    ) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send {
        let result = self.matching(|sensor| {
            sensor.device_id() == device_id && sensor.functionality_id() == functionality_id
        });
        async move { result }
    }

    fn find_by_functionality(
        &self,
        functionality_id: &SensorFunctionalityId,
    ) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send {
        let result = self.matching(|sensor| sensor.functionality_id() == functionality_id);
        async move { result }
    }

    fn find_all(&self) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send {
        let result = self.matching(|_| true);
        async move { result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smarthome_domain::functionality::SensorCatalog;

    fn sensor(id: &str, device: &str, functionality: &str) -> Sensor {
        Sensor::create(
            SensorId::new(id).unwrap(),
            DeviceId::new(device).unwrap(),
            SensorFunctionalityId::new(functionality).unwrap(),
            &SensorCatalog::standard(),
        )
        .unwrap()
    }

    async fn seeded() -> MemorySensorRepository {
        let repo = MemorySensorRepository::new();
        for (id, device, functionality) in [
            ("Sensor001", "Device001", "TemperatureCelsius"),
            ("Sensor002", "Device001", "HumidityPercentage"),
            ("Sensor003", "Device002", "TemperatureCelsius"),
        ] {
            repo.save(sensor(id, device, functionality)).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn should_filter_by_device_and_functionality() {
        let repo = seeded().await;
        let device = DeviceId::new("Device001").unwrap();
        let temperature = SensorFunctionalityId::new("TemperatureCelsius").unwrap();

        assert_eq!(repo.find_by_device(&device).await.unwrap().len(), 2);
        assert_eq!(
            repo.find_by_device_and_functionality(&device, &temperature)
                .await
                .unwrap()
                .len(),
            1
        );
        assert_eq!(
            repo.find_by_functionality(&temperature).await.unwrap().len(),
            2
        );
        assert_eq!(repo.find_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn should_reject_duplicate_sensor() {
        let repo = seeded().await;
        let result = repo
            .save(sensor("Sensor001", "Device002", "Scale"))
            .await;
        assert!(matches!(result, Err(SmartHomeError::AlreadyExists(_))));
    }
}
