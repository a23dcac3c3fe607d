//! Sensor service: use-cases for attaching sensors to devices.

use std::sync::Arc;

use smarthome_domain::error::{
    AlreadyExistsError, InactiveDeviceError, NotFoundError, SmartHomeError,
};
use smarthome_domain::functionality::SensorCatalog;
use smarthome_domain::id::{DeviceId, SensorFunctionalityId, SensorId};
use smarthome_domain::sensor::Sensor;

use crate::ports::{DeviceRepository, SensorRepository};

/// Application service for sensor operations.
pub struct SensorService<S, D> {
    sensors: S,
    devices: D,
    catalog: Arc<SensorCatalog>,
}

impl<S: SensorRepository, D: DeviceRepository> SensorService<S, D> {
    /// Create a new service backed by the given repositories and catalog.
    pub fn new(sensors: S, devices: D, catalog: Arc<SensorCatalog>) -> Self {
        Self {
            sensors,
            devices,
            catalog,
        }
    }

    /// Create a sensor on an active device.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the device does not exist,
    /// [`SmartHomeError::InactiveDevice`] when it is deactivated,
    /// [`SmartHomeError::FunctionalityNotListed`] for unknown functionalities,
    /// [`SmartHomeError::AlreadyExists`] when the sensor id is taken, or a
    /// storage error from the repositories.
    #[tracing::instrument(skip(self))]
    pub async fn create_sensor(
        &self,
        id: SensorId,
        device_id: DeviceId,
        functionality_id: SensorFunctionalityId,
    ) -> Result<Sensor, SmartHomeError> {
        let device = self.devices.find_by_id(&device_id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: device_id.to_string(),
            }
        })?;
        if !device.is_active() {
            return Err(InactiveDeviceError { device_id }.into());
        }
        let sensor = Sensor::create(id, device_id, functionality_id, &self.catalog)?;
        if self.sensors.exists_by_id(sensor.id()).await? {
            return Err(AlreadyExistsError {
                entity: "Sensor",
                id: sensor.id().to_string(),
            }
            .into());
        }
        self.sensors.save(sensor).await
    }

    /// Every sensor functionality, in catalog order.
    #[must_use]
    pub fn list_functionalities(&self) -> &[SensorFunctionalityId] {
        self.catalog.list_all()
    }

    /// Look up a sensor by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no sensor with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_sensor(&self, id: &SensorId) -> Result<Sensor, SmartHomeError> {
        self.sensors.find_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Sensor",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List the sensors of a device.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_sensors_of_device(
        &self,
        device_id: &DeviceId,
    ) -> Result<Vec<Sensor>, SmartHomeError> {
        self.sensors.find_by_device(device_id).await
    }

    /// List the sensors of a device with a given functionality.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_sensors_of_device_with_functionality(
        &self,
        device_id: &DeviceId,
        functionality_id: &SensorFunctionalityId,
    ) -> Result<Vec<Sensor>, SmartHomeError> {
        self.sensors
            .find_by_device_and_functionality(device_id, functionality_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{InMemoryStore, store};
    use smarthome_domain::functionality::SensorBehavior;

    type Service = SensorService<Arc<InMemoryStore>, Arc<InMemoryStore>>;

    fn make_service() -> (Service, Arc<InMemoryStore>) {
        let store = store();
        store.put_room("Room001", 2.5);
        store.put_device("Device001", "Room001");
        let svc = SensorService::new(
            store.clone(),
            store.clone(),
            Arc::new(SensorCatalog::standard()),
        );
        (svc, store)
    }

    fn ids(sensor: &str, device: &str, functionality: &str) -> (SensorId, DeviceId, SensorFunctionalityId) {
        (
            SensorId::new(sensor).unwrap(),
            DeviceId::new(device).unwrap(),
            SensorFunctionalityId::new(functionality).unwrap(),
        )
    }

    #[tokio::test]
    async fn should_create_sensor_on_active_device() {
        let (svc, _) = make_service();
        let (id, device, functionality) = ids("Sensor001", "Device001", "TemperatureCelsius");
        let sensor = svc.create_sensor(id, device, functionality).await.unwrap();
        assert_eq!(sensor.behavior(), SensorBehavior::TemperatureCelsius);
        assert_eq!(svc.get_sensor(sensor.id()).await.unwrap(), sensor);
    }

    #[tokio::test]
    async fn should_reject_sensor_when_device_missing() {
        let (svc, _) = make_service();
        let (id, device, functionality) = ids("Sensor001", "Ghost", "TemperatureCelsius");
        let result = svc.create_sensor(id, device, functionality).await;
        assert!(matches!(result, Err(SmartHomeError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_reject_sensor_when_device_inactive() {
        let (svc, store) = make_service();
        let mut device = store.devices.lock().unwrap().pop().unwrap();
        device.deactivate();
        store.devices.lock().unwrap().push(device);

        let (id, device, functionality) = ids("Sensor001", "Device001", "TemperatureCelsius");
        let result = svc.create_sensor(id, device, functionality).await;
        assert!(matches!(result, Err(SmartHomeError::InactiveDevice(_))));
    }

    #[tokio::test]
    async fn should_reject_unlisted_functionality() {
        let (svc, store) = make_service();
        let (id, device, functionality) = ids("Sensor001", "Device001", "Telepathy");
        let result = svc.create_sensor(id, device, functionality).await;
        assert!(matches!(
            result,
            Err(SmartHomeError::FunctionalityNotListed(_))
        ));
        assert!(store.sensors.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_reject_duplicate_sensor() {
        let (svc, _) = make_service();
        let (id, device, functionality) = ids("Sensor001", "Device001", "TemperatureCelsius");
        svc.create_sensor(id.clone(), device.clone(), functionality)
            .await
            .unwrap();
        let result = svc
            .create_sensor(
                id,
                device,
                SensorFunctionalityId::new("HumidityPercentage").unwrap(),
            )
            .await;
        assert!(matches!(result, Err(SmartHomeError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn should_list_sensors_of_device_by_functionality() {
        let (svc, _) = make_service();
        for (sensor, functionality) in [
            ("Sensor001", "TemperatureCelsius"),
            ("Sensor002", "TemperatureCelsius"),
            ("Sensor003", "HumidityPercentage"),
        ] {
            let (id, device, functionality) = ids(sensor, "Device001", functionality);
            svc.create_sensor(id, device, functionality).await.unwrap();
        }
        let device = DeviceId::new("Device001").unwrap();

        assert_eq!(svc.list_sensors_of_device(&device).await.unwrap().len(), 3);
        let temperatures = svc
            .list_sensors_of_device_with_functionality(
                &device,
                &SensorFunctionalityId::new("TemperatureCelsius").unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(temperatures.len(), 2);
    }

    #[test]
    fn should_list_functionalities_in_catalog_order() {
        let (svc, _) = make_service();
        let listed = svc.list_functionalities();
        assert_eq!(listed.len(), 12);
        assert_eq!(listed[0].as_str(), "TemperatureCelsius");
    }
}
