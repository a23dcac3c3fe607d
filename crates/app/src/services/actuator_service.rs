//! Actuator service: use-cases for attaching actuators to devices.

use std::sync::Arc;

use smarthome_domain::actuator::{Actuator, ActuatorProperties};
use smarthome_domain::error::{
    AlreadyExistsError, InactiveDeviceError, NotFoundError, SmartHomeError,
};
use smarthome_domain::functionality::ActuatorCatalog;
use smarthome_domain::id::{ActuatorFunctionalityId, ActuatorId, DeviceId};

use crate::ports::{ActuatorRepository, DeviceRepository};

/// Application service for actuator operations.
pub struct ActuatorService<A, D> {
    actuators: A,
    devices: D,
    catalog: Arc<ActuatorCatalog>,
}

impl<A: ActuatorRepository, D: DeviceRepository> ActuatorService<A, D> {
    /// Create a new service backed by the given repositories and catalog.
    pub fn new(actuators: A, devices: D, catalog: Arc<ActuatorCatalog>) -> Self {
        Self {
            actuators,
            devices,
            catalog,
        }
    }

    /// Create an actuator on an active device.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the device does not exist,
    /// [`SmartHomeError::InactiveDevice`] when it is deactivated,
    /// [`SmartHomeError::FunctionalityNotListed`] for unknown functionalities,
    /// [`SmartHomeError::Validation`] when the properties do not fit the
    /// functionality, [`SmartHomeError::AlreadyExists`] when the actuator id
    /// is taken, or a storage error from the repositories.
    #[tracing::instrument(skip(self, properties))]
    pub async fn create_actuator(
        &self,
        id: ActuatorId,
        functionality_id: ActuatorFunctionalityId,
        properties: ActuatorProperties,
        device_id: DeviceId,
    ) -> Result<Actuator, SmartHomeError> {
        let device = self.devices.find_by_id(&device_id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: device_id.to_string(),
            }
        })?;
        if !device.is_active() {
            return Err(InactiveDeviceError { device_id }.into());
        }
        let actuator =
            Actuator::create(id, functionality_id, properties, device_id, &self.catalog)?;
        if self.actuators.exists_by_id(actuator.id()).await? {
            return Err(AlreadyExistsError {
                entity: "Actuator",
                id: actuator.id().to_string(),
            }
            .into());
        }
        self.actuators.save(actuator).await
    }

    /// Every actuator functionality, in catalog order.
    #[must_use]
    pub fn list_functionalities(&self) -> &[ActuatorFunctionalityId] {
        self.catalog.list_all()
    }

    /// Look up an actuator by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no actuator with `id`
    /// exists, or a storage error from the repository.
    pub async fn get_actuator(&self, id: &ActuatorId) -> Result<Actuator, SmartHomeError> {
        self.actuators.find_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Actuator",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List the actuators of a device.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_actuators_of_device(
        &self,
        device_id: &DeviceId,
    ) -> Result<Vec<Actuator>, SmartHomeError> {
        self.actuators.find_by_device(device_id).await
    }
}
