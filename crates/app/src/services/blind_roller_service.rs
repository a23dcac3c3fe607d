//! Blind roller service: find blind-equipped devices and drive their blinds.

use std::collections::BTreeMap;

use smarthome_domain::actuator::{ActuatorCommand, ActuatorTarget};
use smarthome_domain::error::{InactiveDeviceError, NotFoundError, SmartHomeError};
use smarthome_domain::functionality::ActuatorBehavior;
use smarthome_domain::id::{ActuatorId, DeviceId, RoomId};

use crate::ports::{ActuatorRepository, DeviceRepository};

pub struct BlindRollerService<A, D> {
    actuators: A,
    devices: D,
}

impl<A: ActuatorRepository, D: DeviceRepository> BlindRollerService<A, D> {
    pub fn new(actuators: A, devices: D) -> Self {
        Self { actuators, devices }
    }

    /// Active devices carrying at least one blind setter, with their room.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repositories.
    pub async fn devices_with_blinds(&self) -> Result<BTreeMap<DeviceId, RoomId>, SmartHomeError> {
        let mut found = BTreeMap::new();
        for actuator in self.actuators.find_all().await? {
            if actuator.behavior() != ActuatorBehavior::BlindSetter
                || found.contains_key(actuator.device_id())
            {
                continue;
            }
            match self.devices.find_by_id(actuator.device_id()).await? {
                Some(device) if device.is_active() => {
                    found.insert(device.id().clone(), device.room_id().clone());
                }
                Some(_) => {}
                None => {
                    tracing::debug!(device_id = %actuator.device_id(), "blind actuator on missing device");
                }
            }
        }
        Ok(found)
    }

    /// Move every blind of a device to `percentage` (0 closed, 100 open).
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the device does not exist or
    /// has no blind setter, [`SmartHomeError::InactiveDevice`] when it is
    /// deactivated, [`SmartHomeError::Validation`] when the percentage is out
    /// of range, or a storage error from the repositories.
    #[tracing::instrument(skip(self))]
    pub async fn set_blind_position(
        &self,
        device_id: &DeviceId,
        percentage: f64,
    ) -> Result<Vec<(ActuatorId, ActuatorTarget)>, SmartHomeError> {
        let device = self.devices.find_by_id(device_id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: device_id.to_string(),
            }
        })?;
        if !device.is_active() {
            return Err(InactiveDeviceError {
                device_id: device_id.clone(),
            }
            .into());
        }

        let mut targets = Vec::new();
        for actuator in self.actuators.find_by_device(device_id).await? {
            if actuator.behavior() != ActuatorBehavior::BlindSetter {
                continue;
            }
            let target = actuator.command(ActuatorCommand::Percentage(percentage))?;
            targets.push((actuator.id().clone(), target));
        }
        if targets.is_empty() {
            return Err(NotFoundError {
                entity: "BlindActuator",
                id: device_id.to_string(),
            }
            .into());
        }
        tracing::info!(device_id = %device_id, blinds = targets.len(), "blinds positioned");
        Ok(targets)
    }
}
