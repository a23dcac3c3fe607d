//! Device service: use-cases for managing devices.

use smarthome_domain::device::{Device, DeviceModel};
use smarthome_domain::error::{AlreadyExistsError, NotFoundError, SmartHomeError};
use smarthome_domain::id::{DeviceId, HouseId, RoomId};

use crate::ports::{DeviceRepository, RoomRepository};

/// Application service for device operations.
pub struct DeviceService<D, R> {
    devices: D,
    rooms: R,
}

impl<D: DeviceRepository, R: RoomRepository> DeviceService<D, R> {
    /// Create a new service backed by the given repositories.
    pub fn new(devices: D, rooms: R) -> Self {
        Self { devices, rooms }
    }

    /// Create an active device in an existing room.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the room does not exist,
    /// [`SmartHomeError::AlreadyExists`] when the device id is taken, or a
    /// storage error from the repositories.
    #[tracing::instrument(skip(self, model), fields(model = %model))]
    pub async fn create_device(
        &self,
        id: DeviceId,
        model: DeviceModel,
        room_id: RoomId,
    ) -> Result<Device, SmartHomeError> {
        if !self.rooms.exists_by_id(&room_id).await? {
            return Err(NotFoundError {
                entity: "Room",
                id: room_id.to_string(),
            }
            .into());
        }
        if self.devices.exists_by_id(&id).await? {
            return Err(AlreadyExistsError {
                entity: "Device",
                id: id.to_string(),
            }
            .into());
        }
        self.devices.save(Device::new(id, model, room_id)).await
    }

    /// Deactivate a device.
    ///
    /// Returns `Ok(false)` when the device was already inactive.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the device does not exist,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn deactivate_device(&self, id: &DeviceId) -> Result<bool, SmartHomeError> {
        let mut device = self.get_device(id).await?;
        if !device.deactivate() {
            tracing::debug!(device_id = %id, "device already inactive");
            return Ok(false);
        }
        self.devices.update(device).await?;
        Ok(true)
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no device with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_device(&self, id: &DeviceId) -> Result<Device, SmartHomeError> {
        self.devices.find_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List the devices of a room.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the room does not exist, or
    /// a storage error from the repositories.
    pub async fn list_devices_in_room(
        &self,
        room_id: &RoomId,
    ) -> Result<Vec<Device>, SmartHomeError> {
        if !self.rooms.exists_by_id(room_id).await? {
            return Err(NotFoundError {
                entity: "Room",
                id: room_id.to_string(),
            }
            .into());
        }
        self.devices.find_by_room(room_id).await
    }

    /// List the devices of every room of the house.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repositories.
    pub async fn list_devices_in_house(
        &self,
        house_id: &HouseId,
    ) -> Result<Vec<Device>, SmartHomeError> {
        let mut devices = Vec::new();
        for room in self.rooms.find_by_house(house_id).await? {
            devices.extend(self.devices.find_by_room(room.id()).await?);
        }
        Ok(devices)
    }
}
