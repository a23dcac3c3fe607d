//! In-memory implementation of [`DeviceRepository`].

use std::future::Future;

use smarthome_app::ports::DeviceRepository;
use smarthome_domain::device::Device;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::{DeviceId, RoomId};

use crate::table::Table;

const ENTITY: &str = "Device";

/// In-memory device repository.
#[derive(Clone)]
pub struct MemoryDeviceRepository {
    table: Table<DeviceId, Device>,
}

impl MemoryDeviceRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: Table::new("devices"),
        }
    }
}

impl Default for MemoryDeviceRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceRepository for MemoryDeviceRepository {
    fn save(&self, device: Device) -> impl Future<Output = Result<Device, SmartHomeError>> + Send {
        let result = self.table.insert_new(ENTITY, device.id().clone(), device);
        async move { result }
    }

    fn update(
        &self,
        device: Device,
    ) -> impl Future<Output = Result<Device, SmartHomeError>> + Send {
        let id = device.id().clone();
        let result = self.table.replace(ENTITY, &id, device);
        async move { result }
    }

    fn find_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, SmartHomeError>> + Send {
        let result = self.table.get(id).map_err(SmartHomeError::from);
        async move { result }
    }

    fn exists_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<bool, SmartHomeError>> + Send {
        let result = self.table.contains(id).map_err(SmartHomeError::from);
        async move { result }
    }

    fn find_by_room(
        &self,
        room_id: &RoomId,
    ) -> impl Future<Output = Result<Vec<Device>, SmartHomeError>> + Send {
        let result = self
            .table
            .select(|device| device.room_id() == room_id)
            .map_err(SmartHomeError::from);
        async move { result }
    }

    fn find_all(&self) -> impl Future<Output = Result<Vec<Device>, SmartHomeError>> + Send {
        let result = self.table.select(|_| true).map_err(SmartHomeError::from);
        async move { result }
    }
}
