//! Group the devices of the house by the functionalities they expose.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use smarthome_domain::error::SmartHomeError;
use smarthome_domain::functionality::FunctionalityKey;
use smarthome_domain::id::{DeviceId, RoomId};

use crate::ports::{ActuatorRepository, DeviceRepository, RoomRepository, SensorRepository};

/// Functionality → room → devices owning that functionality in the room.
pub type DeviceGrouping = BTreeMap<FunctionalityKey, BTreeMap<RoomId, BTreeSet<DeviceId>>>;

pub struct DeviceGroupingQuery<D, R, S, A> {
    devices: D,
    rooms: R,
    sensors: S,
    actuators: A,
}

impl<D, R, S, A> DeviceGroupingQuery<D, R, S, A>
where
    D: DeviceRepository,
    R: RoomRepository,
    S: SensorRepository,
    A: ActuatorRepository,
{
    pub fn new(devices: D, rooms: R, sensors: S, actuators: A) -> Self {
        Self {
            devices,
            rooms,
            sensors,
            actuators,
        }
    }

    /// Every device that owns a sensor or actuator, keyed by functionality
    /// then room. Entries whose device or room cannot be resolved are skipped.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repositories.
    #[tracing::instrument(skip(self))]
    pub async fn devices_by_functionality(&self) -> Result<DeviceGrouping, SmartHomeError> {
        let mut owners = Vec::new();
        for sensor in self.sensors.find_all().await? {
            owners.push((
                FunctionalityKey::Sensor(sensor.functionality_id().clone()),
                sensor.device_id().clone(),
            ));
        }
        for actuator in self.actuators.find_all().await? {
            owners.push((
                FunctionalityKey::Actuator(actuator.functionality_id().clone()),
                actuator.device_id().clone(),
            ));
        }

        let mut rooms: HashMap<DeviceId, Option<RoomId>> = HashMap::new();
        let mut grouping = DeviceGrouping::new();
        for (key, device_id) in owners {
            let room_id = match rooms.entry(device_id.clone()) {
                Entry::Occupied(entry) => entry.get().clone(),
                Entry::Vacant(entry) => entry.insert(self.resolve_room(&device_id).await?).clone(),
            };
            let Some(room_id) = room_id else {
                continue;
            };
            grouping
                .entry(key)
                .or_default()
                .entry(room_id)
                .or_default()
                .insert(device_id);
        }
        Ok(grouping)
    }

    async fn resolve_room(&self, device_id: &DeviceId) -> Result<Option<RoomId>, SmartHomeError> {
        let Some(device) = self.devices.find_by_id(device_id).await? else {
            tracing::debug!(device_id = %device_id, "skipping functionality of unknown device");
            return Ok(None);
        };
        if !self.rooms.exists_by_id(device.room_id()).await? {
            tracing::debug!(device_id = %device_id, room_id = %device.room_id(), "skipping device of unknown room");
            return Ok(None);
        }
        Ok(Some(device.room_id().clone()))
    }
}
