//! In-memory fake implementing every storage port, for service tests.

use std::future::Future;
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use smarthome_domain::actuator::{Actuator, ActuatorProperties};
use smarthome_domain::device::{Device, DeviceModel};
use smarthome_domain::error::{AlreadyExistsError, NotFoundError, SmartHomeError};
use smarthome_domain::functionality::{ActuatorCatalog, SensorCatalog};
use smarthome_domain::house::House;
use smarthome_domain::id::{
    ActuatorFunctionalityId, ActuatorId, DeviceId, HouseId, RoomId, SensorFunctionalityId,
    SensorId, ValueId,
};
use smarthome_domain::room::{Room, RoomDimensions, RoomFloor};
use smarthome_domain::sensor::Sensor;
use smarthome_domain::time::{Period, Timestamp};
use smarthome_domain::value::{InstantLocationValue, InstantValue, PeriodValue};

use crate::ports::{
    ActuatorRepository, DeviceRepository, HouseRepository, InstantLocationValueRepository,
    InstantValueRepository, PeriodValueRepository, RoomRepository, SensorRepository,
};

#[derive(Default)]
pub struct InMemoryStore {
    pub houses: Mutex<Vec<House>>,
    pub rooms: Mutex<Vec<Room>>,
    pub devices: Mutex<Vec<Device>>,
    pub sensors: Mutex<Vec<Sensor>>,
    pub actuators: Mutex<Vec<Actuator>>,
    pub instants: Mutex<Vec<InstantValue>>,
    pub periods: Mutex<Vec<PeriodValue>>,
    pub locations: Mutex<Vec<InstantLocationValue>>,
}

pub fn store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::default())
}

pub fn at(hour: u32, minute: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2024, 3, 1, hour, minute, 0).unwrap()
}

fn ready<T: Send>(value: T) -> impl Future<Output = T> + Send {
    async move { value }
}

fn insert_unique<T: Clone>(
    rows: &Mutex<Vec<T>>,
    row: T,
    entity: &'static str,
    id: &str,
    same: impl Fn(&T) -> bool,
) -> Result<T, SmartHomeError> {
    let mut rows = rows.lock().unwrap();
    if rows.iter().any(same) {
        return Err(AlreadyExistsError {
            entity,
            id: id.to_string(),
        }
        .into());
    }
    rows.push(row.clone());
    Ok(row)
}

fn replace<T: Clone>(
    rows: &Mutex<Vec<T>>,
    row: T,
    entity: &'static str,
    id: &str,
    same: impl Fn(&T) -> bool,
) -> Result<T, SmartHomeError> {
    let mut rows = rows.lock().unwrap();
    let Some(slot) = rows.iter_mut().find(|r| same(r)) else {
        return Err(NotFoundError {
            entity,
            id: id.to_string(),
        }
        .into());
    };
    *slot = row.clone();
    Ok(row)
}

fn select<T: Clone>(rows: &Mutex<Vec<T>>, keep: impl Fn(&T) -> bool) -> Vec<T> {
    rows.lock().unwrap().iter().filter(|r| keep(r)).cloned().collect()
}

impl HouseRepository for InMemoryStore {
    fn save(&self, house: House) -> impl Future<Output = Result<House, SmartHomeError>> + Send {
        let id = house.id().to_string();
        ready(insert_unique(&self.houses, house, "House", &id, |_| true))
    }

    fn update(&self, house: House) -> impl Future<Output = Result<House, SmartHomeError>> + Send {
        let id = house.id().clone();
        ready(replace(&self.houses, house, "House", id.as_str(), |h| {
            h.id() == &id
        }))
    }

    fn find_by_id(
        &self,
        id: &HouseId,
    ) -> impl Future<Output = Result<Option<House>, SmartHomeError>> + Send {
        ready(Ok(select(&self.houses, |h| h.id() == id).pop()))
    }

    fn exists_by_id(
        &self,
        id: &HouseId,
    ) -> impl Future<Output = Result<bool, SmartHomeError>> + Send {
        ready(Ok(!select(&self.houses, |h| h.id() == id).is_empty()))
    }

    fn find_the_house(&self) -> impl Future<Output = Result<Option<House>, SmartHomeError>> + Send {
        ready(Ok(select(&self.houses, |_| true).pop()))
    }
}

impl RoomRepository for InMemoryStore {
    fn save(&self, room: Room) -> impl Future<Output = Result<Room, SmartHomeError>> + Send {
        let id = room.id().clone();
        ready(insert_unique(&self.rooms, room, "Room", id.as_str(), |r| {
            r.id() == &id
        }))
    }

    fn update(&self, room: Room) -> impl Future<Output = Result<Room, SmartHomeError>> + Send {
        let id = room.id().clone();
        ready(replace(&self.rooms, room, "Room", id.as_str(), |r| r.id() == &id))
    }

    fn find_by_id(
        &self,
        id: &RoomId,
    ) -> impl Future<Output = Result<Option<Room>, SmartHomeError>> + Send {
        ready(Ok(select(&self.rooms, |r| r.id() == id).pop()))
    }

    fn exists_by_id(&self, id: &RoomId) -> impl Future<Output = Result<bool, SmartHomeError>> + Send {
        ready(Ok(!select(&self.rooms, |r| r.id() == id).is_empty()))
    }

    fn find_by_house(
        &self,
        house_id: &HouseId,
    ) -> impl Future<Output = Result<Vec<Room>, SmartHomeError>> + Send {
        ready(Ok(select(&self.rooms, |r| r.house_id() == house_id)))
    }
}

impl DeviceRepository for InMemoryStore {
    fn save(&self, device: Device) -> impl Future<Output = Result<Device, SmartHomeError>> + Send {
        let id = device.id().clone();
        ready(insert_unique(&self.devices, device, "Device", id.as_str(), |d| {
            d.id() == &id
        }))
    }

    fn update(
        &self,
        device: Device,
    ) -> impl Future<Output = Result<Device, SmartHomeError>> + Send {
        let id = device.id().clone();
        ready(replace(&self.devices, device, "Device", id.as_str(), |d| {
            d.id() == &id
        }))
    }

    fn find_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, SmartHomeError>> + Send {
        ready(Ok(select(&self.devices, |d| d.id() == id).pop()))
    }

    fn exists_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<bool, SmartHomeError>> + Send {
        ready(Ok(!select(&self.devices, |d| d.id() == id).is_empty()))
    }

    fn find_by_room(
        &self,
        room_id: &RoomId,
    ) -> impl Future<Output = Result<Vec<Device>, SmartHomeError>> + Send {
        ready(Ok(select(&self.devices, |d| d.room_id() == room_id)))
    }

    fn find_all(&self) -> impl Future<Output = Result<Vec<Device>, SmartHomeError>> + Send {
        ready(Ok(select(&self.devices, |_| true)))
    }
}

impl SensorRepository for InMemoryStore {
    fn save(&self, sensor: Sensor) -> impl Future<Output = Result<Sensor, SmartHomeError>> + Send {
        let id = sensor.id().clone();
        ready(insert_unique(&self.sensors, sensor, "Sensor", id.as_str(), |s| {
            s.id() == &id
        }))
    }

    fn find_by_id(
        &self,
        id: &SensorId,
    ) -> impl Future<Output = Result<Option<Sensor>, SmartHomeError>> + Send {
        ready(Ok(select(&self.sensors, |s| s.id() == id).pop()))
    }

    fn exists_by_id(
        &self,
        id: &SensorId,
    ) -> impl Future<Output = Result<bool, SmartHomeError>> + Send {
        ready(Ok(!select(&self.sensors, |s| s.id() == id).is_empty()))
    }

    fn find_by_device(
        &self,
        device_id: &DeviceId,
    ) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send {
        ready(Ok(select(&self.sensors, |s| s.device_id() == device_id)))
    }

    fn find_by_device_and_functionality(
        &self,
        device_id: &DeviceId,
        functionality_id: &SensorFunctionalityId,
    ) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send {
        ready(Ok(select(&self.sensors, |s| {
            s.device_id() == device_id && s.functionality_id() == functionality_id
        })))
    }

    fn find_by_functionality(
        &self,
        functionality_id: &SensorFunctionalityId,
    ) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send {
        ready(Ok(select(&self.sensors, |s| {
            s.functionality_id() == functionality_id
        })))
    }

    fn find_all(&self) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send {
        ready(Ok(select(&self.sensors, |_| true)))
    }
}

impl ActuatorRepository for InMemoryStore {
    fn save(
        &self,
        actuator: Actuator,
    ) -> impl Future<Output = Result<Actuator, SmartHomeError>> + Send {
        let id = actuator.id().clone();
        ready(insert_unique(
            &self.actuators,
            actuator,
            "Actuator",
            id.as_str(),
            |a| a.id() == &id,
        ))
    }

    fn find_by_id(
        &self,
        id: &ActuatorId,
    ) -> impl Future<Output = Result<Option<Actuator>, SmartHomeError>> + Send {
        ready(Ok(select(&self.actuators, |a| a.id() == id).pop()))
    }

    fn exists_by_id(
        &self,
        id: &ActuatorId,
    ) -> impl Future<Output = Result<bool, SmartHomeError>> + Send {
        ready(Ok(!select(&self.actuators, |a| a.id() == id).is_empty()))
    }

    fn find_by_device(
        &self,
        device_id: &DeviceId,
    ) -> impl Future<Output = Result<Vec<Actuator>, SmartHomeError>> + Send {
        ready(Ok(select(&self.actuators, |a| a.device_id() == device_id)))
    }

    fn find_by_device_and_functionality(
        &self,
        device_id: &DeviceId,
        functionality_id: &ActuatorFunctionalityId,
    ) -> impl Future<Output = Result<Vec<Actuator>, SmartHomeError>> + Send {
        ready(Ok(select(&self.actuators, |a| {
            a.device_id() == device_id && a.functionality_id() == functionality_id
        })))
    }

    fn find_by_functionality(
        &self,
        functionality_id: &ActuatorFunctionalityId,
    ) -> impl Future<Output = Result<Vec<Actuator>, SmartHomeError>> + Send {
        ready(Ok(select(&self.actuators, |a| {
            a.functionality_id() == functionality_id
        })))
    }

    fn find_all(&self) -> impl Future<Output = Result<Vec<Actuator>, SmartHomeError>> + Send {
        ready(Ok(select(&self.actuators, |_| true)))
    }
}

impl InstantValueRepository for InMemoryStore {
    fn save(
        &self,
        value: InstantValue,
    ) -> impl Future<Output = Result<ValueId, SmartHomeError>> + Send {
        let id = value.id().clone();
        self.instants.lock().unwrap().push(value);
        ready(Ok(id))
    }

    fn find_by_sensor(
        &self,
        sensor_id: &SensorId,
    ) -> impl Future<Output = Result<Vec<InstantValue>, SmartHomeError>> + Send {
        ready(Ok(select(&self.instants, |v| v.sensor_id() == sensor_id)))
    }

    fn find_by_sensor_within_period(
        &self,
        sensor_id: &SensorId,
        period: &Period,
    ) -> impl Future<Output = Result<Vec<InstantValue>, SmartHomeError>> + Send {
        ready(Ok(select(&self.instants, |v| {
            v.sensor_id() == sensor_id && period.contains(v.recorded_at())
        })))
    }

    fn find_last_recorded(
        &self,
        sensor_id: &SensorId,
    ) -> impl Future<Output = Result<Option<InstantValue>, SmartHomeError>> + Send {
        ready(Ok(select(&self.instants, |v| v.sensor_id() == sensor_id)
            .into_iter()
            .max_by_key(InstantValue::recorded_at)))
    }
}

impl PeriodValueRepository for InMemoryStore {
    fn save(
        &self,
        value: PeriodValue,
    ) -> impl Future<Output = Result<ValueId, SmartHomeError>> + Send {
        let id = value.id().clone();
        self.periods.lock().unwrap().push(value);
        ready(Ok(id))
    }

    fn find_by_sensor(
        &self,
        sensor_id: &SensorId,
    ) -> impl Future<Output = Result<Vec<PeriodValue>, SmartHomeError>> + Send {
        ready(Ok(select(&self.periods, |v| v.sensor_id() == sensor_id)))
    }

    fn find_by_sensor_within_period(
        &self,
        sensor_id: &SensorId,
        period: &Period,
    ) -> impl Future<Output = Result<Vec<PeriodValue>, SmartHomeError>> + Send {
        ready(Ok(select(&self.periods, |v| {
            v.sensor_id() == sensor_id && period.encloses(v.start(), v.end())
        })))
    }
}

impl InstantLocationValueRepository for InMemoryStore {
    fn save(
        &self,
        value: InstantLocationValue,
    ) -> impl Future<Output = Result<ValueId, SmartHomeError>> + Send {
        let id = value.id().clone();
        self.locations.lock().unwrap().push(value);
        ready(Ok(id))
    }

    fn find_by_sensor(
        &self,
        sensor_id: &SensorId,
    ) -> impl Future<Output = Result<Vec<InstantLocationValue>, SmartHomeError>> + Send {
        ready(Ok(select(&self.locations, |v| v.sensor_id() == sensor_id)))
    }

    fn find_by_sensor_within_period(
        &self,
        sensor_id: &SensorId,
        period: &Period,
    ) -> impl Future<Output = Result<Vec<InstantLocationValue>, SmartHomeError>> + Send {
        ready(Ok(select(&self.locations, |v| {
            v.sensor_id() == sensor_id && period.contains(v.recorded_at())
        })))
    }

    fn find_last_recorded(
        &self,
        sensor_id: &SensorId,
    ) -> impl Future<Output = Result<Option<InstantLocationValue>, SmartHomeError>> + Send {
        ready(Ok(select(&self.locations, |v| v.sensor_id() == sensor_id)
            .into_iter()
            .max_by_key(InstantLocationValue::recorded_at)))
    }
}

/// Seed helpers writing straight into the fake, bypassing services.
impl InMemoryStore {
    pub fn put_room(&self, id: &str, height: f64) -> RoomId {
        let room = Room::builder()
            .id(RoomId::new(id).unwrap())
            .floor(RoomFloor::new(0))
            .dimensions(RoomDimensions::new(4.0, 4.0, height).unwrap())
            .house_id(HouseId::new("House001").unwrap())
            .build()
            .unwrap();
        let room_id = room.id().clone();
        self.rooms.lock().unwrap().push(room);
        room_id
    }

    pub fn put_device(&self, id: &str, room: &str) -> DeviceId {
        let device = Device::new(
            DeviceId::new(id).unwrap(),
            DeviceModel::new("T8115").unwrap(),
            RoomId::new(room).unwrap(),
        );
        let device_id = device.id().clone();
        self.devices.lock().unwrap().push(device);
        device_id
    }

    pub fn put_sensor(&self, id: &str, device: &str, functionality: &str) -> SensorId {
        let sensor = Sensor::create(
            SensorId::new(id).unwrap(),
            DeviceId::new(device).unwrap(),
            SensorFunctionalityId::new(functionality).unwrap(),
            &SensorCatalog::standard(),
        )
        .unwrap();
        let sensor_id = sensor.id().clone();
        self.sensors.lock().unwrap().push(sensor);
        sensor_id
    }

    pub fn put_actuator(
        &self,
        id: &str,
        device: &str,
        functionality: &str,
        properties: ActuatorProperties,
    ) -> ActuatorId {
        let actuator = Actuator::create(
            ActuatorId::new(id).unwrap(),
            ActuatorFunctionalityId::new(functionality).unwrap(),
            properties,
            DeviceId::new(device).unwrap(),
            &ActuatorCatalog::standard(),
        )
        .unwrap();
        let actuator_id = actuator.id().clone();
        self.actuators.lock().unwrap().push(actuator);
        actuator_id
    }
}
