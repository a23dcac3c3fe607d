//! Storage ports: repositories for the hierarchy and the value stores.
//!
//! Every `save` rejects an identifier that is already stored with
//! [`SmartHomeError::AlreadyExists`]; every `update` rejects a missing one with
//! [`SmartHomeError::NotFound`]. Value stores are append-only. The order of
//! returned sequences is backend-defined.

use std::future::Future;
use std::sync::Arc;

use smarthome_domain::actuator::Actuator;
use smarthome_domain::device::Device;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::house::House;
use smarthome_domain::id::{
    ActuatorFunctionalityId, ActuatorId, DeviceId, HouseId, RoomId, SensorFunctionalityId,
    SensorId, ValueId,
};
use smarthome_domain::room::Room;
use smarthome_domain::sensor::Sensor;
use smarthome_domain::time::Period;
use smarthome_domain::value::{InstantLocationValue, InstantValue, PeriodValue};

/// Storage for the single [`House`].
pub trait HouseRepository {
    /// Store the house. Fails when any house is already stored.
    fn save(&self, house: House) -> impl Future<Output = Result<House, SmartHomeError>> + Send;

    /// Replace the stored house with the same id.
    fn update(&self, house: House) -> impl Future<Output = Result<House, SmartHomeError>> + Send;

    fn find_by_id(
        &self,
        id: &HouseId,
    ) -> impl Future<Output = Result<Option<House>, SmartHomeError>> + Send;

    fn exists_by_id(&self, id: &HouseId)
    -> impl Future<Output = Result<bool, SmartHomeError>> + Send;

    /// The stored house, if one has been created.
    fn find_the_house(&self) -> impl Future<Output = Result<Option<House>, SmartHomeError>> + Send;
}

/// Storage for [`Room`]s.
pub trait RoomRepository {
    fn save(&self, room: Room) -> impl Future<Output = Result<Room, SmartHomeError>> + Send;

    fn update(&self, room: Room) -> impl Future<Output = Result<Room, SmartHomeError>> + Send;

    fn find_by_id(
        &self,
        id: &RoomId,
    ) -> impl Future<Output = Result<Option<Room>, SmartHomeError>> + Send;

    fn exists_by_id(&self, id: &RoomId) -> impl Future<Output = Result<bool, SmartHomeError>> + Send;

    fn find_by_house(
        &self,
        house_id: &HouseId,
    ) -> impl Future<Output = Result<Vec<Room>, SmartHomeError>> + Send;
}

/// Storage for [`Device`]s.
pub trait DeviceRepository {
    fn save(&self, device: Device) -> impl Future<Output = Result<Device, SmartHomeError>> + Send;

    fn update(&self, device: Device)
    -> impl Future<Output = Result<Device, SmartHomeError>> + Send;

    fn find_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, SmartHomeError>> + Send;

    fn exists_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<bool, SmartHomeError>> + Send;

    fn find_by_room(
        &self,
        room_id: &RoomId,
    ) -> impl Future<Output = Result<Vec<Device>, SmartHomeError>> + Send;

    fn find_all(&self) -> impl Future<Output = Result<Vec<Device>, SmartHomeError>> + Send;
}

/// Storage for [`Sensor`]s.
pub trait SensorRepository {
    fn save(&self, sensor: Sensor) -> impl Future<Output = Result<Sensor, SmartHomeError>> + Send;

    fn find_by_id(
        &self,
        id: &SensorId,
    ) -> impl Future<Output = Result<Option<Sensor>, SmartHomeError>> + Send;

    fn exists_by_id(
        &self,
        id: &SensorId,
    ) -> impl Future<Output = Result<bool, SmartHomeError>> + Send;

    fn find_by_device(
        &self,
        device_id: &DeviceId,
    ) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send;

    fn find_by_device_and_functionality(
        &self,
        device_id: &DeviceId,
        functionality_id: &SensorFunctionalityId,
    ) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send;

    fn find_by_functionality(
        &self,
        functionality_id: &SensorFunctionalityId,
    ) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send;

    fn find_all(&self) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send;
}

/// Storage for [`Actuator`]s.
pub trait ActuatorRepository {
    fn save(
        &self,
        actuator: Actuator,
    ) -> impl Future<Output = Result<Actuator, SmartHomeError>> + Send;

    fn find_by_id(
        &self,
        id: &ActuatorId,
    ) -> impl Future<Output = Result<Option<Actuator>, SmartHomeError>> + Send;

    fn exists_by_id(
        &self,
        id: &ActuatorId,
    ) -> impl Future<Output = Result<bool, SmartHomeError>> + Send;

    fn find_by_device(
        &self,
        device_id: &DeviceId,
    ) -> impl Future<Output = Result<Vec<Actuator>, SmartHomeError>> + Send;

    fn find_by_device_and_functionality(
        &self,
        device_id: &DeviceId,
        functionality_id: &ActuatorFunctionalityId,
    ) -> impl Future<Output = Result<Vec<Actuator>, SmartHomeError>> + Send;

    fn find_by_functionality(
        &self,
        functionality_id: &ActuatorFunctionalityId,
    ) -> impl Future<Output = Result<Vec<Actuator>, SmartHomeError>> + Send;

    fn find_all(&self) -> impl Future<Output = Result<Vec<Actuator>, SmartHomeError>> + Send;
}

/// Append-only store of [`InstantValue`]s.
pub trait InstantValueRepository {
    fn save(
        &self,
        value: InstantValue,
    ) -> impl Future<Output = Result<ValueId, SmartHomeError>> + Send;

    fn find_by_sensor(
        &self,
        sensor_id: &SensorId,
    ) -> impl Future<Output = Result<Vec<InstantValue>, SmartHomeError>> + Send;

    /// Values recorded within `period`, bounds included.
    fn find_by_sensor_within_period(
        &self,
        sensor_id: &SensorId,
        period: &Period,
    ) -> impl Future<Output = Result<Vec<InstantValue>, SmartHomeError>> + Send;

    /// The most recently recorded value of the sensor.
    fn find_last_recorded(
        &self,
        sensor_id: &SensorId,
    ) -> impl Future<Output = Result<Option<InstantValue>, SmartHomeError>> + Send;
}

/// Append-only store of [`PeriodValue`]s.
pub trait PeriodValueRepository {
    fn save(
        &self,
        value: PeriodValue,
    ) -> impl Future<Output = Result<ValueId, SmartHomeError>> + Send;

    fn find_by_sensor(
        &self,
        sensor_id: &SensorId,
    ) -> impl Future<Output = Result<Vec<PeriodValue>, SmartHomeError>> + Send;

    /// Values whose own period lies entirely within `period`, bounds included.
    fn find_by_sensor_within_period(
        &self,
        sensor_id: &SensorId,
        period: &Period,
    ) -> impl Future<Output = Result<Vec<PeriodValue>, SmartHomeError>> + Send;
}

/// Append-only store of [`InstantLocationValue`]s.
pub trait InstantLocationValueRepository {
    fn save(
        &self,
        value: InstantLocationValue,
    ) -> impl Future<Output = Result<ValueId, SmartHomeError>> + Send;

    fn find_by_sensor(
        &self,
        sensor_id: &SensorId,
    ) -> impl Future<Output = Result<Vec<InstantLocationValue>, SmartHomeError>> + Send;

    /// Values recorded within `period`, bounds included.
    fn find_by_sensor_within_period(
        &self,
        sensor_id: &SensorId,
        period: &Period,
    ) -> impl Future<Output = Result<Vec<InstantLocationValue>, SmartHomeError>> + Send;

    /// The most recently recorded value of the sensor.
    fn find_last_recorded(
        &self,
        sensor_id: &SensorId,
    ) -> impl Future<Output = Result<Option<InstantLocationValue>, SmartHomeError>> + Send;
}

impl<T: HouseRepository + Send + Sync> HouseRepository for Arc<T> {
    fn save(&self, house: House) -> impl Future<Output = Result<House, SmartHomeError>> + Send {
        (**self).save(house)
    }

    fn update(&self, house: House) -> impl Future<Output = Result<House, SmartHomeError>> + Send {
        (**self).update(house)
    }

    fn find_by_id(
        &self,
        id: &HouseId,
    ) -> impl Future<Output = Result<Option<House>, SmartHomeError>> + Send {
        (**self).find_by_id(id)
    }

    fn exists_by_id(
        &self,
        id: &HouseId,
    ) -> impl Future<Output = Result<bool, SmartHomeError>> + Send {
        (**self).exists_by_id(id)
    }

    fn find_the_house(&self) -> impl Future<Output = Result<Option<House>, SmartHomeError>> + Send {
        (**self).find_the_house()
    }
}

impl<T: RoomRepository + Send + Sync> RoomRepository for Arc<T> {
    fn save(&self, room: Room) -> impl Future<Output = Result<Room, SmartHomeError>> + Send {
        (**self).save(room)
    }

    fn update(&self, room: Room) -> impl Future<Output = Result<Room, SmartHomeError>> + Send {
        (**self).update(room)
    }

    fn find_by_id(
        &self,
        id: &RoomId,
    ) -> impl Future<Output = Result<Option<Room>, SmartHomeError>> + Send {
        (**self).find_by_id(id)
    }

    fn exists_by_id(&self, id: &RoomId) -> impl Future<Output = Result<bool, SmartHomeError>> + Send {
        (**self).exists_by_id(id)
    }

    fn find_by_house(
        &self,
        house_id: &HouseId,
    ) -> impl Future<Output = Result<Vec<Room>, SmartHomeError>> + Send {
        (**self).find_by_house(house_id)
    }
}

impl<T: DeviceRepository + Send + Sync> DeviceRepository for Arc<T> {
    fn save(&self, device: Device) -> impl Future<Output = Result<Device, SmartHomeError>> + Send {
        (**self).save(device)
    }

    fn update(
        &self,
        device: Device,
    ) -> impl Future<Output = Result<Device, SmartHomeError>> + Send {
        (**self).update(device)
    }

    fn find_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, SmartHomeError>> + Send {
        (**self).find_by_id(id)
    }

    fn exists_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<bool, SmartHomeError>> + Send {
        (**self).exists_by_id(id)
    }

    fn find_by_room(
        &self,
        room_id: &RoomId,
    ) -> impl Future<Output = Result<Vec<Device>, SmartHomeError>> + Send {
        (**self).find_by_room(room_id)
    }

    fn find_all(&self) -> impl Future<Output = Result<Vec<Device>, SmartHomeError>> + Send {
        (**self).find_all()
    }
}

impl<T: SensorRepository + Send + Sync> SensorRepository for Arc<T> {
    fn save(&self, sensor: Sensor) -> impl Future<Output = Result<Sensor, SmartHomeError>> + Send {
        (**self).save(sensor)
    }

    fn find_by_id(
        &self,
        id: &SensorId,
    ) -> impl Future<Output = Result<Option<Sensor>, SmartHomeError>> + Send {
        (**self).find_by_id(id)
    }

    fn exists_by_id(
        &self,
        id: &SensorId,
    ) -> impl Future<Output = Result<bool, SmartHomeError>> + Send {
        (**self).exists_by_id(id)
    }

    fn find_by_device(
        &self,
        device_id: &DeviceId,
    ) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send {
        (**self).find_by_device(device_id)
    }

    fn find_by_device_and_functionality(
        &self,
        device_id: &DeviceId,
        functionality_id: &SensorFunctionalityId,
    ) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send {
        (**self).find_by_device_and_functionality(device_id, functionality_id)
    }

    fn find_by_functionality(
        &self,
        functionality_id: &SensorFunctionalityId,
    ) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send {
        (**self).find_by_functionality(functionality_id)
    }

    fn find_all(&self) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send {
        (**self).find_all()
    }
}

impl<T: ActuatorRepository + Send + Sync> ActuatorRepository for Arc<T> {
    fn save(
        &self,
        actuator: Actuator,
    ) -> impl Future<Output = Result<Actuator, SmartHomeError>> + Send {
        (**self).save(actuator)
    }

    fn find_by_id(
        &self,
        id: &ActuatorId,
    ) -> impl Future<Output = Result<Option<Actuator>, SmartHomeError>> + Send {
        (**self).find_by_id(id)
    }

    fn exists_by_id(
        &self,
        id: &ActuatorId,
    ) -> impl Future<Output = Result<bool, SmartHomeError>> + Send {
        (**self).exists_by_id(id)
    }

    fn find_by_device(
        &self,
        device_id: &DeviceId,
    ) -> impl Future<Output = Result<Vec<Actuator>, SmartHomeError>> + Send {
        (**self).find_by_device(device_id)
    }

    fn find_by_device_and_functionality(
        &self,
        device_id: &DeviceId,
        functionality_id: &ActuatorFunctionalityId,
    ) -> impl Future<Output = Result<Vec<Actuator>, SmartHomeError>> + Send {
        (**self).find_by_device_and_functionality(device_id, functionality_id)
    }

    fn find_by_functionality(
        &self,
        functionality_id: &ActuatorFunctionalityId,
    ) -> impl Future<Output = Result<Vec<Actuator>, SmartHomeError>> + Send {
        (**self).find_by_functionality(functionality_id)
    }

    fn find_all(&self) -> impl Future<Output = Result<Vec<Actuator>, SmartHomeError>> + Send {
        (**self).find_all()
    }
}

impl<T: InstantValueRepository + Send + Sync> InstantValueRepository for Arc<T> {
    fn save(
        &self,
        value: InstantValue,
    ) -> impl Future<Output = Result<ValueId, SmartHomeError>> + Send {
        (**self).save(value)
    }

    fn find_by_sensor(
        &self,
        sensor_id: &SensorId,
    ) -> impl Future<Output = Result<Vec<InstantValue>, SmartHomeError>> + Send {
        (**self).find_by_sensor(sensor_id)
    }

    fn find_by_sensor_within_period(
        &self,
        sensor_id: &SensorId,
        period: &Period,
    ) -> impl Future<Output = Result<Vec<InstantValue>, SmartHomeError>> + Send {
        (**self).find_by_sensor_within_period(sensor_id, period)
    }

    fn find_last_recorded(
        &self,
        sensor_id: &SensorId,
    ) -> impl Future<Output = Result<Option<InstantValue>, SmartHomeError>> + Send {
        (**self).find_last_recorded(sensor_id)
    }
}

impl<T: PeriodValueRepository + Send + Sync> PeriodValueRepository for Arc<T> {
    fn save(
        &self,
        value: PeriodValue,
    ) -> impl Future<Output = Result<ValueId, SmartHomeError>> + Send {
        (**self).save(value)
    }

    fn find_by_sensor(
        &self,
        sensor_id: &SensorId,
    ) -> impl Future<Output = Result<Vec<PeriodValue>, SmartHomeError>> + Send {
        (**self).find_by_sensor(sensor_id)
    }

    fn find_by_sensor_within_period(
        &self,
        sensor_id: &SensorId,
        period: &Period,
    ) -> impl Future<Output = Result<Vec<PeriodValue>, SmartHomeError>> + Send {
        (**self).find_by_sensor_within_period(sensor_id, period)
    }
}

impl<T: InstantLocationValueRepository + Send + Sync> InstantLocationValueRepository for Arc<T> {
    fn save(
        &self,
        value: InstantLocationValue,
    ) -> impl Future<Output = Result<ValueId, SmartHomeError>> + Send {
        (**self).save(value)
    }

    fn find_by_sensor(
        &self,
        sensor_id: &SensorId,
    ) -> impl Future<Output = Result<Vec<InstantLocationValue>, SmartHomeError>> + Send {
        (**self).find_by_sensor(sensor_id)
    }

    fn find_by_sensor_within_period(
        &self,
        sensor_id: &SensorId,
        period: &Period,
    ) -> impl Future<Output = Result<Vec<InstantLocationValue>, SmartHomeError>> + Send {
        (**self).find_by_sensor_within_period(sensor_id, period)
    }

    fn find_last_recorded(
        &self,
        sensor_id: &SensorId,
    ) -> impl Future<Output = Result<Option<InstantLocationValue>, SmartHomeError>> + Send {
        (**self).find_last_recorded(sensor_id)
    }
}
