//! Service graph over the in-memory storage adapter.

use std::sync::Arc;

use smarthome_adapter_storage_memory::{
    MemoryActuatorRepository, MemoryDeviceRepository, MemoryHouseRepository,
    MemoryInstantLocationValueRepository, MemoryInstantValueRepository,
    MemoryPeriodValueRepository, MemoryRoomRepository, MemorySensorRepository,
    MemoryWeatherGateway,
};
use smarthome_app::queries::{DeviceGroupingQuery, PeakPowerQuery, TemperatureDifferenceQuery};
use smarthome_app::services::actuator_service::ActuatorService;
use smarthome_app::services::blind_roller_service::BlindRollerService;
use smarthome_app::services::device_service::DeviceService;
use smarthome_app::services::house_service::HouseService;
use smarthome_app::services::room_service::RoomService;
use smarthome_app::services::sensor_service::SensorService;
use smarthome_app::services::value_service::{ValueService, ValueStores};
use smarthome_app::services::weather_service::WeatherService;

use crate::config::{Config, ConfigError};

type Houses = MemoryHouseRepository;
type Rooms = MemoryRoomRepository;
type Devices = MemoryDeviceRepository;
type Sensors = MemorySensorRepository;
type Actuators = MemoryActuatorRepository;
type Instants = MemoryInstantValueRepository;
type Periods = MemoryPeriodValueRepository;
type Locations = MemoryInstantLocationValueRepository;
type Weather = MemoryWeatherGateway;

/// Every service and query, sharing one set of in-memory tables.
pub struct Application {
    pub houses: HouseService<Houses>,
    pub rooms: RoomService<Rooms, Houses>,
    pub devices: DeviceService<Devices, Rooms>,
    pub sensors: SensorService<Sensors, Devices>,
    pub actuators: ActuatorService<Actuators, Devices>,
    pub blinds: BlindRollerService<Actuators, Devices>,
    pub values: ValueService<Sensors, Instants, Periods, Locations>,
    pub grouping: DeviceGroupingQuery<Devices, Rooms, Sensors, Actuators>,
    pub temperature: TemperatureDifferenceQuery<Instants>,
    pub power: PeakPowerQuery<Sensors, Instants, Periods>,
    pub weather: WeatherService<Houses, Instants, Weather>,
    /// Hourly observations served to [`Self::weather`].
    pub forecast: Weather,
}

impl Application {
    /// Build the catalogs and wire every service over fresh tables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a configured catalog, a duration or the
    /// grid power meter id is invalid.
    pub fn build(config: &Config) -> Result<Self, ConfigError> {
        let sensor_catalog = Arc::new(config.sensor_catalog()?);
        let actuator_catalog = Arc::new(config.actuator_catalog()?);
        tracing::info!(
            sensors = sensor_catalog.len(),
            actuators = actuator_catalog.len(),
            "functionality catalogs loaded"
        );

        let houses = Houses::new();
        let rooms = Rooms::new();
        let devices = Devices::new();
        let sensors = Sensors::new();
        let actuators = Actuators::new();
        let instants = Instants::new();
        let periods = Periods::new();
        let locations = Locations::new();
        let forecast = Weather::new();
        let tolerance = config.temperature_tolerance()?;

        Ok(Self {
            houses: HouseService::new(houses.clone()),
            weather: WeatherService::new(
                houses.clone(),
                instants.clone(),
                forecast.clone(),
                tolerance,
            ),
            forecast,
            rooms: RoomService::new(rooms.clone(), houses),
            devices: DeviceService::new(devices.clone(), rooms.clone()),
            sensors: SensorService::new(sensors.clone(), devices.clone(), sensor_catalog),
            actuators: ActuatorService::new(actuators.clone(), devices.clone(), actuator_catalog),
            blinds: BlindRollerService::new(actuators.clone(), devices.clone()),
            values: ValueService::new(
                sensors.clone(),
                ValueStores {
                    instants: instants.clone(),
                    periods: periods.clone(),
                    locations,
                },
            ),
            grouping: DeviceGroupingQuery::new(devices, rooms, sensors.clone(), actuators),
            temperature: TemperatureDifferenceQuery::new(instants.clone(), tolerance),
            power: PeakPowerQuery::new(
                sensors,
                instants,
                periods,
                config.grid_power_meter()?,
                config.power_cadence()?,
            ),
        })
    }
}
