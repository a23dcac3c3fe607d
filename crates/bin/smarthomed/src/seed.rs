//! Demo house: five rooms, thirteen devices, a morning of readings and the
//! weather reported for it.

use chrono::{DateTime, Duration, Utc};
use smarthome_domain::actuator::{ActuatorProperties, RangeDecimal};
use smarthome_domain::device::DeviceModel;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::{
    ActuatorFunctionalityId, ActuatorId, DeviceId, RoomId, SensorFunctionalityId, SensorId,
};
use smarthome_domain::location::{Address, GpsCode, Location};
use smarthome_domain::room::{RoomDimensions, RoomFloor};
use smarthome_domain::time::Timestamp;
use smarthome_domain::weather::{HourOfDay, SunEvent, Wind};

use crate::wiring::Application;

/// 2024-03-01T00:00:00Z.
const DEMO_DAY: i64 = 1_709_251_200;

pub const INDOOR_THERMOMETER: &str = "Sensor001";
pub const OUTDOOR_THERMOMETER: &str = "Sensor007";

/// (id, floor, length, width, height)
const ROOMS: &[(&str, i32, f64, f64, f64)] = &[
    ("Room001", 1, 5.0, 4.0, 2.5),
    ("Room002", 2, 4.0, 4.0, 2.5),
    ("Room003", 0, 6.0, 5.0, 3.0),
    ("Room004", 0, 10.0, 8.0, 0.0),
    ("Room005", -1, 5.0, 5.0, 2.2),
];

/// (id, model, room)
const DEVICES: &[(&str, &str, &str)] = &[
    ("Device001", "T8115", "Room001"),
    ("Device002", "SL8115", "Room001"),
    ("Device003", "B8115", "Room002"),
    ("Device004", "B8115", "Room002"),
    ("Device005", "A8115", "Room003"),
    ("Device006", "S8115", "Room003"),
    ("Device007", "T8115", "Room004"),
    ("Device008", "SL8115", "Room004"),
    ("Device009", "S8115", "Room005"),
    ("Device010", "A8115", "Room005"),
    ("Grid Power Meter", "G8115", "Room002"),
    ("Power Source 1", "P8115", "Room005"),
    ("Power Source 2", "P8115", "Room004"),
];

/// (id, device, functionality)
const SENSORS: &[(&str, &str, &str)] = &[
    ("Sensor001", "Device001", "TemperatureCelsius"),
    ("Sensor002", "Device002", "WindSpeedAndDirection"),
    ("Sensor003", "Device003", "Sunrise"),
    ("Sensor004", "Device004", "Sunset"),
    ("Sensor005", "Device005", "ElectricEnergyConsumption"),
    ("Sensor006", "Device006", "PowerAverage"),
    ("Sensor007", "Device007", "TemperatureCelsius"),
    ("Sensor008", "Device008", "BinaryStatus"),
    ("Sensor009", "Device009", "BinaryStatus"),
    ("Sensor010", "Device010", "ElectricEnergyConsumption"),
    ("Sensor011", "Device009", "Scale"),
    ("Sensor012", "Grid Power Meter", "PowerAverage"),
    ("Sensor013", "Power Source 1", "SpecificTimePowerConsumption"),
    ("Sensor014", "Power Source 2", "SpecificTimePowerConsumption"),
];

/// (id, device, functionality)
const ACTUATORS: &[(&str, &str, &str)] = &[
    ("Actuator001", "Device001", "DecimalSetter"),
    ("Actuator002", "Device002", "Switch"),
    ("Actuator003", "Device003", "BlindSetter"),
    ("Actuator004", "Device004", "BlindSetter"),
    ("Actuator005", "Device005", "DecimalSetter"),
    ("Actuator006", "Device006", "Switch"),
    ("Actuator007", "Device007", "DecimalSetter"),
    ("Actuator008", "Device008", "Switch"),
    ("Actuator009", "Device009", "BlindSetter"),
    ("Actuator010", "Device010", "DecimalSetter"),
];

/// (sensor, minutes after 08:00, celsius)
const TEMPERATURES: &[(&str, i64, &str)] = &[
    (INDOOR_THERMOMETER, 0, "20.0"),
    (INDOOR_THERMOMETER, 30, "20.5"),
    (INDOOR_THERMOMETER, 60, "21.0"),
    (INDOOR_THERMOMETER, 90, "21.5"),
    (INDOOR_THERMOMETER, 120, "22.0"),
    (OUTDOOR_THERMOMETER, 5, "14.0"),
    (OUTDOOR_THERMOMETER, 35, "16.5"),
    (OUTDOOR_THERMOMETER, 65, "18.0"),
    (OUTDOOR_THERMOMETER, 95, "24.0"),
    (OUTDOOR_THERMOMETER, 125, "19.0"),
];

/// (start, end) in minutes after 08:00, watts
const GRID_AVERAGES: &[(i64, i64, &str)] = &[(0, 15, "300"), (15, 30, "420"), (30, 45, "380")];

/// (sensor, minutes after 08:00, watts)
const SOURCE_READINGS: &[(&str, i64, &str)] = &[
    ("Sensor013", 10, "50"),
    ("Sensor013", 25, "80"),
    ("Sensor013", 40, "60"),
    ("Sensor014", 12, "30"),
    ("Sensor014", 28, "45"),
];

/// (hour of the day, celsius, wind km/h, wind direction in radians)
const FORECAST: &[(u32, f64, f64, f64)] = &[
    (8, 13.0, 12.5, 1.57),
    (9, 16.0, 15.0, 1.75),
    (10, 17.5, 9.0, 2.1),
];

/// Decimal hours of sunrise and sunset on the demo day.
const SUN_EVENTS: &[(SunEvent, f64)] = &[(SunEvent::Sunrise, 6.75), (SunEvent::Sunset, 18.5)];

/// The window covered by the demo readings.
#[derive(Debug, Clone, Copy)]
pub struct DemoWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

/// `minutes` after 08:00 on the demo day.
#[must_use]
pub fn morning(minutes: i64) -> Timestamp {
    DateTime::<Utc>::UNIX_EPOCH
        + Duration::seconds(DEMO_DAY)
        + Duration::hours(8)
        + Duration::minutes(minutes)
}

/// Populate every store with the demo house.
///
/// # Errors
///
/// Returns the first error raised by a service; the stores must be empty.
pub async fn seed_demo(app: &Application) -> Result<DemoWindow, SmartHomeError> {
    let location = Location::new(
        Address::new(
            "Rua Dr. António Bernardino de Almeida",
            "431",
            "4200-072",
            "Porto",
            "Portugal",
        )?,
        GpsCode::new(41.178, -8.608)?,
    );
    let house = app.houses.create_house(Some(location)).await?;

    for &(id, floor, length, width, height) in ROOMS {
        app.rooms
            .create_room(
                RoomId::new(id)?,
                RoomFloor::new(floor),
                RoomDimensions::new(length, width, height)?,
                house.id().clone(),
            )
            .await?;
    }
    for &(id, model, room) in DEVICES {
        app.devices
            .create_device(DeviceId::new(id)?, DeviceModel::new(model)?, RoomId::new(room)?)
            .await?;
    }
    for &(id, device, functionality) in SENSORS {
        app.sensors
            .create_sensor(
                SensorId::new(id)?,
                DeviceId::new(device)?,
                SensorFunctionalityId::new(functionality)?,
            )
            .await?;
    }
    for &(id, device, functionality) in ACTUATORS {
        let properties = if functionality == "DecimalSetter" {
            ActuatorProperties::DecimalRange(RangeDecimal::new(10.0, 30.0, 1)?)
        } else {
            ActuatorProperties::None
        };
        app.actuators
            .create_actuator(
                ActuatorId::new(id)?,
                ActuatorFunctionalityId::new(functionality)?,
                properties,
                DeviceId::new(device)?,
            )
            .await?;
    }

    seed_values(app).await?;
    seed_forecast(app)?;
    tracing::info!(
        house_id = %house.id(),
        rooms = ROOMS.len(),
        devices = DEVICES.len(),
        sensors = SENSORS.len(),
        actuators = ACTUATORS.len(),
        "demo house seeded"
    );
    Ok(DemoWindow {
        start: morning(0),
        end: morning(180),
    })
}

async fn seed_values(app: &Application) -> Result<(), SmartHomeError> {
    for &(sensor, minutes, celsius) in TEMPERATURES {
        app.values
            .record_instant(&SensorId::new(sensor)?, celsius, morning(minutes))
            .await?;
    }

    let grid = SensorId::new("Sensor012")?;
    for &(start, end, watts) in GRID_AVERAGES {
        app.values
            .record_period(&grid, watts, morning(start), morning(end))
            .await?;
    }
    for &(sensor, minutes, watts) in SOURCE_READINGS {
        app.values
            .record_instant(&SensorId::new(sensor)?, watts, morning(minutes))
            .await?;
    }

    app.values
        .record_instant(&SensorId::new("Sensor002")?, "12.5;1.57", morning(0))
        .await?;
    app.values
        .record_period(&SensorId::new("Sensor005")?, "1500", morning(0), morning(60))
        .await?;
    app.values
        .record_instant_location(
            &SensorId::new("Sensor003")?,
            "6.75",
            morning(-75),
            GpsCode::new(41.178, -8.608)?,
        )
        .await?;
    Ok(())
}

fn seed_forecast(app: &Application) -> Result<(), SmartHomeError> {
    for &(hour, celsius, speed, direction) in FORECAST {
        let hour = HourOfDay::new(hour)?;
        app.forecast.report_temperature(hour, celsius)?;
        app.forecast.report_wind(hour, Wind { speed, direction })?;
    }
    for &(event, hour) in SUN_EVENTS {
        app.forecast.report_sun_event(event, hour)?;
    }
    Ok(())
}
