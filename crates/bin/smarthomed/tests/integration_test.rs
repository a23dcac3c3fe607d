//! End-to-end tests for the full smarthomed stack.
//!
//! Each test wires the complete application (in-memory tables, real
//! services, real queries), seeds the demo house and exercises it.

use smarthome_app::queries::TemperatureComparison;
use smarthome_domain::device::DeviceModel;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::functionality::FunctionalityKey;
use smarthome_domain::id::{
    ActuatorFunctionalityId, DeviceId, HouseId, RoomId, SensorFunctionalityId, SensorId,
};
use smarthome_domain::weather::SunEvent;
use smarthomed::config::Config;
use smarthomed::seed::{self, DemoWindow, INDOOR_THERMOMETER, OUTDOOR_THERMOMETER, morning};
use smarthomed::wiring::Application;

async fn seeded() -> (Application, DemoWindow) {
    let app = Application::build(&Config::default()).unwrap();
    let window = seed::seed_demo(&app).await.unwrap();
    (app, window)
}

fn device(value: &str) -> DeviceId {
    DeviceId::new(value).unwrap()
}

fn room(value: &str) -> RoomId {
    RoomId::new(value).unwrap()
}

// ---------------------------------------------------------------------------
// Hierarchy
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_seed_demo_hierarchy() {
    let (app, _) = seeded().await;
    let house = app.houses.get_house().await.unwrap();
    assert!(house.location().is_some());

    let rooms = app.rooms.list_rooms(house.id()).await.unwrap();
    assert_eq!(rooms.len(), 5);
    let outdoor = app.rooms.list_outdoor_rooms(house.id()).await.unwrap();
    assert_eq!(outdoor.len(), 1);
    assert_eq!(outdoor[0].id(), &room("Room004"));

    let devices = app.devices.list_devices_in_house(house.id()).await.unwrap();
    assert_eq!(devices.len(), 13);
}

#[tokio::test]
async fn should_reject_second_house() {
    let (app, _) = seeded().await;
    let result = app.houses.create_house(None).await;
    assert!(matches!(result, Err(SmartHomeError::AlreadyExists(_))));
}

#[tokio::test]
async fn should_reject_device_in_unknown_room() {
    let (app, _) = seeded().await;
    let result = app
        .devices
        .create_device(
            device("Device099"),
            DeviceModel::new("T8115").unwrap(),
            room("Attic"),
        )
        .await;
    assert!(matches!(result, Err(SmartHomeError::NotFound(_))));
}

#[tokio::test]
async fn should_refuse_sensor_on_deactivated_device() {
    let (app, _) = seeded().await;
    assert!(app.devices.deactivate_device(&device("Device002")).await.unwrap());
    assert!(!app.devices.deactivate_device(&device("Device002")).await.unwrap());

    let result = app
        .sensors
        .create_sensor(
            SensorId::new("Sensor099").unwrap(),
            device("Device002"),
            SensorFunctionalityId::new("HumidityPercentage").unwrap(),
        )
        .await;
    assert!(matches!(result, Err(SmartHomeError::InactiveDevice(_))));
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_group_seeded_devices_by_functionality() {
    let (app, _) = seeded().await;
    let grouping = app.grouping.devices_by_functionality().await.unwrap();

    let temperature =
        FunctionalityKey::Sensor(SensorFunctionalityId::new("TemperatureCelsius").unwrap());
    let rooms = &grouping[&temperature];
    assert!(rooms[&room("Room001")].contains(&device("Device001")));
    assert!(rooms[&room("Room004")].contains(&device("Device007")));

    let blinds = FunctionalityKey::Actuator(ActuatorFunctionalityId::new("BlindSetter").unwrap());
    let blind_rooms = &grouping[&blinds];
    assert_eq!(blind_rooms[&room("Room002")].len(), 2);
    assert!(blind_rooms[&room("Room005")].contains(&device("Device009")));

    let binary = FunctionalityKey::Sensor(SensorFunctionalityId::new("BinaryStatus").unwrap());
    assert!(grouping[&binary][&room("Room005")].contains(&device("Device009")));
    let scale = FunctionalityKey::Sensor(SensorFunctionalityId::new("Scale").unwrap());
    assert!(grouping[&scale][&room("Room005")].contains(&device("Device009")));
}

#[tokio::test]
async fn should_compute_max_temperature_difference_over_demo_window() {
    let (app, window) = seeded().await;
    let comparison = app
        .temperature
        .max_temperature_difference(
            &SensorId::new(INDOOR_THERMOMETER).unwrap(),
            &SensorId::new(OUTDOOR_THERMOMETER).unwrap(),
            window.start,
            window.end,
        )
        .await
        .unwrap();
    assert_eq!(comparison, TemperatureComparison::Difference(6.0));
}

#[tokio::test]
async fn should_report_sentinel_outside_demo_window() {
    let (app, _) = seeded().await;
    let comparison = app
        .temperature
        .max_temperature_difference(
            &SensorId::new(INDOOR_THERMOMETER).unwrap(),
            &SensorId::new(OUTDOOR_THERMOMETER).unwrap(),
            morning(600),
            morning(660),
        )
        .await
        .unwrap();
    assert!((comparison.value() + 1.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn should_compute_peak_power_over_demo_window() {
    let (app, window) = seeded().await;
    let peak = app
        .power
        .peak_power_consumption(window.start, window.end)
        .await
        .unwrap();
    assert!((peak - 545.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn should_compare_indoor_temperature_with_reported_weather() {
    let (app, window) = seeded().await;
    let comparison = app
        .weather
        .max_temperature_difference(
            &SensorId::new(INDOOR_THERMOMETER).unwrap(),
            window.start,
            window.end,
        )
        .await
        .unwrap();
    assert_eq!(comparison, TemperatureComparison::Difference(7.0));

    let sunset = app.weather.sun_event_hour(SunEvent::Sunset).await.unwrap();
    assert!((sunset - 18.5).abs() < f64::EPSILON);
    let wind = app.weather.wind_for_hour(9).await.unwrap();
    assert!((wind.speed - 15.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn should_fail_weather_lookup_for_unreported_hour() {
    let (app, _) = seeded().await;
    let result = app.weather.temperature_for_hour(3).await;
    assert!(matches!(result, Err(SmartHomeError::Gateway(_))));
}

// ---------------------------------------------------------------------------
// Values and actuators
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_last_indoor_temperature() {
    let (app, _) = seeded().await;
    let last = app
        .values
        .last_measurement(
            &device("Device001"),
            &SensorFunctionalityId::new("TemperatureCelsius").unwrap(),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(last.observed_at(), morning(120));
    assert_eq!(last.reading().to_string(), "22.0 ºC");
}

#[tokio::test]
async fn should_drive_blinds_of_active_devices_only() {
    let (app, _) = seeded().await;
    let with_blinds = app.blinds.devices_with_blinds().await.unwrap();
    assert_eq!(with_blinds.len(), 3);

    app.devices.deactivate_device(&device("Device003")).await.unwrap();
    let with_blinds = app.blinds.devices_with_blinds().await.unwrap();
    assert_eq!(with_blinds.len(), 2);
    assert!(!with_blinds.contains_key(&device("Device003")));

    let targets = app
        .blinds
        .set_blind_position(&device("Device004"), 75.0)
        .await
        .unwrap();
    assert_eq!(targets.len(), 1);

    let result = app.blinds.set_blind_position(&device("Device003"), 75.0).await;
    assert!(matches!(result, Err(SmartHomeError::InactiveDevice(_))));
}

#[tokio::test]
async fn should_start_empty_when_not_seeded() {
    let app = Application::build(&Config::default()).unwrap();
    assert!(app.grouping.devices_by_functionality().await.unwrap().is_empty());
    let result = app
        .rooms
        .list_rooms(&HouseId::new("House001").unwrap())
        .await
        .unwrap();
    assert!(result.is_empty());
}
