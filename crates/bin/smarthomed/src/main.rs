//! `smarthomed` entry point: load configuration, initialise logging, wire the
//! services and, when enabled, seed the demo house and report on it.

use anyhow::Context;
use smarthome_domain::id::{DeviceId, SensorId};
use smarthome_domain::time::Period;
use smarthome_domain::weather::SunEvent;
use smarthomed::config::Config;
use smarthomed::seed::{self, DemoWindow, INDOOR_THERMOMETER, OUTDOOR_THERMOMETER};
use smarthomed::wiring::Application;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let app = Application::build(&config).context("failed to wire services")?;
    tracing::info!("smarthomed started");

    if !config.seed.demo {
        tracing::info!("demo seeding disabled, nothing to report");
        return Ok(());
    }
    let window = seed::seed_demo(&app)
        .await
        .context("failed to seed the demo house")?;
    report(&app, window).await
}

async fn report(app: &Application, window: DemoWindow) -> anyhow::Result<()> {
    let grouping = app.grouping.devices_by_functionality().await?;
    for (functionality, rooms) in &grouping {
        for (room, devices) in rooms {
            tracing::info!(%functionality, %room, ?devices, "devices by functionality");
        }
    }

    let comparison = app
        .temperature
        .max_temperature_difference(
            &SensorId::new(INDOOR_THERMOMETER)?,
            &SensorId::new(OUTDOOR_THERMOMETER)?,
            window.start,
            window.end,
        )
        .await?;
    tracing::info!(
        difference = comparison.value(),
        start = %window.start,
        end = %window.end,
        "max indoor/outdoor temperature difference"
    );

    let weather = app
        .weather
        .max_temperature_difference(
            &SensorId::new(INDOOR_THERMOMETER)?,
            window.start,
            window.end,
        )
        .await?;
    let sunrise = app.weather.sun_event_hour(SunEvent::Sunrise).await?;
    tracing::info!(
        difference = weather.value(),
        sunrise,
        "indoor temperature against reported weather"
    );

    let peak = app
        .power
        .peak_power_consumption(window.start, window.end)
        .await?;
    tracing::info!(watts = peak, "peak power consumption");

    let blinds = app.blinds.devices_with_blinds().await?;
    tracing::info!(devices = ?blinds, "devices with blinds");
    if let Some(device) = blinds.keys().next() {
        app.blinds.set_blind_position(device, 50.0).await?;
    }

    let device = DeviceId::new("Device001")?;
    let period = Period::new(window.start, window.end)?;
    let readings = app.values.measurements_in_period(&device, &period).await?;
    for (functionality, measurements) in &readings {
        tracing::info!(
            device_id = %device,
            %functionality,
            count = measurements.len(),
            "measurements in window"
        );
    }
    Ok(())
}
