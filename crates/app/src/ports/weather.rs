//! Weather port: hourly observations for a GPS location.
//!
//! Implementations bridge an external weather provider. Failures surface as
//! [`SmartHomeError::Gateway`].

use std::future::Future;
use std::sync::Arc;

use smarthome_domain::error::SmartHomeError;
use smarthome_domain::location::GpsCode;
use smarthome_domain::weather::{HourOfDay, SunEvent, Wind};

pub trait WeatherGateway {
    /// Outside temperature in degrees Celsius at `hour`.
    fn instantaneous_temperature(
        &self,
        gps: &GpsCode,
        hour: HourOfDay,
    ) -> impl Future<Output = Result<f64, SmartHomeError>> + Send;

    /// Wind speed and direction at `hour`.
    fn instantaneous_wind(
        &self,
        gps: &GpsCode,
        hour: HourOfDay,
    ) -> impl Future<Output = Result<Wind, SmartHomeError>> + Send;

    /// Hour of `event` as a decimal hour of the day (e.g. `6.75` for 06:45).
    fn sun_event_hour(
        &self,
        gps: &GpsCode,
        event: SunEvent,
    ) -> impl Future<Output = Result<f64, SmartHomeError>> + Send;
}

impl<T: WeatherGateway + Send + Sync> WeatherGateway for Arc<T> {
    fn instantaneous_temperature(
        &self,
        gps: &GpsCode,
        hour: HourOfDay,
    ) -> impl Future<Output = Result<f64, SmartHomeError>> + Send {
        (**self).instantaneous_temperature(gps, hour)
    }

    fn instantaneous_wind(
        &self,
        gps: &GpsCode,
        hour: HourOfDay,
    ) -> impl Future<Output = Result<Wind, SmartHomeError>> + Send {
        (**self).instantaneous_wind(gps, hour)
    }

    fn sun_event_hour(
        &self,
        gps: &GpsCode,
        event: SunEvent,
    ) -> impl Future<Output = Result<f64, SmartHomeError>> + Send {
        (**self).sun_event_hour(gps, event)
    }
}
