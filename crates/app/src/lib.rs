//! # smarthome-app
//!
//! Application layer: use-cases, queries and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `HouseRepository`, `RoomRepository`, `DeviceRepository`: hierarchy storage
//!   - `SensorRepository`, `ActuatorRepository`: sensor/actuator storage
//!   - `InstantValueRepository`, `PeriodValueRepository`,
//!     `InstantLocationValueRepository`: append-only value stores
//!   - `WeatherGateway`: hourly weather observations for a GPS location
//! - Define **driving/inbound ports** as use-case structs:
//!   - `HouseService`, `RoomService`, `DeviceService`: build the hierarchy
//!   - `SensorService`, `ActuatorService`: attach functionalities to devices
//!   - `ValueService`: record and read measurements
//!   - `BlindRollerService`: drive blind actuators
//!   - `WeatherService`: outside conditions at the house location
//! - Define the **cross-cutting queries**: device grouping by functionality,
//!   maximum indoor/outdoor temperature difference, peak power consumption
//!
//! ## Dependency rule
//! Depends on `smarthome-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod queries;
pub mod services;

#[cfg(test)]
mod test_support;
