//! # smarthome-adapter-storage-memory
//!
//! In-memory persistence adapter.
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `smarthome-app::ports::storage`
//! - Keep each aggregate in its own shared table, safe to clone across services
//! - Enforce the contract-level semantics the services rely on
//!   (`save` rejects duplicates, `update` rejects unknown ids, inclusive
//!   period bounds on the value stores)
//! - Serve hourly weather observations through the `WeatherGateway` port
//!
//! ## Dependency rule
//! Depends on `smarthome-app` (for port traits) and `smarthome-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod actuator_repo;
pub mod device_repo;
pub mod error;
pub mod house_repo;
pub mod room_repo;
pub mod sensor_repo;
mod table;
pub mod value_repo;
pub mod weather_gateway;

pub use actuator_repo::MemoryActuatorRepository;
pub use device_repo::MemoryDeviceRepository;
pub use house_repo::MemoryHouseRepository;
pub use room_repo::MemoryRoomRepository;
pub use sensor_repo::MemorySensorRepository;
pub use value_repo::{
    MemoryInstantLocationValueRepository, MemoryInstantValueRepository,
    MemoryPeriodValueRepository,
};
pub use weather_gateway::MemoryWeatherGateway;
