//! # smarthome-domain
//!
//! Pure domain model for the smarthome system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps and periods
//! - Define the **functionality registry**: closed sensor/actuator behavior sets and
//!   the catalogs that map functionality identifiers onto them
//! - Define the **aggregates**: house, rooms, devices, sensors and actuators
//! - Define **readings** and the three **value** shapes recorded by sensors
//! - Define the **weather** observations reported for the house location
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod actuator;
pub mod device;
pub mod functionality;
pub mod house;
pub mod location;
pub mod reading;
pub mod room;
pub mod sensor;
pub mod value;
pub mod weather;
