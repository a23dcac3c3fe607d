//! # smarthomed: smart-home daemon
//!
//! Composition root that wires the storage adapter into the application
//! services and queries.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Build the functionality catalogs once, at start-up
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Optionally seed the demo house
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

pub mod config;
pub mod seed;
pub mod wiring;
