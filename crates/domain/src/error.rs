//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`SmartHomeError`] via `#[from]`. No variant carries a free-form message.

use crate::functionality::FunctionalityKind;
use crate::id::DeviceId;
use crate::value::ValueKind;

/// Root error returned by domain constructors, repositories and services.
#[derive(Debug, thiserror::Error)]
pub enum SmartHomeError {
    /// A value failed a construction-time invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced entity does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// A functionality identifier is missing from its catalog.
    #[error(transparent)]
    FunctionalityNotListed(#[from] FunctionalityNotListedError),

    /// The operation targets a deactivated device.
    #[error(transparent)]
    InactiveDevice(#[from] InactiveDeviceError),

    /// An entity with the same identifier is already stored.
    #[error(transparent)]
    AlreadyExists(#[from] AlreadyExistsError),

    /// A storage backend failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The weather provider failed or had no data.
    #[error("weather gateway error")]
    Gateway(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Construction-time invariant violations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{kind} identifier must not be blank")]
    BlankIdentifier { kind: &'static str },

    #[error("{0} must not be blank")]
    BlankField(&'static str),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("room length and width must be positive and height must not be negative")]
    InvalidDimensions,

    #[error("latitude {latitude} or longitude {longitude} is out of range")]
    InvalidGpsCoordinates { latitude: f64, longitude: f64 },

    #[error("country {0} is not supported")]
    UnsupportedCountry(String),

    #[error("zip code {zip_code} is not valid for {country}")]
    InvalidZipCode { country: String, zip_code: String },

    #[error("upper bound must be greater than lower bound")]
    InvalidRange,

    #[error("properties do not match the shape required by {behavior}")]
    PropertiesMismatch { behavior: &'static str },

    #[error("{measurements} measurement(s) given for {units} unit(s)")]
    ReadingArity { measurements: usize, units: usize },

    #[error("period start must not be after its end")]
    InvalidPeriod,

    #[error("functionality {0} is listed twice")]
    DuplicateFunctionality(String),

    #[error("behavior {0} is unknown")]
    UnknownBehavior(String),

    #[error("expected a {expected} value, got a {actual} value")]
    ValueKindMismatch {
        expected: ValueKind,
        actual: ValueKind,
    },

    #[error("command does not apply to {behavior}")]
    CommandMismatch { behavior: &'static str },

    #[error("command value {0} is out of range")]
    CommandOutOfRange(f64),

    #[error("hour {0} must be between 0 and 23")]
    InvalidHour(u32),

    #[error("sun event {0} is unknown, expected sunrise or sunset")]
    UnknownSunEvent(String),
}

/// A referenced entity could not be found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// An entity with the same identifier already exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} already exists")]
pub struct AlreadyExistsError {
    pub entity: &'static str,
    pub id: String,
}

/// The targeted device has been deactivated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("device {device_id} is inactive")]
pub struct InactiveDeviceError {
    pub device_id: DeviceId,
}

/// A functionality identifier is not part of its catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} functionality {id} is not listed")]
pub struct FunctionalityNotListedError {
    pub kind: FunctionalityKind,
    pub id: String,
}
