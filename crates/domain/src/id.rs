//! Typed identifier newtypes backed by non-blank strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident, $kind:literal) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Wrap a string, rejecting empty or whitespace-only values.
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError::BlankIdentifier`] when `value` is blank.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(ValidationError::BlankIdentifier { kind: $kind });
                }
                Ok(Self(value))
            }

            /// Access the inner string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Unique identifier for the [`House`](crate::house::House).
    HouseId,
    "house"
);

define_id!(
    /// Unique identifier for a [`Room`](crate::room::Room), usually a human-chosen name.
    RoomId,
    "room"
);

define_id!(
    /// Unique identifier for a [`Device`](crate::device::Device).
    DeviceId,
    "device"
);

define_id!(
    /// Unique identifier for a [`Sensor`](crate::sensor::Sensor).
    SensorId,
    "sensor"
);

define_id!(
    /// Unique identifier for an [`Actuator`](crate::actuator::Actuator).
    ActuatorId,
    "actuator"
);

define_id!(
    /// Functionality identifier looked up in a sensor catalog.
    SensorFunctionalityId,
    "sensor functionality"
);

define_id!(
    /// Functionality identifier looked up in an actuator catalog.
    ActuatorFunctionalityId,
    "actuator functionality"
);

define_id!(
    /// Unique identifier for a recorded value.
    ValueId,
    "value"
);

impl HouseId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl ValueId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl SensorFunctionalityId {
    pub(crate) fn from_static(value: &'static str) -> Self {
        Self(value.to_owned())
    }
}

impl ActuatorFunctionalityId {
    pub(crate) fn from_static(value: &'static str) -> Self {
        Self(value.to_owned())
    }
}
