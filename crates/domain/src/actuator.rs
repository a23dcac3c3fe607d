//! Actuator: a controllable output attached to a device.

use serde::Serialize;

use crate::error::{SmartHomeError, ValidationError};
use crate::functionality::{ActuatorBehavior, ActuatorCatalog, Behavior};
use crate::id::{ActuatorFunctionalityId, ActuatorId, DeviceId};

/// Inclusive integer bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeInt {
    lower: i32,
    upper: i32,
}

impl RangeInt {
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRange`] unless `upper > lower`.
    pub fn new(lower: i32, upper: i32) -> Result<Self, ValidationError> {
        if upper <= lower {
            return Err(ValidationError::InvalidRange);
        }
        Ok(Self { lower, upper })
    }

    #[must_use]
    pub fn lower(&self) -> i32 {
        self.lower
    }

    #[must_use]
    pub fn upper(&self) -> i32 {
        self.upper
    }

    #[must_use]
    pub fn contains(&self, value: i32) -> bool {
        (self.lower..=self.upper).contains(&value)
    }
}

/// Inclusive decimal bounds with the number of decimal places kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeDecimal {
    lower: f64,
    upper: f64,
    precision: u8,
}

impl RangeDecimal {
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRange`] unless both bounds are
    /// finite and `upper > lower`.
    pub fn new(lower: f64, upper: f64, precision: u8) -> Result<Self, ValidationError> {
        if !lower.is_finite() || !upper.is_finite() || upper <= lower {
            return Err(ValidationError::InvalidRange);
        }
        Ok(Self {
            lower,
            upper,
            precision,
        })
    }

    #[must_use]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    #[must_use]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    #[must_use]
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Round half away from zero to `precision` decimal places.
    #[must_use]
    pub fn round(&self, value: f64) -> f64 {
        let factor = 10f64.powi(i32::from(self.precision));
        (value * factor).round() / factor
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }
}

/// The properties shape a behavior requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PropertiesShape {
    None,
    IntegerRange,
    DecimalRange,
}

/// Functionality-dependent actuator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ActuatorProperties {
    None,
    IntegerRange(RangeInt),
    DecimalRange(RangeDecimal),
}

impl ActuatorProperties {
    #[must_use]
    pub fn shape(&self) -> PropertiesShape {
        match self {
            Self::None => PropertiesShape::None,
            Self::IntegerRange(_) => PropertiesShape::IntegerRange,
            Self::DecimalRange(_) => PropertiesShape::DecimalRange,
        }
    }
}

/// A requested actuation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActuatorCommand {
    Switch(bool),
    Percentage(f64),
    Integer(i32),
    Decimal(f64),
}

/// The value an actuator is driven to once a command is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActuatorTarget(f64);

impl ActuatorTarget {
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

/// An actuator with its resolved behavior. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Actuator {
    id: ActuatorId,
    device_id: DeviceId,
    functionality_id: ActuatorFunctionalityId,
    behavior: ActuatorBehavior,
    properties: ActuatorProperties,
}

impl Actuator {
    /// Create an actuator, resolving its behavior through `catalog` and
    /// checking `properties` against the shape the behavior requires.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::FunctionalityNotListed`] for unknown
    /// functionalities and [`ValidationError::PropertiesMismatch`] when the
    /// properties do not fit the behavior.
    pub fn create(
        id: ActuatorId,
        functionality_id: ActuatorFunctionalityId,
        properties: ActuatorProperties,
        device_id: DeviceId,
        catalog: &ActuatorCatalog,
    ) -> Result<Self, SmartHomeError> {
        let behavior = catalog.resolve_behavior(&functionality_id)?;
        if properties.shape() != behavior.properties_shape() {
            return Err(ValidationError::PropertiesMismatch {
                behavior: behavior.tag(),
            }
            .into());
        }
        Ok(Self {
            id,
            device_id,
            functionality_id,
            behavior,
            properties,
        })
    }

    #[must_use]
    pub fn id(&self) -> &ActuatorId {
        &self.id
    }

    #[must_use]
    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    #[must_use]
    pub fn functionality_id(&self) -> &ActuatorFunctionalityId {
        &self.functionality_id
    }

    #[must_use]
    pub fn behavior(&self) -> ActuatorBehavior {
        self.behavior
    }

    #[must_use]
    pub fn properties(&self) -> &ActuatorProperties {
        &self.properties
    }

    /// Validate `command` against the behavior and properties.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::CommandMismatch`] when the command kind does
    /// not apply and [`ValidationError::CommandOutOfRange`] when the value
    /// falls outside the accepted bounds.
    pub fn command(&self, command: ActuatorCommand) -> Result<ActuatorTarget, ValidationError> {
        match (self.behavior, command, self.properties) {
            (ActuatorBehavior::Switch, ActuatorCommand::Switch(on), _) => {
                Ok(ActuatorTarget(if on { 1.0 } else { 0.0 }))
            }
            (ActuatorBehavior::BlindSetter, ActuatorCommand::Percentage(value), _) => {
                if (0.0..=100.0).contains(&value) {
                    Ok(ActuatorTarget(value))
                } else {
                    Err(ValidationError::CommandOutOfRange(value))
                }
            }
            (
                ActuatorBehavior::IntegerSetter,
                ActuatorCommand::Integer(value),
                ActuatorProperties::IntegerRange(range),
            ) => {
                if range.contains(value) {
                    Ok(ActuatorTarget(f64::from(value)))
                } else {
                    Err(ValidationError::CommandOutOfRange(f64::from(value)))
                }
            }
            (
                ActuatorBehavior::DecimalSetter,
                ActuatorCommand::Decimal(value),
                ActuatorProperties::DecimalRange(range),
            ) => {
                let rounded = range.round(value);
                if range.contains(rounded) {
                    Ok(ActuatorTarget(rounded))
                } else {
                    Err(ValidationError::CommandOutOfRange(value))
                }
            }
            (behavior, _, _) => Err(ValidationError::CommandMismatch {
                behavior: behavior.tag(),
            }),
        }
    }
}
