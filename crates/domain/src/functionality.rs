//! Functionality registry: closed behavior sets and the catalogs that map
//! functionality identifiers onto them.
//!
//! A catalog is built once at start-up and never mutated afterwards, so it
//! can be shared behind an `Arc` without locking. Resolution fails closed:
//! an identifier that is not listed is an error, never a default behavior.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::Serialize;

use crate::actuator::PropertiesShape;
use crate::error::{FunctionalityNotListedError, ValidationError};
use crate::id::{ActuatorFunctionalityId, SensorFunctionalityId};
use crate::value::ValueKind;

/// Which catalog a functionality belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FunctionalityKind {
    Sensor,
    Actuator,
}

impl fmt::Display for FunctionalityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor => f.write_str("sensor"),
            Self::Actuator => f.write_str("actuator"),
        }
    }
}

/// A closed set of behaviors a catalog can resolve to.
pub trait Behavior: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Identifier type used as catalog key.
    type Id: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync;

    /// Catalog kind, reported in resolution errors.
    const KIND: FunctionalityKind;

    /// Every behavior, in standard catalog order.
    const ALL: &'static [Self];

    /// Stable textual tag.
    fn tag(self) -> &'static str;

    /// Identifier under which the behavior is listed in the standard catalog.
    fn functionality_id(self) -> Self::Id;
}

/// Reading behaviors a sensor can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SensorBehavior {
    TemperatureCelsius,
    WindSpeedAndDirection,
    Sunrise,
    Sunset,
    ElectricEnergyConsumption,
    PowerAverage,
    BinaryStatus,
    Scale,
    SpecificTimePowerConsumption,
    HumidityPercentage,
    DewPointCelsius,
    SolarIrradiance,
}

impl SensorBehavior {
    /// Shape of the values this behavior records.
    #[must_use]
    pub fn value_kind(self) -> ValueKind {
        match self {
            Self::Sunrise | Self::Sunset => ValueKind::InstantLocation,
            Self::PowerAverage | Self::ElectricEnergyConsumption => ValueKind::Period,
            _ => ValueKind::Instant,
        }
    }

    /// Units of the reading parts, one per measurement. `*` means unitless.
    #[must_use]
    pub fn units(self) -> &'static [&'static str] {
        match self {
            Self::TemperatureCelsius | Self::DewPointCelsius => &["ºC"],
            Self::WindSpeedAndDirection => &["m/s", "rad"],
            Self::Sunrise | Self::Sunset => &["h"],
            Self::ElectricEnergyConsumption => &["Wh"],
            Self::PowerAverage | Self::SpecificTimePowerConsumption => &["W"],
            Self::BinaryStatus => &["*"],
            Self::Scale | Self::HumidityPercentage => &["%"],
            Self::SolarIrradiance => &["W/m2"],
        }
    }
}

impl Behavior for SensorBehavior {
    type Id = SensorFunctionalityId;

    const KIND: FunctionalityKind = FunctionalityKind::Sensor;

    const ALL: &'static [Self] = &[
        Self::TemperatureCelsius,
        Self::WindSpeedAndDirection,
        Self::Sunrise,
        Self::Sunset,
        Self::ElectricEnergyConsumption,
        Self::PowerAverage,
        Self::BinaryStatus,
        Self::Scale,
        Self::SpecificTimePowerConsumption,
        Self::HumidityPercentage,
        Self::DewPointCelsius,
        Self::SolarIrradiance,
    ];

    fn tag(self) -> &'static str {
        match self {
            Self::TemperatureCelsius => "TemperatureCelsius",
            Self::WindSpeedAndDirection => "WindSpeedAndDirection",
            Self::Sunrise => "Sunrise",
            Self::Sunset => "Sunset",
            Self::ElectricEnergyConsumption => "ElectricEnergyConsumption",
            Self::PowerAverage => "PowerAverage",
            Self::BinaryStatus => "BinaryStatus",
            Self::Scale => "Scale",
            Self::SpecificTimePowerConsumption => "SpecificTimePowerConsumption",
            Self::HumidityPercentage => "HumidityPercentage",
            Self::DewPointCelsius => "DewPointCelsius",
            Self::SolarIrradiance => "SolarIrradiance",
        }
    }

    fn functionality_id(self) -> SensorFunctionalityId {
        SensorFunctionalityId::from_static(self.tag())
    }
}

/// Actuation behaviors an actuator can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ActuatorBehavior {
    Switch,
    BlindSetter,
    IntegerSetter,
    DecimalSetter,
}

impl ActuatorBehavior {
    /// Properties an actuator with this behavior must be created with.
    #[must_use]
    pub fn properties_shape(self) -> PropertiesShape {
        match self {
            Self::Switch | Self::BlindSetter => PropertiesShape::None,
            Self::IntegerSetter => PropertiesShape::IntegerRange,
            Self::DecimalSetter => PropertiesShape::DecimalRange,
        }
    }
}

impl Behavior for ActuatorBehavior {
    type Id = ActuatorFunctionalityId;

    const KIND: FunctionalityKind = FunctionalityKind::Actuator;

    const ALL: &'static [Self] = &[
        Self::Switch,
        Self::BlindSetter,
        Self::IntegerSetter,
        Self::DecimalSetter,
    ];

    fn tag(self) -> &'static str {
        match self {
            Self::Switch => "Switch",
            Self::BlindSetter => "BlindSetter",
            Self::IntegerSetter => "IntegerSetter",
            Self::DecimalSetter => "DecimalSetter",
        }
    }

    fn functionality_id(self) -> ActuatorFunctionalityId {
        ActuatorFunctionalityId::from_static(self.tag())
    }
}

fn parse_tag<B: Behavior>(s: &str) -> Result<B, ValidationError> {
    B::ALL
        .iter()
        .copied()
        .find(|behavior| behavior.tag() == s)
        .ok_or_else(|| ValidationError::UnknownBehavior(s.to_string()))
}

impl FromStr for SensorBehavior {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_tag(s)
    }
}

impl FromStr for ActuatorBehavior {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_tag(s)
    }
}

impl fmt::Display for SensorBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl fmt::Display for ActuatorBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Immutable, ordered mapping from functionality identifiers to behaviors.
#[derive(Debug, Clone)]
pub struct FunctionalityCatalog<B: Behavior> {
    ordered: Vec<B::Id>,
    index: HashMap<B::Id, B>,
}

/// Catalog consulted when creating sensors.
pub type SensorCatalog = FunctionalityCatalog<SensorBehavior>;

/// Catalog consulted when creating actuators.
pub type ActuatorCatalog = FunctionalityCatalog<ActuatorBehavior>;

impl<B: Behavior> FunctionalityCatalog<B> {
    /// Build a catalog from `(functionality, behavior)` entries, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateFunctionality`] when an identifier is
    /// listed more than once.
    pub fn from_entries<I>(entries: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (B::Id, B)>,
    {
        let mut ordered = Vec::new();
        let mut index = HashMap::new();
        for (id, behavior) in entries {
            if index.insert(id.clone(), behavior).is_some() {
                return Err(ValidationError::DuplicateFunctionality(id.to_string()));
            }
            ordered.push(id);
        }
        Ok(Self { ordered, index })
    }

    /// The built-in catalog: every behavior listed under its own tag.
    #[must_use]
    pub fn standard() -> Self {
        let ordered: Vec<B::Id> = B::ALL.iter().map(|b| b.functionality_id()).collect();
        let index = B::ALL
            .iter()
            .map(|b| (b.functionality_id(), *b))
            .collect();
        Self { ordered, index }
    }

    /// Whether `id` is listed.
    #[must_use]
    pub fn exists(&self, id: &B::Id) -> bool {
        self.index.contains_key(id)
    }

    /// Resolve the behavior listed under `id`.
    ///
    /// Intended for the sensor and actuator factories.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionalityNotListedError`] when `id` is not listed.
    pub fn resolve_behavior(&self, id: &B::Id) -> Result<B, FunctionalityNotListedError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| FunctionalityNotListedError {
                kind: B::KIND,
                id: id.to_string(),
            })
    }

    /// Every listed identifier, in catalog order.
    #[must_use]
    pub fn list_all(&self) -> &[B::Id] {
        &self.ordered
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// Functionality of either a sensor or an actuator, used as a heterogeneous map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum FunctionalityKey {
    Sensor(SensorFunctionalityId),
    Actuator(ActuatorFunctionalityId),
}

impl fmt::Display for FunctionalityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(id) => write!(f, "sensor:{id}"),
            Self::Actuator(id) => write!(f, "actuator:{id}"),
        }
    }
}
