//! Sensor: a reading source attached to a device.

use serde::Serialize;

use crate::error::{SmartHomeError, ValidationError};
use crate::functionality::{SensorBehavior, SensorCatalog};
use crate::id::{DeviceId, SensorFunctionalityId, SensorId};
use crate::reading::Reading;
use crate::value::ValueKind;

/// A sensor with its resolved behavior. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sensor {
    id: SensorId,
    device_id: DeviceId,
    functionality_id: SensorFunctionalityId,
    behavior: SensorBehavior,
}

impl Sensor {
    /// Create a sensor, resolving its behavior through `catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::FunctionalityNotListed`] when the
    /// functionality is not in the catalog.
    pub fn create(
        id: SensorId,
        device_id: DeviceId,
        functionality_id: SensorFunctionalityId,
        catalog: &SensorCatalog,
    ) -> Result<Self, SmartHomeError> {
        let behavior = catalog.resolve_behavior(&functionality_id)?;
        Ok(Self {
            id,
            device_id,
            functionality_id,
            behavior,
        })
    }

    #[must_use]
    pub fn id(&self) -> &SensorId {
        &self.id
    }

    #[must_use]
    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    #[must_use]
    pub fn functionality_id(&self) -> &SensorFunctionalityId {
        &self.functionality_id
    }

    #[must_use]
    pub fn behavior(&self) -> SensorBehavior {
        self.behavior
    }

    #[must_use]
    pub fn value_kind(&self) -> ValueKind {
        self.behavior.value_kind()
    }

    /// Build a reading in this sensor's units from `;`-separated measurements.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when a part is blank or the number of
    /// measurements differs from the behavior's arity.
    pub fn reading(&self, measurement: &str) -> Result<Reading, ValidationError> {
        let units = self.behavior.units();
        let reading = Reading::new(measurement, &units.join(";"))?;
        if reading.arity() != units.len() {
            return Err(ValidationError::ReadingArity {
                measurements: reading.arity(),
                units: units.len(),
            });
        }
        Ok(reading)
    }
}
