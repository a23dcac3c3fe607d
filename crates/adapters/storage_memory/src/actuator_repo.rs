//! In-memory implementation of [`ActuatorRepository`].

use std::future::Future;

use smarthome_app::ports::ActuatorRepository;
use smarthome_domain::actuator::Actuator;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::{ActuatorFunctionalityId, ActuatorId, DeviceId};

use crate::table::Table;

/// In-memory actuator repository.
#[derive(Clone)]
pub struct MemoryActuatorRepository {
    table: Table<ActuatorId, Actuator>,
}

impl MemoryActuatorRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: Table::new("actuators"),
        }
    }

    fn matching(&self, keep: impl Fn(&Actuator) -> bool) -> Result<Vec<Actuator>, SmartHomeError> {
        Ok(self.table.select(keep)?)
    }
}

impl Default for MemoryActuatorRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ActuatorRepository for MemoryActuatorRepository {
    fn save(
        &self,
        actuator: Actuator,
    ) -> impl Future<Output = Result<Actuator, SmartHomeError>> + Send {
        let result = self.table.insert_new("Actuator", actuator.id().clone(), actuator);
        async move { result }
    }

    fn find_by_id(
        &self,
        id: &ActuatorId,
    ) -> impl Future<Output = Result<Option<Actuator>, SmartHomeError>> + Send {
        let result = self.table.get(id).map_err(SmartHomeError::from);
        async move { result }
    }

    fn exists_by_id(
        &self,
        id: &ActuatorId,
    ) -> impl Future<Output = Result<bool, SmartHomeError>> + Send {
        let result = self.table.contains(id).map_err(SmartHomeError::from);
        async move { result }
    }

    fn find_by_device(
        &self,
        device_id: &DeviceId,
    ) -> impl Future<Output = Result<Vec<Actuator>, SmartHomeError>> + Send {
        let result = self.matching(|actuator| actuator.device_id() == device_id);
        async move { result }
    }

    fn find_by_device_and_functionality(
        &self,
        device_id: &DeviceId,
        functionality_id: &ActuatorFunctionalityId,
    ) -> impl Future<Output = Result<Vec<Actuator>, SmartHomeError>> + Send {
        let result = self.matching(|actuator| {
            actuator.device_id() == device_id && actuator.functionality_id() == functionality_id
        });
        async move { result }
    }

    fn find_by_functionality(
        &self,
        functionality_id: &ActuatorFunctionalityId,
    ) -> impl Future<Output = Result<Vec<Actuator>, SmartHomeError>> + Send {
        let result = self.matching(|actuator| actuator.functionality_id() == functionality_id);
        async move { result }
    }

    fn find_all(&self) -> impl Future<Output = Result<Vec<Actuator>, SmartHomeError>> + Send {
        let result = self.matching(|_| true);
        async move { result }
    }
}
