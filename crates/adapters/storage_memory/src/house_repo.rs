//! In-memory implementation of [`HouseRepository`].

use std::future::Future;

use smarthome_app::ports::HouseRepository;
use smarthome_domain::error::{AlreadyExistsError, SmartHomeError};
use smarthome_domain::house::House;
use smarthome_domain::id::HouseId;

use crate::table::Table;

const ENTITY: &str = "House";

/// In-memory house repository holding at most one house.
#[derive(Clone)]
pub struct MemoryHouseRepository {
    table: Table<HouseId, House>,
}

impl MemoryHouseRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: Table::new("houses"),
        }
    }

    fn insert(&self, house: House) -> Result<House, SmartHomeError> {
        self.table.write(|rows| {
            if let Some(id) = rows.keys().next() {
                return Err(AlreadyExistsError {
                    entity: ENTITY,
                    id: id.to_string(),
                }
                .into());
            }
            rows.insert(house.id().clone(), house.clone());
            Ok(house)
        })?
    }
}

impl Default for MemoryHouseRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl HouseRepository for MemoryHouseRepository {
    fn save(&self, house: House) -> impl Future<Output = Result<House, SmartHomeError>> + Send {
        let result = self.insert(house);
        async move { result }
    }

    fn update(&self, house: House) -> impl Future<Output = Result<House, SmartHomeError>> + Send {
        let id = house.id().clone();
        let result = self.table.replace(ENTITY, &id, house);
        async move { result }
    }

    fn find_by_id(
        &self,
        id: &HouseId,
    ) -> impl Future<Output = Result<Option<House>, SmartHomeError>> + Send {
        let result = self.table.get(id).map_err(SmartHomeError::from);
        async move { result }
    }

    fn exists_by_id(
        &self,
        id: &HouseId,
    ) -> impl Future<Output = Result<bool, SmartHomeError>> + Send {
        let result = self.table.contains(id).map_err(SmartHomeError::from);
        async move { result }
    }

    fn find_the_house(&self) -> impl Future<Output = Result<Option<House>, SmartHomeError>> + Send {
        let result = self
            .table
            .read(|rows| rows.values().next().cloned())
            .map_err(SmartHomeError::from);
        async move { result }
    }
}
