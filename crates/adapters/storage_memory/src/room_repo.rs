//! In-memory implementation of [`RoomRepository`].

use std::future::Future;

use smarthome_app::ports::RoomRepository;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::{HouseId, RoomId};
use smarthome_domain::room::Room;

use crate::table::Table;

const ENTITY: &str = "Room";

/// In-memory room repository.
#[derive(Clone)]
pub struct MemoryRoomRepository {
    table: Table<RoomId, Room>,
}

impl MemoryRoomRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: Table::new("rooms"),
        }
    }
}

impl Default for MemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomRepository for MemoryRoomRepository {
    fn save(&self, room: Room) -> impl Future<Output = Result<Room, SmartHomeError>> + Send {
        let result = self.table.insert_new(ENTITY, room.id().clone(), room);
        async move { result }
    }

    fn update(&self, room: Room) -> impl Future<Output = Result<Room, SmartHomeError>> + Send {
        let id = room.id().clone();
        let result = self.table.replace(ENTITY, &id, room);
        async move { result }
    }

    fn find_by_id(
        &self,
        id: &RoomId,
    ) -> impl Future<Output = Result<Option<Room>, SmartHomeError>> + Send {
        let result = self.table.get(id).map_err(SmartHomeError::from);
        async move { result }
    }

    fn exists_by_id(&self, id: &RoomId) -> impl Future<Output = Result<bool, SmartHomeError>> + Send {
        let result = self.table.contains(id).map_err(SmartHomeError::from);
        async move { result }
    }

    fn find_by_house(
        &self,
        house_id: &HouseId,
    ) -> impl Future<Output = Result<Vec<Room>, SmartHomeError>> + Send {
        let result = self
            .table
            .select(|room| room.house_id() == house_id)
            .map_err(SmartHomeError::from);
        async move { result }
    }
}
