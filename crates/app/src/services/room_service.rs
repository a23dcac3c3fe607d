//! Room service: use-cases for managing rooms.

use smarthome_domain::error::{AlreadyExistsError, NotFoundError, SmartHomeError};
use smarthome_domain::id::{HouseId, RoomId};
use smarthome_domain::room::{Room, RoomDimensions, RoomFloor};

use crate::ports::{HouseRepository, RoomRepository};

/// Application service for room operations.
pub struct RoomService<R, H> {
    rooms: R,
    houses: H,
}

impl<R: RoomRepository, H: HouseRepository> RoomService<R, H> {
    /// Create a new service backed by the given repositories.
    pub fn new(rooms: R, houses: H) -> Self {
        Self { rooms, houses }
    }

    /// Create a room in the house.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the house does not exist,
    /// [`SmartHomeError::AlreadyExists`] when the room id is taken, or a
    /// storage error from the repositories.
    #[tracing::instrument(skip(self, dimensions))]
    pub async fn create_room(
        &self,
        id: RoomId,
        floor: RoomFloor,
        dimensions: RoomDimensions,
        house_id: HouseId,
    ) -> Result<Room, SmartHomeError> {
        if !self.houses.exists_by_id(&house_id).await? {
            return Err(NotFoundError {
                entity: "House",
                id: house_id.to_string(),
            }
            .into());
        }
        if self.rooms.exists_by_id(&id).await? {
            return Err(AlreadyExistsError {
                entity: "Room",
                id: id.to_string(),
            }
            .into());
        }
        let room = Room::builder()
            .id(id)
            .floor(floor)
            .dimensions(dimensions)
            .house_id(house_id)
            .build()?;
        self.rooms.save(room).await
    }

    /// Replace floor and dimensions of an existing room.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the room does not exist, or
    /// a storage error from the repository.
    #[tracing::instrument(skip(self, dimensions))]
    pub async fn edit_room(
        &self,
        id: &RoomId,
        floor: RoomFloor,
        dimensions: RoomDimensions,
    ) -> Result<Room, SmartHomeError> {
        let room = self.get_room(id).await?;
        self.rooms.update(room.edit(floor, dimensions)).await
    }

    /// Look up a room by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no room with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_room(&self, id: &RoomId) -> Result<Room, SmartHomeError> {
        self.rooms.find_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Room",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List every room of the house.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_rooms(&self, house_id: &HouseId) -> Result<Vec<Room>, SmartHomeError> {
        self.rooms.find_by_house(house_id).await
    }

    /// List the indoor rooms of the house (non-zero height).
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_indoor_rooms(&self, house_id: &HouseId) -> Result<Vec<Room>, SmartHomeError> {
        let mut rooms = self.list_rooms(house_id).await?;
        rooms.retain(|room| !room.is_outdoor());
        Ok(rooms)
    }

    /// List the outdoor areas of the house (zero height).
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_outdoor_rooms(
        &self,
        house_id: &HouseId,
    ) -> Result<Vec<Room>, SmartHomeError> {
        let mut rooms = self.list_rooms(house_id).await?;
        rooms.retain(Room::is_outdoor);
        Ok(rooms)
    }
}
