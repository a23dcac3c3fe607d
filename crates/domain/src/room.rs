//! Room: an indoor or outdoor area of the house that holds devices.

use serde::Serialize;

use crate::error::{SmartHomeError, ValidationError};
use crate::id::{HouseId, RoomId};

/// Floor number; negative values are basements.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct RoomFloor(i32);

impl RoomFloor {
    #[must_use]
    pub fn new(floor: i32) -> Self {
        Self(floor)
    }

    #[must_use]
    pub fn value(self) -> i32 {
        self.0
    }
}

/// Room dimensions in metres. A height of zero marks an outdoor area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoomDimensions {
    length: f64,
    width: f64,
    height: f64,
}

impl RoomDimensions {
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDimensions`] unless length and width
    /// are positive and height is non-negative, all finite.
    pub fn new(length: f64, width: f64, height: f64) -> Result<Self, ValidationError> {
        let finite = length.is_finite() && width.is_finite() && height.is_finite();
        if !finite || length <= 0.0 || width <= 0.0 || height < 0.0 {
            return Err(ValidationError::InvalidDimensions);
        }
        Ok(Self {
            length,
            width,
            height,
        })
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn is_outdoor(&self) -> bool {
        self.height <= 0.0
    }
}

/// A room of the house.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    id: RoomId,
    floor: RoomFloor,
    dimensions: RoomDimensions,
    house_id: HouseId,
}

impl Room {
    /// Create a builder for constructing a [`Room`].
    #[must_use]
    pub fn builder() -> RoomBuilder {
        RoomBuilder::default()
    }

    #[must_use]
    pub fn id(&self) -> &RoomId {
        &self.id
    }

    #[must_use]
    pub fn floor(&self) -> RoomFloor {
        self.floor
    }

    #[must_use]
    pub fn dimensions(&self) -> RoomDimensions {
        self.dimensions
    }

    #[must_use]
    pub fn house_id(&self) -> &HouseId {
        &self.house_id
    }

    /// Whether the room is an outdoor area (zero height).
    #[must_use]
    pub fn is_outdoor(&self) -> bool {
        self.dimensions.is_outdoor()
    }

    /// Produce the replacement room with new floor and dimensions.
    #[must_use]
    pub fn edit(&self, floor: RoomFloor, dimensions: RoomDimensions) -> Self {
        Self {
            id: self.id.clone(),
            floor,
            dimensions,
            house_id: self.house_id.clone(),
        }
    }
}

/// Step-by-step builder for [`Room`].
#[derive(Debug, Default)]
pub struct RoomBuilder {
    id: Option<RoomId>,
    floor: Option<RoomFloor>,
    dimensions: Option<RoomDimensions>,
    house_id: Option<HouseId>,
}

impl RoomBuilder {
    #[must_use]
    pub fn id(mut self, id: RoomId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn floor(mut self, floor: RoomFloor) -> Self {
        self.floor = Some(floor);
        self
    }

    #[must_use]
    pub fn dimensions(mut self, dimensions: RoomDimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    #[must_use]
    pub fn house_id(mut self, house_id: HouseId) -> Self {
        self.house_id = Some(house_id);
        self
    }

    /// Consume the builder and return a [`Room`]. The floor defaults to 0.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] if the id, dimensions or house
    /// id is missing.
    pub fn build(self) -> Result<Room, SmartHomeError> {
        Ok(Room {
            id: self.id.ok_or(ValidationError::MissingField("room id"))?,
            floor: self.floor.unwrap_or_default(),
            dimensions: self
                .dimensions
                .ok_or(ValidationError::MissingField("room dimensions"))?,
            house_id: self
                .house_id
                .ok_or(ValidationError::MissingField("house id"))?,
        })
    }
}
