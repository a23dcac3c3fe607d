//! Device: a physical unit placed in a room that owns sensors and actuators.

use std::fmt;

use serde::Serialize;

use crate::error::ValidationError;
use crate::id::{DeviceId, RoomId};

/// Manufacturer model name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceModel(String);

impl DeviceModel {
    /// # Errors
    ///
    /// Returns [`ValidationError::BlankField`] when `model` is blank.
    pub fn new(model: impl Into<String>) -> Result<Self, ValidationError> {
        let model = model.into();
        if model.trim().is_empty() {
            return Err(ValidationError::BlankField("device model"));
        }
        Ok(Self(model))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state. The only transition is `Active` → `Inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeviceStatus {
    Active,
    Inactive,
}

/// A device of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    id: DeviceId,
    model: DeviceModel,
    status: DeviceStatus,
    room_id: RoomId,
}

impl Device {
    /// Create an active device in `room_id`.
    #[must_use]
    pub fn new(id: DeviceId, model: DeviceModel, room_id: RoomId) -> Self {
        Self {
            id,
            model,
            status: DeviceStatus::Active,
            room_id,
        }
    }

    #[must_use]
    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    #[must_use]
    pub fn model(&self) -> &DeviceModel {
        &self.model
    }

    #[must_use]
    pub fn status(&self) -> DeviceStatus {
        self.status
    }

    #[must_use]
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == DeviceStatus::Active
    }

    /// Deactivate the device. Returns `false` when it was already inactive.
    pub fn deactivate(&mut self) -> bool {
        if self.status == DeviceStatus::Inactive {
            return false;
        }
        self.status = DeviceStatus::Inactive;
        true
    }
}
