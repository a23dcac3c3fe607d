//! House: the single root of the hierarchy.

use serde::Serialize;

use crate::id::HouseId;
use crate::location::Location;

/// The house. At most one instance is stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct House {
    id: HouseId,
    location: Option<Location>,
}

impl Default for House {
    fn default() -> Self {
        Self {
            id: HouseId::generate(),
            location: None,
        }
    }
}

impl House {
    /// Create a house without a location.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a house at `location`.
    #[must_use]
    pub fn with_location(location: Location) -> Self {
        Self {
            location: Some(location),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn id(&self) -> &HouseId {
        &self.id
    }

    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Set or replace the location.
    pub fn configure_location(&mut self, location: Location) {
        self.location = Some(location);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{Address, GpsCode};

    fn porto() -> Location {
        Location::new(
            Address::new("Rua Dr. Antonio", "23", "4000-000", "Porto", "Portugal").unwrap(),
            GpsCode::new(41.15, -8.61).unwrap(),
        )
    }

    #[test]
    fn should_create_house_without_location() {
        let house = House::new();
        assert!(house.location().is_none());
    }

    #[test]
    fn should_replace_location_and_keep_id() {
        let mut house = House::with_location(porto());
        let id = house.id().clone();
        let paris = Location::new(
            Address::new("Rue de Rivoli", "7", "75001", "Paris", "France").unwrap(),
            GpsCode::new(48.86, 2.35).unwrap(),
        );

        house.configure_location(paris.clone());

        assert_eq!(house.id(), &id);
        assert_eq!(house.location(), Some(&paris));
    }
}
