//! House service: use-cases for the single house.

use smarthome_domain::error::{NotFoundError, SmartHomeError};
use smarthome_domain::house::House;
use smarthome_domain::location::Location;

use crate::ports::HouseRepository;

/// Application service for creating and locating the house.
pub struct HouseService<H> {
    repo: H,
}

impl<H: HouseRepository> HouseService<H> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: H) -> Self {
        Self { repo }
    }

    /// Create the house, optionally at a location.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::AlreadyExists`] when a house is already
    /// stored, or a storage error from the repository.
    #[tracing::instrument(skip(self, location), fields(located = location.is_some()))]
    pub async fn create_house(&self, location: Option<Location>) -> Result<House, SmartHomeError> {
        let house = match location {
            Some(location) => House::with_location(location),
            None => House::new(),
        };
        let house = self.repo.save(house).await?;
        tracing::info!(house_id = %house.id(), "house created");
        Ok(house)
    }

    /// Set or replace the location of the house.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no house exists, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, location))]
    pub async fn configure_location(&self, location: Location) -> Result<House, SmartHomeError> {
        let mut house = self.get_house().await?;
        house.configure_location(location);
        self.repo.update(house).await
    }

    /// Fetch the house.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no house exists, or a
    /// storage error from the repository.
    pub async fn get_house(&self) -> Result<House, SmartHomeError> {
        self.repo.find_the_house().await?.ok_or_else(|| {
            NotFoundError {
                entity: "House",
                id: "<the house>".to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::store;
    use smarthome_domain::location::{Address, GpsCode};

    fn porto() -> Location {
        Location::new(
            Address::new("Rua Dr. Antonio", "23", "4000-000", "Porto", "Portugal").unwrap(),
            GpsCode::new(41.15, -8.61).unwrap(),
        )
    }

    #[tokio::test]
    async fn should_create_house_without_location() {
        let svc = HouseService::new(store());
        let house = svc.create_house(None).await.unwrap();
        assert!(house.location().is_none());
        assert_eq!(svc.get_house().await.unwrap().id(), house.id());
    }

    #[tokio::test]
    async fn should_reject_second_house() {
        let svc = HouseService::new(store());
        svc.create_house(None).await.unwrap();
        let result = svc.create_house(Some(porto())).await;
        assert!(matches!(result, Err(SmartHomeError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn should_configure_location_of_existing_house() {
        let svc = HouseService::new(store());
        let created = svc.create_house(None).await.unwrap();

        let updated = svc.configure_location(porto()).await.unwrap();

        assert_eq!(updated.id(), created.id());
        assert_eq!(updated.location(), Some(&porto()));
        assert_eq!(svc.get_house().await.unwrap().location(), Some(&porto()));
    }

    #[tokio::test]
    async fn should_return_not_found_when_no_house() {
        let svc = HouseService::new(store());
        let result = svc.configure_location(porto()).await;
        assert!(matches!(result, Err(SmartHomeError::NotFound(_))));
    }
}
