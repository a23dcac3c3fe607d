//! In-memory implementations of the three append-only value stores.
//!
//! Values come back ordered by time (recording instant, or period end).

use std::future::Future;

use smarthome_app::ports::{
    InstantLocationValueRepository, InstantValueRepository, PeriodValueRepository,
};
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::{SensorId, ValueId};
use smarthome_domain::time::Period;
use smarthome_domain::value::{InstantLocationValue, InstantValue, PeriodValue};

use crate::table::Table;

const ENTITY: &str = "Value";

fn chronological<V, K: Ord>(mut values: Vec<V>, key: impl Fn(&V) -> K) -> Vec<V> {
    values.sort_by_key(key);
    values
}

/// In-memory store of instant values.
#[derive(Clone)]
pub struct MemoryInstantValueRepository {
    table: Table<ValueId, InstantValue>,
}

impl MemoryInstantValueRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: Table::new("instant_values"),
        }
    }

    fn of_sensor(
        &self,
        sensor_id: &SensorId,
        keep: impl Fn(&InstantValue) -> bool,
    ) -> Result<Vec<InstantValue>, SmartHomeError> {
        let values = self
            .table
            .select(|value| value.sensor_id() == sensor_id && keep(value))?;
        Ok(chronological(values, InstantValue::recorded_at))
    }
}

impl Default for MemoryInstantValueRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InstantValueRepository for MemoryInstantValueRepository {
    fn save(
        &self,
        value: InstantValue,
    ) -> impl Future<Output = Result<ValueId, SmartHomeError>> + Send {
        let id = value.id().clone();
        let result = self.table.insert_new(ENTITY, id.clone(), value).map(|_| id);
        async move { result }
    }

    fn find_by_sensor(
        &self,
        sensor_id: &SensorId,
    ) -> impl Future<Output = Result<Vec<InstantValue>, SmartHomeError>> + Send {
        let result = self.of_sensor(sensor_id, |_| true);
        async move { result }
    }

    fn find_by_sensor_within_period(
        &self,
        sensor_id: &SensorId,
        period: &Period,
    ) -> impl Future<Output = Result<Vec<InstantValue>, SmartHomeError>> + Send {
        let result = self.of_sensor(sensor_id, |value| period.contains(value.recorded_at()));
        async move { result }
    }

    fn find_last_recorded(
        &self,
        sensor_id: &SensorId,
    ) -> impl Future<Output = Result<Option<InstantValue>, SmartHomeError>> + Send {
        let result = self
            .of_sensor(sensor_id, |_| true)
            .map(|values| values.into_iter().next_back());
        async move { result }
    }
}

/// In-memory store of period values.
#[derive(Clone)]
pub struct MemoryPeriodValueRepository {
    table: Table<ValueId, PeriodValue>,
}

impl MemoryPeriodValueRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: Table::new("period_values"),
        }
    }

    fn of_sensor(
        &self,
        sensor_id: &SensorId,
        keep: impl Fn(&PeriodValue) -> bool,
    ) -> Result<Vec<PeriodValue>, SmartHomeError> {
        let values = self
            .table
            .select(|value| value.sensor_id() == sensor_id && keep(value))?;
        Ok(chronological(values, PeriodValue::end))
    }
}

impl Default for MemoryPeriodValueRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl PeriodValueRepository for MemoryPeriodValueRepository {
    fn save(
        &self,
        value: PeriodValue,
    ) -> impl Future<Output = Result<ValueId, SmartHomeError>> + Send {
        let id = value.id().clone();
        let result = self.table.insert_new(ENTITY, id.clone(), value).map(|_| id);
        async move { result }
    }

    fn find_by_sensor(
        &self,
        sensor_id: &SensorId,
    ) -> impl Future<Output = Result<Vec<PeriodValue>, SmartHomeError>> + Send {
        let result = self.of_sensor(sensor_id, |_| true);
        async move { result }
    }

    fn find_by_sensor_within_period(
        &self,
        sensor_id: &SensorId,
        period: &Period,
    ) -> impl Future<Output = Result<Vec<PeriodValue>, SmartHomeError>> + Send {
        let result = self.of_sensor(sensor_id, |value| {
            period.encloses(value.start(), value.end())
        });
        async move { result }
    }
}

/// In-memory store of located instant values.
#[derive(Clone)]
pub struct MemoryInstantLocationValueRepository {
    table: Table<ValueId, InstantLocationValue>,
}

impl MemoryInstantLocationValueRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: Table::new("instant_location_values"),
        }
    }

    fn of_sensor(
        &self,
        sensor_id: &SensorId,
        keep: impl Fn(&InstantLocationValue) -> bool,
    ) -> Result<Vec<InstantLocationValue>, SmartHomeError> {
        let values = self
            .table
            .select(|value| value.sensor_id() == sensor_id && keep(value))?;
        Ok(chronological(values, InstantLocationValue::recorded_at))
    }
}

impl Default for MemoryInstantLocationValueRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InstantLocationValueRepository for MemoryInstantLocationValueRepository {
    fn save(
        &self,
        value: InstantLocationValue,
    ) -> impl Future<Output = Result<ValueId, SmartHomeError>> + Send {
        let id = value.id().clone();
        let result = self.table.insert_new(ENTITY, id.clone(), value).map(|_| id);
        async move { result }
    }

    fn find_by_sensor(
        &self,
        sensor_id: &SensorId,
    ) -> impl Future<Output = Result<Vec<InstantLocationValue>, SmartHomeError>> + Send {
        let result = self.of_sensor(sensor_id, |_| true);
        async move { result }
    }

    fn find_by_sensor_within_period(
        &self,
        sensor_id: &SensorId,
        period: &Period,
    ) -> impl Future<Output = Result<Vec<InstantLocationValue>, SmartHomeError>> + Send {
        let result = self.of_sensor(sensor_id, |value| period.contains(value.recorded_at()));
        async move { result }
    }

    fn find_last_recorded(
        &self,
        sensor_id: &SensorId,
    ) -> impl Future<Output = Result<Option<InstantLocationValue>, SmartHomeError>> + Send {
        let result = self
            .of_sensor(sensor_id, |_| true)
            .map(|values| values.into_iter().next_back());
        async move { result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;
    use smarthome_domain::location::GpsCode;
    use smarthome_domain::reading::Reading;
    use smarthome_domain::time::Timestamp;

    fn at(hour: u32, minute: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, minute, 0).unwrap()
    }

    fn sensor() -> SensorId {
        SensorId::new("Sensor001").unwrap()
    }

    fn instant(value: &str, recorded_at: Timestamp) -> InstantValue {
        InstantValue::builder()
            .sensor_id(sensor())
            .reading(Reading::new(value, "ºC").unwrap())
            .recorded_at(recorded_at)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_find_value_when_bounds_equal_its_timestamp() {
        let repo = MemoryInstantValueRepository::new();
        let value = instant("21", at(8, 0));
        repo.save(value.clone()).await.unwrap();

        let period = Period::new(at(8, 0), at(8, 0)).unwrap();
        let found = repo
            .find_by_sensor_within_period(&sensor(), &period)
            .await
            .unwrap();
        assert_eq!(found, vec![value]);
    }

    #[tokio::test]
    async fn should_return_instant_values_in_time_order() {
        let repo = MemoryInstantValueRepository::new();
        repo.save(instant("22", at(9, 0))).await.unwrap();
        repo.save(instant("20", at(7, 0))).await.unwrap();
        repo.save(instant("21", at(8, 0))).await.unwrap();

        let period = Period::new(at(7, 30), at(9, 0)).unwrap();
        let found = repo
            .find_by_sensor_within_period(&sensor(), &period)
            .await
            .unwrap();
        let times: Vec<Timestamp> = found.iter().map(InstantValue::recorded_at).collect();
        assert_eq!(times, vec![at(8, 0), at(9, 0)]);

        let last = repo.find_last_recorded(&sensor()).await.unwrap().unwrap();
        assert_eq!(last.recorded_at(), at(9, 0));
        assert_eq!(repo.find_by_sensor(&sensor()).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn should_keep_only_periods_enclosed_by_the_window() {
        let repo = MemoryPeriodValueRepository::new();
        for (start, end) in [(at(8, 0), at(8, 15)), (at(8, 45), at(9, 15))] {
            let value = PeriodValue::builder()
                .sensor_id(sensor())
                .reading(Reading::new("300", "W").unwrap())
                .start(start)
                .end(end)
                .build()
                .unwrap();
            repo.save(value).await.unwrap();
        }

        let period = Period::new(at(8, 0), at(9, 0)).unwrap();
        let found = repo
            .find_by_sensor_within_period(&sensor(), &period)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].end(), at(8, 15));
    }

    #[tokio::test]
    async fn should_store_located_values_per_sensor() {
        let repo = MemoryInstantLocationValueRepository::new();
        let value = InstantLocationValue::builder()
            .sensor_id(sensor())
            .reading(Reading::new("6.5", "h").unwrap())
            .recorded_at(at(6, 30))
            .gps(GpsCode::new(41.15, -8.61).unwrap())
            .build()
            .unwrap();
        let id = repo.save(value.clone()).await.unwrap();
        assert_eq!(&id, value.id());

        let other = SensorId::new("Sensor002").unwrap();
        assert!(repo.find_by_sensor(&other).await.unwrap().is_empty());
        assert_eq!(repo.find_last_recorded(&sensor()).await.unwrap(), Some(value));
    }

    fn block_on<F: Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }

    proptest! {
        #[test]
        fn should_treat_window_bounds_as_inclusive(
            seconds in 0_i64..4_000_000_000,
            before in 0_i64..7_200,
            after in 0_i64..7_200,
        ) {
            let recorded_at = Utc.timestamp_opt(seconds, 0).unwrap();
            let repo = MemoryInstantValueRepository::new();
            let value = instant("21", recorded_at);
            block_on(repo.save(value.clone())).unwrap();

            let around = Period::new(
                recorded_at - Duration::seconds(before),
                recorded_at + Duration::seconds(after),
            )
            .unwrap();
            let found = block_on(repo.find_by_sensor_within_period(&sensor(), &around)).unwrap();
            prop_assert_eq!(found, vec![value]);

            let later = Period::new(
                recorded_at + Duration::seconds(1),
                recorded_at + Duration::seconds(after + 1),
            )
            .unwrap();
            let found = block_on(repo.find_by_sensor_within_period(&sensor(), &later)).unwrap();
            prop_assert!(found.is_empty());

            let earlier = Period::new(
                recorded_at - Duration::seconds(before + 1),
                recorded_at - Duration::seconds(1),
            )
            .unwrap();
            let found = block_on(repo.find_by_sensor_within_period(&sensor(), &earlier)).unwrap();
            prop_assert!(found.is_empty());
        }

        #[test]
        fn should_find_period_value_when_window_equals_its_bounds(
            seconds in 0_i64..4_000_000_000,
            length in 0_i64..7_200,
        ) {
            let start = Utc.timestamp_opt(seconds, 0).unwrap();
            let end = start + Duration::seconds(length);
            let repo = MemoryPeriodValueRepository::new();
            let value = PeriodValue::builder()
                .sensor_id(sensor())
                .reading(Reading::new("300", "W").unwrap())
                .start(start)
                .end(end)
                .build()
                .unwrap();
            block_on(repo.save(value.clone())).unwrap();

            let window = Period::new(start, end).unwrap();
            let found = block_on(repo.find_by_sensor_within_period(&sensor(), &window)).unwrap();
            prop_assert_eq!(found, vec![value]);
        }
    }
}
