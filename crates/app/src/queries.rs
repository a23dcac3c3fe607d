//! Cross-cutting read-only queries over the hierarchy and the value stores.

pub mod device_grouping;
pub mod peak_power;
pub mod temperature_difference;

pub use device_grouping::{DeviceGrouping, DeviceGroupingQuery};
pub use peak_power::PeakPowerQuery;
pub use temperature_difference::{
    NO_COMPARABLE_PAIR, TemperatureComparison, TemperatureDifferenceQuery,
};
