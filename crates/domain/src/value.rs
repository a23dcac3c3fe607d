//! Values: immutable time-series records produced by sensors.
//!
//! There are three shapes: a reading at an instant, a reading over a period,
//! and a reading at an instant tagged with GPS coordinates. Values are never
//! mutated once built.

use std::fmt;

use serde::Serialize;

use crate::error::{SmartHomeError, ValidationError};
use crate::id::{SensorId, ValueId};
use crate::location::GpsCode;
use crate::reading::Reading;
use crate::time::{Period, Timestamp};

/// The shape of a recorded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValueKind {
    Instant,
    Period,
    InstantLocation,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instant => f.write_str("instant"),
            Self::Period => f.write_str("period"),
            Self::InstantLocation => f.write_str("instant location"),
        }
    }
}

/// A reading taken at a single instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstantValue {
    id: ValueId,
    sensor_id: SensorId,
    reading: Reading,
    recorded_at: Timestamp,
}

impl InstantValue {
    /// Create a builder for constructing an [`InstantValue`].
    #[must_use]
    pub fn builder() -> InstantValueBuilder {
        InstantValueBuilder::default()
    }

    #[must_use]
    pub fn id(&self) -> &ValueId {
        &self.id
    }

    #[must_use]
    pub fn sensor_id(&self) -> &SensorId {
        &self.sensor_id
    }

    #[must_use]
    pub fn reading(&self) -> &Reading {
        &self.reading
    }

    #[must_use]
    pub fn recorded_at(&self) -> Timestamp {
        self.recorded_at
    }
}

/// Step-by-step builder for [`InstantValue`].
#[derive(Debug, Default)]
pub struct InstantValueBuilder {
    id: Option<ValueId>,
    sensor_id: Option<SensorId>,
    reading: Option<Reading>,
    recorded_at: Option<Timestamp>,
}

impl InstantValueBuilder {
    #[must_use]
    pub fn id(mut self, id: ValueId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn sensor_id(mut self, sensor_id: SensorId) -> Self {
        self.sensor_id = Some(sensor_id);
        self
    }

    #[must_use]
    pub fn reading(mut self, reading: Reading) -> Self {
        self.reading = Some(reading);
        self
    }

    #[must_use]
    pub fn recorded_at(mut self, recorded_at: Timestamp) -> Self {
        self.recorded_at = Some(recorded_at);
        self
    }

    /// Consume the builder and return an [`InstantValue`].
    ///
    /// The id is generated and the timestamp defaults to now when absent.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] if the sensor id or reading is missing.
    pub fn build(self) -> Result<InstantValue, SmartHomeError> {
        Ok(InstantValue {
            id: self.id.unwrap_or_else(ValueId::generate),
            sensor_id: self
                .sensor_id
                .ok_or(ValidationError::MissingField("sensor id"))?,
            reading: self.reading.ok_or(ValidationError::MissingField("reading"))?,
            recorded_at: self.recorded_at.unwrap_or_else(crate::time::now),
        })
    }
}

/// A reading aggregated over `[start, end]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodValue {
    id: ValueId,
    sensor_id: SensorId,
    reading: Reading,
    period: Period,
}

impl PeriodValue {
    /// Create a builder for constructing a [`PeriodValue`].
    #[must_use]
    pub fn builder() -> PeriodValueBuilder {
        PeriodValueBuilder::default()
    }

    #[must_use]
    pub fn id(&self) -> &ValueId {
        &self.id
    }

    #[must_use]
    pub fn sensor_id(&self) -> &SensorId {
        &self.sensor_id
    }

    #[must_use]
    pub fn reading(&self) -> &Reading {
        &self.reading
    }

    #[must_use]
    pub fn start(&self) -> Timestamp {
        self.period.start()
    }

    #[must_use]
    pub fn end(&self) -> Timestamp {
        self.period.end()
    }

    #[must_use]
    pub fn period(&self) -> Period {
        self.period
    }
}

/// Step-by-step builder for [`PeriodValue`].
#[derive(Debug, Default)]
pub struct PeriodValueBuilder {
    id: Option<ValueId>,
    sensor_id: Option<SensorId>,
    reading: Option<Reading>,
    start: Option<Timestamp>,
    end: Option<Timestamp>,
}

impl PeriodValueBuilder {
    #[must_use]
    pub fn id(mut self, id: ValueId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn sensor_id(mut self, sensor_id: SensorId) -> Self {
        self.sensor_id = Some(sensor_id);
        self
    }

    #[must_use]
    pub fn reading(mut self, reading: Reading) -> Self {
        self.reading = Some(reading);
        self
    }

    #[must_use]
    pub fn start(mut self, start: Timestamp) -> Self {
        self.start = Some(start);
        self
    }

    #[must_use]
    pub fn end(mut self, end: Timestamp) -> Self {
        self.end = Some(end);
        self
    }

    /// Consume the builder and return a [`PeriodValue`].
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] if a field is missing or the
    /// start is after the end.
    pub fn build(self) -> Result<PeriodValue, SmartHomeError> {
        let start = self.start.ok_or(ValidationError::MissingField("start"))?;
        let end = self.end.ok_or(ValidationError::MissingField("end"))?;
        Ok(PeriodValue {
            id: self.id.unwrap_or_else(ValueId::generate),
            sensor_id: self
                .sensor_id
                .ok_or(ValidationError::MissingField("sensor id"))?,
            reading: self.reading.ok_or(ValidationError::MissingField("reading"))?,
            period: Period::new(start, end)?,
        })
    }
}

/// A reading taken at a single instant and place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstantLocationValue {
    id: ValueId,
    sensor_id: SensorId,
    reading: Reading,
    recorded_at: Timestamp,
    gps: GpsCode,
}

impl InstantLocationValue {
    /// Create a builder for constructing an [`InstantLocationValue`].
    #[must_use]
    pub fn builder() -> InstantLocationValueBuilder {
        InstantLocationValueBuilder::default()
    }

    #[must_use]
    pub fn id(&self) -> &ValueId {
        &self.id
    }

    #[must_use]
    pub fn sensor_id(&self) -> &SensorId {
        &self.sensor_id
    }

    #[must_use]
    pub fn reading(&self) -> &Reading {
        &self.reading
    }

    #[must_use]
    pub fn recorded_at(&self) -> Timestamp {
        self.recorded_at
    }

    #[must_use]
    pub fn gps(&self) -> GpsCode {
        self.gps
    }
}

/// Step-by-step builder for [`InstantLocationValue`].
#[derive(Debug, Default)]
pub struct InstantLocationValueBuilder {
    id: Option<ValueId>,
    sensor_id: Option<SensorId>,
    reading: Option<Reading>,
    recorded_at: Option<Timestamp>,
    gps: Option<GpsCode>,
}

impl InstantLocationValueBuilder {
    #[must_use]
    pub fn id(mut self, id: ValueId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn sensor_id(mut self, sensor_id: SensorId) -> Self {
        self.sensor_id = Some(sensor_id);
        self
    }

    #[must_use]
    pub fn reading(mut self, reading: Reading) -> Self {
        self.reading = Some(reading);
        self
    }

    #[must_use]
    pub fn recorded_at(mut self, recorded_at: Timestamp) -> Self {
        self.recorded_at = Some(recorded_at);
        self
    }

    #[must_use]
    pub fn gps(mut self, gps: GpsCode) -> Self {
        self.gps = Some(gps);
        self
    }

    /// Consume the builder and return an [`InstantLocationValue`].
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] if the sensor id, reading or
    /// GPS code is missing.
    pub fn build(self) -> Result<InstantLocationValue, SmartHomeError> {
        Ok(InstantLocationValue {
            id: self.id.unwrap_or_else(ValueId::generate),
            sensor_id: self
                .sensor_id
                .ok_or(ValidationError::MissingField("sensor id"))?,
            reading: self.reading.ok_or(ValidationError::MissingField("reading"))?,
            recorded_at: self.recorded_at.unwrap_or_else(crate::time::now),
            gps: self.gps.ok_or(ValidationError::MissingField("gps"))?,
        })
    }
}

/// Any recorded value, as returned by cross-store queries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Measurement {
    Instant(InstantValue),
    Period(PeriodValue),
    InstantLocation(InstantLocationValue),
}

impl Measurement {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Instant(_) => ValueKind::Instant,
            Self::Period(_) => ValueKind::Period,
            Self::InstantLocation(_) => ValueKind::InstantLocation,
        }
    }

    #[must_use]
    pub fn reading(&self) -> &Reading {
        match self {
            Self::Instant(value) => value.reading(),
            Self::Period(value) => value.reading(),
            Self::InstantLocation(value) => value.reading(),
        }
    }

    #[must_use]
    pub fn sensor_id(&self) -> &SensorId {
        match self {
            Self::Instant(value) => value.sensor_id(),
            Self::Period(value) => value.sensor_id(),
            Self::InstantLocation(value) => value.sensor_id(),
        }
    }

    /// When the value became available; the end of the period for period values.
    #[must_use]
    pub fn observed_at(&self) -> Timestamp {
        match self {
            Self::Instant(value) => value.recorded_at(),
            Self::Period(value) => value.end(),
            Self::InstantLocation(value) => value.recorded_at(),
        }
    }
}
