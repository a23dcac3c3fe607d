//! Readings: one or more measurement/unit pairs produced by a sensor.

use std::fmt;

use serde::Serialize;

use crate::error::ValidationError;

const PART_SEPARATOR: char = ';';
const UNITLESS: &str = "*";

/// An immutable reading made of `;`-separated measurements and units.
///
/// A single unit may be given for several measurements only when they share
/// it; otherwise there must be one unit per measurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reading {
    measurements: Vec<String>,
    units: Vec<String>,
}

impl Reading {
    /// Parse a reading from its measurement and unit strings.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BlankField`] when any part is blank and
    /// [`ValidationError::ReadingArity`] when the unit count matches neither
    /// one nor the measurement count.
    pub fn new(measurement: &str, unit: &str) -> Result<Self, ValidationError> {
        let measurements = split_parts(measurement, "measurement")?;
        let mut units = split_parts(unit, "unit")?;
        if units.len() == 1 && measurements.len() > 1 {
            units = vec![units[0].clone(); measurements.len()];
        }
        if units.len() != measurements.len() {
            return Err(ValidationError::ReadingArity {
                measurements: measurements.len(),
                units: units.len(),
            });
        }
        Ok(Self {
            measurements,
            units,
        })
    }

    #[must_use]
    pub fn measurements(&self) -> &[String] {
        &self.measurements
    }

    #[must_use]
    pub fn units(&self) -> &[String] {
        &self.units
    }

    /// Number of measurement/unit pairs.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.measurements.len()
    }

    /// The numeric value of a single-part reading.
    #[must_use]
    pub fn scalar(&self) -> Option<f64> {
        match self.measurements.as_slice() {
            [single] => single.parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// The reading converted to degrees Celsius, when it is a single
    /// numeric temperature in a recognised unit.
    #[must_use]
    pub fn temperature_celsius(&self) -> Option<f64> {
        let value = self.scalar()?;
        let unit = TemperatureUnit::parse(&self.units[0])?;
        Some(unit.to_celsius(value))
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, (measurement, unit)) in
            self.measurements.iter().zip(&self.units).enumerate()
        {
            if position > 0 {
                f.write_str(" and ")?;
            }
            if unit == UNITLESS {
                f.write_str(measurement)?;
            } else {
                write!(f, "{measurement} {unit}")?;
            }
        }
        Ok(())
    }
}

fn split_parts(raw: &str, field: &'static str) -> Result<Vec<String>, ValidationError> {
    raw.split(PART_SEPARATOR)
        .map(|part| {
            let part = part.trim();
            if part.is_empty() {
                Err(ValidationError::BlankField(field))
            } else {
                Ok(part.to_string())
            }
        })
        .collect()
}

/// Temperature scales recognised when comparing readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    /// Recognise the spellings sensors use for a temperature unit.
    #[must_use]
    pub fn parse(unit: &str) -> Option<Self> {
        let unit = unit.trim();
        match unit {
            "ºC" | "Cº" | "°C" | "C°" | "C" => Some(Self::Celsius),
            "ºF" | "Fº" | "°F" | "F°" | "F" => Some(Self::Fahrenheit),
            "K" => Some(Self::Kelvin),
            _ if unit.eq_ignore_ascii_case("celsius") => Some(Self::Celsius),
            _ if unit.eq_ignore_ascii_case("fahrenheit") => Some(Self::Fahrenheit),
            _ if unit.eq_ignore_ascii_case("kelvin") => Some(Self::Kelvin),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            Self::Celsius => value,
            Self::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            Self::Kelvin => value - 273.15,
        }
    }
}
