//! Time, timestamp and period helpers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ValidationError;

/// UTC timestamp used for readings and query bounds.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// A closed time interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    start: Timestamp,
    end: Timestamp,
}

impl Period {
    /// Build a period, requiring `start <= end`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPeriod`] when `start` is after `end`.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvalidPeriod);
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(&self) -> Timestamp {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Whether `at` lies inside the period, bounds included.
    #[must_use]
    pub fn contains(&self, at: Timestamp) -> bool {
        self.start <= at && at <= self.end
    }

    /// Whether `[start, end]` lies entirely inside the period, bounds included.
    #[must_use]
    pub fn encloses(&self, start: Timestamp, end: Timestamp) -> bool {
        self.start <= start && end <= self.end
    }
}
