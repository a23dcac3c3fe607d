//! Storage-specific error type for the in-memory tables.

use smarthome_domain::error::SmartHomeError;

/// Errors originating from the in-memory storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A writer panicked while holding the table lock.
    #[error("table {table} is poisoned")]
    LockPoisoned { table: &'static str },
}

impl From<StorageError> for SmartHomeError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// The in-memory weather table has no entry for a request.
#[derive(Debug, thiserror::Error)]
#[error("no {what} reported for {key}")]
pub struct NotReported {
    pub what: &'static str,
    pub key: String,
}

impl From<NotReported> for SmartHomeError {
    fn from(err: NotReported) -> Self {
        Self::Gateway(Box::new(err))
    }
}
