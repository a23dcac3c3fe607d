//! Shared, lock-protected map backing every repository.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::{Arc, RwLock};

use smarthome_domain::error::{AlreadyExistsError, NotFoundError, SmartHomeError};

use crate::error::StorageError;

pub(crate) struct Table<K, V> {
    name: &'static str,
    rows: Arc<RwLock<BTreeMap<K, V>>>,
}

impl<K, V> Clone for Table<K, V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<K: Ord + ToString, V: Clone> Table<K, V> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            rows: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    fn poisoned(&self) -> StorageError {
        tracing::error!(table = self.name, "table lock poisoned");
        StorageError::LockPoisoned { table: self.name }
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&BTreeMap<K, V>) -> R) -> Result<R, StorageError> {
        let rows = self.rows.read().map_err(|_| self.poisoned())?;
        Ok(f(&rows))
    }

    pub(crate) fn write<R>(
        &self,
        f: impl FnOnce(&mut BTreeMap<K, V>) -> R,
    ) -> Result<R, StorageError> {
        let mut rows = self.rows.write().map_err(|_| self.poisoned())?;
        Ok(f(&mut rows))
    }

    /// Insert `row` under `key`, failing when the key is taken.
    pub(crate) fn insert_new(
        &self,
        entity: &'static str,
        key: K,
        row: V,
    ) -> Result<V, SmartHomeError> {
        self.write(|rows| match rows.entry(key) {
            Entry::Occupied(entry) => Err(AlreadyExistsError {
                entity,
                id: entry.key().to_string(),
            }
            .into()),
            Entry::Vacant(entry) => Ok(entry.insert(row).clone()),
        })?
    }

    /// Replace the row under `key`, failing when it is absent.
    pub(crate) fn replace(
        &self,
        entity: &'static str,
        key: &K,
        row: V,
    ) -> Result<V, SmartHomeError> {
        self.write(|rows| match rows.get_mut(key) {
            Some(slot) => {
                *slot = row.clone();
                Ok(row)
            }
            None => Err(NotFoundError {
                entity,
                id: key.to_string(),
            }
            .into()),
        })?
    }

    pub(crate) fn get(&self, key: &K) -> Result<Option<V>, StorageError> {
        self.read(|rows| rows.get(key).cloned())
    }

    pub(crate) fn contains(&self, key: &K) -> Result<bool, StorageError> {
        self.read(|rows| rows.contains_key(key))
    }

    pub(crate) fn select(&self, keep: impl Fn(&V) -> bool) -> Result<Vec<V>, StorageError> {
        self.read(|rows| rows.values().filter(|row| keep(row)).cloned().collect())
    }
}
