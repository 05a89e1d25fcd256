//! Query Cache - keyed in-memory store
//!
//! Each operation holds the lock only for its own read-modify-write, so a
//! single `update` is atomic with respect to every other cache operation.
//! Multi-step transactions built on top (such as optimistic submission) are
//! not.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::key::QueryKey;

/// A cached value and the time it was last written
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub data: V,
    pub updated_at: DateTime<Utc>,
}

/// In-memory cache of server-derived data
#[derive(Debug)]
pub struct QueryCache<V> {
    entries: RwLock<HashMap<QueryKey, CacheEntry<V>>>,
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<V: Clone> QueryCache<V> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value under `key`, if any
    pub fn get(&self, key: &QueryKey) -> Option<V> {
        self.read().get(key).map(|entry| entry.data.clone())
    }

    /// Unconditionally replace the value under `key`
    pub fn set(&self, key: &QueryKey, value: V) {
        tracing::debug!(key = %key, "Cache set");
        self.write().insert(
            key.clone(),
            CacheEntry {
                data: value,
                updated_at: Utc::now(),
            },
        );
    }

    /// Read-modify-write the value under `key`
    ///
    /// The updater receives the current value, or `None` when no entry
    /// exists. Returning `None` leaves the key absent. Returns the value now
    /// stored under the key.
    pub fn update<F>(&self, key: &QueryKey, updater: F) -> Option<V>
    where
        F: FnOnce(Option<V>) -> Option<V>,
    {
        let mut entries = self.write();
        let current = entries.get(key).map(|entry| entry.data.clone());

        match updater(current) {
            Some(value) => {
                tracing::debug!(key = %key, "Cache update");
                entries.insert(
                    key.clone(),
                    CacheEntry {
                        data: value.clone(),
                        updated_at: Utc::now(),
                    },
                );
                Some(value)
            }
            None => {
                if entries.remove(key).is_some() {
                    tracing::debug!(key = %key, "Cache entry cleared by update");
                }
                None
            }
        }
    }

    /// Remove the entry under `key`, returning its value
    pub fn remove(&self, key: &QueryKey) -> Option<V> {
        self.write().remove(key).map(|entry| entry.data)
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.read().contains_key(key)
    }

    /// When the entry under `key` was last written
    pub fn updated_at(&self, key: &QueryKey) -> Option<DateTime<Utc>> {
        self.read().get(key).map(|entry| entry.updated_at)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.write().clear();
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<QueryKey, CacheEntry<V>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<QueryKey, CacheEntry<V>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}
