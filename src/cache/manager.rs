//! Single-slot cache with a time-to-live
//!
//! Provides a `TtlCache` that stores one serializable value together with the
//! instant it was written. Entries are never purged by age; callers check
//! freshness and decide whether to refetch.

use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io;
use std::marker::PhantomData;
use tracing::debug;

use super::KeyValueStore;

/// How long a cached forecast may be served without refetching
pub const FORECAST_TTL: Duration = Duration::minutes(15);

/// Store key holding the cached forecast
pub const FORECAST_CACHE_KEY: &str = "shoresquad:forecast";

/// A cached value and the instant it was stored
///
/// Serialized as `{"timestamp": <epoch millis>, "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// When the data was cached
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// The cached data
    pub data: T,
}

/// Manages one named slot in a `KeyValueStore`
///
/// The cache owns its slot exclusively; the rest of the store is untouched.
/// Overwrites are last-write-wins.
#[derive(Debug)]
pub struct TtlCache<S, T> {
    store: S,
    key: String,
    ttl: Duration,
    _data: PhantomData<fn() -> T>,
}

impl<S: KeyValueStore, T: Serialize + DeserializeOwned> TtlCache<S, T> {
    /// Creates a cache for `key` with the fixed forecast TTL
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            ttl: FORECAST_TTL,
            _data: PhantomData,
        }
    }

    /// The store key this cache manages
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads the cached entry
    ///
    /// Returns `None` if the slot is empty or its contents cannot be parsed;
    /// corrupt data is treated as a miss, never as an error.
    pub fn read(&self) -> Option<CacheEntry<T>> {
        let content = self.store.get(&self.key)?;
        match serde_json::from_str(&content) {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(key = %self.key, error = %e, "ignoring unparsable cache entry");
                None
            }
        }
    }

    /// Stores `data` stamped with the current time, replacing any prior entry
    pub fn write(&self, data: &T) -> io::Result<()> {
        self.write_at(data, Utc::now())
    }

    /// Stores `data` stamped with an explicit timestamp
    pub fn write_at(&self, data: &T, timestamp: DateTime<Utc>) -> io::Result<()> {
        let entry = CacheEntry { timestamp, data };
        let json = serde_json::to_string(&entry)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.store.set(&self.key, &json)
    }

    /// Removes the slot entirely
    pub fn invalidate(&self) -> io::Result<()> {
        self.store.remove(&self.key)
    }

    /// Whether `entry` is still fresh right now
    pub fn is_fresh(&self, entry: &CacheEntry<T>) -> bool {
        self.is_fresh_at(entry, Utc::now())
    }

    /// Whether `entry` is fresh at `now`
    ///
    /// Fresh means strictly younger than the TTL: an entry exactly TTL old is stale.
    pub fn is_fresh_at(&self, entry: &CacheEntry<T>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.timestamp) < self.ttl
    }
}
