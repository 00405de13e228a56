//! Cache module for persisting the forecast between runs
//!
//! A `KeyValueStore` is the persistent backing (one JSON file per key on disk, or
//! an in-memory map), and a `TtlCache` manages a single named slot in it with a
//! storage timestamp so callers can ask whether the value is still fresh.

mod manager;
mod store;

pub use manager::{CacheEntry, TtlCache, FORECAST_CACHE_KEY, FORECAST_TTL};
pub use store::{FileStore, KeyValueStore, MemoryStore};
