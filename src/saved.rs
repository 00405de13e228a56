//! Saved cleanup events
//!
//! A toggle set of event identifiers persisted as a JSON array under a single
//! store key. Independent of the forecast cache.

use std::io;

use crate::cache::KeyValueStore;

/// Store key holding the saved event identifiers
pub const SAVED_EVENTS_KEY: &str = "shoresquad:savedEvents";

pub struct SavedEvents<S> {
    store: S,
}

impl<S: KeyValueStore> SavedEvents<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Saved identifiers in the order they were saved
    ///
    /// Missing or corrupt data reads as an empty set.
    pub fn list(&self) -> Vec<String> {
        self.store
            .get(SAVED_EVENTS_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub fn contains(&self, event_id: &str) -> bool {
        self.list().iter().any(|id| id == event_id)
    }

    /// Saves `event_id` if it is not saved, otherwise removes it
    ///
    /// Returns `true` if the event is saved after the call.
    pub fn toggle(&self, event_id: &str) -> io::Result<bool> {
        let mut saved = self.list();
        let now_saved = match saved.iter().position(|id| id == event_id) {
            Some(idx) => {
                saved.remove(idx);
                false
            }
            None => {
                saved.push(event_id.to_string());
                true
            }
        };

        let json = serde_json::to_string(&saved)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.store.set(SAVED_EVENTS_KEY, &json)?;
        Ok(now_saved)
    }
}
