use std::fmt::Debug;
use std::sync::Arc;

use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::StoreError;
use crate::storage::area::StorageArea;
use crate::storage::event::{StorageBus, StorageEvent, Subscription};
use crate::storage::in_memory::InMemoryArea;

/// JSON adapter on top of a [`StorageArea`].
///
/// The plain operations (`save`, `load`, `remove`, `clear`) never fail loudly:
/// problems are logged and reported as `false` / `None`, so a broken store
/// degrades the application to an empty state instead of taking it down.
/// Use the `try_*` variants when the reason matters.
pub struct KeyValueStore {
    area: Arc<dyn StorageArea>,
    quota_bytes: Option<usize>,
    bus: StorageBus,
}

impl Debug for KeyValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyValueStore")
            .field("quota_bytes", &self.quota_bytes)
            .finish_non_exhaustive()
    }
}

impl KeyValueStore {
    pub fn new(area: Arc<dyn StorageArea>) -> Self {
        Self {
            area,
            quota_bytes: None,
            bus: StorageBus::default(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryArea::new()))
    }

    /// Limits the total number of bytes (keys plus values) the store may hold.
    pub fn with_quota(mut self, quota_bytes: Option<usize>) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    pub fn subscribe(&self) -> Subscription {
        self.bus.subscribe()
    }

    pub fn area(&self) -> &Arc<dyn StorageArea> {
        &self.area
    }

    pub fn try_save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;

        let old = self.area.get_item(key);
        if let Some(quota) = self.quota_bytes {
            let current = old.as_ref().map(|v| key.len() + v.len()).unwrap_or(0);
            let needed = self.area.usage_bytes().saturating_sub(current) + key.len() + json.len();
            if needed > quota {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }

        self.area.set_item(key, &json)?;
        debug!("saved '{}' ({} bytes)", key, json.len());

        self.bus.publish(StorageEvent {
            key: Some(key.to_string()),
            old_value: old,
            new_value: Some(json),
        });
        Ok(())
    }

    /// Serializes `value` under `key`. Returns `false` (and logs) on failure.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match self.try_save(key, value) {
            Ok(()) => true,
            Err(e) => {
                error!("Error saving to storage: {e}");
                false
            }
        }
    }

    pub fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.area.get_item(key) else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Deserialize {
                key: key.to_string(),
                source,
            })
    }

    /// Loads the value under `key`; missing and malformed values both come back as `None`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_load(key) {
            Ok(v) => v,
            Err(e) => {
                warn!("Error reading from storage: {e}");
                None
            }
        }
    }

    pub fn try_remove(&self, key: &str) -> Result<(), StoreError> {
        let old = self.area.get_item(key);
        self.area.remove_item(key)?;
        debug!("removed '{}'", key);

        self.bus.publish(StorageEvent {
            key: Some(key.to_string()),
            old_value: old,
            new_value: None,
        });
        Ok(())
    }

    pub fn remove(&self, key: &str) -> bool {
        match self.try_remove(key) {
            Ok(()) => true,
            Err(e) => {
                error!("Error removing from storage: {e}");
                false
            }
        }
    }

    pub fn try_clear(&self) -> Result<(), StoreError> {
        self.area.clear()?;
        debug!("cleared storage");

        self.bus.publish(StorageEvent {
            key: None,
            old_value: None,
            new_value: None,
        });
        Ok(())
    }

    pub fn clear(&self) -> bool {
        match self.try_clear() {
            Ok(()) => true,
            Err(e) => {
                error!("Error clearing storage: {e}");
                false
            }
        }
    }
}
