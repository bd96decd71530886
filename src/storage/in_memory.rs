use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use anyhow::Result;

use crate::storage::area::StorageArea;

/// In-memory storage area (no persistence). Used as the default backend and in tests.
#[derive(Default)]
pub struct InMemoryArea {
    map: RwLock<HashMap<String, String>>,
}

impl InMemoryArea {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageArea for InMemoryArea {
    fn get_item(&self, key: &str) -> Option<String> {
        self.map.read().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.map
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.map.write().unwrap_or_else(PoisonError::into_inner).remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.map.write().unwrap_or_else(PoisonError::into_inner).clear();
        Ok(())
    }

    fn len(&self) -> usize {
        self.map.read().map(|m| m.len()).unwrap_or(0)
    }

    fn keys(&self) -> Vec<String> {
        let mut v: Vec<String> = self
            .map
            .read()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default();
        v.sort_unstable();
        v
    }
}
