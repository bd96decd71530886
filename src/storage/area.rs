use anyhow::Result;

/// Object-safe key/value storage area, modelled on the DOM's `Storage`.
pub trait StorageArea: Send + Sync {
    /// Retrieves the value associated with the given key, or `None` if not found.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Sets the value for the given key, overwriting any existing value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the item with the given key.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Clears all items in the storage area.
    fn clear(&self) -> Result<()>;

    /// Returns the number of items in the storage area.
    fn len(&self) -> usize;

    /// Returns a vector of all keys in the storage area.
    fn keys(&self) -> Vec<String>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes held by the area, counted as key plus value length.
    fn usage_bytes(&self) -> usize {
        self.keys()
            .iter()
            .map(|k| k.len() + self.get_item(k).map(|v| v.len()).unwrap_or(0))
            .sum()
    }
}
