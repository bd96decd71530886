//! JSON-file backed storage area.
//!
//! `JsonFileArea` keeps **all keys** of an area in a single JSON file on disk.
//! Values are stored as the raw strings handed to [`StorageArea::set_item`],
//! exactly like browser localStorage holds them.
//!
//! ### Design
//! - One file per area (`StorageFile { items: BTreeMap<String, String> }`).
//! - The whole file is read once at open and cached behind an `RwLock`.
//! - Every mutation rewrites the entire file: the new content goes to a
//!   sibling `*.tmp` file which is then renamed over the original.
//!
//! ### Caveats
//! - Two areas opened on the same path do not see each other's writes;
//!   the last writer wins.
//! - For large datasets, prefer the SQLite backend.
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::storage::area::StorageArea;

/// On-disk representation of the area.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StorageFile {
    items: BTreeMap<String, String>,
}

pub struct JsonFileArea {
    /// Path to the JSON file where items are stored.
    path: PathBuf,
    /// Cached copy of the file contents.
    items: RwLock<BTreeMap<String, String>>,
}

impl JsonFileArea {
    /// Opens the area stored at `path`. A missing file is treated as an empty area
    /// and is only created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let items = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("reading storage file {}", path.display()))?;
            let file: StorageFile = serde_json::from_str(&contents)
                .with_context(|| format!("parsing storage file {}", path.display()))?;
            file.items
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            items: RwLock::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `f` to a copy of the items, writes it to disk and only then
    /// swaps it into the cache, so a failed write leaves the area untouched.
    fn mutate(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let mut guard = self.items.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = guard.clone();
        f(&mut next);
        self.save_file(&next)?;
        *guard = next;
        Ok(())
    }

    fn save_file(&self, items: &BTreeMap<String, String>) -> Result<()> {
        let file = StorageFile { items: items.clone() };
        let contents = serde_json::to_string_pretty(&file)?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, contents).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing storage file {}", self.path.display()))?;
        Ok(())
    }
}

impl StorageArea for JsonFileArea {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.mutate(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.mutate(|items| {
            items.remove(key);
        })
    }

    fn clear(&self) -> Result<()> {
        self.mutate(BTreeMap::clear)
    }

    fn len(&self) -> usize {
        self.items.read().map(|m| m.len()).unwrap_or(0)
    }

    fn keys(&self) -> Vec<String> {
        self.items
            .read()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::area::contract::storagearea_basic_contract;

    #[test]
    fn area_contract() {
        let dir = tempfile::tempdir().unwrap();
        let area = JsonFileArea::open(dir.path().join("store.json")).unwrap();
        storagearea_basic_contract(&area);
    }

    #[test]
    fn missing_file_is_created_on_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let area = JsonFileArea::open(&path).unwrap();
        assert!(!path.exists());

        area.set_item("cart", "[]").unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let area = JsonFileArea::open(&path).unwrap();
            area.set_item("favorites", "[1,2]").unwrap();
            area.set_item("cart", "[]").unwrap();
            area.remove_item("cart").unwrap();
        }

        let area = JsonFileArea::open(&path).unwrap();
        assert_eq!(area.get_item("favorites").as_deref(), Some("[1,2]"));
        assert!(area.get_item("cart").is_none());
        assert_eq!(area.len(), 1);
    }

    #[test]
    fn corrupt_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();

        let err = JsonFileArea::open(&path).err().unwrap();
        assert!(err.to_string().contains("parsing storage file"));
    }

    #[test]
    fn failed_write_leaves_cache_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("store.json");

        let area = JsonFileArea::open(&path).unwrap();
        assert!(area.set_item("cart", "[]").is_err());
        assert!(area.get_item("cart").is_none());
        assert_eq!(area.len(), 0);
    }
}
