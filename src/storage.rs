//! Local key/value persistence.
//!
//! This module mirrors browser **localStorage**: string keys, string values,
//! synchronous access, no transactions. Everything above it (cart,
//! favorites, bookings, search filters) talks to a [`KeyValueStore`], which
//! adds JSON (de)serialization, an optional byte quota and change
//! notifications on top of a [`StorageArea`] backend.
//!
//! # Available backends
//!
//! - [`InMemoryArea`] — nothing is persisted. Default, and handy in tests.
//! - [`JsonFileArea`] — all keys in one JSON file.
//! - [`SqliteArea`] — SQLite database (feature `sqlite_store`, on by default).
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use stayhub::storage::{JsonFileArea, KeyValueStore};
//!
//! let area = JsonFileArea::open("stayhub.json").unwrap();
//! let store = KeyValueStore::new(Arc::new(area));
//!
//! store.save("favorites", &vec![1, 4, 7]);
//! let favorites: Vec<u64> = store.load("favorites").unwrap_or_default();
//! ```

/// Storage area trait, defining the key/value storage interface.
pub mod area;
/// Change notifications.
pub mod event;
/// In-memory storage area.
pub mod in_memory;
/// JSON-file storage area.
pub mod json_file;
/// JSON adapter over a storage area.
pub mod kv;
/// SQLite-backed storage area.
#[cfg(feature = "sqlite_store")]
pub mod sqlite_store;

pub use area::StorageArea;
pub use event::{StorageEvent, Subscription};
pub use in_memory::InMemoryArea;
pub use json_file::JsonFileArea;
pub use kv::KeyValueStore;
#[cfg(feature = "sqlite_store")]
pub use sqlite_store::SqliteArea;
