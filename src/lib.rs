//! Hotel browsing and booking core.
//!
//! Keeps a cart, favorites, bookings and single-use search filters in a
//! local key/value store, and filters/sorts a static hotel catalog for
//! display. Rendering is left to the caller; this crate only returns data.
//!
//! Start with [`Session::open`](session::Session::open).

pub mod browse;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod session;
pub mod storage;
pub mod stores;
pub mod validate;

pub use catalog::{Catalog, Hotel, HotelId};
pub use config::{AppConfig, StorageBackend};
pub use errors::{CatalogError, SessionError, StoreError, ValidationError};
pub use session::Session;
