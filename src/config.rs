//! Application configuration.
//!
//! `AppConfig` decides where a [`Session`](crate::session::Session) keeps its
//! data and a handful of defaults used by the browse and checkout flows.
//! It provides defaults via [`Default`] and a fluent [`AppConfig::builder()`]
//! that validates on `build()`.
//!
//! # Examples
//!
//! ```rust
//! use stayhub::config::{AppConfig, StorageBackend};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = AppConfig::builder()
//!     .backend(StorageBackend::JsonFile("stayhub.json".into()))
//!     .featured_count(3)
//!     .build()?;
//! assert_eq!(cfg.featured_count, 3);
//! # Ok(()) }
//! ```
//!
//! # Fields (summary)
//! - `backend`: where the key/value data lives (default: in memory).
//! - `quota_bytes`: maximum bytes the store may hold, `None` for unlimited
//!   (default: 5 MiB, the usual browser localStorage limit).
//! - `featured_count`: number of hotels on the home page (default: 6).
//! - `default_sort`: sort order of the browse view (default: rating, best first).
//! - `checkout_guests`: guest count used for bookings created by checkout (default: 2).
//! - `checkout_contact`: contact details used for bookings created by checkout.

use std::fmt;
use std::path::PathBuf;

use crate::browse::SortKey;
use crate::validate::{is_valid_email, is_valid_phone};

const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Storage backend used by a session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// Nothing survives the session. Useful for tests and private browsing.
    #[default]
    InMemory,
    /// All keys in a single JSON file.
    JsonFile(PathBuf),
    /// SQLite database file.
    #[cfg(feature = "sqlite_store")]
    Sqlite(PathBuf),
}

/// Contact details put on bookings that are created without a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Default for GuestContact {
    fn default() -> Self {
        Self {
            name: "Guest User".to_string(),
            email: "guest@example.com".to_string(),
            phone: "+7 (123) 456-7890".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: StorageBackend,
    pub quota_bytes: Option<usize>,
    pub featured_count: usize,
    pub default_sort: SortKey,
    pub checkout_guests: u32,
    pub checkout_contact: GuestContact,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::InMemory,
            quota_bytes: Some(DEFAULT_QUOTA_BYTES),
            featured_count: 6,
            default_sort: SortKey::RatingDesc,
            checkout_guests: 2,
            checkout_contact: GuestContact::default(),
        }
    }
}

impl AppConfig {
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

/// Builder for [`AppConfig`].
#[derive(Debug, Clone, Default)]
pub struct AppConfigBuilder {
    inner: AppConfig,
}

impl AppConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut AppConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn backend(self, backend: StorageBackend) -> Self { self.map(|c| c.backend = backend) }
    pub fn quota_bytes(self, quota: Option<usize>) -> Self { self.map(|c| c.quota_bytes = quota) }
    pub fn featured_count(self, n: usize) -> Self { self.map(|c| c.featured_count = n) }
    pub fn default_sort(self, key: SortKey) -> Self { self.map(|c| c.default_sort = key) }
    pub fn checkout_guests(self, n: u32) -> Self { self.map(|c| c.checkout_guests = n) }
    pub fn checkout_contact(self, contact: GuestContact) -> Self { self.map(|c| c.checkout_contact = contact) }

    /// Apply multiple changes in one go.
    pub fn with(self, f: impl FnOnce(&mut AppConfig)) -> Self { self.map(f) }

    /// Validate and build the final config.
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        validate_config(&self.inner)?;
        Ok(self.inner)
    }
}

// ---------- Validation ----------

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ZeroQuota,
    ZeroFeatured,
    ZeroCheckoutGuests,
    InvalidCheckoutEmail(String),
    InvalidCheckoutPhone(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroQuota =>
                write!(f, "quota_bytes must be at least 1 (use None for unlimited)"),
            ConfigError::ZeroFeatured =>
                write!(f, "featured_count must be at least 1"),
            ConfigError::ZeroCheckoutGuests =>
                write!(f, "checkout_guests must be at least 1"),
            ConfigError::InvalidCheckoutEmail(e) =>
                write!(f, "checkout contact email '{e}' is not valid"),
            ConfigError::InvalidCheckoutPhone(p) =>
                write!(f, "checkout contact phone '{p}' is not valid"),
        }
    }
}
impl std::error::Error for ConfigError {}

pub(crate) fn validate_config(c: &AppConfig) -> Result<(), ConfigError> {
    if c.quota_bytes == Some(0) {
        return Err(ConfigError::ZeroQuota);
    }
    if c.featured_count == 0 {
        return Err(ConfigError::ZeroFeatured);
    }
    if c.checkout_guests == 0 {
        return Err(ConfigError::ZeroCheckoutGuests);
    }
    if !is_valid_email(&c.checkout_contact.email) {
        return Err(ConfigError::InvalidCheckoutEmail(c.checkout_contact.email.clone()));
    }
    if !is_valid_phone(&c.checkout_contact.phone) {
        return Err(ConfigError::InvalidCheckoutPhone(c.checkout_contact.phone.clone()));
    }
    Ok(())
}
