use time::Date;

use crate::catalog::HotelId;
use crate::config::ConfigError;

/// Failures while reading or writing the underlying key/value store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Cannot serialize value for key '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot parse stored value for key '{key}': {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage quota exceeded for key '{key}': {needed} bytes needed, quota is {quota}")]
    QuotaExceeded { key: String, needed: usize, quota: usize },

    #[error("Storage backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Input the caller is expected to surface to the user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Hotel {0} does not exist")]
    UnknownHotel(HotelId),

    #[error("Check-out date ({check_out}) must be after check-in date ({check_in})")]
    InvalidDateRange { check_in: Date, check_out: Date },

    #[error("Please enter a valid email address")]
    InvalidEmail(String),

    #[error("Please enter a valid phone number")]
    InvalidPhone(String),

    #[error("At least one guest is required")]
    NoGuests,

    #[error("Your cart is empty")]
    EmptyCart,
}

/// Problems with the static hotel dataset.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate hotel id {0}")]
    DuplicateId(HotelId),

    #[error("Hotel {id} has a negative price ({price})")]
    NegativePrice { id: HotelId, price: f64 },

    #[error("Hotel {id} has a rating outside 0.0..=5.0 ({rating})")]
    RatingOutOfRange { id: HotelId, rating: f64 },

    #[error("Cannot parse hotel dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot open storage backend: {0}")]
    Storage(#[from] anyhow::Error),
}
