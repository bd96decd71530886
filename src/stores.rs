//! Domain stores.
//!
//! Each store owns exactly one key in the [`KeyValueStore`](crate::storage::KeyValueStore)
//! and keeps an in-memory mirror of it. Stores are opened once per session
//! (`open` reads the key; missing or unreadable data starts empty) and write
//! the whole mirror back after every mutation.
//!
//! | store                 | key             | JSON shape                     |
//! |-----------------------|-----------------|--------------------------------|
//! | [`CartStore`]         | `cart`          | array of hotel + `addedDate`, `quantity` |
//! | [`FavoritesStore`]    | `favorites`     | array of hotel ids             |
//! | [`BookingStore`]      | `bookings`      | array of bookings              |
//! | [`SearchFilterStore`] | `searchFilters` | single object, removed when consumed |

pub mod bookings;
pub mod cart;
pub mod favorites;
pub mod search;

mod fields;

pub use bookings::{nights_between, Booking, BookingDraft, BookingId, BookingStatus, BookingStore};
pub use cart::{CartItem, CartStore};
pub use favorites::FavoritesStore;
pub use search::{SearchFilterStore, SearchFilters};
