//! Application session: one set of stores over one storage backend.
//!
//! A [`Session`] is opened once from an [`AppConfig`]. Opening creates the
//! storage backend, wraps it in a [`KeyValueStore`] and loads every domain
//! store, so callers get explicit store instances instead of global state.
//! The session also hosts the flows that touch more than one store:
//! searching, browsing with saved filters, booking and cart checkout.

use std::sync::Arc;

use log::{debug, info};
use time::Date;

use crate::browse::{featured, match_city, BrowseQuery};
use crate::catalog::{Catalog, Hotel, HotelId};
use crate::config::{validate_config, AppConfig, GuestContact, StorageBackend};
use crate::errors::{SessionError, ValidationError};
use crate::storage::{InMemoryArea, JsonFileArea, KeyValueStore, StorageArea, Subscription};
use crate::stores::{
    Booking, BookingDraft, BookingStore, CartStore, FavoritesStore, SearchFilterStore,
    SearchFilters,
};
use crate::validate::{is_valid_email, is_valid_phone};

/// Result of browsing with the filters handed over by the search form.
#[derive(Debug)]
pub struct BrowseView<'a> {
    pub hotels: Vec<&'a Hotel>,
    /// Filters that were consumed, if any were waiting.
    pub filters: Option<SearchFilters>,
    /// Catalog city the saved location resolved to.
    pub city: Option<&'a str>,
}

/// Booking form input for a single hotel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingForm {
    pub check_in: Date,
    pub check_out: Date,
    pub guests: u32,
    pub contact: GuestContact,
}

pub struct Session {
    config: AppConfig,
    catalog: Arc<Catalog>,
    kv: Arc<KeyValueStore>,
    pub cart: CartStore,
    pub favorites: FavoritesStore,
    pub bookings: BookingStore,
    pub filters: SearchFilterStore,
}

impl Session {
    /// Opens the configured backend and loads all stores.
    pub fn open(config: AppConfig, catalog: Arc<Catalog>) -> Result<Self, SessionError> {
        validate_config(&config)?;

        let area: Arc<dyn StorageArea> = match &config.backend {
            StorageBackend::InMemory => Arc::new(InMemoryArea::new()),
            StorageBackend::JsonFile(path) => Arc::new(JsonFileArea::open(path)?),
            #[cfg(feature = "sqlite_store")]
            StorageBackend::Sqlite(path) => {
                Arc::new(crate::storage::SqliteArea::open(&path.to_string_lossy())?)
            }
        };
        let kv = Arc::new(KeyValueStore::new(area).with_quota(config.quota_bytes));

        Ok(Self::with_store(config, catalog, kv))
    }

    /// Builds a session on top of an existing store.
    pub fn with_store(config: AppConfig, catalog: Arc<Catalog>, kv: Arc<KeyValueStore>) -> Self {
        let session = Self {
            cart: CartStore::open(kv.clone()),
            favorites: FavoritesStore::open(kv.clone()),
            bookings: BookingStore::open(kv.clone()),
            filters: SearchFilterStore::open(kv.clone()),
            config,
            catalog,
            kv,
        };

        debug!(
            "session opened: {} cart items, {} favorites, {} bookings",
            session.cart.len(),
            session.favorites.list().len(),
            session.bookings.list().len()
        );
        session
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Change notifications for every key of this session.
    pub fn subscribe(&self) -> Subscription {
        self.kv.subscribe()
    }

    /// Hotels for the home page.
    pub fn featured(&self) -> &[Hotel] {
        featured(&self.catalog, self.config.featured_count)
    }

    pub fn hotel(&self, id: HotelId) -> Result<&Hotel, ValidationError> {
        self.catalog.find(id).ok_or(ValidationError::UnknownHotel(id))
    }

    /// Saves the search form's input for the browse view.
    pub fn search(
        &mut self,
        location: &str,
        check_in: Date,
        check_out: Date,
        guests: u32,
    ) -> Result<(), ValidationError> {
        let filters = SearchFilters::new(location, check_in, check_out, guests)?;
        self.filters.save(filters);
        Ok(())
    }

    /// Hotels matching `query`.
    pub fn browse(&self, query: &BrowseQuery) -> Vec<&Hotel> {
        query.apply(self.catalog.hotels())
    }

    /// Consumes any saved search filters and browses with them. A location that
    /// does not name a catalog city is ignored. The filters are gone afterwards.
    pub fn browse_saved(&mut self) -> BrowseView<'_> {
        let filters = self.filters.take();
        let catalog: &Catalog = &self.catalog;

        let city = filters.as_ref().and_then(|f| match_city(catalog, &f.location));
        let query = BrowseQuery {
            location: city.map(str::to_string),
            sort: self.config.default_sort,
            ..Default::default()
        };

        BrowseView {
            hotels: query.apply(catalog.hotels()),
            filters,
            city,
        }
    }

    /// Favorited hotels in catalog order.
    pub fn favorite_hotels(&self) -> Vec<&Hotel> {
        self.favorites.resolve(&self.catalog)
    }

    /// Adds a hotel to the cart. `Ok(false)` means it was already there.
    pub fn add_to_cart(&mut self, id: HotelId) -> Result<bool, ValidationError> {
        let hotel = self.catalog.find(id).ok_or(ValidationError::UnknownHotel(id))?;
        Ok(self.cart.add(hotel))
    }

    /// Validates the booking form and stores a confirmed booking.
    pub fn book(&mut self, id: HotelId, form: BookingForm) -> Result<Booking, ValidationError> {
        let hotel = self.hotel(id)?.clone();

        if !is_valid_email(&form.contact.email) {
            return Err(ValidationError::InvalidEmail(form.contact.email));
        }
        if !is_valid_phone(&form.contact.phone) {
            return Err(ValidationError::InvalidPhone(form.contact.phone));
        }

        let draft = BookingDraft::new(hotel, form.check_in, form.check_out, form.guests, form.contact)?;
        Ok(self.bookings.add(draft))
    }

    /// Books every hotel in the cart for one night starting tomorrow, then
    /// empties the cart.
    pub fn checkout(&mut self, today: Date) -> Result<Vec<Booking>, ValidationError> {
        if self.cart.is_empty() {
            return Err(ValidationError::EmptyCart);
        }

        let (check_in, check_out) = today
            .next_day()
            .and_then(|check_in| Some((check_in, check_in.next_day()?)))
            .ok_or(ValidationError::InvalidDateRange { check_in: today, check_out: today })?;

        let drafts = self
            .cart
            .list()
            .iter()
            .map(|item| {
                BookingDraft::new(
                    item.hotel.clone(),
                    check_in,
                    check_out,
                    self.config.checkout_guests,
                    self.config.checkout_contact.clone(),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let bookings: Vec<Booking> = drafts.into_iter().map(|d| self.bookings.add(d)).collect();
        self.cart.clear();

        info!("checkout created {} booking(s)", bookings.len());
        Ok(bookings)
    }
}
