use std::fmt::Display;
use std::sync::Arc;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::catalog::Hotel;
use crate::config::GuestContact;
use crate::errors::ValidationError;
use crate::storage::KeyValueStore;
use crate::stores::fields::{iso_date, number_or_string};

pub const BOOKINGS_KEY: &str = "bookings";

/// Booking identifier: milliseconds since the Unix epoch at creation time,
/// bumped when needed so ids stay strictly increasing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub u64);

impl Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

/// Booking data supplied by the caller. The store adds id, date and status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    /// Snapshot of the hotel at booking time.
    pub hotel: Hotel,
    #[serde(with = "iso_date")]
    pub check_in: Date,
    #[serde(with = "iso_date")]
    pub check_out: Date,
    pub nights: u32,
    #[serde(deserialize_with = "number_or_string")]
    pub guests: u32,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub total_price: f64,
}

impl BookingDraft {
    /// Derives nights and total price from the stay. Contact details are taken as given.
    pub fn new(
        hotel: Hotel,
        check_in: Date,
        check_out: Date,
        guests: u32,
        contact: GuestContact,
    ) -> Result<Self, ValidationError> {
        let nights = nights_between(check_in, check_out)?;
        if guests == 0 {
            return Err(ValidationError::NoGuests);
        }

        let total_price = hotel.price * f64::from(nights);
        Ok(Self {
            hotel,
            check_in,
            check_out,
            nights,
            guests,
            guest_name: contact.name,
            guest_email: contact.email,
            guest_phone: contact.phone,
            total_price,
        })
    }
}

/// Number of nights between two dates. Check-out has to be after check-in.
pub fn nights_between(check_in: Date, check_out: Date) -> Result<u32, ValidationError> {
    let days = (check_out - check_in).whole_days();
    if days < 1 {
        return Err(ValidationError::InvalidDateRange { check_in, check_out });
    }
    u32::try_from(days).map_err(|_| ValidationError::InvalidDateRange { check_in, check_out })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    #[serde(flatten)]
    pub details: BookingDraft,
    #[serde(with = "time::serde::rfc3339")]
    pub booking_date: OffsetDateTime,
    pub status: BookingStatus,
}

#[derive(Debug, Default)]
struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    fn next(&mut self, now: OffsetDateTime) -> BookingId {
        let millis = u64::try_from(now.unix_timestamp_nanos() / 1_000_000).unwrap_or(0);
        let id = match self.last.checked_add(1) {
            Some(after_last) => millis.max(after_last),
            None => {
                warn!("booking id {} cannot be followed, restarting from the clock", self.last);
                millis
            }
        };
        self.last = id;
        BookingId(id)
    }
}

/// Bookings in creation order, mirrored to the `bookings` key.
#[derive(Debug)]
pub struct BookingStore {
    kv: Arc<KeyValueStore>,
    bookings: Vec<Booking>,
    ids: IdGenerator,
}

impl BookingStore {
    pub fn open(kv: Arc<KeyValueStore>) -> Self {
        let bookings: Vec<Booking> = kv.load(BOOKINGS_KEY).unwrap_or_default();
        let ids = IdGenerator {
            last: bookings.iter().map(|b| b.id.0).max().unwrap_or(0),
        };

        Self { kv, bookings, ids }
    }

    /// Stores a confirmed booking and returns it.
    pub fn add(&mut self, draft: BookingDraft) -> Booking {
        self.add_at(draft, OffsetDateTime::now_utc())
    }

    fn add_at(&mut self, draft: BookingDraft, now: OffsetDateTime) -> Booking {
        let booking = Booking {
            id: self.ids.next(now),
            details: draft,
            booking_date: now,
            status: BookingStatus::Confirmed,
        };

        info!("booking {} confirmed for hotel {}", booking.id, booking.details.hotel.id);
        self.bookings.push(booking.clone());
        self.persist();
        booking
    }

    /// Marks the booking cancelled. Returns `false` if there is no such booking.
    pub fn cancel(&mut self, id: BookingId) -> bool {
        let Some(booking) = self.bookings.iter_mut().find(|b| b.id == id) else {
            return false;
        };

        booking.status = BookingStatus::Cancelled;
        debug!("booking {id} cancelled");
        self.persist();
        true
    }

    /// Removes the booking entirely. Unknown ids are ignored.
    pub fn delete(&mut self, id: BookingId) {
        self.bookings.retain(|b| b.id != id);
        self.persist();
    }

    pub fn get(&self, id: BookingId) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    pub fn list(&self) -> &[Booking] {
        &self.bookings
    }

    fn persist(&self) {
        self.kv.save(BOOKINGS_KEY, &self.bookings);
    }
}
