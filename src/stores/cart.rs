use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::catalog::{Hotel, HotelId};
use crate::storage::KeyValueStore;

pub const CART_KEY: &str = "cart";

fn default_quantity() -> u32 {
    1
}

/// A hotel in the cart. Serialized flat: the hotel's own fields plus `addedDate` and `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub hotel: Hotel,
    #[serde(with = "time::serde::rfc3339")]
    pub added_date: OffsetDateTime,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl CartItem {
    pub fn subtotal(&self) -> f64 {
        // Older data may hold a zero quantity; it counts as one.
        self.hotel.price * f64::from(self.quantity.max(1))
    }
}

/// Shopping cart, mirrored to the `cart` key. At most one item per hotel.
#[derive(Debug)]
pub struct CartStore {
    kv: Arc<KeyValueStore>,
    items: Vec<CartItem>,
}

impl CartStore {
    /// Loads the cart from `kv`; a missing or unreadable cart starts empty.
    pub fn open(kv: Arc<KeyValueStore>) -> Self {
        let stored: Vec<CartItem> = kv.load(CART_KEY).unwrap_or_default();
        let stored_len = stored.len();

        let mut seen = HashSet::new();
        let items: Vec<CartItem> = stored
            .into_iter()
            .filter(|item| seen.insert(item.hotel.id))
            .collect();
        if items.len() != stored_len {
            warn!("cart contained duplicate hotels, keeping the first of each");
        }

        Self { kv, items }
    }

    /// Adds `hotel` unless it is already in the cart. Returns whether it was added.
    pub fn add(&mut self, hotel: &Hotel) -> bool {
        self.add_at(hotel, OffsetDateTime::now_utc())
    }

    fn add_at(&mut self, hotel: &Hotel, now: OffsetDateTime) -> bool {
        if self.contains(hotel.id) {
            return false;
        }

        self.items.push(CartItem {
            hotel: hotel.clone(),
            added_date: now,
            quantity: 1,
        });
        debug!("hotel {} added to cart", hotel.id);
        self.persist();
        true
    }

    /// Removes the hotel from the cart. Removing a hotel that is not there is a no-op.
    pub fn remove(&mut self, id: HotelId) {
        self.items.retain(|item| item.hotel.id != id);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Items in the order they were added.
    pub fn list(&self) -> &[CartItem] {
        &self.items
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    pub fn contains(&self, id: HotelId) -> bool {
        self.items.iter().any(|item| item.hotel.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn persist(&self) {
        self.kv.save(CART_KEY, &self.items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::hotel;
    use time::macros::datetime;

    fn store() -> (Arc<KeyValueStore>, CartStore) {
        let kv = Arc::new(KeyValueStore::in_memory());
        let cart = CartStore::open(kv.clone());
        (kv, cart)
    }

    #[test]
    fn add_is_unique_per_hotel() {
        let (_, mut cart) = store();
        let h = hotel(1, "Rixos", "Almaty", 100.0, 4.5);

        assert!(cart.add(&h));
        assert!(!cart.add(&h));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.list()[0].quantity, 1);
    }

    #[test]
    fn total_sums_price_times_quantity() {
        let (_, mut cart) = store();
        assert_eq!(cart.total(), 0.0);

        cart.add(&hotel(1, "A", "Almaty", 100.0, 4.0));
        cart.add(&hotel(2, "B", "Almaty", 50.0, 4.0));
        cart.items[1].quantity = 2;

        assert_eq!(cart.total(), 200.0);
    }

    #[test]
    fn remove_is_idempotent_and_keeps_order() {
        let (_, mut cart) = store();
        for id in 1..=3 {
            cart.add(&hotel(id, "H", "Almaty", 10.0, 4.0));
        }

        cart.remove(HotelId(2));
        cart.remove(HotelId(2));
        cart.remove(HotelId(42));

        let ids: Vec<_> = cart.list().iter().map(|i| i.hotel.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn mutations_write_through() {
        let (kv, mut cart) = store();
        cart.add(&hotel(1, "A", "Almaty", 10.0, 4.0));
        cart.add(&hotel(2, "B", "Almaty", 20.0, 4.0));

        let reloaded = CartStore::open(kv.clone());
        assert_eq!(reloaded.list(), cart.list());

        cart.clear();
        assert!(CartStore::open(kv).is_empty());
    }

    #[test]
    fn persisted_shape_is_flat() {
        let (kv, mut cart) = store();
        cart.add_at(&hotel(7, "Dostyk", "Almaty", 45000.0, 4.5), datetime!(2025-01-02 10:00 UTC));

        let raw: serde_json::Value = kv.load(CART_KEY).unwrap();
        let item = &raw[0];
        assert_eq!(item["id"], 7);
        assert_eq!(item["name"], "Dostyk");
        assert_eq!(item["price"], 45000.0);
        assert_eq!(item["quantity"], 1);
        assert_eq!(item["addedDate"], "2025-01-02T10:00:00Z");
        assert_eq!(item["checkInTime"], "14:00");
    }

    #[test]
    fn loads_browser_data_and_drops_duplicates() {
        let kv = Arc::new(KeyValueStore::in_memory());
        let json = r#"[
            {"id":1,"name":"A","location":"L","city":"Almaty","price":100,"rating":4.5,
             "description":"","amenities":[],"image":"a.jpg","rooms":10,
             "checkInTime":"14:00","checkOutTime":"12:00","addedDate":"2024-05-01T10:00:00.000Z"},
            {"id":1,"name":"A","location":"L","city":"Almaty","price":100,"rating":4.5,
             "addedDate":"2024-05-01T11:00:00.000Z","quantity":3}
        ]"#;
        kv.area().set_item(CART_KEY, json).unwrap();

        let cart = CartStore::open(kv);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.list()[0].quantity, 1);
        assert_eq!(cart.total(), 100.0);
    }
}
