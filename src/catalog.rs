//! The static hotel dataset.
//!
//! Hotels are supplied once by the caller (usually from a bundled JSON file)
//! and never change afterwards. The catalog is shared between the stores and
//! the browse functions behind an `Arc`.

use std::collections::HashSet;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::errors::CatalogError;

/// Identifier of a hotel in the dataset.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HotelId(pub u64);

impl From<u64> for HotelId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for HotelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A hotel as it appears in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: HotelId,
    pub name: String,
    /// Human readable address, e.g. "Dostyk Ave 52, Almaty".
    pub location: String,
    pub city: String,
    /// Price per night.
    pub price: f64,
    pub rating: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rooms: u32,
    #[serde(default)]
    pub check_in_time: String,
    #[serde(default)]
    pub check_out_time: String,
}

/// Read-only, ordered collection of hotels.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    hotels: Vec<Hotel>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids and out of range prices or ratings.
    pub fn new(hotels: Vec<Hotel>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(hotels.len());
        for hotel in &hotels {
            if !seen.insert(hotel.id) {
                return Err(CatalogError::DuplicateId(hotel.id));
            }
            if !(hotel.price >= 0.0) {
                return Err(CatalogError::NegativePrice { id: hotel.id, price: hotel.price });
            }
            if !(0.0..=5.0).contains(&hotel.rating) {
                return Err(CatalogError::RatingOutOfRange { id: hotel.id, rating: hotel.rating });
            }
        }

        Ok(Self { hotels })
    }

    /// Parses a JSON array of hotels.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let hotels: Vec<Hotel> = serde_json::from_str(json)?;
        Self::new(hotels)
    }

    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    pub fn find(&self, id: HotelId) -> Option<&Hotel> {
        self.hotels.iter().find(|h| h.id == id)
    }

    /// Distinct cities in dataset order.
    pub fn cities(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.hotels
            .iter()
            .map(|h| h.city.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.hotels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn find_and_cities() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.find(HotelId(3)).unwrap().name, "Ritz-Carlton Astana");
        assert!(catalog.find(HotelId(99)).is_none());
        assert_eq!(catalog.cities(), vec!["Almaty", "Astana", "Shymkent"]);
    }

    #[test]
    fn rejects_invalid_hotels() {
        let dup = Catalog::new(vec![hotel(1, "A", "X", 1.0, 1.0), hotel(1, "B", "X", 1.0, 1.0)]);
        assert!(matches!(dup, Err(CatalogError::DuplicateId(HotelId(1)))));

        let price = Catalog::new(vec![hotel(1, "A", "X", -1.0, 1.0)]);
        assert!(matches!(price, Err(CatalogError::NegativePrice { .. })));

        let rating = Catalog::new(vec![hotel(1, "A", "X", 1.0, 5.5)]);
        assert!(matches!(rating, Err(CatalogError::RatingOutOfRange { .. })));
    }

    #[test]
    fn parses_dataset_json() {
        let json = r#"[
            {
                "id": 1,
                "name": "Rixos Almaty",
                "location": "Seifullin Ave 506, Almaty",
                "city": "Almaty",
                "price": 85000,
                "rating": 4.9,
                "description": "Luxury hotel",
                "amenities": ["Spa", "Pool"],
                "image": "images/rixos.jpg",
                "rooms": 230,
                "checkInTime": "14:00",
                "checkOutTime": "12:00"
            }
        ]"#;

        let catalog = Catalog::from_json(json).unwrap();
        let hotel = &catalog.hotels()[0];
        assert_eq!(hotel.id, HotelId(1));
        assert_eq!(hotel.price, 85000.0);
        assert_eq!(hotel.amenities, vec!["Spa", "Pool"]);
        assert_eq!(hotel.check_in_time, "14:00");

        assert!(matches!(Catalog::from_json("{"), Err(CatalogError::Parse(_))));
    }
}
