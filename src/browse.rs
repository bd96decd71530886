//! Filtering and sorting over the hotel catalog.
//!
//! Everything here is pure: functions take the current list of hotels and
//! return a narrowed or reordered list, never touching storage. A browse
//! request is applied in a fixed order: location, max price, min rating,
//! then sort. See [`BrowseQuery`].

use std::convert::Infallible;
use std::fmt::Display;
use std::str::FromStr;

use crate::catalog::{Catalog, Hotel};

/// Sort orders offered by the browse page.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Best rated first.
    #[default]
    RatingDesc,
    PriceAsc,
    PriceDesc,
    NameAsc,
    /// Keep the input order.
    Unsorted,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::RatingDesc => "rating-desc",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::NameAsc => "name-asc",
            SortKey::Unsorted => "none",
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts both the canonical names and the browse form's option values
/// (`rating`, `price-low`, `price-high`, `name`). Anything else means
/// [`SortKey::Unsorted`].
impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "rating" | "rating-desc" => SortKey::RatingDesc,
            "price-low" | "price-asc" => SortKey::PriceAsc,
            "price-high" | "price-desc" => SortKey::PriceDesc,
            "name" | "name-asc" => SortKey::NameAsc,
            _ => SortKey::Unsorted,
        })
    }
}

/// Keeps hotels in exactly `city`. `None` or an empty string keeps everything.
pub fn filter_by_location<'a>(mut hotels: Vec<&'a Hotel>, city: Option<&str>) -> Vec<&'a Hotel> {
    if let Some(city) = city.filter(|c| !c.is_empty()) {
        hotels.retain(|h| h.city == city);
    }
    hotels
}

pub fn filter_by_max_price(mut hotels: Vec<&Hotel>, max: f64) -> Vec<&Hotel> {
    hotels.retain(|h| h.price <= max);
    hotels
}

pub fn filter_by_min_rating(mut hotels: Vec<&Hotel>, min: f64) -> Vec<&Hotel> {
    hotels.retain(|h| h.rating >= min);
    hotels
}

/// Stable sort; equal elements keep their relative order.
pub fn sort_hotels(mut hotels: Vec<&Hotel>, key: SortKey) -> Vec<&Hotel> {
    match key {
        SortKey::RatingDesc => hotels.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::PriceAsc => hotels.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceDesc => hotels.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::NameAsc => hotels.sort_by_cached_key(|h| h.name.to_lowercase()),
        SortKey::Unsorted => {}
    }
    hotels
}

/// One browse request. Unset filters are skipped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BrowseQuery {
    pub location: Option<String>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    pub sort: SortKey,
}

impl BrowseQuery {
    pub fn apply<'a>(&self, hotels: &'a [Hotel]) -> Vec<&'a Hotel> {
        let mut result = filter_by_location(hotels.iter().collect(), self.location.as_deref());
        if let Some(max) = self.max_price {
            result = filter_by_max_price(result, max);
        }
        if let Some(min) = self.min_rating {
            result = filter_by_min_rating(result, min);
        }
        sort_hotels(result, self.sort)
    }
}

/// Looks up a free-text location among the catalog's cities. Matching is
/// exact after trimming and case-folding; the canonical city name is returned.
pub fn match_city<'a>(catalog: &'a Catalog, input: &str) -> Option<&'a str> {
    let wanted = input.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    catalog
        .cities()
        .into_iter()
        .find(|city| city.to_lowercase() == wanted)
}

/// The first `n` hotels of the catalog.
pub fn featured(catalog: &Catalog, n: usize) -> &[Hotel] {
    let hotels = catalog.hotels();
    &hotels[..n.min(hotels.len())]
}
