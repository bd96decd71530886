use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::errors::ValidationError;
use crate::storage::KeyValueStore;
use crate::stores::fields::{number_or_string, optional_iso_date};

pub const SEARCH_FILTERS_KEY: &str = "searchFilters";

/// What the user typed into the search form. Dates are `None` when the
/// form was submitted with them left blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub location: String,
    #[serde(with = "optional_iso_date", default)]
    pub check_in: Option<Date>,
    #[serde(with = "optional_iso_date", default)]
    pub check_out: Option<Date>,
    #[serde(deserialize_with = "number_or_string")]
    pub guests: u32,
}

impl SearchFilters {
    pub fn new(
        location: impl Into<String>,
        check_in: Date,
        check_out: Date,
        guests: u32,
    ) -> Result<Self, ValidationError> {
        if check_out <= check_in {
            return Err(ValidationError::InvalidDateRange { check_in, check_out });
        }
        if guests == 0 {
            return Err(ValidationError::NoGuests);
        }

        Ok(Self {
            location: location.into(),
            check_in: Some(check_in),
            check_out: Some(check_out),
            guests,
        })
    }
}

/// Single slot handing the search form's input over to the browse view.
#[derive(Debug)]
pub struct SearchFilterStore {
    kv: Arc<KeyValueStore>,
    current: Option<SearchFilters>,
}

impl SearchFilterStore {
    pub fn open(kv: Arc<KeyValueStore>) -> Self {
        let current = kv.load(SEARCH_FILTERS_KEY);
        Self { kv, current }
    }

    /// Replaces whatever was saved before.
    pub fn save(&mut self, filters: SearchFilters) {
        self.kv.save(SEARCH_FILTERS_KEY, &filters);
        self.current = Some(filters);
    }

    pub fn load(&self) -> Option<&SearchFilters> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.kv.remove(SEARCH_FILTERS_KEY);
    }

    /// Returns the saved filters and clears the slot, so they are applied once.
    pub fn take(&mut self) -> Option<SearchFilters> {
        let filters = self.current.take()?;
        self.kv.remove(SEARCH_FILTERS_KEY);
        Some(filters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn filters() -> SearchFilters {
        SearchFilters::new("Almaty", date!(2025 - 06 - 01), date!(2025 - 06 - 04), 2).unwrap()
    }

    #[test]
    fn rejects_bad_input() {
        let same_day = SearchFilters::new("Almaty", date!(2025 - 06 - 01), date!(2025 - 06 - 01), 2);
        assert!(matches!(same_day, Err(ValidationError::InvalidDateRange { .. })));

        let no_guests = SearchFilters::new("Almaty", date!(2025 - 06 - 01), date!(2025 - 06 - 02), 0);
        assert_eq!(no_guests, Err(ValidationError::NoGuests));
    }

    #[test]
    fn save_overwrites_single_slot() {
        let kv = Arc::new(KeyValueStore::in_memory());
        let mut store = SearchFilterStore::open(kv.clone());
        assert!(store.load().is_none());

        store.save(filters());
        let mut other = filters();
        other.location = "Astana".into();
        store.save(other.clone());

        assert_eq!(store.load(), Some(&other));
        assert_eq!(SearchFilterStore::open(kv).load(), Some(&other));
    }

    #[test]
    fn take_is_single_use() {
        let kv = Arc::new(KeyValueStore::in_memory());
        let mut store = SearchFilterStore::open(kv.clone());
        store.save(filters());

        assert_eq!(store.take(), Some(filters()));
        assert_eq!(store.take(), None);
        assert!(kv.area().get_item(SEARCH_FILTERS_KEY).is_none());
    }

    #[test]
    fn clear_removes_the_key() {
        let kv = Arc::new(KeyValueStore::in_memory());
        let mut store = SearchFilterStore::open(kv.clone());
        store.save(filters());
        store.clear();

        assert!(store.load().is_none());
        assert!(SearchFilterStore::open(kv).load().is_none());
    }

    #[test]
    fn reads_form_values_saved_by_the_browser() {
        let kv = Arc::new(KeyValueStore::in_memory());
        kv.area()
            .set_item(
                SEARCH_FILTERS_KEY,
                r#"{"location":"almaty","checkIn":"2025-06-01","checkOut":"2025-06-04","guests":"3"}"#,
            )
            .unwrap();

        let store = SearchFilterStore::open(kv);
        let loaded = store.load().unwrap();
        assert_eq!(loaded.location, "almaty");
        assert_eq!(loaded.guests, 3);
        assert_eq!(loaded.check_out, Some(date!(2025 - 06 - 04)));
    }

    #[test]
    fn keeps_location_when_dates_were_left_blank() {
        let kv = Arc::new(KeyValueStore::in_memory());
        kv.area()
            .set_item(
                SEARCH_FILTERS_KEY,
                r#"{"location":"Astana","checkIn":"","checkOut":"","guests":"1"}"#,
            )
            .unwrap();

        let mut store = SearchFilterStore::open(kv);
        let loaded = store.take().unwrap();
        assert_eq!(loaded.location, "Astana");
        assert_eq!(loaded.check_in, None);
        assert_eq!(loaded.check_out, None);
        assert_eq!(loaded.guests, 1);
    }
}
