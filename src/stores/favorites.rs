use std::sync::Arc;

use log::debug;

use crate::catalog::{Catalog, Hotel, HotelId};
use crate::storage::KeyValueStore;

pub const FAVORITES_KEY: &str = "favorites";

/// Favorited hotel ids, mirrored to the `favorites` key as a JSON array.
#[derive(Debug)]
pub struct FavoritesStore {
    kv: Arc<KeyValueStore>,
    ids: Vec<HotelId>,
}

impl FavoritesStore {
    pub fn open(kv: Arc<KeyValueStore>) -> Self {
        let mut ids: Vec<HotelId> = kv.load(FAVORITES_KEY).unwrap_or_default();

        let mut seen = std::collections::HashSet::new();
        ids.retain(|id| seen.insert(*id));

        Self { kv, ids }
    }

    /// Flips membership of `id` and returns whether it is now a favorite.
    pub fn toggle(&mut self, id: HotelId) -> bool {
        let now_favorite = match self.ids.iter().position(|f| *f == id) {
            Some(index) => {
                self.ids.remove(index);
                false
            }
            None => {
                self.ids.push(id);
                true
            }
        };

        debug!("hotel {id} favorite: {now_favorite}");
        self.kv.save(FAVORITES_KEY, &self.ids);
        now_favorite
    }

    pub fn is_favorite(&self, id: HotelId) -> bool {
        self.ids.contains(&id)
    }

    pub fn list(&self) -> &[HotelId] {
        &self.ids
    }

    /// Favorited hotels in catalog order. Ids no longer in the catalog are skipped.
    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Hotel> {
        catalog
            .hotels()
            .iter()
            .filter(|h| self.is_favorite(h.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::catalog;

    fn store() -> (Arc<KeyValueStore>, FavoritesStore) {
        let kv = Arc::new(KeyValueStore::in_memory());
        let favorites = FavoritesStore::open(kv.clone());
        (kv, favorites)
    }

    #[test]
    fn toggle_twice_restores_state() {
        let (_, mut favorites) = store();
        for id in catalog().hotels().iter().map(|h| h.id) {
            let before = favorites.is_favorite(id);
            assert_eq!(favorites.toggle(id), !before);
            assert_eq!(favorites.toggle(id), before);
            assert_eq!(favorites.is_favorite(id), before);
        }
        assert!(favorites.list().is_empty());
    }

    #[test]
    fn resolve_uses_catalog_order() {
        let (_, mut favorites) = store();
        let catalog = catalog();

        favorites.toggle(HotelId(9));
        favorites.toggle(HotelId(2));
        favorites.toggle(HotelId(404));

        let names: Vec<_> = favorites.resolve(&catalog).iter().map(|h| h.id.0).collect();
        assert_eq!(names, vec![2, 9]);
    }

    #[test]
    fn persists_as_array_of_ids() {
        let (kv, mut favorites) = store();
        favorites.toggle(HotelId(3));
        favorites.toggle(HotelId(1));

        assert_eq!(kv.area().get_item(FAVORITES_KEY).as_deref(), Some("[3,1]"));

        let reloaded = FavoritesStore::open(kv);
        assert!(reloaded.is_favorite(HotelId(3)));
        assert!(reloaded.is_favorite(HotelId(1)));
    }

    #[test]
    fn duplicate_ids_collapse_on_load() {
        let kv = Arc::new(KeyValueStore::in_memory());
        kv.area().set_item(FAVORITES_KEY, "[5,5,6]").unwrap();

        let mut favorites = FavoritesStore::open(kv);
        assert_eq!(favorites.list(), &[HotelId(5), HotelId(6)]);
        assert!(!favorites.toggle(HotelId(5)));
        assert!(!favorites.is_favorite(HotelId(5)));
    }
}
