//! User-curated favorites.

use ecowatch_core::favorites::FavoriteEntry;
use ecowatch_core::record::{Record, RecordId};
use std::collections::HashSet;

/// Insertion-ordered set of favorite records.
///
/// Membership is independent of whatever listing is currently displayed:
/// a record stays a favorite after it drops out of the search results.
#[derive(Debug, Clone, Default)]
pub struct FavoritesStore {
    entries: Vec<FavoriteEntry>,
    ids: HashSet<RecordId>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from previously saved entries, dropping duplicate ids.
    pub fn from_entries(entries: impl IntoIterator<Item = FavoriteEntry>) -> Self {
        let mut store = Self::new();
        for entry in entries {
            store.insert(entry);
        }
        store
    }

    /// Adds `record`. No-op when already present or when the record has no id.
    pub fn add(&mut self, record: &Record) {
        match FavoriteEntry::from_record(record) {
            Some(entry) => {
                if self.insert(entry) {
                    tracing::debug!("[Favorites] Added record {:?}", record.id);
                }
            }
            None => tracing::debug!("[Favorites] Ignoring unsaved record '{}'", record.title),
        }
    }

    /// Removes `id`. No-op when absent.
    pub fn remove(&mut self, id: RecordId) {
        if self.ids.remove(&id) {
            self.entries.retain(|entry| entry.id != id);
            tracing::debug!("[Favorites] Removed record {}", id);
        }
    }

    /// Flips membership and returns the new state.
    pub fn toggle(&mut self, record: &Record) -> bool {
        match record.id {
            Some(id) if self.is_member(id) => {
                self.remove(id);
                false
            }
            Some(_) => {
                self.add(record);
                true
            }
            None => false,
        }
    }

    pub fn is_member(&self, id: RecordId) -> bool {
        self.ids.contains(&id)
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn list_ids(&self) -> Vec<RecordId> {
        self.entries.iter().map(|entry| entry.id).collect()
    }

    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.ids.clear();
    }

    fn insert(&mut self, entry: FavoriteEntry) -> bool {
        if !self.ids.insert(entry.id) {
            return false;
        }
        self.entries.push(entry);
        true
    }
}
