//! Rendering helpers for record listings.

use crate::favorites::FavoritesStore;
use ecowatch_core::record::Record;

/// A record as shown in a list, with its favorite marker.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub record: Record,
    pub is_favorite: bool,
}

/// Pairs every record with its current favorites membership.
pub fn annotate(records: &[Record], favorites: &FavoritesStore) -> Vec<ListItem> {
    records
        .iter()
        .map(|record| ListItem {
            is_favorite: record.id.is_some_and(|id| favorites.is_member(id)),
            record: record.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotate_marks_members() {
        let spill = Record {
            id: Some(7),
            title: "Oil spill".to_string(),
            ..Default::default()
        };
        let smog = Record {
            id: Some(8),
            title: "Smog".to_string(),
            ..Default::default()
        };
        let draft = Record::default();

        let mut favorites = FavoritesStore::new();
        favorites.add(&spill);

        let items = annotate(&[spill, smog, draft], &favorites);
        let marks: Vec<bool> = items.iter().map(|item| item.is_favorite).collect();
        assert_eq!(marks, vec![true, false, false]);
        assert_eq!(items[0].record.title, "Oil spill");
    }
}
