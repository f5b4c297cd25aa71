//! Favorite entry model.

use serde::{Deserialize, Serialize};

use crate::record::{Record, RecordId};

/// Lightweight copy of a favorited record, enough to display it even when
/// the record is no longer part of the active listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub id: RecordId,
    pub title: String,
}

impl FavoriteEntry {
    /// Returns `None` for records that were never saved (no id yet).
    pub fn from_record(record: &Record) -> Option<Self> {
        record.id.map(|id| Self {
            id,
            title: record.title.clone(),
        })
    }
}
