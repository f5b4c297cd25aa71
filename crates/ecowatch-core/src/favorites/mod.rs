//! Favorites domain module.

mod model;

pub use model::FavoriteEntry;
