//! Application layer for Ecowatch.
//!
//! Owned, injectable state containers built on the `ecowatch-core` traits:
//! the session state machine, the favorites store, and the debounced query
//! pipeline, plus the boot sequence that wires them together.

pub mod bootstrap;
pub mod cleanup;
pub mod favorites;
pub mod list_view;
pub mod query;
pub mod session;

pub use bootstrap::{AppBootstrap, Collaborators};
pub use cleanup::StorageCleanup;
pub use favorites::FavoritesStore;
pub use list_view::{ListItem, annotate};
pub use query::{QueryPipeline, QueryState};
pub use session::SessionStateMachine;
