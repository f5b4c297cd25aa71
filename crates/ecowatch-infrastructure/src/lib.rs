//! Infrastructure layer for Ecowatch.
//!
//! Concrete collaborators behind the `ecowatch-core` traits: file and
//! in-memory storage for sessions and long-lived keys, the TOML config
//! service, and `reqwest` clients for the REST API.

pub mod config_service;
pub mod credential_store;
pub mod favorites_file;
pub mod http;
pub mod paths;
pub mod session_store;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::credential_store::{FileCredentialStore, InMemoryCredentialStore};
pub use crate::favorites_file::FavoritesFile;
pub use crate::http::{ApiClient, HttpAuthService, HttpRecordService};
pub use crate::paths::EcowatchPaths;
pub use crate::session_store::{FileSessionStore, InMemorySessionStore};
