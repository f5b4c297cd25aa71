//! Domain layer for Ecowatch.
//!
//! Models, the error taxonomy, configuration and the traits through which
//! the application layer reaches its collaborators (auth API, record API,
//! session and credential storage).

pub mod auth;
pub mod config;
pub mod error;
pub mod favorites;
pub mod record;
pub mod session;

// Re-export common error type
pub use error::{EcowatchError, Result};
