//! Authentication domain module.
//!
//! # Module Structure
//!
//! - `model`: user identity, auth responses and credential validation
//! - `service`: the remote auth collaborator trait
//! - `token`: the shared bearer token cell read by HTTP collaborators

mod model;
mod service;
mod token;

pub use model::{AuthResponse, Credentials, Registration, User};
pub use service::AuthService;
pub use token::BearerToken;
