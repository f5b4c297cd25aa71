//! Session domain module.
//!
//! The persisted part of a session ([`SessionSnapshot`]) is kept apart from
//! the purely local part ([`SessionLocal`]); the two meet only inside the
//! in-memory [`SessionState`].

mod model;
mod store;

pub use model::{SessionLocal, SessionPhase, SessionSnapshot, SessionState};
pub use store::{CredentialStore, SessionStore};
