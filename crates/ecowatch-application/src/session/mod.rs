//! Session application services.
//!
//! The authenticated-identity lifecycle: login, register, logout and
//! restoration of a persisted session at boot.

mod machine;

pub use machine::{
    LOGIN_FAILED_MESSAGE, REGISTER_FAILED_MESSAGE, SERVICE_UNREACHABLE_MESSAGE,
    SessionStateMachine,
};
