//! Auth service trait definition.

use async_trait::async_trait;

use crate::auth::{AuthResponse, Credentials, Registration, User};
use crate::error::Result;

/// Remote authentication endpoints.
///
/// Implementations attach the current bearer token (see
/// [`BearerToken`](crate::auth::BearerToken)) to `logout` and
/// `current_user`; the session state machine keeps that token up to date.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account. The backend logs the new user in immediately.
    async fn register(&self, registration: &Registration) -> Result<AuthResponse>;

    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse>;

    async fn logout(&self) -> Result<()>;

    /// "Who am I" for the current bearer token.
    async fn current_user(&self) -> Result<User>;
}
