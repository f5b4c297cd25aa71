//! HTTP implementation of [`AuthService`].

use async_trait::async_trait;
use ecowatch_core::auth::{AuthResponse, AuthService, Credentials, Registration, User};
use ecowatch_core::error::Result;
use reqwest::Method;

use super::client::ApiClient;

/// Auth endpoints under `{base}/auth`.
#[derive(Debug, Clone)]
pub struct HttpAuthService {
    client: ApiClient,
}

impl HttpAuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn register(&self, registration: &Registration) -> Result<AuthResponse> {
        let request = self
            .client
            .request(Method::POST, "auth/register")
            .await
            .json(registration);
        self.client.execute_json(request).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        let request = self
            .client
            .request(Method::POST, "auth/login")
            .await
            .json(credentials);
        self.client.execute_json(request).await
    }

    async fn logout(&self) -> Result<()> {
        let request = self.client.request(Method::POST, "auth/logout").await;
        self.client.execute(request).await?;
        Ok(())
    }

    async fn current_user(&self) -> Result<User> {
        let request = self.client.request(Method::GET, "auth/me").await;
        self.client.execute_json(request).await
    }
}
