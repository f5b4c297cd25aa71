//! Shared HTTP plumbing: base URL, bearer token, status mapping.

use ecowatch_core::auth::BearerToken;
use ecowatch_core::config::ApiConfig;
use ecowatch_core::error::{EcowatchError, Result};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Error body returned by the API: `{ "message": "..." }`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Thin wrapper around `reqwest::Client` bound to one API.
///
/// Every request carries `Authorization: Bearer <token>` when the shared
/// [`BearerToken`] holds one.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: BearerToken,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, token: BearerToken) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| EcowatchError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.token.get().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and maps non-success statuses to [`EcowatchError`].
    pub async fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let path = response.url().path().to_string();
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);
        Err(status_error(status, message, &path))
    }

    pub async fn execute_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.execute(builder).await?;
        Ok(response.json::<T>().await?)
    }
}

pub(crate) fn status_error(status: StatusCode, message: Option<String>, path: &str) -> EcowatchError {
    let message = message.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Unexpected response")
            .to_string()
    });
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => EcowatchError::Auth(message),
        StatusCode::NOT_FOUND => EcowatchError::not_found("Resource", path),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            EcowatchError::validation("request", message)
        }
        _ => EcowatchError::Network(format!("{} ({})", message, status.as_u16())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ApiClient {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: Some(5),
        };
        ApiClient::new(&config, BearerToken::new()).unwrap()
    }

    #[test]
    fn test_url_joining() {
        let client = client("http://localhost:3000/api/");
        assert_eq!(client.base_url(), "http://localhost:3000/api");
        assert_eq!(client.url("/pollution/7"), "http://localhost:3000/api/pollution/7");
        assert_eq!(client.url("auth/me"), "http://localhost:3000/api/auth/me");
    }

    #[tokio::test]
    async fn test_bearer_header_follows_token() {
        let token = BearerToken::new();
        let config = ApiConfig::default();
        let client = ApiClient::new(&config, token.clone()).unwrap();

        let request = client.request(Method::GET, "auth/me").await.build().unwrap();
        assert!(request.headers().get("authorization").is_none());

        token.set(Some("tok1".to_string())).await;
        let request = client.request(Method::GET, "auth/me").await.build().unwrap();
        assert_eq!(request.headers()["authorization"], "Bearer tok1");
    }

    #[test]
    fn test_status_mapping() {
        let err = status_error(StatusCode::UNAUTHORIZED, Some("Token invalide".to_string()), "/api/auth/me");
        assert_eq!(err, EcowatchError::Auth("Token invalide".to_string()));

        let err = status_error(StatusCode::NOT_FOUND, None, "/api/pollution/9");
        assert!(err.is_not_found());

        let err = status_error(StatusCode::BAD_REQUEST, Some("Email déjà utilisé".to_string()), "/");
        assert_eq!(err.user_message(), "Email déjà utilisé");

        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, None, "/");
        assert!(err.is_network());
        assert!(err.to_string().contains("500"));
    }
}
