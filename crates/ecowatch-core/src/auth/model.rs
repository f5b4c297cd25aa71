//! Identity and credential models.

use serde::{Deserialize, Serialize};

use crate::error::{EcowatchError, Result};

/// An authenticated user's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Body returned by the login and register endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub token: String,
}

impl AuthResponse {
    /// Splits the response into the identity and its credential token.
    pub fn into_parts(self) -> (User, String) {
        (
            User {
                id: self.id,
                name: self.name,
                email: self.email,
            },
            self.token,
        )
    }
}

/// Email/password pair sent to the login endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks the fields locally before anything is sent over the wire.
    pub fn validate(&self) -> Result<()> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(EcowatchError::validation("password", "Password is required"));
        }
        Ok(())
    }
}

/// Name/email/password triple sent to the register endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(EcowatchError::validation("name", "Name is required"));
        }
        Credentials::new(self.email.clone(), self.password.clone()).validate()
    }
}

fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(EcowatchError::validation("email", "Email is required"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(EcowatchError::validation(
            "email",
            "Email address is not valid",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_parts() {
        let response = AuthResponse {
            id: 1,
            name: "A".to_string(),
            email: "a@b.com".to_string(),
            token: "tok1".to_string(),
        };
        let (user, token) = response.into_parts();
        assert_eq!(user.id, 1);
        assert_eq!(user.email, "a@b.com");
        assert_eq!(token, "tok1");
    }

    #[test]
    fn test_credentials_validation() {
        assert!(Credentials::new("a@b.com", "secret").validate().is_ok());

        let err = Credentials::new("", "secret").validate().unwrap_err();
        assert_eq!(err.user_message(), "Email is required");

        let err = Credentials::new("not-an-email", "secret").validate().unwrap_err();
        assert!(err.is_validation());

        let err = Credentials::new("a@b.com", "").validate().unwrap_err();
        assert!(matches!(
            err,
            EcowatchError::Validation { field: "password", .. }
        ));
    }

    #[test]
    fn test_registration_requires_name() {
        let err = Registration::new("  ", "a@b.com", "secret")
            .validate()
            .unwrap_err();
        assert!(matches!(err, EcowatchError::Validation { field: "name", .. }));
        assert!(Registration::new("A", "a@b.com", "secret").validate().is_ok());
    }
}
