//! Session state models.

use serde::{Deserialize, Serialize};

use crate::auth::User;

/// The persistable subset of a session: identity plus credential token.
///
/// Stored as `{ "user": {...} | null, "token": "..." | null }`. Both fields
/// are set together by [`SessionSnapshot::authenticated`]; a stored snapshot
/// with a user but no token is read back as anonymous, while a token without
/// a user is kept so that restoration can validate it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SnapshotWire")]
pub struct SessionSnapshot {
    user: Option<User>,
    token: Option<String>,
}

#[derive(Deserialize)]
struct SnapshotWire {
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    token: Option<String>,
}

impl From<SnapshotWire> for SessionSnapshot {
    fn from(wire: SnapshotWire) -> Self {
        match wire.token {
            Some(token) if !token.is_empty() => Self {
                user: wire.user,
                token: Some(token),
            },
            _ => Self::anonymous(),
        }
    }
}

impl SessionSnapshot {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: User, token: impl Into<String>) -> Self {
        Self {
            user: Some(user),
            token: Some(token.into()),
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// True iff both identity and token are present.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }
}

/// Session fields that live only in memory and are never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionLocal {
    pub pending: bool,
    pub last_error: Option<String>,
}

/// Lifecycle phase of the authenticated identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
    Error,
}

/// In-memory session state observed by views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub snapshot: SessionSnapshot,
    pub local: SessionLocal,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.snapshot.is_authenticated()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.snapshot.user()
    }

    pub fn current_token(&self) -> Option<&str> {
        self.snapshot.token()
    }

    pub fn is_pending(&self) -> bool {
        self.local.pending
    }

    pub fn last_error(&self) -> Option<&str> {
        self.local.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 1,
            name: "A".to_string(),
            email: "a@b.com".to_string(),
        }
    }

    #[test]
    fn test_persisted_shape() {
        let snapshot = SessionSnapshot::authenticated(user(), "tok1");
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "user": { "id": 1, "name": "A", "email": "a@b.com" },
                "token": "tok1"
            })
        );

        let anonymous = serde_json::to_value(SessionSnapshot::anonymous()).unwrap();
        assert_eq!(anonymous, serde_json::json!({ "user": null, "token": null }));
    }

    #[test]
    fn test_round_trip() {
        let snapshot = SessionSnapshot::authenticated(user(), "tok1");
        let text = serde_json::to_string(&snapshot).unwrap();
        let restored: SessionSnapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(restored, snapshot);
        assert!(restored.is_authenticated());
    }

    #[test]
    fn test_user_without_token_reads_as_anonymous() {
        let restored: SessionSnapshot = serde_json::from_value(serde_json::json!({
            "user": { "id": 1, "name": "A", "email": "a@b.com" },
            "token": null
        }))
        .unwrap();
        assert_eq!(restored, SessionSnapshot::anonymous());
    }

    #[test]
    fn test_token_without_user_is_kept_for_validation() {
        let restored: SessionSnapshot =
            serde_json::from_value(serde_json::json!({ "token": "tok9" })).unwrap();
        assert_eq!(restored.token(), Some("tok9"));
        assert!(!restored.is_authenticated());
    }

    #[test]
    fn test_legacy_fields_are_ignored() {
        // Older builds persisted the transient flags as well.
        let restored: SessionSnapshot = serde_json::from_value(serde_json::json!({
            "user": { "id": 1, "name": "A", "email": "a@b.com" },
            "token": "tok1",
            "loading": true,
            "error": "boom"
        }))
        .unwrap();
        assert!(restored.is_authenticated());
    }
}
