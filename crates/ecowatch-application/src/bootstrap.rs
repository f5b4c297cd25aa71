//! Composition root.

use crate::cleanup::StorageCleanup;
use crate::favorites::FavoritesStore;
use crate::query::QueryPipeline;
use crate::session::SessionStateMachine;
use ecowatch_core::auth::{AuthService, BearerToken};
use ecowatch_core::config::AppConfig;
use ecowatch_core::error::Result;
use ecowatch_core::record::RecordService;
use ecowatch_core::session::{CredentialStore, SessionStore};
use ecowatch_infrastructure::{ApiClient, HttpAuthService, HttpRecordService};
use std::sync::Arc;
use std::time::Duration;

/// External collaborators the application is wired from.
#[derive(Clone)]
pub struct Collaborators {
    pub auth: Arc<dyn AuthService>,
    pub records: Arc<dyn RecordService>,
    pub session_store: Arc<dyn SessionStore>,
    pub credential_store: Arc<dyn CredentialStore>,
    /// Cell shared between the session machine and the HTTP clients
    pub token: BearerToken,
}

impl Collaborators {
    /// REST collaborators for `config.api`, sharing one bearer token cell.
    pub fn http(
        config: &AppConfig,
        session_store: Arc<dyn SessionStore>,
        credential_store: Arc<dyn CredentialStore>,
    ) -> Result<Self> {
        let token = BearerToken::new();
        let client = ApiClient::new(&config.api, token.clone())?;
        Ok(Self {
            auth: Arc::new(HttpAuthService::new(client.clone())),
            records: Arc::new(HttpRecordService::new(client)),
            session_store,
            credential_store,
            token,
        })
    }
}

/// A started application: restored session, empty favorites, and a factory
/// for search pipelines.
pub struct AppBootstrap {
    session: Arc<SessionStateMachine>,
    records: Arc<dyn RecordService>,
    favorites: FavoritesStore,
    debounce: Duration,
}

impl AppBootstrap {
    /// Boot sequence:
    /// 1. Purge legacy long-lived tokens
    /// 2. Restore the tab-scoped session, if any
    pub async fn start(config: &AppConfig, collaborators: Collaborators) -> Self {
        StorageCleanup::new(collaborators.credential_store.clone(), &config.storage)
            .purge_legacy_tokens()
            .await;

        let session = Arc::new(SessionStateMachine::new(
            collaborators.auth,
            collaborators.session_store,
            collaborators.token,
        ));
        session.initialize().await;
        tracing::info!(
            "[Bootstrap] Started (authenticated: {})",
            session.is_authenticated()
        );

        Self {
            session,
            records: collaborators.records,
            favorites: FavoritesStore::new(),
            debounce: config.search.debounce(),
        }
    }

    pub fn session(&self) -> &Arc<SessionStateMachine> {
        &self.session
    }

    pub fn records(&self) -> &Arc<dyn RecordService> {
        &self.records
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn favorites_mut(&mut self) -> &mut FavoritesStore {
        &mut self.favorites
    }

    /// Spawns a fresh pipeline bound to the record service.
    pub fn spawn_query_pipeline(&self) -> QueryPipeline {
        QueryPipeline::spawn(self.records.clone(), self.debounce)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ecowatch_core::auth::{AuthResponse, Credentials, Registration, User};
    use ecowatch_core::error::EcowatchError;
    use ecowatch_core::record::{Record, RecordId, RecordPayload};
    use ecowatch_core::session::SessionSnapshot;
    use ecowatch_infrastructure::{InMemoryCredentialStore, InMemorySessionStore};

    struct StaticAuth;

    #[async_trait]
    impl AuthService for StaticAuth {
        async fn register(&self, _registration: &Registration) -> Result<AuthResponse> {
            Err(EcowatchError::auth("closed"))
        }

        async fn login(&self, _credentials: &Credentials) -> Result<AuthResponse> {
            Err(EcowatchError::auth("closed"))
        }

        async fn logout(&self) -> Result<()> {
            Ok(())
        }

        async fn current_user(&self) -> Result<User> {
            Ok(User {
                id: 3,
                name: "C".to_string(),
                email: "c@d.org".to_string(),
            })
        }
    }

    struct OneRecord;

    #[async_trait]
    impl RecordService for OneRecord {
        async fn list_all(&self) -> Result<Vec<Record>> {
            Ok(vec![Record {
                id: Some(1),
                title: "Oil spill".to_string(),
                ..Default::default()
            }])
        }

        async fn get_by_id(&self, id: RecordId) -> Result<Record> {
            Err(EcowatchError::not_found("Record", id.to_string()))
        }

        async fn create(&self, _payload: &RecordPayload) -> Result<Record> {
            Err(EcowatchError::internal("read-only"))
        }

        async fn update(&self, _id: RecordId, _payload: &RecordPayload) -> Result<Record> {
            Err(EcowatchError::internal("read-only"))
        }

        async fn delete(&self, _id: RecordId) -> Result<()> {
            Err(EcowatchError::internal("read-only"))
        }
    }

    fn collaborators(
        session_store: Arc<InMemorySessionStore>,
        credential_store: Arc<InMemoryCredentialStore>,
    ) -> Collaborators {
        Collaborators {
            auth: Arc::new(StaticAuth),
            records: Arc::new(OneRecord),
            session_store,
            credential_store,
            token: BearerToken::new(),
        }
    }

    #[tokio::test]
    async fn test_start_purges_then_restores() {
        let session_store = Arc::new(InMemorySessionStore::new());
        let credential_store = Arc::new(InMemoryCredentialStore::new());
        credential_store
            .set("auth_token", "leftover".to_string())
            .await
            .unwrap();
        let user = User {
            id: 3,
            name: "C".to_string(),
            email: "c@d.org".to_string(),
        };
        session_store
            .write(&SessionSnapshot::authenticated(user.clone(), "tok3"))
            .await
            .unwrap();

        let app = AppBootstrap::start(
            &AppConfig::default(),
            collaborators(session_store, credential_store.clone()),
        )
        .await;

        assert!(credential_store.get("auth_token").await.unwrap().is_none());
        assert!(app.session().is_authenticated());
        assert_eq!(app.session().current_user(), Some(user));
        assert_eq!(app.favorites().count(), 0);
    }

    #[tokio::test]
    async fn test_start_anonymous_and_spawn_pipeline() {
        let mut app = AppBootstrap::start(
            &AppConfig::default(),
            collaborators(
                Arc::new(InMemorySessionStore::new()),
                Arc::new(InMemoryCredentialStore::new()),
            ),
        )
        .await;
        assert!(!app.session().is_authenticated());

        let mut pipeline = app.spawn_query_pipeline();
        let listing = pipeline.next().await.unwrap();
        app.favorites_mut().add(&listing[0]);

        assert!(app.favorites().is_member(1));
    }

    #[tokio::test]
    async fn test_http_collaborators_share_token() {
        let collaborators = Collaborators::http(
            &AppConfig::default(),
            Arc::new(InMemorySessionStore::new()),
            Arc::new(InMemoryCredentialStore::new()),
        )
        .unwrap();

        collaborators.token.set(Some("tok".to_string())).await;
        assert_eq!(collaborators.token.get().await.as_deref(), Some("tok"));
    }
}
