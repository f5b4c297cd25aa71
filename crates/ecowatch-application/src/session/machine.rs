use ecowatch_core::auth::{AuthResponse, AuthService, BearerToken, Credentials, Registration, User};
use ecowatch_core::error::EcowatchError;
use ecowatch_core::session::{SessionLocal, SessionPhase, SessionSnapshot, SessionState, SessionStore};
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

/// Shown for any rejected login, whichever field was wrong.
pub const LOGIN_FAILED_MESSAGE: &str = "Incorrect email or password";
/// Shown for a rejected registration when the server gave no reason.
pub const REGISTER_FAILED_MESSAGE: &str = "Registration failed";
pub const SERVICE_UNREACHABLE_MESSAGE: &str = "Unable to reach the authentication service";

/// Owns the authenticated identity and its persisted snapshot.
///
/// `SessionStateMachine` is responsible for:
/// - Moving between `Anonymous`, `Authenticating`, `Authenticated` and `Error`
/// - Persisting the snapshot on success and clearing it on failure or logout
/// - Restoring (and re-validating) a persisted session in [`initialize`](Self::initialize)
/// - Keeping the shared [`BearerToken`] in step with the current token
///
/// Remote and storage failures never escape as `Err`; they end up in
/// [`SessionState::last_error`] or in the log. Views observe the state through
/// [`subscribe`](Self::subscribe).
///
/// Session-mutating operations run one at a time: a second `login`,
/// `register`, `logout` or `initialize` waits for the first to settle.
pub struct SessionStateMachine {
    auth: Arc<dyn AuthService>,
    store: Arc<dyn SessionStore>,
    token: BearerToken,
    state: watch::Sender<SessionState>,
    /// Single-flight guard for session mutations
    mutation: Mutex<()>,
}

#[derive(Clone, Copy)]
enum Attempt {
    Login,
    Register,
}

impl SessionStateMachine {
    /// Creates an anonymous session.
    ///
    /// # Arguments
    ///
    /// * `auth` - Remote auth endpoints
    /// * `store` - Tab-scoped snapshot storage
    /// * `token` - Bearer token cell shared with the HTTP collaborators
    pub fn new(auth: Arc<dyn AuthService>, store: Arc<dyn SessionStore>, token: BearerToken) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            auth,
            store,
            token,
            state,
            mutation: Mutex::new(()),
        }
    }

    // ============================================================================
    // Derived queries
    // ============================================================================

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.borrow().phase
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().current_user().cloned()
    }

    pub fn current_token(&self) -> Option<String> {
        self.state.borrow().current_token().map(str::to_string)
    }

    pub fn is_pending(&self) -> bool {
        self.state.borrow().is_pending()
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.borrow().last_error().map(str::to_string)
    }

    // ============================================================================
    // Intents
    // ============================================================================

    /// Logs in. On settle the session is either `Authenticated` (snapshot
    /// persisted) or `Error` (snapshot cleared, message in `last_error`).
    pub async fn login(&self, email: &str, password: &str) {
        let credentials = Credentials::new(email.trim(), password);
        let _guard = self.mutation.lock().await;

        if let Err(e) = credentials.validate() {
            self.fail(e.user_message()).await;
            return;
        }

        self.begin();
        match self.auth.login(&credentials).await {
            Ok(response) => self.establish_from(response).await,
            Err(e) => {
                tracing::warn!("[Session] Login rejected: {}", e);
                self.fail(failure_message(Attempt::Login, &e)).await;
            }
        }
    }

    /// Registers and logs in; same outcomes as [`login`](Self::login).
    pub async fn register(&self, name: &str, email: &str, password: &str) {
        let registration = Registration::new(name.trim(), email.trim(), password);
        let _guard = self.mutation.lock().await;

        if let Err(e) = registration.validate() {
            self.fail(e.user_message()).await;
            return;
        }

        self.begin();
        match self.auth.register(&registration).await {
            Ok(response) => self.establish_from(response).await,
            Err(e) => {
                tracing::warn!("[Session] Registration rejected: {}", e);
                self.fail(failure_message(Attempt::Register, &e)).await;
            }
        }
    }

    /// Logs out. Whatever the remote answers, the session ends `Anonymous`
    /// with no persisted snapshot.
    pub async fn logout(&self) {
        let _guard = self.mutation.lock().await;

        self.state.send_modify(|state| state.local.pending = true);
        if let Err(e) = self.auth.logout().await {
            tracing::warn!("[Session] Remote logout failed, clearing locally: {}", e);
        }

        self.reset().await;
        tracing::info!("[Session] Logged out");
    }

    /// Restores the persisted session, if any.
    ///
    /// Without a stored token this resolves immediately. A stored token is
    /// validated with a "who am I" call; if that fails the session is treated
    /// as never having existed: `Anonymous`, snapshot cleared, no error shown.
    pub async fn initialize(&self) {
        let _guard = self.mutation.lock().await;

        let stored = match self.store.read().await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("[Session] Discarding unreadable session snapshot: {}", e);
                self.reset().await;
                return;
            }
        };

        let Some(token) = stored.as_ref().and_then(|s| s.token()).map(str::to_string) else {
            tracing::debug!("[Session] No stored session to restore");
            return;
        };

        self.token.set(Some(token.clone())).await;
        self.begin();
        match self.auth.current_user().await {
            Ok(user) => {
                tracing::info!("[Session] Restored session for user {}", user.id);
                self.establish(user, token).await;
            }
            Err(e) => {
                tracing::info!("[Session] Stored token rejected, starting anonymous: {}", e);
                self.reset().await;
            }
        }
    }

    /// Re-fetches the identity of an authenticated session.
    ///
    /// Failures are logged and leave the session untouched.
    pub async fn refresh_current_user(&self) {
        let _guard = self.mutation.lock().await;
        let Some(token) = self.current_token() else {
            return;
        };
        if !self.is_authenticated() {
            return;
        }

        match self.auth.current_user().await {
            Ok(user) => {
                let snapshot = SessionSnapshot::authenticated(user, token);
                self.state.send_modify(|state| state.snapshot = snapshot.clone());
                self.persist(&snapshot).await;
            }
            Err(e) => tracing::warn!("[Session] Could not refresh current user: {}", e),
        }
    }

    /// Records an error message without changing the phase.
    pub fn report_error(&self, message: impl Into<String>) {
        let message = message.into();
        self.state
            .send_modify(|state| state.local.last_error = Some(message));
    }

    // ============================================================================
    // Transitions
    // ============================================================================

    fn begin(&self) {
        self.state.send_modify(|state| {
            state.phase = SessionPhase::Authenticating;
            state.local = SessionLocal {
                pending: true,
                last_error: None,
            };
        });
    }

    async fn establish_from(&self, response: AuthResponse) {
        let (user, token) = response.into_parts();
        tracing::info!("[Session] Authenticated as user {}", user.id);
        self.establish(user, token).await;
    }

    async fn establish(&self, user: User, token: String) {
        let snapshot = SessionSnapshot::authenticated(user, token.clone());
        self.token.set(Some(token)).await;
        self.state.send_replace(SessionState {
            phase: SessionPhase::Authenticated,
            snapshot: snapshot.clone(),
            local: SessionLocal::default(),
        });
        self.persist(&snapshot).await;
    }

    async fn fail(&self, message: String) {
        self.token.clear().await;
        self.state.send_replace(SessionState {
            phase: SessionPhase::Error,
            snapshot: SessionSnapshot::anonymous(),
            local: SessionLocal {
                pending: false,
                last_error: Some(message),
            },
        });
        self.forget().await;
    }

    async fn reset(&self) {
        self.token.clear().await;
        self.state.send_replace(SessionState::default());
        self.forget().await;
    }

    async fn persist(&self, snapshot: &SessionSnapshot) {
        if let Err(e) = self.store.write(snapshot).await {
            tracing::warn!("[Session] Failed to persist session snapshot: {}", e);
        }
    }

    async fn forget(&self) {
        if let Err(e) = self.store.clear().await {
            tracing::warn!("[Session] Failed to clear session snapshot: {}", e);
        }
    }
}

/// Message shown for a failed remote attempt.
///
/// Login failures never say which credential was wrong.
fn failure_message(attempt: Attempt, err: &EcowatchError) -> String {
    match (attempt, err) {
        (_, EcowatchError::Network(_)) => SERVICE_UNREACHABLE_MESSAGE.to_string(),
        (Attempt::Login, _) => LOGIN_FAILED_MESSAGE.to_string(),
        (Attempt::Register, EcowatchError::Auth(message))
        | (Attempt::Register, EcowatchError::Validation { message, .. })
            if !message.trim().is_empty() =>
        {
            message.clone()
        }
        (Attempt::Register, _) => REGISTER_FAILED_MESSAGE.to_string(),
    }
}

#[cfg(test)]
#[path = "machine_test.rs"]
mod tests;
