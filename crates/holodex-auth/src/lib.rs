//! Holodex Authentication Layer
//!
//! Gates the directory behind a login. Credentials are checked against the
//! configured mock account and a successful login issues a session token.
//!
//! # Session Management
//!
//! - Tokens have the form `mock-jwt-<unix millis>`
//! - Tokens are zeroized from memory on logout and on replacement
//! - A background task silently re-issues the token at a fixed interval
//!   (default: 5 minutes) while the session stays logged in

use chrono::{DateTime, Utc};
use holodex_core::AuthConfig;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use zeroize::Zeroizing;

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password did not match
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Not authenticated
    #[error("not authenticated")]
    NotAuthenticated,
}

/// Result type for authentication operations
pub type Result<T> = std::result::Result<T, AuthError>;

/// Shortest refresh interval the background task will use.
const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// The account a session accepts.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Accept exactly this username and password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Credentials from the `[auth]` config section.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }

    fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password.as_str() == password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::from_config(&AuthConfig::default())
    }
}

/// Authentication state
#[derive(Default)]
struct AuthState {
    /// Logged-in username
    username: Option<String>,
    /// Session token (zeroized on logout)
    token: Option<Zeroizing<String>>,
    /// When the current token was issued
    issued_at: Option<DateTime<Utc>>,
    /// Tokens issued by refresh since login
    refreshes: u64,
    /// Failed attempt count
    failed_attempts: u32,
}

impl fmt::Debug for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthState")
            .field("username", &self.username)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("issued_at", &self.issued_at)
            .field("refreshes", &self.refreshes)
            .field("failed_attempts", &self.failed_attempts)
            .finish()
    }
}

impl AuthState {
    fn issue_token(&mut self) {
        let now = Utc::now();
        self.token = Some(Zeroizing::new(format!(
            "mock-jwt-{}",
            now.timestamp_millis()
        )));
        self.issued_at = Some(now);
    }
}

/// A login session shared between the shell and the refresh task.
#[derive(Debug, Default)]
pub struct AuthSession {
    credentials: Credentials,
    state: RwLock<AuthState>,
}

impl AuthSession {
    /// Create a logged-out session accepting `credentials`
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            state: RwLock::new(AuthState::default()),
        }
    }

    /// Check the credentials and issue a token on success.
    pub fn login(&self, username: &str, password: &str) -> Result<()> {
        let mut state = self.write();
        if !self.credentials.matches(username, password) {
            state.failed_attempts += 1;
            tracing::warn!(
                "Login failed for {} ({} failed attempts)",
                username,
                state.failed_attempts
            );
            return Err(AuthError::InvalidCredentials);
        }

        state.username = Some(username.to_string());
        state.failed_attempts = 0;
        state.refreshes = 0;
        state.issue_token();
        tracing::info!("Logged in as {}", username);
        Ok(())
    }

    /// End the session
    pub fn logout(&self) {
        let mut state = self.write();
        state.username = None;
        state.token = None;
        state.issued_at = None;
        tracing::info!("Logged out");
    }

    /// Check if a user is logged in
    pub fn is_authorized(&self) -> bool {
        self.read().token.is_some()
    }

    /// Current session token
    pub fn token(&self) -> Option<Zeroizing<String>> {
        self.read().token.clone()
    }

    /// Logged-in username
    pub fn username(&self) -> Option<String> {
        self.read().username.clone()
    }

    /// When the current token was issued
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.read().issued_at
    }

    /// Get the number of failed attempts
    pub fn failed_attempts(&self) -> u32 {
        self.read().failed_attempts
    }

    /// Tokens re-issued since the last login
    pub fn refresh_count(&self) -> u64 {
        self.read().refreshes
    }

    /// Re-issue the token of a logged-in session.
    pub fn refresh(&self) -> Result<()> {
        let mut state = self.write();
        if state.token.is_none() {
            return Err(AuthError::NotAuthenticated);
        }
        state.issue_token();
        state.refreshes += 1;
        tracing::debug!("Session token refreshed");
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, AuthState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, AuthState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Refresh `session` every `interval` while it is logged in.
///
/// Ticks that find the session logged out are skipped. Abort the returned
/// handle to stop refreshing.
pub fn spawn_refresh_task(session: Arc<AuthSession>, interval: Duration) -> JoinHandle<()> {
    let interval = interval.max(MIN_REFRESH_INTERVAL);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if session.is_authorized() {
                if let Err(e) = session.refresh() {
                    tracing::warn!("Token refresh failed: {}", e);
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> AuthSession {
        AuthSession::new(Credentials::new("user", "pass"))
    }

    #[test]
    fn test_auth_initial_state() {
        let auth = session();
        assert!(!auth.is_authorized());
        assert!(auth.token().is_none());
        assert_eq!(auth.failed_attempts(), 0);
    }

    #[test]
    fn test_login_issues_mock_token() {
        let auth = session();
        auth.login("user", "pass").expect("valid credentials");

        assert!(auth.is_authorized());
        assert_eq!(auth.username().as_deref(), Some("user"));
        let token = auth.token().expect("token issued");
        let millis = token
            .strip_prefix("mock-jwt-")
            .expect("mock prefix")
            .parse::<i64>()
            .expect("numeric timestamp");
        assert_eq!(
            millis,
            auth.issued_at().expect("issue time").timestamp_millis()
        );
    }

    #[test]
    fn test_login_rejects_wrong_credentials() {
        let auth = session();
        assert!(matches!(
            auth.login("user", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("admin", "pass"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(!auth.is_authorized());
        assert_eq!(auth.failed_attempts(), 2);

        auth.login("user", "pass").expect("valid credentials");
        assert_eq!(auth.failed_attempts(), 0);
    }

    #[test]
    fn test_logout_clears_token() {
        let auth = session();
        auth.login("user", "pass").expect("valid credentials");
        auth.logout();
        assert!(!auth.is_authorized());
        assert!(auth.token().is_none());
        assert!(auth.username().is_none());
    }

    #[test]
    fn test_refresh_replaces_token() {
        let auth = session();
        auth.login("user", "pass").expect("valid credentials");
        let before = auth.token().expect("token issued");

        std::thread::sleep(Duration::from_millis(5));
        auth.refresh().expect("logged in");

        let after = auth.token().expect("token issued");
        assert_ne!(*before, *after);
        assert_eq!(auth.refresh_count(), 1);
    }

    #[test]
    fn test_refresh_requires_login() {
        let auth = session();
        assert!(matches!(auth.refresh(), Err(AuthError::NotAuthenticated)));
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let auth = AuthSession::new(Credentials::new("user", "hunter2"));
        auth.login("user", "hunter2").expect("valid credentials");

        let credentials = format!("{:?}", Credentials::new("user", "hunter2"));
        assert!(credentials.contains("user"));
        assert!(credentials.contains("<redacted>"));
        assert!(!credentials.contains("hunter2"));

        let token = auth.token().expect("token issued");
        let session = format!("{auth:?}");
        assert!(!session.contains("hunter2"));
        assert!(!session.contains(token.as_str()));
    }

    #[test]
    fn test_credentials_from_config() {
        let config = AuthConfig {
            username: "han".to_string(),
            password: "falcon".to_string(),
            ..AuthConfig::default()
        };
        let auth = AuthSession::new(Credentials::from_config(&config));
        assert!(auth.login("user", "pass").is_err());
        assert!(auth.login("han", "falcon").is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_task_ticks_while_logged_in() {
        let auth = Arc::new(session());
        auth.login("user", "pass").expect("valid credentials");

        let handle = spawn_refresh_task(Arc::clone(&auth), Duration::from_secs(300));
        tokio::time::sleep(Duration::from_secs(950)).await;
        assert_eq!(auth.refresh_count(), 3);

        auth.logout();
        tokio::time::sleep(Duration::from_secs(600)).await;
        assert!(!auth.is_authorized());

        handle.abort();
    }
}
