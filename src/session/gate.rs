//! Mock authentication gate.
//!
//! Gates access to the inventory commands behind a login that verifies one
//! credential pair and persists an opaque session marker. There is nothing
//! cryptographic here: the token is a fixed string and the check is a string
//! comparison, standing in for a real identity provider. The verification
//! seam is the [`CredentialVerifier`] trait so a real backend could be
//! dropped in without touching the gate.
//!
//! State machine: Anonymous --login success--> Authenticated --logout or
//! expiry--> Anonymous. A failed login leaves the state untouched.

use std::time::Duration as StdDuration;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{BlesspetsError, Result};
use crate::session::store::SessionStore;

/// Store key holding the opaque session token.
pub const AUTH_TOKEN_KEY: &str = "bless_pets_auth_token";

/// Store key holding the JSON-serialized user.
pub const USER_KEY: &str = "bless_pets_user";

/// Token issued on a successful login. Not cryptographically meaningful.
const SESSION_TOKEN: &str = "mock-jwt-token";

/// Sessions live for a week; there is no refresh mechanism.
const SESSION_TTL_DAYS: i64 = 7;

/// Simulated network latency for the login round-trip.
const LOGIN_LATENCY: StdDuration = StdDuration::from_millis(1000);

// ---------------------------------------------------------------------------
// User and credential verification
// ---------------------------------------------------------------------------

/// Display identity persisted alongside the session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identity-store identifier.
    pub id: String,
    /// Login email.
    pub email: String,
    /// Human-readable name.
    pub name: String,
}

/// Verifies a presented credential pair against an identity store.
pub trait CredentialVerifier: Send + Sync {
    /// Returns the user for a valid pair, `None` otherwise.
    fn verify(&self, email: &str, password: &str) -> Option<User>;
}

/// The single hard-coded admin identity.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    email: String,
    password: String,
    name: String,
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self {
            email: "admin@blesspets.com".to_string(),
            password: "admin123".to_string(),
            name: "Admin User".to_string(),
        }
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, email: &str, password: &str) -> Option<User> {
        if email == self.email && password == self.password {
            Some(User {
                id: "1".to_string(),
                email: email.to_string(),
                name: self.name.clone(),
            })
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// SessionGate
// ---------------------------------------------------------------------------

/// Authentication gate over a [`SessionStore`].
///
/// The store is passed in explicitly; the gate itself holds no session
/// state, so two gates over the same store see the same session (last write
/// wins).
pub struct SessionGate<S> {
    store: S,
    verifier: Box<dyn CredentialVerifier>,
}

impl<S: SessionStore> SessionGate<S> {
    /// Creates a gate with the default hard-coded credentials.
    pub fn new(store: S) -> Self {
        Self::with_verifier(store, Box::new(StaticCredentials::default()))
    }

    /// Creates a gate with a custom credential verifier.
    pub fn with_verifier(store: S, verifier: Box<dyn CredentialVerifier>) -> Self {
        Self { store, verifier }
    }

    /// Verifies the credential pair and persists the session on success.
    ///
    /// Sleeps a fixed second first, standing in for the round-trip a real
    /// identity provider would take. On a match, writes the token and the
    /// JSON-serialized user as two store entries with a 7-day expiry and
    /// returns the user.
    ///
    /// # Errors
    ///
    /// Returns [`BlesspetsError::InvalidCredentials`] on a mismatch; store
    /// failures propagate.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        tokio::time::sleep(LOGIN_LATENCY).await;

        let Some(user) = self.verifier.verify(email, password) else {
            warn!(email, "login rejected");
            return Err(BlesspetsError::InvalidCredentials);
        };

        let ttl = Duration::days(SESSION_TTL_DAYS);
        self.store.set(AUTH_TOKEN_KEY, SESSION_TOKEN, ttl)?;
        self.store.set(USER_KEY, &serde_json::to_string(&user)?, ttl)?;

        info!(email = %user.email, "login succeeded");
        Ok(user)
    }

    /// Clears the persisted session. Safe to call when not logged in.
    ///
    /// # Errors
    ///
    /// Propagates store write failures.
    pub fn logout(&self) -> Result<()> {
        self.store.remove(AUTH_TOKEN_KEY)?;
        self.store.remove(USER_KEY)?;
        debug!("session cleared");
        Ok(())
    }

    /// True when a non-empty, unexpired token is present. No network.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth_token(), Some(token) if !token.is_empty())
    }

    /// The persisted user, or `None` when absent or malformed.
    ///
    /// A malformed entry is treated as absence, not an error.
    pub fn current_user(&self) -> Option<User> {
        let raw = self.store.get(USER_KEY).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(error) => {
                warn!(%error, "stored user entry is malformed");
                None
            }
        }
    }

    /// The raw session token, or `None`.
    pub fn auth_token(&self) -> Option<String> {
        match self.store.get(AUTH_TOKEN_KEY) {
            Ok(token) => token,
            Err(error) => {
                warn!(%error, "session store read failed");
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::session::store::MemoryStore;

    fn gate() -> (Arc<MemoryStore>, SessionGate<Arc<MemoryStore>>) {
        let store = Arc::new(MemoryStore::new());
        let gate = SessionGate::new(Arc::clone(&store));
        (store, gate)
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_with_valid_credentials() {
        let (_, gate) = gate();

        let user = gate.login("admin@blesspets.com", "admin123").await.unwrap();
        assert_eq!(user.id, "1");
        assert_eq!(user.email, "admin@blesspets.com");
        assert_eq!(user.name, "Admin User");

        assert!(gate.is_authenticated());
        assert_eq!(gate.auth_token().as_deref(), Some("mock-jwt-token"));
        assert_eq!(gate.current_user(), Some(user));
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_takes_one_simulated_second() {
        let (_, gate) = gate();

        let before = tokio::time::Instant::now();
        gate.login("admin@blesspets.com", "admin123").await.unwrap();
        assert!(before.elapsed() >= StdDuration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_with_wrong_password_fails() {
        let (_, gate) = gate();

        let err = gate
            .login("admin@blesspets.com", "letmein")
            .await
            .unwrap_err();
        assert!(matches!(err, BlesspetsError::InvalidCredentials));
        assert!(!gate.is_authenticated());
        assert_eq!(gate.current_user(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_with_unknown_email_fails() {
        let (_, gate) = gate();

        let err = gate.login("root@blesspets.com", "admin123").await.unwrap_err();
        assert!(matches!(err, BlesspetsError::InvalidCredentials));
        assert!(!gate.is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_clears_session() {
        let (_, gate) = gate();

        gate.login("admin@blesspets.com", "admin123").await.unwrap();
        gate.logout().unwrap();

        assert!(!gate.is_authenticated());
        assert_eq!(gate.current_user(), None);
        assert_eq!(gate.auth_token(), None);
    }

    #[test]
    fn test_logout_without_session_is_a_noop() {
        let (_, gate) = gate();
        gate.logout().unwrap();
        gate.logout().unwrap();
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_expired_token_reads_as_anonymous() {
        let (store, gate) = gate();
        store
            .set(AUTH_TOKEN_KEY, SESSION_TOKEN, Duration::seconds(-1))
            .unwrap();
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_empty_token_is_not_authenticated() {
        let (store, gate) = gate();
        store.set(AUTH_TOKEN_KEY, "", Duration::days(7)).unwrap();
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_malformed_user_entry_reads_as_none() {
        let (store, gate) = gate();
        store.set(USER_KEY, "{not json", Duration::days(7)).unwrap();
        assert_eq!(gate.current_user(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_gates_share_one_store() {
        let store = Arc::new(MemoryStore::new());
        let first = SessionGate::new(Arc::clone(&store));
        let second = SessionGate::new(Arc::clone(&store));

        first.login("admin@blesspets.com", "admin123").await.unwrap();
        assert!(second.is_authenticated());

        second.logout().unwrap();
        assert!(!first.is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_verifier_is_honored() {
        struct DenyAll;
        impl CredentialVerifier for DenyAll {
            fn verify(&self, _: &str, _: &str) -> Option<User> {
                None
            }
        }

        let store = MemoryStore::new();
        let gate = SessionGate::with_verifier(store, Box::new(DenyAll));
        let err = gate.login("admin@blesspets.com", "admin123").await.unwrap_err();
        assert!(matches!(err, BlesspetsError::InvalidCredentials));
    }
}
