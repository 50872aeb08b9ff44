//! Client-side session state.
//!
//! The durable session lives in server-issued HTTP-only cookies the client
//! cannot read; this store only tracks what the persistence service last
//! told us. It starts unauthenticated-and-loading and settles once the
//! first `check_auth` resolves.

use std::sync::{Arc, Mutex};

use crate::api::{ApiError, AuthApi};
use crate::model::Account;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub authenticated: bool,
    pub user: Option<Account>,
    pub loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            authenticated: false,
            user: None,
            loading: true,
        }
    }
}

/// Holds authentication status and drives the auth endpoints. Clones share
/// the same state.
#[derive(Debug, Clone)]
pub struct SessionStore<A: AuthApi> {
    api: A,
    state: Arc<Mutex<Session>>,
}

impl<A: AuthApi> SessionStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(Session::default())),
        }
    }

    pub fn current(&self) -> Session {
        self.state.lock().unwrap().clone()
    }

    /// Create an account, then immediately log in with the same credentials.
    /// Registration alone does not establish a session; if the follow-up
    /// login fails the state stays unauthenticated even though the account
    /// now exists.
    pub async fn register(&self, email: &str, password: &str) -> Result<Account, ApiError> {
        self.set_loading();
        if let Err(err) = self.api.register(email, password).await {
            self.clear();
            return Err(err);
        }
        match self.api.login(email, password).await {
            Ok(account) => {
                self.set_authenticated(account.clone());
                Ok(account)
            }
            Err(err) => {
                self.clear();
                Err(err)
            }
        }
    }

    /// Establish a session. The service sets the cookies; we only record
    /// the returned account.
    pub async fn login(&self, email: &str, password: &str) -> Result<Account, ApiError> {
        self.set_loading();
        match self.api.login(email, password).await {
            Ok(account) => {
                self.set_authenticated(account.clone());
                Ok(account)
            }
            Err(err) => {
                self.clear();
                Err(err)
            }
        }
    }

    /// Best-effort server logout; local state is cleared unconditionally.
    pub async fn logout(&self) {
        if let Err(err) = self.api.logout().await {
            tracing::warn!("logout request failed: {err}");
        }
        self.clear();
    }

    /// Renew the session from the refresh cookie. On failure the state is
    /// cleared and the error re-raised so callers can redirect.
    pub async fn check_auth(&self) -> Result<Account, ApiError> {
        match self.api.refresh().await {
            Ok(account) => {
                self.set_authenticated(account.clone());
                Ok(account)
            }
            Err(err) => {
                self.clear();
                Err(err)
            }
        }
    }

    /// Drop the authenticated state without a server round trip. Used when
    /// a 401 on a todos endpoint reveals the session is gone.
    pub fn mark_unauthenticated(&self) {
        self.clear();
    }

    fn set_loading(&self) {
        self.state.lock().unwrap().loading = true;
    }

    fn set_authenticated(&self, account: Account) {
        *self.state.lock().unwrap() = Session {
            authenticated: true,
            user: Some(account),
            loading: false,
        };
    }

    fn clear(&self) {
        *self.state.lock().unwrap() = Session {
            authenticated: false,
            user: None,
            loading: false,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{FailPoint, MemoryApi};

    #[tokio::test]
    async fn login_success_authenticates() {
        let api = MemoryApi::new();
        api.seed_account("a@example.com", "hunter2secret");
        let store = SessionStore::new(api);

        let account = store.login("a@example.com", "hunter2secret").await.unwrap();
        let session = store.current();
        assert!(session.authenticated);
        assert!(!session.loading);
        assert_eq!(session.user, Some(account));
    }

    #[tokio::test]
    async fn login_failure_surfaces_service_reason() {
        let api = MemoryApi::new();
        api.seed_account("a@example.com", "hunter2secret");
        let store = SessionStore::new(api);

        let err = store.login("a@example.com", "wrong").await.unwrap_err();
        assert_eq!(err, ApiError::service("Incorrect email or password"));
        assert!(!store.current().authenticated);
        assert!(!store.current().loading);
    }

    #[tokio::test]
    async fn register_logs_in_with_the_same_credentials() {
        let api = MemoryApi::new();
        let store = SessionStore::new(api.clone());

        store.register("a@example.com", "hunter2secret").await.unwrap();
        assert!(store.current().authenticated);
        assert!(api.has_account("a@example.com"));
    }

    #[tokio::test]
    async fn register_with_failing_login_stays_unauthenticated() {
        let api = MemoryApi::new();
        api.fail_once(FailPoint::Login, ApiError::service("boom"));
        let store = SessionStore::new(api.clone());

        let err = store.register("a@example.com", "hunter2secret").await.unwrap_err();
        assert_eq!(err, ApiError::service("boom"));
        // The account was created, but no session was established.
        assert!(api.has_account("a@example.com"));
        assert!(!store.current().authenticated);
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let api = MemoryApi::new();
        api.seed_account("a@example.com", "hunter2secret");
        let store = SessionStore::new(api);

        let err = store.register("a@example.com", "other-password").await.unwrap_err();
        assert_eq!(err, ApiError::service("Email already registered"));
        assert!(!store.current().authenticated);
    }

    #[tokio::test]
    async fn check_auth_failure_clears_state_and_reraises() {
        let api = MemoryApi::new();
        let store = SessionStore::new(api);

        let err = store.check_auth().await.unwrap_err();
        assert_eq!(err, ApiError::Unauthorized);
        let session = store.current();
        assert!(!session.authenticated);
        assert!(session.user.is_none());
        assert!(!session.loading);
    }

    #[tokio::test]
    async fn check_auth_renews_an_established_session() {
        let api = MemoryApi::new();
        api.seed_account("a@example.com", "hunter2secret");
        let store = SessionStore::new(api);

        store.login("a@example.com", "hunter2secret").await.unwrap();
        let account = store.check_auth().await.unwrap();
        assert_eq!(account.email, "a@example.com");
        assert!(store.current().authenticated);
    }

    #[tokio::test]
    async fn logout_clears_state_even_when_the_request_fails() {
        let api = MemoryApi::new();
        api.seed_account("a@example.com", "hunter2secret");
        let store = SessionStore::new(api.clone());

        store.login("a@example.com", "hunter2secret").await.unwrap();
        api.fail_once(FailPoint::Logout, ApiError::service("boom"));

        store.logout().await;
        assert!(!store.current().authenticated);
        assert!(store.current().user.is_none());
    }
}
