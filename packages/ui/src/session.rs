//! Session context and hooks.
//!
//! [`SessionProvider`] owns a [`store::SessionStore`] and mirrors its state
//! into a signal; [`use_session`] hands out a [`SessionHandle`] whose
//! operations drive the store and keep the signal in sync.

use dioxus::prelude::*;

use store::{ApiError, Session, SessionStore};

use crate::client::ServerAuthApi;

/// Shared handle to the session state. Clones share the same store and
/// signal.
#[derive(Clone)]
pub struct SessionHandle {
    store: SessionStore<ServerAuthApi>,
    state: Signal<Session>,
}

impl SessionHandle {
    /// Current session snapshot. Reading it inside a component subscribes
    /// to updates.
    pub fn session(&self) -> Session {
        let state = self.state;
        state()
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let result = self.store.register(email, password).await.map(|_| ());
        self.sync();
        result
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let result = self.store.login(email, password).await.map(|_| ());
        self.sync();
        result
    }

    pub async fn logout(&self) {
        self.store.logout().await;
        self.sync();
    }

    pub async fn check_auth(&self) -> Result<(), ApiError> {
        let result = self.store.check_auth().await.map(|_| ());
        self.sync();
        result
    }

    /// Drop the authenticated state locally, e.g. after a todos endpoint
    /// answered 401. The reactive guards pick this up and redirect.
    pub fn mark_unauthenticated(&self) {
        self.store.mark_unauthenticated();
        self.sync();
    }

    fn sync(&self) {
        let mut state = self.state;
        state.set(self.store.current());
    }
}

/// Get the session handle provided by [`SessionProvider`].
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>()
}

/// Provider component that owns the session state. Wrap the app with it.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let state = use_signal(Session::default);
    let handle = use_hook(|| SessionHandle {
        store: SessionStore::new(ServerAuthApi),
        state,
    });
    use_context_provider({
        let handle = handle.clone();
        move || handle
    });

    // Settle the initial `loading` state: try to renew the session from the
    // refresh cookie once on mount.
    let _ = use_resource(move || {
        let handle = handle.clone();
        async move {
            if let Err(err) = handle.check_auth().await {
                tracing::debug!("no active session on mount: {err}");
            }
        }
    });

    rsx! {
        {children}
    }
}

/// Wait out the gap between a Set-Cookie response and the cookie being
/// attached to the next request. Workaround for the cookie write/read
/// visibility race; callers sleep after a successful `check_auth` before
/// the first credentialed data fetch.
pub async fn cookie_settle_delay() {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(std::time::Duration::from_millis(150)).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(std::time::Duration::from_millis(150)).await;
}
