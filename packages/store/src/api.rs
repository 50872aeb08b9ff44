//! Trait seams to the persistence service.
//!
//! The stores in this crate never talk to the network directly; they go
//! through these traits, implemented over server functions in the UI crate
//! and by [`crate::MemoryApi`] in tests.

use thiserror::Error;

use crate::model::{Account, Todo, TodoDraft, TodoPatch};

/// Error from a persistence-service call, already classified: a rejected or
/// expired session is distinguished so callers can treat it as session loss.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("session expired or invalid")]
    Unauthorized,
    #[error("{0}")]
    Service(String),
}

impl ApiError {
    pub fn service(reason: impl Into<String>) -> Self {
        Self::Service(reason.into())
    }
}

/// Todo endpoints of the persistence service. Requests carry the session
/// cookies implicitly; this layer never sees them.
pub trait TodoApi {
    async fn fetch_all(&self) -> Result<Vec<Todo>, ApiError>;
    async fn create(&self, draft: TodoDraft) -> Result<Todo, ApiError>;
    async fn update(&self, id: &str, patch: TodoPatch) -> Result<Todo, ApiError>;
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

/// Auth endpoints of the persistence service. `login` and `refresh` set or
/// renew HTTP-only cookies as a side effect invisible to the caller.
pub trait AuthApi {
    async fn register(&self, email: &str, password: &str) -> Result<Account, ApiError>;
    async fn login(&self, email: &str, password: &str) -> Result<Account, ApiError>;
    async fn logout(&self) -> Result<(), ApiError>;
    async fn refresh(&self) -> Result<Account, ApiError>;
}
