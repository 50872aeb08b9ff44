//! Implementations of the `store` trait seams over the server functions.

use dioxus::prelude::ServerFnError;
use store::{Account, ApiError, AuthApi, Todo, TodoApi, TodoDraft, TodoPatch};

fn classify(err: ServerFnError) -> ApiError {
    if api::is_auth_error(&err) {
        ApiError::Unauthorized
    } else {
        ApiError::Service(err.to_string())
    }
}

/// Todo endpoints reached through the fullstack server functions. The
/// browser attaches the session cookies; this type carries no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerTodoApi;

impl TodoApi for ServerTodoApi {
    async fn fetch_all(&self) -> Result<Vec<Todo>, ApiError> {
        api::list_todos().await.map_err(classify)
    }

    async fn create(&self, draft: TodoDraft) -> Result<Todo, ApiError> {
        api::create_todo(draft).await.map_err(classify)
    }

    async fn update(&self, id: &str, patch: TodoPatch) -> Result<Todo, ApiError> {
        api::update_todo(id.to_string(), patch).await.map_err(classify)
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        api::delete_todo(id.to_string()).await.map_err(classify)
    }
}

/// Auth endpoints reached through the fullstack server functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerAuthApi;

impl AuthApi for ServerAuthApi {
    async fn register(&self, email: &str, password: &str) -> Result<Account, ApiError> {
        api::register(email.to_string(), password.to_string())
            .await
            .map_err(classify)
    }

    async fn login(&self, email: &str, password: &str) -> Result<Account, ApiError> {
        api::login(email.to_string(), password.to_string())
            .await
            .map_err(classify)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        api::logout().await.map_err(classify)
    }

    async fn refresh(&self) -> Result<Account, ApiError> {
        api::refresh_session().await.map_err(classify)
    }
}
