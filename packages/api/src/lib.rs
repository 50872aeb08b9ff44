//! # API crate — fullstack server functions for Taskpin
//!
//! Every public `async fn` here is a Dioxus server function: compiled with
//! its full body when the `server` feature is enabled, and as a thin HTTP
//! stub otherwise. Together they form the persistence service the client
//! core talks to:
//!
//! - **Auth**: `register`, `login`, `refresh_session`, `logout`. Sessions
//!   are JWT access/refresh tokens delivered as HTTP-only cookies; see
//!   [`auth`] for issuing and verification.
//! - **Todos**: `list_todos`, `create_todo`, `update_todo`, `delete_todo`,
//!   all scoped to the owner carried in the access token.
//!
//! Wire types (`Account`, `Todo`, `TodoDraft`, `TodoPatch`) live in the
//! `store` crate so client and server agree on shapes.

use dioxus::prelude::*;

use store::{Account, Todo, TodoDraft, TodoPatch};

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod db;
#[cfg(feature = "server")]
pub mod models;

/// Canonical detail string for a missing or invalid access token. The
/// client treats any server-function error carrying it as session loss.
pub const AUTH_ERROR_DETAIL: &str = "Could not validate credentials";

/// Whether a server-function error means the session is gone (as opposed
/// to an ordinary service failure).
pub fn is_auth_error(err: &ServerFnError) -> bool {
    err.to_string().contains(AUTH_ERROR_DETAIL)
}

/// Create an account. Deliberately does **not** establish a session; the
/// client follows up with a `login` call.
#[server(Register)]
pub async fn register(email: String, password: String) -> Result<Account, ServerFnError> {
    use crate::models::User;

    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(ServerFnError::new("Invalid email address"));
    }
    if password.len() < 8 {
        return Err(ServerFnError::new("Password must be at least 8 characters"));
    }

    let pool = db::get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let existing: Option<(uuid::Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    if existing.is_some() {
        return Err(ServerFnError::new("Email already registered"));
    }

    let password_hash = auth::hash_password(&password).map_err(ServerFnError::new)?;

    let user: User = sqlx::query_as(
        "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING *",
    )
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.to_account())
}

/// Verify credentials and establish a session: an access and a refresh JWT
/// are set as HTTP-only cookies on the response.
#[server(Login)]
pub async fn login(email: String, password: String) -> Result<Account, ServerFnError> {
    use crate::models::User;

    let email = email.trim().to_lowercase();

    let pool = db::get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user) = user else {
        return Err(ServerFnError::new("Incorrect email or password"));
    };

    let valid = auth::verify_password(&password, &user.password_hash).map_err(ServerFnError::new)?;
    if !valid {
        return Err(ServerFnError::new("Incorrect email or password"));
    }

    auth::issue_session_cookies(&user.id.to_string())?;

    Ok(user.to_account())
}

/// Renew the session from the refresh cookie: verifies the refresh token,
/// confirms the user still exists, and sets a fresh access cookie.
#[server(RefreshSession)]
pub async fn refresh_session() -> Result<Account, ServerFnError> {
    use crate::auth::TokenKind;
    use crate::models::User;
    use axum_extra::extract::CookieJar;

    let jar: CookieJar = extract().await?;
    let Some(cookie) = jar.get(auth::REFRESH_COOKIE) else {
        return Err(ServerFnError::new("Refresh token not provided"));
    };

    let Some(user_id) = auth::verify_token(cookie.value(), TokenKind::Refresh) else {
        return Err(ServerFnError::new("Invalid or expired refresh token"));
    };
    let user_id = uuid::Uuid::parse_str(&user_id)
        .map_err(|_| ServerFnError::new("Invalid or expired refresh token"))?;

    let pool = db::get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user) = user else {
        return Err(ServerFnError::new("User not found"));
    };

    auth::renew_access_cookie(&user.id.to_string())?;

    Ok(user.to_account())
}

/// Clear both session cookies.
#[server(Logout)]
pub async fn logout() -> Result<(), ServerFnError> {
    auth::clear_session_cookies()?;
    Ok(())
}

/// All todos of the authenticated user, newest first.
#[server(ListTodos)]
pub async fn list_todos() -> Result<Vec<Todo>, ServerFnError> {
    use crate::models::TodoRow;

    let pool = db::get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let user_id = auth::authenticated_user_id(pool).await?;

    let rows: Vec<TodoRow> =
        sqlx::query_as("SELECT * FROM todos WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(rows.into_iter().map(|r| r.to_wire()).collect())
}

/// Create a todo for the authenticated user. Identifier, owner, and
/// creation timestamp are assigned here.
#[server(CreateTodo)]
pub async fn create_todo(draft: TodoDraft) -> Result<Todo, ServerFnError> {
    use crate::models::TodoRow;

    if draft.title.is_empty() || draft.title.chars().count() > 500 {
        return Err(ServerFnError::new("Title must be between 1 and 500 characters"));
    }

    let pool = db::get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let user_id = auth::authenticated_user_id(pool).await?;

    let row: TodoRow = sqlx::query_as(
        "INSERT INTO todos (title, completed, due_date, pinned, user_id)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(&draft.title)
    .bind(draft.completed)
    .bind(draft.due_date)
    .bind(draft.pinned)
    .bind(user_id)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(row.to_wire())
}

/// Update a todo. Only fields present in the patch are changed; only the
/// owner may update their todos.
#[server(UpdateTodo)]
pub async fn update_todo(id: String, patch: TodoPatch) -> Result<Todo, ServerFnError> {
    use crate::models::TodoRow;

    let pool = db::get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let user_id = auth::authenticated_user_id(pool).await?;

    let todo_id =
        uuid::Uuid::parse_str(&id).map_err(|_| ServerFnError::new("Todo not found"))?;
    let existing: Option<TodoRow> = sqlx::query_as("SELECT * FROM todos WHERE id = $1")
        .bind(todo_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let Some(existing) = existing else {
        return Err(ServerFnError::new("Todo not found"));
    };
    if existing.user_id != user_id {
        return Err(ServerFnError::new("Not authorized to update this todo"));
    }

    let row: TodoRow = sqlx::query_as(
        "UPDATE todos SET
            title = COALESCE($2, title),
            completed = COALESCE($3, completed),
            due_date = COALESCE($4, due_date),
            pinned = COALESCE($5, pinned)
         WHERE id = $1 RETURNING *",
    )
    .bind(todo_id)
    .bind(patch.title)
    .bind(patch.completed)
    .bind(patch.due_date)
    .bind(patch.pinned)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(row.to_wire())
}

/// Delete a todo. Only the owner may delete their todos.
#[server(DeleteTodo)]
pub async fn delete_todo(id: String) -> Result<(), ServerFnError> {
    use crate::models::TodoRow;

    let pool = db::get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let user_id = auth::authenticated_user_id(pool).await?;

    let todo_id =
        uuid::Uuid::parse_str(&id).map_err(|_| ServerFnError::new("Todo not found"))?;
    let existing: Option<TodoRow> = sqlx::query_as("SELECT * FROM todos WHERE id = $1")
        .bind(todo_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let Some(existing) = existing else {
        return Err(ServerFnError::new("Todo not found"));
    };
    if existing.user_id != user_id {
        return Err(ServerFnError::new("Not authorized to delete this todo"));
    }

    sqlx::query("DELETE FROM todos WHERE id = $1")
        .bind(todo_id)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}
