//! Session authentication: JWT issuing/verification, the session cookies,
//! and password hashing.

mod password;
mod tokens;

pub use password::{hash_password, verify_password};
pub use tokens::{verify_token, TokenKind};

use axum_extra::extract::cookie::{Cookie, SameSite};
use dioxus::prelude::*;

/// Cookie carrying the short-lived access token.
pub const ACCESS_COOKIE: &str = "access_token";
/// Cookie carrying the long-lived refresh token.
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Resolve the authenticated user id from the access token, taken from the
/// session cookie or, failing that, a bearer `Authorization` header. The
/// user must still exist. Every failure mode maps to the canonical
/// [`crate::AUTH_ERROR_DETAIL`] so clients can recognize session loss.
pub async fn authenticated_user_id(pool: &sqlx::PgPool) -> Result<uuid::Uuid, ServerFnError> {
    use axum_extra::extract::CookieJar;

    let jar: CookieJar = extract().await?;
    let token = match jar.get(ACCESS_COOKIE) {
        Some(cookie) => cookie.value().to_string(),
        None => bearer_token().await?,
    };

    let Some(user_id) = tokens::verify_token(&token, TokenKind::Access) else {
        return Err(credentials_error());
    };
    let user_id = uuid::Uuid::parse_str(&user_id).map_err(|_| credentials_error())?;

    let exists: Option<(uuid::Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    if exists.is_none() {
        return Err(credentials_error());
    }

    Ok(user_id)
}

async fn bearer_token() -> Result<String, ServerFnError> {
    let headers: axum::http::HeaderMap = extract().await?;
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
        .ok_or_else(credentials_error)
}

fn credentials_error() -> ServerFnError {
    ServerFnError::new(crate::AUTH_ERROR_DETAIL)
}

/// Set both session cookies on the current response.
pub fn issue_session_cookies(user_id: &str) -> Result<(), ServerFnError> {
    let access = tokens::issue_token(user_id, TokenKind::Access).map_err(ServerFnError::new)?;
    let refresh = tokens::issue_token(user_id, TokenKind::Refresh).map_err(ServerFnError::new)?;
    append_set_cookie(session_cookie(
        ACCESS_COOKIE,
        access,
        time::Duration::minutes(tokens::access_ttl_minutes()),
    ))?;
    append_set_cookie(session_cookie(
        REFRESH_COOKIE,
        refresh,
        time::Duration::days(tokens::refresh_ttl_days()),
    ))
}

/// Set a fresh access cookie, leaving the refresh cookie as-is.
pub fn renew_access_cookie(user_id: &str) -> Result<(), ServerFnError> {
    let access = tokens::issue_token(user_id, TokenKind::Access).map_err(ServerFnError::new)?;
    append_set_cookie(session_cookie(
        ACCESS_COOKIE,
        access,
        time::Duration::minutes(tokens::access_ttl_minutes()),
    ))
}

/// Expire both session cookies on the current response.
pub fn clear_session_cookies() -> Result<(), ServerFnError> {
    append_set_cookie(session_cookie(ACCESS_COOKIE, String::new(), time::Duration::ZERO))?;
    append_set_cookie(session_cookie(REFRESH_COOKIE, String::new(), time::Duration::ZERO))
}

fn session_cookie(name: &'static str, value: String, max_age: time::Duration) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    cookie.set_secure(cookie_secure());
    cookie.set_max_age(max_age);
    cookie
}

fn cookie_secure() -> bool {
    std::env::var("COOKIE_SECURE")
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn append_set_cookie(cookie: Cookie<'static>) -> Result<(), ServerFnError> {
    let value = axum::http::HeaderValue::from_str(&cookie.to_string())
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    server_context()
        .response_parts_mut()
        .headers
        .append(axum::http::header::SET_COOKIE, value);
    Ok(())
}
