//! JWT handling for the access/refresh token pair.
//!
//! Both tokens are HS256, signed with `SECRET_KEY`, and carry a `type`
//! claim so an access token can never pass for a refresh token or vice
//! versa. Lifetimes come from `ACCESS_TOKEN_EXPIRE_MINUTES` (default 30)
//! and `REFRESH_TOKEN_EXPIRE_DAYS` (default 7).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    fn as_str(self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
    iat: i64,
    #[serde(rename = "type")]
    kind: String,
}

pub fn access_ttl_minutes() -> i64 {
    env_i64("ACCESS_TOKEN_EXPIRE_MINUTES", 30)
}

pub fn refresh_ttl_days() -> i64 {
    env_i64("REFRESH_TOKEN_EXPIRE_DAYS", 7)
}

fn env_i64(key: &str, default: i64) -> i64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn secret() -> Result<String, String> {
    dotenvy::dotenv().ok();
    std::env::var("SECRET_KEY").map_err(|_| "SECRET_KEY must be set".to_string())
}

/// Sign a token of the given kind for `user_id`.
pub fn issue_token(user_id: &str, kind: TokenKind) -> Result<String, String> {
    let now = Utc::now();
    let ttl = match kind {
        TokenKind::Access => Duration::minutes(access_ttl_minutes()),
        TokenKind::Refresh => Duration::days(refresh_ttl_days()),
    };
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (now + ttl).timestamp(),
        iat: now.timestamp(),
        kind: kind.as_str().to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret()?.as_bytes()),
    )
    .map_err(|e| format!("Failed to sign token: {e}"))
}

/// Verify signature, expiry, and kind; returns the subject (user id).
pub fn verify_token(token: &str, kind: TokenKind) -> Option<String> {
    let secret = secret().ok()?;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;
    (data.claims.kind == kind.as_str()).then_some(data.claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_secret() {
        std::env::set_var("SECRET_KEY", "test-secret");
    }

    #[test]
    fn round_trips_the_subject() {
        with_secret();
        let token = issue_token("user-123", TokenKind::Access).unwrap();
        assert_eq!(
            verify_token(&token, TokenKind::Access),
            Some("user-123".to_string())
        );
    }

    #[test]
    fn rejects_the_wrong_kind() {
        with_secret();
        let token = issue_token("user-123", TokenKind::Refresh).unwrap();
        assert_eq!(verify_token(&token, TokenKind::Access), None);
    }

    #[test]
    fn rejects_an_expired_token() {
        with_secret();
        let now = Utc::now();
        let claims = Claims {
            sub: "user-123".to_string(),
            exp: (now - Duration::minutes(5)).timestamp(),
            iat: (now - Duration::minutes(10)).timestamp(),
            kind: "access".to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert_eq!(verify_token(&token, TokenKind::Access), None);
    }

    #[test]
    fn rejects_a_tampered_token() {
        with_secret();
        let token = issue_token("user-123", TokenKind::Access).unwrap();
        let tampered = format!("{}x", token);
        assert_eq!(verify_token(&tampered, TokenKind::Access), None);
    }
}
