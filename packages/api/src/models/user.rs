//! The `users` table row and its client-safe projection.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Full user record from the database. The password hash never leaves the
/// server; [`User::to_account`] projects to the wire shape.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn to_account(&self) -> store::Account {
        store::Account {
            id: self.id.to_string(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}
