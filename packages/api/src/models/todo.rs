//! The `todos` table row.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct TodoRow {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    pub due_date: Option<DateTime<Utc>>,
    pub pinned: bool,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl TodoRow {
    /// Project onto the wire shape; UUIDs cross the boundary as strings.
    pub fn to_wire(&self) -> store::Todo {
        store::Todo {
            id: self.id.to_string(),
            title: self.title.clone(),
            completed: self.completed,
            due_date: self.due_date,
            pinned: self.pinned,
            user_id: self.user_id.to_string(),
            created_at: self.created_at,
        }
    }
}
