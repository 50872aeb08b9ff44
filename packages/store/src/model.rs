//! Wire data model shared between the client core and the server functions.
//!
//! Field names serialize in camelCase to match the persistence service:
//! `{id, title, completed, dueDate, pinned, userId, createdAt}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A todo as the server sees it. `id`, `user_id` and `created_at` are
/// server-assigned; the client never edits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub due_date: Option<DateTime<Utc>>,
    pub pinned: bool,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a todo. The owner is taken from the session on the
/// server side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoDraft {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pinned: bool,
}

impl TodoDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Materialize the provisional cache entry for an optimistic insert.
    /// The owner reference is left empty until the server record arrives.
    pub fn provisional(&self, id: String) -> Todo {
        Todo {
            id,
            title: self.title.clone(),
            completed: self.completed,
            due_date: self.due_date,
            pinned: self.pinned,
            user_id: String::new(),
            created_at: Utc::now(),
        }
    }
}

/// Partial update for a todo. An absent field means "leave unchanged";
/// in particular a due date cannot be cleared through a patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
}

impl TodoPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn pinned(pinned: bool) -> Self {
        Self {
            pinned: Some(pinned),
            ..Self::default()
        }
    }

    /// Merge the provided fields into `todo`.
    pub fn apply(&self, todo: &mut Todo) {
        if let Some(title) = &self.title {
            todo.title = title.clone();
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
        if let Some(due_date) = self.due_date {
            todo.due_date = Some(due_date);
        }
        if let Some(pinned) = self.pinned {
            todo.pinned = pinned;
        }
    }
}

/// User account information safe to send to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
