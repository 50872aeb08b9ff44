//! In-memory stand-in for the persistence service, used by the test suites
//! of [`crate::TodoStore`] and [`crate::SessionStore`].
//!
//! It mimics the real service's behavior: server-assigned identifiers and
//! creation timestamps, canonical error reasons, and a register endpoint
//! that does not establish a session. Individual endpoints can be made to
//! fail exactly once via [`MemoryApi::fail_once`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::api::{ApiError, AuthApi, TodoApi};
use crate::model::{Account, Todo, TodoDraft, TodoPatch};

/// Endpoints that can be primed to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailPoint {
    FetchAll,
    Create,
    Update,
    Delete,
    Register,
    Login,
    Logout,
    Refresh,
}

#[derive(Debug, Default)]
struct Inner {
    todos: Vec<Todo>,
    accounts: Vec<(Account, String)>,
    session: Option<Account>,
    next_id: u64,
    requests: u64,
    failures: HashMap<FailPoint, ApiError>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryApi {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prime `point` to fail with `err` on its next invocation.
    pub fn fail_once(&self, point: FailPoint, err: ApiError) {
        self.inner.lock().unwrap().failures.insert(point, err);
    }

    /// Total number of requests the fake service has received.
    pub fn request_count(&self) -> u64 {
        self.inner.lock().unwrap().requests
    }

    /// The authoritative todo list as the server holds it.
    pub fn server_todos(&self) -> Vec<Todo> {
        self.inner.lock().unwrap().todos.clone()
    }

    /// Insert a todo directly, bypassing the API surface.
    pub fn seed_todo(&self, title: &str) -> Todo {
        let mut inner = self.inner.lock().unwrap();
        let todo = Todo {
            id: Self::assign_id(&mut inner),
            title: title.to_string(),
            completed: false,
            due_date: None,
            pinned: false,
            user_id: "user-1".to_string(),
            created_at: Utc::now(),
        };
        inner.todos.insert(0, todo.clone());
        todo
    }

    /// Create an account directly, bypassing the API surface.
    pub fn seed_account(&self, email: &str, password: &str) -> Account {
        let mut inner = self.inner.lock().unwrap();
        let account = Account {
            id: Self::assign_id(&mut inner),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        inner.accounts.push((account.clone(), password.to_string()));
        account
    }

    pub fn has_account(&self, email: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .accounts
            .iter()
            .any(|(a, _)| a.email == email)
    }

    fn assign_id(inner: &mut Inner) -> String {
        inner.next_id += 1;
        // Same shape as a document-store object id.
        format!("{:024x}", inner.next_id)
    }

    fn begin(&self, point: FailPoint) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests += 1;
        match inner.failures.remove(&point) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl TodoApi for MemoryApi {
    async fn fetch_all(&self) -> Result<Vec<Todo>, ApiError> {
        self.begin(FailPoint::FetchAll)?;
        Ok(self.server_todos())
    }

    async fn create(&self, draft: TodoDraft) -> Result<Todo, ApiError> {
        self.begin(FailPoint::Create)?;
        let mut inner = self.inner.lock().unwrap();
        let owner = inner
            .session
            .as_ref()
            .map(|a| a.id.clone())
            .unwrap_or_else(|| "user-1".to_string());
        let todo = Todo {
            id: Self::assign_id(&mut inner),
            title: draft.title,
            completed: draft.completed,
            due_date: draft.due_date,
            pinned: draft.pinned,
            user_id: owner,
            created_at: Utc::now(),
        };
        inner.todos.insert(0, todo.clone());
        Ok(todo)
    }

    async fn update(&self, id: &str, patch: TodoPatch) -> Result<Todo, ApiError> {
        self.begin(FailPoint::Update)?;
        let mut inner = self.inner.lock().unwrap();
        let entry = inner
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ApiError::service("Todo not found"))?;
        patch.apply(entry);
        Ok(entry.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.begin(FailPoint::Delete)?;
        let mut inner = self.inner.lock().unwrap();
        if !inner.todos.iter().any(|t| t.id == id) {
            return Err(ApiError::service("Todo not found"));
        }
        inner.todos.retain(|t| t.id != id);
        Ok(())
    }
}

impl AuthApi for MemoryApi {
    async fn register(&self, email: &str, password: &str) -> Result<Account, ApiError> {
        self.begin(FailPoint::Register)?;
        let mut inner = self.inner.lock().unwrap();
        if inner.accounts.iter().any(|(a, _)| a.email == email) {
            return Err(ApiError::service("Email already registered"));
        }
        let account = Account {
            id: Self::assign_id(&mut inner),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        inner.accounts.push((account.clone(), password.to_string()));
        // Creating the account does not establish a session.
        Ok(account)
    }

    async fn login(&self, email: &str, password: &str) -> Result<Account, ApiError> {
        self.begin(FailPoint::Login)?;
        let mut inner = self.inner.lock().unwrap();
        let account = inner
            .accounts
            .iter()
            .find(|(a, p)| a.email == email && p == password)
            .map(|(a, _)| a.clone())
            .ok_or_else(|| ApiError::service("Incorrect email or password"))?;
        inner.session = Some(account.clone());
        Ok(account)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.begin(FailPoint::Logout)?;
        self.inner.lock().unwrap().session = None;
        Ok(())
    }

    async fn refresh(&self) -> Result<Account, ApiError> {
        self.begin(FailPoint::Refresh)?;
        self.inner
            .lock()
            .unwrap()
            .session
            .clone()
            .ok_or(ApiError::Unauthorized)
    }
}
