//! Todo cache hook.
//!
//! [`use_todos`] owns a [`store::TodoStore`] and mirrors every cache write
//! (including the intermediate optimistic states) into a signal via the
//! store's watcher. A 401 on any todo endpoint is treated as session loss:
//! the session is marked unauthenticated so the dashboard guard redirects.

use dioxus::prelude::*;

use store::{ApiError, StoreError, Todo, TodoDraft, TodoPatch, TodoStore};

use crate::client::ServerTodoApi;
use crate::session::{use_session, SessionHandle};

/// Shared handle to the todo cache. Clones share the same store and signal.
#[derive(Clone)]
pub struct TodosHandle {
    store: TodoStore<ServerTodoApi>,
    todos: Signal<Vec<Todo>>,
    session: SessionHandle,
}

impl TodosHandle {
    /// Current cached todos. Reading inside a component subscribes to
    /// updates, including optimistic ones.
    pub fn todos(&self) -> Vec<Todo> {
        let todos = self.todos;
        todos()
    }

    pub async fn load(&self) -> Result<(), StoreError> {
        let result = self.store.load().await;
        self.intercept(result)
    }

    pub async fn create(&self, draft: TodoDraft) -> Result<(), StoreError> {
        let result = self.store.create(draft).await.map(|_| ());
        self.intercept(result)
    }

    pub async fn update(&self, id: &str, patch: TodoPatch) -> Result<(), StoreError> {
        let result = self.store.update(id, patch).await.map(|_| ());
        self.intercept(result)
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let result = self.store.delete(id).await;
        self.intercept(result)
    }

    pub async fn toggle_pin(&self, id: &str) -> Result<(), StoreError> {
        let result = self.store.toggle_pin(id).await;
        self.intercept(result)
    }

    pub async fn toggle_complete(&self, id: &str) -> Result<(), StoreError> {
        let result = self.store.toggle_complete(id).await;
        self.intercept(result)
    }

    fn intercept<T>(&self, result: Result<T, StoreError>) -> Result<T, StoreError> {
        if matches!(result, Err(StoreError::Api(ApiError::Unauthorized))) {
            self.session.mark_unauthenticated();
        }
        result
    }
}

/// Create the todo cache for this part of the tree. The cache starts empty;
/// callers load it explicitly once the session is verified.
pub fn use_todos() -> TodosHandle {
    let session = use_session();
    let todos = use_signal(Vec::new);
    use_hook(move || {
        let store = TodoStore::new(ServerTodoApi);
        let mirror = todos;
        store.watch(move |list| {
            let mut mirror = mirror;
            mirror.set(list.to_vec());
        });
        TodosHandle {
            store,
            todos,
            session,
        }
    })
}
