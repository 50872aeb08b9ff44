//! The todo cache and mutation layer.
//!
//! Every mutation is optimistic: the cache is patched immediately, the
//! request is issued, and the outcome either commits the server record or
//! rolls the cache back to the snapshot captured before the patch. Whatever
//! the outcome, the mutation finishes with a reconciliation reload so the
//! cache converges on the server's authoritative state.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::api::{ApiError, TodoApi};
use crate::model::{Todo, TodoDraft, TodoPatch};

/// Prefix of client-generated provisional identifiers. Server identifiers
/// are UUIDs, so the two can never collide.
pub const TEMP_ID_PREFIX: &str = "tmp-";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("no todo with id {0}")]
    UnknownTodo(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

type Watcher = Box<dyn Fn(&[Todo])>;

/// Client-visible todo cache. Clones share the same cache; the store is the
/// sole writer of the list, components only request mutations.
pub struct TodoStore<A: TodoApi> {
    api: A,
    todos: Arc<Mutex<Vec<Todo>>>,
    stale: Arc<AtomicBool>,
    next_temp: Arc<AtomicU64>,
    watcher: Arc<Mutex<Option<Watcher>>>,
}

impl<A: TodoApi + Clone> Clone for TodoStore<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            todos: Arc::clone(&self.todos),
            stale: Arc::clone(&self.stale),
            next_temp: Arc::clone(&self.next_temp),
            watcher: Arc::clone(&self.watcher),
        }
    }
}

impl<A: TodoApi> TodoStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            todos: Arc::new(Mutex::new(Vec::new())),
            stale: Arc::new(AtomicBool::new(false)),
            next_temp: Arc::new(AtomicU64::new(1)),
            watcher: Arc::new(Mutex::new(None)),
        }
    }

    /// Register a callback invoked after every cache write, including the
    /// intermediate optimistic states. Replaces any previous watcher.
    pub fn watch(&self, f: impl Fn(&[Todo]) + 'static) {
        *self.watcher.lock().unwrap() = Some(Box::new(f));
        self.notify();
    }

    /// Snapshot of the cached todos. Never performs I/O.
    pub fn list(&self) -> Vec<Todo> {
        self.todos.lock().unwrap().clone()
    }

    /// Whether a mutation has invalidated the cache since the last
    /// successful load.
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::Relaxed)
    }

    /// Fetch the full todo set and replace the cache. On failure the
    /// previous cache contents are left intact.
    pub async fn load(&self) -> Result<(), StoreError> {
        let fetched = self.api.fetch_all().await?;
        self.replace(fetched);
        self.stale.store(false, Ordering::Relaxed);
        Ok(())
    }

    /// Optimistically insert a provisional todo, then persist it. On success
    /// the provisional entry (matched by its temporary id) is replaced with
    /// the server record; on failure the pre-mutation snapshot is restored.
    pub async fn create(&self, draft: TodoDraft) -> Result<Todo, StoreError> {
        if draft.title.trim().is_empty() {
            return Err(StoreError::EmptyTitle);
        }

        self.stale.store(true, Ordering::Relaxed);
        let snapshot = self.list();
        let temp_id = format!(
            "{TEMP_ID_PREFIX}{}",
            self.next_temp.fetch_add(1, Ordering::Relaxed)
        );
        {
            let mut todos = self.todos.lock().unwrap();
            todos.insert(0, draft.provisional(temp_id.clone()));
        }
        self.notify();

        let result = match self.api.create(draft).await {
            Ok(created) => {
                {
                    let mut todos = self.todos.lock().unwrap();
                    if let Some(entry) = todos.iter_mut().find(|t| t.id == temp_id) {
                        *entry = created.clone();
                    }
                }
                self.notify();
                Ok(created)
            }
            Err(err) => {
                self.replace(snapshot);
                Err(err.into())
            }
        };

        self.reconcile().await;
        result
    }

    /// Optimistically merge `patch` into the cached entry, then persist it.
    /// Errors without issuing a request when `id` is not cached.
    pub async fn update(&self, id: &str, patch: TodoPatch) -> Result<Todo, StoreError> {
        let snapshot = self.list();
        if !snapshot.iter().any(|t| t.id == id) {
            return Err(StoreError::UnknownTodo(id.to_string()));
        }

        self.stale.store(true, Ordering::Relaxed);
        {
            let mut todos = self.todos.lock().unwrap();
            if let Some(entry) = todos.iter_mut().find(|t| t.id == id) {
                patch.apply(entry);
            }
        }
        self.notify();

        let result = match self.api.update(id, patch).await {
            Ok(updated) => {
                {
                    let mut todos = self.todos.lock().unwrap();
                    if let Some(entry) = todos.iter_mut().find(|t| t.id == id) {
                        *entry = updated.clone();
                    }
                }
                self.notify();
                Ok(updated)
            }
            Err(err) => {
                self.replace(snapshot);
                Err(err.into())
            }
        };

        self.reconcile().await;
        result
    }

    /// Optimistically remove the entry, then persist the delete. On failure
    /// the full pre-mutation snapshot is restored, not just the one entry.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.stale.store(true, Ordering::Relaxed);
        let snapshot = self.list();
        {
            let mut todos = self.todos.lock().unwrap();
            todos.retain(|t| t.id != id);
        }
        self.notify();

        let result = match self.api.delete(id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                self.replace(snapshot);
                Err(err.into())
            }
        };

        self.reconcile().await;
        result
    }

    /// Flip the pinned flag. No-op when `id` is not cached.
    pub async fn toggle_pin(&self, id: &str) -> Result<(), StoreError> {
        let Some(current) = self.list().into_iter().find(|t| t.id == id) else {
            return Ok(());
        };
        self.update(id, TodoPatch::pinned(!current.pinned)).await?;
        Ok(())
    }

    /// Flip the completion flag. No-op when `id` is not cached.
    pub async fn toggle_complete(&self, id: &str) -> Result<(), StoreError> {
        let Some(current) = self.list().into_iter().find(|t| t.id == id) else {
            return Ok(());
        };
        self.update(id, TodoPatch::completed(!current.completed))
            .await?;
        Ok(())
    }

    /// Follow-up reload after a mutation settles. A failure here is not
    /// surfaced: the cache stays marked stale and the next successful load
    /// converges it.
    async fn reconcile(&self) {
        if let Err(err) = self.load().await {
            tracing::warn!("reconciliation reload failed: {err}");
        }
    }

    fn replace(&self, todos: Vec<Todo>) {
        *self.todos.lock().unwrap() = todos;
        self.notify();
    }

    fn notify(&self) {
        let todos = self.list();
        if let Some(watcher) = self.watcher.lock().unwrap().as_ref() {
            watcher(&todos);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::memory::{FailPoint, MemoryApi};

    async fn seeded_store(titles: &[&str]) -> (MemoryApi, TodoStore<MemoryApi>) {
        let api = MemoryApi::new();
        for title in titles {
            api.seed_todo(title);
        }
        let store = TodoStore::new(api.clone());
        store.load().await.unwrap();
        (api, store)
    }

    #[tokio::test]
    async fn load_replaces_cache() {
        let (api, store) = seeded_store(&["buy milk", "water plants"]).await;
        assert_eq!(store.list().len(), 2);
        assert_eq!(store.list(), api.server_todos());
    }

    #[tokio::test]
    async fn load_failure_keeps_previous_cache() {
        let (api, store) = seeded_store(&["buy milk"]).await;
        api.seed_todo("water plants");
        api.fail_once(FailPoint::FetchAll, ApiError::service("boom"));

        let err = store.load().await.unwrap_err();
        assert_eq!(err, StoreError::Api(ApiError::service("boom")));
        // Still the single todo from before the failed reload.
        assert_eq!(store.list().len(), 1);
    }

    #[tokio::test]
    async fn create_commits_server_record_and_reconciles() {
        let (api, store) = seeded_store(&[]).await;
        let created = store.create(TodoDraft::new("buy milk")).await.unwrap();

        assert!(!created.id.starts_with(TEMP_ID_PREFIX));
        assert_eq!(store.list(), api.server_todos());
        assert!(!store.is_stale());
    }

    #[tokio::test]
    async fn create_shows_provisional_entry_before_confirmation() {
        let (_, store) = seeded_store(&[]).await;
        let states: Rc<RefCell<Vec<Vec<Todo>>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&states);
        store.watch(move |todos| sink.borrow_mut().push(todos.to_vec()));

        store.create(TodoDraft::new("buy milk")).await.unwrap();

        let states = states.borrow();
        let provisional = states
            .iter()
            .find(|s| s.iter().any(|t| t.id.starts_with(TEMP_ID_PREFIX)))
            .expect("optimistic state was never observable");
        assert_eq!(provisional[0].title, "buy milk");
        // The final state carries only server ids.
        let last = states.last().unwrap();
        assert!(last.iter().all(|t| !t.id.starts_with(TEMP_ID_PREFIX)));
    }

    #[tokio::test]
    async fn create_failure_rolls_back_and_leaves_others_untouched() {
        let (api, store) = seeded_store(&["buy milk"]).await;
        let before = store.list();
        api.fail_once(FailPoint::Create, ApiError::service("boom"));

        let err = store.create(TodoDraft::new("water plants")).await.unwrap_err();
        assert_eq!(err, StoreError::Api(ApiError::service("boom")));

        let after = store.list();
        assert!(after.iter().all(|t| !t.id.starts_with(TEMP_ID_PREFIX)));
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn create_rejects_blank_title_without_a_request() {
        let (api, store) = seeded_store(&[]).await;
        let requests = api.request_count();

        assert_eq!(
            store.create(TodoDraft::new("   ")).await.unwrap_err(),
            StoreError::EmptyTitle
        );
        assert_eq!(api.request_count(), requests);
    }

    #[tokio::test]
    async fn update_commits_server_response() {
        let (api, store) = seeded_store(&["buy milk"]).await;
        let id = store.list()[0].id.clone();

        let updated = store.update(&id, TodoPatch::title("buy oat milk")).await.unwrap();
        assert_eq!(updated.title, "buy oat milk");
        assert_eq!(store.list(), api.server_todos());
    }

    #[tokio::test]
    async fn update_failure_restores_snapshot() {
        let (api, store) = seeded_store(&["buy milk"]).await;
        let id = store.list()[0].id.clone();
        let before = store.list();
        api.fail_once(FailPoint::Update, ApiError::service("boom"));

        store.update(&id, TodoPatch::completed(true)).await.unwrap_err();
        assert_eq!(store.list(), before);
    }

    #[tokio::test]
    async fn update_unknown_id_is_an_error_without_a_request() {
        let (api, store) = seeded_store(&["buy milk"]).await;
        let requests = api.request_count();

        let err = store
            .update("missing", TodoPatch::completed(true))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::UnknownTodo("missing".into()));
        assert_eq!(api.request_count(), requests);
    }

    #[tokio::test]
    async fn delete_removes_entry_and_reconciles() {
        let (api, store) = seeded_store(&["buy milk", "water plants"]).await;
        let id = store.list()[0].id.clone();

        store.delete(&id).await.unwrap();
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.list(), api.server_todos());
    }

    #[tokio::test]
    async fn delete_failure_restores_full_snapshot() {
        let (api, store) = seeded_store(&["buy milk", "water plants"]).await;
        let before = store.list();
        let id = before[0].id.clone();
        api.fail_once(FailPoint::Delete, ApiError::service("boom"));

        store.delete(&id).await.unwrap_err();
        assert_eq!(store.list(), before);
    }

    #[tokio::test]
    async fn toggles_flip_flags() {
        let (_, store) = seeded_store(&["buy milk"]).await;
        let id = store.list()[0].id.clone();

        store.toggle_complete(&id).await.unwrap();
        assert!(store.list()[0].completed);

        store.toggle_pin(&id).await.unwrap();
        assert!(store.list()[0].pinned);

        store.toggle_pin(&id).await.unwrap();
        assert!(!store.list()[0].pinned);
    }

    #[tokio::test]
    async fn toggles_on_unknown_id_are_noops_without_requests() {
        let (api, store) = seeded_store(&["buy milk"]).await;
        let before = store.list();
        let requests = api.request_count();

        store.toggle_pin("missing").await.unwrap();
        store.toggle_complete("missing").await.unwrap();

        assert_eq!(store.list(), before);
        assert_eq!(api.request_count(), requests);
    }

    #[tokio::test]
    async fn successful_mutation_sequence_converges_on_server_state() {
        let (api, store) = seeded_store(&[]).await;

        let a = store.create(TodoDraft::new("a")).await.unwrap();
        let b = store.create(TodoDraft::new("b")).await.unwrap();
        store.update(&a.id, TodoPatch::completed(true)).await.unwrap();
        store.delete(&b.id).await.unwrap();

        assert_eq!(store.list(), api.server_todos());
        assert!(!store.is_stale());
    }

    #[tokio::test]
    async fn unauthorized_mutation_surfaces_session_loss() {
        let (api, store) = seeded_store(&["buy milk"]).await;
        let id = store.list()[0].id.clone();
        api.fail_once(FailPoint::Update, ApiError::Unauthorized);

        let err = store.update(&id, TodoPatch::completed(true)).await.unwrap_err();
        assert_eq!(err, StoreError::Api(ApiError::Unauthorized));
    }
}
