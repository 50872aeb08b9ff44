//! Authenticated dashboard: session check, todo list with pinned section,
//! filter tabs and the create/edit forms.

use chrono::{DateTime, Utc};
use dioxus::prelude::*;

use store::{partition_for_display, FilterTab, Todo, TodoDraft, TodoPatch};
use ui::{cookie_settle_delay, use_session, use_todos, FilterTabs, Navbar, TodoForm, TodoItem};

use crate::Route;

#[component]
pub fn Dashboard() -> Element {
    let session = use_session();
    let todos = use_todos();
    let nav = use_navigator();
    let mut tab = use_signal(FilterTab::default);
    let mut editing = use_signal(|| Option::<Todo>::None);

    // Verify the session before the first credentialed fetch. The short
    // delay lets a freshly renewed access cookie become visible to the
    // request that follows.
    let _loader = use_resource({
        let session = session.clone();
        let todos = todos.clone();
        move || {
            let session = session.clone();
            let todos = todos.clone();
            async move {
                match session.check_auth().await {
                    Ok(()) => {
                        cookie_settle_delay().await;
                        if let Err(err) = todos.load().await {
                            tracing::error!("failed to load todos: {err}");
                        }
                    }
                    Err(err) => {
                        tracing::warn!("session check failed: {err}");
                        nav.replace(Route::Login {});
                    }
                }
            }
        }
    });

    // Session loss at any point sends the user back to the login page,
    // including a 401 surfaced by a later todo request.
    use_effect({
        let session = session.clone();
        move || {
            let state = session.session();
            if !state.loading && !state.authenticated {
                nav.replace(Route::Login {});
            }
        }
    });

    let on_logout = use_callback({
        let session = session.clone();
        move |_: ()| {
            let session = session.clone();
            spawn(async move {
                session.logout().await;
            });
        }
    });

    let on_create = use_callback({
        let todos = todos.clone();
        move |(title, due_date): (String, Option<DateTime<Utc>>)| {
            let todos = todos.clone();
            spawn(async move {
                let draft = TodoDraft {
                    title,
                    due_date,
                    ..TodoDraft::default()
                };
                if let Err(err) = todos.create(draft).await {
                    tracing::warn!("create failed: {err}");
                }
            });
        }
    });

    let on_toggle_complete = use_callback({
        let todos = todos.clone();
        move |id: String| {
            let todos = todos.clone();
            spawn(async move {
                if let Err(err) = todos.toggle_complete(&id).await {
                    tracing::warn!("toggle failed: {err}");
                }
            });
        }
    });

    let on_toggle_pin = use_callback({
        let todos = todos.clone();
        move |id: String| {
            let todos = todos.clone();
            spawn(async move {
                if let Err(err) = todos.toggle_pin(&id).await {
                    tracing::warn!("pin toggle failed: {err}");
                }
            });
        }
    });

    let on_delete = use_callback({
        let todos = todos.clone();
        move |id: String| {
            let todos = todos.clone();
            spawn(async move {
                if let Err(err) = todos.delete(&id).await {
                    tracing::warn!("delete failed: {err}");
                }
            });
        }
    });

    let on_edit = use_callback(move |todo: Todo| editing.set(Some(todo)));

    let on_edit_submit = use_callback({
        let todos = todos.clone();
        move |(title, due_date): (String, Option<DateTime<Utc>>)| {
            let Some(current) = editing() else {
                return;
            };
            editing.set(None);
            let todos = todos.clone();
            spawn(async move {
                let patch = TodoPatch {
                    title: Some(title),
                    due_date,
                    ..TodoPatch::default()
                };
                if let Err(err) = todos.update(&current.id, patch).await {
                    tracing::warn!("update failed: {err}");
                }
            });
        }
    });

    let state = session.session();
    if state.loading {
        return rsx! {
            div { class: "dashboard-loading", "Loading..." }
        };
    }

    let all = todos.todos();
    let (pinned, unpinned) = partition_for_display(&all, tab());
    let empty_label = match tab() {
        FilterTab::Incomplete => "Nothing to do. Add a todo above.",
        FilterTab::Completed => "Nothing completed yet.",
    };

    rsx! {
        Navbar {
            user: state.user.clone(),
            on_logout,
        }

        main {
            class: "dashboard",

            if let Some(todo) = editing() {
                section {
                    class: "edit-panel",
                    h2 { "Edit todo" }
                    TodoForm {
                        initial: todo,
                        on_submit: on_edit_submit,
                        on_cancel: move |_| editing.set(None),
                    }
                }
            } else {
                TodoForm { on_submit: on_create }
            }

            FilterTabs {
                active: tab(),
                on_select: move |selected| tab.set(selected),
            }

            if !pinned.is_empty() {
                section {
                    class: "todo-section pinned-section",
                    h2 { "Pinned" }
                    ul {
                        class: "todo-list",
                        for todo in pinned.iter() {
                            TodoItem {
                                key: "{todo.id}",
                                todo: todo.clone(),
                                on_toggle_complete,
                                on_toggle_pin,
                                on_edit,
                                on_delete,
                            }
                        }
                    }
                }
            }

            section {
                class: "todo-section",
                if unpinned.is_empty() && pinned.is_empty() {
                    p { class: "todo-empty", "{empty_label}" }
                } else {
                    ul {
                        class: "todo-list",
                        for todo in unpinned {
                            TodoItem {
                                key: "{todo.id}",
                                todo: todo.clone(),
                                on_toggle_complete,
                                on_toggle_pin,
                                on_edit,
                                on_delete,
                            }
                        }
                    }
                }
            }
        }
    }
}
