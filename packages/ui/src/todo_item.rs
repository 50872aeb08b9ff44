use dioxus::prelude::*;

use store::Todo;

/// A single todo row. Emits intents only; the dashboard owns the mutations.
#[component]
pub fn TodoItem(
    todo: Todo,
    on_toggle_complete: EventHandler<String>,
    on_toggle_pin: EventHandler<String>,
    on_edit: EventHandler<Todo>,
    on_delete: EventHandler<String>,
) -> Element {
    let due_label = todo
        .due_date
        .map(|d| d.format("Due %b %e, %Y").to_string());
    let toggle_id = todo.id.clone();
    let pin_id = todo.id.clone();
    let delete_id = todo.id.clone();
    let edit_todo = todo.clone();

    rsx! {
        li {
            class: "todo-item",
            class: if todo.pinned { "pinned" },
            class: if todo.completed { "completed" },

            input {
                r#type: "checkbox",
                checked: todo.completed,
                onchange: move |_| on_toggle_complete.call(toggle_id.clone()),
            }

            div {
                class: "todo-body",
                span { class: "todo-title", "{todo.title}" }
                if let Some(due) = due_label {
                    span { class: "todo-due", "{due}" }
                }
            }

            div {
                class: "todo-actions",
                button {
                    class: "icon",
                    title: if todo.pinned { "Unpin" } else { "Pin" },
                    onclick: move |_| on_toggle_pin.call(pin_id.clone()),
                    if todo.pinned { "★" } else { "☆" }
                }
                button {
                    class: "secondary",
                    onclick: move |_| on_edit.call(edit_todo.clone()),
                    "Edit"
                }
                button {
                    class: "danger",
                    onclick: move |_| on_delete.call(delete_id.clone()),
                    "Delete"
                }
            }
        }
    }
}
