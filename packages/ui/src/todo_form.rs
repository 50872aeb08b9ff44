use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use dioxus::prelude::*;

use store::Todo;

/// Create/edit form for a todo. In create mode (`initial` is `None`) the
/// fields are cleared after a submit; in edit mode they stay as typed and
/// a Cancel button is shown when `on_cancel` is wired.
#[component]
pub fn TodoForm(
    #[props(default)] initial: Option<Todo>,
    on_submit: EventHandler<(String, Option<DateTime<Utc>>)>,
    #[props(default)] on_cancel: Option<EventHandler<()>>,
) -> Element {
    let editing = initial.is_some();
    let mut title = use_signal(|| {
        initial
            .as_ref()
            .map(|t| t.title.clone())
            .unwrap_or_default()
    });
    let mut due = use_signal(|| {
        initial
            .as_ref()
            .and_then(|t| t.due_date)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    });
    let mut error = use_signal(|| None::<String>);

    let submit = move |event: FormEvent| {
        event.prevent_default();

        let name = title().trim().to_string();
        if name.is_empty() {
            error.set(Some("Title is required".to_string()));
            return;
        }

        let due_date = parse_due(&due());
        error.set(None);
        on_submit.call((name, due_date));

        if !editing {
            title.set(String::new());
            due.set(String::new());
        }
    };

    rsx! {
        form {
            class: "todo-form",
            onsubmit: submit,

            input {
                class: "todo-form-title",
                r#type: "text",
                placeholder: "What needs doing?",
                value: "{title}",
                oninput: move |event| title.set(event.value()),
            }
            input {
                class: "todo-form-due",
                r#type: "date",
                value: "{due}",
                oninput: move |event| due.set(event.value()),
            }

            if let Some(message) = error() {
                span { class: "form-error", "{message}" }
            }

            button {
                r#type: "submit",
                if editing { "Save" } else { "Add" }
            }
            if let Some(cancel) = on_cancel {
                button {
                    r#type: "button",
                    class: "secondary",
                    onclick: move |_| cancel.call(()),
                    "Cancel"
                }
            }
        }
    }
}

/// Parse the `<input type="date">` value. Empty or malformed input means no
/// due date; the picked day is taken as midnight UTC.
fn parse_due(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::parse_due;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_a_picked_day_as_midnight_utc() {
        let parsed = parse_due("2026-03-14").unwrap();
        assert_eq!(
            (parsed.year(), parsed.month(), parsed.day()),
            (2026, 3, 14)
        );
        assert_eq!((parsed.hour(), parsed.minute()), (0, 0));
    }

    #[test]
    fn empty_and_garbage_input_mean_no_due_date() {
        assert!(parse_due("").is_none());
        assert!(parse_due("  ").is_none());
        assert!(parse_due("not-a-date").is_none());
    }
}
