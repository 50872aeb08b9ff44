//! Pure display logic for the dashboard: filter by the active tab, split
//! pinned from unpinned, newest first within each group.

use crate::model::Todo;

/// The dashboard's filter tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterTab {
    #[default]
    Incomplete,
    Completed,
}

/// Partition `todos` for display under the active tab. Returns
/// `(pinned, unpinned)`, each sorted by creation timestamp descending;
/// the pinned group renders above the unpinned one.
pub fn partition_for_display(todos: &[Todo], tab: FilterTab) -> (Vec<Todo>, Vec<Todo>) {
    let completed = matches!(tab, FilterTab::Completed);
    let (mut pinned, mut unpinned): (Vec<Todo>, Vec<Todo>) = todos
        .iter()
        .filter(|t| t.completed == completed)
        .cloned()
        .partition(|t| t.pinned);
    pinned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    unpinned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    (pinned, unpinned)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;

    fn todo(title: &str, completed: bool, pinned: bool, created_at: &str) -> Todo {
        Todo {
            id: title.to_lowercase(),
            title: title.to_string(),
            completed,
            due_date: None,
            pinned,
            user_id: "user-1".to_string(),
            created_at: created_at.parse::<DateTime<Utc>>().unwrap(),
        }
    }

    fn titles(todos: &[Todo]) -> Vec<&str> {
        todos.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn partitions_by_tab_and_pin() {
        let todos = vec![
            todo("A", false, true, "2024-01-01T00:00:00Z"),
            todo("B", false, false, "2024-01-01T00:00:00Z"),
            todo("C", true, true, "2024-01-01T00:00:00Z"),
        ];

        let (pinned, unpinned) = partition_for_display(&todos, FilterTab::Incomplete);
        assert_eq!(titles(&pinned), ["A"]);
        assert_eq!(titles(&unpinned), ["B"]);

        let (pinned, unpinned) = partition_for_display(&todos, FilterTab::Completed);
        assert_eq!(titles(&pinned), ["C"]);
        assert!(unpinned.is_empty());
    }

    #[test]
    fn newest_first_within_a_partition() {
        let todos = vec![
            todo("January", false, false, "2024-01-01T00:00:00Z"),
            todo("February", false, false, "2024-02-01T00:00:00Z"),
        ];

        let (pinned, unpinned) = partition_for_display(&todos, FilterTab::Incomplete);
        assert!(pinned.is_empty());
        assert_eq!(titles(&unpinned), ["February", "January"]);
    }

    #[test]
    fn empty_input_yields_empty_partitions() {
        let (pinned, unpinned) = partition_for_display(&[], FilterTab::Incomplete);
        assert!(pinned.is_empty());
        assert!(unpinned.is_empty());
    }
}
