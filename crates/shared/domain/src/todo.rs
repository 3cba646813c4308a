//! Todo domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock;

/// Todo domain entity.
///
/// `completed_at` is `Some` exactly when `completed` is true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id: String,
    user_id: String,
    title: String,
    description: String,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Create a new, incomplete todo owned by `user_id`.
    pub fn new(id: String, user_id: String, title: String, description: String) -> Self {
        let now = clock::now();
        Self {
            id,
            user_id,
            title,
            description,
            completed: false,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Rebuild a todo from persisted state.
    ///
    /// A stray `completed_at` on an incomplete row is dropped, and a completed
    /// row without one falls back to `updated_at`.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: String,
        user_id: String,
        title: String,
        description: String,
        completed: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            user_id,
            title,
            description,
            completed,
            created_at,
            updated_at,
            completed_at: completed.then(|| completed_at.unwrap_or(updated_at)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Check ownership.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    /// Overwrite title and/or description. Empty values keep the current text.
    pub fn update(&mut self, title: &str, description: &str) {
        if !title.is_empty() {
            self.title = title.to_string();
        }
        if !description.is_empty() {
            self.description = description.to_string();
        }
        self.updated_at = clock::now();
    }

    /// Set the completion flag. `updated_at` moves even when the flag is unchanged.
    pub fn mark_complete(&mut self, completed: bool) {
        let now = clock::now();
        self.completed = completed;
        self.completed_at = completed.then_some(now);
        self.updated_at = now;
    }
}

/// Todo response returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TodoResponse {
    /// Unique todo identifier
    pub id: String,
    /// Owner identifier
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp, present only for completed todos
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&Todo> for TodoResponse {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.clone(),
            user_id: todo.user_id.clone(),
            title: todo.title.clone(),
            description: todo.description.clone(),
            completed: todo.completed,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
            completed_at: todo.completed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    fn todo() -> Todo {
        Todo::new(
            "todo-1".into(),
            "user-1".into(),
            "Buy milk".into(),
            "Two litres".into(),
        )
    }

    #[test]
    fn test_new_todo() {
        let todo = todo();

        assert_eq!(todo.id(), "todo-1");
        assert!(todo.is_owned_by("user-1"));
        assert!(!todo.is_completed());
        assert!(todo.completed_at().is_none());
        assert_eq!(todo.created_at(), todo.updated_at());
    }

    #[test]
    fn test_update_overwrites_non_empty_fields() {
        let mut todo = todo();
        let before = todo.updated_at();
        sleep(Duration::from_millis(2));

        todo.update("Buy oat milk", "");

        assert_eq!(todo.title(), "Buy oat milk");
        assert_eq!(todo.description(), "Two litres");
        assert!(todo.updated_at() > before);
    }

    #[test]
    fn test_update_with_empty_values_still_bumps_updated_at() {
        let mut todo = todo();
        let before = todo.updated_at();
        sleep(Duration::from_millis(2));

        todo.update("", "");

        assert_eq!(todo.title(), "Buy milk");
        assert_eq!(todo.description(), "Two litres");
        assert!(todo.updated_at() > before);
    }

    #[test]
    fn test_update_never_touches_completion() {
        let mut todo = todo();
        todo.mark_complete(true);
        let completed_at = todo.completed_at();

        todo.update("New title", "New description");

        assert!(todo.is_completed());
        assert_eq!(todo.completed_at(), completed_at);
    }

    #[test]
    fn test_mark_complete_then_incomplete() {
        let mut todo = todo();

        todo.mark_complete(true);
        assert!(todo.is_completed());
        assert!(todo.completed_at().is_some());

        todo.mark_complete(false);
        assert!(!todo.is_completed());
        assert!(todo.completed_at().is_none());
    }

    #[test]
    fn test_mark_complete_same_flag_bumps_updated_at() {
        let mut todo = todo();
        let before = todo.updated_at();
        sleep(Duration::from_millis(2));

        todo.mark_complete(false);

        assert!(!todo.is_completed());
        assert!(todo.updated_at() > before);
    }

    #[test]
    fn test_restore_drops_completed_at_on_incomplete_row() {
        let now = Utc::now();
        let todo = Todo::restore(
            "todo-1".into(),
            "user-1".into(),
            "t".into(),
            "d".into(),
            false,
            now,
            now,
            Some(now),
        );

        assert!(todo.completed_at().is_none());
    }

    #[test]
    fn test_restore_fills_missing_completed_at_on_completed_row() {
        let created = Utc::now();
        let updated = created + chrono::Duration::seconds(30);
        let todo = Todo::restore(
            "todo-1".into(),
            "user-1".into(),
            "t".into(),
            "d".into(),
            true,
            created,
            updated,
            None,
        );

        assert!(todo.is_completed());
        assert_eq!(todo.completed_at(), Some(updated));
    }

    #[test]
    fn test_response_omits_missing_completed_at() {
        let json = serde_json::to_value(TodoResponse::from(&todo())).unwrap();

        assert_eq!(json["completed"], false);
        assert!(json.get("completed_at").is_none());
    }
}
