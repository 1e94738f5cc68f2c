//! Wire and domain types for the todo service.
//!
//! # Design
//! `Todo` is both the stored record and the JSON shape returned to clients.
//! Request payloads (`NewTodo`, `UpdateTodo`) are deserialized leniently and
//! validated by the store, so that a missing title or a `null` in a required
//! slot surfaces as a structured validation error instead of a bare serde
//! rejection.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::StoreError;

pub type TodoId = u64;

/// Importance of a todo. Serialized as `"low"`, `"medium"` or `"high"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    /// Sort rank: high first, low last.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

/// A single todo record owned by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /todos`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
}

/// Body of `PUT /todos/{id}`.
///
/// Every slot is `Option<Option<T>>`: the outer layer records whether the
/// key was present at all, the inner one whether it carried `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub completed: Option<Option<bool>>,
    #[serde(default, deserialize_with = "present")]
    pub priority: Option<Option<Priority>>,
    #[serde(default, deserialize_with = "present")]
    pub due_date: Option<Option<NaiveDate>>,
}

/// Wraps whatever the field held (including `null`) in `Some`, so that an
/// absent key stays `None` via `#[serde(default)]`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A validated set of field replacements for an existing todo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    /// `Some(None)` clears the due date.
    pub due_date: Option<Option<NaiveDate>>,
}

impl TryFrom<UpdateTodo> for TodoPatch {
    type Error = StoreError;

    fn try_from(input: UpdateTodo) -> Result<Self, Self::Error> {
        Ok(TodoPatch {
            title: required(input.title, "title")?,
            // A null description clears it back to the empty string.
            description: input.description.map(Option::unwrap_or_default),
            completed: required(input.completed, "completed")?,
            priority: required(input.priority, "priority")?,
            due_date: input.due_date,
        })
    }
}

fn required<T>(slot: Option<Option<T>>, field: &str) -> Result<Option<T>, StoreError> {
    match slot {
        None => Ok(None),
        Some(Some(value)) => Ok(Some(value)),
        Some(None) => Err(StoreError::Validation(format!("{field} cannot be null"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Todo {
        let at = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        Todo {
            id: 1,
            title: "Test Todo".to_string(),
            description: String::new(),
            completed: false,
            priority: Priority::High,
            due_date: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn todo_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["priority"], "high");
        assert_eq!(json["description"], "");
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00Z");
        assert_eq!(json["updatedAt"], "2024-01-01T00:00:00Z");
        assert!(json.get("dueDate").is_none());
    }

    #[test]
    fn todo_serializes_due_date_as_calendar_date() {
        let mut todo = sample();
        todo.due_date = NaiveDate::from_ymd_opt(2024, 1, 15);
        let json = serde_json::to_value(todo).unwrap();
        assert_eq!(json["dueDate"], "2024-01-15");
    }

    #[test]
    fn new_todo_allows_missing_fields() {
        let input: NewTodo = serde_json::from_str("{}").unwrap();
        assert!(input.title.is_none());
        assert!(input.priority.is_none());
    }

    #[test]
    fn new_todo_rejects_unknown_priority() {
        let result: Result<NewTodo, _> =
            serde_json::from_str(r#"{"title":"x","priority":"urgent"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_todo_distinguishes_absent_from_null() {
        let input: UpdateTodo =
            serde_json::from_str(r#"{"dueDate":null,"title":"New title"}"#).unwrap();
        assert_eq!(input.due_date, Some(None));
        assert_eq!(input.title, Some(Some("New title".to_string())));
        assert!(input.description.is_none());
        assert!(input.completed.is_none());
        assert!(input.priority.is_none());
    }

    #[test]
    fn patch_rejects_null_title() {
        let input: UpdateTodo = serde_json::from_str(r#"{"title":null}"#).unwrap();
        let err = TodoPatch::try_from(input).unwrap_err();
        assert_eq!(err, StoreError::Validation("title cannot be null".into()));
    }

    #[test]
    fn patch_clears_description_on_null() {
        let input: UpdateTodo =
            serde_json::from_str(r#"{"description":null,"completed":true}"#).unwrap();
        let patch = TodoPatch::try_from(input).unwrap();
        assert_eq!(patch.description.as_deref(), Some(""));
        assert_eq!(patch.completed, Some(true));
        assert!(patch.title.is_none());
    }

    #[test]
    fn update_todo_all_fields_optional() {
        let input: UpdateTodo = serde_json::from_str("{}").unwrap();
        assert!(input.title.is_none());
        assert!(input.due_date.is_none());
    }

    #[test]
    fn priority_rank_orders_high_first() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
        assert_eq!(Priority::default(), Priority::Low);
    }
}
