//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the server's schema but are defined independently, so
//! the client never links against Axum. Integration tests catch any schema
//! drift between the two crates.
//!
//! Optional request fields are skipped when `None`: the server reads an
//! absent key as "not supplied", which is different from an explicit `null`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub type TodoId = u64;

/// Importance of a todo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

/// Ordering requested from `GET /todos`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    Priority,
    DueDate,
    #[default]
    CreatedAt,
    Alphabetical,
    Completion,
}

impl SortBy {
    /// Value used for the `sortBy` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Priority => "priority",
            SortBy::DueDate => "dueDate",
            SortBy::CreatedAt => "createdAt",
            SortBy::Alphabetical => "alphabetical",
            SortBy::Completion => "completion",
        }
    }
}

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub completed: bool,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl CreateTodo {
    /// Builds a payload from raw form values, dropping an empty description
    /// so it is sent as an absent field rather than `""`.
    pub fn from_form(
        title: &str,
        description: &str,
        priority: Priority,
        due_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            title: title.to_string(),
            description: Some(description)
                .filter(|d| !d.trim().is_empty())
                .map(str::to_string),
            priority: Some(priority),
            due_date,
        }
    }
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// `Some(None)` is sent as `null` and clears the due date.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "explicit_null")]
    pub due_date: Option<Option<NaiveDate>>,
}

/// Keeps a present-but-null field as `Some(None)` instead of collapsing it.
fn explicit_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Error body returned by the server on 4xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}
