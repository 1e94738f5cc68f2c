//! In-memory todo store.
//!
//! # Design
//! `TodoStore` is a plain owned value: reads take `&self`, mutations take
//! `&mut self`, and the caller decides how to share it (the HTTP layer wraps
//! one instance in `Arc<RwLock<_>>`). Records live in a `Vec` in insertion
//! order, which is the base order every stable sort starts from.
//!
//! Ids come from a high-water mark rather than the current maximum, so an id
//! is never handed out twice even after the newest record is deleted.
//! Timestamps are clamped to be strictly increasing across the store's
//! lifetime, so every mutation visibly moves `updated_at` forward.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::StoreError;
use crate::model::{NewTodo, Priority, Todo, TodoId, TodoPatch};
use crate::sort::SortBy;

pub struct TodoStore {
    todos: Vec<Todo>,
    last_id: TodoId,
    last_stamp: Option<DateTime<Utc>>,
    clock: Arc<dyn Clock>,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TodoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoStore")
            .field("len", &self.todos.len())
            .field("last_id", &self.last_id)
            .finish()
    }
}

impl TodoStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            todos: Vec::new(),
            last_id: 0,
            last_stamp: None,
            clock,
        }
    }

    /// A store pre-filled with two demo records, one of them completed.
    pub fn seeded() -> Result<Self, StoreError> {
        let mut store = Self::new();
        let demo = [
            ("Buy groceries", "Milk, eggs, bread", Priority::Medium, false),
            ("Read a book", "Finish chapter 5", Priority::Low, true),
        ];
        for (title, description, priority, done) in demo {
            let todo = store.create(NewTodo {
                title: Some(title.to_string()),
                description: Some(description.to_string()),
                priority: Some(priority),
                due_date: None,
            })?;
            if done {
                store.toggle(todo.id)?;
            }
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Snapshot of every record, ordered by `sort_by`.
    pub fn list(&self, sort_by: SortBy) -> Vec<Todo> {
        let mut todos = self.todos.clone();
        sort_by.apply(&mut todos);
        todos
    }

    pub fn get(&self, id: TodoId) -> Result<Todo, StoreError> {
        self.todos
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    pub fn create(&mut self, input: NewTodo) -> Result<Todo, StoreError> {
        let title = match input.title {
            Some(title) => validate_title(title)?,
            None => return Err(StoreError::Validation("title is required".to_string())),
        };

        let now = self.stamp();
        self.last_id += 1;
        let todo = Todo {
            id: self.last_id,
            title,
            description: input.description.unwrap_or_default(),
            completed: false,
            priority: input.priority.unwrap_or_default(),
            due_date: input.due_date,
            created_at: now,
            updated_at: now,
        };
        self.todos.push(todo.clone());
        debug!(id = todo.id, priority = ?todo.priority, "todo created");
        Ok(todo)
    }

    /// Replaces exactly the fields present in `patch`.
    pub fn update(&mut self, id: TodoId, patch: TodoPatch) -> Result<Todo, StoreError> {
        let title = patch.title.map(validate_title).transpose()?;
        let index = self.position(id)?;
        let now = self.stamp();

        let todo = &mut self.todos[index];
        if let Some(title) = title {
            todo.title = title;
        }
        if let Some(description) = patch.description {
            todo.description = description;
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        if let Some(priority) = patch.priority {
            todo.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            todo.due_date = due_date;
        }
        todo.updated_at = now;

        debug!(id, "todo updated");
        Ok(todo.clone())
    }

    pub fn toggle(&mut self, id: TodoId) -> Result<Todo, StoreError> {
        let index = self.position(id)?;
        let now = self.stamp();

        let todo = &mut self.todos[index];
        todo.completed = !todo.completed;
        todo.updated_at = now;

        debug!(id, completed = todo.completed, "todo toggled");
        Ok(todo.clone())
    }

    /// Removes the record for good and returns it.
    pub fn delete(&mut self, id: TodoId) -> Result<Todo, StoreError> {
        let index = self.position(id)?;
        let todo = self.todos.remove(index);
        debug!(id, "todo deleted");
        Ok(todo)
    }

    fn position(&self, id: TodoId) -> Result<usize, StoreError> {
        self.todos
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Current time, nudged forward if the clock has not moved past the
    /// previous stamp.
    fn stamp(&mut self) -> DateTime<Utc> {
        let mut now = self.clock.now();
        if let Some(last) = self.last_stamp {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        self.last_stamp = Some(now);
        now
    }
}

fn validate_title(title: String) -> Result<String, StoreError> {
    if title.trim().is_empty() {
        return Err(StoreError::Validation("title must not be empty".to_string()));
    }
    Ok(title)
}
