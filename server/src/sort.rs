//! Orderings for `GET /todos?sortBy=...`.
//!
//! Every ordering is applied with `slice::sort_by`, which is stable: records
//! that compare equal keep their insertion order.

use std::cmp::Ordering;
use std::sync::LazyLock;

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};

use crate::model::Todo;

/// Root-locale collator at the default (tertiary) strength.
static COLLATOR: LazyLock<Option<CollatorBorrowed<'static>>> = LazyLock::new(|| {
    Collator::try_new(Default::default(), CollatorOptions::default())
        .inspect_err(|err| tracing::warn!(%err, "collation data unavailable"))
        .ok()
});

/// Key selecting the order of a todo listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    Priority,
    DueDate,
    Alphabetical,
    Completion,
    #[default]
    CreatedAt,
}

impl SortBy {
    /// Reads a `sortBy` query value. Unknown or missing keys fall back to
    /// creation order.
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some("priority") => SortBy::Priority,
            Some("dueDate") => SortBy::DueDate,
            Some("alphabetical") => SortBy::Alphabetical,
            Some("completion") => SortBy::Completion,
            _ => SortBy::CreatedAt,
        }
    }

    pub fn compare(self, a: &Todo, b: &Todo) -> Ordering {
        match self {
            SortBy::Priority => a.priority.rank().cmp(&b.priority.rank()),
            // `None < Some(_)`: a todo without a due date sorts first, the
            // same place an empty date string would.
            SortBy::DueDate => a.due_date.cmp(&b.due_date),
            SortBy::Alphabetical => collate(&a.title, &b.title),
            SortBy::Completion => a.completed.cmp(&b.completed),
            SortBy::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }

    /// Sorts `todos` in place.
    pub fn apply(self, todos: &mut [Todo]) {
        todos.sort_by(|a, b| self.compare(a, b));
    }
}

/// Locale-aware title comparison using the root collation order: case and
/// accents only break ties between otherwise equal letters, and lowercase
/// sorts before uppercase. Collator ties fall back to code point order.
pub fn collate(a: &str, b: &str) -> Ordering {
    let ordering = match COLLATOR.as_ref() {
        Some(collator) => collator.compare(a, b),
        None => Ordering::Equal,
    };
    ordering.then_with(|| a.cmp(b))
}
