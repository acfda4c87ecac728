//! Task domain model.
//!
//! A task is one row of the `tasks` table: a title, an optional description,
//! an optional due date expressed as a calendar day, and a status.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Value Objects - Newtypes
// =============================================================================

/// Unique identifier for a task.
///
/// Identifiers are assigned by the store on insert and grow strictly, so
/// ordering by id is ordering by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Parses an identifier from a path segment.
    ///
    /// Returns `None` for anything that is not a positive integer.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        text.trim()
            .parse::<i64>()
            .ok()
            .filter(|value| *value > 0)
            .map(Self)
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A timestamp wrapper for `DateTime<Utc>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a `Timestamp` from a `DateTime<Utc>`.
    #[must_use]
    pub const fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// Returns the inner `DateTime<Utc>`.
    #[must_use]
    pub const fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the current time.
    ///
    /// **Note**: This is an impure function (side effect: system clock).
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0.format("%Y-%m-%d %H:%M:%S UTC"))
    }
}

// =============================================================================
// Enums
// =============================================================================

/// The status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TaskStatus {
    /// Task has not been started yet.
    #[default]
    #[serde(rename = "pending")]
    Pending,
    /// Task is currently being worked on.
    #[serde(rename = "in-progress")]
    InProgress,
    /// Task is finished.
    #[serde(rename = "done")]
    Done,
}

impl TaskStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Done];

    /// Returns the wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }

    /// Parses the wire representation. Matching is exact.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == text)
    }

    /// Returns `true` for finished tasks.
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(formatter, "Pending"),
            Self::InProgress => write!(formatter, "In Progress"),
            Self::Done => write!(formatter, "Done"),
        }
    }
}

// =============================================================================
// Task
// =============================================================================

/// A stored task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Title of the task.
    pub title: String,
    /// Optional detailed description.
    pub description: Option<String>,
    /// Calendar day the task is due, if any.
    pub due_date: Option<NaiveDate>,
    /// Current status of the task.
    pub status: TaskStatus,
    /// When the row was inserted.
    pub created_at: Timestamp,
}

impl Task {
    /// Creates a pending task with no description or due date.
    #[must_use]
    pub fn new(id: TaskId, title: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            due_date: None,
            status: TaskStatus::Pending,
            created_at,
        }
    }

    /// Builds the stored form of a draft.
    ///
    /// A draft without a status becomes pending.
    #[must_use]
    pub fn from_draft(id: TaskId, draft: TaskDraft, created_at: Timestamp) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            status: draft.status.unwrap_or_default(),
            created_at,
        }
    }

    /// Returns a new task with the given description.
    #[must_use]
    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..self
        }
    }

    /// Returns a new task with the given due date.
    #[must_use]
    pub fn with_due_date(self, due_date: NaiveDate) -> Self {
        Self {
            due_date: Some(due_date),
            ..self
        }
    }

    /// Returns a new task with the given status.
    #[must_use]
    pub fn with_status(self, status: TaskStatus) -> Self {
        Self { status, ..self }
    }

    /// Applies a draft as a full replacement.
    ///
    /// Title, description and due date are always overwritten; the status is
    /// only overwritten when the draft carries one.
    #[must_use]
    pub fn apply(self, draft: TaskDraft) -> Self {
        Self {
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            status: draft.status.unwrap_or(self.status),
            ..self
        }
    }

    /// Returns `true` when `needle` occurs in the title or description,
    /// ignoring case. `needle` must already be lowercase.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(needle))
    }

    /// Returns `true` if the task is finished.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.status.is_done()
    }
}

/// Validated write model shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskDraft {
    /// Non-empty, trimmed title.
    pub title: String,
    /// Description, `None` when blank.
    pub description: Option<String>,
    /// Due calendar day.
    pub due_date: Option<NaiveDate>,
    /// Requested status; `None` means "pending" on create and "unchanged" on update.
    pub status: Option<TaskStatus>,
}

impl TaskDraft {
    /// Creates a draft with only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..self
        }
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(self, due_date: NaiveDate) -> Self {
        Self {
            due_date: Some(due_date),
            ..self
        }
    }

    /// Sets the status.
    #[must_use]
    pub fn with_status(self, status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..self
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
