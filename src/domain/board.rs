//! Board view computations.
//!
//! Everything the task board shows is derived here from an in-memory slice
//! of tasks: the visible list after filter, search and sort, the per-status
//! counts, the due badge on each card and the lookahead timeline. All
//! functions are pure; "today" is always passed in.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::calendar::{date_key, days_until, format_date, short_label};
use super::task::{Task, TaskStatus};

/// Number of days shown on the timeline unless asked otherwise.
pub const DEFAULT_TIMELINE_DAYS: u32 = 7;

/// Upper bound accepted for the timeline window.
pub const MAX_TIMELINE_DAYS: u32 = 31;

// =============================================================================
// Options
// =============================================================================

/// Error for unrecognised filter or sort names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseOptionError {
    /// Unknown status filter.
    #[error("unknown filter '{0}', expected one of: all, pending, in-progress, done")]
    Filter(String),
    /// Unknown sort order.
    #[error("unknown sort '{0}', expected one of: created_desc, created_asc, due_asc, due_desc")]
    Sort(String),
}

/// Which statuses are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Every task.
    #[default]
    All,
    /// Only tasks with the given status.
    Only(TaskStatus),
}

impl StatusFilter {
    /// Returns `true` if `task` passes the filter.
    #[must_use]
    pub fn accepts(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => task.status == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseOptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        TaskStatus::parse(&value.to_lowercase())
            .map(Self::Only)
            .ok_or_else(|| ParseOptionError::Filter(value.to_string()))
    }
}

/// Order of the visible list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Newest first (highest id first).
    #[default]
    CreatedDesc,
    /// Oldest first.
    CreatedAsc,
    /// Earliest due date first; undated tasks last.
    DueAsc,
    /// Latest due date first; undated tasks last.
    DueDesc,
}

impl SortOrder {
    fn compare(self, left: &Task, right: &Task) -> Ordering {
        match self {
            Self::CreatedDesc => right.id.cmp(&left.id),
            Self::CreatedAsc => left.id.cmp(&right.id),
            Self::DueAsc => compare_due(left.due_date, right.due_date, |a, b| a.cmp(&b)),
            Self::DueDesc => compare_due(left.due_date, right.due_date, |a, b| b.cmp(&a)),
        }
    }
}

/// Compares optional due dates, always placing undated tasks last.
fn compare_due(
    left: Option<NaiveDate>,
    right: Option<NaiveDate>,
    dated: impl Fn(NaiveDate, NaiveDate) -> Ordering,
) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => dated(left, right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl FromStr for SortOrder {
    type Err = ParseOptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "created_desc" | "newest" => Ok(Self::CreatedDesc),
            "created_asc" | "oldest" => Ok(Self::CreatedAsc),
            "due_asc" => Ok(Self::DueAsc),
            "due_desc" => Ok(Self::DueDesc),
            _ => Err(ParseOptionError::Sort(value.to_string())),
        }
    }
}

/// Filter, search and sort settings of the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardQuery {
    /// Status filter.
    pub filter: StatusFilter,
    /// Free-text search over title and description.
    pub search: String,
    /// Sort order.
    pub sort: SortOrder,
}

// =============================================================================
// Visible list
// =============================================================================

/// Applies filter, search and sort, in that order.
///
/// The search is trimmed and case-insensitive; a blank search matches all
/// tasks. Sorting is stable, so equal keys keep their incoming order.
#[must_use]
pub fn visible_tasks(tasks: &[Task], query: &BoardQuery) -> Vec<Task> {
    let needle = query.search.trim().to_lowercase();

    let mut visible: Vec<Task> = tasks
        .iter()
        .filter(|task| query.filter.accepts(task))
        .filter(|task| needle.is_empty() || task.matches_search(&needle))
        .cloned()
        .collect();

    visible.sort_by(|left, right| query.sort.compare(left, right));
    visible
}

// =============================================================================
// Counts
// =============================================================================

/// Number of tasks per status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    /// All tasks.
    pub total: usize,
    /// Pending tasks.
    pub pending: usize,
    /// In-progress tasks.
    pub in_progress: usize,
    /// Finished tasks.
    pub done: usize,
}

impl StatusCounts {
    /// Count for a single status.
    #[must_use]
    pub const fn for_status(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Pending => self.pending,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Done => self.done,
        }
    }
}

/// Counts tasks by status over the full, unfiltered list.
#[must_use]
pub fn count_by_status(tasks: &[Task]) -> StatusCounts {
    tasks
        .iter()
        .fold(StatusCounts::default(), |mut counts, task| {
            counts.total += 1;
            match task.status {
                TaskStatus::Pending => counts.pending += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Done => counts.done += 1,
            }
            counts
        })
}

// =============================================================================
// Due badge
// =============================================================================

/// Visual tone of a due badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueTone {
    /// Task is finished.
    Done,
    /// Due date has passed.
    Overdue,
    /// Due today.
    Today,
    /// Due in the future.
    Left,
}

/// Human-readable due status of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueBadge {
    /// Text shown on the card.
    pub text: String,
    /// Tone used for styling.
    pub tone: DueTone,
}

/// Derives the due badge of a task relative to `today`.
///
/// Returns `None` for tasks without a due date.
#[must_use]
pub fn due_badge(task: &Task, today: NaiveDate) -> Option<DueBadge> {
    let due = task.due_date?;

    if task.is_done() {
        return Some(DueBadge {
            text: format!("Completed on {}", format_date(Some(due))),
            tone: DueTone::Done,
        });
    }

    let days = days_until(due, today);
    let badge = match days.cmp(&0) {
        Ordering::Less => DueBadge {
            text: format!("Overdue by {} day(s)", days.unsigned_abs()),
            tone: DueTone::Overdue,
        },
        Ordering::Equal => DueBadge {
            text: "Due today".to_string(),
            tone: DueTone::Today,
        },
        Ordering::Greater => DueBadge {
            text: format!("{days} day(s) left"),
            tone: DueTone::Left,
        },
    };
    Some(badge)
}

// =============================================================================
// Timeline
// =============================================================================

/// One bucket of the lookahead timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineDay {
    /// `YYYY-MM-DD` key of the day.
    pub date: String,
    /// Short label such as `Oct 15`.
    pub label: String,
    /// Open tasks due that day.
    pub count: usize,
}

/// Buckets open tasks by due day for `days` consecutive days from `today`.
///
/// Finished tasks and tasks due outside the window are not counted.
#[must_use]
pub fn timeline(tasks: &[Task], today: NaiveDate, days: u32) -> Vec<TimelineDay> {
    (0..days)
        .filter_map(|offset| today.checked_add_days(Days::new(u64::from(offset))))
        .map(|day| TimelineDay {
            date: date_key(day),
            label: short_label(day),
            count: tasks
                .iter()
                .filter(|task| !task.is_done() && task.due_date == Some(day))
                .count(),
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
