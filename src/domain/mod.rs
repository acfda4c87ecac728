//! Domain module for task management.
//!
//! This module contains the task model, calendar-day helpers and the pure
//! board computations (filter, sort, due badges, timeline).

pub mod board;
pub mod calendar;
pub mod task;

pub use board::{
    BoardQuery, DEFAULT_TIMELINE_DAYS, DueBadge, DueTone, MAX_TIMELINE_DAYS, ParseOptionError,
    SortOrder, StatusCounts, StatusFilter, TimelineDay, count_by_status, due_badge, timeline,
    visible_tasks,
};
pub use task::{Task, TaskDraft, TaskId, TaskStatus, Timestamp};
