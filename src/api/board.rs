//! Read-only board views computed from the full task list.
//!
//! These routes serve the same derived data the task board renders:
//! status counts, the filtered and sorted card list with due badges, and
//! the lookahead histogram of open tasks.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dto::TaskResponse;
use super::error::ApiErrorResponse;
use super::handlers::AppState;
use crate::domain::calendar::{self, format_date};
use crate::domain::{
    BoardQuery, DEFAULT_TIMELINE_DAYS, DueBadge, MAX_TIMELINE_DAYS, SortOrder, StatusCounts,
    StatusFilter, TimelineDay, count_by_status, due_badge, timeline, visible_tasks,
};

// =============================================================================
// Query Parameters
// =============================================================================

/// Query parameters of `GET /tasks/board`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardParams {
    /// `all`, `pending`, `in-progress` or `done`.
    pub filter: Option<String>,
    /// Free-text search.
    pub q: Option<String>,
    /// `created_desc`, `created_asc`, `due_asc` or `due_desc`.
    pub sort: Option<String>,
    /// Calendar day to evaluate due badges against.
    pub today: Option<String>,
}

/// Query parameters of `GET /tasks/timeline`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimelineParams {
    /// Number of days, `1..=31`.
    pub days: Option<String>,
    /// First day of the window.
    pub today: Option<String>,
}

// =============================================================================
// Response DTOs
// =============================================================================

/// A task as rendered on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCard {
    /// The task itself.
    #[serde(flatten)]
    pub task: TaskResponse,
    /// Formatted due date, or a dash when there is none.
    pub due_label: String,
    /// Due badge, absent for undated tasks.
    pub due_badge: Option<DueBadge>,
}

/// Response body of `GET /tasks/board`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardResponse {
    /// Counts over every task, ignoring filter and search.
    pub counts: StatusCounts,
    /// Visible cards in display order.
    pub tasks: Vec<BoardCard>,
}

// =============================================================================
// Parameter Parsing
// =============================================================================

fn parse_today(raw: Option<&str>) -> Result<NaiveDate, ApiErrorResponse> {
    match raw.map(str::trim).filter(|text| !text.is_empty()) {
        None => Ok(calendar::today()),
        Some(text) => NaiveDate::parse_from_str(text, calendar::DATE_KEY_FORMAT).map_err(|_| {
            ApiErrorResponse::bad_request("INVALID_DATE", format!("'{text}' is not a YYYY-MM-DD date"))
        }),
    }
}

fn parse_board_query(params: &BoardParams) -> Result<BoardQuery, ApiErrorResponse> {
    let filter = params
        .filter
        .as_deref()
        .map_or(Ok(StatusFilter::All), str::parse::<StatusFilter>)
        .map_err(|error| ApiErrorResponse::bad_request("INVALID_FILTER", error.to_string()))?;
    let sort = params
        .sort
        .as_deref()
        .map_or(Ok(SortOrder::default()), str::parse::<SortOrder>)
        .map_err(|error| ApiErrorResponse::bad_request("INVALID_SORT", error.to_string()))?;

    Ok(BoardQuery {
        filter,
        search: params.q.clone().unwrap_or_default(),
        sort,
    })
}

fn parse_days(raw: Option<&str>) -> Result<u32, ApiErrorResponse> {
    let Some(text) = raw.map(str::trim).filter(|text| !text.is_empty()) else {
        return Ok(DEFAULT_TIMELINE_DAYS);
    };

    text.parse::<u32>()
        .ok()
        .filter(|days| (1..=MAX_TIMELINE_DAYS).contains(days))
        .ok_or_else(|| {
            ApiErrorResponse::bad_request(
                "INVALID_DAYS",
                format!("days must be between 1 and {MAX_TIMELINE_DAYS}"),
            )
        })
}

// =============================================================================
// GET /tasks/board Handler
// =============================================================================

/// Returns the status counts and the visible cards.
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] on an unknown filter, sort or date, or on
/// repository failure.
pub async fn board(
    State(state): State<AppState>,
    Query(params): Query<BoardParams>,
) -> Result<Json<BoardResponse>, ApiErrorResponse> {
    let query = parse_board_query(&params)?;
    let today = parse_today(params.today.as_deref())?;

    let tasks = state.task_repository.list().await?;
    let counts = count_by_status(&tasks);
    let cards = visible_tasks(&tasks, &query)
        .into_iter()
        .map(|task| BoardCard {
            due_label: format_date(task.due_date),
            due_badge: due_badge(&task, today),
            task: TaskResponse::from(task),
        })
        .collect();

    Ok(Json(BoardResponse {
        counts,
        tasks: cards,
    }))
}

// =============================================================================
// GET /tasks/timeline Handler
// =============================================================================

/// Returns open-task counts per day for the lookahead window.
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] on an out-of-range `days`, a bad date, or
/// repository failure.
pub async fn task_timeline(
    State(state): State<AppState>,
    Query(params): Query<TimelineParams>,
) -> Result<Json<Vec<TimelineDay>>, ApiErrorResponse> {
    let days = parse_days(params.days.as_deref())?;
    let today = parse_today(params.today.as_deref())?;

    let tasks = state.task_repository.list().await?;
    Ok(Json(timeline(&tasks, today, days)))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{DueTone, TaskDraft, TaskStatus};
    use crate::infrastructure::{InMemoryTaskRepository, TaskRepository};
    use axum::http::StatusCode;
    use rstest::rstest;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    async fn seeded_state() -> AppState {
        let repository = InMemoryTaskRepository::new();
        repository
            .insert(&TaskDraft::new("Overdue report").with_due_date(date(2026, 10, 13)))
            .await
            .unwrap();
        repository
            .insert(
                &TaskDraft::new("Finished chores")
                    .with_due_date(date(2026, 10, 15))
                    .with_status(TaskStatus::Done),
            )
            .await
            .unwrap();
        repository
            .insert(&TaskDraft::new("Plan trip").with_due_date(date(2026, 10, 15)))
            .await
            .unwrap();
        repository
            .insert(&TaskDraft::new("Someday").with_status(TaskStatus::InProgress))
            .await
            .unwrap();
        AppState::new(Arc::new(repository))
    }

    #[rstest]
    #[case(None, 7)]
    #[case(Some(""), 7)]
    #[case(Some("1"), 1)]
    #[case(Some("31"), 31)]
    fn test_parse_days_valid(#[case] raw: Option<&str>, #[case] expected: u32) {
        assert_eq!(parse_days(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("32")]
    #[case("-1")]
    #[case("week")]
    fn test_parse_days_invalid(#[case] raw: &str) {
        let error = parse_days(Some(raw)).unwrap_err();
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.error.code, "INVALID_DAYS");
    }

    #[rstest]
    fn test_parse_today_rejects_garbage() {
        let error = parse_today(Some("15/10/2026")).unwrap_err();
        assert_eq!(error.error.code, "INVALID_DATE");
    }

    #[rstest]
    fn test_parse_board_query_rejects_unknown_filter() {
        let params = BoardParams {
            filter: Some("archived".to_string()),
            ..BoardParams::default()
        };
        let error = parse_board_query(&params).unwrap_err();
        assert_eq!(error.error.code, "INVALID_FILTER");
    }

    #[rstest]
    #[tokio::test]
    async fn test_board_counts_ignore_filter() {
        let state = seeded_state().await;
        let params = BoardParams {
            filter: Some("done".to_string()),
            today: Some("2026-10-15".to_string()),
            ..BoardParams::default()
        };

        let Json(response) = board(State(state), Query(params)).await.unwrap();

        assert_eq!(response.counts.total, 4);
        assert_eq!(response.counts.pending, 2);
        assert_eq!(response.tasks.len(), 1);
        let card = &response.tasks[0];
        assert_eq!(card.due_label, "Oct 15, 2026");
        assert_eq!(
            card.due_badge.as_ref().map(|badge| badge.tone),
            Some(DueTone::Done)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_board_due_sort_and_badges() {
        let state = seeded_state().await;
        let params = BoardParams {
            sort: Some("due_asc".to_string()),
            today: Some("2026-10-15".to_string()),
            ..BoardParams::default()
        };

        let Json(response) = board(State(state), Query(params)).await.unwrap();

        let titles: Vec<&str> = response
            .tasks
            .iter()
            .map(|card| card.task.title.as_str())
            .collect();
        assert_eq!(titles.first(), Some(&"Overdue report"));
        assert_eq!(titles.last(), Some(&"Someday"));

        let overdue = &response.tasks[0];
        assert_eq!(
            overdue.due_badge.as_ref().map(|badge| badge.text.as_str()),
            Some("Overdue by 2 day(s)")
        );
        let undated = &response.tasks[3];
        assert_eq!(undated.due_label, calendar::NO_DATE);
        assert!(undated.due_badge.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn test_board_card_flattens_task_fields() {
        let state = seeded_state().await;
        let params = BoardParams {
            q: Some("TRIP".to_string()),
            today: Some("2026-10-15".to_string()),
            ..BoardParams::default()
        };

        let Json(response) = board(State(state), Query(params)).await.unwrap();
        let json = serde_json::to_value(&response.tasks[0]).unwrap();

        assert_eq!(json["title"], "Plan trip");
        assert_eq!(json["due_date"], "2026-10-15");
        assert_eq!(json["due_badge"]["text"], "Due today");
        assert_eq!(json["due_badge"]["tone"], "today");
    }

    #[rstest]
    #[tokio::test]
    async fn test_timeline_counts_open_tasks_only() {
        let state = seeded_state().await;
        let params = TimelineParams {
            days: Some("3".to_string()),
            today: Some("2026-10-15".to_string()),
        };

        let Json(days) = task_timeline(State(state), Query(params)).await.unwrap();

        let counts: Vec<(String, usize)> =
            days.into_iter().map(|day| (day.date, day.count)).collect();
        assert_eq!(
            counts,
            vec![
                ("2026-10-15".to_string(), 1),
                ("2026-10-16".to_string(), 0),
                ("2026-10-17".to_string(), 0),
            ]
        );
    }
}
