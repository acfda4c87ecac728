//! API module for HTTP handlers.
//!
//! This module contains route definitions and request/response handlers.

pub mod board;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use board::{BoardCard, BoardResponse, board, task_timeline};
pub use dto::{DeleteResponse, TaskRequest, TaskResponse, validate_task_request};
pub use error::{ApiError, ApiErrorResponse, FieldError, ValidationError};
pub use extract::JsonBody;
pub use handlers::{
    AppState, HealthResponse, create_task, delete_task, get_task, health_check, list_tasks,
    update_task,
};

/// Builds the application router with tracing and permissive CORS.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/board", get(board))
        .route("/tasks/timeline", get(task_timeline))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
