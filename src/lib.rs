//! # taskflow
//!
//! A personal task manager: a small REST service over a single `tasks`
//! table, the pure board computations that turn a task list into due badges,
//! status counts and a lookahead timeline, and a typed HTTP client.
//!
//! ## Modules
//!
//! - [`domain`]: task model, calendar-day helpers and board views
//! - [`infrastructure`]: repository trait with in-memory and `PostgreSQL` backends
//! - [`api`]: axum router, handlers and DTOs
//! - [`client`]: reqwest client used by the `taskflow` terminal board

pub mod api;
pub mod client;
pub mod domain;
pub mod infrastructure;
