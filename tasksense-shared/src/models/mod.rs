//! Domain models for TaskSense
//!
//! This module contains the data structures exchanged with the remote task
//! service and carried through the terminal UI.
//!
//! # Models
//!
//! - `task`: Tasks, their status/urgency enums, and write payloads
//! - `user`: User accounts and authenticated sessions
//!
//! # Example
//!
//! ```no_run
//! use tasksense_shared::models::task::{TaskDraft, TaskStatus};
//!
//! let draft = TaskDraft {
//!     title: "Ship the release notes".to_string(),
//!     description: Some("Cover the new filter bar".to_string()),
//!     status: TaskStatus::Pending,
//!     due_date: None,
//! };
//! ```

pub mod task;
pub mod user;
