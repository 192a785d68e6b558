//! Task model and write payloads
//!
//! This module provides the Task model representing a single to-do item owned
//! by a user, plus the payload types used to create and update task rows on
//! the remote service.
//!
//! Status moves freely between the three workflow states; urgency is assigned
//! by the classification service when a task is created and re-assessed
//! whenever its wording changes.
//!
//! # Schema (owned by the task service)
//!
//! ```sql
//! CREATE TABLE tasks (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     user_id UUID NOT NULL REFERENCES auth.users(id) ON DELETE CASCADE,
//!     title TEXT NOT NULL,
//!     description TEXT,
//!     status TEXT NOT NULL DEFAULT 'pending'
//!         CHECK (status IN ('pending', 'in-progress', 'done')),
//!     urgency TEXT CHECK (urgency IN ('low', 'medium', 'high')),
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     due_date TIMESTAMPTZ
//! );
//! ```
//!
//! Row-level security on the table scopes every read and write to the
//! authenticated user, so list queries never filter by `user_id` explicitly.
//!
//! # Example
//!
//! ```
//! use tasksense_shared::models::task::{TaskDraft, TaskPatch, TaskStatus, Urgency};
//!
//! let draft = TaskDraft {
//!     title: "Renew the domain".to_string(),
//!     description: None,
//!     status: TaskStatus::Pending,
//!     due_date: None,
//! };
//!
//! let patch = TaskPatch::from_draft(&draft).with_urgency(Urgency::High);
//! assert_eq!(patch.status, Some(TaskStatus::Pending));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Workflow status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Task has not been started
    Pending,

    /// Task is actively being worked on
    InProgress,

    /// Task is finished
    Done,
}

impl TaskStatus {
    /// All statuses in workflow order
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Done,
    ];

    /// Converts status to the wire string stored by the task service
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Done => "done",
        }
    }

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }

    /// Next status in the pending → in-progress → done cycle (wraps around)
    pub fn next(&self) -> TaskStatus {
        match self {
            TaskStatus::Pending => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::Pending,
        }
    }

    /// Checks if the task no longer needs attention
    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

/// Urgency assigned by the classification service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// Can wait
    Low,

    /// Should be handled soon
    Medium,

    /// Needs attention now
    High,
}

impl Urgency {
    /// Converts urgency to the wire string stored by the task service
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Low => "Low",
            Urgency::Medium => "Medium",
            Urgency::High => "High",
        }
    }
}

/// Task model representing one to-do item
///
/// Decoded directly from service rows; a row whose `status` or `urgency`
/// string falls outside the schema check constraints fails to decode rather
/// than leaking an invalid value into the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// User who owns the task
    pub user_id: Uuid,

    /// Short title shown on the task card
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Current workflow status
    pub status: TaskStatus,

    /// AI-assigned urgency (null until classified)
    pub urgency: Option<Urgency>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
}

impl Task {
    /// Checks whether the task is past its due date and not yet done
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.due_date {
            Some(due) => due < now && !self.status.is_done(),
            None => false,
        }
    }
}

/// User-editable task fields collected by the task form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct TaskDraft {
    /// Task title (required)
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    /// Optional description (empty input maps to `None`)
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    /// Workflow status selected in the form
    pub status: TaskStatus,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskDraft {
    /// Pre-fills a draft from an existing task for editing
    pub fn from_task(task: &Task) -> Self {
        TaskDraft {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            due_date: task.due_date,
        }
    }

    /// Checks whether title or description differ from an existing task
    ///
    /// Urgency is re-assessed only when this is true; status and due date
    /// changes alone never trigger re-classification.
    pub fn differs_in_text(&self, task: &Task) -> bool {
        self.title != task.title || self.description != task.description
    }
}

/// Insert payload for creating a task row
///
/// Carries the owner explicitly because the service checks it against the
/// authenticated user, and carries the urgency produced by classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTaskRecord {
    /// User who will own the row
    pub user_id: Uuid,

    /// Task title
    pub title: String,

    /// Optional description (serialized as `null` when absent)
    pub description: Option<String>,

    /// Initial workflow status
    pub status: TaskStatus,

    /// Urgency assigned before insert
    pub urgency: Urgency,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
}

impl NewTaskRecord {
    /// Builds the insert payload from a draft plus owner and urgency
    pub fn from_draft(draft: TaskDraft, user_id: Uuid, urgency: Urgency) -> Self {
        NewTaskRecord {
            user_id,
            title: draft.title,
            description: draft.description,
            status: draft.status,
            urgency,
            due_date: draft.due_date,
        }
    }
}

/// Partial update payload for PATCH requests
///
/// Only fields set to `Some` are serialized, so a status-only change sends
/// exactly `{"status": "..."}` over the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskPatch {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// New description; `Some(None)` clears it, outer `None` leaves it alone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,

    /// New workflow status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,

    /// New urgency (set when the wording changed and was re-classified)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,

    /// New due date; `Some(None)` clears it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl TaskPatch {
    /// Full-form patch carrying every editable field from a draft
    pub fn from_draft(draft: &TaskDraft) -> Self {
        TaskPatch {
            title: Some(draft.title.clone()),
            description: Some(draft.description.clone()),
            status: Some(draft.status),
            urgency: None,
            due_date: Some(draft.due_date),
        }
    }

    /// Patch that changes only the workflow status
    pub fn status_only(status: TaskStatus) -> Self {
        TaskPatch {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Attaches a re-assessed urgency to the patch
    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = Some(urgency);
        self
    }
}
