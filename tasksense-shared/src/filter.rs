//! Client-side task filtering
//!
//! Filtering happens entirely on the already-fetched task list; narrowing or
//! clearing a filter never touches the network. A filter is a status
//! criterion plus a free-text search, and a task must satisfy both.

use crate::models::task::{Task, TaskStatus};

/// Status criterion of a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Match every status
    #[default]
    All,

    /// Match exactly one status
    Only(TaskStatus),
}

impl StatusFilter {
    /// Next criterion in the all → pending → in-progress → done cycle
    pub fn next(&self) -> StatusFilter {
        match self {
            StatusFilter::All => StatusFilter::Only(TaskStatus::Pending),
            StatusFilter::Only(TaskStatus::Pending) => StatusFilter::Only(TaskStatus::InProgress),
            StatusFilter::Only(TaskStatus::InProgress) => StatusFilter::Only(TaskStatus::Done),
            StatusFilter::Only(TaskStatus::Done) => StatusFilter::All,
        }
    }

    /// Human-readable label for the filter bar
    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(status) => status.label(),
        }
    }

    fn matches(&self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => task.status == *status,
        }
    }
}

/// Active dashboard filter: status criterion plus free-text search
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskFilter {
    /// Status criterion
    pub status: StatusFilter,

    /// Case-insensitive substring matched against title and description;
    /// empty means no text filtering
    pub search: String,
}

impl TaskFilter {
    /// Checks whether the filter is the match-everything default
    pub fn is_default(&self) -> bool {
        self.status == StatusFilter::All && self.search.is_empty()
    }

    /// Checks whether a single task satisfies both criteria
    pub fn matches(&self, task: &Task) -> bool {
        if !self.status.matches(task) {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }

        let needle = self.search.to_lowercase();
        if task.title.to_lowercase().contains(&needle) {
            return true;
        }
        match &task.description {
            Some(description) => description.to_lowercase().contains(&needle),
            None => false,
        }
    }

    /// Applies the filter to a fetched list, preserving order
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        tasks
            .iter()
            .filter(|task| self.matches(task))
            .cloned()
            .collect()
    }
}
