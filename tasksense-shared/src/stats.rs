//! Aggregate task counts for the dashboard header

use crate::models::task::{Task, TaskStatus};

/// Per-status counts over the full (unfiltered) task list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl TaskStats {
    /// Counts tasks by status
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut stats = TaskStats::default();
        for task in tasks {
            stats.total += 1;
            match task.status {
                TaskStatus::Pending => stats.pending += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Done => stats.done += 1,
            }
        }
        stats
    }

    /// Share of tasks done, as a whole percentage (0 when the list is empty)
    pub fn completion_percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.done * 100) / self.total) as u8
    }
}
