//! In-app notices.
//!
//! Failures and confirmations surface as short-lived banners at the bottom
//! of the screen instead of interrupting the current view. Notices expire
//! on their own after a few seconds and can be dismissed early with `Esc`.

use std::time::{Duration, Instant};

/// How long a notice stays visible before it expires on its own.
const NOTICE_TTL: Duration = Duration::from_secs(6);

/// Severity of a notice, used only for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A single transient message shown to the user.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
    created: Instant,
}

/// FIFO queue of active notices.
#[derive(Debug, Default)]
pub struct Notices {
    items: Vec<Notice>,
}

impl Notices {
    pub fn info(&mut self, text: impl Into<String>) {
        self.push(text.into(), NoticeLevel::Info);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(text.into(), NoticeLevel::Error);
    }

    fn push(&mut self, text: String, level: NoticeLevel) {
        self.items.push(Notice {
            text,
            level,
            created: Instant::now(),
        });
    }

    /// Drops notices older than the TTL. Called once per frame.
    pub fn expire(&mut self) {
        self.items.retain(|notice| notice.created.elapsed() < NOTICE_TTL);
    }

    /// Clears every pending notice.
    pub fn dismiss(&mut self) {
        self.items.clear();
    }

    /// The most recent notice, if any is still active.
    pub fn latest(&self) -> Option<&Notice> {
        self.items.last()
    }

    /// Number of active notices.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
