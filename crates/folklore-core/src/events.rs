use crate::models::{CategoryStat, StoryDetail, User};

/// Severity of a user-facing notice (the toast level in the UI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient user-visible message produced by the sync layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// Events emitted by the sync worker for the UI to consume.
#[derive(Debug)]
pub enum SyncEvent {
    /// The cached story page changed; re-read shared state and redraw.
    StoriesUpdated,
    /// A story detail finished loading.
    StoryOpened(Box<StoryDetail>),
    /// The session changed (login, logout, or token rejection).
    SessionChanged(Option<User>),
    /// The user's interest ranking arrived for the profile view.
    TopCategories(Vec<CategoryStat>),
    /// Transient toast message.
    Notice(Notice),
}
