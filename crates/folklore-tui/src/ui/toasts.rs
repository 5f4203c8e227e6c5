//! Transient toast line at the bottom of the screen, fed by notices
//! from the sync layer.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use folklore_core::{Notice, NoticeLevel};

/// How long each toast stays visible.
const TOAST_SECS: u64 = 3;

/// Pending toasts are capped so a burst of notices (e.g. a large
/// notification backlog) cannot queue minutes of toasts.
const MAX_PENDING: usize = 8;

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: NoticeLevel,
    shown_at: Option<Instant>,
}

impl Toast {
    pub fn icon(&self) -> &'static str {
        match self.level {
            NoticeLevel::Info => "ℹ",
            NoticeLevel::Success => "✓",
            NoticeLevel::Warning => "⚠",
            NoticeLevel::Error => "✗",
        }
    }
}

impl From<Notice> for Toast {
    fn from(notice: Notice) -> Self {
        Self {
            message: notice.message,
            level: notice.level,
            shown_at: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ToastQueue {
    pending: VecDeque<Toast>,
    current: Option<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, toast: Toast) {
        if self.current.is_none() {
            let mut toast = toast;
            toast.shown_at = Some(Instant::now());
            self.current = Some(toast);
        } else if self.pending.len() < MAX_PENDING {
            self.pending.push_back(toast);
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// Advance past expired toasts. Called from the 1s UI tick.
    pub fn tick(&mut self) {
        let expired = self
            .current
            .as_ref()
            .and_then(|t| t.shown_at)
            .map(|at| at.elapsed() >= Duration::from_secs(TOAST_SECS))
            .unwrap_or(false);
        if expired {
            self.current = None;
            if let Some(mut next) = self.pending.pop_front() {
                next.shown_at = Some(Instant::now());
                self.current = Some(next);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_toast_shows_immediately() {
        let mut q = ToastQueue::default();
        assert!(q.current().is_none());

        q.push(Toast::from(Notice::info("hello")));
        assert_eq!(q.current().unwrap().message, "hello");
    }

    #[test]
    fn test_pending_is_capped() {
        let mut q = ToastQueue::default();
        for i in 0..20 {
            q.push(Toast::from(Notice::info(format!("n{}", i))));
        }
        // One current plus at most MAX_PENDING queued
        assert_eq!(q.pending.len(), MAX_PENDING);
    }

    #[test]
    fn test_tick_keeps_fresh_toast() {
        let mut q = ToastQueue::default();
        q.push(Toast::from(Notice::error("boom")));
        q.tick();
        assert!(q.current().is_some());
    }
}
