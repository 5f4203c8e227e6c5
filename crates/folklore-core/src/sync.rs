//! Local view of the remote archive and the reconciliation rules that
//! keep it eventually consistent.
//!
//! All mutation happens through the `apply_*` methods so the growth
//! detection and unread accounting stay in one place, independent of
//! how the data was fetched. The worker in `runtime` calls these after
//! each successful request; a failed request applies nothing.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::events::Notice;
use crate::models::{Notification, Pagination, Story, StoryPage};
use crate::session::Session;

/// Sync state shared between the worker (writer) and the UI (reader).
pub type SharedSyncState = Arc<RwLock<SyncState>>;

#[derive(Debug, Default)]
pub struct SyncState {
    /// Current page of stories, replaced wholesale on every load.
    pub stories: Vec<Story>,
    pub pagination: Option<Pagination>,
    /// Server-side story total at the last load. Only ever written by
    /// a story load; used solely to detect growth between polls.
    pub last_story_count: u64,
    /// Highest unread-notification count seen so far. Never decreases
    /// except via the explicit reset on login.
    pub unread_seen: usize,
    pub session: Session,
    /// Client-side category filter over the cached page (None = all).
    pub category_filter: Option<String>,
}

impl SyncState {
    pub fn with_session(session: Session) -> Self {
        Self {
            session,
            ..Self::default()
        }
    }

    /// Replace the cached page with a freshly fetched one.
    ///
    /// Returns a "new stories" notice only for non-silent loads where
    /// the server total grew past the previously seen (non-zero)
    /// total. Silent background polls update the count without ever
    /// producing a notice.
    pub fn apply_story_page(&mut self, page: StoryPage, silent: bool) -> Option<Notice> {
        let total = page.pagination.total;
        let notice = if !silent && self.last_story_count > 0 && total > self.last_story_count {
            let fresh = total - self.last_story_count;
            Some(Notice::info(format!(
                "{} new {} published",
                fresh,
                if fresh == 1 { "story" } else { "stories" }
            )))
        } else {
            None
        };

        self.stories = page.stories;
        self.pagination = Some(page.pagination);
        self.last_story_count = total;
        notice
    }

    /// Reconcile a freshly fetched notification list against the
    /// recorded unread count, returning one notice per newly unread
    /// item (exactly `unread - unread_seen` of them, oldest first).
    pub fn apply_notifications(&mut self, notifications: &[Notification]) -> Vec<Notice> {
        let unread: Vec<&Notification> = notifications.iter().filter(|n| !n.is_read).collect();
        if unread.len() <= self.unread_seen {
            // The count may legitimately shrink server-side when items
            // get read elsewhere; the recorded high-water mark stays.
            return Vec::new();
        }

        let fresh = unread.len() - self.unread_seen;
        let notices = unread
            .iter()
            .take(fresh)
            .map(|n| Notice::info(format!("💬 {}", n.content)))
            .collect();
        self.unread_seen = unread.len();
        notices
    }

    /// Reset the unread high-water mark. Called on login so the first
    /// notification check reports the full backlog.
    pub fn reset_unread_seen(&mut self) {
        self.unread_seen = 0;
    }

    pub fn current_page(&self) -> u32 {
        self.pagination.as_ref().map(|p| p.page).unwrap_or(1)
    }

    /// Cached page filtered by the active category and an optional
    /// search keyword. Both run purely against local state.
    pub fn visible_stories(&self, keyword: Option<&str>) -> Vec<Story> {
        self.stories
            .iter()
            .filter(|s| match self.category_filter.as_deref() {
                Some(cat) => s.category == cat,
                None => true,
            })
            .filter(|s| match keyword {
                Some(kw) if !kw.is_empty() => s.matches(kw),
                _ => true,
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pagination;

    fn story(id: u64, title: &str, category: &str) -> Story {
        Story {
            id,
            title: title.to_string(),
            content: format!("content of {}", title),
            category: category.to_string(),
            views: 0,
            comments_count: 0,
            evidence_count: 0,
            ai_persona: None,
            created_at: String::new(),
        }
    }

    fn page(stories: Vec<Story>, page_no: u32, total: u64) -> StoryPage {
        StoryPage {
            stories,
            pagination: Pagination {
                page: page_no,
                pages: 5,
                total,
                has_prev: page_no > 1,
                has_next: true,
                prev_page: (page_no > 1).then(|| page_no - 1),
                next_page: Some(page_no + 1),
            },
        }
    }

    fn unread(content: &str) -> Notification {
        Notification {
            id: 0,
            content: content.to_string(),
            is_read: false,
            created_at: String::new(),
        }
    }

    fn read(content: &str) -> Notification {
        Notification {
            is_read: true,
            ..unread(content)
        }
    }

    #[test]
    fn test_page_load_replaces_not_appends() {
        let mut state = SyncState::default();
        state.apply_story_page(page(vec![story(1, "a", "night_taxi")], 1, 10), false);
        state.apply_story_page(
            page(
                vec![story(2, "b", "night_taxi"), story(3, "c", "mirror_realm")],
                2,
                10,
            ),
            false,
        );

        assert_eq!(state.stories.len(), 2);
        assert_eq!(state.stories[0].id, 2);
        assert_eq!(state.current_page(), 2);
    }

    #[test]
    fn test_growth_notice_on_loud_reload() {
        let mut state = SyncState::default();
        // First load primes the count, never notifies
        assert!(state.apply_story_page(page(vec![], 1, 10), false).is_none());

        let notice = state.apply_story_page(page(vec![], 1, 13), false).unwrap();
        assert!(notice.message.contains('3'));
        assert_eq!(state.last_story_count, 13);

        // No growth, no notice
        assert!(state.apply_story_page(page(vec![], 1, 13), false).is_none());
    }

    #[test]
    fn test_silent_reload_never_notifies() {
        let mut state = SyncState::default();
        state.apply_story_page(page(vec![], 1, 10), false);
        assert!(state.apply_story_page(page(vec![], 1, 25), true).is_none());
        // Silent loads still advance the count
        assert_eq!(state.last_story_count, 25);
    }

    #[test]
    fn test_notification_delta_exactly_matches() {
        let mut state = SyncState::default();

        let first = state.apply_notifications(&[unread("one"), unread("two"), read("old")]);
        assert_eq!(first.len(), 2);
        assert_eq!(state.unread_seen, 2);

        // Same unread count again emits nothing
        assert!(state
            .apply_notifications(&[unread("one"), unread("two")])
            .is_empty());

        // One more unread emits exactly one
        let third = state.apply_notifications(&[unread("one"), unread("two"), unread("three")]);
        assert_eq!(third.len(), 1);
    }

    #[test]
    fn test_unread_seen_never_decreases() {
        let mut state = SyncState::default();
        state.apply_notifications(&[unread("a"), unread("b"), unread("c")]);
        assert_eq!(state.unread_seen, 3);

        // Items got read elsewhere; high-water mark holds
        state.apply_notifications(&[unread("a")]);
        assert_eq!(state.unread_seen, 3);

        // Only the explicit reset lowers it
        state.reset_unread_seen();
        assert_eq!(state.unread_seen, 0);
    }

    #[test]
    fn test_visible_stories_filter_and_search() {
        let mut state = SyncState::default();
        state.apply_story_page(
            page(
                vec![
                    story(1, "The Last Train", "subway_ghost"),
                    story(2, "Ward Eight", "hospital_ward"),
                    story(3, "Train to Nowhere", "subway_ghost"),
                ],
                1,
                3,
            ),
            true,
        );

        state.category_filter = Some("subway_ghost".to_string());
        assert_eq!(state.visible_stories(None).len(), 2);

        let found = state.visible_stories(Some("nowhere"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 3);

        state.category_filter = None;
        assert_eq!(state.visible_stories(None).len(), 3);
    }
}
