//! Sync runtime: a single worker task that owns all I/O against the
//! archive API, driven by UI commands and a fixed polling interval.
//!
//! The UI holds a `SyncHandle` for commands and an event receiver for
//! results; story data travels through the shared `SyncState`. One
//! worker means requests are serialised, so a poll can never race a
//! user-triggered load onto the same state.

use std::sync::Arc;

use anyhow::Result;
use parking_lot::RwLock;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::config::CoreConfig;
use crate::events::{Notice, SyncEvent};
use crate::session::{Session, SessionStore};
use crate::sync::{SharedSyncState, SyncState};

#[derive(Debug)]
pub enum SyncCommand {
    /// User-triggered page load (surfaces errors and growth notices).
    LoadStories { page: u32 },
    /// Fetch a story detail (and track the category click).
    OpenStory { id: u64 },
    SubmitComment { story_id: u64, content: String },
    Login { username: String, password: String },
    Register { username: String, password: String, email: String },
    Logout,
    SetCategoryFilter(Option<String>),
    FetchTopCategories,
    Shutdown,
}

#[derive(Clone)]
pub struct SyncHandle {
    command_tx: UnboundedSender<SyncCommand>,
}

impl SyncHandle {
    pub fn send(&self, command: SyncCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|e| anyhow::anyhow!("sync worker gone: {}", e))
    }
}

pub struct SyncRuntime {
    state: SharedSyncState,
    handle: SyncHandle,
    event_rx: Option<UnboundedReceiver<SyncEvent>>,
    worker: Option<JoinHandle<()>>,
}

impl SyncRuntime {
    pub fn new(config: CoreConfig) -> Result<Self> {
        let store = SessionStore::new(&config.data_dir)?;
        let session = store.load();
        let state = Arc::new(RwLock::new(SyncState::with_session(session)));

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let worker = SyncWorker {
            api: ApiClient::new(config.api_base.clone()),
            store,
            state: state.clone(),
            event_tx,
            command_rx,
            per_page: config.per_page,
            poll_interval: config.poll_interval,
        };
        let worker_handle = tokio::spawn(worker.run());

        Ok(Self {
            state,
            handle: SyncHandle { command_tx },
            event_rx: Some(event_rx),
            worker: Some(worker_handle),
        })
    }

    pub fn handle(&self) -> SyncHandle {
        self.handle.clone()
    }

    pub fn state(&self) -> SharedSyncState {
        self.state.clone()
    }

    pub fn take_event_rx(&mut self) -> Option<UnboundedReceiver<SyncEvent>> {
        self.event_rx.take()
    }

    pub async fn shutdown(&mut self) {
        let _ = self.handle.send(SyncCommand::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.await;
        }
    }
}

struct SyncWorker {
    api: ApiClient,
    store: SessionStore,
    state: SharedSyncState,
    event_tx: UnboundedSender<SyncEvent>,
    command_rx: UnboundedReceiver<SyncCommand>,
    per_page: u32,
    poll_interval: std::time::Duration,
}

impl SyncWorker {
    async fn run(mut self) {
        // Startup sequence mirrors the page load: verify any persisted
        // token, fetch the first page loudly, then do an initial
        // notification check if logged in.
        self.verify_token().await;
        self.load_stories(1, false).await;
        if self.token().is_some() {
            self.check_notifications().await;
        }

        let start = tokio::time::Instant::now() + self.poll_interval;
        let mut poll = tokio::time::interval_at(start, self.poll_interval);
        poll.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                command = self.command_rx.recv() => {
                    match command {
                        None | Some(SyncCommand::Shutdown) => {
                            info!("sync worker shutting down");
                            break;
                        }
                        Some(command) => self.handle_command(command).await,
                    }
                }
                _ = poll.tick() => {
                    let page = self.state.read().current_page();
                    debug!(page, "background refresh");
                    self.load_stories(page, true).await;
                    if self.token().is_some() {
                        self.check_notifications().await;
                    }
                }
            }
        }
    }

    async fn handle_command(&mut self, command: SyncCommand) {
        match command {
            SyncCommand::LoadStories { page } => self.load_stories(page, false).await,
            SyncCommand::OpenStory { id } => self.open_story(id).await,
            SyncCommand::SubmitComment { story_id, content } => {
                self.submit_comment(story_id, &content).await
            }
            SyncCommand::Login { username, password } => {
                self.authenticate(&username, &password, None).await
            }
            SyncCommand::Register { username, password, email } => {
                self.authenticate(&username, &password, Some(&email)).await
            }
            SyncCommand::Logout => self.logout(),
            SyncCommand::SetCategoryFilter(category) => self.set_category_filter(category).await,
            SyncCommand::FetchTopCategories => self.fetch_top_categories().await,
            SyncCommand::Shutdown => unreachable!("handled in run loop"),
        }
    }

    fn token(&self) -> Option<String> {
        self.state.read().session.token.clone()
    }

    fn emit(&self, event: SyncEvent) {
        let _ = self.event_tx.send(event);
    }

    fn notify(&self, notice: Notice) {
        self.emit(SyncEvent::Notice(notice));
    }

    /// Fetch one page and replace local state with it. Silent loads
    /// (the 30s poll) log failures without surfacing them; loud loads
    /// report once. Nothing is applied on error.
    async fn load_stories(&mut self, page: u32, silent: bool) {
        match self.api.list_stories(page, self.per_page).await {
            Ok(story_page) => {
                let notice = self.state.write().apply_story_page(story_page, silent);
                self.emit(SyncEvent::StoriesUpdated);
                if let Some(notice) = notice {
                    self.notify(notice);
                }
            }
            Err(e) => {
                warn!(page, silent, "failed to load stories: {}", e);
                if !silent {
                    self.notify(Notice::error("failed to load stories"));
                }
            }
        }
    }

    /// Compare fresh unread notifications against the recorded count
    /// and toast each newly unread item. A rejected token degrades the
    /// session instead of erroring.
    async fn check_notifications(&mut self) {
        let Some(token) = self.token() else { return };
        match self.api.notifications(&token).await {
            Ok(notifications) => {
                let notices = self.state.write().apply_notifications(&notifications);
                for notice in notices {
                    self.notify(notice);
                }
            }
            Err(e) if e.is_auth() => self.degrade_session(),
            Err(e) => warn!("notification check failed: {}", e),
        }
    }

    /// Validate a persisted token at startup. On success the cached
    /// user identity is trusted as-is (no re-fetch); on rejection the
    /// session is torn down. Transport errors leave it untouched.
    async fn verify_token(&mut self) {
        let Some(token) = self.token() else { return };
        match self.api.notifications(&token).await {
            Ok(_) => {
                let user = self.state.read().session.user.clone();
                info!("restored session from cache");
                self.emit(SyncEvent::SessionChanged(user));
            }
            Err(e) if e.is_auth() => {
                info!("persisted token rejected, clearing session");
                self.degrade_session();
            }
            Err(e) => warn!("token verification skipped: {}", e),
        }
    }

    fn degrade_session(&mut self) {
        self.state.write().session.clear();
        if let Err(e) = self.store.clear() {
            warn!("failed to remove persisted session: {}", e);
        }
        self.emit(SyncEvent::SessionChanged(None));
        self.notify(Notice::warning("session expired, please log in again"));
    }

    /// Login (email None) or register (email Some). A fresh session
    /// resets the unread mark and immediately checks notifications.
    async fn authenticate(&mut self, username: &str, password: &str, email: Option<&str>) {
        let result = match email {
            None => self.api.login(username, password).await,
            Some(email) => self.api.register(username, password, email).await,
        };
        match result {
            Ok(auth) => {
                let session = Session {
                    token: Some(auth.token),
                    user: Some(auth.user.clone()),
                };
                if let Err(e) = self.store.save(&session) {
                    warn!("failed to persist session: {}", e);
                }
                {
                    let mut state = self.state.write();
                    state.session = session;
                    state.reset_unread_seen();
                }
                self.emit(SyncEvent::SessionChanged(Some(auth.user)));
                self.notify(Notice::success(if email.is_some() {
                    "registered"
                } else {
                    "logged in"
                }));
                self.check_notifications().await;
            }
            Err(e) => {
                warn!("authentication failed: {}", e);
                self.notify(Notice::error(e.user_message()));
            }
        }
    }

    /// Clear both the in-memory and the persisted session,
    /// unconditionally.
    fn logout(&mut self) {
        self.state.write().session.clear();
        if let Err(e) = self.store.clear() {
            warn!("failed to remove persisted session: {}", e);
        }
        self.emit(SyncEvent::SessionChanged(None));
        self.notify(Notice::success("logged out"));
    }

    async fn open_story(&mut self, id: u64) {
        match self.api.story_detail(id).await {
            Ok(detail) => {
                self.track_category(&detail.story.category).await;
                self.emit(SyncEvent::StoryOpened(Box::new(detail)));
            }
            Err(e) => {
                warn!(id, "failed to load story detail: {}", e);
                self.notify(Notice::error("failed to load story"));
            }
        }
    }

    async fn submit_comment(&mut self, story_id: u64, content: &str) {
        let Some(token) = self.token() else {
            self.notify(Notice::warning("log in to comment"));
            return;
        };
        match self.api.post_comment(&token, story_id, content).await {
            Ok(()) => {
                self.notify(Notice::success("comment posted"));
                // Re-fetch so the new comment shows up in the detail view
                self.open_story(story_id).await;
            }
            Err(e) if e.is_auth() => self.degrade_session(),
            Err(e) => {
                warn!(story_id, "failed to post comment: {}", e);
                self.notify(Notice::error(e.user_message()));
            }
        }
    }

    async fn set_category_filter(&mut self, category: Option<String>) {
        self.state.write().category_filter = category.clone();
        self.emit(SyncEvent::StoriesUpdated);
        if let Some(category) = category {
            self.track_category(&category).await;
        }
    }

    /// Interest tracking is best-effort and anonymous users are
    /// skipped entirely; failures only get logged.
    async fn track_category(&self, category: &str) {
        let Some(token) = self.token() else { return };
        if let Err(e) = self.api.track_category_click(&token, category).await {
            debug!(category, "category click not tracked: {}", e);
        }
    }

    async fn fetch_top_categories(&mut self) {
        let Some(token) = self.token() else {
            self.emit(SyncEvent::TopCategories(Vec::new()));
            return;
        };
        match self.api.top_categories(&token).await {
            Ok(categories) => self.emit(SyncEvent::TopCategories(categories)),
            Err(e) if e.is_auth() => self.degrade_session(),
            Err(e) => {
                warn!("failed to fetch top categories: {}", e);
                self.emit(SyncEvent::TopCategories(Vec::new()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NoticeLevel;
    use crate::models::User;
    use crate::session::Session;
    use tempfile::tempdir;

    fn authenticated_session() -> Session {
        Session {
            token: Some("tok-abc".to_string()),
            user: Some(User {
                id: 9,
                username: "nightwatch".to_string(),
                avatar: None,
                rank: None,
                created_at: None,
            }),
        }
    }

    /// Worker with a persisted, authenticated session and no running
    /// loop, so the session-lifecycle paths can be driven directly.
    fn worker_with_session(
        dir: &std::path::Path,
        api_base: &str,
    ) -> (SyncWorker, UnboundedReceiver<SyncEvent>) {
        let store = SessionStore::new(dir).unwrap();
        store.save(&authenticated_session()).unwrap();
        let state = Arc::new(RwLock::new(SyncState::with_session(store.load())));
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (_command_tx, command_rx) = mpsc::unbounded_channel();
        let worker = SyncWorker {
            api: ApiClient::new(api_base),
            store,
            state,
            event_tx,
            command_rx,
            per_page: 8,
            poll_interval: std::time::Duration::from_secs(30),
        };
        (worker, event_rx)
    }

    #[test]
    fn test_rejected_token_clears_memory_and_disk() {
        let dir = tempdir().unwrap();
        let (mut worker, mut events) = worker_with_session(dir.path(), "http://127.0.0.1:1/api");

        worker.degrade_session();

        let state = worker.state.read();
        assert!(state.session.token.is_none());
        assert!(state.session.user.is_none());
        drop(state);
        assert!(!worker.store.load().is_authenticated());

        assert!(matches!(
            events.try_recv(),
            Ok(SyncEvent::SessionChanged(None))
        ));
        match events.try_recv() {
            Ok(SyncEvent::Notice(notice)) => assert_eq!(notice.level, NoticeLevel::Warning),
            other => panic!("expected a warning notice, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_verify_token_transport_error_keeps_session() {
        let dir = tempdir().unwrap();
        // Nothing listens here: the request fails at the transport
        // layer, which must not tear the session down
        let (mut worker, mut events) = worker_with_session(dir.path(), "http://127.0.0.1:9/api");

        worker.verify_token().await;

        assert!(worker.state.read().session.is_authenticated());
        assert!(worker.store.load().is_authenticated());
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_logout_clears_memory_and_disk_unconditionally() {
        let dir = tempdir().unwrap();
        let (mut worker, mut events) = worker_with_session(dir.path(), "http://127.0.0.1:1/api");

        worker.logout();

        assert!(!worker.state.read().session.is_authenticated());
        assert!(!worker.store.load().is_authenticated());

        assert!(matches!(
            events.try_recv(),
            Ok(SyncEvent::SessionChanged(None))
        ));
        match events.try_recv() {
            Ok(SyncEvent::Notice(notice)) => assert_eq!(notice.level, NoticeLevel::Success),
            other => panic!("expected a success notice, got {:?}", other),
        }
    }
}
