use folklore_core::models::category::CATEGORIES;
use folklore_core::models::{CategoryStat, Story, StoryDetail, User};
use folklore_core::{Notice, SharedSyncState, SyncCommand, SyncEvent, SyncHandle};
use tracing::warn;

use crate::ui::format;
use crate::ui::toasts::{Toast, ToastQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Stories,
    StoryDetail,
    Login,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing into the search box on the story list.
    Search,
    /// Typing a comment on the detail view.
    Comment,
    /// Typing into the login/register form.
    Login,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
    Email,
}

#[derive(Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub email: String,
    pub register_mode: bool,
    pub focus: usize,
}

impl LoginForm {
    pub fn fields(&self) -> &'static [LoginField] {
        if self.register_mode {
            &[LoginField::Username, LoginField::Password, LoginField::Email]
        } else {
            &[LoginField::Username, LoginField::Password]
        }
    }

    pub fn focused(&self) -> LoginField {
        let fields = self.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn focused_value_mut(&mut self) -> &mut String {
        match self.focused() {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
            LoginField::Email => &mut self.email,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields().len();
    }

    pub fn clear(&mut self) {
        *self = LoginForm {
            register_mode: self.register_mode,
            ..LoginForm::default()
        };
    }
}

/// All UI state. Story data itself lives in the shared sync state and
/// is read per frame; the app only holds presentation concerns.
pub struct App {
    pub running: bool,
    pub view: View,
    pub input_mode: InputMode,
    pub sync: SharedSyncState,
    pub handle: SyncHandle,

    pub clock: String,
    pub toasts: ToastQueue,

    pub selected: usize,
    pub search: String,
    pub comment: String,
    pub login_form: LoginForm,

    pub detail: Option<StoryDetail>,
    pub detail_scroll: u16,
    pub top_categories: Option<Vec<CategoryStat>>,

    /// Index into the filter cycle: 0 = all, then CATEGORIES order.
    pub category_index: usize,
}

impl App {
    pub fn new(sync: SharedSyncState, handle: SyncHandle) -> Self {
        Self {
            running: true,
            view: View::Stories,
            input_mode: InputMode::Normal,
            sync,
            handle,
            clock: format::clock_now(),
            toasts: ToastQueue::default(),
            selected: 0,
            search: String::new(),
            comment: String::new(),
            login_form: LoginForm::default(),
            detail: None,
            detail_scroll: 0,
            top_categories: None,
            category_index: 0,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn send(&mut self, command: SyncCommand) {
        if let Err(e) = self.handle.send(command) {
            warn!("dropping command: {}", e);
            self.notify(Notice::error("sync worker unavailable"));
        }
    }

    pub fn notify(&mut self, notice: Notice) {
        self.toasts.push(Toast::from(notice));
    }

    /// 1s tick: clock and toast expiry.
    pub fn tick(&mut self) {
        self.clock = format::clock_now();
        self.toasts.tick();
    }

    /// Stories currently visible: cached page narrowed by the category
    /// filter and the live search string.
    pub fn visible_stories(&self) -> Vec<Story> {
        let keyword = (!self.search.is_empty()).then_some(self.search.as_str());
        self.sync.read().visible_stories(keyword)
    }

    pub fn selected_story_id(&self) -> Option<u64> {
        self.visible_stories().get(self.selected).map(|s| s.id)
    }

    pub fn current_user(&self) -> Option<User> {
        self.sync.read().session.user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.sync.read().session.is_authenticated()
    }

    /// Category slug for the active filter position, None for "all".
    pub fn category_at(&self, index: usize) -> Option<&'static str> {
        if index == 0 {
            None
        } else {
            CATEGORIES.get(index - 1).copied()
        }
    }

    pub fn cycle_category(&mut self) {
        self.category_index = (self.category_index + 1) % (CATEGORIES.len() + 1);
        let filter = self.category_at(self.category_index).map(str::to_string);
        self.selected = 0;
        self.send(SyncCommand::SetCategoryFilter(filter));
    }

    pub fn handle_sync_event(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::StoriesUpdated => {
                let len = self.visible_stories().len();
                if len == 0 {
                    self.selected = 0;
                } else if self.selected >= len {
                    self.selected = len - 1;
                }
            }
            SyncEvent::StoryOpened(detail) => {
                self.detail = Some(*detail);
                self.detail_scroll = 0;
                self.comment.clear();
                if self.input_mode != InputMode::Comment {
                    self.input_mode = InputMode::Normal;
                }
                self.view = View::StoryDetail;
            }
            SyncEvent::SessionChanged(user) => {
                if user.is_some() {
                    // Leave the login form behind once a session exists
                    self.login_form.clear();
                    if self.view == View::Login {
                        self.view = View::Stories;
                        self.input_mode = InputMode::Normal;
                    }
                } else {
                    self.top_categories = None;
                    if self.view == View::Profile {
                        self.view = View::Stories;
                    }
                }
            }
            SyncEvent::TopCategories(categories) => {
                self.top_categories = Some(categories);
            }
            SyncEvent::Notice(notice) => self.notify(notice),
        }
    }
}
