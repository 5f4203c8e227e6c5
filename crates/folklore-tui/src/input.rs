use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folklore_core::{Notice, SyncCommand};

use crate::ui::{App, InputMode, View};

pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match app.input_mode {
        InputMode::Search => handle_search_key(app, key),
        InputMode::Comment => handle_comment_key(app, key),
        InputMode::Login => handle_login_key(app, key),
        InputMode::Normal => match app.view {
            View::Stories => handle_stories_key(app, key),
            View::StoryDetail => handle_detail_key(app, key),
            View::Profile => handle_profile_key(app, key),
            // The login view is always in editing mode
            View::Login => handle_login_key(app, key),
        },
    }
    Ok(())
}

fn handle_stories_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('j') | KeyCode::Down => {
            let len = app.visible_stories().len();
            if len > 0 && app.selected + 1 < len {
                app.selected += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.selected = app.selected.saturating_sub(1);
        }
        KeyCode::Enter => {
            if let Some(id) = app.selected_story_id() {
                app.send(SyncCommand::OpenStory { id });
            }
        }
        KeyCode::Char('n') | KeyCode::Right => {
            let next = {
                let state = app.sync.read();
                state
                    .pagination
                    .as_ref()
                    .filter(|p| p.has_next)
                    .map(|p| p.next_page.unwrap_or(p.page + 1))
            };
            if let Some(page) = next {
                app.selected = 0;
                app.send(SyncCommand::LoadStories { page });
            }
        }
        KeyCode::Char('p') | KeyCode::Left => {
            let prev = {
                let state = app.sync.read();
                state
                    .pagination
                    .as_ref()
                    .filter(|p| p.has_prev)
                    .map(|p| p.prev_page.unwrap_or_else(|| p.page.saturating_sub(1).max(1)))
            };
            if let Some(page) = prev {
                app.selected = 0;
                app.send(SyncCommand::LoadStories { page });
            }
        }
        KeyCode::Char('r') => {
            let page = app.sync.read().current_page();
            app.send(SyncCommand::LoadStories { page });
        }
        KeyCode::Char('c') => app.cycle_category(),
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
        }
        KeyCode::Char('l') => {
            if app.is_authenticated() {
                app.notify(Notice::info("already logged in"));
            } else {
                app.view = View::Login;
                app.input_mode = InputMode::Login;
            }
        }
        KeyCode::Char('o') => {
            if app.is_authenticated() {
                app.send(SyncCommand::Logout);
            }
        }
        KeyCode::Char('u') => {
            app.view = View::Profile;
            if app.is_authenticated() {
                app.send(SyncCommand::FetchTopCategories);
            }
        }
        KeyCode::Esc => {
            if !app.search.is_empty() {
                app.search.clear();
                app.selected = 0;
            }
        }
        _ => {}
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.search.clear();
            app.selected = 0;
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            // Keep the filter applied, leave typing mode
            app.input_mode = InputMode::Normal;
            let hits = app.visible_stories().len();
            app.notify(Notice::info(format!("{} matching stories", hits)));
        }
        KeyCode::Backspace => {
            app.search.pop();
            app.selected = 0;
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search.push(c);
            app.selected = 0;
        }
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.view = View::Stories;
            app.detail = None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.detail_scroll = app.detail_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.detail_scroll = app.detail_scroll.saturating_sub(1);
        }
        KeyCode::Char('m') => {
            if app.is_authenticated() {
                app.input_mode = InputMode::Comment;
            } else {
                app.notify(Notice::warning("log in to comment"));
            }
        }
        _ => {}
    }
}

fn handle_comment_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.comment.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            let content = app.comment.trim().to_string();
            if content.is_empty() {
                app.notify(Notice::warning("comment cannot be empty"));
                return;
            }
            if let Some(detail) = &app.detail {
                let story_id = detail.story.id;
                app.send(SyncCommand::SubmitComment { story_id, content });
            }
            app.comment.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.comment.pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.comment.push(c);
        }
        _ => {}
    }
}

fn handle_login_key(app: &mut App, key: KeyEvent) {
    // Ctrl+R flips between login and register while keeping input
    if key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.login_form.register_mode = !app.login_form.register_mode;
        app.login_form.focus = 0;
        return;
    }
    match key.code {
        KeyCode::Esc => {
            app.login_form.clear();
            app.view = View::Stories;
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Tab | KeyCode::Down => app.login_form.next_field(),
        KeyCode::Enter => submit_login(app),
        KeyCode::Backspace => {
            app.login_form.focused_value_mut().pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.login_form.focused_value_mut().push(c);
        }
        _ => {}
    }
}

fn submit_login(app: &mut App) {
    let username = app.login_form.username.trim().to_string();
    let password = app.login_form.password.trim().to_string();
    if username.is_empty() || password.is_empty() {
        app.notify(Notice::warning("username and password are required"));
        return;
    }
    if app.login_form.register_mode {
        let email = app.login_form.email.trim().to_string();
        if email.is_empty() {
            app.notify(Notice::warning("email is required to register"));
            return;
        }
        app.send(SyncCommand::Register { username, password, email });
    } else {
        app.send(SyncCommand::Login { username, password });
    }
}

fn handle_profile_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('u') => {
            app.view = View::Stories;
        }
        _ => {}
    }
}
