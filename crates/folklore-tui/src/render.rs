use folklore_core::models::category;
use folklore_core::NoticeLevel;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::views;
use crate::ui::{theme, App, InputMode, View};

pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header: title, session, clock
        Constraint::Min(0),    // Active view
        Constraint::Length(2), // Footer: hotkeys + toast
    ])
    .split(f.area());

    render_header(f, app, chunks[0]);

    match app.view {
        View::Stories => views::stories::render(f, app, chunks[1]),
        View::StoryDetail => views::story_detail::render(f, app, chunks[1]),
        View::Login => views::login::render(f, app, chunks[1]),
        View::Profile => views::profile::render(f, app, chunks[1]),
    }

    render_footer(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            "👻 FOLKLORE ARCHIVE",
            Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  |  ", Style::default().fg(theme::MUTED)),
    ];

    match app.category_at(app.category_index) {
        Some(slug) => spans.push(Span::styled(
            category::display_name(slug),
            Style::default().fg(theme::WARNING),
        )),
        None => spans.push(Span::styled("All categories", Style::default().fg(theme::MUTED))),
    }

    spans.push(Span::styled("  |  ", Style::default().fg(theme::MUTED)));
    match app.current_user() {
        Some(user) => spans.push(Span::styled(
            format!("{} {}", user.avatar.as_deref().unwrap_or("👤"), user.username),
            Style::default().fg(theme::SUCCESS),
        )),
        None => spans.push(Span::styled("guest", Style::default().fg(theme::MUTED))),
    }

    spans.push(Span::styled("  |  ", Style::default().fg(theme::MUTED)));
    spans.push(Span::styled(app.clock.clone(), Style::default().fg(theme::TEXT)));

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT)),
    );
    f.render_widget(header, area);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints = match (app.view, app.input_mode) {
        (_, InputMode::Search) => "type to filter | Enter keep | Esc clear",
        (_, InputMode::Comment) => "type your comment | Enter post | Esc cancel",
        (View::Login, _) | (_, InputMode::Login) => {
            "Tab next field | Enter submit | Ctrl+R login/register | Esc back"
        }
        (View::Stories, _) => {
            "j/k move | Enter open | n/p page | c category | / search | l login | o logout | u profile | q quit"
        }
        (View::StoryDetail, _) => "j/k scroll | m comment | Esc back",
        (View::Profile, _) => "Esc back",
    };

    let mut lines = vec![Line::from(Span::styled(
        hints,
        Style::default().fg(theme::MUTED),
    ))];

    if let Some(toast) = app.toasts.current() {
        let color = match toast.level {
            NoticeLevel::Info => theme::ACCENT,
            NoticeLevel::Success => theme::SUCCESS,
            NoticeLevel::Warning => theme::WARNING,
            NoticeLevel::Error => theme::ERROR,
        };
        lines.push(Line::from(Span::styled(
            format!("{} {}", toast.icon(), toast.message),
            Style::default().fg(color),
        )));
    } else if app.input_mode == InputMode::Search || !app.search.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("search: {}", app.search),
            Style::default().fg(theme::WARNING),
        )));
    } else {
        lines.push(Line::from(""));
    }

    f.render_widget(Paragraph::new(lines), area);
}
