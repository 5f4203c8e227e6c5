use folklore_core::constants::DEFAULT_PERSONA;
use folklore_core::models::category;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::ui::{format, theme, App};

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Min(0),    // Story list
        Constraint::Length(1), // Pagination line
    ])
    .split(area);

    render_list(f, app, chunks[0]);
    render_pagination(f, app, chunks[1]);
}

fn render_list(f: &mut Frame, app: &App, area: Rect) {
    let stories = app.visible_stories();

    if stories.is_empty() {
        let empty = if app.search.is_empty() {
            "No files in the archive yet."
        } else {
            "No stories match the search."
        };
        let placeholder = Paragraph::new(empty)
            .style(Style::default().fg(theme::MUTED))
            .block(list_block());
        f.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = stories
        .iter()
        .map(|story| {
            let title_line = Line::from(vec![
                Span::styled(
                    format!("👻 {}", story.title),
                    Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(
                        "  👁 {}  💬 {}  📸 {}",
                        story.views, story.comments_count, story.evidence_count
                    ),
                    Style::default().fg(theme::MUTED),
                ),
            ]);
            let meta_line = Line::from(vec![
                Span::styled(
                    category::display_name(&story.category),
                    Style::default().fg(theme::WARNING),
                ),
                Span::styled(" · ", Style::default().fg(theme::MUTED)),
                Span::styled(
                    story.ai_persona.clone().unwrap_or_else(|| DEFAULT_PERSONA.to_string()),
                    Style::default().fg(theme::ACCENT),
                ),
                Span::styled(" · ", Style::default().fg(theme::MUTED)),
                Span::styled(
                    format::format_date(&story.created_at),
                    Style::default().fg(theme::MUTED),
                ),
            ]);
            let preview_line = Line::from(Span::styled(
                story.preview(),
                Style::default().fg(theme::MUTED),
            ));
            ListItem::new(vec![title_line, meta_line, preview_line, Line::from("")])
        })
        .collect();

    let list = List::new(items)
        .block(list_block())
        .highlight_style(Style::default().bg(theme::SELECTED_BG));

    let mut state = ListState::default();
    state.select(Some(app.selected.min(stories.len() - 1)));
    f.render_stateful_widget(list, area, &mut state);
}

fn list_block() -> Block<'static> {
    Block::default()
        .title(" Case Files ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER))
}

fn render_pagination(f: &mut Frame, app: &App, area: Rect) {
    let state = app.sync.read();
    let line = match &state.pagination {
        Some(p) => {
            let prev = if p.has_prev { "◀ p" } else { "   " };
            let next = if p.has_next { "n ▶" } else { "   " };
            format!(
                "{}  page {} / {}  {}   ({} stories archived)",
                prev, p.page, p.pages.max(1), next, p.total
            )
        }
        None => "loading…".to_string(),
    };
    let widget = Paragraph::new(Span::styled(line, Style::default().fg(theme::MUTED)))
        .alignment(ratatui::layout::Alignment::Center);
    f.render_widget(widget, area);
}
