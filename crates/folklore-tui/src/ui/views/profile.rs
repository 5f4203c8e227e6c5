use folklore_core::models::category;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::{format, theme, App};

/// Archive-dossier style profile card: identity fields from the cached
/// user, interest tags from the server-side click ranking.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    match app.current_user() {
        Some(user) => {
            lines.push(field("SUBJECT", format::subject_name(&user.username)));
            lines.push(field("ID", user.subject_tag()));
            lines.push(field(
                "INCEPT",
                user.created_at
                    .as_deref()
                    .map(format::format_date)
                    .unwrap_or_else(|| "--".to_string()),
            ));
            lines.push(field("FUNCTION", user.rank_label().to_string()));
            lines.push(Line::from(""));

            match &app.top_categories {
                Some(categories) if !categories.is_empty() => {
                    lines.push(field(
                        "PROFILE",
                        category::profile_type(&categories[0].category).to_string(),
                    ));
                    let tags: Vec<String> = categories
                        .iter()
                        .map(|c| category::display_name(&c.category))
                        .collect();
                    lines.push(field("INTERESTS", tags.join(" · ")));
                }
                Some(_) => {
                    lines.push(field("PROFILE", "UNKNOWN".to_string()));
                    lines.push(field("INTERESTS", "NO DATA".to_string()));
                }
                None => {
                    lines.push(field("INTERESTS", "LOADING…".to_string()));
                }
            }
        }
        None => {
            lines.push(field("SUBJECT", "GUEST.USER".to_string()));
            lines.push(field("ID", "A-00".to_string()));
            lines.push(field("FUNCTION", "VISITOR".to_string()));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "log in to build an interest profile",
                Style::default().fg(theme::MUTED),
            )));
        }
    }

    let card = Paragraph::new(lines).block(
        Block::default()
            .title(" Subject File ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT)),
    );
    f.render_widget(card, area);
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<10}", label),
            Style::default().fg(theme::MUTED).add_modifier(Modifier::BOLD),
        ),
        Span::styled(value, Style::default().fg(theme::TEXT)),
    ])
}
