use folklore_core::constants::DEFAULT_PERSONA;
use folklore_core::models::EvidenceKind;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::{format, theme, App, InputMode};

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let Some(detail) = &app.detail else {
        let loading = Paragraph::new("opening file…").style(Style::default().fg(theme::MUTED));
        f.render_widget(loading, area);
        return;
    };

    let commenting = app.input_mode == InputMode::Comment;
    let chunks = if commenting {
        Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).split(area)
    } else {
        Layout::vertical([Constraint::Min(0)]).split(area)
    };

    let mut lines: Vec<Line> = Vec::new();

    // Byline
    lines.push(Line::from(vec![
        Span::styled(
            detail
                .story
                .ai_persona
                .clone()
                .unwrap_or_else(|| DEFAULT_PERSONA.to_string()),
            Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "  {}  ·  {} views",
                format::format_date(&detail.story.created_at),
                detail.story.views
            ),
            Style::default().fg(theme::MUTED),
        ),
    ]));
    lines.push(Line::from(""));

    // Body, one Line per paragraph so wrapping works per block
    for paragraph in detail.story.content.split('\n') {
        lines.push(Line::from(Span::styled(
            paragraph.to_string(),
            Style::default().fg(theme::TEXT),
        )));
    }

    if !detail.evidence.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "📸 EVIDENCE",
            Style::default().fg(theme::WARNING).add_modifier(Modifier::BOLD),
        )));
        for item in &detail.evidence {
            let kind = match item.kind {
                EvidenceKind::Image => "image",
                EvidenceKind::Audio => "audio",
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  [{}] ", kind), Style::default().fg(theme::MUTED)),
                Span::styled(item.file_path.clone(), Style::default().fg(theme::TEXT)),
                Span::styled(
                    if item.description.is_empty() {
                        String::new()
                    } else {
                        format!(" — {}", item.description)
                    },
                    Style::default().fg(theme::MUTED),
                ),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("💬 COMMENTS ({})", detail.comments.len()),
        Style::default().fg(theme::WARNING).add_modifier(Modifier::BOLD),
    )));
    if detail.comments.is_empty() {
        lines.push(Line::from(Span::styled(
            "  nothing yet",
            Style::default().fg(theme::MUTED),
        )));
    }
    for comment in &detail.comments {
        let author = match &comment.author.avatar {
            Some(avatar) => format!("  {} {}", comment.author.username, avatar),
            None => format!("  {}", comment.author.username),
        };
        lines.push(Line::from(vec![
            Span::styled(author, Style::default().fg(theme::SUCCESS)),
            Span::styled(
                format!("  {}", format::format_date(&comment.created_at)),
                Style::default().fg(theme::MUTED),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", comment.content),
            Style::default().fg(theme::TEXT),
        )));
    }

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0))
        .block(
            Block::default()
                .title(format!(" {} ", detail.story.title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::ACCENT)),
        );
    f.render_widget(body, chunks[0]);

    if commenting {
        let input = Paragraph::new(app.comment.clone())
            .style(Style::default().fg(theme::TEXT))
            .block(
                Block::default()
                    .title(" your take ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::WARNING)),
            );
        f.render_widget(input, chunks[1]);
    }
}
