use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::app::LoginField;
use crate::ui::{theme, App};

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let form = &app.login_form;

    // Center a fixed-width column
    let [column] = Layout::horizontal([Constraint::Length(46)])
        .flex(Flex::Center)
        .areas(area);

    let field_count = form.fields().len() as u16;
    let mut constraints = vec![Constraint::Length(2)];
    constraints.extend(std::iter::repeat(Constraint::Length(3)).take(field_count as usize));
    constraints.push(Constraint::Min(0));
    let rows = Layout::vertical(constraints).split(column);

    let title = if form.register_mode { "REGISTER" } else { "LOG IN" };
    let heading = Paragraph::new(title)
        .style(Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(heading, rows[0]);

    for (i, field) in form.fields().iter().enumerate() {
        let (label, value, mask) = match field {
            LoginField::Username => ("username", form.username.clone(), false),
            LoginField::Password => ("password", form.password.clone(), true),
            LoginField::Email => ("email", form.email.clone(), false),
        };
        let shown = if mask { "*".repeat(value.len()) } else { value };
        let focused = form.focused() == *field;
        let border = if focused { theme::WARNING } else { theme::BORDER };

        let input = Paragraph::new(shown)
            .style(Style::default().fg(theme::TEXT))
            .block(
                Block::default()
                    .title(format!(" {} ", label))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            );
        f.render_widget(input, rows[1 + i]);
    }

    let hint = Paragraph::new("Ctrl+R to switch between login and register")
        .style(Style::default().fg(theme::MUTED))
        .alignment(Alignment::Center);
    f.render_widget(hint, rows[1 + field_count as usize]);
}
