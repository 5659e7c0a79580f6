//! Add-user dialog with inline validation messages.
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::AppState;
use crate::form::FormField;
use crate::ui::components::centered_rect;

pub fn render_form_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let form = &app.form;
    let focused = form.focused();
    let mut lines: Vec<Line> = Vec::new();

    for field in FormField::ALL {
        let marker = if field == focused { "▶ " } else { "  " };
        let value = match field {
            FormField::Gender => match form.value(field) {
                "" => "< select >".to_string(),
                g => format!("< {g} >"),
            },
            _ => form.value(field).to_string(),
        };
        let cursor = if field == focused && field != FormField::Gender { "_" } else { "" };
        let label_style = if field == focused {
            Style::default().fg(app.theme.highlight_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{:<11}", format!("{}:", field.label())), label_style),
            Span::raw(format!("{value}{cursor}")),
        ]));
        match form.errors.get(&field) {
            Some(msg) => lines.push(Line::from(Span::styled(
                format!("    {msg}"),
                Style::default().fg(app.theme.error),
            ))),
            None => lines.push(Line::raw("")),
        }
    }
    lines.push(Line::from(Span::styled(
        "Tab/↑↓: field  ←→/m/f: gender  Enter: submit  Esc: cancel",
        Style::default().fg(app.theme.muted),
    )));

    let rect = centered_rect(64, lines.len() as u16 + 2, area);
    let p = Paragraph::new(lines).block(
        Block::default()
            .title("Add user")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
