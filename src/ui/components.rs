//! Shared UI components (pager, status bar, modal helpers).
//!
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use std::collections::{BTreeMap, BTreeSet};

use crate::app::keymap::{KeyAction, Keymap};
use crate::app::{AppState, InputMode};

/// Render `< Prev  Page N of M  Next >`, dimming buttons that are disabled.
pub fn render_pager(f: &mut Frame, area: Rect, app: &AppState) {
    let p = &app.projection;
    let enabled = Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD);
    let disabled = Style::default().fg(app.theme.muted).add_modifier(Modifier::DIM);
    let line = Line::from(vec![
        Span::styled("< Prev", if p.has_prev() { enabled } else { disabled }),
        Span::styled(
            format!("   Page {} of {}   ", p.current_page, p.page_count),
            Style::default().fg(app.theme.text),
        ),
        Span::styled("Next >", if p.has_next() { enabled } else { disabled }),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Render the bottom status bar with mode, counts and the last message.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Modal => "MODAL",
    };
    let mut msg = format!(
        "mode: {mode}  users:{}  matches:{}",
        app.store.users().len(),
        app.projection.filtered.len()
    );
    if let Some(status) = &app.status {
        msg.push_str("  | ");
        msg.push_str(status);
    }
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render a generic informational modal dialog.
pub fn render_info_modal(f: &mut Frame, area: Rect, app: &AppState, message: &str) {
    // Rough line estimate so long paths wrap inside the box
    let max_w = area.width.saturating_sub(6).max(30);
    let width = 60u16.min(max_w);
    let approx_lines = (message.len() as u16 / width.saturating_sub(4).max(10)) + 1;
    let max_h = area.height.saturating_sub(6).max(5);
    let height = (approx_lines + 4).clamp(5, max_h);
    let rect = centered_rect(width, height, area);
    let body = format!("{message}\n\nPress Enter to close");
    let p = Paragraph::new(body).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Info")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Group the keymap into display rows of (label, keys).
pub fn keybind_rows(keymap: &Keymap) -> BTreeMap<String, BTreeSet<String>> {
    let mut rows: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for ((mods, code), action) in keymap.all_bindings() {
        let label = match action {
            KeyAction::Quit => "Quit".to_string(),
            KeyAction::OpenHelp => "Help".to_string(),
            KeyAction::StartSearch => "Search".to_string(),
            KeyAction::ClearSearch => "Clear search".to_string(),
            KeyAction::NewUser => "New user".to_string(),
            KeyAction::Export => "Export to UsersData.xlsx".to_string(),
            KeyAction::SortBy(key) => format!("Sort by {}", key.field_name()),
            KeyAction::MoveUp => "Move up".to_string(),
            KeyAction::MoveDown => "Move down".to_string(),
            KeyAction::PrevPage => "Previous page".to_string(),
            KeyAction::NextPage => "Next page".to_string(),
            KeyAction::Ignore => continue,
        };
        rows.entry(label)
            .or_default()
            .insert(Keymap::format_key(mods, code));
    }
    rows
}

/// Render the scrollable help dialog listing the active keybindings.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState, scroll: u16) {
    let rows = keybind_rows(&app.keymap);
    let label_w = rows.keys().map(|k| k.chars().count()).max().unwrap_or(0);

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        "Keybindings:",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for (label, keys) in &rows {
        let joined = keys.iter().cloned().collect::<Vec<_>>().join(", ");
        lines.push(Line::from(vec![
            Span::raw(format!("  {:>width$} │ ", label, width = label_w)),
            Span::styled(joined, Style::default().add_modifier(Modifier::ITALIC)),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Add-user form:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for (label, value) in [
        ("Next / previous field", "Tab, Down / Shift+Tab, Up"),
        ("Pick gender", "Left, Right, Space, m, f"),
        ("Submit", "Enter"),
        ("Cancel", "Esc"),
    ] {
        lines.push(Line::from(vec![
            Span::raw(format!("  {:>width$} │ ", label, width = label_w)),
            Span::styled(value, Style::default().add_modifier(Modifier::ITALIC)),
        ]));
    }

    let width = area.width.saturating_sub(10).clamp(40, 70);
    let height = area.height.saturating_sub(4).clamp(8, 30);
    let rect = centered_rect(width, height, area);
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .title("Help (↑↓ scroll, any key closes)")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_clamped_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        let r = centered_rect(40, 4, area);
        assert_eq!(r.width, 20);
        assert_eq!(r.y, 3);
    }

    #[test]
    fn keybind_rows_group_keys_per_action() {
        let rows = keybind_rows(&Keymap::default());
        let up = &rows["Move up"];
        assert!(up.contains("Up"));
        assert!(up.contains("k"));
        assert!(rows.contains_key("Sort by age"));
    }
}
