use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use crate::app::AppState;
use crate::model::{SortDirection, SortKey};

/// Table columns and the field each one sorts by.
const COLUMNS: [(&str, SortKey); 6] = [
    ("ID", SortKey::Id),
    ("Name", SortKey::FirstName),
    ("Email", SortKey::Email),
    ("Gender", SortKey::Gender),
    ("Age", SortKey::Age),
    ("City", SortKey::City),
];

fn header_label(app: &AppState, idx: usize, label: &str, key: SortKey) -> String {
    let cfg = app.store.sort_config();
    let arrow = match (cfg.key == Some(key), cfg.direction) {
        (true, SortDirection::Asc) => " ▲",
        (true, SortDirection::Desc) => " ▼",
        (false, _) => "",
    };
    format!("{}:{label}{arrow}", idx + 1)
}

pub fn render_users_table(f: &mut Frame, area: Rect, app: &AppState) {
    let rows = app.projection.page.iter().map(|u| {
        Row::new(vec![
            Cell::from(u.id.to_string()),
            Cell::from(u.full_name()),
            Cell::from(u.email.clone()),
            Cell::from(u.gender.as_str()),
            Cell::from(u.age.to_string()),
            Cell::from(u.city.clone()),
        ])
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Length(22),
        Constraint::Min(20),
        Constraint::Length(10),
        Constraint::Length(7),
        Constraint::Length(14),
    ];

    let header = Row::new(
        COLUMNS
            .iter()
            .enumerate()
            .map(|(i, (label, key))| header_label(app, i, label, *key))
            .collect::<Vec<_>>(),
    )
    .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));

    let title = if app.projection.filtered.len() == app.store.users().len() {
        format!("Users ({})", app.store.users().len())
    } else {
        format!("Users ({} of {})", app.projection.filtered.len(), app.store.users().len())
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .style(Style::default().fg(app.theme.text))
        .row_highlight_style(
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD),
        )
        .column_spacing(1);

    let mut state = TableState::default();
    if !app.projection.page.is_empty() {
        state.select(Some(app.selected_row));
    }
    f.render_stateful_widget(table, area, &mut state);
}

pub fn render_user_details(f: &mut Frame, area: Rect, app: &AppState) {
    let text = match app.selected_user() {
        Some(u) => format!(
            "ID: {}\nFirst name: {}\nLast name: {}\nEmail: {}\nGender: {}\nAge: {}\nCity: {}",
            u.id,
            u.first_name,
            u.last_name,
            u.email,
            u.gender.as_str(),
            u.age,
            u.city
        ),
        None => "No users".to_string(),
    };
    let p = Paragraph::new(text).style(Style::default().fg(app.theme.text)).block(
        Block::default()
            .title("Details")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(p, area);
}
