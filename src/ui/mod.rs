pub mod components;
pub mod form;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode, ModalState};

pub fn render(f: &mut Frame, app: &AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(root[1]);

    let search = match app.input_mode {
        InputMode::Search => format!("  Search: {}_", app.store.search_term()),
        _ if !app.store.search_term().is_empty() => {
            format!("  Search: {}", app.store.search_term())
        }
        _ => String::new(),
    };
    let p = Paragraph::new(format!(
        "User Details{search}  | /: search  n: new user  x: export  1-6: sort  ?: help  q: quit"
    ))
    .block(
        Block::default()
            .title("user-directory")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    )
    .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, root[0]);

    users::render_users_table(f, body[0], app);
    users::render_user_details(f, body[1], app);
    components::render_pager(f, root[2], app);
    components::render_status_bar(f, root[3], app);

    if app.modal.is_some() {
        let area = f.area();
        render_modal(f, area, app);
    }
}

fn render_modal(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.modal {
        Some(ModalState::AddUser) => form::render_form_modal(f, area, app),
        Some(ModalState::Help { scroll }) => components::render_help_modal(f, area, app, *scroll),
        Some(ModalState::Info { message }) => components::render_info_modal(f, area, app, message),
        None => {}
    }
}
