use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::time::Duration;

use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode, ModalState};
use crate::ui;

/// What the loop should do after a key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, &*app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key) == Flow::Quit {
                    tracing::info!("quit requested");
                    return Ok(());
                }
            }
        }
    }
}

/// Apply one key press to the app.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Flow {
    match app.input_mode {
        InputMode::Normal => handle_normal(app, key),
        InputMode::Search => {
            handle_search(app, key);
            Flow::Continue
        }
        InputMode::Modal => {
            handle_modal(app, key);
            Flow::Continue
        }
    }
}

fn handle_normal(app: &mut AppState, key: KeyEvent) -> Flow {
    let Some(action) = app.keymap.resolve(&key) else {
        return Flow::Continue;
    };
    match action {
        KeyAction::Quit => return Flow::Quit,
        KeyAction::StartSearch => app.input_mode = InputMode::Search,
        KeyAction::ClearSearch => {
            if !app.store.search_term().is_empty() {
                app.set_search(String::new());
            }
        }
        KeyAction::NewUser => {
            app.form.reset();
            app.modal = Some(ModalState::AddUser);
            app.input_mode = InputMode::Modal;
        }
        KeyAction::Export => app.export(),
        KeyAction::OpenHelp => {
            app.modal = Some(ModalState::Help { scroll: 0 });
            app.input_mode = InputMode::Modal;
        }
        KeyAction::SortBy(key) => app.sort_by(key),
        KeyAction::MoveUp => app.selected_row = app.selected_row.saturating_sub(1),
        KeyAction::MoveDown => {
            if app.selected_row + 1 < app.projection.page.len() {
                app.selected_row += 1;
            }
        }
        KeyAction::PrevPage => app.prev_page(),
        KeyAction::NextPage => app.next_page(),
        KeyAction::Ignore => {}
    }
    Flow::Continue
}

fn handle_search(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.set_search(String::new());
        }
        KeyCode::Backspace => {
            let mut term = app.store.search_term().to_string();
            if term.pop().is_some() {
                app.set_search(term);
            }
        }
        KeyCode::Char(c) => {
            let mut term = app.store.search_term().to_string();
            term.push(c);
            app.set_search(term);
        }
        _ => {}
    }
}

fn close_modal(app: &mut AppState) {
    app.modal = None;
    app.input_mode = InputMode::Normal;
}

fn handle_modal(app: &mut AppState, key: KeyEvent) {
    match app.modal.clone() {
        Some(ModalState::AddUser) => handle_form(app, key),
        Some(ModalState::Help { scroll }) => match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                app.modal = Some(ModalState::Help { scroll: scroll.saturating_sub(1) })
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.modal = Some(ModalState::Help { scroll: scroll.saturating_add(1) })
            }
            _ => close_modal(app),
        },
        Some(ModalState::Info { .. }) => match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q') => {
                close_modal(app)
            }
            _ => {}
        },
        None => app.input_mode = InputMode::Normal,
    }
}

fn handle_form(app: &mut AppState, key: KeyEvent) {
    use crate::form::FormField;
    match key.code {
        KeyCode::Esc => {
            app.form.reset();
            close_modal(app);
        }
        KeyCode::Tab | KeyCode::Down => app.form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus_prev(),
        KeyCode::Left if app.form.focused() == FormField::Gender => app.form.cycle_gender(false),
        KeyCode::Right if app.form.focused() == FormField::Gender => app.form.cycle_gender(true),
        KeyCode::Backspace => app.form.backspace(),
        KeyCode::Enter => {
            if let Some(record) = app.submit_form() {
                app.status = Some(format!("Added user #{} {}", record.id, record.full_name()));
                close_modal(app);
            } else {
                tracing::debug!(errors = app.form.errors.len(), "form rejected");
            }
        }
        KeyCode::Char(c) => app.form.push_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut AppState, code: KeyCode) -> Flow {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut AppState, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn q_quits_only_in_normal_mode() {
        let mut app = AppState::with_records(Vec::new());
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(press(&mut app, KeyCode::Char('q')), Flow::Continue);
        assert_eq!(app.store.search_term(), "q");
        press(&mut app, KeyCode::Enter);
        assert_eq!(press(&mut app, KeyCode::Char('q')), Flow::Quit);
    }

    #[test]
    fn esc_in_search_clears_term() {
        let mut app = AppState::with_records(Vec::new());
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "ab");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.store.search_term(), "a");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.store.search_term(), "");
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn form_flow_adds_record() {
        let mut app = AppState::with_records(Vec::new());
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.input_mode, InputMode::Modal);
        type_str(&mut app, "Ann");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Lee");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "ann@lee.dev");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "30");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Rome");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.modal.is_none());
        assert_eq!(app.store.users().len(), 1);
        assert_eq!(app.store.users()[0].id, 1);
        assert_eq!(app.status.as_deref(), Some("Added user #1 Ann Lee"));
    }

    #[test]
    fn invalid_form_stays_open_with_errors() {
        let mut app = AppState::with_records(Vec::new());
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.modal, Some(ModalState::AddUser)));
        assert_eq!(app.form.errors.len(), 6);
        assert!(app.store.users().is_empty());
        press(&mut app, KeyCode::Esc);
        assert!(app.modal.is_none());
        assert!(app.form.errors.is_empty());
    }

    #[test]
    fn help_opens_and_any_other_key_closes() {
        let mut app = AppState::with_records(Vec::new());
        press(&mut app, KeyCode::Char('?'));
        press(&mut app, KeyCode::Down);
        assert!(matches!(app.modal, Some(ModalState::Help { scroll: 1 })));
        press(&mut app, KeyCode::Esc);
        assert!(app.modal.is_none());
    }
}
