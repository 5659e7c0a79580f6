//! user-directory binary entry point.
//!
//! Parses settings, starts file logging, puts the terminal in raw mode,
//! runs the TUI event loop, and restores the terminal on exit.
//!
use anyhow::{Result, anyhow};
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use user_directory::app::{self, AppState};
use user_directory::cli::Cli;
use user_directory::logging;

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_path()).map_err(|e| anyhow!("init logging: {e}"))?;
    tracing::info!(?cli, "starting");

    let mut state = AppState::new(&cli);
    let mut terminal = init_terminal().map_err(|e| anyhow!("init terminal: {e}"))?;

    let res = app::run(&mut terminal, &mut state);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err}");
    }
    Ok(())
}
