//! Application state types and entry glue.
//!
//! Owns the canonical [`UserStore`] and the projection derived from it, plus
//! the UI-only state (input mode, selection, dialogs, theme, keymap).
//! The event loop lives in [`update`] and is re-exported as `run`.
//!
pub mod keymap;
pub mod update;

use ratatui::style::Color;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::form::UserForm;
use crate::model::{SortKey, UserRecord};
use crate::pipeline::{self, Projection};
use crate::source;
use crate::store::UserStore;
use keymap::Keymap;

/// Directory name used under the user's config home.
pub const APP_DIR: &str = "user-directory";

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Modal,
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub error: Color,
}

impl Theme {
    /// Catppuccin Mocha theme defaults.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),        // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),    // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            error: Color::Rgb(0xf3, 0x8b, 0xa8),        // red
        }
    }

    /// Load theme from a simple key=value file. Unknown or missing keys fall back to `mocha`.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::mocha();

        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let key = parts.next().map(|s| s.trim()).unwrap_or("");
            let val = parts.next().map(|s| s.trim()).unwrap_or("");
            if key.is_empty() || val.is_empty() {
                continue;
            }
            if let Some(color) = Self::parse_color(val) {
                match key {
                    "text" => theme.text = color,
                    "muted" => theme.muted = color,
                    "title" => theme.title = color,
                    "border" => theme.border = color,
                    "header_bg" => theme.header_bg = color,
                    "header_fg" => theme.header_fg = color,
                    "status_bg" => theme.status_bg = color,
                    "status_fg" => theme.status_fg = color,
                    "highlight_fg" => theme.highlight_fg = color,
                    "highlight_bg" => theme.highlight_bg = color,
                    "error" => theme.error = color,
                    _ => {}
                }
            }
        }

        Some(theme)
    }

    /// Parse a color from hex ("#RRGGBB" or "RRGGBB") or "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = lower.strip_prefix('#').unwrap_or(lower.as_str());
        if hex.len() == 6 && hex.is_ascii() {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Some(Color::Rgb(r, g, b));
            }
        }
        None
    }

    /// Persist the theme to a config file in key=value format.
    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# user-directory theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");

        fn color_to_str(c: Color) -> String {
            match c {
                Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
                Color::Reset => "reset".to_string(),
                // Named colors get a best-effort hex approximation
                Color::Black => "#000000".to_string(),
                Color::Red => "#FF0000".to_string(),
                Color::Green => "#00FF00".to_string(),
                Color::Yellow => "#FFFF00".to_string(),
                Color::Blue => "#0000FF".to_string(),
                Color::Magenta => "#FF00FF".to_string(),
                Color::Cyan => "#00FFFF".to_string(),
                Color::Gray => "#B3B3B3".to_string(),
                Color::DarkGray => "#4D4D4D".to_string(),
                Color::LightRed => "#FF6666".to_string(),
                Color::LightGreen => "#66FF66".to_string(),
                Color::LightYellow => "#FFFF66".to_string(),
                Color::LightBlue => "#6666FF".to_string(),
                Color::LightMagenta => "#FF66FF".to_string(),
                Color::LightCyan => "#66FFFF".to_string(),
                Color::White => "#FFFFFF".to_string(),
                Color::Indexed(_) => "reset".to_string(),
            }
        }

        let mut kv = |k: &str, v: Color| {
            let _ = writeln!(&mut buf, "{} = {}", k, color_to_str(v));
        };

        kv("text", self.text);
        kv("muted", self.muted);
        kv("title", self.title);
        kv("border", self.border);
        kv("header_bg", self.header_bg);
        kv("header_fg", self.header_fg);
        kv("status_bg", self.status_bg);
        kv("status_fg", self.status_fg);
        kv("highlight_fg", self.highlight_fg);
        kv("highlight_bg", self.highlight_bg);
        kv("error", self.error);

        std::fs::write(path, buf)
    }

    /// Load the theme from `explicit` or the config dir, writing defaults where none exists.
    pub fn load_or_init(explicit: Option<&Path>) -> Self {
        match config_location(explicit, "theme.conf") {
            ConfigLocation::Read(path) => Self::from_file(&path).unwrap_or_else(Self::mocha),
            ConfigLocation::Init(path) => {
                let t = Self::mocha();
                if let Err(err) = t.write_file(&path) {
                    tracing::warn!(path = %path.display(), error = %err, "could not write default theme");
                }
                t
            }
        }
    }
}

/// Where a config file comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigLocation {
    /// An existing file to load.
    Read(PathBuf),
    /// No file yet; defaults get written here.
    Init(PathBuf),
}

/// Resolve config file `name`. A path given on the command line is used as is,
/// existing or not; the config dir is only consulted when none was given.
pub fn config_location(explicit: Option<&Path>, name: &str) -> ConfigLocation {
    match explicit {
        Some(path) if path.exists() => ConfigLocation::Read(path.to_path_buf()),
        Some(path) => ConfigLocation::Init(path.to_path_buf()),
        None => match config_file_read_path(name) {
            Some(existing) => ConfigLocation::Read(existing),
            None => ConfigLocation::Init(config_file_write_path(name)),
        },
    }
}

/// The user config directory for this app, if a home can be determined.
pub fn config_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(xdg).join(APP_DIR));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config").join(APP_DIR))
}

/// Existing config file `name` in the config dir.
pub fn config_file_read_path(name: &str) -> Option<PathBuf> {
    config_dir().map(|d| d.join(name)).filter(|p| p.exists())
}

/// Where to write a fresh `name`: the config dir when it can be created, else the working dir.
pub fn config_file_write_path(name: &str) -> PathBuf {
    match config_dir() {
        Some(dir) if std::fs::create_dir_all(&dir).is_ok() => dir.join(name),
        _ => PathBuf::from(name),
    }
}

/// Dialogs drawn on top of the table.
#[derive(Clone, Debug)]
pub enum ModalState {
    AddUser,
    Help { scroll: u16 },
    Info { message: String },
}

pub struct AppState {
    pub store: UserStore,
    pub projection: Projection,
    /// Row index within the current page.
    pub selected_row: usize,
    pub input_mode: InputMode,
    pub modal: Option<ModalState>,
    pub form: UserForm,
    pub theme: Theme,
    pub keymap: Keymap,
    pub export_dir: PathBuf,
    pub status: Option<String>,
}

impl AppState {
    /// Build the app from command-line settings: configs, then seed data.
    pub fn new(cli: &Cli) -> Self {
        let source = source::from_path(cli.seed.as_deref());

        let mut app = Self::with_records(Vec::new());
        app.theme = Theme::load_or_init(cli.theme.as_deref());
        app.keymap = Keymap::load_or_init(cli.keybinds.as_deref());
        app.export_dir = cli.export_dir.clone();
        app.load(&*source);
        app
    }

    /// App over a fixed record list with default theme and keys; touches no files.
    pub fn with_records(users: Vec<UserRecord>) -> Self {
        let mut store = UserStore::new();
        store.set_users(users);
        let mut app = Self {
            store,
            projection: Projection::default(),
            selected_row: 0,
            input_mode: InputMode::Normal,
            modal: None,
            form: UserForm::new(),
            theme: Theme::mocha(),
            keymap: Keymap::default(),
            export_dir: PathBuf::from("."),
            status: None,
        };
        app.refresh();
        app
    }

    /// Seed the store once from `source`.
    pub fn load(&mut self, src: &dyn source::UserSource) {
        let users = source::load_or_empty(src);
        self.store.set_users(users);
        self.refresh();
    }

    /// Recompute the projection from the store. Call after every store mutation.
    pub fn refresh(&mut self) {
        self.projection = pipeline::derive(&self.store);
        if self.selected_row >= self.projection.page.len() {
            self.selected_row = self.projection.page.len().saturating_sub(1);
        }
    }

    pub fn selected_user(&self) -> Option<&UserRecord> {
        self.projection.page.get(self.selected_row)
    }

    pub fn next_page(&mut self) {
        if self.projection.has_next() {
            self.store.set_current_page(self.store.current_page() + 1);
            self.selected_row = 0;
            self.refresh();
        }
    }

    pub fn prev_page(&mut self) {
        if self.projection.has_prev() {
            self.store.set_current_page(self.store.current_page() - 1);
            self.selected_row = 0;
            self.refresh();
        }
    }

    /// Replace the search term and go back to the first page.
    pub fn set_search(&mut self, term: String) {
        self.store.set_search_term(term);
        self.store.set_current_page(1);
        self.selected_row = 0;
        self.refresh();
        tracing::debug!(term = %self.store.search_term(), matches = self.projection.filtered.len(), "search");
    }

    pub fn sort_by(&mut self, key: SortKey) {
        let cfg = self.store.request_sort(key);
        self.refresh();
        tracing::debug!(key = key.field_name(), direction = ?cfg.direction, "sort");
    }

    /// Validate the form and append the record when it passes.
    pub fn submit_form(&mut self) -> Option<UserRecord> {
        let new_user = self.form.submit()?;
        let record = self.store.insert(new_user);
        self.form.reset();
        self.refresh();
        tracing::info!(id = record.id, "added user");
        Some(record)
    }

    /// Export the filtered list and report the outcome in an info dialog.
    pub fn export(&mut self) {
        let message = match crate::export::write_xlsx(&self.projection.filtered, &self.export_dir) {
            Ok(path) => format!(
                "Exported {} users to {}",
                self.projection.filtered.len(),
                path.display()
            ),
            Err(err) => {
                tracing::error!(error = %err, "export failed");
                format!("Export failed: {err}")
            }
        };
        self.status = Some(message.clone());
        self.modal = Some(ModalState::Info { message });
        self.input_mode = InputMode::Modal;
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, SortDirection};

    fn users(n: u32) -> Vec<UserRecord> {
        (1..=n)
            .map(|i| UserRecord {
                id: i,
                first_name: format!("User{i:02}"),
                last_name: "Test".into(),
                email: format!("u{i}@t.io"),
                gender: if i % 2 == 0 { Gender::Female } else { Gender::Male },
                age: 18 + i,
                city: if i <= 3 { "Oslo".into() } else { "Rome".into() },
            })
            .collect()
    }

    #[test]
    fn pager_stops_at_boundaries() {
        let mut app = AppState::with_records(users(25));
        app.prev_page();
        assert_eq!(app.store.current_page(), 1);
        app.next_page();
        app.next_page();
        app.next_page();
        assert_eq!(app.store.current_page(), 3);
        assert_eq!(app.projection.page.len(), 5);
    }

    #[test]
    fn search_resets_page_and_selection() {
        let mut app = AppState::with_records(users(25));
        app.next_page();
        app.selected_row = 4;
        app.set_search("oslo".into());
        assert_eq!(app.store.current_page(), 1);
        assert_eq!(app.projection.filtered.len(), 3);
        assert_eq!(app.selected_row, 0);
    }

    #[test]
    fn selection_is_clamped_to_page() {
        let mut app = AppState::with_records(users(12));
        app.selected_row = 9;
        app.next_page();
        assert_eq!(app.selected_row, 0);
        app.selected_row = 7;
        app.refresh();
        assert_eq!(app.selected_row, 1);
    }

    #[test]
    fn sort_by_toggles() {
        let mut app = AppState::with_records(users(3));
        app.sort_by(SortKey::Age);
        app.sort_by(SortKey::Age);
        assert_eq!(app.store.sort_config().direction, SortDirection::Desc);
        assert_eq!(app.projection.page[0].id, 3);
    }

    #[test]
    fn export_reports_in_info_modal() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = AppState::with_records(users(3));
        app.export_dir = dir.path().to_path_buf();
        app.export();
        assert!(dir.path().join(crate::export::FILE_NAME).exists());
        match &app.modal {
            Some(ModalState::Info { message }) => assert!(message.starts_with("Exported 3 users")),
            other => panic!("unexpected modal {other:?}"),
        }
    }

    #[test]
    fn theme_parse_color_accepts_hex_and_reset() {
        assert_eq!(Theme::parse_color("#0A0B0C"), Some(Color::Rgb(10, 11, 12)));
        assert_eq!(Theme::parse_color("ffffff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(Theme::parse_color("reset"), Some(Color::Reset));
        assert_eq!(Theme::parse_color("blue"), None);
    }

    #[test]
    fn explicit_config_path_is_used_even_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("theme.conf");
        std::fs::write(&existing, "text = #010203\n").unwrap();
        let missing = dir.path().join("nested-missing.conf");

        assert_eq!(
            config_location(Some(&existing), "theme.conf"),
            ConfigLocation::Read(existing.clone())
        );
        assert_eq!(
            config_location(Some(&missing), "theme.conf"),
            ConfigLocation::Init(missing.clone())
        );

        let t = Theme::load_or_init(Some(&missing));
        assert_eq!(t.text, Theme::mocha().text);
        assert!(missing.exists(), "defaults are written to the given path");
    }
}
