//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! This module manages normal-mode keyboard shortcuts. It supports:
//! - Loading custom keybindings from a config file (`keybinds.conf`)
//! - Providing defaults if no config is present
//! - Resolving key presses (with modifiers) to semantic actions
//! - Exporting the current keymap back to a file for reference or customization

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use std::path::Path;

use crate::app::{ConfigLocation, config_location};
use crate::model::SortKey;

/// Semantic keyboard actions that can be bound to key combinations.
///
/// Multiple key combinations can map to the same action (e.g. both 'j' and
/// Down move the selection down).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Display the help/keybindings reference.
    OpenHelp,
    /// Start typing a search term.
    StartSearch,
    /// Drop the current search term.
    ClearSearch,
    /// Open the add-user form.
    NewUser,
    /// Write the filtered list to `UsersData.xlsx`.
    Export,
    /// Sort by a column; repeating flips the direction.
    SortBy(SortKey),
    MoveUp,
    MoveDown,
    PrevPage,
    NextPage,
    /// Ignore this key.
    Ignore,
}

/// Keys a table column can be sorted with. Name sorts by first name.
const SORT_ACTIONS: [(&str, SortKey); 6] = [
    ("SortId", SortKey::Id),
    ("SortName", SortKey::FirstName),
    ("SortEmail", SortKey::Email),
    ("SortGender", SortKey::Gender),
    ("SortAge", SortKey::Age),
    ("SortCity", SortKey::City),
];

/// Manages keybinding configuration and key-to-action resolution.
#[derive(Clone, Debug)]
pub struct Keymap {
    /// Canonical mapping from (modifiers, code) to action.
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Create a keymap with default keybindings: arrows and hjkl for
    /// navigation, digits 1-6 for column sorting.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Esc), KeyAction::ClearSearch);
        bindings.insert((M::NONE, Char('/')), KeyAction::StartSearch);
        bindings.insert((M::NONE, Char('n')), KeyAction::NewUser);
        bindings.insert((M::NONE, Char('x')), KeyAction::Export);
        bindings.insert((M::NONE, Char('?')), KeyAction::OpenHelp);

        for (i, (_, key)) in SORT_ACTIONS.iter().enumerate() {
            let digit = char::from_digit(i as u32 + 1, 10).unwrap_or('0');
            bindings.insert((M::NONE, Char(digit)), KeyAction::SortBy(*key));
        }

        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Left), KeyAction::PrevPage);
        bindings.insert((M::NONE, Right), KeyAction::NextPage);
        bindings.insert((M::NONE, PageUp), KeyAction::PrevPage);
        bindings.insert((M::NONE, PageDown), KeyAction::NextPage);
        // Vim-like keys
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('h')), KeyAction::PrevPage);
        bindings.insert((M::NONE, Char('l')), KeyAction::NextPage);

        Self { bindings }
    }

    /// Load keybinds from `explicit` or the config dir, writing defaults where none exists.
    pub fn load_or_init(explicit: Option<&Path>) -> Self {
        match config_location(explicit, "keybinds.conf") {
            ConfigLocation::Read(path) => Self::from_file(&path).unwrap_or_default(),
            ConfigLocation::Init(path) => {
                let km = Self::default();
                if let Err(err) = km.write_file(&path) {
                    tracing::warn!(path = %path.display(), error = %err, "could not write default keybinds");
                }
                km
            }
        }
    }

    /// Load a keymap from a configuration file of `<Action> = <KeySpec>` lines,
    /// layered over the defaults.
    ///
    /// Returns `None` if the file cannot be read.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let lhs = parts.next().map(|s| s.trim()).unwrap_or("");
            let rhs = parts.next().map(|s| s.trim()).unwrap_or("");
            if lhs.is_empty() || rhs.is_empty() {
                continue;
            }
            match (parse_action(lhs), parse_key(rhs)) {
                (Some(action), Some(key)) => {
                    map.bindings.insert(key, action);
                }
                _ => tracing::warn!(line, "ignoring unrecognized keybinding"),
            }
        }
        Some(map)
    }

    /// Write every current binding to `path`, sorted by action name.
    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# user-directory keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+c, Enter, Esc, Up, Down, Left, Right, PageUp, PageDown, /, n, x, 1\n");
        buf.push_str("# Actions: Quit, OpenHelp, StartSearch, ClearSearch, NewUser, Export, SortId, SortName, SortEmail, SortGender, SortAge, SortCity, MoveUp, MoveDown, PrevPage, NextPage, Ignore\n\n");

        let mut lines: Vec<String> = self
            .bindings
            .iter()
            .map(|((mods, code), action)| {
                format!("{} = {}", format_action(*action), Self::format_key(*mods, *code))
            })
            .collect();
        lines.sort();
        for line in lines {
            let _ = writeln!(&mut buf, "{line}");
        }

        std::fs::write(path, buf)
    }

    /// Resolve a key event to its bound action.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    /// Snapshot of all bindings as ((modifiers, code), action) pairs.
    pub fn all_bindings(&self) -> Vec<((KeyModifiers, KeyCode), KeyAction)> {
        self.bindings.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Format a key (modifiers + code) as a spec like "Ctrl+c" or "PageUp".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let (mods, rest) = match s.strip_prefix("Ctrl+") {
        Some(after) => (KeyModifiers::CONTROL, after),
        None => (KeyModifiers::NONE, s),
    };
    let code = match rest {
        "Enter" => Enter,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    let s = s.trim();
    if let Some((_, key)) = SORT_ACTIONS.iter().find(|(name, _)| *name == s) {
        return Some(KeyAction::SortBy(*key));
    }
    match s {
        "Quit" => Some(KeyAction::Quit),
        "OpenHelp" => Some(KeyAction::OpenHelp),
        "StartSearch" => Some(KeyAction::StartSearch),
        "ClearSearch" => Some(KeyAction::ClearSearch),
        "NewUser" => Some(KeyAction::NewUser),
        "Export" => Some(KeyAction::Export),
        "MoveUp" => Some(KeyAction::MoveUp),
        "MoveDown" => Some(KeyAction::MoveDown),
        "PrevPage" => Some(KeyAction::PrevPage),
        "NextPage" => Some(KeyAction::NextPage),
        "Ignore" => Some(KeyAction::Ignore),
        _ => None,
    }
}

pub fn format_action(a: KeyAction) -> &'static str {
    match a {
        KeyAction::Quit => "Quit",
        KeyAction::OpenHelp => "OpenHelp",
        KeyAction::StartSearch => "StartSearch",
        KeyAction::ClearSearch => "ClearSearch",
        KeyAction::NewUser => "NewUser",
        KeyAction::Export => "Export",
        KeyAction::SortBy(key) => SORT_ACTIONS
            .iter()
            .find(|(_, k)| *k == key)
            .map(|(name, _)| *name)
            .unwrap_or("Ignore"),
        KeyAction::MoveUp => "MoveUp",
        KeyAction::MoveDown => "MoveDown",
        KeyAction::PrevPage => "PrevPage",
        KeyAction::NextPage => "NextPage",
        KeyAction::Ignore => "Ignore",
    }
}
