//! Command-line settings.
//!
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "user-directory", version, about = "Browse, search, sort, add and export user records")]
pub struct Cli {
    /// JSON file with the initial records; the built-in seed set is used when omitted.
    #[arg(long, env = "USER_DIRECTORY_SEED")]
    pub seed: Option<PathBuf>,

    /// Directory that receives `UsersData.xlsx`.
    #[arg(long, env = "USER_DIRECTORY_EXPORT_DIR", default_value = ".")]
    pub export_dir: PathBuf,

    /// Theme file (key = #RRGGBB lines).
    #[arg(long, env = "USER_DIRECTORY_THEME")]
    pub theme: Option<PathBuf>,

    /// Keybindings file (Action = KeySpec lines).
    #[arg(long, env = "USER_DIRECTORY_KEYBINDS")]
    pub keybinds: Option<PathBuf>,

    /// Log file. Logs never go to the terminal the UI is drawn on.
    #[arg(long, env = "USER_DIRECTORY_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("user-directory.log"))
    }
}
