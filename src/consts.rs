use std::path::PathBuf;

use ratatui::style::Color;

lazy_static::lazy_static! {
    /// Path to the masterpass data folder. Takes one of the following values
    /// in the corresponding priority order.
    ///
    /// - `$MASTERPASS_DATA_FOLDER`.
    /// - `$XDG_DATA_HOME/masterpass`.
    /// - `$HOME/.local/share/masterpass`.
    /// - `<current directory>/masterpass`.
    pub static ref DATA_FOLDER: PathBuf = std::env::var("MASTERPASS_DATA_FOLDER")
        .map(PathBuf::from)
        .or_else(|_| {
            std::env::var("XDG_DATA_HOME")
                .map(|path| PathBuf::from(path).join("masterpass"))
        })
        .or_else(|_| {
            std::env::var("HOME")
                .map(|path| {
                    PathBuf::from(path)
                        .join(".local")
                        .join("share")
                        .join("masterpass")
                })
        })
        .map_err(std::io::Error::other)
        .or_else(|_| {
            std::env::current_dir()
                .map(|path| path.join("masterpass"))
        })
        .expect("failed to choose the data folder path");

    /// Path to the wallet accounts file: `DATA_FOLDER/accounts.json`.
    pub static ref ACCOUNTS_PATH: PathBuf = DATA_FOLDER.join("accounts.json");

    /// Path to the logs folder: `DATA_FOLDER/logs`.
    pub static ref LOGS_FOLDER: PathBuf = DATA_FOLDER.join("logs");
}

pub const TUI_PRIMARY_COLOR: Color = Color::Magenta;
pub const TUI_SECONDARY_COLOR: Color = Color::Cyan;
pub const TUI_DISABLED_COLOR: Color = Color::DarkGray;

pub const TUI_INFO_COLOR: Color = Color::Blue;
pub const TUI_SUCCESS_COLOR: Color = Color::Green;
pub const TUI_WARNING_COLOR: Color = Color::Yellow;
pub const TUI_ERROR_COLOR: Color = Color::Red;
