use std::path::{Path, PathBuf};

/// Directory name under the platform config dir
const APP_DIR: &str = "lanes";

/// Override for the whole config directory (tests, portable installs)
pub const HOME_ENV: &str = "LANES_HOME";

/// Resolve the config directory: `$LANES_HOME`, else the platform config dir
/// (`~/.config/lanes`, `~/Library/Application Support/lanes`, `%APPDATA%\lanes`).
pub fn config_dir() -> Option<PathBuf> {
    match std::env::var_os(HOME_ENV) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::config_dir().map(|d| d.join(APP_DIR)),
    }
}

pub fn config_file(dir: &Path) -> PathBuf {
    dir.join("config.json")
}

pub fn log_file(dir: &Path) -> PathBuf {
    dir.join("app.log")
}
