/// Canonical file locations for calc-redirect.
///
/// Both files live in a per-user data directory:
///   - config.toml        Optional logging settings.
///   - calc-redirect.log  Appended to by every run.
///
/// On Windows the directory is %APPDATA%\CalcRedirect\; elsewhere it is
/// $XDG_DATA_HOME/calc-redirect/ or ~/.local/share/calc-redirect/.
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

#[cfg(windows)]
const APP_DIR_NAME: &str = "CalcRedirect";
#[cfg(not(windows))]
const APP_DIR_NAME: &str = "calc-redirect";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOG_FILE_NAME: &str = "calc-redirect.log";

/// Returns the application data directory. Fails only when the environment
/// names no base directory at all.
pub fn app_data_dir() -> Result<PathBuf> {
    let base = platform_data_base();
    base.map(|b| b.join(APP_DIR_NAME))
        .context("No user data directory available (APPDATA / XDG_DATA_HOME / HOME unset)")
}

/// Returns the full path to the config file inside `app_dir`.
pub fn config_file_path(app_dir: &Path) -> PathBuf {
    app_dir.join(CONFIG_FILE_NAME)
}

/// Returns the full path to the log file inside `app_dir`.
pub fn log_file_path(app_dir: &Path) -> PathBuf {
    app_dir.join(LOG_FILE_NAME)
}

#[cfg(windows)]
fn platform_data_base() -> Option<PathBuf> {
    std::env::var_os("APPDATA").map(PathBuf::from)
}

#[cfg(not(windows))]
fn platform_data_base() -> Option<PathBuf> {
    unix_data_base(
        std::env::var_os("XDG_DATA_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

#[cfg(not(windows))]
fn unix_data_base(xdg_data_home: Option<PathBuf>, home: Option<PathBuf>) -> Option<PathBuf> {
    xdg_data_home
        .filter(|p| p.is_absolute())
        .or_else(|| home.map(|h| h.join(".local").join("share")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_path_has_correct_name() {
        let path = config_file_path(Path::new("base"));
        assert_eq!(path.file_name().unwrap(), CONFIG_FILE_NAME);
    }

    #[test]
    fn log_file_path_has_correct_name() {
        let path = log_file_path(Path::new("base"));
        assert_eq!(path.file_name().unwrap(), LOG_FILE_NAME);
    }

    #[test]
    fn config_and_log_share_same_parent_dir() {
        let dir = Path::new("base");
        assert_eq!(config_file_path(dir).parent(), log_file_path(dir).parent());
    }

    #[cfg(not(windows))]
    #[test]
    fn unix_data_base_prefers_xdg_data_home() {
        let base = unix_data_base(Some("/xdg".into()), Some("/home/u".into()));
        assert_eq!(base, Some(PathBuf::from("/xdg")));
    }

    #[cfg(not(windows))]
    #[test]
    fn unix_data_base_ignores_relative_xdg() {
        let base = unix_data_base(Some("relative".into()), Some("/home/u".into()));
        assert_eq!(base, Some(PathBuf::from("/home/u/.local/share")));
    }

    #[cfg(not(windows))]
    #[test]
    fn unix_data_base_none_without_home() {
        assert_eq!(unix_data_base(None, None), None);
    }
}
