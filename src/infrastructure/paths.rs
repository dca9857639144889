//! Path utilities for locating the catalog and configuration files.
//!
//! Lookup order for the data directory:
//!
//! 1. `ECOREPORT_DATA_DIR`, used as-is
//! 2. `$XDG_DATA_HOME/ecoreport`
//! 3. `$HOME/.local/share/ecoreport`
//! 4. `./.ecoreport` when no home directory is known

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "ECOREPORT_DATA_DIR";

/// Environment variable pointing at a configuration file.
pub const CONFIG_ENV: &str = "ECOREPORT_CONFIG";

const APP_DIR: &str = "ecoreport";

/// Returns the directory holding the catalog file and trace logs.
///
/// # Examples
///
/// ```
/// use ecoreport::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert!(data_dir.is_absolute() || data_dir.starts_with(".ecoreport"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    resolve_data_dir(
        std::env::var_os(DATA_DIR_ENV).map(PathBuf::from),
        std::env::var_os("XDG_DATA_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn resolve_data_dir(explicit: Option<PathBuf>, xdg_data: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return dir;
    }
    if let Some(dir) = xdg_data.filter(|p| p.is_absolute()) {
        return dir.join(APP_DIR);
    }
    match home {
        Some(home) => home.join(".local").join("share").join(APP_DIR),
        None => PathBuf::from(".ecoreport"),
    }
}

/// Default location of the configuration file.
///
/// `ECOREPORT_CONFIG` if set, otherwise `$XDG_CONFIG_HOME/ecoreport/config.toml` or
/// `$HOME/.config/ecoreport/config.toml`.
#[must_use]
pub fn get_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(|| std::env::var_os("HOME").map(|h| Path::new(&h).join(".config")))?;
    Some(base.join(APP_DIR).join("config.toml"))
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading tilde, and all paths when `HOME` is unset, are returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use ecoreport::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match std::env::var("HOME") {
        Ok(home) => expand_tilde_with(path, &home),
        Err(_) => path.to_string(),
    }
}

fn expand_tilde_with(path: &str, home: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        format!("{}/{rest}", home.trim_end_matches('/'))
    } else if path == "~" {
        home.to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let dir = resolve_data_dir(
            Some(PathBuf::from("/srv/reports")),
            Some(PathBuf::from("/xdg")),
            Some(PathBuf::from("/home/ana")),
        );
        assert_eq!(dir, PathBuf::from("/srv/reports"));
    }

    #[test]
    fn falls_back_through_xdg_and_home() {
        let dir = resolve_data_dir(None, Some(PathBuf::from("/xdg")), Some(PathBuf::from("/home/ana")));
        assert_eq!(dir, PathBuf::from("/xdg/ecoreport"));

        let dir = resolve_data_dir(None, Some(PathBuf::from("relative")), Some(PathBuf::from("/home/ana")));
        assert_eq!(dir, PathBuf::from("/home/ana/.local/share/ecoreport"));

        assert_eq!(resolve_data_dir(None, None, None), PathBuf::from(".ecoreport"));
    }

    #[test]
    fn tilde_expansion() {
        assert_eq!(expand_tilde_with("~/data/r.json", "/home/ana/"), "/home/ana/data/r.json");
        assert_eq!(expand_tilde_with("~", "/home/ana"), "/home/ana");
        assert_eq!(expand_tilde_with("/tmp/~x", "/home/ana"), "/tmp/~x");
    }
}
