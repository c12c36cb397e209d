// linkshelf platform paths
// Config and data directories for Linux, macOS and Windows.
//
// `LINKSHELF_CONFIG_DIR` / `LINKSHELF_DATA_DIR` override the platform default.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "linkshelf";

/// Returns the configuration directory.
///
/// - **Linux**: `$XDG_CONFIG_HOME/linkshelf` or `~/.config/linkshelf`
/// - **macOS**: `~/Library/Application Support/linkshelf`
/// - **Windows**: `%APPDATA%/linkshelf`
pub fn get_config_dir() -> PathBuf {
    if let Ok(dir) = env::var("LINKSHELF_CONFIG_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        home_dir().join("Library").join("Application Support").join(APP_DIR)
    }
    #[cfg(target_os = "windows")]
    {
        appdata_dir().join(APP_DIR)
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        xdg_dir(env::var("XDG_CONFIG_HOME").ok(), &[".config"])
    }
}

/// Returns the data directory, where the row store database lives by default.
///
/// - **Linux**: `$XDG_DATA_HOME/linkshelf` or `~/.local/share/linkshelf`
/// - **macOS**: `~/Library/Application Support/linkshelf`
/// - **Windows**: `%APPDATA%/linkshelf`
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = env::var("LINKSHELF_DATA_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        home_dir().join("Library").join("Application Support").join(APP_DIR)
    }
    #[cfg(target_os = "windows")]
    {
        appdata_dir().join(APP_DIR)
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        xdg_dir(env::var("XDG_DATA_HOME").ok(), &[".local", "share"])
    }
}

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

#[cfg(target_os = "windows")]
fn appdata_dir() -> PathBuf {
    env::var("APPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join("AppData").join("Roaming"))
}

/// Resolves an XDG base directory: the variable if set, else `~/<fallback...>`.
#[allow(dead_code)]
fn xdg_dir(xdg: Option<String>, fallback: &[&str]) -> PathBuf {
    let base = match xdg {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => fallback.iter().fold(home_dir(), |path, part| path.join(part)),
    };
    base.join(APP_DIR)
}
