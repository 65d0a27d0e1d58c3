//! Where dockyard keeps its files
//!
//! - Unix/macOS: `$XDG_CONFIG_HOME/dockyard/` or `~/.config/dockyard/`
//! - Windows: `%APPDATA%\dockyard\`
//!
//! ```text
//! dockyard/
//!   config.yaml        DockConfig
//!   perspectives/      saved perspective strings, one per file
//!   logs/              dockyard.log.YYYY-MM-DD
//! ```

use std::{env, io, path::PathBuf};

const APP_DIR: &str = "dockyard";

/// Prefix of the daily rolling log files
pub const LOG_FILE_PREFIX: &str = "dockyard.log";

/// Extension given to bare perspective names
pub const PERSPECTIVE_EXTENSION: &str = "perspective";

pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var_os("APPDATA").map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|base| base.join(APP_DIR))
    }
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

pub fn perspectives_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("perspectives"))
}

/// Saved perspective called `name`; a name without an extension gets
/// [`PERSPECTIVE_EXTENSION`]
pub fn perspective_file(name: &str) -> Option<PathBuf> {
    let mut path = perspectives_dir()?.join(name);
    if path.extension().is_none() {
        path.set_extension(PERSPECTIVE_EXTENSION);
    }
    Some(path)
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Create the logs directory (and its parents) if needed
pub fn ensure_logs_dir() -> io::Result<PathBuf> {
    let dir = logs_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no config directory available"))?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
