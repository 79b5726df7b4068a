//! Centralized configuration paths for maskfield
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/maskfield/`
//! - Windows: `%APPDATA%\maskfield\`

use std::{env, fs, path::PathBuf};

const APP_DIR: &str = "maskfield";

/// Base config directory for maskfield
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/maskfield`
///   - Else: `~/.config/maskfield`
///
/// Windows:
///   - `%APPDATA%\maskfield`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var_os("APPDATA").map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/maskfield/presets.yaml`
pub fn presets_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("presets.yaml"))
}

/// `~/.config/maskfield/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Create the logs directory if needed and return it
pub fn ensure_logs_dir() -> std::io::Result<PathBuf> {
    let dir = logs_dir().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "no config directory available")
    })?;
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
