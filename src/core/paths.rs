use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Environment override for the config directory (tests, sandboxes).
pub const CONFIG_DIR_ENV: &str = "STENCIL_CONFIG_DIR";

/// Base stencil config directory (~/.config/stencil/ on Unix-like systems)
pub fn stencil() -> Result<PathBuf> {
    if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    #[cfg(windows)]
    {
        let appdata = env::var("APPDATA").map_err(|_| {
            Error::internal_unexpected("APPDATA environment variable not set on Windows")
        })?;
        Ok(PathBuf::from(appdata).join("stencil"))
    }

    #[cfg(not(windows))]
    {
        let home = env::var("HOME").map_err(|_| {
            Error::internal_unexpected("HOME environment variable not set on Unix-like system")
        })?;
        Ok(PathBuf::from(home).join(".config").join("stencil"))
    }
}

/// Global stencil.json config file path
pub fn stencil_json() -> Result<PathBuf> {
    Ok(stencil()?.join("stencil.json"))
}
