//! Path management for chatseed files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/chatseed/          # Config directory
//! └── config.toml              # Seed configuration
//!
//! ~/.local/share/chatseed/     # Data directory
//! └── export.json              # Default export / store file
//! ```

use chatseed_core::error::{ChatseedError, Result};
use std::path::PathBuf;

const APP_DIR: &str = "chatseed";

/// Environment variable that points at a config file to use instead of the
/// default location.
pub const CONFIG_ENV_VAR: &str = "CHATSEED_CONFIG";

pub struct ChatseedPaths;

impl ChatseedPaths {
    /// Returns the chatseed configuration directory (e.g. `~/.config/chatseed/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ChatseedError::config("Cannot find config directory"))
    }

    /// Returns the chatseed data directory (e.g. `~/.local/share/chatseed/`).
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ChatseedError::config("Cannot find data directory"))
    }

    /// Returns the config file path, honoring `CHATSEED_CONFIG`.
    pub fn config_file() -> Result<PathBuf> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
            _ => Ok(Self::config_dir()?.join("config.toml")),
        }
    }

    pub fn default_export_file() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("export.json"))
    }
}
