//! Configuration service implementation.
//!
//! Loads the seed configuration from `config.toml` (see
//! [`ChatseedPaths::config_file`]) and caches it.

use crate::paths::ChatseedPaths;
use chatseed_core::config::SeedConfig;
use chatseed_core::error::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

/// Configuration service that loads and caches the seed configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    /// Explicit config file; `None` resolves through `ChatseedPaths`.
    path: Option<PathBuf>,
    config: Arc<RwLock<Option<SeedConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the default config location. Nothing is read
    /// until the first `get_config` call.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::default(),
        }
    }

    /// Gets the configuration, loading it from file if not cached.
    ///
    /// A missing file yields the defaults. A file that cannot be parsed is
    /// logged and also yields the defaults.
    pub fn get_config(&self) -> SeedConfig {
        if let Some(cached) = self.config.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
            return cached.clone();
        }

        let loaded = self.load_config().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load config, using defaults");
            SeedConfig::default()
        });
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded.clone());
        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Writes `config` to the config file and refreshes the cache.
    pub fn save_config(&self, config: &SeedConfig) -> Result<()> {
        let path = self.config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml::to_string_pretty(config)?)?;
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(config.clone());
        tracing::debug!(path = %path.display(), "Saved config");
        Ok(())
    }

    fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => ChatseedPaths::config_file(),
        }
    }

    fn load_config(&self) -> Result<SeedConfig> {
        let path = self.config_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(SeedConfig::default());
        }
        let content = fs::read_to_string(&path)?;
        Ok(toml::from_str(&content)?)
    }
}
