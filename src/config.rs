use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FlotillaConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub directory: DirectoryConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Cap on profile cards rendered per search.
    pub max_search_results: usize,
}

impl Default for FlotillaConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            directory: DirectoryConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_flotilla_dir()
            .join("roster.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            max_search_results: 10,
        }
    }
}

/// Returns `~/.flotilla/`
pub fn default_flotilla_dir() -> PathBuf {
    dirs::home_dir()
        .expect("home directory must exist")
        .join(".flotilla")
}

/// Returns the default config file path: `~/.flotilla/config.toml`
pub fn default_config_path() -> PathBuf {
    default_flotilla_dir().join("config.toml")
}

impl FlotillaConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            FlotillaConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (FLOTILLA_DB, FLOTILLA_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("FLOTILLA_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("FLOTILLA_LOG_LEVEL") {
            self.server.log_level = val;
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .expect("home directory must exist")
            .join(rest)
    } else {
        PathBuf::from(path)
    }
}
