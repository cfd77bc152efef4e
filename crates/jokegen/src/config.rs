//! Layered configuration: TOML file, then `JOKEGEN_*` environment variables.

use chrono::TimeDelta;
use derive_getters::Getters;
use jokegen_error::{ConfigError, JokegenResult};
use jokegen_models::ModelConfig;
use jokegen_server::ServerConfig;
use jokegen_storage::DEFAULT_CACHE_FILE;
use jokegen_story::{CachePolicy, DEFAULT_CACHE_WINDOW_HOURS};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "jokegen.toml";

/// Prefix of environment variables that override file settings, e.g.
/// `JOKEGEN_BACKEND__KIND=sqlite`.
pub const ENV_PREFIX: &str = "JOKEGEN";

/// `cache_file` value that keeps results in memory instead of on disk.
pub const MEMORY_CACHE: &str = "memory";

/// Which data backend serves vocabulary and cached results.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Text files on disk plus a JSON cache file
    File,
    /// Vocabulary compiled into the binary plus a JSON cache file
    #[default]
    Embedded,
    /// SQLite database
    Sqlite,
}

/// `[backend]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend to use
    kind: BackendKind,
    /// Vocabulary directory for the file backend
    resources_dir: PathBuf,
    /// JSON cache file. `"memory"` (or an empty string) unsets it, so the
    /// embedded backend keeps results in memory; the file backend falls
    /// back to `recent_story.json`.
    #[serde(deserialize_with = "deserialize_cache_file")]
    cache_file: Option<PathBuf>,
    /// SQLite database path
    database_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            resources_dir: PathBuf::from("res"),
            cache_file: Some(PathBuf::from(DEFAULT_CACHE_FILE)),
            database_url: "jokegen.db".to_string(),
        }
    }
}

fn deserialize_cache_file<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(MEMORY_CACHE))
        .map(PathBuf::from))
}

impl BackendConfig {
    /// Override the backend kind.
    pub fn with_kind(mut self, kind: BackendKind) -> Self {
        self.kind = kind;
        self
    }

    /// Override the vocabulary directory.
    pub fn with_resources_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resources_dir = dir.into();
        self
    }

    /// Override the cache file. `None` keeps embedded results in memory.
    pub fn with_cache_file(mut self, path: Option<PathBuf>) -> Self {
        self.cache_file = path;
        self
    }

    /// Override the database path.
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = url.into();
        self
    }
}

/// `[cache]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct CacheConfig {
    /// Hours a stored story is reused
    window_hours: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            window_hours: DEFAULT_CACHE_WINDOW_HOURS,
        }
    }
}

impl CacheConfig {
    /// Table with a custom window.
    pub fn with_window_hours(mut self, hours: i64) -> Self {
        self.window_hours = hours;
        self
    }

    /// The cache policy this table describes.
    ///
    /// # Errors
    ///
    /// Returns a config error unless `window_hours` is positive and fits in
    /// a [`TimeDelta`].
    pub fn policy(&self) -> Result<CachePolicy, ConfigError> {
        if self.window_hours <= 0 {
            return Err(ConfigError::new(format!(
                "cache.window_hours must be positive, got {}",
                self.window_hours
            )));
        }
        TimeDelta::try_hours(self.window_hours)
            .map(CachePolicy::new)
            .ok_or_else(|| {
                ConfigError::new(format!(
                    "cache.window_hours is out of range: {}",
                    self.window_hours
                ))
            })
    }
}

/// Complete jokegen configuration.
///
/// Every field has a default, so a missing or empty file is valid.
///
/// ```toml
/// [backend]
/// kind = "sqlite"
/// database_url = "jokegen.db"
///
/// [model]
/// model = "gpt-4-turbo-preview"
///
/// [cache]
/// window_hours = 24
///
/// [server]
/// bind = "0.0.0.0:8080"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct JokegenConfig {
    /// Data backend
    backend: BackendConfig,
    /// Text generation service
    model: ModelConfig,
    /// Cache policy
    cache: CacheConfig,
    /// HTTP listener
    server: ServerConfig,
}

impl JokegenConfig {
    /// Load configuration.
    ///
    /// With `path`, that file must exist. Without it, `jokegen.toml` in the
    /// working directory is read if present. `JOKEGEN_<TABLE>__<KEY>`
    /// environment variables override file values.
    ///
    /// # Errors
    ///
    /// Returns a config error if the file is missing, unreadable or does not
    /// match the expected shape, or if the cache window is not a positive
    /// number of hours.
    #[instrument(name = "config.load")]
    pub fn load(path: Option<&Path>) -> JokegenResult<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file.format(config::FileFormat::Toml))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to load config: {}", e)))?;

        let config: Self = settings
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.cache.policy()?;
        debug!(backend = ?config.backend.kind, "Configuration loaded");
        Ok(config)
    }

    /// Override the backend table.
    pub fn with_backend(mut self, backend: BackendConfig) -> Self {
        self.backend = backend;
        self
    }

    /// Override the model table.
    pub fn with_model(mut self, model: ModelConfig) -> Self {
        self.model = model;
        self
    }

    /// Override the cache table.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Override the server table.
    pub fn with_server(mut self, server: ServerConfig) -> Self {
        self.server = server;
        self
    }
}
