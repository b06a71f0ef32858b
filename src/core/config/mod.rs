//! core::config
//!
//! Configuration schema and loading.
//!
//! # Locations
//!
//! Searched in order, first existing file wins:
//! 1. The path given with `--config`
//! 2. `$BRANCHDESK_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/branchdesk/config.toml`
//! 4. `~/.branchdesk/config.toml`
//!
//! An explicitly requested path (1 or 2) that does not exist is an error
//! rather than falling through to the next location.
//!
//! # Example
//!
//! ```no_run
//! use branchdesk::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! for key in config.keys() {
//!     println!("{key}");
//! }
//! ```

pub mod schema;

pub use schema::{DeskConfig, RepositoryEntry};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "BRANCHDESK_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("config file not found: {path}")]
    Missing { path: PathBuf },

    #[error("no config file found (searched: {})", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no candidate locations".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Loaded configuration plus the file it came from.
#[derive(Debug, Clone)]
pub struct Config {
    /// Parsed and validated settings
    pub settings: DeskConfig,
    /// Path of the file the settings were read from
    source: PathBuf,
}

impl Config {
    /// Load configuration from the first existing location.
    ///
    /// # Errors
    ///
    /// Returns an error if no config file exists, or if the file found cannot
    /// be read, parsed, or validated.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_required(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load_required(Path::new(&path));
        }

        let searched = default_locations(
            std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            dirs::home_dir(),
        );
        for path in &searched {
            if path.exists() {
                return Self::load_from_path(path);
            }
        }

        Err(ConfigError::NotFound { searched })
    }

    fn load_required(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::Missing {
                path: path.to_path_buf(),
            });
        }
        Self::load_from_path(path)
    }

    /// Read, parse, and validate a config file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&contents, path)
    }

    /// Parse and validate config text, recording `source` as its origin.
    pub fn from_toml(contents: &str, source: &Path) -> Result<Self, ConfigError> {
        let settings: DeskConfig =
            toml::from_str(contents).map_err(|e| ConfigError::ParseError {
                path: source.to_path_buf(),
                message: e.to_string(),
            })?;
        settings.validate()?;

        tracing::debug!(
            path = %source.display(),
            repositories = settings.repositories.len(),
            "loaded config"
        );

        Ok(Self {
            settings,
            source: source.to_path_buf(),
        })
    }

    /// Path of the file this config was loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Directory holding all configured checkouts.
    pub fn repository_root(&self) -> &Path {
        &self.settings.repository_root
    }

    /// Git executable, defaulting to `git`.
    pub fn git_path(&self) -> &Path {
        self.settings
            .git_path
            .as_deref()
            .unwrap_or_else(|| Path::new("git"))
    }

    /// Configured repository keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.settings.repositories.keys().map(String::as_str)
    }

    /// Look up a repository by key.
    pub fn repository(&self, key: &str) -> Option<&RepositoryEntry> {
        self.settings.repositories.get(key)
    }

    /// Key used when none is requested: `default_repository`, else the first key.
    pub fn default_key(&self) -> Option<&str> {
        self.settings
            .default_repository
            .as_deref()
            .or_else(|| self.keys().next())
    }
}

/// Default search locations after the explicit ones.
pub fn default_locations(xdg_config_home: Option<PathBuf>, home: Option<PathBuf>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(xdg) = xdg_config_home {
        paths.push(xdg.join("branchdesk/config.toml"));
    }
    if let Some(home) = home {
        paths.push(home.join(".branchdesk/config.toml"));
    }
    paths
}
