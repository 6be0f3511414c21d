//! Configuration file support.
//!
//! A project carries `quill.toml` next to its notes. An optional user file
//! under the platform config directory supplies defaults shared by every
//! project.

use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Editor used when nothing else is configured.
pub const FALLBACK_EDITOR: &str = "nano";

/// Length of a generated deploy key.
pub const DEPLOY_KEY_LEN: usize = 36;

/// Errors reading or writing configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Per-project configuration (`quill.toml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Site name, shown on generated pages.
    pub name: String,

    /// Random key generated at init.
    #[serde(default)]
    pub deploy_key: String,

    /// Editor command for editing notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
}

impl Config {
    /// A fresh configuration with a generated deploy key.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            deploy_key: generate_deploy_key(),
            editor: None,
        }
    }

    /// Load the project configuration from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`Config::load`], but a missing file yields a config named
    /// `fallback_name`.
    pub fn load_or_default(path: &Path, fallback_name: &str) -> Result<Self, ConfigError> {
        if !path.exists() {
            warn!(path = %path.display(), "Project config missing, using defaults");
            return Ok(Self {
                name: fallback_name.to_string(),
                ..Self::default()
            });
        }
        Self::load(path)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// User-wide defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserConfig {
    /// Editor command for editing notes
    pub editor: Option<String>,
}

impl UserConfig {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Malformed { path, source })
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/quill/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quill")
            .join("config.toml")
    }
}

/// Resolve the editor command.
///
/// Precedence order:
/// 1. Project `editor` setting
/// 2. User config `editor` setting
/// 3. $EDITOR environment variable
/// 4. $VISUAL environment variable
/// 5. "nano" as fallback
pub fn resolve_editor(project: &Config, user: &UserConfig) -> String {
    editor_from(project, user, |key| std::env::var(key).ok())
}

fn editor_from(
    project: &Config,
    user: &UserConfig,
    env: impl Fn(&str) -> Option<String>,
) -> String {
    let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.trim().is_empty());
    non_empty(&project.editor)
        .or_else(|| non_empty(&user.editor))
        .or_else(|| non_empty(&env("EDITOR")))
        .or_else(|| non_empty(&env("VISUAL")))
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
}

/// Random lowercase alphanumeric key.
pub fn generate_deploy_key() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(DEPLOY_KEY_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}
