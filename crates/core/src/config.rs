//! TOML-based configuration for eazysvn.
//!
//! The config file is optional. The password for svn is never stored in it;
//! `password_env` names an environment variable that is read at runtime by
//! [`AppConfig::resolve_env_vars`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing::{debug, warn};

use crate::errors::ConfigError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level application configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// How to run svn.
    #[serde(default)]
    pub svn: SvnConfig,

    /// Diagnostic output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// SVN
// ---------------------------------------------------------------------------

/// How the `svn` binary is invoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvnConfig {
    /// Name or path of the svn binary.
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Username passed as `--username`.
    #[serde(default)]
    pub username: Option<String>,

    /// Environment variable holding the password.
    #[serde(default)]
    pub password_env: Option<String>,

    /// Pass `--non-interactive` to queries (info, list, log).
    #[serde(default = "default_true")]
    pub non_interactive: bool,

    /// Resolved password (populated by `resolve_env_vars`).
    #[serde(skip)]
    pub password: Option<String>,
}

fn default_binary() -> String {
    "svn".into()
}
fn default_true() -> bool {
    true
}

impl Default for SvnConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            username: None,
            password_env: None,
            non_interactive: true,
            password: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum tracing level: trace, debug, info, warn, error, off.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading & resolving
// ---------------------------------------------------------------------------

impl AppConfig {
    /// `<config dir>/eazysvn/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("eazysvn").join("config.toml"))
    }

    /// Load an [`AppConfig`] from a TOML file at the given path.
    ///
    /// This does **not** resolve environment variables -- call
    /// [`resolve_env_vars`](Self::resolve_env_vars) afterwards.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading configuration");

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        debug!("configuration parsed successfully");
        Ok(config)
    }

    /// Load the given file, or the default file if it exists, or defaults.
    ///
    /// An explicitly given path must exist; the default path may not.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_file(path),
            _ => {
                debug!("no configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Resolve the `password_env` reference, if any.
    ///
    /// A missing variable only logs a warning; svn will then prompt or fail
    /// on its own.
    pub fn resolve_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref env_name) = self.svn.password_env {
            self.svn.password = resolve_optional_env(env_name, "svn.password_env");
        }
        Ok(())
    }

    /// Validate that all required fields are present and sane.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.svn.binary.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "svn.binary".into(),
                detail: "svn binary must not be empty".into(),
            });
        }
        if self.svn.password_env.is_some() && self.svn.username.is_none() {
            return Err(ConfigError::InvalidValue {
                field: "svn.password_env".into(),
                detail: "a password needs svn.username as well".into(),
            });
        }
        if self.logging.level.parse::<LevelFilter>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".into(),
                detail: format!("unknown log level '{}'", self.logging.level),
            });
        }
        Ok(())
    }
}

/// Try to read an environment variable by name. Returns `Some(value)` on
/// success; logs a warning and returns `None` if the variable is unset.
fn resolve_optional_env(env_name: &str, field: &str) -> Option<String> {
    match std::env::var(env_name) {
        Ok(val) if !val.is_empty() => {
            debug!(field, env_name, "resolved env var");
            Some(val)
        }
        Ok(_) => {
            warn!(field, env_name, "env var is set but empty");
            None
        }
        Err(_) => {
            warn!(field, env_name, "env var not set");
            None
        }
    }
}
