//! Runtime configuration for embedders and the CLI.
//!
//! # Responsibility
//! - Resolve database path, log directory and log level.
//! - Layer sources: defaults, then an optional TOML file, then environment.
//!
//! ```toml
//! db_path = "/var/lib/mealdraw/mealdraw.sqlite3"
//! log_dir = "/var/log/mealdraw"
//! log_level = "info"
//! ```
//!
//! # Invariants
//! - A resolved `log_dir` is always absolute.
//! - A resolved `log_level` is one of `trace|debug|info|warn|error`.
//! - Resolution never logs; keys that fell back to defaults are recorded in
//!   `defaulted` and reported by [`AppConfig::log_resolved`] once logging runs.

use crate::logging::{default_log_level, normalize_level};
use log::info;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_DB_PATH: &str = "MEALDRAW_DB_PATH";
pub const ENV_LOG_DIR: &str = "MEALDRAW_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "MEALDRAW_LOG_LEVEL";

const DEFAULT_DB_FILE_NAME: &str = "mealdraw.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "mealdraw-logs";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    InvalidValue { key: &'static str, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config file: {err}"),
            Self::InvalidValue { key, message } => write!(f, "invalid `{key}`: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::InvalidValue { .. } => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: &'static str,
    /// Keys that no source set, in resolution order.
    pub defaulted: Vec<&'static str>,
}

/// Shape of the optional TOML file; every key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    db_path: Option<String>,
    log_dir: Option<String>,
    log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let base = std::env::temp_dir();
        Self {
            db_path: base.join(DEFAULT_DB_FILE_NAME),
            log_dir: base.join(DEFAULT_LOG_DIR_NAME),
            log_level: default_log_level(),
            defaulted: vec!["db_path", "log_dir", "log_level"],
        }
    }
}

impl AppConfig {
    /// Loads configuration from `file` (if given) and the process environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let text = match file {
            Some(path) => Some(std::fs::read_to_string(path).map_err(|source| {
                ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            })?),
            None => None,
        };
        Self::from_sources(text.as_deref(), |key| std::env::var(key).ok())
    }

    /// Resolves configuration from raw TOML text and an environment lookup.
    pub fn from_sources<F>(toml_text: Option<&str>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: ConfigFile = match toml_text {
            Some(text) => toml::from_str(text)?,
            None => ConfigFile::default(),
        };
        let defaults = Self::default();
        let mut defaulted = Vec::new();

        let db_path = match pick(ENV_DB_PATH, &env, file.db_path) {
            Some(raw) => PathBuf::from(raw),
            None => {
                defaulted.push("db_path");
                defaults.db_path.clone()
            }
        };

        let log_dir = match pick(ENV_LOG_DIR, &env, file.log_dir) {
            Some(raw) => {
                let path = PathBuf::from(raw);
                if !path.is_absolute() {
                    return Err(ConfigError::InvalidValue {
                        key: "log_dir",
                        message: format!("must be an absolute path, got `{}`", path.display()),
                    });
                }
                path
            }
            None => {
                defaulted.push("log_dir");
                defaults.log_dir.clone()
            }
        };

        let log_level = match pick(ENV_LOG_LEVEL, &env, file.log_level) {
            Some(raw) => normalize_level(&raw).map_err(|message| ConfigError::InvalidValue {
                key: "log_level",
                message,
            })?,
            None => {
                defaulted.push("log_level");
                defaults.log_level
            }
        };

        Ok(Self {
            db_path,
            log_dir,
            log_level,
            defaulted,
        })
    }

    /// Replaces the database path with an explicit value (e.g. a CLI flag).
    pub fn override_db_path(&mut self, path: impl Into<PathBuf>) {
        self.db_path = path.into();
        self.defaulted.retain(|key| *key != "db_path");
    }

    /// Logs the resolved settings. Call after logging is initialized.
    pub fn log_resolved(&self) {
        for key in &self.defaulted {
            let value = match *key {
                "db_path" => self.db_path.display().to_string(),
                "log_dir" => self.log_dir.display().to_string(),
                _ => self.log_level.to_string(),
            };
            info!("event=config_default module=config status=ok key={key} value={value}");
        }
        info!(
            "event=config_resolved module=config status=ok db_path={} log_dir={} log_level={}",
            self.db_path.display(),
            self.log_dir.display(),
            self.log_level
        );
    }
}

/// Environment wins over the file; blank values count as unset.
fn pick<F>(key: &str, env: &F, file_value: Option<String>) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    env(key)
        .or(file_value)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
