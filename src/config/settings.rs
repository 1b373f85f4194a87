use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, TokenError};
use crate::utils::constants::{
    DEFAULT_HTTP_CONNECT_TIMEOUT_SECS, DEFAULT_HTTP_READ_TIMEOUT_SECS, ENV_ACCESS_TOKEN_URL,
    ENV_ACCESS_TOKEN_URL_LEGACY, ENV_CREDENTIALS_DIR,
};

/// ================================
/// Token store configuration
/// ================================
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// empty = unset
    pub token_endpoint_url: String,
    pub credentials_dir: PathBuf,
    /// disables network refresh entirely
    pub from_file_only: bool,
    pub connect_timeout_seconds: f64,
    pub read_timeout_seconds: f64,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            token_endpoint_url: String::new(),
            credentials_dir: PathBuf::new(),
            from_file_only: false,
            connect_timeout_seconds: DEFAULT_HTTP_CONNECT_TIMEOUT_SECS,
            read_timeout_seconds: DEFAULT_HTTP_READ_TIMEOUT_SECS,
        }
    }
}

impl Configuration {
    /// Seed defaults from the process environment.
    pub fn from_env() -> Self {
        let token_endpoint_url = env::var(ENV_ACCESS_TOKEN_URL)
            .or_else(|_| env::var(ENV_ACCESS_TOKEN_URL_LEGACY))
            .unwrap_or_default();
        let credentials_dir = env::var(ENV_CREDENTIALS_DIR)
            .map(PathBuf::from)
            .unwrap_or_default();
        Self {
            token_endpoint_url,
            credentials_dir,
            ..Self::default()
        }
    }

    /// Merge given fields, unspecified fields keep their values.
    pub fn merge(&mut self, patch: ConfigurationPatch) {
        let ConfigurationPatch {
            token_endpoint_url,
            credentials_dir,
            from_file_only,
            connect_timeout_seconds,
            read_timeout_seconds,
        } = patch;
        if let Some(url) = token_endpoint_url {
            self.token_endpoint_url = url;
        }
        if let Some(dir) = credentials_dir {
            self.credentials_dir = dir;
        }
        if let Some(from_file_only) = from_file_only {
            self.from_file_only = from_file_only;
        }
        if let Some(secs) = connect_timeout_seconds {
            self.connect_timeout_seconds = secs;
        }
        if let Some(secs) = read_timeout_seconds {
            self.read_timeout_seconds = secs;
        }
    }

    pub fn connect_timeout(&self) -> Result<Duration> {
        timeout("connect_timeout_seconds", self.connect_timeout_seconds)
    }

    pub fn read_timeout(&self) -> Result<Duration> {
        timeout("read_timeout_seconds", self.read_timeout_seconds)
    }
}

fn timeout(field: &str, secs: f64) -> Result<Duration> {
    if secs <= 0.0 {
        return Err(TokenError::Configuration(format!("{} must be positive, got {}", field, secs)));
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|e| TokenError::Configuration(format!("invalid {} {}: {}", field, secs, e)))
}

/// Partial configuration applied with `TokenStore::configure`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigurationPatch {
    pub token_endpoint_url: Option<String>,
    pub credentials_dir: Option<PathBuf>,
    pub from_file_only: Option<bool>,
    pub connect_timeout_seconds: Option<f64>,
    pub read_timeout_seconds: Option<f64>,
}

impl ConfigurationPatch {
    pub fn token_endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.token_endpoint_url = Some(url.into());
        self
    }

    pub fn credentials_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.credentials_dir = Some(dir.into());
        self
    }

    pub fn from_file_only(mut self, from_file_only: bool) -> Self {
        self.from_file_only = Some(from_file_only);
        self
    }

    pub fn connect_timeout_seconds(mut self, secs: f64) -> Self {
        self.connect_timeout_seconds = Some(secs);
        self
    }

    pub fn read_timeout_seconds(mut self, secs: f64) -> Self {
        self.read_timeout_seconds = Some(secs);
        self
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new("info".to_owned(), LogFormat::Compact)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}
