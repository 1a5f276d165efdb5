//! Application configuration.

use crate::games::tictactoe::Mark;
use crate::session::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings shared by the terminal and web front ends.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct AppConfig {
    /// Mark that moves first in every new game.
    #[serde(default)]
    starting_mark: Mark,

    /// Host the web server binds to.
    #[serde(default = "default_host")]
    host: String,

    /// Port the web server binds to.
    #[serde(default = "default_port")]
    port: u16,

    /// Name of the cookie carrying the session identifier.
    #[serde(default = "default_session_cookie")]
    session_cookie: String,

    /// Seconds an untouched web session is kept.
    #[serde(default = "default_session_ttl_secs")]
    session_ttl_secs: u64,

    /// Most web sessions kept at once.
    #[serde(default = "default_max_sessions")]
    max_sessions: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_session_cookie() -> String {
    "fivetoe_session".to_string()
}

fn default_session_ttl_secs() -> u64 {
    DEFAULT_SESSION_TTL.as_secs()
}

fn default_max_sessions() -> usize {
    DEFAULT_MAX_SESSIONS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            starting_mark: Mark::default(),
            host: default_host(),
            port: default_port(),
            session_cookie: default_session_cookie(),
            session_ttl_secs: default_session_ttl_secs(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.session_cookie.is_empty()
            || !config
                .session_cookie
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::new(format!(
                "Invalid session cookie name: {:?}",
                config.session_cookie
            )));
        }

        if config.max_sessions == 0 {
            return Err(ConfigError::new("max_sessions must be at least 1".to_string()));
        }

        info!(
            starting_mark = %config.starting_mark,
            host = %config.host,
            port = config.port,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads the file at `path`, or falls back to defaults when it does not exist.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
