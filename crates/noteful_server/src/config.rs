//! Environment-driven process configuration.
//!
//! # Responsibility
//! - Read `PORT`, `NOTEFUL_ENV`, `DATABASE_URL`, `NOTEFUL_LOG_LEVEL` and
//!   `NOTEFUL_LOG_DIR` into one typed value.
//! - Reject malformed values up front instead of at first use.
//!
//! # Invariants
//! - Loading never reads files itself; `.env` is applied by the binary before
//!   the lookup runs.

use noteful_core::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATABASE_URL: &str = "noteful.sqlite3";
pub const IN_MEMORY_DATABASE_URL: &str = ":memory:";

/// Deployment environment. Only `production` hides error details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
        }
    }
}

/// Where the SQLite store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(String),
    InMemory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub environment: Environment,
    pub database: DatabaseLocation,
    pub log_level: String,
    /// Absolute directory for rolling log files; stderr when `None`.
    pub log_dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidPort(String),
    EmptyDatabaseUrl,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPort(value) => write!(f, "PORT must be a number in 1..=65535, got `{value}`"),
            Self::EmptyDatabaseUrl => write!(f, "DATABASE_URL must not be empty"),
        }
    }
}

impl Error for ConfigError {}

impl Config {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => match raw.trim().parse::<u16>() {
                Ok(port) if port != 0 => port,
                _ => return Err(ConfigError::InvalidPort(raw)),
            },
            None => DEFAULT_PORT,
        };

        let environment = lookup("NOTEFUL_ENV")
            .map(|name| Environment::from_name(&name))
            .unwrap_or(Environment::Development);

        let database = match lookup("DATABASE_URL") {
            Some(raw) if raw.trim().is_empty() => return Err(ConfigError::EmptyDatabaseUrl),
            Some(raw) if raw.trim() == IN_MEMORY_DATABASE_URL => DatabaseLocation::InMemory,
            Some(raw) => DatabaseLocation::File(raw.trim().to_string()),
            None => DatabaseLocation::File(DEFAULT_DATABASE_URL.to_string()),
        };

        let log_level = lookup("NOTEFUL_LOG_LEVEL")
            .filter(|level| !level.trim().is_empty())
            .unwrap_or_else(|| default_log_level().to_string());

        let log_dir = lookup("NOTEFUL_LOG_DIR").filter(|dir| !dir.trim().is_empty());

        Ok(Self {
            port,
            environment,
            database,
            log_level,
            log_dir,
        })
    }
}
