//! Server settings read from the environment.
//!
//! Parsing goes through a lookup function so the same code serves
//! `std::env::var` in the binaries and plain maps in tests.

use std::{str::FromStr, time::Duration};

use thiserror::Error;

use crate::password::HashCost;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing env {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:5173"];

/// Returns the value of `key`, treating empty values as absent.
pub fn optional<F>(lookup: &F, key: &'static str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

/// Returns the value of `key` or fails when it is absent or empty.
pub fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or(ConfigError::Missing(key))
}

/// Parses `key` when set, falling back to `default` otherwise.
pub fn parsed_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match optional(lookup, key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

/// Reads the argon2 cost from `PASSWORD_HASH_*`, defaulting each part.
pub fn hash_cost<F>(lookup: &F) -> Result<HashCost, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = HashCost::default();
    Ok(HashCost {
        memory_kib: parsed_or(lookup, "PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib)?,
        iterations: parsed_or(lookup, "PASSWORD_HASH_ITERATIONS", defaults.iterations)?,
        parallelism: parsed_or(lookup, "PASSWORD_HASH_PARALLELISM", defaults.parallelism)?,
    })
}

/// Reads a variable from the process environment.
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub port: u16,
    pub max_connections: u32,
    pub cors_origins: Vec<String>,
    pub health_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = required(&lookup, "DATABASE_URL")?;
        let port = parsed_or(&lookup, "APP_PORT", 8080u16)?;
        let max_connections = parsed_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5u32)?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                value: max_connections.to_string(),
            });
        }
        let health_timeout_ms = parsed_or(&lookup, "HEALTH_TIMEOUT_MS", 2000u64)?;
        if health_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "HEALTH_TIMEOUT_MS",
                value: health_timeout_ms.to_string(),
            });
        }

        let cors_origins = match optional(&lookup, "CORS_ALLOWED_ORIGINS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        Ok(Self {
            database_url,
            port,
            max_connections,
            cors_origins,
            health_timeout: Duration::from_millis(health_timeout_ms),
        })
    }
}

/// Strips the password from a connection string before it is logged.
pub fn redact_database_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((credentials, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    match credentials.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:***@{host}"),
        None => url.to_string(),
    }
}
