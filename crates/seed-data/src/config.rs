//! Settings for a seed run.

use std::time::Duration;

use chirp::config::{ConfigError, env_lookup, hash_cost, parsed_or, required};
use chirp::password::HashCost;

/// Wall-clock budget for a whole run unless `SEED_DEADLINE_SECS` says otherwise.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct SeedSettings {
    pub database_url: String,
    pub deadline: Duration,
    pub hash_cost: HashCost,
}

impl SeedSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = required(&lookup, "DATABASE_URL")?;
        let deadline_secs = parsed_or(&lookup, "SEED_DEADLINE_SECS", DEFAULT_DEADLINE.as_secs())?;
        if deadline_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "SEED_DEADLINE_SECS",
                value: deadline_secs.to_string(),
            });
        }

        Ok(Self {
            database_url,
            deadline: Duration::from_secs(deadline_secs),
            hash_cost: hash_cost(&lookup)?,
        })
    }
}
