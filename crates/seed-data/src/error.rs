use std::time::Duration;

use chirp::{config::ConfigError, password::HashError};
use thiserror::Error;

use crate::phases::{Artifact, Phase};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("Password hashing task failed: {0}")]
    HashTask(#[from] tokio::task::JoinError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Phase {phase} needs {missing}, which no earlier phase produces")]
    PhaseOrder { phase: Phase, missing: Artifact },

    #[error("Phase {0} appears more than once in the plan")]
    DuplicatePhase(Phase),

    #[error("User {0:?} could not be resolved to an id")]
    UnresolvedUser(String),

    #[error("Tweet {0:?} has no id in this run")]
    UnknownTweet(String),

    #[error("Seed run exceeded its deadline of {0:?}")]
    DeadlineExceeded(Duration),
}
