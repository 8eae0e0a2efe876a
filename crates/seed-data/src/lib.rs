//! Sample-data seeding for chirp.
//!
//! Seeds users, follows, tweets, likes and edit history in dependency order
//! and can be re-run safely: rows with a natural or pair key are
//! upserted-or-skipped, so repeated runs converge on the same users, follows
//! and likes.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let db = Database::connect(&database_url, 1).await?;
//! let report = Seeder::new(db)
//!     .with_deadline(std::time::Duration::from_secs(15))
//!     .run(&Dataset::sample())
//!     .await?;
//! ```

pub mod config;
pub mod dataset;
pub mod db;
pub mod error;
pub mod phases;

pub use config::SeedSettings;
pub use error::SeedError;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::SeedSettings;
    pub use crate::dataset::{Dataset, SeedEdit, SeedFollow, SeedLike, SeedTweet, SeedUser};
    pub use crate::db::{InsertOutcome, SeedReport, Seeder};
    pub use crate::error::SeedError;
    pub use crate::phases::{Artifact, Phase, PhasePlan};
    pub use chirp::database::Database;
    pub use chirp::password::{CredentialHasher, HashCost};
}
