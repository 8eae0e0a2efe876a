//! Database integration for seeding.
//!
//! [`SeedSession`] holds the single connection a run works on and exposes the
//! upsert-or-skip inserts; [`Seeder`] drives the phases over it.

mod seeder;
mod session;

pub use seeder::{EntityCounts, SeedReport, Seeder};
pub use session::{InsertOutcome, SeedSession};
