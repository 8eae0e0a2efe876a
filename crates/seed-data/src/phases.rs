//! Explicit ordering of the seed phases.
//!
//! Every phase declares what it needs and what it leaves behind. A
//! [`PhasePlan`] is only constructed once each requirement is met by an
//! earlier phase, and once every table written comes after the tables its
//! foreign keys point at (taken from [`Entity::references`]).

use std::collections::HashSet;
use std::fmt;

use chirp::schema::Entity;

use crate::error::SeedError;

/// Something a phase leaves behind for later phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// Rows of the entity are committed to the store.
    Rows(Entity),
    /// Surrogate ids of the seeded rows are known to the run.
    Ids(Entity),
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Artifact::Rows(e) => write!(f, "{e} rows"),
            Artifact::Ids(e) => write!(f, "{e} ids"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    InsertUsers,
    ResolveUsers,
    InsertFollows,
    InsertTweets,
    InsertLikes,
    AppendEditHistory,
}

impl Phase {
    pub fn requires(self) -> &'static [Artifact] {
        use Artifact::*;
        match self {
            Phase::InsertUsers => &[],
            Phase::ResolveUsers => &[Rows(Entity::User)],
            Phase::InsertFollows => &[Ids(Entity::User)],
            Phase::InsertTweets => &[Ids(Entity::User)],
            Phase::InsertLikes => &[Ids(Entity::User), Ids(Entity::Tweet)],
            Phase::AppendEditHistory => &[Ids(Entity::Tweet)],
        }
    }

    pub fn produces(self) -> &'static [Artifact] {
        use Artifact::*;
        match self {
            Phase::InsertUsers => &[Rows(Entity::User)],
            Phase::ResolveUsers => &[Ids(Entity::User)],
            Phase::InsertFollows => &[Rows(Entity::Follow)],
            // RETURNING id hands back the ids along with the rows
            Phase::InsertTweets => &[Rows(Entity::Tweet), Ids(Entity::Tweet)],
            Phase::InsertLikes => &[Rows(Entity::Like)],
            Phase::AppendEditHistory => &[Rows(Entity::EditHistory)],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::InsertUsers => "insert-users",
            Phase::ResolveUsers => "resolve-users",
            Phase::InsertFollows => "insert-follows",
            Phase::InsertTweets => "insert-tweets",
            Phase::InsertLikes => "insert-likes",
            Phase::AppendEditHistory => "append-edit-history",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered list of phases whose dependencies have been checked.
#[derive(Debug, Clone)]
pub struct PhasePlan {
    phases: Vec<Phase>,
}

impl PhasePlan {
    pub fn new(phases: Vec<Phase>) -> Result<Self, SeedError> {
        let mut available: HashSet<Artifact> = HashSet::new();
        let mut seen: HashSet<Phase> = HashSet::new();

        for &phase in &phases {
            if !seen.insert(phase) {
                return Err(SeedError::DuplicatePhase(phase));
            }

            for &missing in phase.requires() {
                if !available.contains(&missing) {
                    return Err(SeedError::PhaseOrder { phase, missing });
                }
            }

            for artifact in phase.produces() {
                let Artifact::Rows(entity) = artifact else {
                    continue;
                };
                for referenced in entity.references() {
                    let missing = Artifact::Rows(referenced);
                    if !available.contains(&missing) {
                        return Err(SeedError::PhaseOrder { phase, missing });
                    }
                }
            }

            available.extend(phase.produces().iter().copied());
        }

        Ok(Self { phases })
    }

    /// Users, then their ids, then follows, tweets, likes and edit history.
    pub fn standard() -> Self {
        Self {
            phases: vec![
                Phase::InsertUsers,
                Phase::ResolveUsers,
                Phase::InsertFollows,
                Phase::InsertTweets,
                Phase::InsertLikes,
                Phase::AppendEditHistory,
            ],
        }
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }
}

impl Default for PhasePlan {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_plan_verifies() {
        let standard = PhasePlan::standard();
        let verified = PhasePlan::new(standard.phases().to_vec()).unwrap();
        assert_eq!(verified.phases(), standard.phases());
    }

    #[test]
    fn test_follows_before_resolution_rejected() {
        let err = PhasePlan::new(vec![
            Phase::InsertUsers,
            Phase::InsertFollows,
            Phase::ResolveUsers,
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            SeedError::PhaseOrder {
                phase: Phase::InsertFollows,
                missing: Artifact::Ids(Entity::User),
            }
        ));
    }

    #[test]
    fn test_likes_before_tweets_rejected() {
        let err = PhasePlan::new(vec![
            Phase::InsertUsers,
            Phase::ResolveUsers,
            Phase::InsertLikes,
            Phase::InsertTweets,
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            SeedError::PhaseOrder {
                phase: Phase::InsertLikes,
                missing: Artifact::Ids(Entity::Tweet),
            }
        ));
    }

    #[test]
    fn test_resolution_without_users_rejected() {
        let err = PhasePlan::new(vec![Phase::ResolveUsers]).unwrap_err();
        assert!(matches!(
            err,
            SeedError::PhaseOrder {
                phase: Phase::ResolveUsers,
                missing: Artifact::Rows(Entity::User),
            }
        ));
    }

    #[test]
    fn test_duplicate_phase_rejected() {
        let err = PhasePlan::new(vec![Phase::InsertUsers, Phase::InsertUsers]).unwrap_err();
        assert!(matches!(err, SeedError::DuplicatePhase(Phase::InsertUsers)));
    }

    #[test]
    fn test_partial_plan_allowed() {
        let plan = PhasePlan::new(vec![
            Phase::InsertUsers,
            Phase::ResolveUsers,
            Phase::InsertTweets,
        ])
        .unwrap();
        assert_eq!(plan.phases().len(), 3);
    }

    #[test]
    fn test_every_written_table_follows_its_references() {
        let mut written: Vec<Entity> = Vec::new();
        for phase in PhasePlan::standard().phases() {
            for artifact in phase.produces() {
                if let Artifact::Rows(entity) = artifact {
                    for referenced in entity.references() {
                        assert!(written.contains(&referenced));
                    }
                    written.push(*entity);
                }
            }
        }
        assert_eq!(written.len(), Entity::ALL.len());
    }
}
