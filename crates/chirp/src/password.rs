//! One-way credential hashing.
//!
//! Only hashes are produced here. Digests embed a random salt, so hashing the
//! same plaintext twice gives two different strings and digests must never be
//! compared for equality.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("Invalid hash cost: {0}")]
    InvalidCost(String),

    #[error("Failed to hash password: {0}")]
    Hash(String),
}

/// Tunable argon2 cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory size in KiB.
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashCost {
    /// Cheapest parameters argon2 accepts. Only meant for tests.
    pub fn minimal() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }
}

/// Argon2id hasher with a fixed cost.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl CredentialHasher {
    pub fn new(cost: HashCost) -> Result<Self, HashError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| HashError::InvalidCost(e.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hashes `plaintext` into a PHC string with a freshly generated salt.
    pub fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| HashError::Hash(e.to_string()))?;
        Ok(hash.to_string())
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl std::fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHasher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{PasswordHash, PasswordVerifier};

    fn hasher() -> CredentialHasher {
        CredentialHasher::new(HashCost::minimal()).unwrap()
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = hasher().hash("secret123").unwrap();
        assert_ne!(hash, "secret123");
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_same_plaintext_hashes_differently() {
        let hasher = hasher();
        let a = hasher.hash("secret123").unwrap();
        let b = hasher.hash("secret123").unwrap();
        assert_ne!(a, b, "salt should make each digest unique");
    }

    #[test]
    fn test_hash_verifies_against_plaintext() {
        let hash = hasher().hash("secret123").unwrap();
        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"secret123", &parsed)
                .is_ok()
        );
        assert!(
            Argon2::default()
                .verify_password(b"secret124", &parsed)
                .is_err()
        );
    }

    #[test]
    fn test_cost_is_embedded_in_digest() {
        let cost = HashCost {
            memory_kib: 4096,
            iterations: 3,
            parallelism: 1,
        };
        let hash = CredentialHasher::new(cost).unwrap().hash("pw").unwrap();
        assert!(hash.contains("m=4096,t=3,p=1"), "unexpected params in {hash}");
    }

    #[test]
    fn test_rejects_invalid_cost() {
        let cost = HashCost {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        };
        assert!(matches!(
            CredentialHasher::new(cost),
            Err(HashError::InvalidCost(_))
        ));
    }
}
