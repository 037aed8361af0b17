//! Port abstraction for password hashing and verification.
//!
//! The application never compares plaintext passwords. Handlers and services
//! go through this port, so the hashing algorithm is swappable and tests can
//! use a cheap deterministic stand-in instead of a real KDF.

use async_trait::async_trait;

use crate::domain::user::StoredPasswordHash;

/// Errors raised by credential hashing adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialHashError {
    /// Hashing the supplied password failed.
    #[error("password hashing failed: {message}")]
    Hash {
        /// Failure detail from the hashing backend.
        message: String,
    },
    /// The stored hash could not be parsed or compared.
    #[error("password verification failed: {message}")]
    Verify {
        /// Failure detail from the hashing backend.
        message: String,
    },
}

impl CredentialHashError {
    /// Create a hashing error with the given message.
    pub fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }

    /// Create a verification error with the given message.
    pub fn verify(message: impl Into<String>) -> Self {
        Self::Verify {
            message: message.into(),
        }
    }
}

/// Capability port for deriving and checking password hashes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Derive a stored hash from a plaintext password.
    async fn hash(&self, password: &str) -> Result<StoredPasswordHash, CredentialHashError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` for a well-formed hash that does not match; an
    /// `Err` means the comparison itself could not be carried out.
    async fn verify(
        &self,
        password: &str,
        stored: &StoredPasswordHash,
    ) -> Result<bool, CredentialHashError>;
}

/// Deterministic hasher for tests and database-less runs.
///
/// The "hash" is a reversible tag, not a KDF; it exists so flows can be
/// exercised without paying Argon2 cost. Production wiring uses the Argon2
/// adapter in the outbound layer.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCredentialHasher;

const FIXTURE_PREFIX: &str = "fixture$";

#[async_trait]
impl CredentialHasher for FixtureCredentialHasher {
    async fn hash(&self, password: &str) -> Result<StoredPasswordHash, CredentialHashError> {
        StoredPasswordHash::new(format!("{FIXTURE_PREFIX}{password}"))
            .map_err(|err| CredentialHashError::hash(err.to_string()))
    }

    async fn verify(
        &self,
        password: &str,
        stored: &StoredPasswordHash,
    ) -> Result<bool, CredentialHashError> {
        let Some(tagged) = stored.as_str().strip_prefix(FIXTURE_PREFIX) else {
            return Err(CredentialHashError::verify("unrecognised fixture hash"));
        };
        Ok(tagged == password)
    }
}
