//! Argon2id implementation of the credential hashing port.
//!
//! Hashes are produced in the PHC string format, which embeds the salt and
//! algorithm parameters, so verification needs no side-channel data. Hashing
//! and verification are CPU-bound; both run on the blocking thread pool to
//! keep request workers free.

use argon2::password_hash::{PasswordHash, SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};
use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{CredentialHashError, CredentialHasher};
use crate::domain::user::StoredPasswordHash;

/// Argon2id credential hasher with the crate's default parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2CredentialHasher;

fn hash_blocking(password: &str) -> Result<String, CredentialHashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| CredentialHashError::hash(err.to_string()))
}

fn verify_blocking(password: &str, stored: &str) -> Result<bool, CredentialHashError> {
    let parsed =
        PasswordHash::new(stored).map_err(|err| CredentialHashError::verify(err.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(CredentialHashError::verify(err.to_string())),
    }
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    async fn hash(&self, password: &str) -> Result<StoredPasswordHash, CredentialHashError> {
        let password = Zeroizing::new(password.to_owned());
        let encoded = tokio::task::spawn_blocking(move || hash_blocking(&password))
            .await
            .map_err(|err| CredentialHashError::hash(format!("hashing task failed: {err}")))??;

        StoredPasswordHash::new(encoded)
            .map_err(|err| CredentialHashError::hash(err.to_string()))
    }

    async fn verify(
        &self,
        password: &str,
        stored: &StoredPasswordHash,
    ) -> Result<bool, CredentialHashError> {
        let password = Zeroizing::new(password.to_owned());
        let stored = stored.as_str().to_owned();
        tokio::task::spawn_blocking(move || verify_blocking(&password, &stored))
            .await
            .map_err(|err| CredentialHashError::verify(format!("verification task failed: {err}")))?
    }
}

#[cfg(test)]
mod tests {
    //! Hash/verify round trips with real Argon2 parameters.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn hash_then_verify_round_trips() {
        let hasher = Argon2CredentialHasher;
        let stored = hasher.hash("correct horse").await.expect("hashing succeeds");

        assert!(stored.as_str().starts_with("$argon2id$"));
        assert!(
            hasher
                .verify("correct horse", &stored)
                .await
                .expect("verification runs")
        );
        assert!(
            !hasher
                .verify("wrong horse", &stored)
                .await
                .expect("verification runs")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn hashes_are_salted() {
        let hasher = Argon2CredentialHasher;
        let first = hasher.hash("secret").await.expect("hashing succeeds");
        let second = hasher.hash("secret").await.expect("hashing succeeds");
        assert_ne!(first.as_str(), second.as_str());
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_stored_hashes_error_rather_than_match() {
        let hasher = Argon2CredentialHasher;
        let stored = StoredPasswordHash::new("not-a-phc-string").expect("hash wraps");

        let err = hasher
            .verify("secret", &stored)
            .await
            .expect_err("malformed hash must error");
        assert!(matches!(err, CredentialHashError::Verify { .. }));
    }
}
