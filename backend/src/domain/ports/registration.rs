//! Driving port for the registration use-case.

use async_trait::async_trait;

use crate::domain::auth::RegistrationRequest;
use crate::domain::error::Error;
use crate::domain::user::UserId;

/// Failures raised while creating an account.
///
/// The duplicate variants are recoverable: handlers surface them as a notice
/// and redirect back to the form. `Internal` carries a domain error for
/// genuine store or hashing failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistrationError {
    /// An account with the requested username already exists.
    #[error("username taken")]
    UsernameTaken,
    /// An account with the requested email already exists.
    #[error("email taken")]
    EmailTaken,
    /// Hashing or persistence failed.
    #[error("{0}")]
    Internal(Error),
}

/// Domain use-case port for account registration.
#[async_trait]
pub trait Registration: Send + Sync {
    /// Create an account for a validated submission.
    ///
    /// A successful return guarantees the account exists with a hashed
    /// password; duplicates never create a second account.
    async fn register(&self, request: RegistrationRequest) -> Result<UserId, RegistrationError>;
}

/// In-memory registration used when no database pool is configured.
///
/// Mirrors the fixture login contract: the `admin` username and
/// `admin@example.com` address read as taken, anything else "succeeds" with
/// a fresh id (nothing is persisted).
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRegistration;

#[async_trait]
impl Registration for FixtureRegistration {
    async fn register(&self, request: RegistrationRequest) -> Result<UserId, RegistrationError> {
        if request.username().as_ref() == "admin" {
            return Err(RegistrationError::UsernameTaken);
        }
        if request.email().as_ref() == "admin@example.com" {
            return Err(RegistrationError::EmailTaken);
        }
        Ok(UserId::random())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    fn request(username: &str, email: &str) -> RegistrationRequest {
        RegistrationRequest::try_from_parts("", "", username, "secret", "secret", email)
            .expect("valid submission shape")
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_registration_reports_taken_username() {
        let err = FixtureRegistration
            .register(request("admin", "new@example.com"))
            .await
            .expect_err("admin must read as taken");
        assert_eq!(err, RegistrationError::UsernameTaken);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_registration_reports_taken_email() {
        let err = FixtureRegistration
            .register(request("newuser", "admin@example.com"))
            .await
            .expect_err("fixture email must read as taken");
        assert_eq!(err, RegistrationError::EmailTaken);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_registration_accepts_fresh_identities() {
        FixtureRegistration
            .register(request("newuser", "new@example.com"))
            .await
            .expect("fresh identity should register");
    }
}
