//! Driving port for account lookups by session-bound identifier.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::user::{EmailAddress, UserAccount, UserId, Username};

use super::login_service::FIXTURE_USER_ID;

/// Domain use-case port for reading the authenticated account.
#[async_trait]
pub trait AccountsQuery: Send + Sync {
    /// Fetch the account behind a session-bound identifier.
    ///
    /// `Ok(None)` means the id no longer resolves (e.g. the account was
    /// removed through administrative tooling after the session was issued).
    async fn find_account(&self, id: &UserId) -> Result<Option<UserAccount>, Error>;
}

/// In-memory account query used when no database pool is configured.
///
/// Resolves only the fixture admin id produced by the fixture login service.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccountsQuery;

#[async_trait]
impl AccountsQuery for FixtureAccountsQuery {
    async fn find_account(&self, id: &UserId) -> Result<Option<UserAccount>, Error> {
        let fixture_id = UserId::parse(FIXTURE_USER_ID)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;
        if *id != fixture_id {
            return Ok(None);
        }

        let username = Username::new("admin")
            .map_err(|err| Error::internal(format!("invalid fixture username: {err}")))?;
        let email = EmailAddress::new("admin@example.com")
            .map_err(|err| Error::internal(format!("invalid fixture email: {err}")))?;
        Ok(Some(UserAccount::new(
            fixture_id, username, email, None, None, true,
        )))
    }
}
