//! Port abstraction for account persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::user::{
    EmailAddress, PersonName, StoredPasswordHash, UserAccount, UserId, Username,
};

/// Persistence errors raised by account repository adapters.
///
/// Duplicate variants exist so the database's unique indexes, not just the
/// application-level existence checks, decide uniqueness under concurrent
/// registrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("account repository connection failed: {message}")]
    Connection {
        /// Failure detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("account repository query failed: {message}")]
    Query {
        /// Failure detail.
        message: String,
    },
    /// An account with the requested username already exists.
    #[error("username already exists")]
    DuplicateUsername,
    /// An account with the requested email already exists.
    #[error("email already exists")]
    DuplicateEmail,
}

impl UserPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Fields for an account that does not exist yet.
///
/// The identifier is assigned by the repository at insert time; the password
/// arrives pre-hashed.
#[derive(Debug, Clone)]
pub struct NewAccountRecord {
    /// Login name; unique.
    pub username: Username,
    /// Contact address; unique.
    pub email: EmailAddress,
    /// PHC-format password hash.
    pub password_hash: StoredPasswordHash,
    /// Optional first name.
    pub first_name: Option<PersonName>,
    /// Optional last name.
    pub last_name: Option<PersonName>,
    /// Administrative access flag.
    pub is_superuser: bool,
}

/// Login lookup result: the account id plus its stored hash.
///
/// Only the login flow sees this type; everything else works with
/// [`UserAccount`], which carries no secret material.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    /// Identifier of the matched account.
    pub user_id: UserId,
    /// PHC-format password hash to verify against.
    pub password_hash: StoredPasswordHash,
}

/// Driven port for account persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account, returning the stored entity.
    async fn insert(&self, record: NewAccountRecord) -> Result<UserAccount, UserPersistenceError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Fetch the stored credentials for a username, if the account exists.
    async fn find_credentials_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError>;

    /// Whether an account with this username exists.
    async fn username_exists(&self, username: &Username) -> Result<bool, UserPersistenceError>;

    /// Whether an account with this email exists.
    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError>;
}
