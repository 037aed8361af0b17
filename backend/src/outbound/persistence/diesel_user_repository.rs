//! PostgreSQL-backed account repository.
//!
//! Unique-index violations on username/email map to the duplicate error
//! variants, so the database stays authoritative for uniqueness even when
//! two registrations race past the application-level existence checks.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{
    NewAccountRecord, StoredCredentials, UserPersistenceError, UserRepository,
};
use crate::domain::user::{
    EmailAddress, PersonName, StoredPasswordHash, UserAccount, UserId, Username,
};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the account repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

fn map_query_error(error: DieselError) -> UserPersistenceError {
    let message = error.to_string();
    debug!(error = %message, "account query failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            UserPersistenceError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => {
            UserPersistenceError::query(info.message().to_owned())
        }
        _ => UserPersistenceError::query(message),
    }
}

/// Map insert failures, turning unique violations into duplicate variants.
///
/// The constraint name is matched first (`users_username_key` /
/// `users_email_key`); the violation message is the fallback for stores
/// where the name is unavailable.
fn map_insert_error(error: DieselError) -> UserPersistenceError {
    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &error {
        let constraint = info.constraint_name().unwrap_or_default();
        let message = info.message();
        if constraint.contains("username") || message.contains("username") {
            return UserPersistenceError::DuplicateUsername;
        }
        if constraint.contains("email") || message.contains("email") {
            return UserPersistenceError::DuplicateEmail;
        }
    }
    map_query_error(error)
}

fn row_to_account(row: UserRow) -> Result<UserAccount, UserPersistenceError> {
    let invalid =
        |err: &dyn std::fmt::Display| UserPersistenceError::query(format!("stored account invalid: {err}"));

    let username = Username::new(row.username).map_err(|err| invalid(&err))?;
    let email = EmailAddress::new(row.email).map_err(|err| invalid(&err))?;
    let first_name = row
        .first_name
        .map(PersonName::new)
        .transpose()
        .map_err(|err| invalid(&err))?;
    let last_name = row
        .last_name
        .map(PersonName::new)
        .transpose()
        .map_err(|err| invalid(&err))?;

    Ok(UserAccount::new(
        UserId::from_uuid(row.id),
        username,
        email,
        first_name,
        last_name,
        row.is_superuser,
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, record: NewAccountRecord) -> Result<UserAccount, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: Uuid::new_v4(),
            username: record.username.as_ref(),
            email: record.email.as_ref(),
            password_hash: record.password_hash.as_str(),
            first_name: record.first_name.as_ref().map(AsRef::as_ref),
            last_name: record.last_name.as_ref().map(AsRef::as_ref),
            is_superuser: record.is_superuser,
        };

        let stored: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_insert_error)?;

        row_to_account(stored)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_query_error)?;

        row.map(row_to_account).transpose()
    }

    async fn find_credentials_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_query_error)?;

        row.map(|row| {
            let password_hash = StoredPasswordHash::new(row.password_hash).map_err(|err| {
                UserPersistenceError::query(format!("stored account invalid: {err}"))
            })?;
            Ok(StoredCredentials {
                user_id: UserId::from_uuid(row.id),
                password_hash,
            })
        })
        .transpose()
    }

    async fn username_exists(&self, username: &Username) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            users::table.filter(users::username.eq(username.as_ref())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_query_error)
    }

    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            users::table.filter(users::email.eq(email.as_ref())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_query_error)
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping coverage; query behaviour is exercised through the
    //! domain-service tests with stub repositories.
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_errors_map_to_connection() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, UserPersistenceError::connection("timed out"));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let err = map_query_error(DieselError::NotFound);
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    #[case(
        "duplicate key value violates unique constraint \"users_username_key\"",
        UserPersistenceError::DuplicateUsername
    )]
    #[case(
        "duplicate key value violates unique constraint \"users_email_key\"",
        UserPersistenceError::DuplicateEmail
    )]
    fn unique_violations_map_to_duplicates(
        #[case] message: &str,
        #[case] expected: UserPersistenceError,
    ) {
        let err = map_insert_error(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(message.to_owned()),
        ));
        assert_eq!(err, expected);
    }

    #[rstest]
    fn other_unique_violations_fall_back_to_query_errors() {
        let err = map_insert_error(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint \"users_pkey\"".to_owned()),
        ));
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn invalid_stored_rows_surface_as_query_errors() {
        let row = UserRow {
            id: Uuid::new_v4(),
            username: "has spaces".to_owned(),
            email: "ada@example.com".to_owned(),
            password_hash: "$argon2id$v=19$x".to_owned(),
            first_name: None,
            last_name: None,
            is_superuser: false,
            created_at: chrono::Utc::now(),
        };
        let err = row_to_account(row).expect_err("invalid row must fail");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}
