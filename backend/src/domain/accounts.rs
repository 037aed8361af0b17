//! Account flows: registration, password login, and session-account lookup.
//!
//! One service implements the three driving ports because they share the same
//! two collaborators (the account repository and the credential hasher) and
//! the same error mapping.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::auth::{LoginCredentials, RegistrationRequest};
use crate::domain::error::Error;
use crate::domain::ports::{
    AccountsQuery, CredentialHashError, CredentialHasher, LoginService, NewAccountRecord,
    Registration, RegistrationError, UserPersistenceError, UserRepository,
};
use crate::domain::user::{UserAccount, UserId, Username};

/// Registration, login, and account lookup backed by pluggable ports.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl AccountService {
    /// Create a service over the given repository and hasher.
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { users, hasher }
    }
}

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            debug!(error = %message, "account store unreachable");
            Error::service_unavailable("account store unavailable")
        }
        UserPersistenceError::Query { message } => {
            debug!(error = %message, "account store query failed");
            Error::internal("account store query failed")
        }
        // Duplicates are handled by the flows that can produce them; reaching
        // this mapping with one is a logic error worth surfacing loudly.
        UserPersistenceError::DuplicateUsername | UserPersistenceError::DuplicateEmail => {
            Error::internal("unexpected duplicate account error")
        }
    }
}

fn map_hash_error(error: CredentialHashError) -> Error {
    debug!(error = %error, "credential hashing failed");
    Error::internal("credential hashing failed")
}

#[async_trait]
impl Registration for AccountService {
    async fn register(&self, request: RegistrationRequest) -> Result<UserId, RegistrationError> {
        // Fast-path existence checks give the caller a friendly answer; the
        // store's unique indexes stay authoritative under concurrency and are
        // mapped to the same outcomes below.
        let username_taken = self
            .users
            .username_exists(request.username())
            .await
            .map_err(|err| RegistrationError::Internal(map_user_persistence_error(err)))?;
        if username_taken {
            return Err(RegistrationError::UsernameTaken);
        }

        let email_taken = self
            .users
            .email_exists(request.email())
            .await
            .map_err(|err| RegistrationError::Internal(map_user_persistence_error(err)))?;
        if email_taken {
            return Err(RegistrationError::EmailTaken);
        }

        let password_hash = self
            .hasher
            .hash(request.password())
            .await
            .map_err(|err| RegistrationError::Internal(map_hash_error(err)))?;

        let record = NewAccountRecord {
            username: request.username().clone(),
            email: request.email().clone(),
            password_hash,
            first_name: request.first_name().cloned(),
            last_name: request.last_name().cloned(),
            is_superuser: false,
        };

        match self.users.insert(record).await {
            Ok(account) => {
                info!(username = %account.username(), "account created");
                Ok(*account.id())
            }
            Err(UserPersistenceError::DuplicateUsername) => Err(RegistrationError::UsernameTaken),
            Err(UserPersistenceError::DuplicateEmail) => Err(RegistrationError::EmailTaken),
            Err(err) => Err(RegistrationError::Internal(map_user_persistence_error(err))),
        }
    }
}

#[async_trait]
impl LoginService for AccountService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let username = match Username::new(credentials.username()) {
            Ok(username) => username,
            // A name that cannot exist in the store is just a failed login.
            Err(_) => return Err(Error::unauthorized("invalid credentials")),
        };

        let stored = self
            .users
            .find_credentials_by_username(&username)
            .await
            .map_err(map_user_persistence_error)?;

        let Some(stored) = stored else {
            // Burn one hashing round so the response takes the same time
            // whether or not the username exists.
            let _ = self.hasher.hash(credentials.password()).await;
            return Err(Error::unauthorized("invalid credentials"));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .await
            .map_err(|err| {
                debug!(error = %err, "credential verification failed");
                Error::internal("credential verification failed")
            })?;

        if matches {
            Ok(stored.user_id)
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}

#[async_trait]
impl AccountsQuery for AccountService {
    async fn find_account(&self, id: &UserId) -> Result<Option<UserAccount>, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_persistence_error)
    }
}

#[cfg(test)]
mod tests {
    //! Registration and login behaviour against an in-memory account store.
    use std::collections::HashMap;
    use std::sync::Mutex;

    use rstest::rstest;

    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::ports::{FixtureCredentialHasher, StoredCredentials};
    use crate::domain::user::EmailAddress;

    #[derive(Default)]
    struct StubState {
        accounts: HashMap<String, (UserAccount, crate::domain::user::StoredPasswordHash)>,
        fail_connection: bool,
        force_duplicate_on_insert: bool,
    }

    /// In-memory [`UserRepository`] mirroring the store's uniqueness rules.
    #[derive(Default)]
    struct StubUserRepository {
        state: Mutex<StubState>,
    }

    impl StubUserRepository {
        fn with_connection_failure() -> Self {
            Self {
                state: Mutex::new(StubState {
                    fail_connection: true,
                    ..StubState::default()
                }),
            }
        }

        fn racing_duplicate() -> Self {
            Self {
                state: Mutex::new(StubState {
                    force_duplicate_on_insert: true,
                    ..StubState::default()
                }),
            }
        }

        fn account_count(&self) -> usize {
            self.state.lock().expect("state lock").accounts.len()
        }

        fn stored_account(&self, username: &str) -> Option<UserAccount> {
            self.state
                .lock()
                .expect("state lock")
                .accounts
                .get(username)
                .map(|(account, _)| account.clone())
        }
    }

    #[async_trait]
    impl UserRepository for StubUserRepository {
        async fn insert(
            &self,
            record: NewAccountRecord,
        ) -> Result<UserAccount, UserPersistenceError> {
            let mut state = self.state.lock().expect("state lock");
            if state.fail_connection {
                return Err(UserPersistenceError::connection("refused"));
            }
            if state.force_duplicate_on_insert
                || state.accounts.contains_key(record.username.as_ref())
            {
                return Err(UserPersistenceError::DuplicateUsername);
            }
            if state
                .accounts
                .values()
                .any(|(account, _)| account.email() == &record.email)
            {
                return Err(UserPersistenceError::DuplicateEmail);
            }

            let account = UserAccount::new(
                UserId::random(),
                record.username.clone(),
                record.email,
                record.first_name,
                record.last_name,
                record.is_superuser,
            );
            state.accounts.insert(
                record.username.as_ref().to_owned(),
                (account.clone(), record.password_hash),
            );
            Ok(account)
        }

        async fn find_by_id(
            &self,
            id: &UserId,
        ) -> Result<Option<UserAccount>, UserPersistenceError> {
            let state = self.state.lock().expect("state lock");
            if state.fail_connection {
                return Err(UserPersistenceError::connection("refused"));
            }
            Ok(state
                .accounts
                .values()
                .find(|(account, _)| account.id() == id)
                .map(|(account, _)| account.clone()))
        }

        async fn find_credentials_by_username(
            &self,
            username: &Username,
        ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
            let state = self.state.lock().expect("state lock");
            if state.fail_connection {
                return Err(UserPersistenceError::connection("refused"));
            }
            Ok(state
                .accounts
                .get(username.as_ref())
                .map(|(account, hash)| StoredCredentials {
                    user_id: *account.id(),
                    password_hash: hash.clone(),
                }))
        }

        async fn username_exists(
            &self,
            username: &Username,
        ) -> Result<bool, UserPersistenceError> {
            let state = self.state.lock().expect("state lock");
            if state.fail_connection {
                return Err(UserPersistenceError::connection("refused"));
            }
            Ok(state.accounts.contains_key(username.as_ref()))
        }

        async fn email_exists(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError> {
            let state = self.state.lock().expect("state lock");
            if state.fail_connection {
                return Err(UserPersistenceError::connection("refused"));
            }
            Ok(state
                .accounts
                .values()
                .any(|(account, _)| account.email() == email))
        }
    }

    fn service(repository: Arc<StubUserRepository>) -> AccountService {
        AccountService::new(repository, Arc::new(FixtureCredentialHasher))
    }

    fn registration(username: &str, email: &str) -> RegistrationRequest {
        RegistrationRequest::try_from_parts("Ada", "Lovelace", username, "secret", "secret", email)
            .expect("valid submission shape")
    }

    fn credentials(username: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(username, password).expect("valid credentials shape")
    }

    #[rstest]
    #[tokio::test]
    async fn register_then_login_succeeds() {
        let repository = Arc::new(StubUserRepository::default());
        let service = service(repository.clone());

        let user_id = service
            .register(registration("ada", "ada@example.com"))
            .await
            .expect("registration should succeed");

        let authenticated = service
            .authenticate(&credentials("ada", "secret"))
            .await
            .expect("fresh credentials should authenticate");
        assert_eq!(authenticated, user_id);

        let stored = repository.stored_account("ada").expect("account stored");
        assert!(!stored.is_superuser());
        assert_eq!(stored.email().as_ref(), "ada@example.com");
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_username_never_creates_a_second_account() {
        let repository = Arc::new(StubUserRepository::default());
        let service = service(repository.clone());

        service
            .register(registration("ada", "ada@example.com"))
            .await
            .expect("first registration succeeds");
        let original = repository.stored_account("ada").expect("account stored");

        let err = service
            .register(registration("ada", "other@example.com"))
            .await
            .expect_err("duplicate username must fail");
        assert_eq!(err, RegistrationError::UsernameTaken);
        assert_eq!(repository.account_count(), 1);
        assert_eq!(
            repository.stored_account("ada").expect("still stored"),
            original
        );
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_never_creates_a_second_account() {
        let repository = Arc::new(StubUserRepository::default());
        let service = service(repository.clone());

        service
            .register(registration("ada", "ada@example.com"))
            .await
            .expect("first registration succeeds");

        let err = service
            .register(registration("grace", "ada@example.com"))
            .await
            .expect_err("duplicate email must fail");
        assert_eq!(err, RegistrationError::EmailTaken);
        assert_eq!(repository.account_count(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn store_level_duplicate_maps_to_username_taken() {
        // The existence fast path sees nothing, but the insert hits the
        // unique index: the caller still gets the friendly outcome.
        let repository = Arc::new(StubUserRepository::racing_duplicate());
        let service = service(repository);

        let err = service
            .register(registration("ada", "ada@example.com"))
            .await
            .expect_err("racing duplicate must fail");
        assert_eq!(err, RegistrationError::UsernameTaken);
    }

    #[rstest]
    #[case("ghost", "secret")]
    #[case("ada", "wrong")]
    #[tokio::test]
    async fn bad_logins_are_rejected_generically(
        #[case] username: &str,
        #[case] password: &str,
    ) {
        let repository = Arc::new(StubUserRepository::default());
        let service = service(repository);
        service
            .register(registration("ada", "ada@example.com"))
            .await
            .expect("registration succeeds");

        let err = service
            .authenticate(&credentials(username, password))
            .await
            .expect_err("bad login must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "invalid credentials");
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_usernames_fail_like_any_other_login() {
        let repository = Arc::new(StubUserRepository::default());
        let service = service(repository);

        let err = service
            .authenticate(&credentials("no such user!", "secret"))
            .await
            .expect_err("malformed username must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failures_surface_as_service_unavailable() {
        let repository = Arc::new(StubUserRepository::with_connection_failure());
        let service = service(repository);

        let err = service
            .register(registration("ada", "ada@example.com"))
            .await
            .expect_err("connection failure must surface");
        match err {
            RegistrationError::Internal(inner) => {
                assert_eq!(inner.code(), ErrorCode::ServiceUnavailable);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn find_account_resolves_registered_users() {
        let repository = Arc::new(StubUserRepository::default());
        let service = service(repository);

        let user_id = service
            .register(registration("ada", "ada@example.com"))
            .await
            .expect("registration succeeds");

        let account = service
            .find_account(&user_id)
            .await
            .expect("lookup runs")
            .expect("account resolves");
        assert_eq!(account.username().as_ref(), "ada");

        let missing = service
            .find_account(&UserId::random())
            .await
            .expect("lookup runs");
        assert!(missing.is_none());
    }
}
