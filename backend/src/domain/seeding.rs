//! Idempotent bootstrap routines: admin account and destination seeding.

use std::sync::Arc;

use destination_data::DestinationRecord;
use tracing::{info, warn};

use crate::domain::destination::NewDestination;
use crate::domain::ports::{
    CredentialHashError, CredentialHasher, DestinationRepository, NewAccountRecord,
    SeedInsertOutcome, UserPersistenceError, UserRepository,
};
use crate::domain::user::{EmailAddress, UserId, Username};

/// One record the seeder could not apply, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedFailure {
    /// Name of the offending record (possibly blank for unnamed input).
    pub name: String,
    /// Human-readable failure reason.
    pub reason: String,
}

/// Tally of a destination seed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Records inserted by this run.
    pub created: usize,
    /// Records skipped because a destination with the same name existed.
    pub skipped: usize,
    /// Records that failed validation or persistence.
    pub failures: Vec<SeedFailure>,
}

impl SeedReport {
    /// Whether every record was applied or skipped cleanly.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Applies destination seed records, one at a time, never aborting the batch.
#[derive(Clone)]
pub struct DestinationSeeder {
    destinations: Arc<dyn DestinationRepository>,
}

impl DestinationSeeder {
    /// Create a seeder over the given destination repository.
    pub fn new(destinations: Arc<dyn DestinationRepository>) -> Self {
        Self { destinations }
    }

    /// Apply the records, creating each destination only when absent.
    ///
    /// A record that fails validation or persistence lands in the report's
    /// failure list and the run continues with the next record, so one bad
    /// entry cannot block the rest of the dataset.
    pub async fn seed(&self, records: &[DestinationRecord]) -> SeedReport {
        let mut report = SeedReport::default();

        for record in records {
            let fields = match NewDestination::try_from(record) {
                Ok(fields) => fields,
                Err(err) => {
                    warn!(name = %record.name, error = %err, "seed record rejected");
                    report.failures.push(SeedFailure {
                        name: record.name.clone(),
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            match self.destinations.create_if_absent(&fields).await {
                Ok(SeedInsertOutcome::Created) => report.created += 1,
                Ok(SeedInsertOutcome::AlreadyPresent) => report.skipped += 1,
                Err(err) => {
                    warn!(name = %record.name, error = %err, "seed record failed to persist");
                    report.failures.push(SeedFailure {
                        name: record.name.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            created = report.created,
            skipped = report.skipped,
            failed = report.failures.len(),
            "destination seeding finished"
        );
        report
    }
}

/// Outcome of an admin bootstrap attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminBootstrapOutcome {
    /// The elevated account was created by this call.
    Created(UserId),
    /// An account with the requested username already existed; no-op.
    AlreadyPresent,
}

/// Failures raised by [`AdminBootstrap::ensure_admin`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminBootstrapError {
    /// Password hashing failed.
    #[error("admin password hashing failed: {0}")]
    Hash(#[from] CredentialHashError),
    /// The account store rejected the lookup or insert.
    #[error("admin bootstrap persistence error: {0}")]
    Persistence(#[from] UserPersistenceError),
}

/// Creates the administrative account at deployment time, idempotently.
#[derive(Clone)]
pub struct AdminBootstrap {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl AdminBootstrap {
    /// Create a bootstrap routine over the given repository and hasher.
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { users, hasher }
    }

    /// Create the superuser account unless the username already exists.
    ///
    /// # Errors
    ///
    /// Returns [`AdminBootstrapError`] when hashing or persistence fails;
    /// an existing account is reported as
    /// [`AdminBootstrapOutcome::AlreadyPresent`], not as an error.
    pub async fn ensure_admin(
        &self,
        username: &Username,
        email: &EmailAddress,
        password: &str,
    ) -> Result<AdminBootstrapOutcome, AdminBootstrapError> {
        if self.users.username_exists(username).await? {
            info!(username = %username, "admin account already present");
            return Ok(AdminBootstrapOutcome::AlreadyPresent);
        }

        let password_hash = self.hasher.hash(password).await?;
        let record = NewAccountRecord {
            username: username.clone(),
            email: email.clone(),
            password_hash,
            first_name: None,
            last_name: None,
            is_superuser: true,
        };

        match self.users.insert(record).await {
            Ok(account) => {
                info!(username = %username, "admin account created");
                Ok(AdminBootstrapOutcome::Created(*account.id()))
            }
            // A concurrent bootstrap won the insert; the account exists,
            // which is the outcome this routine guarantees.
            Err(UserPersistenceError::DuplicateUsername) => {
                Ok(AdminBootstrapOutcome::AlreadyPresent)
            }
            Err(err) => Err(err.into()),
        }
    }
}
