//! Startup bootstrap orchestration.
//!
//! Both routines are safe to run on every deployment: admin creation and
//! destination seeding are idempotent, and neither failure aborts the
//! server. `main` logs errors from here and carries on serving.

use std::sync::Arc;

use destination_data::{RegistryError, SeedRegistry};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::user::{EmailAddress, UserValidationError, Username};
use crate::domain::{
    AdminBootstrap, AdminBootstrapError, AdminBootstrapOutcome, DestinationSeeder, SeedReport,
};
use crate::outbound::persistence::{
    DbPool, DieselDestinationRepository, DieselUserRepository,
};
use crate::outbound::security::Argon2CredentialHasher;

use super::config::{AdminBootstrapSettings, DestinationSeedSettings};

/// Errors returned while executing startup bootstrap.
#[derive(Debug, Error)]
pub enum StartupBootstrapError {
    /// Admin bootstrap is enabled but no password was configured.
    #[error("admin bootstrap enabled but ADMIN_BOOTSTRAP_PASSWORD is not set")]
    MissingAdminPassword,
    /// Configured admin identity failed validation.
    #[error("invalid admin identity: {0}")]
    InvalidAdminIdentity(#[from] UserValidationError),
    /// Admin creation failed.
    #[error("admin bootstrap failed: {0}")]
    Admin(#[from] AdminBootstrapError),
    /// Seed registry could not be loaded or parsed.
    #[error("seed registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Create the admin account on startup when enabled.
///
/// Returns `Ok(None)` when bootstrap is disabled or no database pool is
/// configured (the fixture-backed server has nothing to bootstrap into).
///
/// # Errors
///
/// Returns [`StartupBootstrapError`] when the configuration is incomplete or
/// the account store rejects the bootstrap.
pub async fn bootstrap_admin_on_startup(
    settings: &AdminBootstrapSettings,
    db_pool: Option<&DbPool>,
) -> Result<Option<AdminBootstrapOutcome>, StartupBootstrapError> {
    if !settings.enabled {
        info!(reason = "disabled", "admin bootstrap skipped");
        return Ok(None);
    }

    let Some(db_pool) = db_pool else {
        warn!("admin bootstrap enabled but DATABASE_URL is missing; skipping");
        return Ok(None);
    };

    let Some(password) = settings.password.as_deref() else {
        return Err(StartupBootstrapError::MissingAdminPassword);
    };
    let username = Username::new(settings.username())?;
    let email = EmailAddress::new(settings.email())?;

    let bootstrap = AdminBootstrap::new(
        Arc::new(DieselUserRepository::new(db_pool.clone())),
        Arc::new(Argon2CredentialHasher),
    );
    let outcome = bootstrap.ensure_admin(&username, &email, password).await?;
    Ok(Some(outcome))
}

/// Seed the destination catalog on startup when enabled.
///
/// Uses the bundled dataset unless a registry path is configured. Returns
/// `Ok(None)` when seeding is disabled or no database pool is configured.
///
/// # Errors
///
/// Returns [`StartupBootstrapError::Registry`] when the registry file is
/// missing or malformed; per-record failures land in the returned
/// [`SeedReport`] instead.
pub async fn seed_destinations_on_startup(
    settings: &DestinationSeedSettings,
    db_pool: Option<&DbPool>,
) -> Result<Option<SeedReport>, StartupBootstrapError> {
    if !settings.enabled {
        info!(reason = "disabled", "destination seeding skipped");
        return Ok(None);
    }

    let Some(db_pool) = db_pool else {
        warn!("destination seeding enabled but DATABASE_URL is missing; skipping");
        return Ok(None);
    };

    let registry = match &settings.registry_path {
        Some(path) => SeedRegistry::load_from_path(path)?,
        None => SeedRegistry::built_in(),
    };

    let seeder = DestinationSeeder::new(Arc::new(DieselDestinationRepository::new(
        db_pool.clone(),
    )));
    let report = seeder.seed(registry.destinations()).await;
    Ok(Some(report))
}
