//! Backend entry point: wires configuration, bootstrap, and the HTTP server.

mod server;

use std::env;
use std::ffi::OsString;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use actix_web::web;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig};
use backend::seeding::{
    AdminBootstrapSettings, DestinationSeedSettings, bootstrap_admin_on_startup,
    seed_destinations_on_startup,
};
use server::ServerConfig;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key = load_session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);
    let bind_addr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_owned())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    let db_pool = match env::var("DATABASE_URL") {
        Ok(url) => match DbPool::new(PoolConfig::new(url)).await {
            Ok(pool) => Some(pool),
            Err(e) => {
                warn!(error = %e, "database pool unavailable; serving fixture data");
                None
            }
        },
        Err(_) => {
            warn!("DATABASE_URL not set; serving fixture data");
            None
        }
    };

    run_startup_bootstrap(db_pool.as_ref()).await;

    let mut config = ServerConfig::new(key, cookie_secure, SameSite::Lax, bind_addr);
    if let Some(pool) = db_pool {
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    server::create_server(health_state, config)?.await
}

fn load_session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".to_owned());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}

/// Run the idempotent bootstrap routines, logging outcomes.
///
/// Bootstrap failures are deployment problems, not serving problems: they
/// are logged and the server starts anyway.
async fn run_startup_bootstrap(db_pool: Option<&DbPool>) {
    match AdminBootstrapSettings::load_from_iter([OsString::from("backend")]) {
        Ok(settings) => match bootstrap_admin_on_startup(&settings, db_pool).await {
            Ok(Some(outcome)) => info!(?outcome, "admin bootstrap finished"),
            Ok(None) => {}
            Err(e) => error!(error = %e, "admin bootstrap failed"),
        },
        Err(e) => warn!(error = %e, "admin bootstrap config invalid; skipping"),
    }

    match DestinationSeedSettings::load_from_iter([OsString::from("backend")]) {
        Ok(settings) => match seed_destinations_on_startup(&settings, db_pool).await {
            Ok(Some(report)) => {
                info!(
                    created = report.created,
                    skipped = report.skipped,
                    failed = report.failures.len(),
                    "destination seeding finished"
                );
                for failure in &report.failures {
                    warn!(name = %failure.name, reason = %failure.reason, "seed record failed");
                }
            }
            Ok(None) => {}
            Err(e) => error!(error = %e, "destination seeding aborted"),
        },
        Err(e) => warn!(error = %e, "destination seed config invalid; skipping"),
    }
}
