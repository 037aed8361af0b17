//! Builders for the HTTP port bundle.

use std::sync::Arc;

use actix_web::web;

use backend::domain::{AccountService, CatalogueService};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{DieselDestinationRepository, DieselUserRepository};
use backend::outbound::security::Argon2CredentialHasher;

use super::ServerConfig;

/// Build the shared HTTP state from configuration.
///
/// With a database pool, every port is backed by the Diesel adapters and the
/// Argon2 hasher; without one, the fixture ports serve deterministic data.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            let accounts = Arc::new(AccountService::new(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(Argon2CredentialHasher),
            ));
            let catalogue = Arc::new(CatalogueService::new(Arc::new(
                DieselDestinationRepository::new(pool.clone()),
            )));
            HttpState::new(
                accounts.clone(),
                accounts.clone(),
                accounts,
                catalogue,
            )
        }
        None => HttpState::fixture(),
    };
    web::Data::new(state)
}
