//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountsQuery, DestinationsQuery, FixtureAccountsQuery, FixtureDestinationsQuery,
    FixtureLoginService, FixtureRegistration, LoginService, Registration,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Authentication use-case.
    pub login: Arc<dyn LoginService>,
    /// Registration use-case.
    pub registration: Arc<dyn Registration>,
    /// Session-account lookup.
    pub accounts: Arc<dyn AccountsQuery>,
    /// Catalog listing.
    pub destinations: Arc<dyn DestinationsQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    #[must_use]
    pub fn new(
        login: Arc<dyn LoginService>,
        registration: Arc<dyn Registration>,
        accounts: Arc<dyn AccountsQuery>,
        destinations: Arc<dyn DestinationsQuery>,
    ) -> Self {
        Self {
            login,
            registration,
            accounts,
            destinations,
        }
    }

    /// State wired entirely to fixture ports, for tests and database-less
    /// runs.
    #[must_use]
    pub fn fixture() -> Self {
        Self {
            login: Arc::new(FixtureLoginService),
            registration: Arc::new(FixtureRegistration),
            accounts: Arc::new(FixtureAccountsQuery),
            destinations: Arc::new(FixtureDestinationsQuery),
        }
    }
}
