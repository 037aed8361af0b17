//! Catalog listing service bridging the query port to the repository port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::destination::Destination;
use crate::domain::error::Error;
use crate::domain::ports::{
    DestinationPersistenceError, DestinationRepository, DestinationsQuery,
};

/// Repository-backed implementation of [`DestinationsQuery`].
#[derive(Clone)]
pub struct CatalogueService {
    destinations: Arc<dyn DestinationRepository>,
}

impl CatalogueService {
    /// Create a service over the given destination repository.
    pub fn new(destinations: Arc<dyn DestinationRepository>) -> Self {
        Self { destinations }
    }
}

fn map_destination_persistence_error(error: DestinationPersistenceError) -> Error {
    match error {
        DestinationPersistenceError::Connection { message } => {
            debug!(error = %message, "destination store unreachable");
            Error::service_unavailable("destination store unavailable")
        }
        DestinationPersistenceError::Query { message } => {
            debug!(error = %message, "destination store query failed");
            Error::internal("destination store query failed")
        }
    }
}

#[async_trait]
impl DestinationsQuery for CatalogueService {
    async fn list_destinations(&self) -> Result<Vec<Destination>, Error> {
        self.destinations
            .list_all()
            .await
            .map_err(map_destination_persistence_error)
    }
}
