//! Port abstraction for destination persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::destination::{Destination, NewDestination};

/// Persistence errors raised by destination repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DestinationPersistenceError {
    /// Repository connection could not be established.
    #[error("destination repository connection failed: {message}")]
    Connection {
        /// Failure detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("destination repository query failed: {message}")]
    Query {
        /// Failure detail.
        message: String,
    },
}

impl DestinationPersistenceError {
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

/// Outcome of a conditional seed insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedInsertOutcome {
    /// The destination was created by this call.
    Created,
    /// A destination with the same name already existed; nothing changed.
    AlreadyPresent,
}

/// Driven port for destination persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DestinationRepository: Send + Sync {
    /// All destinations in insertion order.
    async fn list_all(&self) -> Result<Vec<Destination>, DestinationPersistenceError>;

    /// Insert the destination unless one with the same name exists.
    ///
    /// Adapters must make this atomic (`ON CONFLICT DO NOTHING` on the name
    /// index) so concurrent seed runs cannot create duplicates.
    async fn create_if_absent(
        &self,
        fields: &NewDestination,
    ) -> Result<SeedInsertOutcome, DestinationPersistenceError>;
}
