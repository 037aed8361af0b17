//! PostgreSQL-backed destination repository.
//!
//! Listing follows insertion order (`created_at`). Seed inserts go through
//! `ON CONFLICT (name) DO NOTHING`, so concurrent seed runs cannot create
//! duplicate destinations regardless of application-level checks.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::destination::{Destination, DestinationId, NewDestination};
use crate::domain::ports::{
    DestinationPersistenceError, DestinationRepository, SeedInsertOutcome,
};

use super::models::{DestinationRow, NewDestinationRow};
use super::pool::{DbPool, PoolError};
use super::schema::destinations;

/// Diesel-backed implementation of the destination repository port.
#[derive(Clone)]
pub struct DieselDestinationRepository {
    pool: DbPool,
}

impl DieselDestinationRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DestinationPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            DestinationPersistenceError::connection(message)
        }
    }
}

fn map_query_error(error: DieselError) -> DestinationPersistenceError {
    let message = error.to_string();
    debug!(error = %message, "destination query failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            DestinationPersistenceError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => {
            DestinationPersistenceError::query(info.message().to_owned())
        }
        _ => DestinationPersistenceError::query(message),
    }
}

fn row_to_destination(row: DestinationRow) -> Result<Destination, DestinationPersistenceError> {
    let fields = NewDestination::try_from_parts(
        &row.name,
        &row.image,
        &row.description,
        row.price,
        row.on_offer,
    )
    .map_err(|err| {
        DestinationPersistenceError::query(format!("stored destination invalid: {err}"))
    })?;
    Ok(Destination::new(DestinationId::from_uuid(row.id), fields))
}

#[async_trait]
impl DestinationRepository for DieselDestinationRepository {
    async fn list_all(&self) -> Result<Vec<Destination>, DestinationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<DestinationRow> = destinations::table
            .order(destinations::created_at.asc())
            .select(DestinationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_query_error)?;

        rows.into_iter().map(row_to_destination).collect()
    }

    async fn create_if_absent(
        &self,
        fields: &NewDestination,
    ) -> Result<SeedInsertOutcome, DestinationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewDestinationRow {
            id: Uuid::new_v4(),
            name: fields.name.as_ref(),
            image: fields.image.as_ref(),
            description: fields.description.as_ref(),
            price: fields.price.amount(),
            on_offer: fields.on_offer,
        };

        let rows_affected = diesel::insert_into(destinations::table)
            .values(&row)
            .on_conflict(destinations::name)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_query_error)?;

        if rows_affected == 0 {
            Ok(SeedInsertOutcome::AlreadyPresent)
        } else {
            Ok(SeedInsertOutcome::Created)
        }
    }
}
