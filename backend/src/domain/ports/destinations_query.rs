//! Driving port for the catalog listing.

use async_trait::async_trait;

use crate::domain::destination::{Destination, DestinationId, NewDestination};
use crate::domain::error::Error;

/// Domain use-case port for listing the destination catalog.
#[async_trait]
pub trait DestinationsQuery: Send + Sync {
    /// All destinations in store order; an empty catalog is not an error.
    async fn list_destinations(&self) -> Result<Vec<Destination>, Error>;
}

/// In-memory catalog used when no database pool is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDestinationsQuery;

fn fixture_destination(
    id: &str,
    name: &str,
    image: &str,
    description: &str,
    price: i32,
    on_offer: bool,
) -> Result<Destination, Error> {
    let id = uuid::Uuid::parse_str(id)
        .map(DestinationId::from_uuid)
        .map_err(|err| Error::internal(format!("invalid fixture destination id: {err}")))?;
    let fields = NewDestination::try_from_parts(name, image, description, price, on_offer)
        .map_err(|err| Error::internal(format!("invalid fixture destination: {err}")))?;
    Ok(Destination::new(id, fields))
}

#[async_trait]
impl DestinationsQuery for FixtureDestinationsQuery {
    async fn list_destinations(&self) -> Result<Vec<Destination>, Error> {
        Ok(vec![
            fixture_destination(
                "0a1b2c3d-4e5f-4a6b-8c7d-9e0f1a2b3c4d",
                "Lalibela",
                "pics/lalibela.jpg",
                "Rock-hewn churches carved from living stone.",
                2500,
                true,
            )?,
            fixture_destination(
                "1b2c3d4e-5f6a-4b7c-8d9e-0f1a2b3c4d5e",
                "Gondar",
                "pics/gondar.jpg",
                "Castles and palaces of the old imperial capital.",
                1800,
                false,
            )?,
        ])
    }
}
