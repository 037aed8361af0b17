//! Domain ports for the hexagonal boundary.
//!
//! Driving ports ([`LoginService`], [`Registration`], [`AccountsQuery`],
//! [`DestinationsQuery`]) are what inbound adapters call; driven ports
//! ([`UserRepository`], [`DestinationRepository`], [`CredentialHasher`]) are
//! what domain services call outward. Every driving port ships a `Fixture*`
//! implementation so the server can run without a database and handler tests
//! stay deterministic.

mod accounts_query;
mod credential_hasher;
mod destination_repository;
mod destinations_query;
mod login_service;
mod registration;
mod user_repository;

pub use accounts_query::{AccountsQuery, FixtureAccountsQuery};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHashError, CredentialHasher, FixtureCredentialHasher};
#[cfg(test)]
pub use destination_repository::MockDestinationRepository;
pub use destination_repository::{
    DestinationPersistenceError, DestinationRepository, SeedInsertOutcome,
};
pub use destinations_query::{DestinationsQuery, FixtureDestinationsQuery};
pub use login_service::{FixtureLoginService, LoginService};
pub use registration::{FixtureRegistration, Registration, RegistrationError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{
    NewAccountRecord, StoredCredentials, UserPersistenceError, UserRepository,
};
