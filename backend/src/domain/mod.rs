//! Domain primitives, entities, services, and ports.
//!
//! Types here are transport and storage agnostic. Inbound adapters parse
//! payloads into these types before calling a port; outbound adapters map
//! them to rows. Invariants live in the constructors, so a value that exists
//! is a value that validated.

pub mod accounts;
pub mod auth;
pub mod catalogue;
pub mod destination;
pub mod error;
pub mod ports;
pub mod seeding;
pub mod user;

pub use self::accounts::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, RegistrationRequest, RegistrationValidationError,
};
pub use self::catalogue::CatalogueService;
pub use self::destination::{
    DESTINATION_NAME_MAX, Description, Destination, DestinationId, DestinationName,
    DestinationValidationError, ImageRef, NewDestination, Price,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::seeding::{
    AdminBootstrap, AdminBootstrapError, AdminBootstrapOutcome, DestinationSeeder, SeedFailure,
    SeedReport,
};
pub use self::user::{
    EmailAddress, PERSON_NAME_MAX, PersonName, StoredPasswordHash, USERNAME_MAX, UserAccount,
    UserId, UserValidationError, Username,
};

/// Convenient result alias for handler and service signatures.
pub type ApiResult<T> = Result<T, Error>;
