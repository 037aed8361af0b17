//! Destination catalog backend.
//!
//! A small content-listing web application: user registration, login, and
//! logout over cookie sessions, plus a catalog of travel destinations served
//! on the index route. The domain layer owns validation and the flows; the
//! inbound layer maps HTTP on and off; the outbound layer holds the
//! PostgreSQL and Argon2 adapters; seeding routines populate the stores
//! idempotently at deployment time.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod seeding;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
