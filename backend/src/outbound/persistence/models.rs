//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{destinations, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_superuser: bool,
    #[expect(dead_code, reason = "schema field read back for audit queries")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub is_superuser: bool,
}

/// Row struct for reading from the destinations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = destinations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DestinationRow {
    pub id: Uuid,
    pub name: String,
    pub image: String,
    pub description: String,
    pub price: i32,
    pub on_offer: bool,
    #[expect(dead_code, reason = "schema field driving the listing order")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new destination records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = destinations)]
pub(crate) struct NewDestinationRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub image: &'a str,
    pub description: &'a str,
    pub price: i32,
    pub on_offer: bool,
}
