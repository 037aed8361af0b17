//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the deployed schema exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation.
//!
//! Expected DDL (maintained by the deployment's migration tooling):
//!
//! ```sql
//! CREATE TABLE users (
//!     id UUID PRIMARY KEY,
//!     username VARCHAR(150) NOT NULL,
//!     email VARCHAR(254) NOT NULL,
//!     password_hash VARCHAR(255) NOT NULL,
//!     first_name VARCHAR(150),
//!     last_name VARCHAR(150),
//!     is_superuser BOOLEAN NOT NULL DEFAULT FALSE,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
//!     CONSTRAINT users_username_key UNIQUE (username),
//!     CONSTRAINT users_email_key UNIQUE (email)
//! );
//!
//! CREATE TABLE destinations (
//!     id UUID PRIMARY KEY,
//!     name VARCHAR(50) NOT NULL,
//!     image VARCHAR(255) NOT NULL,
//!     description TEXT NOT NULL,
//!     price INTEGER NOT NULL CHECK (price >= 0),
//!     on_offer BOOLEAN NOT NULL DEFAULT FALSE,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
//!     CONSTRAINT destinations_name_key UNIQUE (name)
//! );
//! ```
//!
//! The unique constraints are load-bearing: registration maps their
//! violations to user-facing duplicate outcomes, and seeding's
//! `ON CONFLICT (name) DO NOTHING` relies on `destinations_name_key`.

diesel::table! {
    /// Registered user accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name.
        #[max_length = 150]
        username -> Varchar,
        /// Unique contact address.
        #[max_length = 254]
        email -> Varchar,
        /// PHC-format password hash.
        #[max_length = 255]
        password_hash -> Varchar,
        /// Optional first name.
        #[max_length = 150]
        first_name -> Nullable<Varchar>,
        /// Optional last name.
        #[max_length = 150]
        last_name -> Nullable<Varchar>,
        /// Administrative access flag.
        is_superuser -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Destination catalog entries.
    destinations (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique display label (max 50 characters).
        #[max_length = 50]
        name -> Varchar,
        /// Relative path of the uploaded image.
        #[max_length = 255]
        image -> Varchar,
        /// Free-text description.
        description -> Text,
        /// Non-negative price.
        price -> Int4,
        /// Promotional flag.
        on_offer -> Bool,
        /// Record creation timestamp; listing order follows it.
        created_at -> Timestamptz,
    }
}
