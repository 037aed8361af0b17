//! Destination seed registry parsing and the built-in sample dataset.
//!
//! This crate defines the JSON format used to seed the destination catalog at
//! deployment time. It is independent of backend domain types to avoid
//! circular dependencies: the backend converts [`DestinationRecord`] values
//! into its own validated entities before persisting them.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading seed registries from JSON strings or files
//! - Field validation mirroring backend constraints (name length, price sign)
//! - A built-in sample dataset for demo deployments
//!
//! # Example
//!
//! ```
//! use destination_data::SeedRegistry;
//!
//! let json = r#"{
//!     "version": 1,
//!     "destinations": [{
//!         "name": "Lalibela",
//!         "image": "pics/lalibela.jpg",
//!         "description": "Rock-hewn churches.",
//!         "price": 2500,
//!         "onOffer": true
//!     }]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! assert_eq!(registry.destinations().len(), 1);
//! ```

mod error;
mod record;
mod registry;

pub use error::{RecordValidationError, RegistryError};
pub use record::{DESTINATION_NAME_MAX, DestinationRecord};
pub use registry::{REGISTRY_VERSION, SeedRegistry};
