//! Error types raised while loading or validating seed registries.

use std::path::PathBuf;

/// Errors raised while loading or validating a seed registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Registry file could not be read from disk.
    #[error("failed to read registry at {path}: {source}")]
    Read {
        /// Path to the registry file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Registry JSON could not be parsed.
    #[error("registry parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Registry declares a format version this crate does not understand.
    #[error("unsupported registry version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version found in the document.
        found: u32,
        /// Version this crate supports.
        expected: u32,
    },
    /// Two records share the same destination name.
    #[error("duplicate destination name in registry: {name}")]
    DuplicateName {
        /// The offending name.
        name: String,
    },
    /// A record failed field validation.
    #[error("invalid record {name:?}: {source}")]
    InvalidRecord {
        /// Name of the offending record (may be empty).
        name: String,
        /// Validation failure detail.
        #[source]
        source: RecordValidationError,
    },
}

/// Field validation failures for a single [`crate::DestinationRecord`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordValidationError {
    /// Name was missing or blank once trimmed.
    #[error("destination name must not be empty")]
    EmptyName,
    /// Name exceeds the backend column limit.
    #[error("destination name must be at most {max} characters")]
    NameTooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// Image reference was missing or blank.
    #[error("image reference must not be empty")]
    EmptyImage,
    /// Description was missing or blank.
    #[error("description must not be empty")]
    EmptyDescription,
    /// Price was negative; zero is allowed.
    #[error("price must not be negative (got {price})")]
    NegativePrice {
        /// The offending price.
        price: i32,
    },
}
