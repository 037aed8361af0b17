//! Seed registry document: parsing, validation, and the built-in dataset.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::record::DestinationRecord;

/// Registry format version this crate reads and writes.
pub const REGISTRY_VERSION: u32 = 1;

/// Built-in sample dataset shipped with the crate.
const BUILTIN_JSON: &str = include_str!("../data/destinations.json");

/// A parsed and validated destination seed registry.
///
/// ## Invariants
///
/// - `version` equals [`REGISTRY_VERSION`].
/// - Every record passes [`DestinationRecord::validate`].
/// - Record names are unique (seeding is keyed on the name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedRegistry {
    version: u32,
    destinations: Vec<DestinationRecord>,
}

impl SeedRegistry {
    /// Parse and validate a registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the document fails to parse, declares
    /// an unsupported version, contains an invalid record, or repeats a
    /// destination name.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let registry: Self = serde_json::from_str(json)?;
        registry.validate()?;
        Ok(registry)
    }

    /// Read and parse a registry file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Read`] when the file cannot be read, plus any
    /// failure [`Self::from_json`] can raise.
    pub fn load_from_path(path: &Path) -> Result<Self, RegistryError> {
        let json = fs::read_to_string(path).map_err(|source| RegistryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The sample dataset bundled with the crate.
    ///
    /// # Panics
    ///
    /// Panics if the bundled JSON is invalid, which the crate's own tests
    /// rule out before release.
    #[must_use]
    pub fn built_in() -> Self {
        match Self::from_json(BUILTIN_JSON) {
            Ok(registry) => registry,
            Err(err) => panic!("bundled dataset must be valid: {err}"),
        }
    }

    /// Records in document order.
    #[must_use]
    pub fn destinations(&self) -> &[DestinationRecord] {
        &self.destinations
    }

    /// Consume the registry, yielding its records.
    #[must_use]
    pub fn into_destinations(self) -> Vec<DestinationRecord> {
        self.destinations
    }

    fn validate(&self) -> Result<(), RegistryError> {
        if self.version != REGISTRY_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                found: self.version,
                expected: REGISTRY_VERSION,
            });
        }

        let mut seen = HashSet::new();
        for record in &self.destinations {
            record
                .validate()
                .map_err(|source| RegistryError::InvalidRecord {
                    name: record.name.clone(),
                    source,
                })?;
            if !seen.insert(record.name.trim().to_owned()) {
                return Err(RegistryError::DuplicateName {
                    name: record.name.clone(),
                });
            }
        }
        Ok(())
    }
}
