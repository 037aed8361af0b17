//! Bootstrap configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";

/// Configuration values controlling admin account bootstrap at startup.
///
/// The password has no default on purpose: enabling bootstrap without
/// supplying `ADMIN_BOOTSTRAP_PASSWORD` is an error rather than a
/// well-known credential.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ADMIN_BOOTSTRAP")]
pub struct AdminBootstrapSettings {
    /// Enable admin bootstrap on startup.
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// Username for the elevated account.
    pub username: Option<String>,
    /// Email for the elevated account.
    pub email: Option<String>,
    /// Password for the elevated account; required when enabled.
    pub password: Option<String>,
}

impl AdminBootstrapSettings {
    /// Return the configured username, falling back to the default.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(DEFAULT_ADMIN_USERNAME)
    }

    /// Return the configured email, falling back to the default.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or(DEFAULT_ADMIN_EMAIL)
    }
}

/// Configuration values controlling destination seeding at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DESTINATION_SEED")]
pub struct DestinationSeedSettings {
    /// Enable destination seeding on startup.
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// Optional registry file override; the bundled dataset is used when
    /// absent.
    pub registry_path: Option<PathBuf>,
}
