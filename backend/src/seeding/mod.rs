//! Startup bootstrap: admin account creation and destination seeding.

pub mod config;
pub mod startup;

pub use config::{AdminBootstrapSettings, DestinationSeedSettings};
pub use startup::{
    StartupBootstrapError, bootstrap_admin_on_startup, seed_destinations_on_startup,
};
