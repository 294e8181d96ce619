//! Configuration loading and the beacon directory

pub mod config;
pub mod directory;

pub use config::{BeaconRow, ConfigError, ConfigFile, ConfigurationManager, SystemConfig};
pub use directory::BeaconDirectory;
