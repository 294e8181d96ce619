use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::algorithms::distance::{DistanceModel, RatioFit};
use crate::core::{
    DEFAULT_EPOCH_MS, DEFAULT_SMOOTHING_WINDOW, DEFAULT_STALE_TIMEOUT_MS, TRILATERATION_BEACONS,
};
use crate::utils::directory::BeaconDirectory;

/// Pipeline-wide tuning parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Age after which a beacon reading is demoted to stale (milliseconds)
    pub stale_timeout_ms: u64,
    /// Length of one proximity voting epoch (milliseconds)
    pub epoch_ms: u64,
    /// Raw readings averaged per beacon; oldest reading is dropped when full
    pub smoothing_window: usize,
    /// Calibration curve used to turn smoothed RSSI into meters
    pub distance_model: DistanceModel,
    /// Curve coefficients for the piecewise ratio model
    pub ratio_fit: RatioFit,
    /// Lower clamp for distance estimates (meters)
    pub min_distance_m: f64,
    /// Upper clamp for distance estimates (meters)
    pub max_distance_m: f64,
    /// Relative tolerance under which the trilateration determinant counts as zero
    pub degenerate_epsilon: f64,
    /// Advertised-name tags that admit a device; empty admits everything
    pub name_filters: Vec<String>,
    /// Fresh beacons needed before a fix is attempted
    pub min_fresh_beacons: usize,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            stale_timeout_ms: DEFAULT_STALE_TIMEOUT_MS,
            epoch_ms: DEFAULT_EPOCH_MS,
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            distance_model: DistanceModel::LogDistance,
            ratio_fit: RatioFit::default(),
            min_distance_m: 0.01,
            max_distance_m: 1000.0,
            degenerate_epsilon: 1e-9,
            name_filters: vec!["Beacon".to_string(), "BCPro".to_string()],
            min_fresh_beacons: TRILATERATION_BEACONS,
        }
    }
}

/// One row of the beacon directory resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeaconRow {
    pub index: usize,
    /// MAC address or platform device id, matched exactly
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub reference_rssi_at_1m: f64,
    pub path_loss_exponent: f64,
}

/// On-disk layout of a configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub system: SystemConfig,
    pub beacons: Vec<BeaconRow>,
}

/// Startup configuration failures. All of them are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid {parameter} = {value}: {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
    #[error("beacon directory is empty")]
    EmptyDirectory,
    #[error("duplicate beacon id '{id}' (indices {first} and {second})")]
    DuplicateId {
        id: String,
        first: usize,
        second: usize,
    },
    #[error("duplicate beacon index {index}")]
    DuplicateIndex { index: usize },
    #[error("beacon indices must be dense 0..{count}, missing {missing}")]
    IndexGap { count: usize, missing: usize },
    #[error("beacon '{id}' has non-finite {field}")]
    NonFinite { id: String, field: &'static str },
    #[error("beacon '{id}' path-loss exponent must be positive, got {value}")]
    InvalidPathLoss { id: String, value: f64 },
}

impl ConfigError {
    fn invalid(parameter: &str, value: impl ToString, reason: &str) -> Self {
        ConfigError::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl SystemConfig {
    /// Reject parameter combinations that would stall or destabilize the pipeline
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stale_timeout_ms == 0 {
            return Err(ConfigError::invalid(
                "stale_timeout_ms",
                self.stale_timeout_ms,
                "must be greater than zero",
            ));
        }
        if self.epoch_ms == 0 {
            return Err(ConfigError::invalid(
                "epoch_ms",
                self.epoch_ms,
                "must be greater than zero",
            ));
        }
        if self.smoothing_window == 0 {
            return Err(ConfigError::invalid(
                "smoothing_window",
                self.smoothing_window,
                "must hold at least one reading",
            ));
        }
        if !self.min_distance_m.is_finite() || self.min_distance_m <= 0.0 {
            return Err(ConfigError::invalid(
                "min_distance_m",
                self.min_distance_m,
                "must be a positive finite distance",
            ));
        }
        if !self.max_distance_m.is_finite() || self.max_distance_m < self.min_distance_m {
            return Err(ConfigError::invalid(
                "max_distance_m",
                self.max_distance_m,
                "must be finite and not below min_distance_m",
            ));
        }
        if !self.degenerate_epsilon.is_finite() || self.degenerate_epsilon < 0.0 {
            return Err(ConfigError::invalid(
                "degenerate_epsilon",
                self.degenerate_epsilon,
                "must be a non-negative finite tolerance",
            ));
        }
        let fit = &self.ratio_fit;
        if !(fit.scale.is_finite() && fit.exponent.is_finite() && fit.offset.is_finite()) {
            return Err(ConfigError::invalid(
                "ratio_fit",
                format!("{:?}", fit),
                "coefficients must be finite",
            ));
        }
        if self.min_fresh_beacons < TRILATERATION_BEACONS {
            return Err(ConfigError::invalid(
                "min_fresh_beacons",
                self.min_fresh_beacons,
                "2D trilateration needs at least three beacons",
            ));
        }
        Ok(())
    }
}

/// Loads and validates the system configuration and beacon directory
#[derive(Debug, Clone)]
pub struct ConfigurationManager {
    system_config: SystemConfig,
    directory: BeaconDirectory,
    config_file_path: Option<String>,
}

impl ConfigurationManager {
    /// Build from already-parsed parts, validating both
    pub fn new(system_config: SystemConfig, rows: Vec<BeaconRow>) -> Result<Self, ConfigError> {
        system_config.validate()?;
        let directory = BeaconDirectory::from_rows(rows)?;
        Ok(Self {
            system_config,
            directory,
            config_file_path: None,
        })
    }

    /// Parse a JSON document with `system` and `beacons` sections
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_json::from_str(content)?;
        Self::new(file.system, file.beacons)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path_str.clone(),
            source,
        })?;

        let mut manager = Self::from_json(&content)?;
        info!(
            path = %path_str,
            beacons = manager.directory.len(),
            "loaded beacon directory"
        );
        manager.config_file_path = Some(path_str);
        Ok(manager)
    }

    pub fn system_config(&self) -> &SystemConfig {
        &self.system_config
    }

    pub fn directory(&self) -> &BeaconDirectory {
        &self.directory
    }

    pub fn config_file_path(&self) -> Option<&str> {
        self.config_file_path.as_deref()
    }

    /// Serialize the current configuration back into file layout
    pub fn to_json(&self) -> Result<String, ConfigError> {
        let file = ConfigFile {
            system: self.system_config.clone(),
            beacons: self.directory.rows(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    pub fn into_parts(self) -> (SystemConfig, BeaconDirectory) {
        debug!(beacons = self.directory.len(), "configuration handed to engine");
        (self.system_config, self.directory)
    }
}
