//! Boundary with the radio scanning subsystem
//!
//! The scanner itself is external. This module defines the events it
//! delivers, the cheap name-based admissibility check applied before
//! identity resolution, and a source trait with a scripted mock used for
//! tests and offline replay.

pub mod source;
pub mod filter;
pub mod mock;
pub mod error;

pub use source::ScanSource;
pub use filter::NameFilter;
pub use mock::MockScanner;
pub use error::{ScanError, ScanResult};

use serde::{Deserialize, Serialize};

/// One advertisement heard by the scanner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanEvent {
    pub device_id: String,
    #[serde(default)]
    pub device_name: Option<String>,
    pub rssi_dbm: i16,
    /// Monotonic milliseconds on the receiver's clock
    pub timestamp_ms: u64,
}

impl ScanEvent {
    pub fn new(device_id: impl Into<String>, rssi_dbm: i16, timestamp_ms: u64) -> Self {
        Self {
            device_id: device_id.into(),
            device_name: None,
            rssi_dbm,
            timestamp_ms,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.device_name = Some(name.into());
        self
    }
}
