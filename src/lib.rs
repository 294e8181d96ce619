//! BLE Indoor Wayfinding
//!
//! Turns a stream of BLE advertisement readings from fixed beacons into a
//! smoothed 2D position estimate by trilateration, and a debounced
//! "closest beacon" answer by majority vote over fixed time epochs.

pub mod core;
pub mod algorithms;
pub mod processing;
pub mod utils;
pub mod scanner;
pub mod api;

// Re-export commonly used types
pub use self::core::{BeaconDescriptor, Point, PositionEstimate, NO_DATA, SENTINEL_WEAK_RSSI};
pub use algorithms::{
    DistanceEstimator, DistanceModel, EpochResult, ProximityVoter, TrilaterationError,
    TrilaterationSolver,
};
pub use processing::{RollingAverage, SignalTable};
pub use utils::{BeaconDirectory, BeaconRow, ConfigError, ConfigurationManager, SystemConfig};
pub use scanner::{MockScanner, NameFilter, ScanError, ScanEvent, ScanSource};
pub use api::{BeaconReading, EngineStats, IngestOutcome, LocatorEngine, PositionUpdate};
