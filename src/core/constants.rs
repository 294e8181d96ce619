//! Signal and pipeline constants

/// RSSI assigned to a slot that has never been heard or has gone stale (dBm).
/// Sits below any reading a BLE radio reports.
pub const SENTINEL_WEAK_RSSI: f64 = -999.0;

/// Closest-beacon value published when an epoch collected no votes.
pub const NO_DATA: i32 = -1;

/// Minimum number of simultaneously fresh beacons for a 2D fix.
pub const TRILATERATION_BEACONS: usize = 3;

/// Default age after which a reading no longer counts (milliseconds).
pub const DEFAULT_STALE_TIMEOUT_MS: u64 = 3000;

/// Default proximity voting epoch (milliseconds).
pub const DEFAULT_EPOCH_MS: u64 = 1000;

/// Default number of raw readings averaged per beacon.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;
