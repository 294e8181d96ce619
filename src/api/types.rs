//! Published values and ingest outcomes

use serde::Serialize;

use crate::algorithms::EpochResult;
use crate::core::PositionEstimate;

/// What happened to a position fix on one ingest step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionUpdate {
    Published(PositionEstimate),
    /// Fewer fresh beacons than a fix needs; previous estimate retained
    InsufficientBeacons { fresh: usize },
    /// Degenerate geometry or non-finite result; previous estimate retained
    Indeterminate,
}

/// Result of feeding one scan event through the pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    /// Advertised name failed the admissibility check
    Filtered,
    /// Device id is not in the beacon directory
    UnknownDevice,
    Accepted {
        beacon: usize,
        smoothed_rssi: f64,
        position: PositionUpdate,
        /// Set when this event closed a voting epoch
        epoch: Option<EpochResult>,
    },
}

impl IngestOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, IngestOutcome::Accepted { .. })
    }

    pub fn published_position(&self) -> Option<PositionEstimate> {
        match self {
            IngestOutcome::Accepted {
                position: PositionUpdate::Published(estimate),
                ..
            } => Some(*estimate),
            _ => None,
        }
    }
}

/// Per-beacon view for a presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeaconReading {
    pub index: usize,
    pub id: String,
    pub smoothed_rssi: f64,
    /// Only present while the reading is fresh
    pub distance_m: Option<f64>,
    pub fresh: bool,
    pub last_seen_ms: Option<u64>,
}

/// Running counters over the engine's lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    pub events_seen: u64,
    pub filtered: u64,
    pub unknown_device: u64,
    pub accepted: u64,
    pub positions_published: u64,
    pub insufficient_beacons: u64,
    pub indeterminate_solves: u64,
    pub stale_demotions: u64,
    pub epochs_closed: u64,
}
