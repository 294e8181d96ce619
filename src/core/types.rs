//! Core data types for the wayfinding pipeline

use serde::{Deserialize, Serialize};

/// 2D point on the building map, in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Fixed beacon with map coordinates and calibration constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeaconDescriptor {
    pub id: String,
    pub index: usize,
    pub position: Point,
    /// Expected RSSI at 1 m (dBm); doubles as tx power for the ratio model
    pub reference_rssi_at_1m: f64,
    pub path_loss_exponent: f64,
}

/// Published position snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionEstimate {
    pub x: f64,
    pub y: f64,
    pub computed_at_ms: u64,
    /// Beacon indices the fix was solved from, closest first
    pub beacons: [usize; 3],
}

impl PositionEstimate {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
