//! Application-facing API
//!
//! `LocatorEngine` is the single entry point: scan events go in, position
//! estimates and closest-beacon results come out, either polled or pushed
//! through registered callbacks.

pub mod callback;
pub mod engine;
pub mod types;

pub use callback::{CallbackHandle, CallbackRegistry, PositionCallback, ProximityCallback};
pub use engine::{EpochTimer, LocatorEngine};
pub use types::{BeaconReading, EngineStats, IngestOutcome, PositionUpdate};
