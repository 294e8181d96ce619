//! Scan source trait

use crate::scanner::{ScanEvent, ScanResult};

/// Abstraction over whatever delivers advertisements.
///
/// The engine never drives the radio; a source only has to hand over
/// events in arrival order and report when it has stopped.
pub trait ScanSource {
    /// Next event if one is available.
    /// Returns Ok(None) when nothing is pending right now.
    /// Returns Err(ScanError::Stopped) once delivery has ended.
    fn next_event(&mut self) -> ScanResult<Option<ScanEvent>>;

    /// Whether the source is still delivering events
    fn is_scanning(&self) -> bool;

    /// Stop delivery; later calls to `next_event` report `Stopped`
    fn stop(&mut self);
}
