//! Callback registry for pushing published values to listeners

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::algorithms::EpochResult;
use crate::core::PositionEstimate;

/// Invoked after each newly published position
pub type PositionCallback = Arc<dyn Fn(&PositionEstimate) + Send + Sync>;

/// Invoked after each closed proximity epoch
pub type ProximityCallback = Arc<dyn Fn(&EpochResult) + Send + Sync>;

/// Callback registration handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackHandle(u32);

impl CallbackHandle {
    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Registered listeners, kept in registration order
#[derive(Default)]
pub struct CallbackRegistry {
    counter: u32,
    position: BTreeMap<CallbackHandle, PositionCallback>,
    proximity: BTreeMap<CallbackHandle, ProximityCallback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_handle(&mut self) -> CallbackHandle {
        self.counter += 1;
        CallbackHandle(self.counter)
    }

    pub fn register_position(&mut self, callback: PositionCallback) -> CallbackHandle {
        let handle = self.next_handle();
        self.position.insert(handle, callback);
        handle
    }

    pub fn register_proximity(&mut self, callback: ProximityCallback) -> CallbackHandle {
        let handle = self.next_handle();
        self.proximity.insert(handle, callback);
        handle
    }

    /// Returns false for a handle that was never issued or already removed
    pub fn unregister(&mut self, handle: CallbackHandle) -> bool {
        self.position.remove(&handle).is_some() || self.proximity.remove(&handle).is_some()
    }

    /// Clone out the position listeners so they can run without the registry lock
    pub fn position_listeners(&self) -> Vec<PositionCallback> {
        self.position.values().cloned().collect()
    }

    pub fn proximity_listeners(&self) -> Vec<ProximityCallback> {
        self.proximity.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.position.len() + self.proximity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
