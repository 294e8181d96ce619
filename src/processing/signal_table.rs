//! Per-beacon signal state and staleness management

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::SENTINEL_WEAK_RSSI;
use crate::processing::smoothing::RollingAverage;

/// Mutable state for one beacon index
#[derive(Debug, Clone)]
pub struct SignalSlot {
    rssi: f64,
    last_seen_ms: Option<u64>,
    fresh: bool,
    smoother: RollingAverage,
}

impl SignalSlot {
    fn new(smoothing_window: usize) -> Self {
        Self {
            rssi: SENTINEL_WEAK_RSSI,
            last_seen_ms: None,
            fresh: false,
            smoother: RollingAverage::new(smoothing_window),
        }
    }

    pub fn rssi(&self) -> f64 {
        self.rssi
    }

    pub fn last_seen_ms(&self) -> Option<u64> {
        self.last_seen_ms
    }

    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    fn demote(&mut self) {
        self.rssi = SENTINEL_WEAK_RSSI;
        self.last_seen_ms = None;
        self.fresh = false;
        self.smoother.clear();
    }
}

/// Copy of a slot handed to readers outside the ingest lock
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlotSnapshot {
    pub index: usize,
    pub rssi: f64,
    pub last_seen_ms: Option<u64>,
    pub fresh: bool,
}

/// Smoothed RSSI table indexed by beacon index.
///
/// Slots are created once and recycled for the table's lifetime. A slot is
/// fresh from the moment it receives a reading until a sweep finds it
/// older than `stale_timeout_ms`.
#[derive(Debug, Clone)]
pub struct SignalTable {
    slots: Vec<SignalSlot>,
    stale_timeout_ms: u64,
}

impl SignalTable {
    pub fn new(beacon_count: usize, smoothing_window: usize, stale_timeout_ms: u64) -> Self {
        Self {
            slots: (0..beacon_count)
                .map(|_| SignalSlot::new(smoothing_window))
                .collect(),
            stale_timeout_ms,
        }
    }

    /// Fold a raw reading into the slot's moving average and mark it fresh.
    ///
    /// A reading delivered late still counts toward the average but never
    /// moves `last_seen_ms` backwards.
    ///
    /// Returns the new smoothed RSSI, or `None` if `index` is out of range.
    pub fn update(&mut self, index: usize, raw_rssi: f64, now_ms: u64) -> Option<f64> {
        let slot = self.slots.get_mut(index)?;
        let smoothed = slot.smoother.push(raw_rssi);
        slot.rssi = smoothed;
        slot.last_seen_ms = Some(slot.last_seen_ms.map_or(now_ms, |seen| seen.max(now_ms)));
        slot.fresh = true;
        Some(smoothed)
    }

    /// Demote every fresh slot whose age exceeds the timeout.
    ///
    /// Returns the indices that went stale during this sweep. A demoted
    /// slot loses its timestamp, so it is reported exactly once.
    pub fn sweep_stale(&mut self, now_ms: u64) -> Vec<usize> {
        let timeout = self.stale_timeout_ms;
        let mut demoted = Vec::new();

        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(last_seen) = slot.last_seen_ms else {
                continue;
            };
            let age = now_ms.saturating_sub(last_seen);
            if age > timeout {
                debug!(beacon = index, age_ms = age, "beacon reading went stale");
                slot.demote();
                demoted.push(index);
            }
        }

        if !demoted.is_empty() && self.fresh_count() == 0 {
            warn!("no beacons in range");
        }
        demoted
    }

    /// Fresh slot indices in ascending order
    pub fn fresh_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.fresh)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn fresh_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.fresh).count()
    }

    /// Fresh beacon with the highest smoothed RSSI, lowest index on ties
    pub fn strongest(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, slot) in self.slots.iter().enumerate() {
            if !slot.fresh {
                continue;
            }
            match best {
                Some((_, rssi)) if slot.rssi <= rssi => {}
                _ => best = Some((index, slot.rssi)),
            }
        }
        best.map(|(index, _)| index)
    }

    pub fn slot(&self, index: usize) -> Option<&SignalSlot> {
        self.slots.get(index)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn snapshot(&self) -> Vec<SlotSnapshot> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| SlotSnapshot {
                index,
                rssi: slot.rssi,
                last_seen_ms: slot.last_seen_ms,
                fresh: slot.fresh,
            })
            .collect()
    }
}
