//! Time-windowed majority vote over the per-event strongest beacon

use serde::Serialize;

use crate::core::NO_DATA;

/// Outcome of closing one voting epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EpochResult {
    /// Winning beacon index, or [`NO_DATA`] if the epoch had no votes
    pub closest: i32,
    pub votes: usize,
    pub epoch_started_ms: u64,
    pub closed_at_ms: u64,
}

/// Accumulates one vote per scan event and reduces them to the statistical
/// mode once per wall-clock epoch.
///
/// The first epoch begins at the first timestamp the voter sees. Later
/// epochs stay aligned to multiples of `epoch_ms` from that origin, so a
/// late close does not shift subsequent boundaries.
#[derive(Debug, Clone)]
pub struct ProximityVoter {
    epoch_ms: u64,
    epoch_started_ms: Option<u64>,
    window: Vec<usize>,
}

impl ProximityVoter {
    pub fn new(epoch_ms: u64) -> Self {
        Self {
            epoch_ms: epoch_ms.max(1),
            epoch_started_ms: None,
            window: Vec::new(),
        }
    }

    /// Record the strongest beacon for the current event
    pub fn vote(&mut self, index: usize, now_ms: u64) {
        self.epoch_started_ms.get_or_insert(now_ms);
        self.window.push(index);
    }

    pub fn is_epoch_elapsed(&self, now_ms: u64) -> bool {
        match self.epoch_started_ms {
            Some(start) => now_ms.saturating_sub(start) >= self.epoch_ms,
            None => false,
        }
    }

    /// Close the current epoch if it has elapsed.
    ///
    /// The window is reduced and cleared whether or not it held votes. The
    /// first call on an idle voter only starts the epoch clock.
    pub fn close_epoch(&mut self, now_ms: u64) -> Option<EpochResult> {
        let Some(start) = self.epoch_started_ms else {
            self.epoch_started_ms = Some(now_ms);
            return None;
        };
        if !self.is_epoch_elapsed(now_ms) {
            return None;
        }

        let result = EpochResult {
            closest: reduce_mode(&mut self.window),
            votes: self.window.len(),
            epoch_started_ms: start,
            closed_at_ms: now_ms,
        };
        self.window.clear();

        let elapsed_epochs = (now_ms - start) / self.epoch_ms;
        self.epoch_started_ms = Some(start + elapsed_epochs * self.epoch_ms);
        Some(result)
    }

    pub fn pending_votes(&self) -> &[usize] {
        &self.window
    }

    pub fn epoch_started_ms(&self) -> Option<u64> {
        self.epoch_started_ms
    }

    pub fn epoch_ms(&self) -> u64 {
        self.epoch_ms
    }
}

/// Most frequent index in `votes`; the lowest index wins ties.
///
/// Sorts in place, then scans runs of equal values. Returns [`NO_DATA`]
/// for an empty window.
pub fn reduce_mode(votes: &mut [usize]) -> i32 {
    votes.sort_unstable();

    let mut best: Option<(usize, usize)> = None;
    let mut run_start = 0;
    for i in 1..=votes.len() {
        if i == votes.len() || votes[i] != votes[run_start] {
            let run_len = i - run_start;
            if best.map_or(true, |(_, len)| run_len > len) {
                best = Some((votes[run_start], run_len));
            }
            run_start = i;
        }
    }

    best.map_or(NO_DATA, |(value, _)| value as i32)
}
