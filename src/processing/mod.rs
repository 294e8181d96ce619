//! Signal smoothing and per-beacon state

pub mod smoothing;
pub mod signal_table;

pub use smoothing::RollingAverage;
pub use signal_table::{SignalSlot, SignalTable, SlotSnapshot};
