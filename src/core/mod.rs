//! Core types and constants for the wayfinding pipeline

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
