//! Scan source error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// Source has been stopped; no further events will arrive
    #[error("scan source stopped")]
    Stopped,
    #[error("failed to read scan log: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed scan event on line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl ScanError {
    /// Malformed input is skipped; anything else ends the stream
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ScanError::Malformed { .. })
    }
}

pub type ScanResult<T> = Result<T, ScanError>;
