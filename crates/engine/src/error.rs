//! Engine error type.
//!
//! Wraps domain rule violations together with the I/O and serialization
//! failures that only the engine can hit.

use mystery_encounters_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A domain rule rejected the operation.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Snapshot could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Snapshot file could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot was written by an incompatible version.
    #[error("Unsupported snapshot version {found}, expected {expected}")]
    SnapshotVersion { found: u32, expected: u32 },
}

impl EngineError {
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}
