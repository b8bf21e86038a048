use crate::builder::BuildError;
use thiserror::Error;

/// Why a gate snapshot could not be written, read or restored.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Could not encode gate snapshot: {0}")]
    Encode(String),

    #[error("Could not decode gate snapshot: {0}")]
    Decode(String),

    #[error("Snapshot format v{found} is not readable by this build (expects v{supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The subscriber table holds an entry no gate could have written.
    #[error("Corrupt subscriber table: {0}")]
    Corrupt(String),

    #[error("Snapshot config no longer builds a gate: {0}")]
    Rebuild(#[from] BuildError),
}
