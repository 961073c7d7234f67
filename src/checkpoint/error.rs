//! Checkpoint error types.

use thiserror::Error;

/// Errors that can occur while encoding or decoding an instance state
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Instance state version is not supported by this version
    #[error("Unsupported instance state version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}
