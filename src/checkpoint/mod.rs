//! Save and restore of a machine's current state.
//!
//! An [`InstanceState`] is a small key/value bundle holding integer fields.
//! State machines write their current key into it so a UI that is torn down
//! and rebuilt can resume in the same state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for the instance state format
pub const INSTANCE_STATE_VERSION: u32 = 1;

/// Field under which a state machine stores its current key.
pub const STATE_MACHINE_CURRENT_KEY: &str = "STATE_MACHINE_CURRENT_KEY";

/// Serializable bundle of saved values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstanceState {
    /// Format version
    pub version: u32,

    /// Unique identifier of this snapshot
    pub id: String,

    /// When the snapshot was taken
    pub saved_at: DateTime<Utc>,

    values: BTreeMap<String, i32>,
}

impl InstanceState {
    /// Create an empty bundle stamped with a fresh id and the current time.
    pub fn new() -> Self {
        Self {
            version: INSTANCE_STATE_VERSION,
            id: Uuid::new_v4().to_string(),
            saved_at: Utc::now(),
            values: BTreeMap::new(),
        }
    }

    /// Store `value` under `name`, replacing any previous one.
    pub fn put_int(&mut self, name: impl Into<String>, value: i32) {
        self.values.insert(name.into(), value);
    }

    /// Value stored under `name`.
    pub fn get_int(&self, name: &str) -> Option<i32> {
        self.values.get(name).copied()
    }

    /// Read `name`, falling back to `default` when the field is absent.
    pub fn get_int_or(&self, name: &str, default: i32) -> i32 {
        self.get_int(name).unwrap_or(default)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from JSON, checking the bundle version.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let state: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        state.check_version()
    }

    /// Serialize to a compact binary blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Deserialize a binary blob, checking the bundle version.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let state: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        state.check_version()
    }

    fn check_version(self) -> Result<Self, CheckpointError> {
        if self.version != INSTANCE_STATE_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: INSTANCE_STATE_VERSION,
            });
        }
        Ok(self)
    }
}

impl Default for InstanceState {
    fn default() -> Self {
        Self::new()
    }
}
