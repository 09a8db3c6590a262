//! State diff records.

use std::fmt;

use serde::{Deserialize, Serialize};

use officex_core::types::{DriveID, HostURL, StateDiffRecordID};

/// Runtime that produced a state diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StateDiffImplementation {
    /// A canister written in Rust.
    RustIcpCanister,
    /// A JavaScript runtime.
    JavascriptRuntime,
}

impl fmt::Display for StateDiffImplementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RustIcpCanister => write!(f, "RUST_ICP_CANISTER"),
            Self::JavascriptRuntime => write!(f, "JAVASCRIPT_RUNTIME"),
        }
    }
}

/// One state transition of a drive, replayable in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDiffRecord {
    /// Unique record identifier.
    pub id: StateDiffRecordID,
    /// Time of the transition in nanoseconds.
    pub timestamp_ns: u64,
    /// Free-form note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Drive the transition belongs to.
    pub drive_id: DriveID,
    /// URL of that drive.
    pub host_url: HostURL,
    /// Runtime that produced the diff.
    pub implementation: StateDiffImplementation,
    /// Patch from the prior state to the next one.
    pub diff_forward: String,
    /// Patch from the next state back to the prior one.
    pub diff_backward: String,
    /// Checksum of the state after applying `diff_forward`.
    pub checksum_forward: String,
    /// Checksum of the state after applying `diff_backward`.
    pub checksum_backward: String,
}
