//! Drive model.

use serde::{Deserialize, Serialize};

use officex_core::types::{
    DriveID, ExternalID, ExternalPayload, HostURL, ICPPrincipalString, LabelValue,
    UnixTimestampMs,
};

use crate::permission::SystemPermissionType;

/// A drive (organization) reachable at a host URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drive {
    /// Principal-derived drive identifier.
    pub id: DriveID,
    /// Display name.
    pub name: String,
    /// ICP principal of the drive.
    pub icp_principal: ICPPrincipalString,
    /// Note visible to everyone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_note: Option<String>,
    /// Note visible to the owner only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_note: Option<String>,
    /// Base URL of the drive.
    pub host_url: HostURL,
    /// Last time the drive was indexed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_indexed_ms: Option<UnixTimestampMs>,
    /// Attached label values.
    #[serde(default)]
    pub labels: Vec<LabelValue>,
    /// Creation time.
    pub created_at: UnixTimestampMs,
    /// Identifier in an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    /// Payload attached by an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

/// Drive with display fields for the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveFE {
    /// The stored drive.
    #[serde(flatten)]
    pub drive: Drive,
    /// What the requester may do with this drive.
    #[serde(default)]
    pub permission_previews: Vec<SystemPermissionType>,
}
