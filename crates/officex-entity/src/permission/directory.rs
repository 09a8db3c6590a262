//! Directory permission grants.

use serde::{Deserialize, Serialize};

use officex_core::types::{
    DirectoryPermissionID, DirectoryResourceID, DriveFullFilePath, ExternalID, ExternalPayload,
    GranteeID, PlaceholderPermissionGranteeID, UnixTimestampMs, UserID,
};

use super::kind::DirectoryPermissionType;
use super::metadata::PermissionMetadata;

/// A grant of directory permissions on a file or folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryPermission {
    /// Unique grant identifier.
    pub id: DirectoryPermissionID,
    /// The file or folder the grant applies to.
    pub resource_id: DirectoryResourceID,
    /// Path of that resource when the grant was made.
    pub resource_path: DriveFullFilePath,
    /// Who receives the grant.
    pub granted_to: GranteeID,
    /// Who made the grant.
    pub granted_by: UserID,
    /// What the grant allows.
    pub permission_types: Vec<DirectoryPermissionType>,
    /// Start of validity, `<= 0` for immediately.
    pub begin_date_ms: i64,
    /// End of validity, `-1` for never.
    pub expiry_date_ms: i64,
    /// Whether the grant flows down to children.
    pub inheritable: bool,
    /// Free-form note.
    #[serde(default)]
    pub note: String,
    /// Creation time.
    pub created_at: UnixTimestampMs,
    /// Last modification time.
    pub last_modified_at: UnixTimestampMs,
    /// Placeholder the grant was redeemed from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_placeholder_grantee: Option<PlaceholderPermissionGranteeID>,
    /// Attached label values.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Code redeeming a placeholder grant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redeem_code: Option<String>,
    /// Optional metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PermissionMetadata>,
    /// Identifier in an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    /// Payload attached by an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

impl DirectoryPermission {
    /// Whether the grant is in effect at `now_ms`.
    pub fn is_active(&self, now_ms: UnixTimestampMs) -> bool {
        super::window_covers(self.begin_date_ms, self.expiry_date_ms, now_ms)
    }

    /// Whether the grant allows `required`.
    pub fn allows(&self, required: DirectoryPermissionType) -> bool {
        self.permission_types.iter().any(|held| held.satisfies(required))
    }
}

/// Directory permission with display fields for the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryPermissionFE {
    /// The stored grant.
    #[serde(flatten)]
    pub permission: DirectoryPermission,
    /// Name of the resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    /// Name of the grantee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grantee_name: Option<String>,
    /// Avatar of the grantee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grantee_avatar: Option<String>,
    /// Name of the granter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granter_name: Option<String>,
    /// What the requester may do with this grant.
    #[serde(default)]
    pub permission_previews: Vec<super::SystemPermissionType>,
}

/// One permission the requester holds on a listed resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryResourcePermissionFE {
    /// Grant the permission comes from.
    pub permission_id: String,
    /// The permission held.
    pub grant_type: DirectoryPermissionType,
}
