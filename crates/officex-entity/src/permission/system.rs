//! System permission grants on tables and records.

use serde::{Deserialize, Serialize};

use officex_core::types::{
    ExternalID, ExternalPayload, GranteeID, PlaceholderPermissionGranteeID, SystemPermissionID,
    SystemResourceID, UnixTimestampMs, UserID,
};

use super::kind::SystemPermissionType;
use super::metadata::PermissionMetadata;

/// A grant of system permissions on a table or a single record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemPermission {
    /// Unique grant identifier.
    pub id: SystemPermissionID,
    /// `TABLE_<name>` or a record identifier.
    pub resource_id: SystemResourceID,
    /// Who receives the grant.
    pub granted_to: GranteeID,
    /// Who made the grant.
    pub granted_by: UserID,
    /// What the grant allows.
    pub permission_types: Vec<SystemPermissionType>,
    /// Start of validity, `<= 0` for immediately.
    pub begin_date_ms: i64,
    /// End of validity, `-1` for never.
    pub expiry_date_ms: i64,
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

impl SystemPermission {
    /// Whether the grant is in effect at `now_ms`.
    pub fn is_active(&self, now_ms: UnixTimestampMs) -> bool {
        super::window_covers(self.begin_date_ms, self.expiry_date_ms, now_ms)
    }
}

/// System permission with display fields for the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemPermissionFE {
    /// The stored grant.
    #[serde(flatten)]
    pub permission: SystemPermission,
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
    pub permission_previews: Vec<SystemPermissionType>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use officex_core::types::SystemTableValueEnum;
    use serde_json::json;

    #[test]
    fn test_table_grant_with_metadata() {
        let value = json!({
            "id": "SystemPermissionID_1",
            "resource_id": "TABLE_WEBHOOKS",
            "granted_to": "GroupID_ops",
            "granted_by": "UserID_alice",
            "permission_types": ["VIEW", "UPDATE"],
            "begin_date_ms": 0,
            "expiry_date_ms": -1,
            "created_at": 0,
            "last_modified_at": 0,
            "metadata": {"metadata_type": "LABELS", "content": {"Labels": "ops-"}}
        });
        let grant: SystemPermission = serde_json::from_value(value).unwrap();
        assert_eq!(
            grant.resource_id,
            SystemResourceID::Table(SystemTableValueEnum::Webhooks)
        );
        assert_eq!(
            grant.permission_types,
            vec![SystemPermissionType::View, SystemPermissionType::Edit]
        );
        assert!(grant.is_active(5));

        let fe = SystemPermissionFE {
            permission: grant,
            resource_name: Some("Webhooks".into()),
            grantee_name: None,
            grantee_avatar: None,
            granter_name: None,
            permission_previews: vec![SystemPermissionType::View],
        };
        let value = serde_json::to_value(&fe).unwrap();
        assert_eq!(value["resource_id"], json!("TABLE_WEBHOOKS"));
        assert_eq!(value["resource_name"], json!("Webhooks"));
        assert!(value.get("grantee_name").is_none());
    }
}
