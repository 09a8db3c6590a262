//! Contact model.

use serde::{Deserialize, Serialize};

use officex_core::types::{
    EvmPublicAddress, ExternalID, ExternalPayload, GroupID, GroupInviteID, ICPPrincipalString,
    LabelValue, UnixTimestampMs, UserID,
};

use crate::permission::SystemPermissionType;

/// A person known to the drive.
///
/// The identifier is derived from the contact's ICP principal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Principal-derived user identifier.
    pub id: UserID,
    /// Display name.
    pub name: String,
    /// Avatar URL.
    #[serde(default)]
    pub avatar: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// URL notified about events concerning this contact.
    #[serde(default)]
    pub notifications_url: String,
    /// Note visible to everyone.
    #[serde(default)]
    pub public_note: String,
    /// Note visible to the owner only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_note: Option<String>,
    /// EVM address.
    #[serde(default)]
    pub evm_public_address: EvmPublicAddress,
    /// ICP principal.
    pub icp_principal: ICPPrincipalString,
    /// Groups the contact belongs to.
    #[serde(default)]
    pub groups: Vec<GroupID>,
    /// Attached label values.
    #[serde(default)]
    pub labels: Vec<LabelValue>,
    /// Last time the contact was seen.
    #[serde(default)]
    pub last_online_ms: UnixTimestampMs,
    /// Creation time.
    pub created_at: UnixTimestampMs,
    /// Placeholder user the contact was redeemed from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_placeholder_user_id: Option<UserID>,
    /// Code redeeming a placeholder contact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redeem_code: Option<String>,
    /// Identifier in an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    /// Payload attached by an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

impl Contact {
    /// Whether the identifier matches the principal.
    pub fn is_consistent(&self) -> bool {
        self.id.principal() == self.icp_principal
    }
}

/// A group the contact was invited into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactGroupInvitePreview {
    /// The group.
    pub group_id: GroupID,
    /// The invite that admitted the contact.
    pub invite_id: GroupInviteID,
    /// Whether the contact administers the group.
    pub is_admin: bool,
    /// Group name.
    pub group_name: String,
    /// Group avatar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_avatar: Option<String>,
}

/// Contact with display fields for the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactFE {
    /// The stored contact.
    #[serde(flatten)]
    pub contact: Contact,
    /// Groups the contact was invited into.
    #[serde(default)]
    pub group_previews: Vec<ContactGroupInvitePreview>,
    /// What the requester may do with this contact.
    #[serde(default)]
    pub permission_previews: Vec<SystemPermissionType>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_contact_fe_composition() {
        let value = json!({
            "id": "UserID_2vxsx-fae",
            "name": "Anon",
            "icp_principal": "2vxsx-fae",
            "created_at": 0,
            "group_previews": [{
                "group_id": "GroupID_g",
                "invite_id": "GroupInviteID_i",
                "is_admin": false,
                "group_name": "Ops"
            }],
            "permission_previews": ["VIEW"]
        });
        let fe: ContactFE = serde_json::from_value(value).unwrap();
        assert!(fe.contact.is_consistent());
        assert_eq!(fe.group_previews[0].group_name, "Ops");
        assert!(fe.contact.private_note.is_none());
    }
}
