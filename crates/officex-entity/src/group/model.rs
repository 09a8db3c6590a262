//! Group model.

use serde::{Deserialize, Serialize};

use officex_core::types::{
    DriveID, ExternalID, ExternalPayload, GroupID, GroupInviteID, HostURL, LabelValue,
    UnixTimestampMs, UserID,
};

use crate::permission::SystemPermissionType;

/// A named set of users that can receive grants together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Unique group identifier.
    pub id: GroupID,
    /// Display name.
    pub name: String,
    /// Owner of the group.
    pub owner: UserID,
    /// Avatar URL.
    #[serde(default)]
    pub avatar: String,
    /// Note visible to the owner only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_note: Option<String>,
    /// Note visible to everyone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_note: Option<String>,
    /// Invites carrying the admin role.
    #[serde(default)]
    pub admin_invites: Vec<GroupInviteID>,
    /// Invites carrying the member role.
    #[serde(default)]
    pub member_invites: Vec<GroupInviteID>,
    /// Creation time.
    pub created_at: UnixTimestampMs,
    /// Last modification time.
    pub last_modified_at: UnixTimestampMs,
    /// Drive hosting the group.
    pub drive_id: DriveID,
    /// URL of that drive.
    pub host_url: HostURL,
    /// Attached label values.
    #[serde(default)]
    pub labels: Vec<LabelValue>,
    /// Identifier in an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    /// Payload attached by an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

impl Group {
    /// Whether `invite` carries the admin role.
    pub fn is_admin_invite(&self, invite: &GroupInviteID) -> bool {
        self.admin_invites.contains(invite)
    }
}

/// One member as shown in a group listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMemberPreview {
    /// The member.
    pub user_id: UserID,
    /// Member name.
    pub name: String,
    /// Note about the member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Member avatar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// The group.
    pub group_id: GroupID,
    /// Whether the member administers the group.
    pub is_admin: bool,
    /// The invite that admitted the member.
    pub invite_id: GroupInviteID,
    /// Last time the member was seen.
    #[serde(default)]
    pub last_online_ms: UnixTimestampMs,
}

/// Group with display fields for the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupFE {
    /// The stored group.
    #[serde(flatten)]
    pub group: Group,
    /// Members of the group.
    #[serde(default)]
    pub member_previews: Vec<GroupMemberPreview>,
    /// What the requester may do with this group.
    #[serde(default)]
    pub permission_previews: Vec<SystemPermissionType>,
}
