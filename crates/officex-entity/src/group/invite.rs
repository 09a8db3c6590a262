//! Group invite model.

use std::fmt;

use serde::{Deserialize, Serialize};

use officex_core::types::{
    ExternalID, ExternalPayload, GroupID, GroupInviteID, GroupInviteeID, LabelValue,
    PlaceholderGroupInviteeID, UnixTimestampMs, UserID,
};

use crate::permission::SystemPermissionType;

/// Role granted by a group invite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupRole {
    /// Can manage the group.
    Admin,
    /// Regular member.
    #[default]
    Member,
}

impl fmt::Display for GroupRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "ADMIN"),
            Self::Member => write!(f, "MEMBER"),
        }
    }
}

/// An invitation admitting someone into a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupInvite {
    /// Unique invite identifier.
    pub id: GroupInviteID,
    /// The group.
    pub group_id: GroupID,
    /// Who created the invite.
    pub inviter_id: UserID,
    /// Who is invited: a user, a placeholder, or `PUBLIC`.
    pub invitee_id: GroupInviteeID,
    /// Role granted on acceptance.
    #[serde(default)]
    pub role: GroupRole,
    /// Free-form note.
    #[serde(default)]
    pub note: String,
    /// Start of validity.
    #[serde(default)]
    pub active_from: UnixTimestampMs,
    /// Expiry time, `-1` for never.
    pub expires_at: i64,
    /// Creation time.
    pub created_at: UnixTimestampMs,
    /// Last modification time.
    pub last_modified_at: UnixTimestampMs,
    /// Code redeeming a placeholder invite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redeem_code: Option<String>,
    /// Placeholder the invite was redeemed from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_placeholder_invitee: Option<PlaceholderGroupInviteeID>,
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

impl GroupInvite {
    /// Whether the invite admits its invitee at `now_ms`.
    pub fn is_active(&self, now_ms: UnixTimestampMs) -> bool {
        self.active_from <= now_ms && !crate::is_expired(self.expires_at, now_ms)
    }

    /// Whether the invite still waits for a placeholder to be redeemed.
    pub fn is_placeholder(&self) -> bool {
        matches!(self.invitee_id, GroupInviteeID::Placeholder(_))
    }
}

/// Group invite with display fields for the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupInviteFE {
    /// The stored invite.
    #[serde(flatten)]
    pub invite: GroupInvite,
    /// Name of the group.
    #[serde(default)]
    pub group_name: String,
    /// Avatar of the group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_avatar: Option<String>,
    /// Name of the invitee.
    #[serde(default)]
    pub invitee_name: String,
    /// Avatar of the invitee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invitee_avatar: Option<String>,
    /// What the requester may do with this invite.
    #[serde(default)]
    pub permission_previews: Vec<SystemPermissionType>,
}
