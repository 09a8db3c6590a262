//! Group invite routes.

use serde::{Deserialize, Serialize};
use validator::Validate;

use officex_core::types::{
    ApiResponse, ExternalID, ExternalPayload, GroupID, GroupInviteID, GroupInviteeID, PageRequest,
    PageResponse, UserID,
};
use officex_entity::{GroupInvite, GroupRole};

use super::DeletedResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetGroupInviteRequest {
    pub invite_id: GroupInviteID,
}

/// List the invites of one group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListGroupInvitesRequest {
    pub group_id: GroupID,
    #[serde(flatten)]
    pub page: PageRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGroupInviteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<GroupInviteID>,
    pub group_id: GroupID,
    /// Invitee; a fresh placeholder when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invitee_id: Option<GroupInviteeID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<GroupRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_from: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 8192))]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateGroupInviteRequest {
    pub id: GroupInviteID,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<GroupRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_from: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 8192))]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteGroupInviteRequest {
    pub id: GroupInviteID,
}

/// Accept a placeholder or public invite as a concrete user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedeemGroupInviteRequest {
    pub invite_id: GroupInviteID,
    pub user_id: UserID,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedeemGroupInviteResult {
    pub invite: GroupInvite,
}

pub type GetGroupInviteResponse = ApiResponse<GroupInvite>;
pub type ListGroupInvitesResponse = ApiResponse<PageResponse<GroupInvite>>;
pub type CreateGroupInviteResponse = ApiResponse<GroupInvite>;
pub type UpdateGroupInviteResponse = ApiResponse<GroupInvite>;
pub type DeleteGroupInviteResponse = ApiResponse<DeletedResponse<GroupInviteID>>;
pub type RedeemGroupInviteResponse = ApiResponse<RedeemGroupInviteResult>;
