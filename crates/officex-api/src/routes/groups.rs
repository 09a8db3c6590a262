//! Group routes.

use serde::{Deserialize, Serialize};
use validator::Validate;

use officex_core::types::{
    ApiResponse, ExternalID, ExternalPayload, GroupID, HostURL, PageRequest, PageResponse, UserID,
};
use officex_entity::Group;

use super::DeletedResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetGroupRequest {
    pub group_id: GroupID,
}

pub type ListGroupsRequest = PageRequest;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<GroupID>,
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_note: Option<String>,
    /// Drive hosting the group; the current drive when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub endpoint_url: Option<HostURL>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateGroupRequest {
    pub id: GroupID,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub endpoint_url: Option<HostURL>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteGroupRequest {
    pub id: GroupID,
}

/// Ask a group's drive whether a user belongs to the group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateGroupMemberRequest {
    pub user_id: UserID,
    pub group_id: GroupID,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateGroupMemberResult {
    pub is_member: bool,
    pub group_id: GroupID,
    pub user_id: UserID,
}

pub type GetGroupResponse = ApiResponse<Group>;
pub type ListGroupsResponse = ApiResponse<PageResponse<Group>>;
pub type CreateGroupResponse = ApiResponse<Group>;
pub type UpdateGroupResponse = ApiResponse<Group>;
pub type DeleteGroupResponse = ApiResponse<DeletedResponse<GroupID>>;
pub type ValidateGroupMemberResponse = ApiResponse<ValidateGroupMemberResult>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_group_endpoint_must_be_url() {
        let request: CreateGroupRequest = serde_json::from_value(json!({
            "name": "Team",
            "endpoint_url": "not a url"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_validate_member_result_wire() {
        let result = ValidateGroupMemberResult {
            is_member: true,
            group_id: "GroupID_g".parse().unwrap(),
            user_id: "UserID_u".parse().unwrap(),
        };
        let response: ValidateGroupMemberResponse = ApiResponse::ok(result);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"ok": {"data": {
                "is_member": true,
                "group_id": "GroupID_g",
                "user_id": "UserID_u"
            }}})
        );
    }
}
