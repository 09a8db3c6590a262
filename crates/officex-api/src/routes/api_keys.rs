//! API key routes.

use serde::{Deserialize, Serialize};
use validator::Validate;

use officex_core::types::{ApiKeyID, ApiResponse, ExternalID, ExternalPayload, UserID};
use officex_entity::ApiKey;

use super::DeletedResponse;

/// Get one API key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetApiKeyRequest {
    pub api_key_id: ApiKeyID,
}

/// List the API keys of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListApiKeysRequest {
    pub user_id: UserID,
}

/// Create an API key.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateApiKeyRequest {
    /// Identifier to use instead of a generated one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ApiKeyID>,
    /// Display name.
    #[validate(length(min = 1, max = 256, message = "Name is required"))]
    pub name: String,
    /// Owner; the requester when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserID>,
    /// Expiry time, `-1` for never.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

/// Update an API key. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateApiKeyRequest {
    pub id: ApiKeyID,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    /// Revoke the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_revoked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

/// Delete an API key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteApiKeyRequest {
    pub id: ApiKeyID,
}

pub type GetApiKeyResponse = ApiResponse<ApiKey>;
pub type ListApiKeysResponse = ApiResponse<Vec<ApiKey>>;
pub type CreateApiKeyResponse = ApiResponse<ApiKey>;
pub type UpdateApiKeyResponse = ApiResponse<ApiKey>;
pub type DeleteApiKeyResponse = ApiResponse<DeletedResponse<ApiKeyID>>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_requires_name() {
        let request: CreateApiKeyRequest = serde_json::from_value(json!({"name": ""})).unwrap();
        assert!(request.validate().is_err());
        let request: CreateApiKeyRequest =
            serde_json::from_value(json!({"name": "ci", "expires_at": -1})).unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_rejects_foreign_id() {
        let parsed = serde_json::from_value::<UpdateApiKeyRequest>(json!({"id": "UserID_x"}));
        assert!(parsed.is_err());
    }
}
