//! API key model.

use serde::{Deserialize, Serialize};

use officex_core::types::{
    ApiKeyID, ApiKeyValue, ExternalID, ExternalPayload, LabelValue, UnixTimestampMs, UserID,
};

use crate::permission::SystemPermissionType;

/// A secret that authenticates requests on behalf of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKey {
    /// Unique key identifier.
    pub id: ApiKeyID,
    /// The secret.
    pub value: ApiKeyValue,
    /// User the key acts as.
    pub user_id: UserID,
    /// Display name.
    pub name: String,
    /// Note visible to the owner only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_note: Option<String>,
    /// Creation time.
    pub created_at: UnixTimestampMs,
    /// Expiry time, `-1` for never.
    pub expires_at: i64,
    /// Whether the key was revoked.
    #[serde(default)]
    pub is_revoked: bool,
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

impl ApiKey {
    /// Whether the key authenticates at `now_ms`.
    pub fn is_usable(&self, now_ms: UnixTimestampMs) -> bool {
        !self.is_revoked && !crate::is_expired(self.expires_at, now_ms)
    }
}

/// API key with display fields for the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKeyFE {
    /// The stored key.
    #[serde(flatten)]
    pub api_key: ApiKey,
    /// What the requester may do with this key.
    #[serde(default)]
    pub permission_previews: Vec<SystemPermissionType>,
}
