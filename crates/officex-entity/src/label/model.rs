//! Label model.

use serde::{Deserialize, Serialize};

use officex_core::types::{
    ExternalID, ExternalPayload, LabelID, LabelValue, UnixTimestampMs, UserID,
};

use crate::permission::SystemPermissionType;

/// A label that can be attached to any prefixed resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Unique label identifier.
    pub id: LabelID,
    /// The label text.
    pub value: LabelValue,
    /// Note visible to everyone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_note: Option<String>,
    /// Note visible to the owner only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_note: Option<String>,
    /// Hex color, `#RRGGBB`.
    pub color: String,
    /// Creator of the label.
    pub created_by: UserID,
    /// Creation time.
    pub created_at: UnixTimestampMs,
    /// Last modification time.
    pub last_updated_at: UnixTimestampMs,
    /// Identifiers of the labelled resources.
    #[serde(default)]
    pub resources: Vec<String>,
    /// Labels attached to this label.
    #[serde(default)]
    pub labels: Vec<LabelValue>,
    /// Identifier in an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    /// Payload attached by an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

impl Label {
    /// Attach the label to `resource_id`. Returns `false` if already attached.
    pub fn attach(&mut self, resource_id: &str) -> bool {
        if self.resources.iter().any(|r| r == resource_id) {
            return false;
        }
        self.resources.push(resource_id.to_string());
        true
    }

    /// Detach the label from `resource_id`. Returns `false` if not attached.
    pub fn detach(&mut self, resource_id: &str) -> bool {
        let before = self.resources.len();
        self.resources.retain(|r| r != resource_id);
        self.resources.len() != before
    }
}

/// Label with display fields for the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelFE {
    /// The stored label.
    #[serde(flatten)]
    pub label: Label,
    /// What the requester may do with this label.
    #[serde(default)]
    pub permission_previews: Vec<SystemPermissionType>,
}
