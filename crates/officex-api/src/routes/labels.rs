//! Label routes.

use serde::{Deserialize, Serialize};
use validator::Validate;

use officex_core::types::{
    ApiResponse, ExternalID, ExternalPayload, LabelID, LabelValue, PageRequest, PageResponse,
    SortDirection,
};
use officex_entity::Label;

use super::DeletedResponse;
use crate::validation::{validate_hex_color, validate_label_value, validate_prefixed_id};

/// Get a label by id or by value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetLabelRequest {
    pub id: String,
}

impl GetLabelRequest {
    /// The label id, when the request names one rather than a value.
    pub fn label_id(&self) -> Option<LabelID> {
        self.id.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LabelFilters {
    /// Only labels whose value starts with this prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct ListLabelsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<LabelFilters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub page_size: Option<usize>,
    #[serde(default)]
    pub direction: SortDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_up: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_down: Option<String>,
}

impl ListLabelsRequest {
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            filters: self.filters.as_ref().and_then(|f| f.prefix.clone()),
            page_size: self.page_size,
            direction: self.direction,
            cursor: None,
            cursor_up: self.cursor_up.clone(),
            cursor_down: self.cursor_down.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateLabelRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LabelID>,
    #[validate(length(max = 256), custom(function = "validate_label_value"))]
    pub value: LabelValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `#RRGGBB`; a default color when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateLabelRequest {
    pub id: LabelID,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 256), custom(function = "validate_label_value"))]
    pub value: Option<LabelValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteLabelRequest {
    pub id: LabelID,
}

/// Attach a label to, or detach it from, any prefixed resource.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LabelResourceRequest {
    pub label_id: LabelID,
    #[validate(custom(function = "validate_prefixed_id"))]
    pub resource_id: String,
    /// `true` to attach, `false` to detach.
    pub add: bool,
}

impl LabelResourceRequest {
    /// Apply the request to `label`, returning whether anything changed.
    pub fn apply(&self, label: &mut Label) -> bool {
        if self.add {
            label.attach(&self.resource_id)
        } else {
            label.detach(&self.resource_id)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelResourceResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
}

pub type GetLabelResponse = ApiResponse<Label>;
pub type ListLabelsResponse = ApiResponse<PageResponse<Label>>;
pub type CreateLabelResponse = ApiResponse<Label>;
pub type UpdateLabelResponse = ApiResponse<Label>;
pub type DeleteLabelResponse = ApiResponse<DeletedResponse<LabelID>>;
pub type LabelResourceResponse = ApiResponse<LabelResourceResult>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn label() -> Label {
        serde_json::from_value(json!({
            "id": "LabelID_1",
            "value": "urgent",
            "color": "#FF0000",
            "created_by": "UserID_alice",
            "created_at": 1,
            "last_updated_at": 1
        }))
        .unwrap()
    }

    #[test]
    fn test_create_label_rules() {
        let bad_color: CreateLabelRequest =
            serde_json::from_value(json!({"value": "urgent", "color": "red"})).unwrap();
        assert!(bad_color.validate().is_err());
        let spaced: CreateLabelRequest =
            serde_json::from_value(json!({"value": "two words"})).unwrap();
        assert!(spaced.validate().is_err());
        let ok: CreateLabelRequest =
            serde_json::from_value(json!({"value": "urgent", "color": "#00FF00"})).unwrap();
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_label_resource_attach_detach() {
        let mut target = label();
        let attach = LabelResourceRequest {
            label_id: target.id.clone(),
            resource_id: "FileID_a".into(),
            add: true,
        };
        assert!(attach.validate().is_ok());
        assert!(attach.apply(&mut target));
        assert!(!attach.apply(&mut target));
        let detach = LabelResourceRequest { add: false, ..attach };
        assert!(detach.apply(&mut target));
        assert!(target.resources.is_empty());
    }

    #[test]
    fn test_get_label_by_value_or_id() {
        assert!(GetLabelRequest { id: "urgent".into() }.label_id().is_none());
        assert!(GetLabelRequest { id: "LabelID_1".into() }.label_id().is_some());
    }
}
