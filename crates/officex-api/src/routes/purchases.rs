//! Purchase routes.

use serde::{Deserialize, Serialize};
use validator::Validate;

use officex_core::types::{
    ApiResponse, ExternalID, ExternalPayload, LabelValue, PageRequest, PageResponse, PurchaseID,
    UserID,
};
use officex_entity::{PurchaseFE, PurchaseStatus};

use super::DeletedResponse;
use crate::validation::validate_label_values;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPurchaseRequest {
    pub purchase_id: PurchaseID,
}

pub type ListPurchasesRequest = PageRequest;

/// Record a purchase of a vendor offer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePurchaseRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PurchaseID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[validate(length(min = 1, max = 256))]
    pub vendor_name: String,
    pub vendor_id: UserID,
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PurchaseStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub about_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub run_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub billing_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub support_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub delivery_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub verification_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub auth_installation_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_label_values"))]
    pub labels: Vec<LabelValue>,
    #[serde(default)]
    pub related_resources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

/// Update a purchase. Vendors use this to report progress.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePurchaseRequest {
    pub id: PurchaseID,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PurchaseStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub run_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub delivery_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub verification_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub auth_installation_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_resources: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePurchaseRequest {
    pub id: PurchaseID,
}

pub type GetPurchaseResponse = ApiResponse<PurchaseFE>;
pub type ListPurchasesResponse = ApiResponse<PageResponse<PurchaseFE>>;
pub type CreatePurchaseResponse = ApiResponse<PurchaseFE>;
pub type UpdatePurchaseResponse = ApiResponse<PurchaseFE>;
pub type DeletePurchaseResponse = ApiResponse<DeletedResponse<PurchaseID>>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_purchase_minimal() {
        let request: CreatePurchaseRequest = serde_json::from_value(json!({
            "vendor_name": "Acme",
            "vendor_id": "UserID_vendor",
            "title": "Backup plan",
            "run_url": "https://acme.example.com/run/1"
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        assert!(request.labels.is_empty());
    }

    #[test]
    fn test_update_status_uses_wire_names() {
        let request: UpdatePurchaseRequest = serde_json::from_value(json!({
            "id": "PurchaseID_1",
            "status": "COMPLETED"
        }))
        .unwrap();
        assert_eq!(request.status, Some(PurchaseStatus::Completed));
    }
}
