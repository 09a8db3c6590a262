//! Purchase model.

use serde::{Deserialize, Serialize};

use officex_core::types::{
    ExternalID, ExternalPayload, LabelValue, PurchaseID, UnixTimestampMs, UserID,
};

use super::status::PurchaseStatus;
use crate::permission::SystemPermissionType;

/// A purchase of a vendor offer, tracked through fulfilment.
///
/// Vendors may update the URLs, notes, status, and tracer after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    /// Unique purchase identifier.
    pub id: PurchaseID,
    /// Template the purchase was created from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// Vendor display name.
    pub vendor_name: String,
    /// Vendor identity.
    pub vendor_id: UserID,
    /// Fulfilment status.
    #[serde(default)]
    pub status: PurchaseStatus,
    /// What was purchased.
    #[serde(default)]
    pub description: String,
    /// Vendor about page.
    #[serde(default)]
    pub about_url: String,
    /// Where the purchase runs.
    #[serde(default)]
    pub run_url: String,
    /// Billing page.
    #[serde(default)]
    pub billing_url: String,
    /// Support page.
    #[serde(default)]
    pub support_url: String,
    /// Delivery page.
    #[serde(default)]
    pub delivery_url: String,
    /// Verification page.
    #[serde(default)]
    pub verification_url: String,
    /// Script installing the purchase into a drive.
    #[serde(default)]
    pub auth_installation_url: String,
    /// Title.
    pub title: String,
    /// Subtitle.
    #[serde(default)]
    pub subtitle: String,
    /// Pricing description.
    #[serde(default)]
    pub pricing: String,
    /// Notes written by the vendor.
    #[serde(default)]
    pub vendor_notes: String,
    /// Notes shared with the vendor.
    #[serde(default)]
    pub notes: String,
    /// Creation time.
    pub created_at: UnixTimestampMs,
    /// Last vendor update.
    pub updated_at: UnixTimestampMs,
    /// Last modification time.
    pub last_updated_at: UnixTimestampMs,
    /// Attached label values.
    #[serde(default)]
    pub labels: Vec<LabelValue>,
    /// Identifiers of resources related to the purchase.
    #[serde(default)]
    pub related_resources: Vec<String>,
    /// Correlation token set by the vendor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracer: Option<String>,
    /// Identifier in an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    /// Payload attached by an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

/// Former name of [`Purchase`].
pub type JobRun = Purchase;

/// Purchase with display fields for the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseFE {
    /// The stored purchase.
    #[serde(flatten)]
    pub purchase: Purchase,
    /// What the requester may do with this purchase.
    #[serde(default)]
    pub permission_previews: Vec<SystemPermissionType>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_purchase_defaults() {
        let purchase: JobRun = serde_json::from_value(json!({
            "id": "PurchaseID_1",
            "vendor_name": "Acme",
            "vendor_id": "UserID_acme",
            "title": "Storage",
            "created_at": 0,
            "updated_at": 0,
            "last_updated_at": 0
        }))
        .unwrap();
        assert_eq!(purchase.status, PurchaseStatus::Requested);
        assert!(!purchase.status.is_terminal());
        assert!(purchase.related_resources.is_empty());
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&PurchaseStatus::Canceled).unwrap(),
            "\"CANCELED\""
        );
        assert!(serde_json::from_str::<PurchaseStatus>("\"PAUSED\"").is_err());
    }
}
