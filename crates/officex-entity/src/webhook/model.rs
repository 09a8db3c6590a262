//! Webhook model.

use serde::{Deserialize, Serialize};

use officex_core::types::{
    ExternalID, ExternalPayload, LabelValue, UnixTimestampMs, WebhookID,
};

use super::event::WebhookEventLabel;
use crate::permission::SystemPermissionType;

/// Secondary index a webhook is filed under, usually a resource ID.
pub type WebhookAltIndexID = String;

/// A subscription delivering events to a URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Webhook {
    /// Unique webhook identifier.
    pub id: WebhookID,
    /// Delivery URL.
    pub url: String,
    /// Secondary index the webhook is filed under.
    pub alt_index: WebhookAltIndexID,
    /// Subscribed event.
    pub event: WebhookEventLabel,
    /// Shared secret used to sign deliveries.
    #[serde(default)]
    pub signature: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Whether deliveries are sent.
    #[serde(default)]
    pub active: bool,
    /// Event filter expression.
    #[serde(default)]
    pub filters: String,
    /// Attached label values.
    #[serde(default)]
    pub labels: Vec<LabelValue>,
    /// Creation time.
    pub created_at: UnixTimestampMs,
    /// Identifier in an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    /// Payload attached by an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

/// Webhook with display fields for the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookFE {
    /// The stored webhook.
    #[serde(flatten)]
    pub webhook: Webhook,
    /// What the requester may do with this webhook.
    #[serde(default)]
    pub permission_previews: Vec<SystemPermissionType>,
}
