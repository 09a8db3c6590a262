//! Webhook routes.

use serde::{Deserialize, Serialize};
use validator::Validate;

use officex_core::types::{
    ApiResponse, ExternalID, ExternalPayload, PageRequest, PageResponse, WebhookID,
};
use officex_entity::{Webhook, WebhookEventLabel};
use officex_entity::webhook::WebhookAltIndexID;

use super::DeletedResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetWebhookRequest {
    pub webhook_id: WebhookID,
}

pub type ListWebhooksRequest = PageRequest;

/// Subscribe a URL to an event.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateWebhookRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<WebhookID>,
    /// Resource or scope the webhook is filed under, e.g. a folder id.
    #[validate(length(min = 1))]
    pub alt_index: WebhookAltIndexID,
    #[validate(url(message = "Webhook url must be a valid URL"))]
    pub url: String,
    pub event: WebhookEventLabel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Active unless stated otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateWebhookRequest {
    pub id: WebhookID,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteWebhookRequest {
    pub id: WebhookID,
}

pub type GetWebhookResponse = ApiResponse<Webhook>;
pub type ListWebhooksResponse = ApiResponse<PageResponse<Webhook>>;
pub type CreateWebhookResponse = ApiResponse<Webhook>;
pub type UpdateWebhookResponse = ApiResponse<Webhook>;
pub type DeleteWebhookResponse = ApiResponse<DeletedResponse<WebhookID>>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_webhook_rules() {
        let request: CreateWebhookRequest = serde_json::from_value(json!({
            "alt_index": "FolderID_root",
            "url": "https://hooks.example.com/officex",
            "event": "file.created"
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.event, WebhookEventLabel::FileCreated);

        let request: CreateWebhookRequest = serde_json::from_value(json!({
            "alt_index": "FolderID_root",
            "url": "hooks example",
            "event": "file.created"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        let parsed = serde_json::from_value::<CreateWebhookRequest>(json!({
            "alt_index": "x",
            "url": "https://example.com",
            "event": "file.exploded"
        }));
        assert!(parsed.is_err());
    }
}
