//! Webhook delivery payloads.
//!
//! Two tagging styles meet here. [`WebhookResourceData`] keeps its `type`
//! tag beside the variant's fields, while [`DirectoryWebhookData`] nests
//! each variant under a key named after it. Both are kept as they are
//! consumed by existing receivers.

use serde::{Deserialize, Serialize};

use officex_core::types::{
    DirectoryResourceID, DriveID, HostURL, LabelID, ShareTrackID, UnixTimestampMs, UserID,
    WebhookID,
};
use officex_entity::webhook::WebhookAltIndexID;
use officex_entity::{
    FileRecord, FolderRecord, Group, GroupInvite, StateDiffRecord, Webhook, WebhookEventLabel,
};

use crate::routes::giftcards::InboxOrgRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FileWebhookData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FolderWebhookData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<FolderRecord>,
}

/// A share link being followed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareTrackingWebhookData {
    pub id: ShareTrackID,
    pub hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_id: Option<ShareTrackID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_user: Option<UserID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_user: Option<UserID>,
    pub resource_id: DirectoryResourceID,
    pub resource_name: String,
    pub drive_id: DriveID,
    pub timestamp_ms: UnixTimestampMs,
    pub host_url: HostURL,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

/// Directory webhook data, externally tagged: `{"File": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DirectoryWebhookData {
    File(FileWebhookData),
    Folder(FolderWebhookData),
    Subfile(FileWebhookData),
    Subfolder(FolderWebhookData),
    ShareTracking(ShareTrackingWebhookData),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GroupInviteWebhookData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_invite: Option<GroupInvite>,
}

/// A label attached to or detached from a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelWebhookData {
    pub resource_id: String,
    pub label_id: LabelID,
    pub label_value: String,
    pub add: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveStateDiffWebhookData {
    pub data: StateDiffRecord,
}

/// Snapshot of a resource, tagged by `type` beside its fields:
/// `{"type": "file", "file": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WebhookResourceData {
    GroupInvite(GroupInviteWebhookData),
    File(FileWebhookData),
    Folder(FolderWebhookData),
    Subfile(FileWebhookData),
    Subfolder(FolderWebhookData),
    ShareTracking(ShareTrackingWebhookData),
    StateDiffs(DriveStateDiffWebhookData),
    Label(LabelWebhookData),
    #[serde(rename = "superswap_userid")]
    SuperswapUserid { content: UserID },
    OrgInboxNewNotif(InboxOrgRequest),
}

impl From<DirectoryWebhookData> for WebhookResourceData {
    fn from(data: DirectoryWebhookData) -> Self {
        match data {
            DirectoryWebhookData::File(d) => Self::File(d),
            DirectoryWebhookData::Folder(d) => Self::Folder(d),
            DirectoryWebhookData::Subfile(d) => Self::Subfile(d),
            DirectoryWebhookData::Subfolder(d) => Self::Subfolder(d),
            DirectoryWebhookData::ShareTracking(d) => Self::ShareTracking(d),
        }
    }
}

/// State of the resource before and after the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WebhookEventData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<WebhookResourceData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<WebhookResourceData>,
}

/// Body POSTed to a webhook URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEventPayload {
    pub event: WebhookEventLabel,
    pub timestamp_ms: UnixTimestampMs,
    /// Unique per delivery; lets receivers drop replays.
    pub nonce: u64,
    pub webhook_id: WebhookID,
    pub webhook_alt_index: WebhookAltIndexID,
    pub payload: WebhookEventData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl WebhookEventPayload {
    /// Build the delivery of `payload` to `webhook`.
    pub fn new(
        webhook: &Webhook,
        timestamp_ms: UnixTimestampMs,
        nonce: u64,
        payload: WebhookEventData,
    ) -> Self {
        Self {
            event: webhook.event,
            timestamp_ms,
            nonce,
            webhook_id: webhook.id.clone(),
            webhook_alt_index: webhook.alt_index.clone(),
            payload,
            notes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use officex_core::AppError;
    use officex_core::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_resource_data_tag_beside_fields() {
        let data = WebhookResourceData::Label(LabelWebhookData {
            resource_id: "FileID_a".into(),
            label_id: "LabelID_1".parse().unwrap(),
            label_value: "urgent".into(),
            add: true,
        });
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "label",
                "resource_id": "FileID_a",
                "label_id": "LabelID_1",
                "label_value": "urgent",
                "add": true
            })
        );
        assert_eq!(serde_json::from_value::<WebhookResourceData>(value).unwrap(), data);
    }

    #[test]
    fn test_superswap_and_inbox_variants() {
        let swap: WebhookResourceData =
            serde_json::from_value(json!({"type": "superswap_userid", "content": "UserID_new"}))
                .unwrap();
        assert!(matches!(swap, WebhookResourceData::SuperswapUserid { .. }));

        let inbox: WebhookResourceData = serde_json::from_value(json!({
            "type": "org_inbox_new_notif",
            "drive_id": "DriveID_abc",
            "recipient": "UserID_bob",
            "payload": {"hello": "world"}
        }))
        .unwrap();
        assert!(matches!(
            inbox,
            WebhookResourceData::OrgInboxNewNotif(ref r) if r.recipient == "UserID_bob"
        ));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let err = serde_json::from_value::<WebhookResourceData>(json!({"type": "spreadsheet"}))
            .unwrap_err();
        assert_eq!(AppError::from(err).kind, ErrorKind::UnknownVariant);
    }

    #[test]
    fn test_directory_data_is_externally_tagged() {
        let data = DirectoryWebhookData::Folder(FolderWebhookData::default());
        assert_eq!(serde_json::to_value(&data).unwrap(), json!({"Folder": {}}));
        let resource: WebhookResourceData = data.into();
        assert_eq!(serde_json::to_value(&resource).unwrap(), json!({"type": "folder"}));
    }

    #[test]
    fn test_event_payload_shape() {
        let webhook: Webhook = serde_json::from_value(json!({
            "id": "WebhookID_1",
            "url": "https://example.com/hook",
            "alt_index": "FolderID_root",
            "event": "folder.created",
            "created_at": 1
        }))
        .unwrap();
        let payload = WebhookEventPayload::new(
            &webhook,
            99,
            7,
            WebhookEventData {
                before: None,
                after: Some(WebhookResourceData::Folder(FolderWebhookData::default())),
            },
        );
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["event"], json!("folder.created"));
        assert_eq!(value["webhook_alt_index"], json!("FolderID_root"));
        assert_eq!(value["payload"], json!({"after": {"type": "folder"}}));
        assert!(value.get("notes").is_none());
    }
}
