//! Webhook event labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use officex_core::AppError;

/// Event that triggers a webhook. Labels are dotted, e.g. `file.created`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebhookEventLabel {
    /// `file.viewed`
    #[serde(rename = "file.viewed")]
    FileViewed,
    /// `file.created`
    #[serde(rename = "file.created")]
    FileCreated,
    /// `file.updated`
    #[serde(rename = "file.updated")]
    FileUpdated,
    /// `file.deleted`
    #[serde(rename = "file.deleted")]
    FileDeleted,
    /// `file.shared`
    #[serde(rename = "file.shared")]
    FileShared,
    /// `folder.viewed`
    #[serde(rename = "folder.viewed")]
    FolderViewed,
    /// `folder.created`
    #[serde(rename = "folder.created")]
    FolderCreated,
    /// `folder.updated`
    #[serde(rename = "folder.updated")]
    FolderUpdated,
    /// `folder.deleted`
    #[serde(rename = "folder.deleted")]
    FolderDeleted,
    /// `folder.shared`
    #[serde(rename = "folder.shared")]
    FolderShared,
    /// `subfile.viewed`
    #[serde(rename = "subfile.viewed")]
    SubfileViewed,
    /// `subfile.created`
    #[serde(rename = "subfile.created")]
    SubfileCreated,
    /// `subfile.updated`
    #[serde(rename = "subfile.updated")]
    SubfileUpdated,
    /// `subfile.deleted`
    #[serde(rename = "subfile.deleted")]
    SubfileDeleted,
    /// `subfile.shared`
    #[serde(rename = "subfile.shared")]
    SubfileShared,
    /// `subfolder.viewed`
    #[serde(rename = "subfolder.viewed")]
    SubfolderViewed,
    /// `subfolder.created`
    #[serde(rename = "subfolder.created")]
    SubfolderCreated,
    /// `subfolder.updated`
    #[serde(rename = "subfolder.updated")]
    SubfolderUpdated,
    /// `subfolder.deleted`
    #[serde(rename = "subfolder.deleted")]
    SubfolderDeleted,
    /// `subfolder.shared`
    #[serde(rename = "subfolder.shared")]
    SubfolderShared,
    /// `group.invite.created`
    #[serde(rename = "group.invite.created")]
    GroupInviteCreated,
    /// `group.invite.updated`
    #[serde(rename = "group.invite.updated")]
    GroupInviteUpdated,
    /// `drive.restore_trash`
    #[serde(rename = "drive.restore_trash")]
    DriveRestoreTrash,
    /// `drive.state_diffs`
    #[serde(rename = "drive.state_diffs")]
    DriveStateDiffs,
    /// `label.added`
    #[serde(rename = "label.added")]
    LabelAdded,
    /// `label.removed`
    #[serde(rename = "label.removed")]
    LabelRemoved,
    /// `org.superswap_user`
    #[serde(rename = "org.superswap_user")]
    OrgSuperswapUser,
    /// `org.inbox.new_notif`
    #[serde(rename = "org.inbox.new_notif")]
    OrgInboxNewNotif,
}

impl WebhookEventLabel {
    /// Every event label.
    pub const ALL: [WebhookEventLabel; 28] = [
        Self::FileViewed,
        Self::FileCreated,
        Self::FileUpdated,
        Self::FileDeleted,
        Self::FileShared,
        Self::FolderViewed,
        Self::FolderCreated,
        Self::FolderUpdated,
        Self::FolderDeleted,
        Self::FolderShared,
        Self::SubfileViewed,
        Self::SubfileCreated,
        Self::SubfileUpdated,
        Self::SubfileDeleted,
        Self::SubfileShared,
        Self::SubfolderViewed,
        Self::SubfolderCreated,
        Self::SubfolderUpdated,
        Self::SubfolderDeleted,
        Self::SubfolderShared,
        Self::GroupInviteCreated,
        Self::GroupInviteUpdated,
        Self::DriveRestoreTrash,
        Self::DriveStateDiffs,
        Self::LabelAdded,
        Self::LabelRemoved,
        Self::OrgSuperswapUser,
        Self::OrgInboxNewNotif,
    ];

    /// Return the dotted label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FileViewed => "file.viewed",
            Self::FileCreated => "file.created",
            Self::FileUpdated => "file.updated",
            Self::FileDeleted => "file.deleted",
            Self::FileShared => "file.shared",
            Self::FolderViewed => "folder.viewed",
            Self::FolderCreated => "folder.created",
            Self::FolderUpdated => "folder.updated",
            Self::FolderDeleted => "folder.deleted",
            Self::FolderShared => "folder.shared",
            Self::SubfileViewed => "subfile.viewed",
            Self::SubfileCreated => "subfile.created",
            Self::SubfileUpdated => "subfile.updated",
            Self::SubfileDeleted => "subfile.deleted",
            Self::SubfileShared => "subfile.shared",
            Self::SubfolderViewed => "subfolder.viewed",
            Self::SubfolderCreated => "subfolder.created",
            Self::SubfolderUpdated => "subfolder.updated",
            Self::SubfolderDeleted => "subfolder.deleted",
            Self::SubfolderShared => "subfolder.shared",
            Self::GroupInviteCreated => "group.invite.created",
            Self::GroupInviteUpdated => "group.invite.updated",
            Self::DriveRestoreTrash => "drive.restore_trash",
            Self::DriveStateDiffs => "drive.state_diffs",
            Self::LabelAdded => "label.added",
            Self::LabelRemoved => "label.removed",
            Self::OrgSuperswapUser => "org.superswap_user",
            Self::OrgInboxNewNotif => "org.inbox.new_notif",
        }
    }

    /// Whether the event concerns a directory resource.
    pub fn is_directory_event(&self) -> bool {
        let label = self.as_str();
        ["file.", "folder.", "subfile.", "subfolder."]
            .iter()
            .any(|prefix| label.starts_with(prefix))
    }
}

impl fmt::Display for WebhookEventLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WebhookEventLabel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| AppError::unknown_variant(format!("Unknown webhook event: '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_matches_as_str() {
        for label in WebhookEventLabel::ALL {
            let json = serde_json::to_string(&label).unwrap();
            assert_eq!(json, format!("\"{}\"", label.as_str()));
            assert_eq!(label.as_str().parse::<WebhookEventLabel>().unwrap(), label);
        }
    }

    #[test]
    fn test_directory_events() {
        assert!(WebhookEventLabel::SubfolderShared.is_directory_event());
        assert!(!WebhookEventLabel::LabelAdded.is_directory_event());
    }

    #[test]
    fn test_unknown_label_rejected() {
        assert!(serde_json::from_str::<WebhookEventLabel>("\"file.renamed\"").is_err());
    }
}
