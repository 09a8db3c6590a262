//! Folder record model.

use serde::{Deserialize, Serialize};

use officex_core::types::{
    DiskID, DiskTypeEnum, DriveFullFilePath, DriveID, ExternalID, ExternalPayload, FileID,
    FolderID, LabelValue, UnixTimestampMs, UserID, split_disk_path,
};

use crate::permission::DirectoryPermissionType;

/// A folder on a disk of a drive.
///
/// Children are referenced by ID only; the parent keeps both lists so a
/// listing never needs a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderRecord {
    /// Unique folder identifier.
    pub id: FolderID,
    /// Folder name; empty for a disk root.
    pub name: String,
    /// Parent folder, `None` for a disk root.
    #[serde(default)]
    pub parent_folder_uuid: Option<FolderID>,
    /// Direct child folders.
    #[serde(default)]
    pub subfolder_uuids: Vec<FolderID>,
    /// Direct child files.
    #[serde(default)]
    pub file_uuids: Vec<FileID>,
    /// Full path, always ending with `/`.
    pub full_directory_path: DriveFullFilePath,
    /// Attached label values.
    #[serde(default)]
    pub labels: Vec<LabelValue>,
    /// Creator of the folder.
    pub created_by: UserID,
    /// Creation time.
    pub created_at: UnixTimestampMs,
    /// Last modification time.
    pub last_updated_date_ms: UnixTimestampMs,
    /// Last modifier.
    pub last_updated_by: UserID,
    /// Disk the folder lives on.
    pub disk_id: DiskID,
    /// Backend of that disk.
    pub disk_type: DiskTypeEnum,
    /// Soft-delete flag.
    #[serde(default)]
    pub deleted: bool,
    /// Expiry time, `-1` for never.
    pub expires_at: i64,
    /// Drive owning this record.
    pub drive_id: DriveID,
    /// Path the folder lived at before it was moved to the trash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restore_trash_prior_folder_path: Option<DriveFullFilePath>,
    /// Whether permissions stop inheriting from the parent folder.
    #[serde(default)]
    pub has_sovereign_permissions: bool,
    /// Target of a shortcut.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut_to: Option<FolderID>,
    /// Identifier in an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    /// Payload attached by an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

impl FolderRecord {
    /// Whether this folder is the root of its disk.
    pub fn is_root(&self) -> bool {
        self.parent_folder_uuid.is_none()
    }

    /// Whether the folder has no children.
    pub fn is_empty(&self) -> bool {
        self.subfolder_uuids.is_empty() && self.file_uuids.is_empty()
    }

    /// Whether the folder has expired at `now_ms`.
    pub fn is_expired(&self, now_ms: UnixTimestampMs) -> bool {
        crate::is_expired(self.expires_at, now_ms)
    }

    /// Path of a direct child folder named `name`.
    pub fn child_folder_path(&self, name: &str) -> DriveFullFilePath {
        format!("{}{name}/", self.full_directory_path)
    }

    /// Path of a direct child file named `name`.
    pub fn child_file_path(&self, name: &str) -> DriveFullFilePath {
        format!("{}{name}", self.full_directory_path)
    }

    /// Record a modification.
    pub fn touch(&mut self, by: &UserID, now_ms: UnixTimestampMs) {
        self.last_updated_by = by.clone();
        self.last_updated_date_ms = now_ms;
    }
}

/// Folder record with display fields for the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderRecordFE {
    /// The stored record.
    #[serde(flatten)]
    pub record: FolderRecord,
    /// Path shown to the requester, without the disk prefix.
    pub clipped_directory_path: String,
    /// Permissions the requester holds on this folder.
    #[serde(default)]
    pub permission_previews: Vec<DirectoryPermissionType>,
}

impl FolderRecordFE {
    /// Wrap a record with the requester's permission previews.
    pub fn new(record: FolderRecord, permission_previews: Vec<DirectoryPermissionType>) -> Self {
        let clipped_directory_path = split_disk_path(&record.full_directory_path)
            .map(|(_, path)| path.to_string())
            .unwrap_or_else(|| record.full_directory_path.clone());
        Self {
            record,
            clipped_directory_path,
            permission_previews,
        }
    }
}
