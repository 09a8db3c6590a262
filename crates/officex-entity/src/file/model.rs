//! File record model.

use serde::{Deserialize, Serialize};

use officex_core::types::{
    DiskID, DiskTypeEnum, DriveFullFilePath, DriveID, ExternalID, ExternalPayload, FileID,
    FolderID, LabelValue, UnixTimestampMs, UploadStatus, UserID, split_disk_path,
};

use crate::permission::DirectoryPermissionType;

/// A file stored on a disk of a drive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Unique file identifier.
    pub id: FileID,
    /// File name without the disk path.
    pub name: String,
    /// The folder containing this file.
    pub parent_folder_uuid: FolderID,
    /// Version number, starting at 1.
    pub file_version: u32,
    /// The version this file replaced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prior_version: Option<FileID>,
    /// The version that replaced this file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_version: Option<FileID>,
    /// Lowercase extension without the dot.
    pub extension: String,
    /// Full path, `"<disk_id>::/folder/name"`.
    pub full_directory_path: DriveFullFilePath,
    /// Attached label values.
    #[serde(default)]
    pub labels: Vec<LabelValue>,
    /// Creator of the file.
    pub created_by: UserID,
    /// Creation time.
    pub created_at: UnixTimestampMs,
    /// Disk holding the bytes.
    pub disk_id: DiskID,
    /// Backend of that disk.
    pub disk_type: DiskTypeEnum,
    /// Size in bytes.
    pub file_size: u64,
    /// Location of the raw bytes.
    pub raw_url: String,
    /// Last modification time.
    pub last_updated_date_ms: UnixTimestampMs,
    /// Last modifier.
    pub last_updated_by: UserID,
    /// Soft-delete flag.
    #[serde(default)]
    pub deleted: bool,
    /// Drive owning this record.
    pub drive_id: DriveID,
    /// Expiry time, `-1` for never.
    pub expires_at: i64,
    /// Path the file lived at before it was moved to the trash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restore_trash_prior_folder_path: Option<DriveFullFilePath>,
    /// Whether permissions stop inheriting from the parent folder.
    #[serde(default)]
    pub has_sovereign_permissions: bool,
    /// Target of a shortcut.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut_to: Option<FileID>,
    /// Upload lifecycle of the bytes.
    #[serde(default)]
    pub upload_status: UploadStatus,
    /// Identifier in an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    /// Payload attached by an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

impl FileRecord {
    /// Name including the extension, as shown in listings.
    pub fn display_name(&self) -> String {
        if self.extension.is_empty() || self.name.ends_with(&format!(".{}", self.extension)) {
            self.name.clone()
        } else {
            format!("{}.{}", self.name, self.extension)
        }
    }

    /// Whether the file sits in a trash folder.
    pub fn is_in_trash(&self) -> bool {
        self.restore_trash_prior_folder_path.is_some()
    }

    /// Whether the file has expired at `now_ms`.
    pub fn is_expired(&self, now_ms: UnixTimestampMs) -> bool {
        crate::is_expired(self.expires_at, now_ms)
    }

    /// Record a modification.
    pub fn touch(&mut self, by: &UserID, now_ms: UnixTimestampMs) {
        self.last_updated_by = by.clone();
        self.last_updated_date_ms = now_ms;
    }
}

/// Extract the lowercase extension from a file name.
pub fn extension_of(name: &str) -> String {
    name.rsplit_once('.')
        .filter(|(stem, _)| !stem.is_empty())
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// File record with display fields for the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecordFE {
    /// The stored record.
    #[serde(flatten)]
    pub record: FileRecord,
    /// Path shown to the requester, without the disk prefix.
    pub clipped_directory_path: String,
    /// Permissions the requester holds on this file.
    #[serde(default)]
    pub permission_previews: Vec<DirectoryPermissionType>,
}

impl FileRecordFE {
    /// Wrap a record with the requester's permission previews.
    pub fn new(record: FileRecord, permission_previews: Vec<DirectoryPermissionType>) -> Self {
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

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn file(name: &str) -> FileRecord {
        FileRecord {
            id: "FileID_1".parse().unwrap(),
            name: name.to_string(),
            parent_folder_uuid: "FolderID_root".parse().unwrap(),
            file_version: 1,
            prior_version: None,
            next_version: None,
            extension: extension_of(name),
            full_directory_path: format!("DiskID_1::/{name}"),
            labels: vec![],
            created_by: "UserID_alice".parse().unwrap(),
            created_at: 1,
            disk_id: "DiskID_1".parse().unwrap(),
            disk_type: DiskTypeEnum::LocalSsd,
            file_size: 42,
            raw_url: String::new(),
            last_updated_date_ms: 1,
            last_updated_by: "UserID_alice".parse().unwrap(),
            deleted: false,
            drive_id: "DriveID_abc".parse().unwrap(),
            expires_at: -1,
            restore_trash_prior_folder_path: None,
            has_sovereign_permissions: false,
            shortcut_to: None,
            upload_status: UploadStatus::Completed,
            external_id: None,
            external_payload: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("report.PDF"), "pdf");
        assert_eq!(extension_of("archive.tar.gz"), "gz");
        assert_eq!(extension_of(".env"), "");
        assert_eq!(extension_of("README"), "");
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let value = serde_json::to_value(fixtures::file("a.txt")).unwrap();
        assert!(value.get("prior_version").is_none());
        assert!(value.get("external_id").is_none());
        assert_eq!(value["disk_type"], json!("LOCAL_SSD"));
        assert_eq!(value["upload_status"], json!("COMPLETED"));
    }

    #[test]
    fn test_fe_flattens_record() {
        let fe = FileRecordFE::new(fixtures::file("a.txt"), vec![DirectoryPermissionType::View]);
        assert_eq!(fe.clipped_directory_path, "/a.txt");
        let value = serde_json::to_value(&fe).unwrap();
        assert_eq!(value["id"], json!("FileID_1"));
        assert_eq!(value["permission_previews"], json!(["VIEW"]));
        let back: FileRecordFE = serde_json::from_value(value).unwrap();
        assert_eq!(back, fe);
    }

    #[test]
    fn test_rejects_foreign_parent_prefix() {
        let mut value = serde_json::to_value(fixtures::file("a.txt")).unwrap();
        value["parent_folder_uuid"] = json!("FileID_oops");
        assert!(serde_json::from_value::<FileRecord>(value).is_err());
    }

    #[test]
    fn test_display_name() {
        let mut file = fixtures::file("notes");
        file.extension = "md".into();
        assert_eq!(file.display_name(), "notes.md");
        assert_eq!(fixtures::file("a.txt").display_name(), "a.txt");
    }
}
