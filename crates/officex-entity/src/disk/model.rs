//! Disk model.

use serde::{Deserialize, Serialize};

use officex_core::types::{
    DiskID, DiskTypeEnum, DriveFullFilePath, ExternalID, ExternalPayload, FolderID, LabelValue,
    UnixTimestampMs, disk_root_path,
};

use crate::permission::SystemPermissionType;

/// A storage backend mounted into a drive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disk {
    /// Unique disk identifier.
    pub id: DiskID,
    /// Display name.
    pub name: String,
    /// Storage backend.
    pub disk_type: DiskTypeEnum,
    /// Note visible to everyone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_note: Option<String>,
    /// Note visible to the owner only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_note: Option<String>,
    /// Backend credentials as JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_json: Option<String>,
    /// Attached label values.
    #[serde(default)]
    pub labels: Vec<LabelValue>,
    /// Creation time.
    pub created_at: UnixTimestampMs,
    /// Root folder of the disk.
    pub root_folder: FolderID,
    /// Trash folder of the disk.
    pub trash_folder: FolderID,
    /// Backend endpoint, for remote disks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Identifier in an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    /// Payload attached by an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

impl Disk {
    /// Path of the disk root.
    pub fn root_path(&self) -> DriveFullFilePath {
        disk_root_path(self.id.as_str())
    }

    /// Path of the trash folder named `trash_name`.
    pub fn trash_path(&self, trash_name: &str) -> DriveFullFilePath {
        format!("{}{trash_name}/", self.root_path())
    }
}

/// Disk with display fields for the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskFE {
    /// The stored disk.
    #[serde(flatten)]
    pub disk: Disk,
    /// What the requester may do with this disk.
    #[serde(default)]
    pub permission_previews: Vec<SystemPermissionType>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_disk_paths() {
        let disk: Disk = serde_json::from_value(json!({
            "id": "DiskID_1",
            "name": "Laptop",
            "disk_type": "LOCAL_SSD",
            "created_at": 0,
            "root_folder": "FolderID_root",
            "trash_folder": "FolderID_trash"
        }))
        .unwrap();
        assert_eq!(disk.root_path(), "DiskID_1::/");
        assert_eq!(disk.trash_path(".trash"), "DiskID_1::/.trash/");
        assert!(disk.auth_json.is_none());
    }

    #[test]
    fn test_unknown_disk_type_rejected() {
        let parsed = serde_json::from_value::<Disk>(json!({
            "id": "DiskID_1",
            "name": "Tape",
            "disk_type": "TAPE",
            "created_at": 0,
            "root_folder": "FolderID_root",
            "trash_folder": "FolderID_trash"
        }));
        assert!(parsed.is_err());
    }
}
