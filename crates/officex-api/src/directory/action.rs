//! Directory actions.
//!
//! An action is `{"action": "CREATE_FOLDER", "target": {...}, "payload": {...}}`.
//! The target names the resource by `resource_id` or `resource_path`; for
//! creations it names the receiving folder. Payloads may carry the same
//! identifiers inline (`id`, `parent_folder_uuid`), and `target` may then be
//! omitted. Payloads reject unknown fields, so a payload sent under the wrong
//! action tag fails to decode instead of silently losing data.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

use officex_core::types::{
    DirectoryResourceID, DiskID, DiskTypeEnum, DriveFullFilePath, ExternalID, ExternalPayload,
    FileID, FolderID, LabelValue, UploadStatus,
};

use crate::validation::{validate_label_values, validate_resource_name};

/// Name of a directory action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DirectoryActionEnum {
    GetFile,
    GetFolder,
    CreateFile,
    CreateFolder,
    UpdateFile,
    UpdateFolder,
    DeleteFile,
    DeleteFolder,
    CopyFile,
    CopyFolder,
    MoveFile,
    MoveFolder,
    RestoreTrash,
}

impl DirectoryActionEnum {
    /// Return the action name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetFile => "GET_FILE",
            Self::GetFolder => "GET_FOLDER",
            Self::CreateFile => "CREATE_FILE",
            Self::CreateFolder => "CREATE_FOLDER",
            Self::UpdateFile => "UPDATE_FILE",
            Self::UpdateFolder => "UPDATE_FOLDER",
            Self::DeleteFile => "DELETE_FILE",
            Self::DeleteFolder => "DELETE_FOLDER",
            Self::CopyFile => "COPY_FILE",
            Self::CopyFolder => "COPY_FOLDER",
            Self::MoveFile => "MOVE_FILE",
            Self::MoveFolder => "MOVE_FOLDER",
            Self::RestoreTrash => "RESTORE_TRASH",
        }
    }
}

impl fmt::Display for DirectoryActionEnum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How to resolve a name clash in the destination folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileConflictResolutionEnum {
    /// Replace the existing resource.
    Replace,
    /// Keep both, renaming the newcomer with a ` (n)` suffix.
    #[default]
    KeepBoth,
    /// Keep the existing resource and drop the newcomer.
    KeepOriginal,
    /// Keep whichever was modified last; the newcomer always is.
    KeepNewer,
}

/// The resource an action addresses, by path or by identifier.
///
/// When both are given the identifier wins.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceIdentifier {
    /// Full path of the resource, `"<DiskID>::/a/b"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_path: Option<DriveFullFilePath>,
    /// Identifier of the resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<DirectoryResourceID>,
}

impl ResourceIdentifier {
    /// Address a resource by identifier.
    pub fn id(id: impl Into<DirectoryResourceID>) -> Self {
        Self {
            resource_path: None,
            resource_id: Some(id.into()),
        }
    }

    /// Address a resource by full path.
    pub fn path(path: impl Into<DriveFullFilePath>) -> Self {
        Self {
            resource_path: Some(path.into()),
            resource_id: None,
        }
    }

    /// Whether neither a path nor an identifier was given.
    pub fn is_empty(&self) -> bool {
        self.resource_path.is_none() && self.resource_id.is_none()
    }
}

fn validate_destination(
    destination_folder_id: &Option<FolderID>,
    destination_folder_path: &Option<DriveFullFilePath>,
) -> Result<(), ValidationError> {
    if destination_folder_id.is_none() && destination_folder_path.is_none() {
        let mut err = ValidationError::new("destination");
        err.message = Some("destination_folder_id or destination_folder_path is required".into());
        return Err(err);
    }
    Ok(())
}

/// Payload of `GET_FILE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GetFilePayload {
    /// The file, when not named by the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FileID>,
    /// Share tracking hash of the link used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_track_hash: Option<String>,
}

/// Payload of `GET_FOLDER`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GetFolderPayload {
    /// The folder, when not named by the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FolderID>,
    /// Share tracking hash of the link used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_track_hash: Option<String>,
}

/// Payload of `CREATE_FILE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateFilePayload {
    /// Identifier to use instead of a generated one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FileID>,
    /// File name.
    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub name: String,
    /// Folder receiving the file, when not named by the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_folder_uuid: Option<FolderID>,
    /// Extension; derived from the name when empty.
    #[serde(default)]
    pub extension: String,
    /// Label values.
    #[serde(default)]
    #[validate(custom(function = "validate_label_values"))]
    pub labels: Vec<LabelValue>,
    /// Size in bytes.
    #[serde(default)]
    pub file_size: u64,
    /// Disk holding the bytes.
    pub disk_id: DiskID,
    /// Backend of that disk; checked against the disk when given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_type: Option<DiskTypeEnum>,
    /// Location of the raw bytes, when already uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_url: Option<String>,
    /// Expiry time, `-1` for never.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    /// How to resolve a name clash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_conflict_resolution: Option<FileConflictResolutionEnum>,
    /// Stop permission inheritance from the parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_sovereign_permissions: Option<bool>,
    /// Make the file a shortcut to another file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut_to: Option<FileID>,
    /// Identifier in an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    /// Payload attached by an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

/// Payload of `CREATE_FOLDER`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateFolderPayload {
    /// Identifier to use instead of a generated one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FolderID>,
    /// Folder name.
    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub name: String,
    /// Label values.
    #[serde(default)]
    #[validate(custom(function = "validate_label_values"))]
    pub labels: Vec<LabelValue>,
    /// Folder receiving the new folder, when not named by the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_folder_uuid: Option<FolderID>,
    /// Disk the folder lives on.
    pub disk_id: DiskID,
    /// Backend of that disk; checked against the disk when given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_type: Option<DiskTypeEnum>,
    /// Expiry time, `-1` for never.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    /// How to resolve a name clash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_conflict_resolution: Option<FileConflictResolutionEnum>,
    /// Stop permission inheritance from the parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_sovereign_permissions: Option<bool>,
    /// Make the folder a shortcut to another folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut_to: Option<FolderID>,
    /// Identifier in an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    /// Payload attached by an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

/// Payload of `UPDATE_FILE`. Absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateFilePayload {
    /// The file, when not named by the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FileID>,
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub name: Option<String>,
    /// New label values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_label_values"))]
    pub labels: Option<Vec<LabelValue>>,
    /// New expiry time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    /// New upload status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_status: Option<UploadStatus>,
    /// New location of the raw bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_url: Option<String>,
    /// New external identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    /// New external payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

/// Payload of `UPDATE_FOLDER`. Absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateFolderPayload {
    /// The folder, when not named by the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FolderID>,
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub name: Option<String>,
    /// New label values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_label_values"))]
    pub labels: Option<Vec<LabelValue>>,
    /// New expiry time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    /// New external identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    /// New external payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

/// Payload of `DELETE_FILE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct DeleteFilePayload {
    /// The file, when not named by the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FileID>,
    /// Remove outright instead of moving to the trash.
    #[serde(default)]
    pub permanent: bool,
}

/// Payload of `DELETE_FOLDER`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct DeleteFolderPayload {
    /// The folder, when not named by the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FolderID>,
    /// Remove the subtree outright instead of moving it to the trash.
    #[serde(default)]
    pub permanent: bool,
}

/// Payload of `COPY_FILE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "validate_copy_file"))]
pub struct CopyFilePayload {
    /// The file, when not named by the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FileID>,
    /// Destination folder by identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_folder_id: Option<FolderID>,
    /// Destination folder by path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_folder_path: Option<DriveFullFilePath>,
    /// How to resolve a name clash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_conflict_resolution: Option<FileConflictResolutionEnum>,
    /// Identifier for the copy instead of a generated one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_copy_id: Option<FileID>,
}

/// Payload of `COPY_FOLDER`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "validate_copy_folder"))]
pub struct CopyFolderPayload {
    /// The folder, when not named by the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FolderID>,
    /// Destination folder by identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_folder_id: Option<FolderID>,
    /// Destination folder by path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_folder_path: Option<DriveFullFilePath>,
    /// How to resolve a name clash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_conflict_resolution: Option<FileConflictResolutionEnum>,
    /// Identifier for the copied root folder instead of a generated one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_copy_id: Option<FolderID>,
}

/// Payload of `MOVE_FILE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "validate_move_file"))]
pub struct MoveFilePayload {
    /// The file, when not named by the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FileID>,
    /// Destination folder by identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_folder_id: Option<FolderID>,
    /// Destination folder by path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_folder_path: Option<DriveFullFilePath>,
    /// How to resolve a name clash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_conflict_resolution: Option<FileConflictResolutionEnum>,
}

/// Payload of `MOVE_FOLDER`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "validate_move_folder"))]
pub struct MoveFolderPayload {
    /// The folder, when not named by the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FolderID>,
    /// Destination folder by identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_folder_id: Option<FolderID>,
    /// Destination folder by path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_folder_path: Option<DriveFullFilePath>,
    /// How to resolve a name clash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_conflict_resolution: Option<FileConflictResolutionEnum>,
}

/// Payload of `RESTORE_TRASH`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RestoreTrashPayload {
    /// The trashed file or folder, when not named by the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DirectoryResourceID>,
    /// How to resolve a name clash at the restore location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_conflict_resolution: Option<FileConflictResolutionEnum>,
    /// Folder path to restore into instead of the prior location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restore_to_folder_path: Option<DriveFullFilePath>,
}

fn validate_copy_file(p: &CopyFilePayload) -> Result<(), ValidationError> {
    validate_destination(&p.destination_folder_id, &p.destination_folder_path)
}

fn validate_copy_folder(p: &CopyFolderPayload) -> Result<(), ValidationError> {
    validate_destination(&p.destination_folder_id, &p.destination_folder_path)
}

fn validate_move_file(p: &MoveFilePayload) -> Result<(), ValidationError> {
    validate_destination(&p.destination_folder_id, &p.destination_folder_path)
}

fn validate_move_folder(p: &MoveFolderPayload) -> Result<(), ValidationError> {
    validate_destination(&p.destination_folder_id, &p.destination_folder_path)
}

/// Payload of a directory action, tagged by the action name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DirectoryActionPayload {
    GetFile(GetFilePayload),
    GetFolder(GetFolderPayload),
    CreateFile(CreateFilePayload),
    CreateFolder(CreateFolderPayload),
    UpdateFile(UpdateFilePayload),
    UpdateFolder(UpdateFolderPayload),
    DeleteFile(DeleteFilePayload),
    DeleteFolder(DeleteFolderPayload),
    CopyFile(CopyFilePayload),
    CopyFolder(CopyFolderPayload),
    MoveFile(MoveFilePayload),
    MoveFolder(MoveFolderPayload),
    RestoreTrash(RestoreTrashPayload),
}

impl DirectoryActionPayload {
    /// Decode the payload sent under `action`. A missing or null payload
    /// decodes as `{}`.
    pub fn from_parts(action: DirectoryActionEnum, payload: Value) -> serde_json::Result<Self> {
        use serde_json::from_value;
        let payload = match payload {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };
        Ok(match action {
            DirectoryActionEnum::GetFile => Self::GetFile(from_value(payload)?),
            DirectoryActionEnum::GetFolder => Self::GetFolder(from_value(payload)?),
            DirectoryActionEnum::CreateFile => Self::CreateFile(from_value(payload)?),
            DirectoryActionEnum::CreateFolder => Self::CreateFolder(from_value(payload)?),
            DirectoryActionEnum::UpdateFile => Self::UpdateFile(from_value(payload)?),
            DirectoryActionEnum::UpdateFolder => Self::UpdateFolder(from_value(payload)?),
            DirectoryActionEnum::DeleteFile => Self::DeleteFile(from_value(payload)?),
            DirectoryActionEnum::DeleteFolder => Self::DeleteFolder(from_value(payload)?),
            DirectoryActionEnum::CopyFile => Self::CopyFile(from_value(payload)?),
            DirectoryActionEnum::CopyFolder => Self::CopyFolder(from_value(payload)?),
            DirectoryActionEnum::MoveFile => Self::MoveFile(from_value(payload)?),
            DirectoryActionEnum::MoveFolder => Self::MoveFolder(from_value(payload)?),
            DirectoryActionEnum::RestoreTrash => Self::RestoreTrash(from_value(payload)?),
        })
    }

    /// The action's tag.
    pub fn action(&self) -> DirectoryActionEnum {
        match self {
            Self::GetFile(_) => DirectoryActionEnum::GetFile,
            Self::GetFolder(_) => DirectoryActionEnum::GetFolder,
            Self::CreateFile(_) => DirectoryActionEnum::CreateFile,
            Self::CreateFolder(_) => DirectoryActionEnum::CreateFolder,
            Self::UpdateFile(_) => DirectoryActionEnum::UpdateFile,
            Self::UpdateFolder(_) => DirectoryActionEnum::UpdateFolder,
            Self::DeleteFile(_) => DirectoryActionEnum::DeleteFile,
            Self::DeleteFolder(_) => DirectoryActionEnum::DeleteFolder,
            Self::CopyFile(_) => DirectoryActionEnum::CopyFile,
            Self::CopyFolder(_) => DirectoryActionEnum::CopyFolder,
            Self::MoveFile(_) => DirectoryActionEnum::MoveFile,
            Self::MoveFolder(_) => DirectoryActionEnum::MoveFolder,
            Self::RestoreTrash(_) => DirectoryActionEnum::RestoreTrash,
        }
    }

    /// The identifier carried inline; the parent folder for creations.
    pub fn resource_id(&self) -> Option<DirectoryResourceID> {
        match self {
            Self::GetFile(p) => p.id.clone().map(Into::into),
            Self::GetFolder(p) => p.id.clone().map(Into::into),
            Self::CreateFile(p) => p.parent_folder_uuid.clone().map(Into::into),
            Self::CreateFolder(p) => p.parent_folder_uuid.clone().map(Into::into),
            Self::UpdateFile(p) => p.id.clone().map(Into::into),
            Self::UpdateFolder(p) => p.id.clone().map(Into::into),
            Self::DeleteFile(p) => p.id.clone().map(Into::into),
            Self::DeleteFolder(p) => p.id.clone().map(Into::into),
            Self::CopyFile(p) => p.id.clone().map(Into::into),
            Self::CopyFolder(p) => p.id.clone().map(Into::into),
            Self::MoveFile(p) => p.id.clone().map(Into::into),
            Self::MoveFolder(p) => p.id.clone().map(Into::into),
            Self::RestoreTrash(p) => p.id.clone(),
        }
    }
}

impl Validate for DirectoryActionPayload {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Self::GetFile(p) => p.validate(),
            Self::GetFolder(p) => p.validate(),
            Self::CreateFile(p) => p.validate(),
            Self::CreateFolder(p) => p.validate(),
            Self::UpdateFile(p) => p.validate(),
            Self::UpdateFolder(p) => p.validate(),
            Self::DeleteFile(p) => p.validate(),
            Self::DeleteFolder(p) => p.validate(),
            Self::CopyFile(p) => p.validate(),
            Self::CopyFolder(p) => p.validate(),
            Self::MoveFile(p) => p.validate(),
            Self::MoveFolder(p) => p.validate(),
            Self::RestoreTrash(p) => p.validate(),
        }
    }
}

/// One directory action: its target and its tagged payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryAction {
    /// Resource addressed by the action; the parent folder for creations.
    #[serde(skip_serializing_if = "ResourceIdentifier::is_empty")]
    pub target: ResourceIdentifier,
    /// Action name and payload.
    #[serde(flatten)]
    pub payload: DirectoryActionPayload,
}

/// Wire form decoded before the payload is resolved against its tag.
#[derive(Deserialize)]
struct RawDirectoryAction {
    action: DirectoryActionEnum,
    #[serde(default)]
    target: ResourceIdentifier,
    #[serde(default)]
    payload: Value,
}

impl<'de> Deserialize<'de> for DirectoryAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawDirectoryAction::deserialize(deserializer)?;
        let payload =
            DirectoryActionPayload::from_parts(raw.action, raw.payload).map_err(de::Error::custom)?;
        Ok(Self {
            target: raw.target,
            payload,
        })
    }
}

impl DirectoryAction {
    /// Build an action whose payload names its own resource.
    pub fn new(payload: DirectoryActionPayload) -> Self {
        Self {
            target: ResourceIdentifier::default(),
            payload,
        }
    }

    /// Build an action addressed through `target`.
    pub fn targeted(target: ResourceIdentifier, payload: DirectoryActionPayload) -> Self {
        Self { target, payload }
    }

    /// The action's tag.
    pub fn action(&self) -> DirectoryActionEnum {
        self.payload.action()
    }

    /// The resource identifier the action names, from the target or else the
    /// payload. `None` when it is addressed by path only.
    pub fn resource_id(&self) -> Option<DirectoryResourceID> {
        self.target
            .resource_id
            .clone()
            .or_else(|| self.payload.resource_id())
    }

    /// Whether the action only reads.
    pub fn is_read_only(&self) -> bool {
        matches!(
            self.payload,
            DirectoryActionPayload::GetFile(_) | DirectoryActionPayload::GetFolder(_)
        )
    }
}

impl Validate for DirectoryAction {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.payload.validate()
    }
}

/// Body of a directory action request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DirectoryActionRequestBody {
    /// Actions, executed in order.
    pub actions: Vec<DirectoryAction>,
}

impl DirectoryActionRequestBody {
    /// Build a request from a list of actions.
    pub fn new(actions: Vec<DirectoryAction>) -> Self {
        Self { actions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use officex_core::AppError;
    use officex_core::error::ErrorKind;
    use serde_json::json;

    fn create_folder_json() -> serde_json::Value {
        json!({
            "action": "CREATE_FOLDER",
            "payload": {
                "name": "Docs",
                "labels": [],
                "disk_id": "DiskID_1",
                "disk_type": "LOCAL_SSD",
                "parent_folder_uuid": "FolderID_root"
            }
        })
    }

    #[test]
    fn test_decode_create_folder() {
        let action: DirectoryAction = serde_json::from_value(create_folder_json()).unwrap();
        assert_eq!(action.action(), DirectoryActionEnum::CreateFolder);
        assert!(action.target.is_empty());
        assert_eq!(action.resource_id().map(|id| id.to_string()).as_deref(), Some("FolderID_root"));
        let DirectoryActionPayload::CreateFolder(payload) = &action.payload else {
            panic!("expected CREATE_FOLDER");
        };
        assert_eq!(payload.name, "Docs");
        assert_eq!(payload.disk_type, Some(DiskTypeEnum::LocalSsd));
        assert!(action.validate().is_ok());
        assert_eq!(serde_json::to_value(&action).unwrap(), create_folder_json());
    }

    #[test]
    fn test_decode_targeted_action() {
        let value = json!({
            "action": "GET_FILE",
            "target": {"resource_id": "FileID_abc"},
            "payload": {}
        });
        let action: DirectoryAction = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(action.target, ResourceIdentifier::id("FileID_abc".parse::<FileID>().unwrap()));
        assert_eq!(action.resource_id().map(|id| id.is_file()), Some(true));
        assert_eq!(serde_json::to_value(&action).unwrap(), value);
    }

    #[test]
    fn test_decode_create_under_target_path() {
        let action: DirectoryAction = serde_json::from_value(json!({
            "action": "CREATE_FILE",
            "target": {"resource_path": "DiskID_1::/Docs/"},
            "payload": {
                "name": "a.txt",
                "extension": "txt",
                "labels": [],
                "file_size": 3,
                "raw_url": "",
                "disk_id": "DiskID_1"
            }
        }))
        .unwrap();
        assert_eq!(action.target.resource_path.as_deref(), Some("DiskID_1::/Docs/"));
        assert!(action.resource_id().is_none());
        let DirectoryActionPayload::CreateFile(payload) = &action.payload else {
            panic!("expected CREATE_FILE");
        };
        assert!(payload.parent_folder_uuid.is_none());
        assert!(payload.disk_type.is_none());
    }

    #[test]
    fn test_missing_payload_reads_as_empty() {
        let action: DirectoryAction = serde_json::from_value(json!({
            "action": "GET_FOLDER",
            "target": {"resource_id": "FolderID_a"}
        }))
        .unwrap();
        assert_eq!(
            action.payload,
            DirectoryActionPayload::GetFolder(GetFolderPayload {
                id: None,
                share_track_hash: None
            })
        );
    }

    #[test]
    fn test_unknown_action_is_unknown_variant() {
        let err = serde_json::from_value::<DirectoryAction>(json!({
            "action": "RENAME_FILE",
            "payload": {"id": "FileID_a"}
        }))
        .unwrap_err();
        assert_eq!(AppError::from(err).kind, ErrorKind::UnknownVariant);
    }

    #[test]
    fn test_unknown_prefix_is_unknown_variant() {
        let err = serde_json::from_str::<DirectoryAction>(
            r#"{"action": "GET_FILE", "payload": {"id": "NopeID_x"}}"#,
        )
        .unwrap_err();
        assert_eq!(AppError::from(err).kind, ErrorKind::UnknownVariant);

        let err = serde_json::from_str::<DirectoryAction>(
            r#"{"action": "GET_FILE", "target": {"resource_id": "NopeID_x"}, "payload": {}}"#,
        )
        .unwrap_err();
        assert_eq!(AppError::from(err).kind, ErrorKind::UnknownVariant);
    }

    #[test]
    fn test_payload_under_wrong_tag_is_rejected() {
        let parsed = serde_json::from_value::<DirectoryAction>(json!({
            "action": "DELETE_FILE",
            "payload": {"id": "FileID_a", "destination_folder_id": "FolderID_b"}
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_foreign_prefix_in_payload_is_rejected() {
        let parsed = serde_json::from_value::<DirectoryAction>(json!({
            "action": "GET_FILE",
            "payload": {"id": "FolderID_a"}
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_move_requires_destination() {
        let action: DirectoryAction = serde_json::from_value(json!({
            "action": "MOVE_FILE",
            "payload": {"id": "FileID_a"}
        }))
        .unwrap();
        assert!(action.validate().is_err());
    }

    #[test]
    fn test_invalid_name_fails_validation() {
        let mut value = create_folder_json();
        value["payload"]["name"] = json!("a/b");
        let action: DirectoryAction = serde_json::from_value(value).unwrap();
        let err: AppError = action.validate().unwrap_err().into();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_restore_trash_accepts_either_kind() {
        let action: DirectoryAction = serde_json::from_value(json!({
            "action": "RESTORE_TRASH",
            "target": {"resource_id": "FileID_a"},
            "payload": {"file_conflict_resolution": "KEEP_NEWER"}
        }))
        .unwrap();
        assert_eq!(action.resource_id().map(|id| id.is_file()), Some(true));
    }

    #[test]
    fn test_delete_defaults_to_trash() {
        let action: DirectoryAction = serde_json::from_value(json!({
            "action": "DELETE_FOLDER",
            "payload": {"id": "FolderID_a"}
        }))
        .unwrap();
        let DirectoryActionPayload::DeleteFolder(payload) = action.payload else {
            panic!("expected DELETE_FOLDER");
        };
        assert!(!payload.permanent);
    }
}
