//! Per-action outcomes of a directory action batch.
//!
//! A result carries no tag of its own on the wire, so decoding an outcome
//! reads the paired request first and decodes the result with the schema
//! its action dictates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use officex_core::AppError;
use officex_core::AppResult;
use officex_core::types::{DirectoryActionOutcomeID, FileID, FolderID, UserID};
use officex_entity::{DirectoryResourcePermissionFE, FileRecord, FolderRecord};

use super::action::{DirectoryAction, DirectoryActionEnum};

/// Result of `GET_FILE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetFileResponse {
    pub file: FileRecord,
    pub permissions: Vec<DirectoryResourcePermissionFE>,
    pub requester_id: UserID,
}

/// Result of `GET_FOLDER`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetFolderResponse {
    pub folder: FolderRecord,
    pub permissions: Vec<DirectoryResourcePermissionFE>,
    pub requester_id: UserID,
}

/// Where and how to upload the bytes of a newly created file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UploadInstructions {
    /// Upload endpoint; empty when the disk takes no direct uploads.
    pub url: String,
    /// Form fields to send along with the bytes.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

/// Result of `CREATE_FILE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFileResponse {
    pub file: FileRecord,
    pub upload: UploadInstructions,
    #[serde(default)]
    pub notes: String,
}

/// Result of `DELETE_FILE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteFileResponse {
    pub file_id: FileID,
    /// Path of the file inside the trash, empty for permanent deletes.
    pub path_to_trash: String,
}

/// Result of `DELETE_FOLDER`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteFolderResponse {
    pub folder_id: FolderID,
    /// Path of the folder inside the trash, empty for permanent deletes.
    pub path_to_trash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_files: Option<Vec<FileID>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_folders: Option<Vec<FolderID>>,
}

/// Result of `RESTORE_TRASH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RestoreTrashResponse {
    pub restored_files: Vec<FileID>,
    pub restored_folders: Vec<FolderID>,
}

/// Successful result of one directory action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DirectoryActionResult {
    GetFile(GetFileResponse),
    GetFolder(GetFolderResponse),
    CreateFile(CreateFileResponse),
    CreateFolder(FolderRecord),
    UpdateFile(FileRecord),
    UpdateFolder(FolderRecord),
    DeleteFile(DeleteFileResponse),
    DeleteFolder(DeleteFolderResponse),
    CopyFile(FileRecord),
    CopyFolder(FolderRecord),
    MoveFile(FileRecord),
    MoveFolder(FolderRecord),
    RestoreTrash(RestoreTrashResponse),
}

impl DirectoryActionResult {
    /// Decode a result produced by `action`.
    pub fn from_value(action: DirectoryActionEnum, value: Value) -> AppResult<Self> {
        use serde_json::from_value;
        Ok(match action {
            DirectoryActionEnum::GetFile => Self::GetFile(from_value(value)?),
            DirectoryActionEnum::GetFolder => Self::GetFolder(from_value(value)?),
            DirectoryActionEnum::CreateFile => Self::CreateFile(from_value(value)?),
            DirectoryActionEnum::CreateFolder => Self::CreateFolder(from_value(value)?),
            DirectoryActionEnum::UpdateFile => Self::UpdateFile(from_value(value)?),
            DirectoryActionEnum::UpdateFolder => Self::UpdateFolder(from_value(value)?),
            DirectoryActionEnum::DeleteFile => Self::DeleteFile(from_value(value)?),
            DirectoryActionEnum::DeleteFolder => Self::DeleteFolder(from_value(value)?),
            DirectoryActionEnum::CopyFile => Self::CopyFile(from_value(value)?),
            DirectoryActionEnum::CopyFolder => Self::CopyFolder(from_value(value)?),
            DirectoryActionEnum::MoveFile => Self::MoveFile(from_value(value)?),
            DirectoryActionEnum::MoveFolder => Self::MoveFolder(from_value(value)?),
            DirectoryActionEnum::RestoreTrash => Self::RestoreTrash(from_value(value)?),
        })
    }

    /// The action that produces this kind of result.
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

    /// The folder record, when the result is one.
    pub fn as_folder(&self) -> Option<&FolderRecord> {
        match self {
            Self::CreateFolder(f)
            | Self::UpdateFolder(f)
            | Self::CopyFolder(f)
            | Self::MoveFolder(f) => Some(f),
            Self::GetFolder(r) => Some(&r.folder),
            _ => None,
        }
    }

    /// The file record, when the result is one.
    pub fn as_file(&self) -> Option<&FileRecord> {
        match self {
            Self::UpdateFile(f) | Self::CopyFile(f) | Self::MoveFile(f) => Some(f),
            Self::GetFile(r) => Some(&r.file),
            Self::CreateFile(r) => Some(&r.file),
            _ => None,
        }
    }
}

/// Error reported by a failed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryActionError {
    pub code: u16,
    pub message: String,
}

impl From<AppError> for DirectoryActionError {
    fn from(err: AppError) -> Self {
        Self {
            code: err.code(),
            message: err.message,
        }
    }
}

/// `result` on success, `error` on failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryActionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<DirectoryActionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<DirectoryActionError>,
}

/// Outcome of one action, at the same index as its request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDirectoryActionOutcome")]
pub struct DirectoryActionOutcome {
    pub id: DirectoryActionOutcomeID,
    pub success: bool,
    pub request: DirectoryAction,
    pub response: DirectoryActionResponse,
}

impl DirectoryActionOutcome {
    /// Outcome of an action that succeeded.
    pub fn succeeded(
        id: DirectoryActionOutcomeID,
        request: DirectoryAction,
        result: DirectoryActionResult,
    ) -> Self {
        Self {
            id,
            success: true,
            request,
            response: DirectoryActionResponse {
                result: Some(result),
                error: None,
            },
        }
    }

    /// Outcome of an action that failed.
    pub fn failed(id: DirectoryActionOutcomeID, request: DirectoryAction, err: AppError) -> Self {
        Self {
            id,
            success: false,
            request,
            response: DirectoryActionResponse {
                result: None,
                error: Some(err.into()),
            },
        }
    }

    /// The result of a successful outcome.
    pub fn result(&self) -> Option<&DirectoryActionResult> {
        self.response.result.as_ref()
    }

    /// The error of a failed outcome.
    pub fn error(&self) -> Option<&DirectoryActionError> {
        self.response.error.as_ref()
    }
}

#[derive(Deserialize)]
struct RawDirectoryActionResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<DirectoryActionError>,
}

#[derive(Deserialize)]
struct RawDirectoryActionOutcome {
    id: DirectoryActionOutcomeID,
    success: bool,
    request: DirectoryAction,
    response: RawDirectoryActionResponse,
}

impl TryFrom<RawDirectoryActionOutcome> for DirectoryActionOutcome {
    type Error = AppError;

    fn try_from(raw: RawDirectoryActionOutcome) -> Result<Self, Self::Error> {
        let RawDirectoryActionResponse { result, error } = raw.response;
        // Exactly one of `result` and `error`, matching `success`.
        let result = match (raw.success, result, error.is_some()) {
            (true, _, true) => {
                return Err(AppError::validation("Successful outcome must not carry an error"));
            }
            (true, None, false) => {
                return Err(AppError::validation("Successful outcome must carry a result"));
            }
            (true, Some(value), false) => {
                Some(DirectoryActionResult::from_value(raw.request.action(), value)?)
            }
            (false, Some(_), _) => {
                return Err(AppError::validation("Failed outcome must not carry a result"));
            }
            (false, None, false) => {
                return Err(AppError::validation("Failed outcome must carry an error"));
            }
            (false, None, true) => None,
        };
        Ok(Self {
            id: raw.id,
            success: raw.success,
            request: raw.request,
            response: DirectoryActionResponse { result, error },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn delete_request() -> DirectoryAction {
        serde_json::from_value(json!({
            "action": "DELETE_FILE",
            "target": {"resource_id": "FileID_a"},
            "payload": {}
        }))
        .unwrap()
    }

    #[test]
    fn test_result_decoded_by_request_action() {
        let value = json!({
            "id": "DirectoryActionOutcomeID_1",
            "success": true,
            "request": {"action": "DELETE_FILE", "payload": {"id": "FileID_a", "permanent": false}},
            "response": {"result": {"file_id": "FileID_a", "path_to_trash": "DiskID_1::.trash/a"}}
        });
        let outcome: DirectoryActionOutcome = serde_json::from_value(value.clone()).unwrap();
        assert!(matches!(
            outcome.result(),
            Some(DirectoryActionResult::DeleteFile(r)) if r.path_to_trash == "DiskID_1::.trash/a"
        ));
        assert_eq!(serde_json::to_value(&outcome).unwrap(), value);
    }

    #[test]
    fn test_result_with_wrong_shape_is_rejected() {
        let value = json!({
            "id": "DirectoryActionOutcomeID_1",
            "success": true,
            "request": {"action": "DELETE_FILE", "payload": {"id": "FileID_a"}},
            "response": {"result": {"restored_files": [], "restored_folders": []}}
        });
        assert!(serde_json::from_value::<DirectoryActionOutcome>(value).is_err());
    }

    #[test]
    fn test_failed_outcome_shape() {
        let outcome = DirectoryActionOutcome::failed(
            "DirectoryActionOutcomeID_2".parse().unwrap(),
            delete_request(),
            AppError::not_found("File not found"),
        );
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["response"], json!({"error": {"code": 404, "message": "File not found"}}));
        let back: DirectoryActionOutcome = serde_json::from_value(value).unwrap();
        assert_eq!(back, outcome);
    }

    #[test]
    fn test_inconsistent_success_flag_is_rejected() {
        let value = json!({
            "id": "DirectoryActionOutcomeID_3",
            "success": true,
            "request": {"action": "DELETE_FILE", "payload": {"id": "FileID_a"}},
            "response": {"error": {"code": 500, "message": "boom"}}
        });
        assert!(serde_json::from_value::<DirectoryActionOutcome>(value).is_err());
    }

    #[test]
    fn test_failed_outcome_with_result_is_rejected() {
        let value = json!({
            "id": "DirectoryActionOutcomeID_4",
            "success": false,
            "request": {"action": "DELETE_FILE", "payload": {"id": "FileID_a"}},
            "response": {
                "result": {"file_id": "FileID_a", "path_to_trash": "DiskID_1::.trash/a"},
                "error": {"code": 404, "message": "File not found"}
            }
        });
        assert!(serde_json::from_value::<DirectoryActionOutcome>(value).is_err());
    }

    #[test]
    fn test_success_without_result_is_rejected() {
        let value = json!({
            "id": "DirectoryActionOutcomeID_5",
            "success": true,
            "request": {"action": "DELETE_FILE", "payload": {"id": "FileID_a"}},
            "response": {}
        });
        assert!(serde_json::from_value::<DirectoryActionOutcome>(value).is_err());
    }
}
