//! Batched directory actions and directory listing.

pub mod action;
pub mod asset;
pub mod list;
pub mod outcome;

pub use action::{
    CopyFilePayload, CopyFolderPayload, CreateFilePayload, CreateFolderPayload,
    DeleteFilePayload, DeleteFolderPayload, DirectoryAction, DirectoryActionEnum,
    DirectoryActionPayload, DirectoryActionRequestBody, FileConflictResolutionEnum,
    GetFilePayload, GetFolderPayload, MoveFilePayload, MoveFolderPayload, ResourceIdentifier,
    RestoreTrashPayload, UpdateFilePayload, UpdateFolderPayload,
};
pub use asset::GetFileAssetRequest;
pub use list::{FolderBreadcrumb, ListDirectoryRequest, ListDirectoryResponse};
pub use outcome::{
    CreateFileResponse, DeleteFileResponse, DeleteFolderResponse, DirectoryActionError,
    DirectoryActionOutcome, DirectoryActionResponse, DirectoryActionResult, GetFileResponse,
    GetFolderResponse, RestoreTrashResponse, UploadInstructions,
};
