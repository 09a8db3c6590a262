//! Execution of directory action batches.
//!
//! A batch runs its actions in request order and yields one outcome per
//! action. A failing action is recorded and the batch continues.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use officex_api::directory::{
    CopyFilePayload, CopyFolderPayload, CreateFilePayload, CreateFileResponse,
    CreateFolderPayload, DeleteFilePayload, DeleteFileResponse, DeleteFolderPayload,
    DeleteFolderResponse, DirectoryAction, DirectoryActionOutcome, DirectoryActionPayload,
    DirectoryActionRequestBody, DirectoryActionResult, FileConflictResolutionEnum,
    GetFileAssetRequest, GetFilePayload, GetFileResponse, GetFolderPayload, GetFolderResponse,
    MoveFilePayload, MoveFolderPayload, RestoreTrashPayload, RestoreTrashResponse,
    UpdateFilePayload, UpdateFolderPayload, UploadInstructions,
};
use officex_api::routes::disks::CreateDiskRequest;
use officex_api::validation::validate_request;
use officex_core::AppError;
use officex_core::AppResult;
use officex_core::config::AppConfig;
use officex_core::types::{
    DirectoryActionOutcomeID, DirectoryResourceID, DiskID, DiskTypeEnum, DriveFullFilePath,
    DriveID, FileID, FolderID, HostURL, IdGenerator, Paginator, UnixTimestampMs, UploadStatus,
    UserID, disk_root_path, split_disk_path,
};
use officex_entity::file::model::extension_of;
use officex_entity::{
    DirectoryPermissionType, DirectoryResourcePermissionFE, Disk, FileRecord, FolderRecord,
    NEVER_EXPIRES,
};

use super::naming::next_free_name;
use super::store::DirectoryStore;
use crate::context::{Clock, RequestContext};

/// Where an incoming file or folder lands inside a destination folder.
#[derive(Debug)]
enum Placement {
    /// The name is free.
    Free(String),
    /// Leave the resource already at the path untouched.
    KeepExisting(DirectoryResourceID),
    /// Remove the resource at the path, then take the name.
    Replace {
        name: String,
        existing: DirectoryResourceID,
    },
}

/// Identifiers for the folders created when a disk is mounted. Absent ones
/// are generated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskFolderIds {
    pub root_folder: Option<FolderID>,
    pub trash_folder: Option<FolderID>,
}

/// In-memory executor for directory actions on one drive.
#[derive(Debug)]
pub struct DirectoryService {
    pub(super) store: Arc<DirectoryStore>,
    pub(super) ids: IdGenerator,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) drive_id: DriveID,
    pub(super) owner_id: UserID,
    pub(super) host_url: HostURL,
    pub(super) trash_folder_name: String,
    pub(super) paginator: Paginator,
    batch_gate: Mutex<()>,
}

impl DirectoryService {
    /// Creates a new directory service.
    pub fn new(config: &AppConfig, ids: IdGenerator, clock: Arc<dyn Clock>) -> Self {
        Self::with_store(config, Arc::new(DirectoryStore::new()), ids, clock)
    }

    /// Creates a service over an existing store.
    pub fn with_store(
        config: &AppConfig,
        store: Arc<DirectoryStore>,
        ids: IdGenerator,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            ids,
            clock,
            drive_id: DriveID::from_principal(&config.drive.drive_principal),
            owner_id: UserID::from_principal(&config.drive.owner_principal),
            host_url: config.drive.host_url.trim_end_matches('/').to_string(),
            trash_folder_name: config.drive.trash_folder_name.clone(),
            paginator: Paginator::new(&config.pagination),
            batch_gate: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<DirectoryStore> {
        &self.store
    }

    pub fn drive_id(&self) -> &DriveID {
        &self.drive_id
    }

    pub fn owner_id(&self) -> &UserID {
        &self.owner_id
    }

    /// Mount a disk, creating its root and trash folders.
    ///
    /// The trash folder sits at `<root>/<trash name>/` but is not listed
    /// among the root's children.
    pub fn mount_disk(&self, ctx: &RequestContext, request: CreateDiskRequest) -> AppResult<Disk> {
        self.mount_disk_with(ctx, request, DiskFolderIds::default())
    }

    /// Mount a disk whose root and trash folders take the given identifiers.
    pub fn mount_disk_with(
        &self,
        ctx: &RequestContext,
        request: CreateDiskRequest,
        folders: DiskFolderIds,
    ) -> AppResult<Disk> {
        validate_request(&request)?;
        let id = match request.id {
            Some(id) if self.store.contains_disk(&id) => {
                return Err(AppError::conflict(format!("Disk {id} already exists")));
            }
            Some(id) => id,
            None => DiskID::generate(&self.ids),
        };
        let root_id = self.fresh_folder_id(folders.root_folder)?;
        let trash_id = self.fresh_folder_id(folders.trash_folder)?;
        if root_id == trash_id {
            return Err(AppError::validation(
                "Root and trash folders need distinct identifiers",
            ));
        }
        let now = self.clock.now_ms();

        let root = self.blank_folder(
            ctx,
            root_id,
            String::new(),
            None,
            disk_root_path(id.as_str()),
            &id,
            request.disk_type,
            now,
        );
        let trash = self.blank_folder(
            ctx,
            trash_id,
            self.trash_folder_name.clone(),
            Some(root.id.clone()),
            root.child_folder_path(&self.trash_folder_name),
            &id,
            request.disk_type,
            now,
        );

        let disk = Disk {
            id,
            name: request.name,
            disk_type: request.disk_type,
            public_note: request.public_note,
            private_note: request.private_note,
            auth_json: request.auth_json,
            labels: Vec::new(),
            created_at: now,
            root_folder: root.id.clone(),
            trash_folder: trash.id.clone(),
            endpoint: request.endpoint,
            external_id: request.external_id,
            external_payload: request.external_payload,
        };

        self.store.put_folder(root);
        self.store.put_folder(trash);
        self.store.put_disk(disk.clone());

        info!(
            user_id = %ctx.user_id,
            disk_id = %disk.id,
            disk_type = ?disk.disk_type,
            "Disk mounted"
        );

        Ok(disk)
    }

    /// Execute a batch, returning one outcome per action in request order.
    pub fn execute(
        &self,
        ctx: &RequestContext,
        body: DirectoryActionRequestBody,
    ) -> Vec<DirectoryActionOutcome> {
        let _gate = self.batch_gate.lock().unwrap_or_else(PoisonError::into_inner);
        info!(
            user_id = %ctx.user_id,
            tracer = ?ctx.tracer,
            actions = body.actions.len(),
            "Executing directory batch"
        );
        body.actions
            .into_iter()
            .map(|action| self.execute_one(ctx, action))
            .collect()
    }

    fn execute_one(&self, ctx: &RequestContext, action: DirectoryAction) -> DirectoryActionOutcome {
        let outcome_id = DirectoryActionOutcomeID::generate(&self.ids);
        let kind = action.action();
        match self.dispatch(ctx, &action) {
            Ok(result) => {
                debug!(outcome_id = %outcome_id, action = %kind, "Directory action succeeded");
                DirectoryActionOutcome::succeeded(outcome_id, action, result)
            }
            Err(err) => {
                warn!(
                    outcome_id = %outcome_id,
                    action = %kind,
                    resource = ?action.resource_id().map(|id| id.to_string()),
                    error = %err,
                    "Directory action failed"
                );
                DirectoryActionOutcome::failed(outcome_id, action, err)
            }
        }
    }

    fn dispatch(
        &self,
        ctx: &RequestContext,
        action: &DirectoryAction,
    ) -> AppResult<DirectoryActionResult> {
        validate_request(action)?;
        let resource = self.resolve_target(action)?;
        Ok(match &action.payload {
            DirectoryActionPayload::GetFile(p) => {
                let id = file_target(&resource)?;
                DirectoryActionResult::GetFile(self.get_file(ctx, id, p)?)
            }
            DirectoryActionPayload::GetFolder(p) => {
                let id = folder_target(&resource)?;
                DirectoryActionResult::GetFolder(self.get_folder(ctx, id, p)?)
            }
            DirectoryActionPayload::CreateFile(p) => {
                let parent = folder_target(&resource)?;
                DirectoryActionResult::CreateFile(self.create_file(ctx, parent, p)?)
            }
            DirectoryActionPayload::CreateFolder(p) => {
                let parent = folder_target(&resource)?;
                DirectoryActionResult::CreateFolder(self.create_folder(ctx, parent, p)?)
            }
            DirectoryActionPayload::UpdateFile(p) => {
                let id = file_target(&resource)?;
                DirectoryActionResult::UpdateFile(self.update_file(ctx, id, p)?)
            }
            DirectoryActionPayload::UpdateFolder(p) => {
                let id = folder_target(&resource)?;
                DirectoryActionResult::UpdateFolder(self.update_folder(ctx, id, p)?)
            }
            DirectoryActionPayload::DeleteFile(p) => {
                let id = file_target(&resource)?;
                DirectoryActionResult::DeleteFile(self.delete_file(ctx, id, p)?)
            }
            DirectoryActionPayload::DeleteFolder(p) => {
                let id = folder_target(&resource)?;
                DirectoryActionResult::DeleteFolder(self.delete_folder(ctx, id, p)?)
            }
            DirectoryActionPayload::CopyFile(p) => {
                let id = file_target(&resource)?;
                DirectoryActionResult::CopyFile(self.copy_file(ctx, id, p)?)
            }
            DirectoryActionPayload::CopyFolder(p) => {
                let id = folder_target(&resource)?;
                DirectoryActionResult::CopyFolder(self.copy_folder(ctx, id, p)?)
            }
            DirectoryActionPayload::MoveFile(p) => {
                let id = file_target(&resource)?;
                DirectoryActionResult::MoveFile(self.move_file(ctx, id, p)?)
            }
            DirectoryActionPayload::MoveFolder(p) => {
                let id = folder_target(&resource)?;
                DirectoryActionResult::MoveFolder(self.move_folder(ctx, id, p)?)
            }
            DirectoryActionPayload::RestoreTrash(p) => {
                DirectoryActionResult::RestoreTrash(self.restore_trash(ctx, &resource, p)?)
            }
        })
    }

    /// The resource an action addresses: the target's identifier, else the
    /// resource at the target's path, else the identifier in the payload.
    /// For creations this is the receiving folder.
    fn resolve_target(&self, action: &DirectoryAction) -> AppResult<DirectoryResourceID> {
        let targeted = match (&action.target.resource_id, &action.target.resource_path) {
            (Some(id), _) => Some(id.clone()),
            (None, Some(path)) => Some(self.resource_at_path(path)?),
            (None, None) => None,
        };
        match (targeted, action.payload.resource_id()) {
            (Some(target), Some(inline)) if target != inline => Err(AppError::validation(format!(
                "Target {target} and payload {inline} name different resources"
            ))),
            (Some(target), _) => Ok(target),
            (None, Some(inline)) => Ok(inline),
            (None, None) => Err(AppError::validation(format!(
                "{} needs a target resource_id or resource_path",
                action.action()
            ))),
        }
    }

    /// Resource at a full path. Folder paths may omit the trailing `/`.
    fn resource_at_path(&self, path: &str) -> AppResult<DirectoryResourceID> {
        self.store
            .resolve_path(path)
            .or_else(|| {
                if path.ends_with('/') {
                    None
                } else {
                    self.store.resolve_path(&format!("{path}/"))
                }
            })
            .ok_or_else(|| AppError::not_found(format!("Nothing at path '{path}'")))
    }

    pub fn get_file(
        &self,
        ctx: &RequestContext,
        id: &FileID,
        _payload: &GetFilePayload,
    ) -> AppResult<GetFileResponse> {
        let file = self.live_file(id)?;
        if file.is_expired(self.clock.now_ms()) {
            return Err(AppError::not_found(format!("File {} has expired", file.id)));
        }
        Ok(GetFileResponse {
            file,
            permissions: self.resource_permissions(ctx),
            requester_id: ctx.user_id.clone(),
        })
    }

    /// Location the asset route redirects to. A given extension must match
    /// the file's own.
    pub fn file_asset_url(&self, request: &GetFileAssetRequest) -> AppResult<String> {
        validate_request(request)?;
        let (id, extension) = request.split()?;
        let file = self.live_file(&id)?;
        if file.is_expired(self.clock.now_ms())
            || extension.is_some_and(|e| !e.eq_ignore_ascii_case(&file.extension))
        {
            return Err(AppError::not_found(format!(
                "No asset {}",
                request.file_id_with_extension
            )));
        }
        debug!(file_id = %file.id, "Redirecting to file asset");
        Ok(file.raw_url)
    }

    pub fn get_folder(
        &self,
        ctx: &RequestContext,
        id: &FolderID,
        _payload: &GetFolderPayload,
    ) -> AppResult<GetFolderResponse> {
        let folder = self.live_folder(id)?;
        if folder.is_expired(self.clock.now_ms()) {
            return Err(AppError::not_found(format!("Folder {} has expired", folder.id)));
        }
        Ok(GetFolderResponse {
            folder,
            permissions: self.resource_permissions(ctx),
            requester_id: ctx.user_id.clone(),
        })
    }

    pub fn create_file(
        &self,
        ctx: &RequestContext,
        parent_id: &FolderID,
        payload: &CreateFilePayload,
    ) -> AppResult<CreateFileResponse> {
        let now = self.clock.now_ms();
        let parent = self.writable_folder(parent_id)?;
        self.check_disk(&parent, &payload.disk_id, payload.disk_type)?;
        if let Some(target) = &payload.shortcut_to {
            self.live_file(target)?;
        }

        let id = match &payload.id {
            Some(id) if self.store.contains_file(id) => {
                return Err(AppError::conflict(format!("File {id} already exists")));
            }
            Some(id) => id.clone(),
            None => FileID::generate(&self.ids),
        };

        let resolution = payload.file_conflict_resolution.unwrap_or_default();
        let placement = self.place(&parent, &payload.name, true, resolution, now, None)?;
        let (name, replaced) = match placement {
            Placement::Free(name) => (name, None),
            Placement::KeepExisting(existing) => {
                let file = self.file_at(&existing)?;
                return Ok(CreateFileResponse {
                    file,
                    upload: UploadInstructions::default(),
                    notes: "Kept the existing file".to_string(),
                });
            }
            Placement::Replace { name, existing } => {
                let previous = self.file_at(&existing)?;
                self.purge(ctx, &existing)?;
                (name, Some(previous))
            }
        };

        let extension = if payload.extension.is_empty() {
            extension_of(&name)
        } else {
            payload.extension.trim_start_matches('.').to_lowercase()
        };
        let upload_status = if payload.raw_url.is_some() {
            UploadStatus::Completed
        } else {
            UploadStatus::Queued
        };
        let raw_url = payload
            .raw_url
            .clone()
            .unwrap_or_else(|| self.raw_url_for(&id));

        let file = FileRecord {
            full_directory_path: parent.child_file_path(&name),
            id,
            name,
            parent_folder_uuid: parent.id.clone(),
            file_version: replaced.as_ref().map_or(1, |prev| prev.file_version + 1),
            prior_version: replaced.as_ref().map(|prev| prev.id.clone()),
            next_version: None,
            extension,
            labels: payload.labels.clone(),
            created_by: ctx.user_id.clone(),
            created_at: now,
            disk_id: parent.disk_id.clone(),
            disk_type: parent.disk_type,
            file_size: payload.file_size,
            raw_url,
            last_updated_date_ms: now,
            last_updated_by: ctx.user_id.clone(),
            deleted: false,
            drive_id: self.drive_id.clone(),
            expires_at: payload.expires_at.unwrap_or(NEVER_EXPIRES),
            restore_trash_prior_folder_path: None,
            has_sovereign_permissions: payload.has_sovereign_permissions.unwrap_or(false),
            shortcut_to: payload.shortcut_to.clone(),
            upload_status,
            external_id: payload.external_id.clone(),
            external_payload: payload.external_payload.clone(),
        };

        self.store.put_file(file.clone());
        self.attach(ctx, &parent.id, DirectoryResourceID::File(file.id.clone()), now)?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            path = %file.full_directory_path,
            version = file.file_version,
            "File created"
        );

        let upload = if upload_status == UploadStatus::Queued {
            UploadInstructions {
                url: format!("{}/v1/drive/{}/directory/raw_upload", self.host_url, self.drive_id),
                fields: BTreeMap::from([("file_id".to_string(), file.id.to_string())]),
            }
        } else {
            UploadInstructions::default()
        };
        let notes = match &file.prior_version {
            Some(prior) => format!("Replaced {prior}"),
            None => String::new(),
        };

        Ok(CreateFileResponse { file, upload, notes })
    }

    pub fn create_folder(
        &self,
        ctx: &RequestContext,
        parent_id: &FolderID,
        payload: &CreateFolderPayload,
    ) -> AppResult<FolderRecord> {
        let now = self.clock.now_ms();
        let parent = self.writable_folder(parent_id)?;
        self.check_disk(&parent, &payload.disk_id, payload.disk_type)?;
        if let Some(target) = &payload.shortcut_to {
            self.live_folder(target)?;
        }

        let id = match &payload.id {
            Some(id) if self.store.contains_folder(id) => {
                return Err(AppError::conflict(format!("Folder {id} already exists")));
            }
            Some(id) => id.clone(),
            None => FolderID::generate(&self.ids),
        };

        let resolution = payload.file_conflict_resolution.unwrap_or_default();
        let name = match self.place(&parent, &payload.name, false, resolution, now, None)? {
            Placement::Free(name) => name,
            Placement::KeepExisting(existing) => return self.folder_at(&existing),
            Placement::Replace { name, existing } => {
                self.purge(ctx, &existing)?;
                name
            }
        };

        let mut folder = self.blank_folder(
            ctx,
            id,
            name.clone(),
            Some(parent.id.clone()),
            parent.child_folder_path(&name),
            &parent.disk_id,
            parent.disk_type,
            now,
        );
        folder.labels = payload.labels.clone();
        folder.expires_at = payload.expires_at.unwrap_or(NEVER_EXPIRES);
        folder.has_sovereign_permissions = payload.has_sovereign_permissions.unwrap_or(false);
        folder.shortcut_to = payload.shortcut_to.clone();
        folder.external_id = payload.external_id.clone();
        folder.external_payload = payload.external_payload.clone();

        self.store.put_folder(folder.clone());
        self.attach(ctx, &parent.id, DirectoryResourceID::Folder(folder.id.clone()), now)?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            path = %folder.full_directory_path,
            "Folder created"
        );

        Ok(folder)
    }

    pub fn update_file(
        &self,
        ctx: &RequestContext,
        id: &FileID,
        payload: &UpdateFilePayload,
    ) -> AppResult<FileRecord> {
        let mut file = self.live_file(id)?;

        if let Some(name) = payload.name.as_ref().filter(|name| **name != file.name) {
            let parent = self.store.folder(&file.parent_folder_uuid)?;
            let path = parent.child_file_path(name);
            if self.store.resolve_path(&path).is_some() {
                return Err(AppError::conflict(format!("'{path}' already exists")));
            }
            let extension = extension_of(name);
            if !extension.is_empty() {
                file.extension = extension;
            }
            file.name = name.clone();
            file.full_directory_path = path;
        }
        if let Some(labels) = &payload.labels {
            file.labels = labels.clone();
        }
        if let Some(expires_at) = payload.expires_at {
            file.expires_at = expires_at;
        }
        if let Some(status) = payload.upload_status {
            file.upload_status = status;
        }
        if let Some(raw_url) = &payload.raw_url {
            file.raw_url = raw_url.clone();
        }
        if let Some(external_id) = &payload.external_id {
            file.external_id = Some(external_id.clone());
        }
        if let Some(external_payload) = &payload.external_payload {
            file.external_payload = Some(external_payload.clone());
        }

        file.touch(&ctx.user_id, self.clock.now_ms());
        self.store.put_file(file.clone());
        debug!(file_id = %file.id, "File updated");
        Ok(file)
    }

    pub fn update_folder(
        &self,
        ctx: &RequestContext,
        id: &FolderID,
        payload: &UpdateFolderPayload,
    ) -> AppResult<FolderRecord> {
        let mut folder = self.live_folder(id)?;

        if let Some(name) = payload.name.as_ref().filter(|name| **name != folder.name) {
            let parent_id = self.movable_parent(&folder)?;
            let parent = self.store.folder(&parent_id)?;
            let path = parent.child_folder_path(name);
            if self.store.resolve_path(&path).is_some() {
                return Err(AppError::conflict(format!("'{path}' already exists")));
            }
            folder.name = name.clone();
            self.repath_folder(&mut folder, path)?;
        }
        if let Some(labels) = &payload.labels {
            folder.labels = labels.clone();
        }
        if let Some(expires_at) = payload.expires_at {
            folder.expires_at = expires_at;
        }
        if let Some(external_id) = &payload.external_id {
            folder.external_id = Some(external_id.clone());
        }
        if let Some(external_payload) = &payload.external_payload {
            folder.external_payload = Some(external_payload.clone());
        }

        folder.touch(&ctx.user_id, self.clock.now_ms());
        self.store.put_folder(folder.clone());
        debug!(folder_id = %folder.id, "Folder updated");
        Ok(folder)
    }

    /// Move a file to its disk's trash, or remove it when `permanent` is set
    /// or it already sits in the trash.
    ///
    /// A trashed file keeps its record with `deleted` set and the path of
    /// the folder it was deleted from.
    pub fn delete_file(
        &self,
        ctx: &RequestContext,
        id: &FileID,
        payload: &DeleteFilePayload,
    ) -> AppResult<DeleteFileResponse> {
        let mut file = self.store.file(id)?;
        let resource = DirectoryResourceID::File(file.id.clone());

        if payload.permanent
            || file.deleted
            || self.in_trash(&file.full_directory_path, &file.disk_id)
        {
            self.purge(ctx, &resource)?;
            info!(user_id = %ctx.user_id, file_id = %file.id, "File deleted permanently");
            return Ok(DeleteFileResponse {
                file_id: file.id,
                path_to_trash: String::new(),
            });
        }

        let prior = self.store.folder(&file.parent_folder_uuid)?.full_directory_path;
        let trash = self.trash_folder(&file.disk_id)?;
        file.restore_trash_prior_folder_path = Some(prior);
        let moved = self.relocate_file(ctx, file, &trash, FileConflictResolutionEnum::KeepBoth)?;

        info!(user_id = %ctx.user_id, file_id = %moved.id, "File moved to trash");
        Ok(DeleteFileResponse {
            file_id: moved.id,
            path_to_trash: moved.full_directory_path,
        })
    }

    /// Move a folder and its subtree to the trash, marking every record in
    /// it `deleted`, or remove the subtree outright.
    pub fn delete_folder(
        &self,
        ctx: &RequestContext,
        id: &FolderID,
        payload: &DeleteFolderPayload,
    ) -> AppResult<DeleteFolderResponse> {
        let mut folder = self.store.folder(id)?;
        let parent_id = self.movable_parent(&folder)?;
        let resource = DirectoryResourceID::Folder(folder.id.clone());

        if payload.permanent
            || folder.deleted
            || self.in_trash(&folder.full_directory_path, &folder.disk_id)
        {
            let (files, folders) = self.purge(ctx, &resource)?;
            info!(
                user_id = %ctx.user_id,
                folder_id = %folder.id,
                files = files.len(),
                folders = folders.len(),
                "Folder deleted permanently"
            );
            return Ok(DeleteFolderResponse {
                folder_id: folder.id,
                path_to_trash: String::new(),
                deleted_files: Some(files),
                deleted_folders: Some(folders),
            });
        }

        let prior = self.store.folder(&parent_id)?.full_directory_path;
        let trash = self.trash_folder(&folder.disk_id)?;
        folder.restore_trash_prior_folder_path = Some(prior);
        let moved =
            self.relocate_folder(ctx, folder, &trash, FileConflictResolutionEnum::KeepBoth)?;

        info!(user_id = %ctx.user_id, folder_id = %moved.id, "Folder moved to trash");
        Ok(DeleteFolderResponse {
            folder_id: moved.id,
            path_to_trash: moved.full_directory_path,
            deleted_files: None,
            deleted_folders: None,
        })
    }

    pub fn copy_file(
        &self,
        ctx: &RequestContext,
        id: &FileID,
        payload: &CopyFilePayload,
    ) -> AppResult<FileRecord> {
        let now = self.clock.now_ms();
        let source = self.live_file(id)?;
        let destination = self.destination(
            payload.destination_folder_id.as_ref(),
            payload.destination_folder_path.as_deref(),
        )?;
        let id = match &payload.new_copy_id {
            Some(id) if self.store.contains_file(id) => {
                return Err(AppError::conflict(format!("File {id} already exists")));
            }
            Some(id) => id.clone(),
            None => FileID::generate(&self.ids),
        };

        let resolution = payload.file_conflict_resolution.unwrap_or_default();
        let name = match self.place(&destination, &source.name, true, resolution, now, None)? {
            Placement::Free(name) => name,
            Placement::KeepExisting(existing) => return self.file_at(&existing),
            Placement::Replace { name, existing } => {
                if existing == DirectoryResourceID::File(source.id.clone()) {
                    return Err(AppError::conflict(format!(
                        "Cannot replace {} with a copy of itself",
                        source.id
                    )));
                }
                self.purge(ctx, &existing)?;
                name
            }
        };

        let copy = self.copy_file_into(ctx, &source, &destination, id, name, now)?;
        info!(
            user_id = %ctx.user_id,
            source_id = %source.id,
            copy_id = %copy.id,
            "File copied"
        );
        Ok(copy)
    }

    pub fn copy_folder(
        &self,
        ctx: &RequestContext,
        id: &FolderID,
        payload: &CopyFolderPayload,
    ) -> AppResult<FolderRecord> {
        let now = self.clock.now_ms();
        let source = self.live_folder(id)?;
        self.movable_parent(&source)?;
        let destination = self.destination(
            payload.destination_folder_id.as_ref(),
            payload.destination_folder_path.as_deref(),
        )?;
        if destination
            .full_directory_path
            .starts_with(&source.full_directory_path)
        {
            return Err(AppError::conflict(
                "Cannot copy a folder into itself or its descendants",
            ));
        }
        let id = match &payload.new_copy_id {
            Some(id) if self.store.contains_folder(id) => {
                return Err(AppError::conflict(format!("Folder {id} already exists")));
            }
            Some(id) => id.clone(),
            None => FolderID::generate(&self.ids),
        };

        let resolution = payload.file_conflict_resolution.unwrap_or_default();
        let name = match self.place(&destination, &source.name, false, resolution, now, None)? {
            Placement::Free(name) => name,
            Placement::KeepExisting(existing) => return self.folder_at(&existing),
            Placement::Replace { name, existing } => {
                self.check_replaceable(&existing, &source.full_directory_path)?;
                self.purge(ctx, &existing)?;
                name
            }
        };

        let copy = self.copy_tree(ctx, &source, &destination, id, name, now)?;
        info!(
            user_id = %ctx.user_id,
            source_id = %source.id,
            copy_id = %copy.id,
            "Folder copied"
        );
        Ok(copy)
    }

    pub fn move_file(
        &self,
        ctx: &RequestContext,
        id: &FileID,
        payload: &MoveFilePayload,
    ) -> AppResult<FileRecord> {
        let file = self.live_file(id)?;
        let destination = self.destination(
            payload.destination_folder_id.as_ref(),
            payload.destination_folder_path.as_deref(),
        )?;
        let resolution = payload.file_conflict_resolution.unwrap_or_default();
        let moved = self.relocate_file(ctx, file, &destination, resolution)?;
        info!(
            user_id = %ctx.user_id,
            file_id = %moved.id,
            path = %moved.full_directory_path,
            "File moved"
        );
        Ok(moved)
    }

    pub fn move_folder(
        &self,
        ctx: &RequestContext,
        id: &FolderID,
        payload: &MoveFolderPayload,
    ) -> AppResult<FolderRecord> {
        let folder = self.live_folder(id)?;
        self.movable_parent(&folder)?;
        let destination = self.destination(
            payload.destination_folder_id.as_ref(),
            payload.destination_folder_path.as_deref(),
        )?;
        let resolution = payload.file_conflict_resolution.unwrap_or_default();
        let moved = self.relocate_folder(ctx, folder, &destination, resolution)?;
        info!(
            user_id = %ctx.user_id,
            folder_id = %moved.id,
            path = %moved.full_directory_path,
            "Folder moved"
        );
        Ok(moved)
    }

    /// Move a trashed file or folder back to where it was deleted from, or
    /// to `restore_to_folder_path`. Missing folders along the target path
    /// are recreated and the restored records are live again.
    pub fn restore_trash(
        &self,
        ctx: &RequestContext,
        resource: &DirectoryResourceID,
        payload: &RestoreTrashPayload,
    ) -> AppResult<RestoreTrashResponse> {
        let resolution = payload.file_conflict_resolution.unwrap_or_default();
        let response = match resource {
            DirectoryResourceID::File(id) => {
                let file = self.store.file(id)?;
                let target = self.restore_target(
                    file.restore_trash_prior_folder_path.as_deref(),
                    payload.restore_to_folder_path.as_deref(),
                    &file.disk_id,
                    id.as_str(),
                )?;
                let destination = self.ensure_folder_path(ctx, &file.disk_id, &target)?;
                let restored = self.relocate_file(ctx, file, &destination, resolution)?;
                RestoreTrashResponse {
                    restored_files: vec![restored.id],
                    restored_folders: Vec::new(),
                }
            }
            DirectoryResourceID::Folder(id) => {
                let folder = self.store.folder(id)?;
                let target = self.restore_target(
                    folder.restore_trash_prior_folder_path.as_deref(),
                    payload.restore_to_folder_path.as_deref(),
                    &folder.disk_id,
                    id.as_str(),
                )?;
                let destination = self.ensure_folder_path(ctx, &folder.disk_id, &target)?;
                let restored = self.relocate_folder(ctx, folder, &destination, resolution)?;
                let (restored_folders, restored_files) = self.subtree(&restored.id)?;
                RestoreTrashResponse {
                    restored_files,
                    restored_folders,
                }
            }
        };
        info!(
            user_id = %ctx.user_id,
            resource = %resource,
            files = response.restored_files.len(),
            folders = response.restored_folders.len(),
            "Restored from trash"
        );
        Ok(response)
    }

    pub(super) fn live_file(&self, id: &FileID) -> AppResult<FileRecord> {
        let file = self.store.file(id)?;
        if file.deleted {
            return Err(AppError::not_found(format!("File {id} not found")));
        }
        Ok(file)
    }

    pub(super) fn live_folder(&self, id: &FolderID) -> AppResult<FolderRecord> {
        let folder = self.store.folder(id)?;
        if folder.deleted {
            return Err(AppError::not_found(format!("Folder {id} not found")));
        }
        Ok(folder)
    }

    /// A live folder outside the trash.
    fn writable_folder(&self, id: &FolderID) -> AppResult<FolderRecord> {
        let folder = self.live_folder(id)?;
        if self.in_trash(&folder.full_directory_path, &folder.disk_id) {
            return Err(AppError::validation(format!(
                "Folder {id} is in the trash; restore it first"
            )));
        }
        Ok(folder)
    }

    /// Destination of a copy or move. The trash is reached only through
    /// deletion.
    fn destination(
        &self,
        id: Option<&FolderID>,
        path: Option<&str>,
    ) -> AppResult<FolderRecord> {
        match (id, path) {
            (Some(id), _) => self.writable_folder(id),
            (None, Some(path)) => {
                let folder = self.store.folder_by_path(path)?;
                self.writable_folder(&folder.id)
            }
            (None, None) => Err(AppError::validation(
                "destination_folder_id or destination_folder_path is required",
            )),
        }
    }

    fn file_at(&self, resource: &DirectoryResourceID) -> AppResult<FileRecord> {
        match resource {
            DirectoryResourceID::File(id) => self.store.file(id),
            DirectoryResourceID::Folder(id) => Err(AppError::internal(format!(
                "File path resolved to folder {id}"
            ))),
        }
    }

    fn folder_at(&self, resource: &DirectoryResourceID) -> AppResult<FolderRecord> {
        match resource {
            DirectoryResourceID::Folder(id) => self.store.folder(id),
            DirectoryResourceID::File(id) => Err(AppError::internal(format!(
                "Folder path resolved to file {id}"
            ))),
        }
    }

    fn trash_folder(&self, disk_id: &DiskID) -> AppResult<FolderRecord> {
        let disk = self.store.disk(disk_id)?;
        self.store.folder(&disk.trash_folder)
    }

    pub(super) fn trash_path(&self, disk_id: &DiskID) -> DriveFullFilePath {
        format!("{}{}/", disk_root_path(disk_id.as_str()), self.trash_folder_name)
    }

    pub(super) fn in_trash(&self, path: &str, disk_id: &DiskID) -> bool {
        path.starts_with(&self.trash_path(disk_id))
    }

    /// Parent of a folder that may be renamed, moved, or deleted. Disk roots
    /// and trash folders are fixed.
    fn movable_parent(&self, folder: &FolderRecord) -> AppResult<FolderID> {
        let parent = folder
            .parent_folder_uuid
            .clone()
            .ok_or_else(|| AppError::validation("The disk root cannot be changed"))?;
        if folder.full_directory_path == self.trash_path(&folder.disk_id) {
            return Err(AppError::validation("The trash folder cannot be changed"));
        }
        Ok(parent)
    }

    fn check_disk(
        &self,
        parent: &FolderRecord,
        disk_id: &DiskID,
        disk_type: Option<DiskTypeEnum>,
    ) -> AppResult<()> {
        if &parent.disk_id != disk_id {
            return Err(AppError::validation(format!(
                "Folder {} lives on {}, not {disk_id}",
                parent.id, parent.disk_id
            )));
        }
        if let Some(disk_type) = disk_type.filter(|t| *t != parent.disk_type) {
            return Err(AppError::validation(format!(
                "Disk {disk_id} is {:?}, not {disk_type:?}",
                parent.disk_type
            )));
        }
        Ok(())
    }

    /// A caller-chosen folder identifier that is not taken yet, or a
    /// generated one.
    fn fresh_folder_id(&self, requested: Option<FolderID>) -> AppResult<FolderID> {
        match requested {
            Some(id) if self.store.contains_folder(&id) => {
                Err(AppError::conflict(format!("Folder {id} already exists")))
            }
            Some(id) => Ok(id),
            None => Ok(FolderID::generate(&self.ids)),
        }
    }

    /// Reject replacing a folder that holds `path`; purging it would take
    /// the resource being placed with it.
    fn check_replaceable(&self, existing: &DirectoryResourceID, path: &str) -> AppResult<()> {
        if let DirectoryResourceID::Folder(id) = existing {
            let folder = self.store.folder(id)?;
            if path.starts_with(&folder.full_directory_path) {
                return Err(AppError::conflict(format!(
                    "Cannot replace '{}': it contains '{path}'",
                    folder.full_directory_path
                )));
            }
        }
        Ok(())
    }

    fn raw_url_for(&self, id: &FileID) -> String {
        format!("{}/v1/drive/{}/directory/asset/{id}", self.host_url, self.drive_id)
    }

    pub(super) fn permission_previews(&self, ctx: &RequestContext) -> Vec<DirectoryPermissionType> {
        if ctx.is_owner(&self.owner_id) {
            DirectoryPermissionType::ALL.to_vec()
        } else {
            Vec::new()
        }
    }

    fn resource_permissions(&self, ctx: &RequestContext) -> Vec<DirectoryResourcePermissionFE> {
        self.permission_previews(ctx)
            .into_iter()
            .map(|grant_type| DirectoryResourcePermissionFE {
                permission_id: self.drive_id.to_string(),
                grant_type,
            })
            .collect()
    }

    #[allow(clippy::too_many_arguments)]
    fn blank_folder(
        &self,
        ctx: &RequestContext,
        id: FolderID,
        name: String,
        parent: Option<FolderID>,
        path: DriveFullFilePath,
        disk_id: &DiskID,
        disk_type: DiskTypeEnum,
        now: UnixTimestampMs,
    ) -> FolderRecord {
        FolderRecord {
            id,
            name,
            parent_folder_uuid: parent,
            subfolder_uuids: Vec::new(),
            file_uuids: Vec::new(),
            full_directory_path: path,
            labels: Vec::new(),
            created_by: ctx.user_id.clone(),
            created_at: now,
            last_updated_date_ms: now,
            last_updated_by: ctx.user_id.clone(),
            disk_id: disk_id.clone(),
            disk_type,
            deleted: false,
            expires_at: NEVER_EXPIRES,
            drive_id: self.drive_id.clone(),
            restore_trash_prior_folder_path: None,
            has_sovereign_permissions: false,
            shortcut_to: None,
            external_id: None,
            external_payload: None,
        }
    }

    /// Decide how `name` lands in `parent` under `resolution`.
    ///
    /// `moving` is the resource being placed, if it already exists; finding
    /// it at the target path is not a clash.
    fn place(
        &self,
        parent: &FolderRecord,
        name: &str,
        is_file: bool,
        resolution: FileConflictResolutionEnum,
        incoming_updated_ms: UnixTimestampMs,
        moving: Option<&DirectoryResourceID>,
    ) -> AppResult<Placement> {
        let path_of = |candidate: &str| {
            if is_file {
                parent.child_file_path(candidate)
            } else {
                parent.child_folder_path(candidate)
            }
        };
        let existing = match self.store.resolve_path(&path_of(name)) {
            Some(existing) if Some(&existing) != moving => existing,
            _ => return Ok(Placement::Free(name.to_string())),
        };

        let placement = match resolution {
            FileConflictResolutionEnum::KeepBoth => Placement::Free(next_free_name(
                name,
                is_file,
                |candidate| self.store.resolve_path(&path_of(candidate)).is_some(),
            )),
            FileConflictResolutionEnum::KeepOriginal => Placement::KeepExisting(existing),
            FileConflictResolutionEnum::Replace => Placement::Replace {
                name: name.to_string(),
                existing,
            },
            FileConflictResolutionEnum::KeepNewer => {
                let existing_updated_ms = match &existing {
                    DirectoryResourceID::File(id) => self.store.file(id)?.last_updated_date_ms,
                    DirectoryResourceID::Folder(id) => self.store.folder(id)?.last_updated_date_ms,
                };
                if incoming_updated_ms >= existing_updated_ms {
                    Placement::Replace {
                        name: name.to_string(),
                        existing,
                    }
                } else {
                    Placement::KeepExisting(existing)
                }
            }
        };
        debug!(name, ?resolution, ?placement, "Resolved name clash");
        Ok(placement)
    }

    fn attach(
        &self,
        ctx: &RequestContext,
        parent_id: &FolderID,
        child: DirectoryResourceID,
        now: UnixTimestampMs,
    ) -> AppResult<()> {
        let mut parent = self.store.folder(parent_id)?;
        match child {
            DirectoryResourceID::File(id) if !parent.file_uuids.contains(&id) => {
                parent.file_uuids.push(id)
            }
            DirectoryResourceID::Folder(id) if !parent.subfolder_uuids.contains(&id) => {
                parent.subfolder_uuids.push(id)
            }
            _ => return Ok(()),
        }
        parent.touch(&ctx.user_id, now);
        self.store.put_folder(parent);
        Ok(())
    }

    fn detach(
        &self,
        ctx: &RequestContext,
        parent_id: &FolderID,
        child: &DirectoryResourceID,
        now: UnixTimestampMs,
    ) -> AppResult<()> {
        let mut parent = self.store.folder(parent_id)?;
        match child {
            DirectoryResourceID::File(id) => parent.file_uuids.retain(|f| f != id),
            DirectoryResourceID::Folder(id) => parent.subfolder_uuids.retain(|f| f != id),
        }
        parent.touch(&ctx.user_id, now);
        self.store.put_folder(parent);
        Ok(())
    }

    /// Folder ids (starting with `root`) and file ids of a subtree.
    pub(super) fn subtree(&self, root: &FolderID) -> AppResult<(Vec<FolderID>, Vec<FileID>)> {
        let mut folders = Vec::new();
        let mut files = Vec::new();
        let mut queue = VecDeque::from([root.clone()]);
        while let Some(id) = queue.pop_front() {
            let folder = self.store.folder(&id)?;
            files.extend(folder.file_uuids.iter().cloned());
            queue.extend(folder.subfolder_uuids.iter().cloned());
            folders.push(id);
        }
        Ok((folders, files))
    }

    /// Remove a file, or a folder with its whole subtree, from the drive.
    fn purge(
        &self,
        ctx: &RequestContext,
        resource: &DirectoryResourceID,
    ) -> AppResult<(Vec<FileID>, Vec<FolderID>)> {
        let now = self.clock.now_ms();
        match resource {
            DirectoryResourceID::File(id) => {
                let file = self.store.file(id)?;
                self.detach(ctx, &file.parent_folder_uuid, resource, now)?;
                self.store.remove_file(id);
                Ok((vec![id.clone()], Vec::new()))
            }
            DirectoryResourceID::Folder(id) => {
                let folder = self.store.folder(id)?;
                if let Some(parent) = &folder.parent_folder_uuid {
                    self.detach(ctx, parent, resource, now)?;
                }
                let (folders, files) = self.subtree(id)?;
                for file_id in &files {
                    self.store.remove_file(file_id);
                }
                for folder_id in &folders {
                    self.store.remove_folder(folder_id);
                }
                Ok((files, folders))
            }
        }
    }

    /// Rewrite the path of `folder` and everything below it. Descendants
    /// follow the folder onto its disk and into or out of the trash.
    fn repath_folder(&self, folder: &mut FolderRecord, path: DriveFullFilePath) -> AppResult<()> {
        folder.full_directory_path = path;
        self.store.put_folder(folder.clone());

        for file_id in &folder.file_uuids {
            let mut file = self.store.file(file_id)?;
            file.full_directory_path = folder.child_file_path(&file.name);
            file.disk_id = folder.disk_id.clone();
            file.disk_type = folder.disk_type;
            file.deleted = folder.deleted;
            self.store.put_file(file);
        }
        for subfolder_id in &folder.subfolder_uuids {
            let mut subfolder = self.store.folder(subfolder_id)?;
            subfolder.disk_id = folder.disk_id.clone();
            subfolder.disk_type = folder.disk_type;
            subfolder.deleted = folder.deleted;
            let path = folder.child_folder_path(&subfolder.name);
            self.repath_folder(&mut subfolder, path)?;
        }
        Ok(())
    }

    fn relocate_file(
        &self,
        ctx: &RequestContext,
        mut file: FileRecord,
        destination: &FolderRecord,
        resolution: FileConflictResolutionEnum,
    ) -> AppResult<FileRecord> {
        let now = self.clock.now_ms();
        let resource = DirectoryResourceID::File(file.id.clone());
        let name = match self.place(
            destination,
            &file.name,
            true,
            resolution,
            file.last_updated_date_ms,
            Some(&resource),
        )? {
            Placement::Free(name) => name,
            Placement::KeepExisting(existing) => {
                return Err(AppError::conflict(format!(
                    "{existing} already holds '{}' in {}; nothing was moved",
                    file.name, destination.full_directory_path
                )));
            }
            Placement::Replace { name, existing } => {
                self.purge(ctx, &existing)?;
                name
            }
        };

        let previous_parent = file.parent_folder_uuid.clone();
        if previous_parent != destination.id {
            self.detach(ctx, &previous_parent, &resource, now)?;
        }

        file.full_directory_path = destination.child_file_path(&name);
        file.name = name;
        file.parent_folder_uuid = destination.id.clone();
        file.disk_id = destination.disk_id.clone();
        file.disk_type = destination.disk_type;
        file.deleted = self.in_trash(&file.full_directory_path, &file.disk_id);
        if !file.deleted {
            file.restore_trash_prior_folder_path = None;
        }
        file.touch(&ctx.user_id, now);
        self.store.put_file(file.clone());
        self.attach(ctx, &destination.id, resource, now)?;
        Ok(file)
    }

    fn relocate_folder(
        &self,
        ctx: &RequestContext,
        mut folder: FolderRecord,
        destination: &FolderRecord,
        resolution: FileConflictResolutionEnum,
    ) -> AppResult<FolderRecord> {
        if destination
            .full_directory_path
            .starts_with(&folder.full_directory_path)
        {
            return Err(AppError::conflict(
                "Cannot move a folder into itself or its descendants",
            ));
        }
        let now = self.clock.now_ms();
        let resource = DirectoryResourceID::Folder(folder.id.clone());
        let name = match self.place(
            destination,
            &folder.name,
            false,
            resolution,
            folder.last_updated_date_ms,
            Some(&resource),
        )? {
            Placement::Free(name) => name,
            Placement::KeepExisting(existing) => {
                return Err(AppError::conflict(format!(
                    "{existing} already holds '{}' in {}; nothing was moved",
                    folder.name, destination.full_directory_path
                )));
            }
            Placement::Replace { name, existing } => {
                self.check_replaceable(&existing, &folder.full_directory_path)?;
                self.purge(ctx, &existing)?;
                name
            }
        };

        if let Some(previous_parent) = folder.parent_folder_uuid.clone() {
            if previous_parent != destination.id {
                self.detach(ctx, &previous_parent, &resource, now)?;
            }
        }

        let path = destination.child_folder_path(&name);
        folder.name = name;
        folder.parent_folder_uuid = Some(destination.id.clone());
        folder.disk_id = destination.disk_id.clone();
        folder.disk_type = destination.disk_type;
        folder.deleted = self.in_trash(&path, &folder.disk_id);
        if !folder.deleted {
            folder.restore_trash_prior_folder_path = None;
        }
        folder.touch(&ctx.user_id, now);
        self.repath_folder(&mut folder, path)?;
        self.attach(ctx, &destination.id, resource, now)?;
        self.store.folder(&folder.id)
    }

    fn copy_file_into(
        &self,
        ctx: &RequestContext,
        source: &FileRecord,
        destination: &FolderRecord,
        id: FileID,
        name: String,
        now: UnixTimestampMs,
    ) -> AppResult<FileRecord> {
        let copy = FileRecord {
            id,
            full_directory_path: destination.child_file_path(&name),
            name,
            parent_folder_uuid: destination.id.clone(),
            file_version: 1,
            prior_version: None,
            next_version: None,
            created_by: ctx.user_id.clone(),
            created_at: now,
            disk_id: destination.disk_id.clone(),
            disk_type: destination.disk_type,
            last_updated_date_ms: now,
            last_updated_by: ctx.user_id.clone(),
            restore_trash_prior_folder_path: None,
            ..source.clone()
        };
        self.store.put_file(copy.clone());
        self.attach(ctx, &destination.id, DirectoryResourceID::File(copy.id.clone()), now)?;
        Ok(copy)
    }

    fn copy_tree(
        &self,
        ctx: &RequestContext,
        source: &FolderRecord,
        destination: &FolderRecord,
        id: FolderID,
        name: String,
        now: UnixTimestampMs,
    ) -> AppResult<FolderRecord> {
        let copy = FolderRecord {
            id,
            full_directory_path: destination.child_folder_path(&name),
            name,
            parent_folder_uuid: Some(destination.id.clone()),
            subfolder_uuids: Vec::new(),
            file_uuids: Vec::new(),
            created_by: ctx.user_id.clone(),
            created_at: now,
            last_updated_date_ms: now,
            last_updated_by: ctx.user_id.clone(),
            disk_id: destination.disk_id.clone(),
            disk_type: destination.disk_type,
            restore_trash_prior_folder_path: None,
            ..source.clone()
        };
        self.store.put_folder(copy.clone());
        self.attach(ctx, &destination.id, DirectoryResourceID::Folder(copy.id.clone()), now)?;

        for file_id in &source.file_uuids {
            let file = self.store.file(file_id)?;
            let name = file.name.clone();
            self.copy_file_into(ctx, &file, &copy, FileID::generate(&self.ids), name, now)?;
        }
        for subfolder_id in &source.subfolder_uuids {
            let subfolder = self.store.folder(subfolder_id)?;
            let name = subfolder.name.clone();
            self.copy_tree(ctx, &subfolder, &copy, FolderID::generate(&self.ids), name, now)?;
        }
        self.store.folder(&copy.id)
    }

    fn restore_target(
        &self,
        prior: Option<&str>,
        requested: Option<&str>,
        disk_id: &DiskID,
        resource: &str,
    ) -> AppResult<DriveFullFilePath> {
        let prior = prior.ok_or_else(|| {
            AppError::validation(format!("{resource} is not in the trash"))
        })?;
        let target = requested.unwrap_or(prior).to_string();
        if self.in_trash(&target, disk_id) || self.in_trash(&format!("{target}/"), disk_id) {
            return Err(AppError::validation("Cannot restore into the trash"));
        }
        Ok(target)
    }

    /// The folder at `path` on `disk_id`, creating any missing folders
    /// along the way.
    fn ensure_folder_path(
        &self,
        ctx: &RequestContext,
        disk_id: &DiskID,
        path: &str,
    ) -> AppResult<FolderRecord> {
        let (path_disk, within) = split_disk_path(path)
            .ok_or_else(|| AppError::validation(format!("'{path}' is not a drive path")))?;
        if path_disk != disk_id.as_str() {
            return Err(AppError::validation(format!(
                "'{path}' is not on disk {disk_id}"
            )));
        }

        let disk = self.store.disk(disk_id)?;
        let mut current = self.live_folder(&disk.root_folder)?;
        for segment in within.split('/').filter(|s| !s.is_empty()) {
            let child_path = current.child_folder_path(segment);
            current = match self.store.resolve_path(&child_path) {
                Some(DirectoryResourceID::Folder(id)) => self.live_folder(&id)?,
                Some(DirectoryResourceID::File(id)) => {
                    return Err(AppError::conflict(format!(
                        "'{child_path}' is occupied by file {id}"
                    )));
                }
                None => {
                    let now = self.clock.now_ms();
                    let folder = self.blank_folder(
                        ctx,
                        FolderID::generate(&self.ids),
                        segment.to_string(),
                        Some(current.id.clone()),
                        child_path,
                        &current.disk_id,
                        current.disk_type,
                        now,
                    );
                    self.store.put_folder(folder.clone());
                    let resource = DirectoryResourceID::Folder(folder.id.clone());
                    self.attach(ctx, &current.id, resource, now)?;
                    debug!(
                        folder_id = %folder.id,
                        path = %folder.full_directory_path,
                        "Recreated folder"
                    );
                    folder
                }
            };
        }
        Ok(current)
    }
}

fn file_target(resource: &DirectoryResourceID) -> AppResult<&FileID> {
    match resource {
        DirectoryResourceID::File(id) => Ok(id),
        DirectoryResourceID::Folder(id) => Err(AppError::validation(format!(
            "Expected a file but the target is {id}"
        ))),
    }
}

fn folder_target(resource: &DirectoryResourceID) -> AppResult<&FolderID> {
    match resource {
        DirectoryResourceID::Folder(id) => Ok(id),
        DirectoryResourceID::File(id) => Err(AppError::validation(format!(
            "Expected a folder but the target is {id}"
        ))),
    }
}
