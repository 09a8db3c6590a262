//! Concurrent in-memory storage for files, folders, and disks.
//!
//! Alongside the records the store keeps a path index so that a full
//! directory path resolves to the resource living there. Every write goes
//! through [`DirectoryStore::put_file`] / [`DirectoryStore::put_folder`]
//! so the index never drifts from the records.
//!
//! Lookups return clones; no map guard is held across calls.

use dashmap::DashMap;
use tracing::debug;

use officex_core::AppError;
use officex_core::AppResult;
use officex_core::types::{DirectoryResourceID, DiskID, DriveFullFilePath, FileID, FolderID};
use officex_entity::{Disk, FileRecord, FolderRecord};

#[derive(Debug, Default)]
pub struct DirectoryStore {
    files: DashMap<FileID, FileRecord>,
    folders: DashMap<FolderID, FolderRecord>,
    disks: DashMap<DiskID, Disk>,
    paths: DashMap<DriveFullFilePath, DirectoryResourceID>,
}

impl DirectoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self, id: &FileID) -> AppResult<FileRecord> {
        self.files
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    pub fn folder(&self, id: &FolderID) -> AppResult<FolderRecord> {
        self.folders
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    pub fn disk(&self, id: &DiskID) -> AppResult<Disk> {
        self.disks
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("Disk {id} not found")))
    }

    pub fn contains_file(&self, id: &FileID) -> bool {
        self.files.contains_key(id)
    }

    pub fn contains_folder(&self, id: &FolderID) -> bool {
        self.folders.contains_key(id)
    }

    pub fn contains_disk(&self, id: &DiskID) -> bool {
        self.disks.contains_key(id)
    }

    /// Resource living at `path`, if any.
    pub fn resolve_path(&self, path: &str) -> Option<DirectoryResourceID> {
        self.paths.get(path).map(|entry| entry.value().clone())
    }

    /// Folder living at `path`. A trailing `/` is added when missing.
    pub fn folder_by_path(&self, path: &str) -> AppResult<FolderRecord> {
        let normalized = if path.ends_with('/') {
            path.to_string()
        } else {
            format!("{path}/")
        };
        match self.resolve_path(&normalized) {
            Some(DirectoryResourceID::Folder(id)) => self.folder(&id),
            _ => Err(AppError::not_found(format!("No folder at path '{path}'"))),
        }
    }

    pub fn put_disk(&self, disk: Disk) {
        self.disks.insert(disk.id.clone(), disk);
    }

    pub fn put_file(&self, record: FileRecord) {
        let resource = DirectoryResourceID::File(record.id.clone());
        let previous = self
            .files
            .get(&record.id)
            .map(|entry| entry.full_directory_path.clone());
        if let Some(old_path) = previous.filter(|p| p != &record.full_directory_path) {
            self.unindex(&old_path, &resource);
        }
        self.paths
            .insert(record.full_directory_path.clone(), resource);
        self.files.insert(record.id.clone(), record);
    }

    pub fn put_folder(&self, record: FolderRecord) {
        let resource = DirectoryResourceID::Folder(record.id.clone());
        let previous = self
            .folders
            .get(&record.id)
            .map(|entry| entry.full_directory_path.clone());
        if let Some(old_path) = previous.filter(|p| p != &record.full_directory_path) {
            self.unindex(&old_path, &resource);
        }
        self.paths
            .insert(record.full_directory_path.clone(), resource);
        self.folders.insert(record.id.clone(), record);
    }

    pub fn remove_file(&self, id: &FileID) -> Option<FileRecord> {
        let (_, record) = self.files.remove(id)?;
        self.unindex(&record.full_directory_path, &DirectoryResourceID::File(id.clone()));
        debug!(file_id = %id, "File record removed");
        Some(record)
    }

    pub fn remove_folder(&self, id: &FolderID) -> Option<FolderRecord> {
        let (_, record) = self.folders.remove(id)?;
        self.unindex(
            &record.full_directory_path,
            &DirectoryResourceID::Folder(id.clone()),
        );
        debug!(folder_id = %id, "Folder record removed");
        Some(record)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    // Only drop the index entry if it still points at this resource.
    fn unindex(&self, path: &str, resource: &DirectoryResourceID) {
        self.paths.remove_if(path, |_, current| current == resource);
    }
}
