//! Paged listing of a folder's children.
//!
//! Children are ordered folders first, then files, each group sorted by
//! case-insensitive name. The combined sequence is what the cursor walks.

use tracing::debug;

use officex_api::directory::{FolderBreadcrumb, ListDirectoryRequest, ListDirectoryResponse};
use officex_api::validation::validate_request;
use officex_core::AppError;
use officex_core::AppResult;
use officex_entity::{FileRecord, FileRecordFE, FolderRecord, FolderRecordFE};

use super::service::DirectoryService;
use crate::context::RequestContext;

#[derive(Debug, Clone)]
enum Entry {
    Folder(FolderRecord),
    File(FileRecord),
}

impl DirectoryService {
    /// List one page of a folder, addressed by id or by path.
    ///
    /// `filters` is a case-insensitive substring match on names. Totals
    /// count every matching child, not just the page. Trashed records are
    /// listed only while browsing the trash.
    pub fn list_directory(
        &self,
        ctx: &RequestContext,
        request: &ListDirectoryRequest,
    ) -> AppResult<ListDirectoryResponse> {
        validate_request(request)?;
        let folder = match (&request.folder_id, &request.path) {
            (Some(id), _) => self.store.folder(id)?,
            (None, Some(path)) => self.store.folder_by_path(path)?,
            (None, None) => return Err(AppError::validation("folder_id or path is required")),
        };
        let in_trash = self.in_trash(&folder.full_directory_path, &folder.disk_id);
        if folder.deleted && !in_trash {
            return Err(AppError::not_found(format!("Folder {} not found", folder.id)));
        }

        let needle = request
            .filters
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_lowercase);
        let matches = |name: &str| {
            needle
                .as_deref()
                .is_none_or(|needle| name.to_lowercase().contains(needle))
        };

        let trash_path = self.trash_path(&folder.disk_id);
        let mut folders: Vec<FolderRecord> = folder
            .subfolder_uuids
            .iter()
            .filter_map(|id| self.store.folder(id).ok())
            .filter(|f| {
                (in_trash || !f.deleted) && f.full_directory_path != trash_path && matches(&f.name)
            })
            .collect();
        folders.sort_by_key(|f| f.name.to_lowercase());

        let mut files: Vec<FileRecord> = folder
            .file_uuids
            .iter()
            .filter_map(|id| self.store.file(id).ok())
            .filter(|f| (in_trash || !f.deleted) && matches(&f.name))
            .collect();
        files.sort_by_key(|f| f.name.to_lowercase());

        let total_folders = folders.len();
        let total_files = files.len();
        let entries: Vec<Entry> = folders
            .into_iter()
            .map(Entry::Folder)
            .chain(files.into_iter().map(Entry::File))
            .collect();

        let page = self.paginator.paginate(&entries, &request.page_request())?;
        let previews = self.permission_previews(ctx);

        let mut page_folders = Vec::new();
        let mut page_files = Vec::new();
        for entry in page.items {
            match entry {
                Entry::Folder(f) => page_folders.push(FolderRecordFE::new(f, previews.clone())),
                Entry::File(f) => page_files.push(FileRecordFE::new(f, previews.clone())),
            }
        }

        debug!(
            folder_id = %folder.id,
            folders = page_folders.len(),
            files = page_files.len(),
            total = page.total,
            "Listed directory"
        );

        Ok(ListDirectoryResponse {
            folders: page_folders,
            files: page_files,
            total_folders,
            total_files,
            cursor: page.cursor,
            breadcrumbs: self.breadcrumbs(ctx, &folder)?,
        })
    }

    /// Ancestors of `folder` from the disk root down to the folder itself.
    /// The root crumb carries the disk's name.
    pub fn breadcrumbs(
        &self,
        ctx: &RequestContext,
        folder: &FolderRecord,
    ) -> AppResult<Vec<FolderBreadcrumb>> {
        let visible = ctx.is_owner(&self.owner_id);
        let mut crumbs = Vec::new();
        let mut current = folder.clone();
        loop {
            let resource_name = if current.is_root() {
                self.store.disk(&current.disk_id)?.name
            } else {
                current.name.clone()
            };
            crumbs.push(FolderBreadcrumb {
                resource_id: current.id.clone(),
                resource_name,
                visibility_preview: visible,
            });
            match &current.parent_folder_uuid {
                Some(parent) => current = self.store.folder(parent)?,
                None => break,
            }
        }
        crumbs.reverse();
        Ok(crumbs)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use officex_api::directory::{CreateFilePayload, CreateFolderPayload, DeleteFolderPayload};
    use officex_api::routes::disks::CreateDiskRequest;
    use officex_core::config::AppConfig;
    use officex_core::config::pagination::PaginationConfig;
    use officex_core::types::{DiskTypeEnum, FolderID, IdGenerator, UserID};
    use officex_entity::Disk;

    use super::*;
    use crate::context::FixedClock;

    fn setup(page_size: usize) -> (DirectoryService, RequestContext, Disk) {
        let config = AppConfig {
            pagination: PaginationConfig {
                default_page_size: page_size,
                max_page_size: 100,
            },
            ..AppConfig::default()
        };
        let service = DirectoryService::new(
            &config,
            IdGenerator::sequential(1),
            Arc::new(FixedClock::new(5)),
        );
        let ctx = RequestContext::new(UserID::from_principal(&config.drive.owner_principal));
        let disk = service
            .mount_disk(
                &ctx,
                CreateDiskRequest {
                    id: Some("DiskID_1".parse().unwrap()),
                    name: "Laptop".into(),
                    disk_type: DiskTypeEnum::BrowserCache,
                    public_note: None,
                    private_note: None,
                    auth_json: None,
                    endpoint: None,
                    external_id: None,
                    external_payload: None,
                },
            )
            .unwrap();
        (service, ctx, disk)
    }

    fn folder(
        svc: &DirectoryService,
        ctx: &RequestContext,
        disk: &Disk,
        parent: &FolderID,
        name: &str,
    ) -> FolderRecord {
        svc.create_folder(
            ctx,
            parent,
            &CreateFolderPayload {
                id: None,
                name: name.into(),
                labels: vec![],
                parent_folder_uuid: None,
                disk_id: disk.id.clone(),
                disk_type: Some(disk.disk_type),
                expires_at: None,
                file_conflict_resolution: None,
                has_sovereign_permissions: None,
                shortcut_to: None,
                external_id: None,
                external_payload: None,
            },
        )
        .unwrap()
    }

    fn file(
        svc: &DirectoryService,
        ctx: &RequestContext,
        disk: &Disk,
        parent: &FolderID,
        name: &str,
    ) {
        svc.create_file(
            ctx,
            parent,
            &CreateFilePayload {
                id: None,
                name: name.into(),
                parent_folder_uuid: None,
                extension: String::new(),
                labels: vec![],
                file_size: 1,
                disk_id: disk.id.clone(),
                disk_type: Some(disk.disk_type),
                raw_url: None,
                expires_at: None,
                file_conflict_resolution: None,
                has_sovereign_permissions: None,
                shortcut_to: None,
                external_id: None,
                external_payload: None,
            },
        )
        .unwrap();
    }

    #[test]
    fn test_folders_then_files_sorted() {
        let (svc, ctx, disk) = setup(50);
        let root = disk.root_folder.clone();
        file(&svc, &ctx, &disk, &root, "b.txt");
        folder(&svc, &ctx, &disk, &root, "Zeta");
        file(&svc, &ctx, &disk, &root, "A.txt");
        folder(&svc, &ctx, &disk, &root, "alpha");

        let listing = svc
            .list_directory(&ctx, &ListDirectoryRequest::folder(root))
            .unwrap();
        let folder_names: Vec<_> = listing.folders.iter().map(|f| f.record.name.as_str()).collect();
        let file_names: Vec<_> = listing.files.iter().map(|f| f.record.name.as_str()).collect();
        assert_eq!(folder_names, vec!["alpha", "Zeta"]);
        assert_eq!(file_names, vec!["A.txt", "b.txt"]);
        assert_eq!(listing.total_folders, 2);
        assert!(listing.cursor.is_none());
        assert_eq!(listing.files[0].permission_previews.len(), 6);
    }

    #[test]
    fn test_cursor_walk_covers_every_child_once() {
        let (svc, ctx, disk) = setup(3);
        let root = disk.root_folder.clone();
        for i in 0..4 {
            folder(&svc, &ctx, &disk, &root, &format!("dir{i}"));
        }
        for i in 0..3 {
            file(&svc, &ctx, &disk, &root, &format!("file{i}.txt"));
        }

        let mut seen = Vec::new();
        let mut request = ListDirectoryRequest::folder(root);
        loop {
            let page = svc.list_directory(&ctx, &request).unwrap();
            seen.extend(page.folders.iter().map(|f| f.record.name.clone()));
            seen.extend(page.files.iter().map(|f| f.record.name.clone()));
            match page.cursor {
                Some(cursor) => request.cursor = Some(cursor),
                None => break,
            }
        }
        assert_eq!(
            seen,
            vec!["dir0", "dir1", "dir2", "dir3", "file0.txt", "file1.txt", "file2.txt"]
        );
    }

    #[test]
    fn test_filter_and_path_lookup() {
        let (svc, ctx, disk) = setup(50);
        let docs = folder(&svc, &ctx, &disk, &disk.root_folder, "Docs");
        file(&svc, &ctx, &disk, &docs.id, "Report.pdf");
        file(&svc, &ctx, &disk, &docs.id, "notes.md");

        let request = ListDirectoryRequest {
            path: Some("DiskID_1::/Docs".into()),
            filters: Some("REPORT".into()),
            ..ListDirectoryRequest::default()
        };
        let listing = svc.list_directory(&ctx, &request).unwrap();
        assert_eq!(listing.total_files, 1);
        assert_eq!(listing.files[0].record.name, "Report.pdf");
        assert_eq!(listing.files[0].clipped_directory_path, "/Docs/Report.pdf");
    }

    #[test]
    fn test_breadcrumbs_start_at_disk() {
        let (svc, ctx, disk) = setup(50);
        let docs = folder(&svc, &ctx, &disk, &disk.root_folder, "Docs");
        let inner = folder(&svc, &ctx, &disk, &docs.id, "Inner");
        let listing = svc
            .list_directory(&ctx, &ListDirectoryRequest::folder(inner.id.clone()))
            .unwrap();
        let names: Vec<_> = listing
            .breadcrumbs
            .iter()
            .map(|c| c.resource_name.as_str())
            .collect();
        assert_eq!(names, vec!["Laptop", "Docs", "Inner"]);
        assert_eq!(listing.breadcrumbs[2].resource_id, inner.id);
    }

    #[test]
    fn test_request_without_target_is_rejected() {
        let (svc, ctx, _) = setup(50);
        let err = svc
            .list_directory(&ctx, &ListDirectoryRequest::default())
            .unwrap_err();
        assert_eq!(err.kind, officex_core::error::ErrorKind::Validation);
    }

    #[test]
    fn test_stranger_gets_no_previews() {
        let (svc, ctx, disk) = setup(50);
        file(&svc, &ctx, &disk, &disk.root_folder, "a.txt");
        let stranger = RequestContext::new(UserID::from_principal("aaaaa-aa"));
        let listing = svc
            .list_directory(&stranger, &ListDirectoryRequest::folder(disk.root_folder.clone()))
            .unwrap();
        assert!(listing.files[0].permission_previews.is_empty());
        assert!(!listing.breadcrumbs[0].visibility_preview);
    }

    #[test]
    fn test_trashed_items_listed_only_in_trash() {
        let (svc, ctx, disk) = setup(50);
        let docs = folder(&svc, &ctx, &disk, &disk.root_folder, "Docs");
        file(&svc, &ctx, &disk, &docs.id, "a.txt");
        folder(&svc, &ctx, &disk, &disk.root_folder, "Keep");
        svc.delete_folder(&ctx, &docs.id, &DeleteFolderPayload { id: None, permanent: false })
            .unwrap();

        let root = svc
            .list_directory(&ctx, &ListDirectoryRequest::folder(disk.root_folder.clone()))
            .unwrap();
        let names: Vec<_> = root.folders.iter().map(|f| f.record.name.as_str()).collect();
        assert_eq!(names, vec!["Keep"]);

        let trash = svc
            .list_directory(&ctx, &ListDirectoryRequest::folder(disk.trash_folder.clone()))
            .unwrap();
        assert_eq!(trash.folders.len(), 1);
        assert!(trash.folders[0].record.deleted);

        let inside = svc
            .list_directory(&ctx, &ListDirectoryRequest::folder(docs.id.clone()))
            .unwrap();
        assert_eq!(inside.files[0].record.name, "a.txt");
    }
}
