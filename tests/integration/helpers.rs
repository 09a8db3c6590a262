//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::Value;

use officex_api::directory::{DirectoryAction, DirectoryActionOutcome, DirectoryActionRequestBody};
use officex_api::routes::disks::CreateDiskRequest;
use officex_core::config::AppConfig;
use officex_core::types::{DiskTypeEnum, FolderID, IdGenerator, UserID};
use officex_entity::Disk;
use officex_service::{DirectoryService, DiskFolderIds, FixedClock, RequestContext};

/// Identifier of the mounted disk's root folder.
pub const ROOT_FOLDER: &str = "FolderID_root";

/// A drive with one mounted disk, `DiskID_1` on `LOCAL_SSD`, whose root
/// folder is `FolderID_root`.
pub struct TestDrive {
    /// The executor under test.
    pub service: DirectoryService,
    /// Context of the drive owner.
    pub owner: RequestContext,
    /// The mounted disk.
    pub disk: Disk,
    /// Clock driving every timestamp.
    pub clock: Arc<FixedClock>,
}

impl TestDrive {
    /// Create a drive from the given configuration document.
    pub fn from_toml(source: &str) -> Self {
        let config = AppConfig::from_toml(source).expect("Failed to parse test config");
        let clock = Arc::new(FixedClock::new(1_700_000_000_000));
        let service = DirectoryService::new(&config, IdGenerator::random(), clock.clone());
        let owner = RequestContext::new(UserID::from_principal(&config.drive.owner_principal));
        let disk = service
            .mount_disk_with(
                &owner,
                CreateDiskRequest {
                    id: Some("DiskID_1".parse().expect("valid disk id")),
                    name: "Main".into(),
                    disk_type: DiskTypeEnum::LocalSsd,
                    public_note: None,
                    private_note: None,
                    auth_json: None,
                    endpoint: None,
                    external_id: None,
                    external_payload: None,
                },
                DiskFolderIds {
                    root_folder: Some(ROOT_FOLDER.parse().expect("valid folder id")),
                    trash_folder: None,
                },
            )
            .expect("Failed to mount disk");
        Self {
            service,
            owner,
            disk,
            clock,
        }
    }

    /// Create a drive with default configuration.
    pub fn new() -> Self {
        Self::from_toml("")
    }

    /// Root folder of the mounted disk.
    pub fn root(&self) -> FolderID {
        self.disk.root_folder.clone()
    }

    /// Decode a request body from JSON and execute it as the owner.
    pub fn execute_json(&self, body: Value) -> Vec<DirectoryActionOutcome> {
        let body: DirectoryActionRequestBody =
            serde_json::from_value(body).expect("Failed to decode request body");
        self.service.execute(&self.owner, body)
    }

    /// Execute a single action given as JSON.
    pub fn execute_one(&self, action: Value) -> DirectoryActionOutcome {
        let action: DirectoryAction =
            serde_json::from_value(action).expect("Failed to decode action");
        self.service
            .execute(&self.owner, DirectoryActionRequestBody::new(vec![action]))
            .remove(0)
    }

    /// Create a folder under `parent` and return its id.
    pub fn mkdir(&self, parent: &FolderID, name: &str) -> FolderID {
        let outcome = self.execute_one(serde_json::json!({
            "action": "CREATE_FOLDER",
            "payload": {
                "name": name,
                "parent_folder_uuid": parent,
                "disk_id": self.disk.id,
                "disk_type": "LOCAL_SSD"
            }
        }));
        outcome
            .result()
            .and_then(|r| r.as_folder())
            .map(|f| f.id.clone())
            .expect("Folder creation failed")
    }

    /// Create a file under `parent` and return the outcome.
    pub fn touch(&self, parent: &FolderID, name: &str) -> DirectoryActionOutcome {
        self.execute_one(serde_json::json!({
            "action": "CREATE_FILE",
            "payload": {
                "name": name,
                "parent_folder_uuid": parent,
                "disk_id": self.disk.id,
                "disk_type": "LOCAL_SSD",
                "file_size": 128
            }
        }))
    }
}
