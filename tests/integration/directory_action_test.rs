//! Integration tests for directory action batches.

mod helpers;

use serde_json::json;

use officex_api::directory::{DirectoryActionOutcome, DirectoryActionResult};
use officex_core::types::{DirectoryResourceID, FolderID};

use helpers::TestDrive;

#[test]
fn test_create_folder_docs_scenario() {
    let drive = TestDrive::new();
    let outcomes = drive.execute_json(json!({
        "actions": [{
            "action": "CREATE_FOLDER",
            "payload": {
                "name": "Docs",
                "labels": [],
                "disk_id": "DiskID_1",
                "disk_type": "LOCAL_SSD",
                "parent_folder_uuid": "FolderID_root"
            }
        }]
    }));

    assert_eq!(outcomes.len(), 1);
    let outcome = &outcomes[0];
    assert!(outcome.success);
    assert!(outcome.id.as_str().starts_with("DirectoryActionOutcomeID_"));

    let DirectoryActionResult::CreateFolder(folder) = outcome.result().unwrap() else {
        panic!("expected a folder record");
    };
    assert_eq!(folder.name, "Docs");
    let suffix = folder.id.as_str().strip_prefix("FolderID_").unwrap();
    assert!(uuid::Uuid::parse_str(suffix).is_ok());
    assert_eq!(
        folder.parent_folder_uuid.as_ref().map(FolderID::as_str),
        Some("FolderID_root")
    );
    assert_eq!(folder.full_directory_path, "DiskID_1::/Docs/");

    let wire = serde_json::to_value(outcome).unwrap();
    assert_eq!(wire["request"]["action"], json!("CREATE_FOLDER"));
    assert_eq!(wire["response"]["result"]["name"], json!("Docs"));
    assert!(wire["response"].get("error").is_none());
}

#[test]
fn test_targeted_actions_by_path_and_id() {
    let drive = TestDrive::new();
    let outcomes = drive.execute_json(json!({
        "actions": [
            {
                "action": "CREATE_FOLDER",
                "target": {"resource_id": "FolderID_root"},
                "payload": {"name": "Reports", "labels": [], "disk_id": "DiskID_1"}
            },
            {
                "action": "CREATE_FILE",
                "target": {"resource_path": "DiskID_1::/Reports/"},
                "payload": {
                    "name": "q1.csv",
                    "extension": "csv",
                    "labels": [],
                    "file_size": 42,
                    "raw_url": "https://cdn.example/q1.csv",
                    "disk_id": "DiskID_1"
                }
            }
        ]
    }));
    assert!(outcomes.iter().all(|o| o.success));
    let file = outcomes[1].result().and_then(|r| r.as_file()).unwrap().clone();
    assert_eq!(file.full_directory_path, "DiskID_1::/Reports/q1.csv");

    let deleted = drive.execute_one(json!({
        "action": "DELETE_FILE",
        "target": {"resource_path": "DiskID_1::/Reports/q1.csv"},
        "payload": {"permanent": false}
    }));
    assert!(deleted.success);
    assert!(drive.service.store().file(&file.id).unwrap().deleted);

    let fetched = drive.execute_one(json!({
        "action": "GET_FILE",
        "target": {"resource_id": file.id},
        "payload": {}
    }));
    assert_eq!(fetched.error().unwrap().code, 404);

    let restored = drive.execute_one(json!({
        "action": "RESTORE_TRASH",
        "target": {"resource_id": file.id},
        "payload": {}
    }));
    assert!(restored.success);
    let fetched = drive.execute_one(json!({
        "action": "GET_FILE",
        "target": {"resource_id": file.id},
        "payload": {}
    }));
    let DirectoryActionResult::GetFile(response) = fetched.result().unwrap() else {
        panic!("expected a get-file result");
    };
    assert!(!response.file.deleted);
    assert_eq!(response.file.full_directory_path, "DiskID_1::/Reports/q1.csv");

    let wire = serde_json::to_value(&fetched).unwrap();
    assert_eq!(wire["request"]["target"], json!({"resource_id": file.id}));
}

#[test]
fn test_outcomes_follow_request_order() {
    let drive = TestDrive::new();
    let root = drive.root();
    let actions: Vec<_> = ["a", "b", "c", "d", "e"]
        .iter()
        .map(|name| {
            json!({
                "action": "CREATE_FOLDER",
                "payload": {
                    "name": name,
                    "parent_folder_uuid": root,
                    "disk_id": "DiskID_1",
                    "disk_type": "LOCAL_SSD"
                }
            })
        })
        .collect();
    let outcomes = drive.execute_json(json!({ "actions": actions }));

    let names: Vec<_> = outcomes
        .iter()
        .map(|o| o.result().and_then(|r| r.as_folder()).unwrap().name.clone())
        .collect();
    assert_eq!(names, vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn test_failures_do_not_abort_the_batch() {
    let drive = TestDrive::new();
    let docs = drive.mkdir(&drive.root(), "Docs");
    let outcomes = drive.execute_json(json!({
        "actions": [
            {"action": "DELETE_FOLDER", "payload": {"id": "FolderID_missing"}},
            {"action": "GET_FOLDER", "payload": {"id": docs}},
            {"action": "MOVE_FOLDER", "payload": {"id": docs, "destination_folder_id": docs}},
            {"action": "UPDATE_FOLDER", "payload": {"id": docs, "name": "Papers"}}
        ]
    }));

    let codes: Vec<_> = outcomes
        .iter()
        .map(|o| o.error().map(|e| e.code))
        .collect();
    assert_eq!(codes, vec![Some(404), None, Some(409), None]);
    assert_eq!(
        outcomes[3].result().and_then(|r| r.as_folder()).unwrap().name,
        "Papers"
    );
}

#[test]
fn test_trash_lifecycle_of_a_folder() {
    let drive = TestDrive::new();
    let projects = drive.mkdir(&drive.root(), "Projects");
    let alpha = drive.mkdir(&projects, "Alpha");
    drive.touch(&alpha, "plan.md");

    let deleted = drive.execute_one(json!({"action": "DELETE_FOLDER", "payload": {"id": alpha}}));
    let DirectoryActionResult::DeleteFolder(response) = deleted.result().unwrap() else {
        panic!("expected a delete-folder result");
    };
    assert_eq!(response.path_to_trash, "DiskID_1::/.trash/Alpha/");
    assert!(
        drive
            .service
            .store()
            .resolve_path("DiskID_1::/.trash/Alpha/plan.md")
            .is_some()
    );

    let restored = drive.execute_one(json!({"action": "RESTORE_TRASH", "payload": {"id": alpha}}));
    let DirectoryActionResult::RestoreTrash(response) = restored.result().unwrap() else {
        panic!("expected a restore result");
    };
    assert_eq!(response.restored_folders, vec![alpha.clone()]);
    assert_eq!(response.restored_files.len(), 1);
    assert_eq!(
        drive.service.store().resolve_path("DiskID_1::/Projects/Alpha/"),
        Some(DirectoryResourceID::Folder(alpha))
    );
}

#[test]
fn test_copy_then_move_between_folders() {
    let drive = TestDrive::new();
    let inbox = drive.mkdir(&drive.root(), "Inbox");
    let archive = drive.mkdir(&drive.root(), "Archive");
    let created = drive.touch(&inbox, "scan.pdf");
    let file_id = created.result().and_then(|r| r.as_file()).unwrap().id.clone();

    let copy = drive.execute_one(json!({"action": "COPY_FILE", "payload": {
        "id": file_id,
        "destination_folder_path": "DiskID_1::/Archive/"
    }}));
    let copy = copy.result().and_then(|r| r.as_file()).unwrap().clone();
    assert_ne!(copy.id, file_id);
    assert_eq!(copy.parent_folder_uuid, archive);

    let moved = drive.execute_one(json!({"action": "MOVE_FILE", "payload": {
        "id": file_id,
        "destination_folder_id": archive
    }}));
    let moved = moved.result().and_then(|r| r.as_file()).unwrap();
    assert_eq!(moved.name, "scan (1).pdf");
    assert_eq!(moved.full_directory_path, "DiskID_1::/Archive/scan (1).pdf");
}

#[test]
fn test_outcomes_survive_the_wire() {
    let drive = TestDrive::new();
    let docs: FolderID = drive.mkdir(&drive.root(), "Docs");
    let outcomes = drive.execute_json(json!({
        "actions": [
            {"action": "GET_FOLDER", "payload": {"id": docs}},
            {"action": "GET_FILE", "payload": {"id": "FileID_nope"}}
        ]
    }));

    let wire = serde_json::to_string(&outcomes).unwrap();
    let decoded: Vec<DirectoryActionOutcome> = serde_json::from_str(&wire).unwrap();
    assert_eq!(decoded, outcomes);
    assert!(matches!(
        decoded[0].result(),
        Some(DirectoryActionResult::GetFolder(_))
    ));
}
