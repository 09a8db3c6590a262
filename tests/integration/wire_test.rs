//! Integration tests for the JSON wire shapes shared with clients.

mod helpers;

use serde_json::json;

use officex_api::iframe::{
    IFrameActionTarget, IFrameCommand, IFrameCommandData, IFrameCommandResult,
};
use officex_api::routes::disks::CreateDiskResponse;
use officex_api::webhook::{FolderWebhookData, WebhookEventData, WebhookResourceData};
use officex_api::{DirectoryAction, DirectoryActionOutcome, DirectoryActionRequestBody};
use officex_core::AppError;
use officex_core::error::ErrorKind;
use officex_core::types::ApiResponse;

use helpers::TestDrive;

#[test]
fn test_disk_envelope_roundtrip() {
    let drive = TestDrive::new();
    let response: CreateDiskResponse = ApiResponse::ok(drive.disk.clone());

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["ok"]["data"]["id"], json!("DiskID_1"));
    assert_eq!(value["ok"]["data"]["disk_type"], json!("LOCAL_SSD"));

    let decoded: CreateDiskResponse = serde_json::from_value(value).unwrap();
    assert_eq!(decoded.into_result().unwrap(), drive.disk);
}

#[test]
fn test_error_envelope_from_failed_lookup() {
    let drive = TestDrive::new();
    let result = drive.service.store().disk(&"DiskID_404".parse().unwrap());
    let response: ApiResponse<officex_entity::Disk> = result.into();

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["err"]["code"], json!(404));
}

#[test]
fn test_outcome_decodes_by_request_action() {
    let drive = TestDrive::new();
    let docs = drive.mkdir(&drive.root(), "Docs");
    let outcome = drive.execute_one(json!({"action": "UPDATE_FOLDER", "payload": {
        "id": docs, "name": "Papers"
    }}));

    let wire = serde_json::to_value(&outcome).unwrap();
    let decoded: DirectoryActionOutcome = serde_json::from_value(wire.clone()).unwrap();
    assert_eq!(decoded, outcome);

    let mut forged = wire;
    forged["success"] = json!(false);
    assert!(serde_json::from_value::<DirectoryActionOutcome>(forged).is_err());
}

#[test]
fn test_unknown_action_is_rejected() {
    let parsed = serde_json::from_value::<DirectoryActionRequestBody>(json!({
        "actions": [{"action": "RENAME_FILE", "payload": {"id": "FileID_a"}}]
    }));
    assert!(parsed.is_err());
}

#[test]
fn test_targeted_request_body_roundtrip() {
    let wire = json!({"actions": [
        {"action": "GET_FILE", "target": {"resource_id": "FileID_abc"}, "payload": {}},
        {"action": "DELETE_FOLDER", "target": {"resource_path": "DiskID_1::/Docs/"},
            "payload": {"permanent": true}}
    ]});
    let body: DirectoryActionRequestBody = serde_json::from_value(wire.clone()).unwrap();
    assert_eq!(body.actions[0].resource_id().unwrap().to_string(), "FileID_abc");
    assert!(body.actions[1].target.resource_path.is_some());
    assert_eq!(serde_json::to_value(&body).unwrap(), wire);
}

#[test]
fn test_unknown_prefix_surfaces_as_unknown_variant() {
    let raw = r#"{"actions": [
        {"action": "GET_FILE", "target": {"resource_id": "NopeID_x"}, "payload": {}}
    ]}"#;
    let err: AppError = serde_json::from_str::<DirectoryActionRequestBody>(raw)
        .unwrap_err()
        .into();
    assert_eq!(err.kind, ErrorKind::UnknownVariant);
}

#[test]
fn test_iframe_create_folder_runs_on_the_drive() {
    let drive = TestDrive::new();
    let command: IFrameCommand = serde_json::from_value(json!({
        "type": "OFFICEX_DIRECTORY_ACTION",
        "data": {"action": "CREATE_FOLDER", "payload": {"name": "From frame"}},
        "tracer": "frame-1"
    }))
    .unwrap();
    let IFrameCommandData::DirectoryAction(action) = command.data.clone() else {
        panic!("expected a directory action command");
    };

    let target = IFrameActionTarget {
        parent_folder_uuid: drive.root(),
        disk_id: drive.disk.id.clone(),
        disk_type: drive.disk.disk_type,
    };
    let action: DirectoryAction = action.into_directory_action(&target).unwrap();
    let outcome = drive
        .service
        .execute(&drive.owner, DirectoryActionRequestBody::new(vec![action]))
        .remove(0);
    assert!(outcome.success);

    let reply = IFrameCommandResult::ok(&command, &outcome).unwrap();
    let value = serde_json::to_value(&reply).unwrap();
    assert_eq!(value["type"], json!("OFFICEX_DIRECTORY_ACTION"));
    assert_eq!(value["tracer"], json!("frame-1"));
    assert_eq!(value["data"]["response"]["result"]["name"], json!("From frame"));

    let failed = IFrameCommandResult::err(&command, &AppError::not_found("gone"));
    assert!(!failed.success);
}

#[test]
fn test_webhook_folder_snapshot_shape() {
    let drive = TestDrive::new();
    let docs = drive.mkdir(&drive.root(), "Docs");
    let folder = drive.service.store().folder(&docs).unwrap();

    let data = WebhookEventData {
        before: None,
        after: Some(WebhookResourceData::Folder(FolderWebhookData {
            folder: Some(folder),
        })),
    };
    let value = serde_json::to_value(&data).unwrap();
    assert_eq!(value["after"]["type"], json!("folder"));
    assert_eq!(value["after"]["folder"]["name"], json!("Docs"));
    assert!(value.get("before").is_none());

    let decoded: WebhookEventData = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, data);
}
