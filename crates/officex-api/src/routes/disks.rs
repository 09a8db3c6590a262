//! Disk routes.

use serde::{Deserialize, Serialize};
use validator::Validate;

use officex_core::types::{
    ApiResponse, DiskID, DiskTypeEnum, ExternalID, ExternalPayload, PageRequest, PageResponse,
};
use officex_entity::Disk;

use super::DeletedResponse;
use crate::validation::validate_json;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDiskRequest {
    pub disk_id: DiskID,
}

pub type ListDisksRequest = PageRequest;

/// Create a disk.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDiskRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DiskID>,
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    pub disk_type: DiskTypeEnum,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_note: Option<String>,
    /// Backend credentials as a JSON document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_json"))]
    pub auth_json: Option<String>,
    /// Endpoint of a remote backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

/// Update a disk. The backend type cannot change.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateDiskRequest {
    pub id: DiskID,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_json"))]
    pub auth_json: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDiskRequest {
    pub id: DiskID,
}

pub type GetDiskResponse = ApiResponse<Disk>;
pub type ListDisksResponse = ApiResponse<PageResponse<Disk>>;
pub type CreateDiskResponse = ApiResponse<Disk>;
pub type UpdateDiskResponse = ApiResponse<Disk>;
pub type DeleteDiskResponse = ApiResponse<DeletedResponse<DiskID>>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_auth_json_must_parse() {
        let request: CreateDiskRequest = serde_json::from_value(json!({
            "name": "bucket",
            "disk_type": "AWS_BUCKET",
            "auth_json": "{not json"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_unknown_disk_type_is_rejected() {
        let parsed = serde_json::from_value::<CreateDiskRequest>(json!({
            "name": "x",
            "disk_type": "FLOPPY"
        }));
        assert!(parsed.is_err());
    }
}
