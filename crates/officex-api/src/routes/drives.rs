//! Drive routes, including the self-management routes of a drive.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use officex_core::types::{
    ApiResponse, DriveID, ExternalID, ExternalPayload, HostURL, ICPPrincipalString, PageRequest,
    PageResponse, SortDirection, UnixTimestampMs, UserID,
};
use officex_entity::{Drive, StateDiffRecord};

use super::DeletedResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDriveRequest {
    pub external_drive_id: DriveID,
}

pub type ListDrivesRequest = PageRequest;

/// Register a drive.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDriveRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DriveID>,
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[validate(length(min = 1))]
    pub icp_principal: ICPPrincipalString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub endpoint_url: Option<HostURL>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

impl CreateDriveRequest {
    /// The identifier the drive will have.
    pub fn drive_id(&self) -> DriveID {
        self.id
            .clone()
            .unwrap_or_else(|| DriveID::from_principal(&self.icp_principal))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateDriveRequest {
    pub id: DriveID,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub endpoint_url: Option<HostURL>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDriveRequest {
    pub id: DriveID,
}

/// Replay a sequence of state diffs onto a drive.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReplayDriveRequest {
    #[validate(length(min = 1, message = "At least one diff is required"))]
    pub diffs: Vec<StateDiffRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayDriveResult {
    /// Completion time in nanoseconds.
    pub timestamp_ns: u64,
    pub diffs_applied: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkpoint_diff_id: Option<String>,
    /// State checksum after the last diff.
    pub final_checksum: String,
}

/// Where a drive search looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SearchCategory {
    Files,
    Folders,
    Metadata,
}

/// Sort key of a drive search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchSortBy {
    #[default]
    CreatedAt,
    UpdatedAt,
}

/// Full-text search over the drive.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchDriveRequest {
    #[validate(length(min = 1, max = 1024))]
    pub query: String,
    /// Categories to search; all of them when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<SearchCategory>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub page_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_up: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_down: Option<String>,
    #[serde(default)]
    pub sort_by: SearchSortBy,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SearchDriveRequest {
    /// Whether `category` is part of the search.
    pub fn includes(&self, category: SearchCategory) -> bool {
        self.categories
            .as_ref()
            .is_none_or(|categories| categories.contains(&category))
    }

    /// The pagination part of the request.
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            filters: None,
            page_size: self.page_size,
            direction: self.direction,
            cursor: None,
            cursor_up: self.cursor_up.clone(),
            cursor_down: self.cursor_down.clone(),
        }
    }
}

/// One search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub preview: String,
    pub score: u32,
    pub resource_id: String,
    pub category: SearchCategory,
    pub created_at: UnixTimestampMs,
    pub updated_at: UnixTimestampMs,
    /// Extra data attached by the index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReindexDriveRequest {
    /// Reindex even when the rate limit would be exceeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReindexDriveResult {
    pub success: bool,
    pub timestamp_ms: UnixTimestampMs,
    pub indexed_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferDriveOwnershipRequest {
    pub next_owner_id: UserID,
}

/// Progress of an ownership transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransferOwnershipStatus {
    /// Recorded; completes once `ready_ms` has passed.
    Requested,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferDriveOwnershipResult {
    pub status: TransferOwnershipStatus,
    pub ready_ms: UnixTimestampMs,
}

pub type GetDriveResponse = ApiResponse<Drive>;
pub type ListDrivesResponse = ApiResponse<PageResponse<Drive>>;
pub type CreateDriveResponse = ApiResponse<Drive>;
pub type UpdateDriveResponse = ApiResponse<Drive>;
pub type DeleteDriveResponse = ApiResponse<DeletedResponse<DriveID>>;
pub type ReplayDriveResponse = ApiResponse<ReplayDriveResult>;
pub type SearchDriveResponse = ApiResponse<PageResponse<SearchResult>>;
pub type ReindexDriveResponse = ApiResponse<ReindexDriveResult>;
pub type TransferDriveOwnershipResponse = ApiResponse<TransferDriveOwnershipResult>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_drive_id_from_principal() {
        let request: CreateDriveRequest = serde_json::from_value(json!({
            "name": "Acme",
            "icp_principal": "aaaaa-aa",
            "endpoint_url": "https://drive.example.com"
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.drive_id().as_str(), "DriveID_aaaaa-aa");
    }

    #[test]
    fn test_search_categories() {
        let request: SearchDriveRequest = serde_json::from_value(json!({
            "query": "report",
            "categories": ["FILES"],
            "sort_by": "UPDATED_AT",
            "cursor_down": "10"
        }))
        .unwrap();
        assert!(request.includes(SearchCategory::Files));
        assert!(!request.includes(SearchCategory::Folders));
        assert_eq!(request.page_request().start_cursor(), Some("10"));
    }

    #[test]
    fn test_transfer_status_wire() {
        let result = TransferDriveOwnershipResult {
            status: TransferOwnershipStatus::Requested,
            ready_ms: 5,
        };
        assert_eq!(
            serde_json::to_value(result).unwrap(),
            json!({"status": "REQUESTED", "ready_ms": 5})
        );
    }

    #[test]
    fn test_replay_requires_diffs() {
        let request: ReplayDriveRequest = serde_json::from_value(json!({"diffs": []})).unwrap();
        assert!(request.validate().is_err());
    }
}
