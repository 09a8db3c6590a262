//! Directory listing.

use serde::{Deserialize, Serialize};
use validator::Validate;

use officex_core::types::{DriveFullFilePath, FolderID, PageRequest, SortDirection};
use officex_entity::{FileRecordFE, FolderRecordFE};

/// List the contents of a folder, addressed by id or by path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, Default)]
pub struct ListDirectoryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<FolderID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<DriveFullFilePath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub page_size: Option<usize>,
    #[serde(default)]
    pub direction: SortDirection,
    #[serde(default)]
    pub cursor: Option<String>,
}

impl ListDirectoryRequest {
    /// List a folder by id.
    pub fn folder(folder_id: FolderID) -> Self {
        Self {
            folder_id: Some(folder_id),
            ..Self::default()
        }
    }

    /// The pagination part of the request.
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            filters: self.filters.clone(),
            page_size: self.page_size,
            direction: self.direction,
            cursor: self.cursor.clone(),
            cursor_up: None,
            cursor_down: None,
        }
    }
}

/// One ancestor of the listed folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderBreadcrumb {
    pub resource_id: FolderID,
    pub resource_name: String,
    /// Whether the requester may see this ancestor.
    pub visibility_preview: bool,
}

/// A page of folder contents. Folders come before files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListDirectoryResponse {
    pub folders: Vec<FolderRecordFE>,
    pub files: Vec<FileRecordFE>,
    pub total_folders: usize,
    pub total_files: usize,
    #[serde(default)]
    pub cursor: Option<String>,
    /// Ancestors from the disk root down to the listed folder.
    #[serde(default)]
    pub breadcrumbs: Vec<FolderBreadcrumb>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_carries_cursor() {
        let request: ListDirectoryRequest = serde_json::from_str(
            r#"{"folder_id": "FolderID_root", "page_size": 10,
                "direction": "DESC", "cursor": "20"}"#,
        )
        .unwrap();
        let page = request.page_request();
        assert_eq!(page.start_cursor(), Some("20"));
        assert_eq!(page.direction, SortDirection::Desc);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_zero_page_size_fails_validation() {
        let request = ListDirectoryRequest {
            page_size: Some(0),
            ..ListDirectoryRequest::default()
        };
        assert!(request.validate().is_err());
    }
}
