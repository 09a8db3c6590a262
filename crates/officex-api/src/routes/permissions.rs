//! Directory and system permission routes.

use serde::{Deserialize, Serialize};
use validator::Validate;

use officex_core::types::{
    ApiResponse, DirectoryPermissionID, DirectoryResourceID, ExternalID, ExternalPayload,
    GranteeID, PageResponse, SortDirection, SystemPermissionID, SystemResourceID, UserID,
};
use officex_entity::{
    DirectoryPermissionFE, DirectoryPermissionType, PermissionMetadata, SystemPermissionFE,
    SystemPermissionType,
};

use super::DeletePermissionResponse;

// Directory permissions

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDirectoryPermissionRequest {
    pub directory_permission_id: DirectoryPermissionID,
}

/// Grant permissions on a file or folder.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDirectoryPermissionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DirectoryPermissionID>,
    pub resource_id: DirectoryResourceID,
    /// Grantee; a fresh placeholder when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granted_to: Option<GranteeID>,
    #[validate(length(min = 1, message = "At least one permission type is required"))]
    pub permission_types: Vec<DirectoryPermissionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_date_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date_ms: Option<i64>,
    /// Whether the grant applies to descendants.
    pub inheritable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PermissionMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateDirectoryPermissionRequest {
    pub id: DirectoryPermissionID,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<DirectoryResourceID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granted_to: Option<GranteeID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub permission_types: Option<Vec<DirectoryPermissionType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_date_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inheritable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PermissionMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDirectoryPermissionRequest {
    pub permission_id: DirectoryPermissionID,
}

/// Which permissions a grantee holds on a resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckDirectoryPermissionsRequest {
    pub resource_id: DirectoryResourceID,
    pub grantee_id: GranteeID,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckDirectoryPermissionsResult {
    pub resource_id: DirectoryResourceID,
    pub grantee_id: GranteeID,
    pub permissions: Vec<DirectoryPermissionType>,
}

/// Bind a placeholder grant to a real user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedeemDirectoryPermissionRequest {
    pub permission_id: DirectoryPermissionID,
    pub user_id: UserID,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedeemDirectoryPermissionResult {
    pub permission: DirectoryPermissionFE,
}

pub type GetDirectoryPermissionResponse = ApiResponse<DirectoryPermissionFE>;
pub type CreateDirectoryPermissionResponse = ApiResponse<DirectoryPermissionFE>;
pub type UpdateDirectoryPermissionResponse = ApiResponse<DirectoryPermissionFE>;
pub type DeleteDirectoryPermissionResponse =
    ApiResponse<DeletePermissionResponse<DirectoryPermissionID>>;
pub type CheckDirectoryPermissionsResponse = ApiResponse<CheckDirectoryPermissionsResult>;
pub type RedeemDirectoryPermissionResponse = ApiResponse<RedeemDirectoryPermissionResult>;

// System permissions

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSystemPermissionRequest {
    pub system_permission_id: SystemPermissionID,
}

/// Structured filters of a system permission listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SystemPermissionFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_ids: Option<Vec<SystemResourceID>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grantee_ids: Option<Vec<GranteeID>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

impl SystemPermissionFilters {
    /// Whether a grant passes every filter that is set.
    pub fn matches(&self, permission: &SystemPermissionFE) -> bool {
        let grant = &permission.permission;
        self.resource_ids
            .as_ref()
            .is_none_or(|ids| ids.contains(&grant.resource_id))
            && self
                .grantee_ids
                .as_ref()
                .is_none_or(|ids| ids.contains(&grant.granted_to))
            && self
                .labels
                .as_ref()
                .is_none_or(|labels| labels.iter().any(|l| grant.labels.contains(l)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct ListSystemPermissionsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<SystemPermissionFilters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub page_size: Option<usize>,
    #[serde(default)]
    pub direction: SortDirection,
    #[serde(default)]
    pub cursor: Option<String>,
}

/// Grant permissions on a system table or record.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSystemPermissionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SystemPermissionID>,
    pub resource_id: SystemResourceID,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granted_to: Option<GranteeID>,
    #[validate(length(min = 1, message = "At least one permission type is required"))]
    pub permission_types: Vec<SystemPermissionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_date_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PermissionMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSystemPermissionRequest {
    pub id: SystemPermissionID,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<SystemResourceID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granted_to: Option<GranteeID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub permission_types: Option<Vec<SystemPermissionType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_date_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PermissionMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteSystemPermissionRequest {
    pub permission_id: SystemPermissionID,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckSystemPermissionsRequest {
    pub resource_id: SystemResourceID,
    pub grantee_id: GranteeID,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckSystemPermissionsResult {
    pub resource_id: SystemResourceID,
    pub grantee_id: GranteeID,
    pub permissions: Vec<SystemPermissionType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedeemSystemPermissionRequest {
    pub permission_id: SystemPermissionID,
    pub user_id: UserID,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedeemSystemPermissionResult {
    pub permission: SystemPermissionFE,
}

pub type GetSystemPermissionResponse = ApiResponse<SystemPermissionFE>;
pub type ListSystemPermissionsResponse = ApiResponse<PageResponse<SystemPermissionFE>>;
pub type CreateSystemPermissionResponse = ApiResponse<SystemPermissionFE>;
pub type UpdateSystemPermissionResponse = ApiResponse<SystemPermissionFE>;
pub type DeleteSystemPermissionResponse =
    ApiResponse<DeletePermissionResponse<SystemPermissionID>>;
pub type CheckSystemPermissionsResponse = ApiResponse<CheckSystemPermissionsResult>;
pub type RedeemSystemPermissionResponse = ApiResponse<RedeemSystemPermissionResult>;
