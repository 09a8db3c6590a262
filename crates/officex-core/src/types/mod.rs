//! Core type definitions used across the OfficeX workspace.

pub mod id;
pub mod pagination;
pub mod primitives;
pub mod resource;
pub mod response;
pub mod sorting;

pub use id::*;
pub use pagination::{PageRequest, PageResponse, Paginator};
pub use primitives::*;
pub use resource::{
    DirectoryResourceID, GranteeID, GroupInviteeID, PUBLIC_LITERAL, SystemResourceID,
    SystemTableValueEnum,
};
pub use response::{ApiResponse, ErrorBody, OkBody};
pub use sorting::SortDirection;
