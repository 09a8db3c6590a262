//! Directory and system permission grants.

pub mod directory;
pub mod kind;
pub mod metadata;
pub mod system;

pub use directory::{DirectoryPermission, DirectoryPermissionFE, DirectoryResourcePermissionFE};
pub use kind::{DirectoryPermissionType, SystemPermissionType};
pub use metadata::{PermissionMetadata, PermissionMetadataContent, PermissionMetadataTypeEnum};
pub use system::{SystemPermission, SystemPermissionFE};

/// Whether a grant window covers `now_ms`.
///
/// A non-positive begin means "immediately"; a negative expiry means
/// "never".
pub(crate) fn window_covers(begin_date_ms: i64, expiry_date_ms: i64, now_ms: u64) -> bool {
    let now = i64::try_from(now_ms).unwrap_or(i64::MAX);
    begin_date_ms <= now && (expiry_date_ms < 0 || expiry_date_ms > now)
}
