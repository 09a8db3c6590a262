//! # officex-entity
//!
//! Domain records for OfficeX drives. Every struct in this crate is a
//! storage shape (what a drive persists) or an FE composition that embeds
//! a storage shape and adds denormalized display fields. All records
//! derive `Debug`, `Clone`, `Serialize`, and `Deserialize`; relationships
//! are carried as prefixed identifiers only.

pub mod api_key;
pub mod contact;
pub mod disk;
pub mod drive;
pub mod file;
pub mod folder;
pub mod group;
pub mod label;
pub mod permission;
pub mod purchase;
pub mod webhook;

pub use api_key::{ApiKey, ApiKeyFE};
pub use contact::{Contact, ContactFE, ContactGroupInvitePreview};
pub use disk::{Disk, DiskFE};
pub use drive::{Drive, DriveFE, StateDiffImplementation, StateDiffRecord};
pub use file::{FileRecord, FileRecordFE};
pub use folder::{FolderRecord, FolderRecordFE};
pub use group::{Group, GroupFE, GroupInvite, GroupInviteFE, GroupMemberPreview, GroupRole};
pub use label::{Label, LabelFE};
pub use permission::{
    DirectoryPermission, DirectoryPermissionFE, DirectoryPermissionType,
    DirectoryResourcePermissionFE, PermissionMetadata, PermissionMetadataContent,
    PermissionMetadataTypeEnum, SystemPermission, SystemPermissionFE, SystemPermissionType,
};
pub use purchase::{JobRun, JobRunStatus, Purchase, PurchaseFE, PurchaseStatus};
pub use webhook::{Webhook, WebhookEventLabel, WebhookFE};

/// Timestamp value meaning "never expires".
pub const NEVER_EXPIRES: i64 = -1;

/// Whether an `expires_at` style timestamp has passed at `now_ms`.
///
/// Negative values never expire.
pub fn is_expired(expires_at: i64, now_ms: u64) -> bool {
    expires_at >= 0 && (expires_at as u64) <= now_ms
}
