//! Scalar aliases shared by records and requests.

use serde::{Deserialize, Serialize};

/// Identifier of a resource in an external system.
pub type ExternalID = String;

/// Opaque JSON-encoded payload attached by an external system.
pub type ExternalPayload = String;

/// Human-readable path of a file or folder, `"<disk_id>::/a/b/"`.
pub type DriveFullFilePath = String;

/// Textual ICP principal.
pub type ICPPrincipalString = String;

/// `0x`-prefixed EVM address.
pub type EvmPublicAddress = String;

/// Secret value of an API key.
pub type ApiKeyValue = String;

/// Base URL of a drive.
pub type HostURL = String;

/// Text of a label.
pub type LabelValue = String;

/// Milliseconds since the Unix epoch.
pub type UnixTimestampMs = u64;

/// Separator between a disk identifier and the path within it.
pub const DISK_PATH_SEPARATOR: &str = "::";

/// Lifecycle of a file's bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UploadStatus {
    /// Upload has not started.
    #[default]
    Queued,
    /// Upload is in flight.
    Pending,
    /// Bytes are stored.
    Completed,
}

/// Storage backend of a disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiskTypeEnum {
    /// Browser-local cache.
    BrowserCache,
    /// Local SSD of the host.
    LocalSsd,
    /// Amazon S3 compatible bucket.
    AwsBucket,
    /// Storj decentralized storage.
    StorjWeb3,
    /// ICP canister storage.
    IcpCanister,
}

impl DiskTypeEnum {
    /// Whether the disk keeps bytes only on the client.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::BrowserCache | Self::LocalSsd)
    }
}

/// Build the root path of a disk.
pub fn disk_root_path(disk_id: &str) -> DriveFullFilePath {
    format!("{disk_id}{DISK_PATH_SEPARATOR}/")
}

/// Split a full path into its disk identifier and the path within the disk.
pub fn split_disk_path(path: &str) -> Option<(&str, &str)> {
    path.split_once(DISK_PATH_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_type_wire_names() {
        let json = serde_json::to_string(&DiskTypeEnum::LocalSsd).unwrap();
        assert_eq!(json, "\"LOCAL_SSD\"");
        let parsed: DiskTypeEnum = serde_json::from_str("\"STORJ_WEB3\"").unwrap();
        assert_eq!(parsed, DiskTypeEnum::StorjWeb3);
        assert!(serde_json::from_str::<DiskTypeEnum>("\"FLOPPY\"").is_err());
    }

    #[test]
    fn test_disk_paths() {
        let root = disk_root_path("DiskID_1");
        assert_eq!(root, "DiskID_1::/");
        assert_eq!(split_disk_path("DiskID_1::/docs/a.txt"), Some(("DiskID_1", "/docs/a.txt")));
        assert_eq!(split_disk_path("no-separator"), None);
    }
}
