//! Drive identity configuration.

use serde::{Deserialize, Serialize};

/// Identity of the drive served by the reference executor.
///
/// `DriveID` and the owner's `UserID` are derived from the principals
/// below, so the same configuration always yields the same identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveConfig {
    /// Display name of the drive.
    #[serde(default = "default_name")]
    pub name: String,
    /// Principal of the drive canister.
    #[serde(default = "default_drive_principal")]
    pub drive_principal: String,
    /// Principal of the drive owner.
    #[serde(default = "default_owner_principal")]
    pub owner_principal: String,
    /// Public URL of the drive endpoint.
    #[serde(default = "default_host_url")]
    pub host_url: String,
    /// Name of the per-disk trash folder.
    #[serde(default = "default_trash_folder_name")]
    pub trash_folder_name: String,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            drive_principal: default_drive_principal(),
            owner_principal: default_owner_principal(),
            host_url: default_host_url(),
            trash_folder_name: default_trash_folder_name(),
        }
    }
}

fn default_name() -> String {
    "Anonymous Org".to_string()
}

fn default_drive_principal() -> String {
    "rrkah-fqaaa-aaaaa-aaaaq-cai".to_string()
}

fn default_owner_principal() -> String {
    "2vxsx-fae".to_string()
}

fn default_host_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_trash_folder_name() -> String {
    ".trash".to_string()
}
