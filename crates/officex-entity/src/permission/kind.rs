//! Permission type enumerations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use officex_core::AppError;

/// What a directory grant allows on a file or folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DirectoryPermissionType {
    /// Read the resource.
    View,
    /// Add files and folders inside.
    Upload,
    /// Rename, move, and change metadata.
    Edit,
    /// Move to trash or delete permanently.
    Delete,
    /// Grant permissions to others.
    Invite,
    /// Everything above.
    Manage,
}

impl DirectoryPermissionType {
    /// Every directory permission type.
    pub const ALL: [DirectoryPermissionType; 6] = [
        Self::View,
        Self::Upload,
        Self::Edit,
        Self::Delete,
        Self::Invite,
        Self::Manage,
    ];

    /// Return the type as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "VIEW",
            Self::Upload => "UPLOAD",
            Self::Edit => "EDIT",
            Self::Delete => "DELETE",
            Self::Invite => "INVITE",
            Self::Manage => "MANAGE",
        }
    }

    /// Check if holding `self` satisfies a requirement for `required`.
    pub fn satisfies(&self, required: DirectoryPermissionType) -> bool {
        *self == required || *self == Self::Manage
    }
}

impl fmt::Display for DirectoryPermissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DirectoryPermissionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                AppError::unknown_variant(format!("Invalid directory permission type: '{s}'"))
            })
    }
}

/// What a system grant allows on a table or record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SystemPermissionType {
    /// Create records.
    Create,
    /// Modify records. Older clients send `UPDATE`.
    #[serde(alias = "UPDATE")]
    Edit,
    /// Delete records.
    Delete,
    /// Read records.
    View,
    /// Grant permissions to others.
    Invite,
}

impl SystemPermissionType {
    /// Every system permission type.
    pub const ALL: [SystemPermissionType; 5] = [
        Self::Create,
        Self::Edit,
        Self::Delete,
        Self::View,
        Self::Invite,
    ];

    /// Return the type as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Edit => "EDIT",
            Self::Delete => "DELETE",
            Self::View => "VIEW",
            Self::Invite => "INVITE",
        }
    }
}

impl fmt::Display for SystemPermissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SystemPermissionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UPDATE" => Ok(Self::Edit),
            _ => Self::ALL
                .iter()
                .copied()
                .find(|kind| kind.as_str() == s)
                .ok_or_else(|| {
                    AppError::unknown_variant(format!("Invalid system permission type: '{s}'"))
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manage_satisfies_everything() {
        for kind in DirectoryPermissionType::ALL {
            assert!(DirectoryPermissionType::Manage.satisfies(kind));
        }
        assert!(!DirectoryPermissionType::View.satisfies(DirectoryPermissionType::Edit));
    }

    #[test]
    fn test_system_update_alias() {
        let kind: SystemPermissionType = serde_json::from_str("\"UPDATE\"").unwrap();
        assert_eq!(kind, SystemPermissionType::Edit);
        assert_eq!("UPDATE".parse::<SystemPermissionType>().unwrap(), kind);
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"EDIT\"");
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(serde_json::from_str::<DirectoryPermissionType>("\"OWN\"").is_err());
        assert!("OWN".parse::<DirectoryPermissionType>().is_err());
    }
}
