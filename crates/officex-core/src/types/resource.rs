//! Identifier unions resolved by prefix.
//!
//! Several wire fields accept more than one kind of identifier. Each union
//! here dispatches on the prefix of the incoming string and rejects any
//! prefix outside its variant set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;
use crate::types::id::{
    FileID, FolderID, GroupID, IdPrefix, PlaceholderGroupInviteeID,
    PlaceholderPermissionGranteeID, UserID, deserialize_prefixed, parse_id,
};

/// Literal used for grants and invites open to everyone.
pub const PUBLIC_LITERAL: &str = "PUBLIC";

/// A file or a folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum DirectoryResourceID {
    /// A file.
    File(FileID),
    /// A folder.
    Folder(FolderID),
}

impl DirectoryResourceID {
    /// Return the identifier string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::File(id) => id.as_str(),
            Self::Folder(id) => id.as_str(),
        }
    }

    /// Whether this resource is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

impl FromStr for DirectoryResourceID {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_id(s)?.0 {
            IdPrefix::File => Ok(Self::File(s.parse()?)),
            IdPrefix::Folder => Ok(Self::Folder(s.parse()?)),
            other => Err(AppError::unknown_variant(format!(
                "'{s}' is a {other}, not a directory resource"
            ))),
        }
    }
}

impl From<FileID> for DirectoryResourceID {
    fn from(id: FileID) -> Self {
        Self::File(id)
    }
}

impl From<FolderID> for DirectoryResourceID {
    fn from(id: FolderID) -> Self {
        Self::Folder(id)
    }
}

/// Anyone who can receive a permission grant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum GranteeID {
    /// Everyone, including anonymous callers.
    Public,
    /// A specific user.
    User(UserID),
    /// Every member of a group.
    Group(GroupID),
    /// A not-yet-redeemed grantee slot.
    Placeholder(PlaceholderPermissionGranteeID),
}

impl FromStr for GranteeID {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == PUBLIC_LITERAL {
            return Ok(Self::Public);
        }
        match parse_id(s)?.0 {
            IdPrefix::User => Ok(Self::User(s.parse()?)),
            IdPrefix::Group => Ok(Self::Group(s.parse()?)),
            IdPrefix::PlaceholderPermissionGrantee => Ok(Self::Placeholder(s.parse()?)),
            other => Err(AppError::unknown_variant(format!(
                "'{s}' is a {other}, not a grantee"
            ))),
        }
    }
}

/// Anyone who can be invited into a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum GroupInviteeID {
    /// Anyone holding the invite link.
    Public,
    /// A specific user.
    User(UserID),
    /// A not-yet-redeemed invitee slot.
    Placeholder(PlaceholderGroupInviteeID),
}

impl FromStr for GroupInviteeID {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == PUBLIC_LITERAL {
            return Ok(Self::Public);
        }
        match parse_id(s)?.0 {
            IdPrefix::User => Ok(Self::User(s.parse()?)),
            IdPrefix::PlaceholderGroupInvitee => Ok(Self::Placeholder(s.parse()?)),
            other => Err(AppError::unknown_variant(format!(
                "'{s}' is a {other}, not a group invitee"
            ))),
        }
    }
}

/// System tables that can be the target of a system permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemTableValueEnum {
    /// Drives table.
    Drives,
    /// Disks table.
    Disks,
    /// Contacts table.
    Contacts,
    /// Groups table.
    Groups,
    /// API keys table.
    ApiKeys,
    /// Permissions table.
    Permissions,
    /// Webhooks table.
    Webhooks,
    /// Labels table.
    Labels,
    /// Inbox table.
    Inbox,
    /// Purchases table.
    Purchases,
}

impl SystemTableValueEnum {
    /// Every table, in declaration order.
    pub const ALL: [SystemTableValueEnum; 10] = [
        Self::Drives,
        Self::Disks,
        Self::Contacts,
        Self::Groups,
        Self::ApiKeys,
        Self::Permissions,
        Self::Webhooks,
        Self::Labels,
        Self::Inbox,
        Self::Purchases,
    ];

    /// Return the table name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drives => "DRIVES",
            Self::Disks => "DISKS",
            Self::Contacts => "CONTACTS",
            Self::Groups => "GROUPS",
            Self::ApiKeys => "API_KEYS",
            Self::Permissions => "PERMISSIONS",
            Self::Webhooks => "WEBHOOKS",
            Self::Labels => "LABELS",
            Self::Inbox => "INBOX",
            Self::Purchases => "PURCHASES",
        }
    }
}

impl fmt::Display for SystemTableValueEnum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SystemTableValueEnum {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|table| table.as_str() == s)
            .ok_or_else(|| AppError::unknown_variant(format!("Unknown system table: '{s}'")))
    }
}

/// Target of a system permission: a whole table or a single record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum SystemResourceID {
    /// `TABLE_<name>`
    Table(SystemTableValueEnum),
    /// Any prefixed record identifier.
    Record {
        /// Kind recovered from the prefix.
        prefix: IdPrefix,
        /// The full identifier.
        id: String,
    },
}

impl SystemResourceID {
    const TABLE_PREFIX: &'static str = "TABLE_";

    /// Build a table resource.
    pub fn table(table: SystemTableValueEnum) -> Self {
        Self::Table(table)
    }
}

impl FromStr for SystemResourceID {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(table) = s.strip_prefix(Self::TABLE_PREFIX) {
            return Ok(Self::Table(table.parse()?));
        }
        let (prefix, _) = parse_id(s)?;
        Ok(Self::Record {
            prefix,
            id: s.to_string(),
        })
    }
}

impl fmt::Display for SystemResourceID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table(table) => write!(f, "{}{table}", Self::TABLE_PREFIX),
            Self::Record { id, .. } => f.write_str(id),
        }
    }
}

impl fmt::Display for DirectoryResourceID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for GranteeID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => f.write_str(PUBLIC_LITERAL),
            Self::User(id) => f.write_str(id.as_str()),
            Self::Group(id) => f.write_str(id.as_str()),
            Self::Placeholder(id) => f.write_str(id.as_str()),
        }
    }
}

impl fmt::Display for GroupInviteeID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => f.write_str(PUBLIC_LITERAL),
            Self::User(id) => f.write_str(id.as_str()),
            Self::Placeholder(id) => f.write_str(id.as_str()),
        }
    }
}

macro_rules! string_conversions {
    ($($name:ident => $expected:expr),* $(,)?) => {
        $(
            impl TryFrom<String> for $name {
                type Error = AppError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    value.parse()
                }
            }

            impl From<$name> for String {
                fn from(value: $name) -> String {
                    value.to_string()
                }
            }

            impl<'de> Deserialize<'de> for $name {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    deserialize_prefixed(deserializer, $expected)
                }
            }
        )*
    };
}

string_conversions!(
    DirectoryResourceID => &["FileID", "FolderID"],
    GranteeID => &["PUBLIC", "UserID", "GroupID", "PlaceholderPermissionGranteeID"],
    GroupInviteeID => &["PUBLIC", "UserID", "PlaceholderGroupInviteeID"],
    SystemResourceID => IdPrefix::NAMES,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_directory_resource_dispatch() {
        let file: DirectoryResourceID = "FileID_a".parse().unwrap();
        assert!(file.is_file());
        let folder: DirectoryResourceID = "FolderID_b".parse().unwrap();
        assert_eq!(folder, DirectoryResourceID::Folder("FolderID_b".parse().unwrap()));
        let err = "DiskID_c".parse::<DirectoryResourceID>().unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownVariant);
    }

    #[test]
    fn test_grantee_public_and_placeholder() {
        assert_eq!("PUBLIC".parse::<GranteeID>().unwrap(), GranteeID::Public);
        let placeholder: GranteeID = "PlaceholderPermissionGranteeID_x".parse().unwrap();
        assert!(matches!(placeholder, GranteeID::Placeholder(_)));
        assert!("FileID_x".parse::<GranteeID>().is_err());
        let json = serde_json::to_string(&GranteeID::Public).unwrap();
        assert_eq!(json, "\"PUBLIC\"");
    }

    #[test]
    fn test_group_invitee_rejects_group() {
        assert!("GroupID_x".parse::<GroupInviteeID>().is_err());
        assert!(matches!(
            "UserID_abc".parse::<GroupInviteeID>().unwrap(),
            GroupInviteeID::User(_)
        ));
    }

    #[test]
    fn test_system_resource_table_and_record() {
        let table: SystemResourceID = "TABLE_API_KEYS".parse().unwrap();
        assert_eq!(table, SystemResourceID::Table(SystemTableValueEnum::ApiKeys));
        assert_eq!(table.to_string(), "TABLE_API_KEYS");

        let record: SystemResourceID = "DiskID_123".parse().unwrap();
        assert!(matches!(
            record,
            SystemResourceID::Record {
                prefix: IdPrefix::Disk,
                ..
            }
        ));
        assert_eq!(record.to_string(), "DiskID_123");

        assert!("TABLE_SPREADSHEETS".parse::<SystemResourceID>().is_err());
    }

    #[test]
    fn test_foreign_prefix_decodes_as_unknown_variant() {
        let err = serde_json::from_str::<DirectoryResourceID>("\"DiskID_c\"").unwrap_err();
        assert_eq!(AppError::from(err).kind, ErrorKind::UnknownVariant);
        let err = serde_json::from_str::<GranteeID>("\"NopeID_x\"").unwrap_err();
        assert_eq!(AppError::from(err).kind, ErrorKind::UnknownVariant);
        let err = serde_json::from_str::<DirectoryResourceID>("\"FileID\"").unwrap_err();
        assert_eq!(AppError::from(err).kind, ErrorKind::Serialization);
    }

    #[test]
    fn test_serde_roundtrip_keeps_variant() {
        let value: SystemResourceID = serde_json::from_str("\"TABLE_LABELS\"").unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), "\"TABLE_LABELS\"");
    }
}
