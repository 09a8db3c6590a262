//! Prefixed identifiers for every domain entity.
//!
//! Every identifier on the wire is a string of the form
//! `"<Prefix>_<suffix>"`. The prefix names the entity kind, so parsing it
//! recovers the kind without a side lookup. For most kinds the suffix is a
//! v4 UUID drawn from an [`IdGenerator`]; `DriveID` and `UserID` are instead
//! derived from an ICP principal so the same principal always yields the
//! same identifier.
//!
//! Using distinct newtypes prevents accidentally passing a `FolderID` where
//! a `FileID` is expected, and deserialization rejects strings carrying
//! another kind's prefix.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, ErrorKind};

/// Separator between the prefix and the suffix of an identifier.
pub const ID_SEPARATOR: char = '_';

/// The closed set of identifier prefixes, one per entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IdPrefix {
    /// `FileID_`
    #[serde(rename = "FileID")]
    File,
    /// `FolderID_`
    #[serde(rename = "FolderID")]
    Folder,
    /// `ApiKeyID_`
    #[serde(rename = "ApiKeyID")]
    ApiKey,
    /// `UserID_` (principal-derived)
    #[serde(rename = "UserID")]
    User,
    /// `GroupID_`
    #[serde(rename = "GroupID")]
    Group,
    /// `GroupInviteID_`
    #[serde(rename = "GroupInviteID")]
    GroupInvite,
    /// `DiskID_`
    #[serde(rename = "DiskID")]
    Disk,
    /// `DriveID_` (principal-derived)
    #[serde(rename = "DriveID")]
    Drive,
    /// `LabelID_`
    #[serde(rename = "LabelID")]
    Label,
    /// `WebhookID_`
    #[serde(rename = "WebhookID")]
    Webhook,
    /// `DirectoryPermissionID_`
    #[serde(rename = "DirectoryPermissionID")]
    DirectoryPermission,
    /// `SystemPermissionID_`
    #[serde(rename = "SystemPermissionID")]
    SystemPermission,
    /// `PlaceholderPermissionGranteeID_`
    #[serde(rename = "PlaceholderPermissionGranteeID")]
    PlaceholderPermissionGrantee,
    /// `PlaceholderGroupInviteeID_`
    #[serde(rename = "PlaceholderGroupInviteeID")]
    PlaceholderGroupInvitee,
    /// `StateDiffRecordID_`
    #[serde(rename = "StateDiffRecordID")]
    StateDiffRecord,
    /// `PurchaseID_`
    #[serde(rename = "PurchaseID")]
    Purchase,
    /// `InboxNotifID_`
    #[serde(rename = "InboxNotifID")]
    InboxNotif,
    /// `ShareTrackID_`
    #[serde(rename = "ShareTrackID")]
    ShareTrack,
    /// `DirectoryActionOutcomeID_`
    #[serde(rename = "DirectoryActionOutcomeID")]
    DirectoryActionOutcome,
    /// `GiftcardSpawnOrgID_`
    #[serde(rename = "GiftcardSpawnOrgID")]
    GiftcardSpawnOrg,
}

impl IdPrefix {
    /// Every prefix, in declaration order.
    pub const ALL: [IdPrefix; 20] = [
        Self::File,
        Self::Folder,
        Self::ApiKey,
        Self::User,
        Self::Group,
        Self::GroupInvite,
        Self::Disk,
        Self::Drive,
        Self::Label,
        Self::Webhook,
        Self::DirectoryPermission,
        Self::SystemPermission,
        Self::PlaceholderPermissionGrantee,
        Self::PlaceholderGroupInvitee,
        Self::StateDiffRecord,
        Self::Purchase,
        Self::InboxNotif,
        Self::ShareTrack,
        Self::DirectoryActionOutcome,
        Self::GiftcardSpawnOrg,
    ];

    /// Wire names of every prefix, in declaration order.
    pub const NAMES: &'static [&'static str] = &[
        "FileID",
        "FolderID",
        "ApiKeyID",
        "UserID",
        "GroupID",
        "GroupInviteID",
        "DiskID",
        "DriveID",
        "LabelID",
        "WebhookID",
        "DirectoryPermissionID",
        "SystemPermissionID",
        "PlaceholderPermissionGranteeID",
        "PlaceholderGroupInviteeID",
        "StateDiffRecordID",
        "PurchaseID",
        "InboxNotifID",
        "ShareTrackID",
        "DirectoryActionOutcomeID",
        "GiftcardSpawnOrgID",
    ];

    /// Return the prefix as it appears on the wire (without separator).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "FileID",
            Self::Folder => "FolderID",
            Self::ApiKey => "ApiKeyID",
            Self::User => "UserID",
            Self::Group => "GroupID",
            Self::GroupInvite => "GroupInviteID",
            Self::Disk => "DiskID",
            Self::Drive => "DriveID",
            Self::Label => "LabelID",
            Self::Webhook => "WebhookID",
            Self::DirectoryPermission => "DirectoryPermissionID",
            Self::SystemPermission => "SystemPermissionID",
            Self::PlaceholderPermissionGrantee => "PlaceholderPermissionGranteeID",
            Self::PlaceholderGroupInvitee => "PlaceholderGroupInviteeID",
            Self::StateDiffRecord => "StateDiffRecordID",
            Self::Purchase => "PurchaseID",
            Self::InboxNotif => "InboxNotifID",
            Self::ShareTrack => "ShareTrackID",
            Self::DirectoryActionOutcome => "DirectoryActionOutcomeID",
            Self::GiftcardSpawnOrg => "GiftcardSpawnOrgID",
        }
    }

    /// Whether identifiers of this kind are derived from a principal
    /// rather than a random UUID.
    pub fn is_principal_derived(&self) -> bool {
        matches!(self, Self::Drive | Self::User)
    }
}

impl fmt::Display for IdPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IdPrefix {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|prefix| prefix.as_str() == s)
            .ok_or_else(|| AppError::unknown_variant(format!("Unknown ID prefix: '{s}'")))
    }
}

/// Split an identifier on its first separator and resolve the prefix.
///
/// Returns the entity kind and the suffix (UUID or principal).
pub fn parse_id(id: &str) -> Result<(IdPrefix, &str), AppError> {
    let (prefix, suffix) = id
        .split_once(ID_SEPARATOR)
        .ok_or_else(|| AppError::validation(format!("Malformed ID '{id}': missing prefix")))?;
    let prefix: IdPrefix = prefix.parse()?;
    if suffix.is_empty() {
        return Err(AppError::validation(format!(
            "Malformed ID '{id}': empty suffix"
        )));
    }
    Ok((prefix, suffix))
}

/// Deserialize a prefixed string through its `FromStr`.
///
/// Parse failures of kind [`ErrorKind::UnknownVariant`] are reported as serde
/// `unknown_variant` errors naming `expected`, so decoders can classify them
/// without inspecting free-form messages.
pub fn deserialize_prefixed<'de, D, T>(
    deserializer: D,
    expected: &'static [&'static str],
) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = AppError>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(|err: AppError| match err.kind {
        ErrorKind::UnknownVariant => de::Error::unknown_variant(&raw, expected),
        _ => de::Error::custom(err),
    })
}

/// Source of UUIDs for identifier generation.
///
/// Passed explicitly to [`IdGenerator`] so that ID creation is deterministic
/// under test.
pub trait UuidSource: Send + Sync + fmt::Debug {
    /// Produce the next UUID.
    fn next_uuid(&self) -> Uuid;
}

/// Production source: random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomUuidSource;

impl UuidSource for RandomUuidSource {
    fn next_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic source yielding well-formed v4 UUIDs from a seed and a counter.
#[derive(Debug)]
pub struct SequentialUuidSource {
    seed: u64,
    counter: AtomicU64,
}

impl SequentialUuidSource {
    /// Create a sequential source starting at zero.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            counter: AtomicU64::new(0),
        }
    }
}

impl UuidSource for SequentialUuidSource {
    fn next_uuid(&self) -> Uuid {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&self.seed.to_be_bytes());
        bytes[8..].copy_from_slice(&n.to_be_bytes());
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }
}

/// Generates prefixed identifiers from an injected [`UuidSource`].
#[derive(Debug, Clone)]
pub struct IdGenerator {
    source: Arc<dyn UuidSource>,
}

impl IdGenerator {
    /// Create a generator backed by the given source.
    pub fn new(source: impl UuidSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    /// Create a generator backed by random v4 UUIDs.
    pub fn random() -> Self {
        Self::new(RandomUuidSource)
    }

    /// Create a deterministic generator for tests and replays.
    pub fn sequential(seed: u64) -> Self {
        Self::new(SequentialUuidSource::new(seed))
    }

    /// Generate `"<Prefix>_<uuid>"` for the given kind.
    pub fn generate(&self, prefix: IdPrefix) -> String {
        format!("{prefix}{ID_SEPARATOR}{}", self.source.next_uuid())
    }

    /// Derive `"<Prefix>_<principal>"`; the same principal always yields
    /// the same identifier.
    pub fn derive(prefix: IdPrefix, principal: &str) -> String {
        format!("{prefix}{ID_SEPARATOR}{principal}")
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::random()
    }
}

/// Shared body of every prefixed identifier newtype.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident => $prefix:ident
    ) => {
        define_id!(@common $(#[$meta])* $name => $prefix);

        impl $name {
            /// Generate a fresh identifier of this kind.
            pub fn generate(ids: &IdGenerator) -> Self {
                Self(ids.generate(IdPrefix::$prefix))
            }
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident => $prefix:ident, principal
    ) => {
        define_id!(@common $(#[$meta])* $name => $prefix);

        impl $name {
            /// Derive the identifier owned by a principal.
            pub fn from_principal(principal: &str) -> Self {
                Self(IdGenerator::derive(IdPrefix::$prefix, principal))
            }

            /// Return the principal this identifier was derived from.
            pub fn principal(&self) -> &str {
                self.suffix()
            }
        }
    };
    (
        @common
        $(#[$meta:meta])*
        $name:ident => $prefix:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(into = "String")]
        pub struct $name(String);

        impl $name {
            /// The prefix every identifier of this kind carries.
            pub const PREFIX: IdPrefix = IdPrefix::$prefix;

            /// Return the full identifier string.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Return the part after the prefix separator.
            pub fn suffix(&self) -> &str {
                &self.0[Self::PREFIX.as_str().len() + 1..]
            }

            /// Consume the identifier and return its string.
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let (prefix, _) = parse_id(s)?;
                if prefix != Self::PREFIX {
                    return Err(AppError::validation(format!(
                        "Expected a {} but got '{s}'",
                        Self::PREFIX
                    )));
                }
                Ok(Self(s.to_string()))
            }
        }

        impl TryFrom<String> for $name {
            type Error = AppError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserialize_prefixed(deserializer, IdPrefix::NAMES)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a file.
    FileID => File
);

define_id!(
    /// Unique identifier for a folder.
    FolderID => Folder
);

define_id!(
    /// Unique identifier for an API key.
    ApiKeyID => ApiKey
);

define_id!(
    /// Identifier of a user, derived from the user's principal.
    UserID => User, principal
);

define_id!(
    /// Unique identifier for a group.
    GroupID => Group
);

define_id!(
    /// Unique identifier for a group invite.
    GroupInviteID => GroupInvite
);

define_id!(
    /// Unique identifier for a disk.
    DiskID => Disk
);

define_id!(
    /// Identifier of a drive, derived from the drive canister's principal.
    DriveID => Drive, principal
);

define_id!(
    /// Unique identifier for a label.
    LabelID => Label
);

define_id!(
    /// Unique identifier for a webhook.
    WebhookID => Webhook
);

define_id!(
    /// Unique identifier for a directory permission.
    DirectoryPermissionID => DirectoryPermission
);

define_id!(
    /// Unique identifier for a system permission.
    SystemPermissionID => SystemPermission
);

define_id!(
    /// Unresolved grantee slot of a permission, redeemable later.
    PlaceholderPermissionGranteeID => PlaceholderPermissionGrantee
);

define_id!(
    /// Unresolved invitee slot of a group invite, redeemable later.
    PlaceholderGroupInviteeID => PlaceholderGroupInvitee
);

define_id!(
    /// Unique identifier for a state diff record.
    StateDiffRecordID => StateDiffRecord
);

define_id!(
    /// Unique identifier for a purchase.
    PurchaseID => Purchase
);

define_id!(
    /// Unique identifier for an inbox notification.
    InboxNotifID => InboxNotif
);

define_id!(
    /// Unique identifier for a share-tracking record.
    ShareTrackID => ShareTrack
);

define_id!(
    /// Unique identifier for one outcome of a batched directory action.
    DirectoryActionOutcomeID => DirectoryActionOutcome
);

define_id!(
    /// Unique identifier for a gift card that spawns an org.
    GiftcardSpawnOrgID => GiftcardSpawnOrg
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_carry_prefix_and_v4_uuid() {
        let ids = IdGenerator::random();
        for prefix in IdPrefix::ALL {
            let id = ids.generate(prefix);
            let (parsed, suffix) = parse_id(&id).expect("should parse");
            assert_eq!(parsed, prefix);
            let uuid = Uuid::parse_str(suffix).expect("suffix should be a uuid");
            assert_eq!(uuid.get_version_num(), 4);
        }
    }

    #[test]
    fn test_exactly_one_prefix_matches() {
        let ids = IdGenerator::random();
        for prefix in IdPrefix::ALL {
            let id = ids.generate(prefix);
            let matching = IdPrefix::ALL
                .iter()
                .filter(|p| id.starts_with(&format!("{}_", p.as_str())))
                .count();
            assert_eq!(matching, 1, "{id}");
        }
    }

    #[test]
    fn test_principal_ids_are_deterministic() {
        let a = DriveID::from_principal("rrkah-fqaaa-aaaaa-aaaaq-cai");
        let b = DriveID::from_principal("rrkah-fqaaa-aaaaa-aaaaq-cai");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "DriveID_rrkah-fqaaa-aaaaa-aaaaq-cai");
        assert_eq!(a.principal(), "rrkah-fqaaa-aaaaa-aaaaq-cai");

        let user = UserID::from_principal("2vxsx-fae");
        assert_eq!(user.to_string(), "UserID_2vxsx-fae");
    }

    #[test]
    fn test_sequential_source_is_repeatable() {
        let first = IdGenerator::sequential(7);
        let second = IdGenerator::sequential(7);
        let a: Vec<_> = (0..3).map(|_| FileID::generate(&first)).collect();
        let b: Vec<_> = (0..3).map(|_| FileID::generate(&second)).collect();
        assert_eq!(a, b);
        assert_ne!(a[0], a[1]);
        let uuid = Uuid::parse_str(a[2].suffix()).unwrap();
        assert_eq!(uuid.get_version_num(), 4);
    }

    #[test]
    fn test_typed_id_rejects_foreign_prefix() {
        assert!("FolderID_abc".parse::<FileID>().is_err());
        assert!("FileID_abc".parse::<FileID>().is_ok());
        let err = "Nope_abc".parse::<FileID>().unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::UnknownVariant);
        let err = "FileID".parse::<FileID>().unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Validation);
        assert!("FileID_".parse::<FileID>().is_err());
    }

    #[test]
    fn test_serde_as_plain_string() {
        let id: FolderID = "FolderID_root".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"FolderID_root\"");
        let back: FolderID = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<FolderID>("\"FileID_root\"").is_err());
    }

    #[test]
    fn test_unknown_prefix_decodes_as_unknown_variant() {
        let err = serde_json::from_str::<FileID>("\"NopeID_x\"").unwrap_err();
        assert_eq!(AppError::from(err).kind, ErrorKind::UnknownVariant);

        let err = serde_json::from_str::<FileID>("\"FolderID_x\"").unwrap_err();
        assert_eq!(AppError::from(err).kind, ErrorKind::Serialization);
    }

    #[test]
    fn test_prefix_names_follow_all() {
        let names: Vec<_> = IdPrefix::ALL.iter().map(IdPrefix::as_str).collect();
        assert_eq!(names, IdPrefix::NAMES);
    }

    #[test]
    fn test_split_on_first_separator_only() {
        let (prefix, suffix) = parse_id("UserID_abc_def").unwrap();
        assert_eq!(prefix, IdPrefix::User);
        assert_eq!(suffix, "abc_def");
    }

    #[test]
    fn test_prefix_serde_matches_display() {
        for prefix in IdPrefix::ALL {
            let json = serde_json::to_string(&prefix).unwrap();
            assert_eq!(json, format!("\"{}\"", prefix.as_str()));
        }
    }
}
