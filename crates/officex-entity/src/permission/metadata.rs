//! Metadata attached to a permission grant.
//!
//! `content` is externally tagged (`{"Labels": "..."}`) and
//! `metadata_type` repeats the tag. Decoding rejects values where the two
//! disagree.

use serde::{Deserialize, Serialize};

use officex_core::AppError;

/// Discriminator of [`PermissionMetadataContent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionMetadataTypeEnum {
    /// Grant scoped to labels with a prefix.
    Labels,
    /// Grant unlocked by a password.
    DirectoryPassword,
}

/// Content of permission metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionMetadataContent {
    /// Label prefix the grant is restricted to.
    Labels(String),
    /// Password protecting a directory.
    DirectoryPassword(String),
}

impl PermissionMetadataContent {
    /// The discriminator matching this content.
    pub fn metadata_type(&self) -> PermissionMetadataTypeEnum {
        match self {
            Self::Labels(_) => PermissionMetadataTypeEnum::Labels,
            Self::DirectoryPassword(_) => PermissionMetadataTypeEnum::DirectoryPassword,
        }
    }
}

/// Metadata attached to a directory or system permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPermissionMetadata")]
pub struct PermissionMetadata {
    /// Discriminator, always equal to `content.metadata_type()`.
    pub metadata_type: PermissionMetadataTypeEnum,
    /// The tagged content.
    pub content: PermissionMetadataContent,
}

impl PermissionMetadata {
    /// Build metadata from content, deriving the discriminator.
    pub fn new(content: PermissionMetadataContent) -> Self {
        Self {
            metadata_type: content.metadata_type(),
            content,
        }
    }

    /// Label-prefix metadata.
    pub fn labels(prefix: impl Into<String>) -> Self {
        Self::new(PermissionMetadataContent::Labels(prefix.into()))
    }

    /// Directory password metadata.
    pub fn directory_password(password: impl Into<String>) -> Self {
        Self::new(PermissionMetadataContent::DirectoryPassword(password.into()))
    }
}

#[derive(Deserialize)]
struct RawPermissionMetadata {
    metadata_type: PermissionMetadataTypeEnum,
    content: PermissionMetadataContent,
}

impl TryFrom<RawPermissionMetadata> for PermissionMetadata {
    type Error = AppError;

    fn try_from(raw: RawPermissionMetadata) -> Result<Self, Self::Error> {
        if raw.metadata_type != raw.content.metadata_type() {
            return Err(AppError::validation(format!(
                "metadata_type {:?} does not match content {:?}",
                raw.metadata_type,
                raw.content.metadata_type()
            )));
        }
        Ok(Self {
            metadata_type: raw.metadata_type,
            content: raw.content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_externally_tagged_content() {
        let value = serde_json::to_value(PermissionMetadata::labels("project-")).unwrap();
        assert_eq!(
            value,
            json!({"metadata_type": "LABELS", "content": {"Labels": "project-"}})
        );
        let back: PermissionMetadata = serde_json::from_value(value).unwrap();
        assert_eq!(back, PermissionMetadata::labels("project-"));
    }

    #[test]
    fn test_mismatched_discriminator_rejected() {
        let value = json!({"metadata_type": "LABELS", "content": {"DirectoryPassword": "pw"}});
        assert!(serde_json::from_value::<PermissionMetadata>(value).is_err());
    }

    #[test]
    fn test_unknown_content_tag_rejected() {
        let value = json!({"metadata_type": "LABELS", "content": {"Colors": "red"}});
        assert!(serde_json::from_value::<PermissionMetadata>(value).is_err());
    }
}
