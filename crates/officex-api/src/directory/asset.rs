//! Raw file asset lookup. The route answers with a redirect to the file's
//! `raw_url`.

use serde::{Deserialize, Serialize};
use validator::Validate;

use officex_core::types::FileID;
use officex_core::{AppError, AppResult};

/// Fetch the bytes of a file, addressed as `<FileID>.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct GetFileAssetRequest {
    #[validate(length(min = 1))]
    pub file_id_with_extension: String,
}

impl GetFileAssetRequest {
    pub fn new(file_id: &FileID, extension: &str) -> Self {
        let file_id_with_extension = if extension.is_empty() {
            file_id.to_string()
        } else {
            format!("{file_id}.{extension}")
        };
        Self {
            file_id_with_extension,
        }
    }

    /// Split into the file identifier and the extension, if one is given.
    pub fn split(&self) -> AppResult<(FileID, Option<&str>)> {
        let (id, extension) = match self.file_id_with_extension.split_once('.') {
            Some((id, extension)) => (id, Some(extension).filter(|e| !e.is_empty())),
            None => (self.file_id_with_extension.as_str(), None),
        };
        let id = id.parse::<FileID>().map_err(|err| {
            AppError::validation(format!(
                "{} does not name a file: {}",
                self.file_id_with_extension, err.message
            ))
        })?;
        Ok((id, extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_id_and_extension() {
        let request: GetFileAssetRequest =
            serde_json::from_str(r#"{"file_id_with_extension": "FileID_abc.tar.gz"}"#).unwrap();
        let (id, extension) = request.split().unwrap();
        assert_eq!(id.to_string(), "FileID_abc");
        assert_eq!(extension, Some("tar.gz"));

        let bare = GetFileAssetRequest::new(&id, "");
        assert_eq!(bare.file_id_with_extension, "FileID_abc");
        assert_eq!(bare.split().unwrap().1, None);
    }

    #[test]
    fn test_split_rejects_other_ids() {
        let request = GetFileAssetRequest {
            file_id_with_extension: "FolderID_abc.png".into(),
        };
        assert!(request.split().is_err());
    }
}
