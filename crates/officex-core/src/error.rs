//! Unified application error types for OfficeX.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Every error converts into the
//! `{"err": {"code", "message"}}` envelope via [`ErrorKind::code`].

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// The caller is not authenticated.
    Authentication,
    /// The caller does not have permission to perform the action.
    Authorization,
    /// Input validation failed.
    Validation,
    /// A discriminator (ID prefix, union tag, action name) was not recognized.
    UnknownVariant,
    /// A conflict occurred (duplicate entry, name clash, invalid move).
    Conflict,
    /// An internal error occurred.
    Internal,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// The requested feature or operation is not implemented.
    NotImplemented,
}

impl ErrorKind {
    /// Return the numeric code placed in the error envelope.
    ///
    /// Codes follow HTTP status semantics so that clients can treat the
    /// envelope the same way the drive's REST surface does.
    pub fn code(&self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::Authentication => 401,
            Self::Authorization => 403,
            Self::Validation | Self::UnknownVariant | Self::Serialization => 400,
            Self::Conflict => 409,
            Self::NotImplemented => 501,
            Self::Internal | Self::Configuration => 500,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Authentication => write!(f, "AUTHENTICATION"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::UnknownVariant => write!(f, "UNKNOWN_VARIANT"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::NotImplemented => write!(f, "NOT_IMPLEMENTED"),
        }
    }
}

/// The unified application error used throughout OfficeX.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an unknown-variant error for an unrecognized discriminator.
    pub fn unknown_variant(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownVariant, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a not-implemented error.
    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotImplemented, message)
    }

    /// Return the envelope code for this error.
    pub fn code(&self) -> u16 {
        self.kind.code()
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

/// Leading text of serde's `de::Error::unknown_variant` message.
const UNKNOWN_VARIANT_MESSAGE: &str = "unknown variant";

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        // Tags, ID prefixes and union members all reject through serde's
        // `unknown_variant`, which serde_json reports as a data error.
        let kind = match err.classify() {
            serde_json::error::Category::Data
                if err.to_string().starts_with(UNKNOWN_VARIANT_MESSAGE) =>
            {
                ErrorKind::UnknownVariant
            }
            _ => ErrorKind::Serialization,
        };
        Self::with_source(kind, format!("JSON serialization error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::with_source(
            ErrorKind::Validation,
            format!("Validation failed: {err}"),
            err,
        )
    }
}

impl From<base64::DecodeError> for AppError {
    fn from(err: base64::DecodeError) -> Self {
        Self::with_source(
            ErrorKind::Validation,
            format!("Invalid base64 content: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_http_semantics() {
        assert_eq!(AppError::not_found("x").code(), 404);
        assert_eq!(AppError::validation("x").code(), 400);
        assert_eq!(AppError::unknown_variant("x").code(), 400);
        assert_eq!(AppError::conflict("x").code(), 409);
        assert_eq!(AppError::internal("x").code(), 500);
    }

    #[test]
    fn test_unknown_variant_from_serde() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        enum Shape {
            Circle,
        }

        let err = serde_json::from_str::<Shape>("\"Square\"").unwrap_err();
        assert_eq!(AppError::from(err).kind, ErrorKind::UnknownVariant);

        let err = serde_json::from_str::<Shape>("{").unwrap_err();
        assert_eq!(AppError::from(err).kind, ErrorKind::Serialization);

        // A custom message merely mentioning the phrase is not a variant error.
        let err = serde_json::from_str::<crate::types::FileID>("\"unknown variant\"").unwrap_err();
        assert_eq!(AppError::from(err).kind, ErrorKind::Serialization);
    }

    #[test]
    fn test_display() {
        let err = AppError::conflict("name taken");
        assert_eq!(err.to_string(), "CONFLICT: name taken");
    }
}
