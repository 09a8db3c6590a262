//! Convenience result type alias for OfficeX.

use crate::error::AppError;

/// A specialized `Result` type for OfficeX operations.
pub type AppResult<T> = Result<T, AppError>;
