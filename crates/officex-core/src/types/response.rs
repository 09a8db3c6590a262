//! The `ok`/`err` envelope wrapping every route response.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorKind};
use crate::result::AppResult;

/// Body of a successful response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OkBody<T> {
    /// The response payload.
    pub data: T,
}

/// Body of a failed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// HTTP-style status code.
    pub code: u16,
    /// Human-readable message.
    pub message: String,
}

/// Route response envelope: `{"ok":{"data":T}}` or `{"err":{"code","message"}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiResponse<T> {
    /// Success.
    Ok(OkBody<T>),
    /// Failure.
    Err(ErrorBody),
}

impl<T> ApiResponse<T> {
    /// Wrap a successful payload.
    pub fn ok(data: T) -> Self {
        Self::Ok(OkBody { data })
    }

    /// Build an error envelope.
    pub fn err(code: u16, message: impl Into<String>) -> Self {
        Self::Err(ErrorBody {
            code,
            message: message.into(),
        })
    }

    /// Whether this is the success variant.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Convert back into a result, mapping the error code onto an error kind.
    pub fn into_result(self) -> AppResult<T> {
        match self {
            Self::Ok(body) => Ok(body.data),
            Self::Err(body) => Err(AppError::new(kind_for_code(body.code), body.message)),
        }
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self::err(err.code(), err.message)
    }
}

impl<T> From<AppResult<T>> for ApiResponse<T> {
    fn from(result: AppResult<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => err.into(),
        }
    }
}

fn kind_for_code(code: u16) -> ErrorKind {
    match code {
        400 => ErrorKind::Validation,
        401 => ErrorKind::Authentication,
        403 => ErrorKind::Authorization,
        404 => ErrorKind::NotFound,
        409 => ErrorKind::Conflict,
        501 => ErrorKind::NotImplemented,
        _ => ErrorKind::Internal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_shape() {
        let value = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(value, json!({"ok": {"data": [1, 2]}}));
    }

    #[test]
    fn test_err_shape_from_app_error() {
        let response: ApiResponse<()> = AppError::not_found("Disk not found").into();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({"err": {"code": 404, "message": "Disk not found"}})
        );
    }

    #[test]
    fn test_into_result_recovers_kind() {
        let response: ApiResponse<u8> =
            serde_json::from_value(json!({"err": {"code": 409, "message": "taken"}})).unwrap();
        let err = response.into_result().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message, "taken");
    }

    #[test]
    fn test_unknown_envelope_key_is_rejected() {
        let parsed = serde_json::from_value::<ApiResponse<u8>>(json!({"maybe": {"data": 1}}));
        assert!(parsed.is_err());
    }
}
