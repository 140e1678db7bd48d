//! Unified error handling
//!
//! Structured error codes, category classification and the API response
//! envelope used by every handler.
//!
//! Error codes are organized by range:
//! - 0xxx: general
//! - 1xxx: authentication errors
//! - 2xxx: validation errors (bad request, record identity problems)
//! - 3xxx: file/storage errors (missing assets, archive faults)
//! - 9xxx: system errors

use std::collections::HashMap;
use std::fmt;

use axum::Json;
use axum::response::Response;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Unified error code enum
///
/// Represented as `u16` for efficient serialization and stable client-side
/// matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,

    // ==================== 1xxx: Auth ====================
    /// Caller is not authenticated
    NotAuthenticated = 1001,
    /// Bearer token has expired
    TokenExpired = 1002,
    /// Bearer token is invalid
    TokenInvalid = 1003,

    // ==================== 2xxx: Validation ====================
    /// Request validation failed
    ValidationFailed = 2001,
    /// No image record with the requested id
    RecordNotFound = 2002,

    // ==================== 3xxx: File ====================
    /// Record exists but the referenced file is absent or dangling
    FileMissing = 3001,
    /// Reading the file from disk failed
    FileReadFailed = 3002,
    /// Building the ZIP archive failed
    ArchiveFailed = 3003,
    /// Record store fault while resolving a download
    StorageFault = 3004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Numeric value of this error code
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "OK",

            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::TokenExpired => "Token expired",
            ErrorCode::TokenInvalid => "Invalid token",

            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::RecordNotFound => "Image record not found",

            ErrorCode::FileMissing => "File not found on disk",
            ErrorCode::FileReadFailed => "Failed to read file",
            ErrorCode::ArchiveFailed => "Failed to build archive",
            ErrorCode::StorageFault => "Record store fault",

            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }

    /// HTTP status code for this error code
    pub const fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::Success => StatusCode::OK,

            ErrorCode::NotAuthenticated | ErrorCode::TokenExpired | ErrorCode::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }

            ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
            ErrorCode::RecordNotFound | ErrorCode::FileMissing => StatusCode::NOT_FOUND,

            ErrorCode::FileReadFailed
            | ErrorCode::ArchiveFailed
            | ErrorCode::StorageFault
            | ErrorCode::InternalError
            | ErrorCode::DatabaseError
            | ErrorCode::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Category classification for this error code
    pub const fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),

            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::TokenExpired),
            1003 => Ok(ErrorCode::TokenInvalid),

            2001 => Ok(ErrorCode::ValidationFailed),
            2002 => Ok(ErrorCode::RecordNotFound),

            3001 => Ok(ErrorCode::FileMissing),
            3002 => Ok(ErrorCode::FileReadFailed),
            3003 => Ok(ErrorCode::ArchiveFailed),
            3004 => Ok(ErrorCode::StorageFault),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),

            other => Err(InvalidErrorCode(other)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error category classification based on error code ranges
///
/// The category string is part of the API contract: clients distinguish
/// "no such record" (`validation_error`) from "record exists but the asset
/// is unusable" (`file_error`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General (0xxx)
    General,
    /// Authentication errors (1xxx)
    #[serde(rename = "auth_error")]
    Auth,
    /// Request or record-identity problems (2xxx)
    #[serde(rename = "validation_error")]
    Validation,
    /// Storage-layer problems (3xxx)
    #[serde(rename = "file_error")]
    File,
    /// System errors (9xxx)
    #[serde(rename = "system_error")]
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub const fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Validation,
            3000..4000 => Self::File,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub const fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth_error",
            Self::Validation => "validation_error",
            Self::File => "file_error",
            Self::System => "system_error",
        }
    }
}

/// Application error with structured error code and details
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a record-not-found error for the given image id
    pub fn record_not_found(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::with_message(ErrorCode::RecordNotFound, format!("Image {id} not found"))
            .with_detail("image_id", id)
    }

    /// Create a file-missing error
    pub fn file_missing(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::FileMissing, msg)
    }

    /// Create a file-read error
    pub fn file_read(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::FileReadFailed, msg)
    }

    /// Create an archive construction error
    pub fn archive_failed(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ArchiveFailed, msg)
    }

    /// Create a storage fault error (store lookup failed mid-download)
    pub fn storage_fault(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::StorageFault, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create an unauthorized error
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Create a token expired error
    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    /// Create an invalid token error
    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }
}

/// Unified API response structure
///
/// JSON endpoints respond with `{ code, message, data }`; errors carry the
/// category tag and optional details instead of data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code (0 for success, non-zero for errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Error category tag (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ErrorCategory>,
    /// Human-readable message
    pub message: String,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            code: Some(0),
            category: None,
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            category: Some(err.code.category()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        let body = ApiResponse::<()>::error(&self);

        if matches!(self.code.category(), ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = match self.code {
            None | Some(0) => StatusCode::OK,
            Some(code) => ErrorCode::try_from(code)
                .map(|c| c.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        };

        (status, Json(self)).into_response()
    }
}
