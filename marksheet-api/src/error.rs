//! Error Types for the Marksheet API
//!
//! This module defines error handling for the API layer, including:
//! - ApiError struct for structured error responses
//! - ErrorCode enum for categorizing errors
//! - IntoResponse implementation for Axum HTTP responses
//!
//! All errors are serialized as JSON with appropriate HTTP status codes.
//! Access denial is deliberately NOT an error anywhere in this module:
//! the gate answers denial with an empty result set.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use marksheet_core::{IngestError, MarksheetError, StorageError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
///
/// Each error code maps to a specific HTTP status code and represents
/// a category of error that can occur during API operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================================================
    // Validation Errors (400)
    // ========================================================================
    /// Request validation failed
    ValidationFailed,

    /// Required field or parameter is missing from request
    MissingField,

    /// Field value has an incorrect format
    InvalidFormat,

    // ========================================================================
    // Not Found Errors (404)
    // ========================================================================
    /// Requested record does not exist
    RecordNotFound,

    /// No student matched the presented roll and credential
    StudentNotFound,

    // ========================================================================
    // Server Errors (500, 503)
    // ========================================================================
    /// Ingestion could not parse or persist the uploaded sheet
    ProcessingFailed,

    /// Record store operation failed
    StoreError,

    /// Internal server error
    InternalError,

    /// Service is temporarily unavailable
    ServiceUnavailable,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationFailed
            | ErrorCode::MissingField
            | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,

            ErrorCode::RecordNotFound | ErrorCode::StudentNotFound => StatusCode::NOT_FOUND,

            ErrorCode::ProcessingFailed
            | ErrorCode::StoreError
            | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,

            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get a default message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Request validation failed",
            ErrorCode::MissingField => "Required field is missing",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RecordNotFound => "Result not found",
            ErrorCode::StudentNotFound => "Student not found",
            ErrorCode::ProcessingFailed => "Failed to process file",
            ErrorCode::StoreError => "Record store operation failed",
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::ServiceUnavailable => "Service temporarily unavailable",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error response for API operations.
///
/// This type is returned by all API endpoints when an error occurs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ApiError {
    /// Error code categorizing the error
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details (field errors, row numbers, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create a new API error with the given code, using the default message.
    pub fn from_code(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.default_message().to_string(),
            details: None,
        }
    }

    /// Add additional details to the error.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    // ========================================================================
    // Convenience constructors for common errors
    // ========================================================================

    /// Create a ValidationFailed error.
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    /// Create a MissingField error.
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingField,
            format!("Required field '{}' is missing", field),
        )
    }

    /// Create an InvalidFormat error.
    pub fn invalid_format(field: &str, expected: &str) -> Self {
        Self::new(
            ErrorCode::InvalidFormat,
            format!("Field '{}' has invalid format, expected {}", field, expected),
        )
    }

    /// Create a RecordNotFound error.
    pub fn record_not_found(id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::RecordNotFound,
            format!("Result {} not found", id),
        )
    }

    /// Create a StudentNotFound error.
    pub fn student_not_found() -> Self {
        Self::from_code(ErrorCode::StudentNotFound)
    }

    /// Create a ProcessingFailed error.
    pub fn processing_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ProcessingFailed, message)
    }

    /// Create a StoreError.
    pub fn store_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreError, message)
    }

    /// Create an InternalError.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Create a ServiceUnavailable error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

/// Implement IntoResponse for ApiError to enable automatic error handling in Axum.
///
/// This allows ApiError to be returned directly from Axum handlers:
/// ```ignore
/// async fn handler() -> Result<Json<Response>, ApiError> {
///     Err(ApiError::missing_field("roll"))
/// }
/// ```
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self);
        (status, body).into_response()
    }
}

// ============================================================================
// CONVERSIONS FROM CORE ERRORS
// ============================================================================

/// Convert from StorageError to ApiError.
///
/// Store detail is logged and replaced by a generic message so internals
/// never leak into response bodies.
impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { id } => ApiError::record_not_found(id),
            StorageError::Unavailable { ref reason } => {
                tracing::error!("Store unavailable: {}", reason);
                ApiError::service_unavailable("Record store unavailable")
            }
            _ => {
                tracing::error!("Store error: {:?}", err);
                ApiError::store_error(ErrorCode::StoreError.default_message())
            }
        }
    }
}

/// Convert from ValidationError to ApiError.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::RequiredFieldMissing { ref field } => ApiError::missing_field(field),
            ValidationError::InvalidValue { ref field, ref reason } => {
                ApiError::invalid_format(field, reason)
            }
        }
    }
}

/// Convert from IngestError to ApiError.
impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        tracing::error!("Ingestion error: {}", err);
        ApiError::processing_failed(ErrorCode::ProcessingFailed.default_message())
    }
}

/// Convert from the umbrella MarksheetError to ApiError.
impl From<MarksheetError> for ApiError {
    fn from(err: MarksheetError) -> Self {
        match err {
            MarksheetError::Storage(e) => e.into(),
            MarksheetError::Validation(e) => e.into(),
            MarksheetError::Ingest(e) => e.into(),
        }
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
