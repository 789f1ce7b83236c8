//! Error types for marksheet operations

use thiserror::Error;

use crate::RecordId;

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Record not found: {id}")]
    NotFound { id: RecordId },

    #[error("Insert failed: {reason}")]
    InsertFailed { reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,

    #[error("Store unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Ingestion pipeline errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("Unreadable workbook: {reason}")]
    UnreadableWorkbook { reason: String },

    #[error("Workbook has no sheets")]
    NoSheets,

    #[error("Staging failed: {reason}")]
    StagingFailed { reason: String },
}

/// Umbrella error for marksheet operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MarksheetError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

/// Result type alias used across the workspace.
pub type MarksheetResult<T> = Result<T, MarksheetError>;
