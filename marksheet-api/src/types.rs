//! Request/response types for the marksheet REST API.

use marksheet_core::ResultRecord;
use serde::{Deserialize, Serialize};

// ============================================================================
// STUDENT LOOKUP
// ============================================================================

/// Query parameters for the public lookup endpoints.
///
/// Both parameters arrive as text; `roll` is coerced by the handler so a
/// non-numeric roll behaves like a roll with no records instead of a
/// deserialization failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StudentQuery {
    /// Roll number, as supplied by the form.
    pub roll: Option<String>,
    /// Shared-secret mobile number (or the reserved override code).
    pub mobile: Option<String>,
}

// ============================================================================
// ADMIN LISTING
// ============================================================================

/// Query parameters for the paginated admin listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AdminListQuery {
    /// 1-based page number. Defaults to 1.
    pub page: Option<usize>,
    /// Page size. Defaults to the configured page size.
    pub limit: Option<usize>,
}

/// One page of the admin listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AdminListResponse {
    /// Records on this page, in the store's natural order.
    pub results: Vec<ResultRecord>,
    /// The page served.
    pub current_page: usize,
    /// ceil(total_records / page size).
    pub total_pages: usize,
    /// Total records in the store.
    pub total_records: usize,
}

// ============================================================================
// UPLOAD / ACKNOWLEDGEMENTS
// ============================================================================

/// Response for a successful sheet upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UploadResponse {
    pub message: String,
    /// Number of rows appended to the store.
    pub inserted: usize,
}

/// Generic acknowledgement for mutations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AckResponse {
    pub message: String,
}
