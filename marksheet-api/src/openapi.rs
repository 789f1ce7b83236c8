//! OpenAPI document for the marksheet REST API.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::health::{ComponentHealth, HealthDetails, HealthResponse, HealthStatus};
use crate::types::{AckResponse, AdminListQuery, AdminListResponse, StudentQuery, UploadResponse};
use marksheet_core::{BasicInfo, RecordFields, ResultRecord};

/// OpenAPI documentation for all REST endpoints.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marksheet API",
        description = "Result-lookup portal: credential-gated student lookup, \
                       spreadsheet ingestion, and admin CRUD over result records.",
        license(name = "MIT"),
    ),
    paths(
        crate::routes::student::basic_info,
        crate::routes::student::results,
        crate::routes::upload::upload_results,
        crate::routes::admin::list_results,
        crate::routes::admin::get_result,
        crate::routes::admin::update_result,
        crate::routes::admin::delete_result,
        crate::routes::health::ping,
        crate::routes::health::liveness,
        crate::routes::health::readiness,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        BasicInfo,
        RecordFields,
        ResultRecord,
        StudentQuery,
        AdminListQuery,
        AdminListResponse,
        UploadResponse,
        AckResponse,
        HealthResponse,
        HealthStatus,
        HealthDetails,
        ComponentHealth,
    )),
    tags(
        (name = "Student", description = "Public credential-gated lookup"),
        (name = "Upload", description = "Bulk result sheet ingestion"),
        (name = "Admin", description = "Record CRUD and pagination"),
        (name = "Health", description = "Liveness and readiness checks"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_generates() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("/results"));
        assert!(json.contains("/admin/results"));
        assert!(json.contains("/upload"));
    }
}
