//! Bulk Upload Route
//!
//! Accepts a multipart spreadsheet upload and appends one record per data
//! row. Parse failures and store-write failures both surface as a generic
//! processing failure; there is no rollback beyond what the store's bulk
//! insert guarantees.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult, ErrorCode},
    ingest,
    state::AppState,
    types::UploadResponse,
};

/// Uploads beyond this size are rejected by the body limit layer.
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /upload - Ingest a result sheet
#[utoipa::path(
    post,
    path = "/upload",
    tag = "Upload",
    request_body(content_type = "multipart/form-data", description = "Spreadsheet in a part named 'file'"),
    responses(
        (status = 200, description = "Sheet ingested", body = UploadResponse),
        (status = 400, description = "No file uploaded", body = ApiError),
        (status = 500, description = "Failed to process file", body = ApiError),
    ),
)]
pub async fn upload_results(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let data = read_file_part(&mut multipart).await?;

    let rows = ingest::parse_upload(&data, state.config.upload_spool_bytes)?;
    let row_count = rows.len();

    let ids = state.store.insert_many(rows).await.map_err(|e| {
        tracing::error!("Bulk insert failed after parsing {} rows: {}", row_count, e);
        ApiError::processing_failed(ErrorCode::ProcessingFailed.default_message())
    })?;

    tracing::info!(inserted = ids.len(), "result sheet ingested");

    Ok(Json(UploadResponse {
        message: "File uploaded and data stored successfully".to_string(),
        inserted: ids.len(),
    }))
}

/// Pull the bytes of the part named `file` out of the multipart body.
async fn read_file_part(multipart: &mut Multipart) -> ApiResult<Vec<u8>> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("Malformed multipart body: {}", e);
        ApiError::validation_failed("Malformed multipart body")
    })? {
        if field.name() != Some("file") {
            continue;
        }
        let bytes = field.bytes().await.map_err(|e| {
            tracing::warn!("Failed to read upload: {}", e);
            ApiError::validation_failed("Failed to read uploaded file")
        })?;
        return Ok(bytes.to_vec());
    }

    Err(ApiError::missing_field("file"))
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the upload router.
pub fn create_router(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route("/", axum::routing::post(upload_results))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
