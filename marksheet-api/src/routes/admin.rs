//! Admin CRUD Routes
//!
//! Unrestricted read/update/delete of any record by its store-assigned
//! id, plus a paginated listing. No authorization is enforced at this
//! layer: the admin front-end's password prompt is UX state, not a
//! security boundary, and a real deployment must put authentication in
//! front of these routes.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use marksheet_core::{RecordFields, ResultRecord};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
    types::{AckResponse, AdminListQuery, AdminListResponse},
};

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /admin/results - Paginated listing in the store's natural order
#[utoipa::path(
    get,
    path = "/admin/results",
    tag = "Admin",
    params(
        ("page" = Option<usize>, Query, description = "1-based page number (default 1)"),
        ("limit" = Option<usize>, Query, description = "Page size (default 100)"),
    ),
    responses(
        (status = 200, description = "One page of records", body = AdminListResponse),
        (status = 500, description = "Store failure", body = ApiError),
    ),
)]
pub async fn list_results(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AdminListQuery>,
) -> ApiResult<impl IntoResponse> {
    let page = params.page.unwrap_or(1).max(1);
    let limit = params
        .limit
        .filter(|n| *n > 0)
        .unwrap_or(state.config.default_page_size);
    let skip = (page - 1) * limit;

    let results = state.store.list(limit, skip).await?;
    let total_records = state.store.count().await?;

    Ok(Json(AdminListResponse {
        results,
        current_page: page,
        total_pages: total_records.div_ceil(limit),
        total_records,
    }))
}

/// GET /admin/results/{id} - Fetch a single record
#[utoipa::path(
    get,
    path = "/admin/results/{id}",
    tag = "Admin",
    params(
        ("id" = Uuid, Path, description = "Record ID")
    ),
    responses(
        (status = 200, description = "Record details", body = ResultRecord),
        (status = 404, description = "Record not found", body = ApiError),
    ),
)]
pub async fn get_result(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let record = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::record_not_found(id))?;

    Ok(Json(record))
}

/// PUT /admin/results/{id} - Replace every field except the id
#[utoipa::path(
    put,
    path = "/admin/results/{id}",
    tag = "Admin",
    request_body = RecordFields,
    responses(
        (status = 200, description = "Record updated successfully", body = AckResponse),
        (status = 404, description = "Record not found", body = ApiError),
    ),
)]
pub async fn update_result(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(mut fields): Json<RecordFields>,
) -> ApiResult<impl IntoResponse> {
    // Edit forms echo the stored document back; drop the envelope keys so
    // they cannot be written into the record body as extra columns.
    fields.extra.remove("record_id");
    fields.extra.remove("created_at");
    fields.extra.remove("updated_at");

    state.store.replace(id, fields).await?;

    Ok(Json(AckResponse {
        message: "Result updated successfully".to_string(),
    }))
}

/// DELETE /admin/results/{id} - Remove a record
#[utoipa::path(
    delete,
    path = "/admin/results/{id}",
    tag = "Admin",
    params(
        ("id" = Uuid, Path, description = "Record ID")
    ),
    responses(
        (status = 200, description = "Record deleted successfully", body = AckResponse),
        (status = 404, description = "Record not found", body = ApiError),
    ),
)]
pub async fn delete_result(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    state.store.delete(id).await?;

    Ok(Json(AckResponse {
        message: "Result deleted successfully".to_string(),
    }))
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the admin CRUD router, nested under /admin/results.
pub fn create_router(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route("/", axum::routing::get(list_results))
        .route("/:id", axum::routing::get(get_result))
        .route("/:id", axum::routing::put(update_result))
        .route("/:id", axum::routing::delete(delete_result))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults() {
        let params: AdminListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(params.page.unwrap_or(1).max(1), 1);
        assert_eq!(params.limit.filter(|n| *n > 0).unwrap_or(100), 100);
    }

    #[test]
    fn test_zero_limit_falls_back_to_default() {
        let params = AdminListQuery {
            page: Some(3),
            limit: Some(0),
        };
        assert_eq!(params.limit.filter(|n| *n > 0).unwrap_or(100), 100);
    }
}
