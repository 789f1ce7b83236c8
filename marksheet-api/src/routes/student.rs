//! Public Student Lookup Routes
//!
//! The form-facing endpoints: a narrow basic-info lookup and the full
//! results lookup. Both are gated by the shared-secret mobile credential;
//! see [`crate::gate`] for the policy. The results endpoint answers a
//! denial with an empty array on purpose, so callers cannot probe which
//! rolls exist.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use marksheet_core::{BasicInfo, ResultRecord};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
    types::StudentQuery,
    validation::ValidateNonEmpty,
};

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /basic-info - Descriptive fields for a (roll, mobile) pair
#[utoipa::path(
    get,
    path = "/basic-info",
    tag = "Student",
    params(
        ("roll" = String, Query, description = "Roll number"),
        ("mobile" = String, Query, description = "Student or guardian mobile number"),
    ),
    responses(
        (status = 200, description = "Student descriptive fields", body = BasicInfo),
        (status = 400, description = "Missing parameters", body = ApiError),
        (status = 404, description = "No matching student", body = ApiError),
    ),
)]
pub async fn basic_info(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StudentQuery>,
) -> ApiResult<impl IntoResponse> {
    params.roll.validate_non_empty("roll")?;
    params.mobile.validate_non_empty("mobile")?;

    let mobile = params.mobile.unwrap_or_default();

    // A non-numeric roll cannot match any record; treat it like one.
    let roll = match parse_roll(params.roll.as_deref()) {
        Some(roll) => roll,
        None => return Err(ApiError::student_not_found()),
    };

    let info = state
        .gate
        .basic_info(roll, &mobile)
        .await?
        .ok_or_else(ApiError::student_not_found)?;

    Ok(Json(info))
}

/// GET /results - Full result set for a (roll, mobile) pair
///
/// Denial is silent: the response is an empty array, indistinguishable
/// from a roll that has no records.
#[utoipa::path(
    get,
    path = "/results",
    tag = "Student",
    params(
        ("roll" = String, Query, description = "Roll number"),
        ("mobile" = String, Query, description = "Student or guardian mobile number"),
    ),
    responses(
        (status = 200, description = "All rows for the roll, or empty on denial", body = Vec<ResultRecord>),
    ),
)]
pub async fn results(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StudentQuery>,
) -> ApiResult<Json<Vec<ResultRecord>>> {
    let (roll, mobile) = match (parse_roll(params.roll.as_deref()), params.mobile) {
        (Some(roll), Some(mobile)) => (roll, mobile),
        // Absent or garbage parameters cannot match anything; deny
        // silently rather than revealing why.
        _ => return Ok(Json(Vec::new())),
    };

    let records = state.gate.authorize(roll, &mobile).await?;
    Ok(Json(records))
}

/// Parse a roll query parameter the way a form submits it.
fn parse_roll(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse().ok())
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the public student lookup router.
pub fn create_router(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route("/basic-info", axum::routing::get(basic_info))
        .route("/results", axum::routing::get(results))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roll_accepts_form_input() {
        assert_eq!(parse_roll(Some("1024")), Some(1024));
        assert_eq!(parse_roll(Some(" 1024 ")), Some(1024));
        assert_eq!(parse_roll(Some("roll-1024")), None);
        assert_eq!(parse_roll(Some("")), None);
        assert_eq!(parse_roll(None), None);
    }
}
