//! REST API Routes Module
//!
//! Route handlers organized by surface:
//! - Public student lookup (basic info, results)
//! - Bulk upload ingestion
//! - Admin CRUD with pagination
//! - Health checks
//!
//! Router assembly applies CORS, response compression, and request
//! tracing, matching how the portal was deployed behind a browser
//! front-end on another origin.

pub mod admin;
pub mod health;
pub mod student;
pub mod upload;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    response::IntoResponse,
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ApiConfig;
use crate::state::AppState;

// Re-export route creation functions for convenience
pub use admin::create_router as admin_router;
pub use health::create_router as health_router;
pub use student::create_router as student_router;
pub use upload::create_router as upload_router;

// ============================================================================
// ROOT ENDPOINT
// ============================================================================

/// GET / - Service banner.
async fn service_banner() -> impl IntoResponse {
    "Marksheet result service is ready"
}

// ============================================================================
// OPENAPI ENDPOINT
// ============================================================================

/// Handler for /openapi.json endpoint.
#[cfg(feature = "openapi")]
async fn openapi_json() -> impl IntoResponse {
    use utoipa::OpenApi;

    axum::Json(crate::openapi::ApiDoc::openapi())
}

// ============================================================================
// ROUTER ASSEMBLY
// ============================================================================

/// Create the complete API router.
///
/// Routes:
/// - `GET /` service banner
/// - `POST /upload` sheet ingestion
/// - `GET /basic-info`, `GET /results` public lookup
/// - `GET|PUT|DELETE /admin/results[/{id}]` admin CRUD (no auth: the
///   browser-side password prompt is not a security boundary)
/// - `GET /health/*` health checks
/// - `GET /openapi.json`, `/swagger-ui` (feature-gated)
pub fn create_api_router(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(&state.config);

    let router = Router::new()
        .route("/", get(service_banner))
        .nest("/upload", upload::create_router(state.clone()))
        .merge(student::create_router(state.clone()))
        .nest("/admin/results", admin::create_router(state.clone()))
        .nest("/health", health::create_router(state.clone()));

    #[cfg(feature = "openapi")]
    let router = router.route("/openapi.json", get(openapi_json));

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;
        router.merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi()),
        )
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}

// ============================================================================
// CORS LAYER
// ============================================================================

/// Build the CORS layer from ApiConfig.
///
/// In development mode (empty origins), allows all origins.
/// In production mode, only allows configured origins.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if config.cors_origins.is_empty() {
        // Development mode: allow all origins
        tracing::info!("CORS: Development mode - allowing all origins");
        cors.allow_origin(Any).allow_headers(Any)
    } else {
        // Production mode: only allow configured origins
        tracing::info!(
            "CORS: Production mode - allowing origins: {:?}",
            config.cors_origins
        );
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        if config.cors_allow_credentials {
            cors.allow_origin(origins).allow_credentials(true)
        } else {
            cors.allow_origin(origins)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marksheet_storage::MemoryStore;

    #[test]
    fn test_router_assembles_with_default_config() {
        let state = Arc::new(AppState::new(
            Arc::new(MemoryStore::new()),
            ApiConfig::default(),
        ));
        let _router = create_api_router(state);
    }

    #[test]
    fn test_cors_layer_builds_for_both_modes() {
        let mut config = ApiConfig::default();
        let _dev = build_cors_layer(&config);

        config.cors_origins = vec!["https://result.example.edu".to_string()];
        config.cors_allow_credentials = true;
        let _prod = build_cors_layer(&config);
    }
}
