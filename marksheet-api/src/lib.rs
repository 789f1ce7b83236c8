//! Marksheet API - REST API Layer
//!
//! This crate provides the HTTP surface for the marksheet result portal:
//! credential-gated student lookup, spreadsheet ingestion, and admin CRUD
//! over result records. Persistence goes through the `ResultStore` trait
//! from marksheet-storage; handlers never see a concrete backend.

pub mod config;
pub mod error;
pub mod gate;
pub mod ingest;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod routes;
pub mod state;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use gate::{AccessDecision, AccessGate};
#[cfg(feature = "openapi")]
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use state::AppState;
pub use types::*;
