//! Shared application state for Axum routers.

use std::sync::Arc;

use marksheet_storage::ResultStore;

use crate::config::ApiConfig;
use crate::gate::AccessGate;

/// Application-wide state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Record store collaborator.
    pub store: Arc<dyn ResultStore>,
    /// Credential policy over the store.
    pub gate: AccessGate,
    /// Runtime configuration.
    pub config: ApiConfig,
}

impl AppState {
    /// Assemble state from a store and configuration. The gate inherits
    /// the configured override code.
    pub fn new(store: Arc<dyn ResultStore>, config: ApiConfig) -> Self {
        let gate = AccessGate::new(store.clone(), config.override_code.clone());
        Self {
            store,
            gate,
            config,
        }
    }
}
