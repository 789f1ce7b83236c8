//! API Configuration Module
//!
//! Configuration for CORS, the access-gate override code, pagination
//! defaults, and upload handling. Loaded from environment variables with
//! sensible defaults for development.

// ============================================================================
// API CONFIGURATION
// ============================================================================

/// Default page size for the admin listing.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Uploads larger than this are staged to a temp file before parsing.
pub const DEFAULT_UPLOAD_SPOOL_BYTES: usize = 4 * 1024 * 1024;

/// API configuration for CORS, access gate, and upload handling.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    // ========================================================================
    // CORS Configuration
    // ========================================================================
    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,

    /// Whether to allow credentials in CORS requests.
    pub cors_allow_credentials: bool,

    /// Max age for CORS preflight cache in seconds.
    pub cors_max_age_secs: u64,

    // ========================================================================
    // Access Gate Configuration
    // ========================================================================
    /// Reserved override code: a credential equal to this string is granted
    /// access regardless of per-record contact columns.
    pub override_code: String,

    // ========================================================================
    // Admin Listing Configuration
    // ========================================================================
    /// Page size used when the caller does not supply one.
    pub default_page_size: usize,

    // ========================================================================
    // Upload Configuration
    // ========================================================================
    /// Uploads larger than this many bytes are staged to disk for parsing.
    pub upload_spool_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            // CORS defaults: permissive for development
            cors_origins: Vec::new(), // Empty = allow all
            cors_allow_credentials: false,
            cors_max_age_secs: 86400, // 24 hours

            override_code: "@lecturer-override".to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            upload_spool_bytes: DEFAULT_UPLOAD_SPOOL_BYTES,
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `MARKSHEET_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    /// - `MARKSHEET_CORS_ALLOW_CREDENTIALS`: "true" or "false" (default: false)
    /// - `MARKSHEET_CORS_MAX_AGE_SECS`: Preflight cache duration (default: 86400)
    /// - `MARKSHEET_OVERRIDE_CODE`: Reserved access-gate override code
    /// - `MARKSHEET_DEFAULT_PAGE_SIZE`: Admin listing page size (default: 100)
    /// - `MARKSHEET_UPLOAD_SPOOL_BYTES`: Disk-staging threshold for uploads
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let cors_origins = std::env::var("MARKSHEET_CORS_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let cors_allow_credentials = std::env::var("MARKSHEET_CORS_ALLOW_CREDENTIALS")
            .ok()
            .map(|s| s.to_lowercase() == "true")
            .unwrap_or(false);

        let cors_max_age_secs = std::env::var("MARKSHEET_CORS_MAX_AGE_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.cors_max_age_secs);

        let override_code = std::env::var("MARKSHEET_OVERRIDE_CODE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.override_code);

        let default_page_size = std::env::var("MARKSHEET_DEFAULT_PAGE_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.default_page_size);

        let upload_spool_bytes = std::env::var("MARKSHEET_UPLOAD_SPOOL_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.upload_spool_bytes);

        Self {
            cors_origins,
            cors_allow_credentials,
            cors_max_age_secs,
            override_code,
            default_page_size,
            upload_spool_bytes,
        }
    }

    /// Check if running in production mode (strict CORS).
    pub fn is_production(&self) -> bool {
        !self.cors_origins.is_empty()
    }
}
