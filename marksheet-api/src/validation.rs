//! Validation Traits
//!
//! Common validation patterns extracted from route handlers.

use crate::error::{ApiError, ApiResult};

/// Trait for validating non-empty strings.
///
/// # Example
/// ```ignore
/// use marksheet_api::validation::ValidateNonEmpty;
///
/// fn lookup(mobile: &str) -> ApiResult<()> {
///     mobile.validate_non_empty("mobile")?;
///     // ... rest of logic
/// }
/// ```
pub trait ValidateNonEmpty {
    /// Validate that the value is non-empty.
    ///
    /// # Errors
    /// Returns `ApiError::missing_field` if the value is absent, empty, or
    /// whitespace-only.
    fn validate_non_empty(&self, field_name: &str) -> ApiResult<()>;
}

impl ValidateNonEmpty for str {
    fn validate_non_empty(&self, field_name: &str) -> ApiResult<()> {
        if self.trim().is_empty() {
            return Err(ApiError::missing_field(field_name));
        }
        Ok(())
    }
}

impl ValidateNonEmpty for String {
    fn validate_non_empty(&self, field_name: &str) -> ApiResult<()> {
        self.as_str().validate_non_empty(field_name)
    }
}

impl<T: ValidateNonEmpty> ValidateNonEmpty for Option<T> {
    fn validate_non_empty(&self, field_name: &str) -> ApiResult<()> {
        match self {
            Some(value) => value.validate_non_empty(field_name),
            None => Err(ApiError::missing_field(field_name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_non_empty_passes() {
        assert!("01712345678".validate_non_empty("mobile").is_ok());
    }

    #[test]
    fn test_empty_and_whitespace_fail() {
        assert!("".validate_non_empty("mobile").is_err());
        assert!("   ".validate_non_empty("mobile").is_err());
    }

    #[test]
    fn test_option_none_fails_with_missing_field() {
        let missing: Option<String> = None;
        let err = missing.validate_non_empty("mobile").unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingField);
        assert!(err.message.contains("mobile"));
    }
}
