//! Marksheet Core - Entity Types
//!
//! Pure data structures with no behavior. All other crates depend on this.
//! This crate contains ONLY data types - no business logic.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod error;
pub mod record;

pub use error::{
    IngestError, MarksheetError, MarksheetResult, StorageError, ValidationError,
};
pub use record::{BasicInfo, FieldValue, RecordFields, ResultRecord};

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Record identifier using UUIDv7 for timestamp-sortable IDs.
/// UUIDv7 embeds a Unix timestamp, making IDs naturally sortable by creation time.
pub type RecordId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 RecordId (timestamp-sortable).
pub fn new_record_id() -> RecordId {
    Uuid::now_v7()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_ids_are_unique() {
        let a = new_record_id();
        let b = new_record_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_record_ids_are_version_7() {
        let id = new_record_id();
        assert_eq!(id.get_version_num(), 7);
    }
}
