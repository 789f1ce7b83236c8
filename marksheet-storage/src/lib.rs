//! Marksheet Storage - Store Trait and In-Memory Backend
//!
//! Defines the document-store abstraction for result records. The trait is
//! the seam where a wire-level store client would plug in; the shipped
//! backend is `MemoryStore`.

pub mod memory;

pub use memory::MemoryStore;

use ::async_trait::async_trait;
use marksheet_core::{MarksheetResult, RecordFields, RecordId, ResultRecord};

// ============================================================================
// CREDENTIAL MATCHING
// ============================================================================

/// Whether a presented credential may read a given record.
///
/// Matches when the credential equals the record's student contact or
/// guardian contact, when it equals the override code, or when the record
/// itself carries the override code in its teacher-code column. Comparison
/// is exact-string: the mobile number is a bearer secret, not an
/// authenticated identity, and a blank contact column never matches.
pub fn credential_matches(fields: &RecordFields, credential: &str, override_code: &str) -> bool {
    fields.student_contact.as_deref() == Some(credential)
        || fields.guardian_contact.as_deref() == Some(credential)
        || credential == override_code
        || fields.teacher_code.as_deref() == Some(override_code)
}

// ============================================================================
// STORE TRAIT
// ============================================================================

/// Document-store operations for result records.
///
/// Each method is an independent unit of work; implementations provide no
/// cross-call coordination. `insert_many` is best-effort: callers get only
/// whatever atomicity the backend's bulk primitive has.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Append one record per row, in row order. Returns the assigned ids.
    /// No dedup, no upsert: re-inserting the same rows duplicates them.
    async fn insert_many(&self, rows: Vec<RecordFields>) -> MarksheetResult<Vec<RecordId>>;

    /// Get a record by id.
    async fn get(&self, id: RecordId) -> MarksheetResult<Option<ResultRecord>>;

    /// Replace every field except the id. Errors with `NotFound` if the id
    /// does not exist. Returns the updated record.
    async fn replace(&self, id: RecordId, fields: RecordFields) -> MarksheetResult<ResultRecord>;

    /// Remove a record. Errors with `NotFound` if the id does not exist.
    async fn delete(&self, id: RecordId) -> MarksheetResult<()>;

    /// Every record with the given roll, in the store's natural order.
    async fn find_by_roll(&self, roll: i64) -> MarksheetResult<Vec<ResultRecord>>;

    /// First record with the given roll readable under the presented
    /// credential (see [`credential_matches`]), if any.
    async fn find_authorized(
        &self,
        roll: i64,
        credential: &str,
        override_code: &str,
    ) -> MarksheetResult<Option<ResultRecord>>;

    /// One page of records in the store's natural order.
    async fn list(&self, limit: usize, offset: usize) -> MarksheetResult<Vec<ResultRecord>>;

    /// Total number of stored records.
    async fn count(&self) -> MarksheetResult<usize>;
}
