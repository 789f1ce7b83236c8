//! In-memory result store.
//!
//! Backs the portal in tests and single-process deployments. Records live
//! in one `RwLock`-guarded table so the id map, the insertion-order list,
//! and the roll index never disagree. Insertion order is the store's
//! natural order: `list` pages over it and `find_by_roll` preserves it.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use marksheet_core::{
    MarksheetResult, RecordFields, RecordId, ResultRecord, StorageError,
};

use crate::{credential_matches, ResultStore};

#[derive(Debug, Default)]
struct Tables {
    records: HashMap<RecordId, ResultRecord>,
    /// Insertion order of live record ids.
    order: Vec<RecordId>,
    /// Secondary index: roll number to live record ids, in insertion order.
    roll_index: HashMap<i64, Vec<RecordId>>,
}

/// In-memory [`ResultStore`] backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> MarksheetResult<std::sync::RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StorageError::LockPoisoned.into())
    }

    fn write(&self) -> MarksheetResult<std::sync::RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StorageError::LockPoisoned.into())
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn insert_many(&self, rows: Vec<RecordFields>) -> MarksheetResult<Vec<RecordId>> {
        let mut tables = self.write()?;
        let mut ids = Vec::with_capacity(rows.len());

        // All rows land under one write guard, so this backend's bulk
        // insert happens to be atomic; the trait only promises best-effort.
        for fields in rows {
            let record = ResultRecord::new(fields);
            let id = record.record_id;
            tables.roll_index.entry(record.fields.roll).or_default().push(id);
            tables.order.push(id);
            tables.records.insert(id, record);
            ids.push(id);
        }

        Ok(ids)
    }

    async fn get(&self, id: RecordId) -> MarksheetResult<Option<ResultRecord>> {
        let tables = self.read()?;
        Ok(tables.records.get(&id).cloned())
    }

    async fn replace(&self, id: RecordId, fields: RecordFields) -> MarksheetResult<ResultRecord> {
        let mut tables = self.write()?;

        let old_roll = match tables.records.get(&id) {
            Some(record) => record.fields.roll,
            None => return Err(StorageError::NotFound { id }.into()),
        };

        // Keep the roll index in step when an edit moves the record to a
        // different roll.
        if old_roll != fields.roll {
            if let Some(ids) = tables.roll_index.get_mut(&old_roll) {
                ids.retain(|other| *other != id);
                if ids.is_empty() {
                    tables.roll_index.remove(&old_roll);
                }
            }
            tables.roll_index.entry(fields.roll).or_default().push(id);
        }

        let record = tables
            .records
            .get_mut(&id)
            .ok_or(StorageError::NotFound { id })?;
        record.replace_fields(fields);
        Ok(record.clone())
    }

    async fn delete(&self, id: RecordId) -> MarksheetResult<()> {
        let mut tables = self.write()?;

        let record = tables
            .records
            .remove(&id)
            .ok_or(StorageError::NotFound { id })?;

        tables.order.retain(|other| *other != id);
        if let Some(ids) = tables.roll_index.get_mut(&record.fields.roll) {
            ids.retain(|other| *other != id);
            if ids.is_empty() {
                tables.roll_index.remove(&record.fields.roll);
            }
        }

        Ok(())
    }

    async fn find_by_roll(&self, roll: i64) -> MarksheetResult<Vec<ResultRecord>> {
        let tables = self.read()?;
        let ids = match tables.roll_index.get(&roll) {
            Some(ids) => ids,
            None => return Ok(Vec::new()),
        };
        Ok(ids
            .iter()
            .filter_map(|id| tables.records.get(id))
            .cloned()
            .collect())
    }

    async fn find_authorized(
        &self,
        roll: i64,
        credential: &str,
        override_code: &str,
    ) -> MarksheetResult<Option<ResultRecord>> {
        let tables = self.read()?;
        let ids = match tables.roll_index.get(&roll) {
            Some(ids) => ids,
            None => return Ok(None),
        };
        Ok(ids
            .iter()
            .filter_map(|id| tables.records.get(id))
            .find(|record| credential_matches(&record.fields, credential, override_code))
            .cloned())
    }

    async fn list(&self, limit: usize, offset: usize) -> MarksheetResult<Vec<ResultRecord>> {
        let tables = self.read()?;
        Ok(tables
            .order
            .iter()
            .skip(offset)
            .take(limit)
            .filter_map(|id| tables.records.get(id))
            .cloned()
            .collect())
    }

    async fn count(&self) -> MarksheetResult<usize> {
        let tables = self.read()?;
        Ok(tables.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marksheet_core::{FieldValue, MarksheetError};

    fn row(roll: i64, student: &str) -> RecordFields {
        RecordFields {
            roll,
            student_contact: Some(student.to_string()),
            ..RecordFields::default()
        }
    }

    #[tokio::test]
    async fn test_insert_many_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let ids = store
            .insert_many(vec![row(1, "a"), row(1, "a"), row(2, "b")])
            .await
            .unwrap();
        assert_eq!(ids.len(), 3);
        assert_eq!(store.count().await.unwrap(), 3);

        // Re-inserting duplicates rather than upserting.
        store
            .insert_many(vec![row(1, "a")])
            .await
            .unwrap();
        assert_eq!(store.count().await.unwrap(), 4);
        assert_eq!(store.find_by_roll(1).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_get_after_insert() {
        let store = MemoryStore::new();
        let ids = store.insert_many(vec![row(7, "017")]).await.unwrap();
        let record = store.get(ids[0]).await.unwrap().unwrap();
        assert_eq!(record.fields.roll, 7);
        assert_eq!(record.fields.student_contact.as_deref(), Some("017"));
    }

    #[tokio::test]
    async fn test_replace_swaps_all_fields_and_keeps_id() {
        let store = MemoryStore::new();
        let ids = store.insert_many(vec![row(7, "017")]).await.unwrap();

        let mut next = RecordFields::for_roll(7);
        next.mark = FieldValue::Text("absent".to_string());
        let updated = store.replace(ids[0], next.clone()).await.unwrap();

        assert_eq!(updated.record_id, ids[0]);
        assert_eq!(updated.fields, next);
        // The old student contact is gone: replace is not a merge.
        assert!(updated.fields.student_contact.is_none());
    }

    #[tokio::test]
    async fn test_replace_moves_roll_index() {
        let store = MemoryStore::new();
        let ids = store.insert_many(vec![row(7, "017")]).await.unwrap();

        store.replace(ids[0], RecordFields::for_roll(8)).await.unwrap();

        assert!(store.find_by_roll(7).await.unwrap().is_empty());
        let moved = store.find_by_roll(8).await.unwrap();
        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].record_id, ids[0]);
    }

    #[tokio::test]
    async fn test_replace_missing_id_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .replace(marksheet_core::new_record_id(), RecordFields::for_roll(1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MarksheetError::Storage(StorageError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_removes_everywhere() {
        let store = MemoryStore::new();
        let ids = store
            .insert_many(vec![row(7, "a"), row(7, "b")])
            .await
            .unwrap();

        store.delete(ids[0]).await.unwrap();

        assert!(store.get(ids[0]).await.unwrap().is_none());
        assert_eq!(store.count().await.unwrap(), 1);
        let remaining = store.find_by_roll(7).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].record_id, ids[1]);

        let err = store.delete(ids[0]).await.unwrap_err();
        assert!(matches!(
            err,
            MarksheetError::Storage(StorageError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_find_by_roll_preserves_insertion_order() {
        let store = MemoryStore::new();
        let mut rows = Vec::new();
        for i in 0..5 {
            let mut fields = row(42, "017");
            fields.subject = Some(format!("Subject {}", i));
            rows.push(fields);
        }
        store.insert_many(rows).await.unwrap();

        let found = store.find_by_roll(42).await.unwrap();
        let subjects: Vec<_> = found
            .iter()
            .map(|r| r.fields.subject.clone().unwrap())
            .collect();
        assert_eq!(
            subjects,
            vec!["Subject 0", "Subject 1", "Subject 2", "Subject 3", "Subject 4"]
        );
    }

    #[tokio::test]
    async fn test_find_authorized_first_match() {
        let store = MemoryStore::new();
        store
            .insert_many(vec![row(42, "student-a"), row(42, "student-b")])
            .await
            .unwrap();

        let hit = store
            .find_authorized(42, "student-b", "@code")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(hit.fields.student_contact.as_deref(), Some("student-b"));

        assert!(store
            .find_authorized(42, "nobody", "@code")
            .await
            .unwrap()
            .is_none());
        assert!(store
            .find_authorized(999, "student-a", "@code")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_list_pages_in_insertion_order() {
        let store = MemoryStore::new();
        let ids = store
            .insert_many((0..10).map(|i| row(i, "x")).collect())
            .await
            .unwrap();

        let first = store.list(4, 0).await.unwrap();
        let second = store.list(4, 4).await.unwrap();
        let third = store.list(4, 8).await.unwrap();

        let paged: Vec<RecordId> = first
            .iter()
            .chain(second.iter())
            .chain(third.iter())
            .map(|r| r.record_id)
            .collect();
        assert_eq!(paged, ids);

        assert!(store.list(4, 12).await.unwrap().is_empty());
    }
}
