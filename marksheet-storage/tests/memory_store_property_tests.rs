//! Property-Based Tests for the In-Memory Store
//!
//! **Pagination**: for any store contents and page size, page count is
//! ceil(total/size) and concatenating all pages in order yields every
//! record exactly once.
//!
//! **Credential gating**: `find_authorized` finds a record iff one of its
//! contact columns equals the credential, or the override applies.

use marksheet_core::{RecordFields, RecordId};
use marksheet_storage::{MemoryStore, ResultStore};
use proptest::prelude::*;
use tokio::runtime::Runtime;

fn test_runtime() -> Result<Runtime, TestCaseError> {
    Runtime::new().map_err(|e| TestCaseError::fail(format!("Failed to create runtime: {}", e)))
}

fn arb_row() -> impl Strategy<Value = RecordFields> {
    (0i64..50, proptest::option::of("[0-9]{11}")).prop_map(|(roll, student)| RecordFields {
        roll,
        student_contact: student,
        ..RecordFields::default()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_pagination_covers_every_record_once(
        rows in proptest::collection::vec(arb_row(), 0..60),
        page_size in 1usize..20,
    ) {
        let rt = test_runtime()?;
        rt.block_on(async {
            let store = MemoryStore::new();
            let ids = store.insert_many(rows).await.unwrap();
            let total = store.count().await.unwrap();

            let total_pages = total.div_ceil(page_size);

            let mut seen: Vec<RecordId> = Vec::new();
            for page in 0..total_pages {
                let chunk = store.list(page_size, page * page_size).await.unwrap();
                prop_assert!(!chunk.is_empty());
                prop_assert!(chunk.len() <= page_size);
                seen.extend(chunk.iter().map(|r| r.record_id));
            }

            // Every record exactly once, in insertion order.
            prop_assert_eq!(seen, ids);

            // The page after the last is empty.
            let past_end = store.list(page_size, total_pages * page_size).await.unwrap();
            prop_assert!(past_end.is_empty());
            Ok(())
        })?;
    }

    #[test]
    fn prop_find_by_roll_partitions_the_store(
        rows in proptest::collection::vec(arb_row(), 0..40),
    ) {
        let rt = test_runtime()?;
        rt.block_on(async {
            let store = MemoryStore::new();
            store.insert_many(rows.clone()).await.unwrap();

            let mut recovered = 0usize;
            for roll in 0i64..50 {
                let found = store.find_by_roll(roll).await.unwrap();
                prop_assert!(found.iter().all(|r| r.fields.roll == roll));
                recovered += found.len();
            }
            prop_assert_eq!(recovered, rows.len());
            Ok(())
        })?;
    }

    #[test]
    fn prop_find_authorized_agrees_with_contact_columns(
        rows in proptest::collection::vec(arb_row(), 1..40),
        credential in "[0-9]{11}",
    ) {
        let rt = test_runtime()?;
        rt.block_on(async {
            let store = MemoryStore::new();
            store.insert_many(rows.clone()).await.unwrap();

            for roll in 0i64..50 {
                let hit = store
                    .find_authorized(roll, &credential, "@override")
                    .await
                    .unwrap();
                let expected = rows.iter().any(|r| {
                    r.roll == roll && r.student_contact.as_deref() == Some(credential.as_str())
                });
                prop_assert_eq!(hit.is_some(), expected);
            }
            Ok(())
        })?;
    }
}
