//! Property-Based Tests for Sheet Ingestion
//!
//! **Row fidelity**: for any sheet with a header row of K named columns
//! and R non-blank data rows, ingestion produces exactly R records, and
//! every cell value survives verbatim (modulo numeric coercion) under its
//! header's field.

use calamine::{Data, Range};
use marksheet_api::ingest::rows_from_range;
use marksheet_core::FieldValue;
use proptest::prelude::*;

/// Headers outside the recognized column set, so cells land in `extra`.
fn arb_header() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{2,10}".prop_filter("avoid known columns", |h| {
        ![
            "roll", "name", "batch", "student", "student_contact", "guardian",
            "guardian_contact", "mark", "neg_mark", "negative_mark", "d", "deduction",
            "position", "subject", "date", "teacher_code",
        ]
        .contains(&h.to_ascii_lowercase().as_str())
    })
}

fn arb_cell() -> impl Strategy<Value = Data> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(Data::String),
        (-1.0e6f64..1.0e6).prop_map(Data::Float),
        any::<bool>().prop_map(Data::Bool),
    ]
}

fn build_range(headers: &[String], rows: &[Vec<Data>]) -> Range<Data> {
    let mut range = Range::new((0, 0), (rows.len() as u32, headers.len() as u32 - 1));
    for (c, header) in headers.iter().enumerate() {
        range.set_value((0, c as u32), Data::String(header.clone()));
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            range.set_value((r as u32 + 1, c as u32), cell.clone());
        }
    }
    range
}

/// The coercion ingestion applies to a non-blank cell.
fn expected_value(cell: &Data) -> FieldValue {
    match cell {
        Data::String(s) => FieldValue::Text(s.clone()),
        Data::Float(f) if f.fract() == 0.0 => FieldValue::Int(*f as i64),
        Data::Float(f) => FieldValue::Float(*f),
        Data::Bool(b) => FieldValue::Bool(*b),
        _ => FieldValue::Null,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_one_record_per_row_with_fields_verbatim(
        headers in proptest::collection::hash_set(arb_header(), 1..6),
        row_count in 1usize..20,
        seed_rows in proptest::collection::vec(
            proptest::collection::vec(arb_cell(), 6),
            20,
        ),
    ) {
        let headers: Vec<String> = headers.into_iter().collect();
        let k = headers.len();
        let rows: Vec<Vec<Data>> = seed_rows[..row_count]
            .iter()
            .map(|row| row[..k].to_vec())
            .collect();

        let range = build_range(&headers, &rows);
        let records = rows_from_range(&range);

        // Exactly R records (every generated row has non-blank cells).
        prop_assert_eq!(records.len(), row_count);

        // Each record carries all K header fields verbatim in `extra`.
        for (record, row) in records.iter().zip(&rows) {
            prop_assert_eq!(record.extra.len(), k);
            for (header, cell) in headers.iter().zip(row) {
                prop_assert_eq!(
                    record.extra.get(header),
                    Some(&expected_value(cell)),
                    "field {} must survive ingestion",
                    header
                );
            }
        }
    }

    #[test]
    fn prop_reingesting_is_pure(
        rolls in proptest::collection::vec(0i64..1000, 1..15),
    ) {
        let headers = vec!["Roll".to_string()];
        let rows: Vec<Vec<Data>> = rolls.iter().map(|r| vec![Data::Float(*r as f64)]).collect();
        let range = build_range(&headers, &rows);

        // Parsing is deterministic and stateless: same sheet, same rows.
        let first = rows_from_range(&range);
        let second = rows_from_range(&range);
        prop_assert_eq!(&first, &second);
        let parsed: Vec<i64> = first.iter().map(|f| f.roll).collect();
        prop_assert_eq!(parsed, rolls);
    }
}
