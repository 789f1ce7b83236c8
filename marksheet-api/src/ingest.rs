//! Spreadsheet ingestion pipeline.
//!
//! Converts an uploaded workbook (first sheet only) into result records:
//! the first row names the fields, every later row becomes one record.
//! Known columns populate the typed record fields with tolerant coercion;
//! anything else is carried verbatim in the record's extra map. No
//! constraint is placed on column names or completeness, so a malformed
//! header silently produces malformed records.
//!
//! Ingestion is append-only and best-effort: no dedup, no upsert, and no
//! rollback beyond what the store's bulk insert itself guarantees.

use std::io::{BufReader, Cursor, Read, Seek, Write};

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use marksheet_core::{FieldValue, IngestError, RecordFields};
use tempfile::NamedTempFile;

// ============================================================================
// KNOWN COLUMNS
// ============================================================================

/// The upload sheet's recognized column set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KnownColumn {
    Roll,
    Name,
    Batch,
    Student,
    Guardian,
    Mark,
    NegativeMark,
    Deduction,
    Position,
    Subject,
    Date,
    TeacherCode,
}

/// Map a header cell to a known column, case-insensitively. The short
/// names are the ones the portal's historical sheets used.
fn known_column(header: &str) -> Option<KnownColumn> {
    match header.trim().to_ascii_lowercase().as_str() {
        "roll" => Some(KnownColumn::Roll),
        "name" => Some(KnownColumn::Name),
        "batch" => Some(KnownColumn::Batch),
        "student" | "student_contact" => Some(KnownColumn::Student),
        "guardian" | "guardian_contact" => Some(KnownColumn::Guardian),
        "mark" => Some(KnownColumn::Mark),
        "neg_mark" | "negative_mark" => Some(KnownColumn::NegativeMark),
        "d" | "deduction" => Some(KnownColumn::Deduction),
        "position" => Some(KnownColumn::Position),
        "subject" => Some(KnownColumn::Subject),
        "date" => Some(KnownColumn::Date),
        "teacher_code" => Some(KnownColumn::TeacherCode),
        _ => None,
    }
}

// ============================================================================
// CELL CONVERSION
// ============================================================================

/// Convert a sheet cell into a field value.
///
/// Whole floats become integers (workbooks store every number as a
/// float); date cells are rendered to ISO text; error cells are blank.
fn cell_value(cell: &Data) -> FieldValue {
    match cell {
        Data::Empty => FieldValue::Null,
        Data::String(s) if s.trim().is_empty() => FieldValue::Null,
        Data::String(s) => FieldValue::Text(s.clone()),
        Data::Bool(b) => FieldValue::Bool(*b),
        Data::Int(n) => FieldValue::Int(*n),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => FieldValue::Int(*f as i64),
        Data::Float(f) => FieldValue::Float(*f),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => FieldValue::Text(naive.to_string()),
            None => FieldValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => FieldValue::Text(s.clone()),
        Data::Error(_) => FieldValue::Null,
    }
}

fn header_name(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => cell_value(other).render(),
    }
}

// ============================================================================
// ROW CONVERSION
// ============================================================================

/// Build one record from a data row zipped against the header row.
/// Returns `None` for rows whose cells are all blank.
fn build_record(headers: &[String], cells: &[Data]) -> Option<RecordFields> {
    let mut fields = RecordFields::default();
    let mut populated = false;

    for (header, cell) in headers.iter().zip(cells) {
        let value = cell_value(cell);
        if value.is_null() {
            continue;
        }
        populated = true;

        match known_column(header) {
            // A missing or non-numeric Roll cell yields roll 0: the row is
            // stored as-is and simply never matches a real lookup.
            Some(KnownColumn::Roll) => fields.roll = value.coerce_i64().unwrap_or(0),
            Some(KnownColumn::Name) => fields.name = Some(value.render()),
            Some(KnownColumn::Batch) => fields.batch = Some(value.render()),
            Some(KnownColumn::Student) => fields.student_contact = Some(value.render()),
            Some(KnownColumn::Guardian) => fields.guardian_contact = Some(value.render()),
            Some(KnownColumn::Mark) => fields.mark = value,
            Some(KnownColumn::NegativeMark) => fields.negative_mark = value,
            Some(KnownColumn::Deduction) => fields.deduction = value,
            Some(KnownColumn::Position) => fields.position = value.coerce_i64(),
            Some(KnownColumn::Subject) => fields.subject = Some(value.render()),
            Some(KnownColumn::Date) => fields.exam_date = Some(value.render()),
            Some(KnownColumn::TeacherCode) => fields.teacher_code = Some(value.render()),
            None if header.is_empty() => {}
            None => {
                fields.extra.insert(header.clone(), value);
            }
        }
    }

    populated.then_some(fields)
}

/// Convert a sheet range into records: header row first, one record per
/// non-blank data row, in row order.
pub fn rows_from_range(range: &Range<Data>) -> Vec<RecordFields> {
    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(header_name).collect(),
        None => return Vec::new(),
    };

    rows.filter_map(|row| build_record(&headers, row)).collect()
}

// ============================================================================
// WORKBOOK PARSING
// ============================================================================

/// Parse the first sheet of a workbook into records.
///
/// The format (xlsx, xls, xlsb, ods) is auto-detected from the content.
pub fn parse_workbook<RS: Read + Seek>(reader: RS) -> Result<Vec<RecordFields>, IngestError> {
    let mut workbook = open_workbook_auto_from_rs(reader).map_err(|e| {
        IngestError::UnreadableWorkbook {
            reason: e.to_string(),
        }
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::NoSheets)?
        .map_err(|e| IngestError::UnreadableWorkbook {
            reason: e.to_string(),
        })?;

    Ok(rows_from_range(&range))
}

/// Parse an uploaded workbook, staging large payloads to disk first.
///
/// The staging file is a [`NamedTempFile`]: it is unlinked when the guard
/// drops, whether parsing succeeded or not.
pub fn parse_upload(bytes: &[u8], spool_threshold: usize) -> Result<Vec<RecordFields>, IngestError> {
    if bytes.len() < spool_threshold {
        return parse_workbook(Cursor::new(bytes));
    }

    let mut staged = NamedTempFile::new().map_err(|e| IngestError::StagingFailed {
        reason: e.to_string(),
    })?;
    staged
        .write_all(bytes)
        .map_err(|e| IngestError::StagingFailed {
            reason: e.to_string(),
        })?;
    let reader = staged.reopen().map_err(|e| IngestError::StagingFailed {
        reason: e.to_string(),
    })?;

    tracing::debug!(bytes = bytes.len(), "upload staged to disk for parsing");
    parse_workbook(BufReader::new(reader))
}
