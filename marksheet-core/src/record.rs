//! Result record structures
//!
//! A `ResultRecord` is one row of subject-level score data tied to a roll
//! number. The record body (`RecordFields`) is the unit of both bulk
//! insertion and full-field replacement: everything except the
//! store-assigned id.

use std::collections::BTreeMap;
use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{new_record_id, RecordId, Timestamp};

// ============================================================================
// FIELD VALUES
// ============================================================================

/// A single document-store cell scalar.
///
/// Score columns are carried as `FieldValue` rather than `f64` because the
/// admin replace operation performs no per-field validation: a numeric
/// column may legitimately hold text after an edit. Spreadsheet cells
/// outside the known column set are carried verbatim as well.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Absent or blank cell.
    #[default]
    Null,
    /// Boolean cell.
    Bool(bool),
    /// Integer cell. Listed before `Float` so untagged deserialization
    /// keeps whole numbers integral.
    Int(i64),
    /// Floating-point cell.
    Float(f64),
    /// Text cell.
    Text(String),
}

impl FieldValue {
    /// Whether this cell is blank.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Borrow the text content, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Coerce to an integer. Text cells are parsed; floats must be whole.
    pub fn coerce_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            FieldValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Coerce to a float. Text cells are parsed.
    pub fn coerce_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(n) => Some(*n as f64),
            FieldValue::Float(f) => Some(*f),
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Render the cell the way it would appear in a sheet. Blank for null.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Int(n)
    }
}

impl From<f64> for FieldValue {
    fn from(x: f64) -> Self {
        FieldValue::Float(x)
    }
}

// ============================================================================
// RECORD FIELDS
// ============================================================================

/// Everything on a result record except the store-assigned id.
///
/// The known columns match the upload sheet the portal consumes; columns
/// outside that set survive ingestion and edits untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RecordFields {
    /// Student roll number. Not unique alone: a student has one row per
    /// subject sitting, all sharing the roll. A document missing its roll
    /// deserializes to 0, the same sentinel malformed sheet rows get.
    #[serde(default)]
    pub roll: i64,
    /// Student name, duplicated across that student's rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Batch label, duplicated across that student's rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,
    /// Student mobile number, used as a shared-secret credential.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_contact: Option<String>,
    /// Guardian mobile number, used as a shared-secret credential.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian_contact: Option<String>,
    /// Obtained mark.
    #[serde(default, skip_serializing_if = "FieldValue::is_null")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub mark: FieldValue,
    /// Negative marking applied.
    #[serde(default, skip_serializing_if = "FieldValue::is_null")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub negative_mark: FieldValue,
    /// Deduction applied.
    #[serde(default, skip_serializing_if = "FieldValue::is_null")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub deduction: FieldValue,
    /// Rank within the sitting, when assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    /// Subject of the sitting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Date label of the sitting. Carried as sheet text, not parsed.
    #[serde(rename = "date", skip_serializing_if = "Option::is_none")]
    pub exam_date: Option<String>,
    /// Per-record override grant: a record carrying the configured override
    /// code here is readable with any credential.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_code: Option<String>,
    /// Sheet columns outside the known set, header name mapped to cell
    /// value verbatim.
    #[serde(flatten)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub extra: BTreeMap<String, FieldValue>,
}

impl RecordFields {
    /// Minimal well-formed fields for a roll. Mostly a test convenience.
    pub fn for_roll(roll: i64) -> Self {
        Self {
            roll,
            ..Self::default()
        }
    }
}

// ============================================================================
// RESULT RECORD
// ============================================================================

/// One stored result row: store-assigned id plus the record body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ResultRecord {
    /// Store-assigned unique identifier, immutable after insertion.
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub record_id: RecordId,
    /// The record body. Flattened so the wire shape is one flat document.
    #[serde(flatten)]
    pub fields: RecordFields,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub updated_at: Timestamp,
}

impl ResultRecord {
    /// Create a record from its body, assigning a fresh id and timestamps.
    pub fn new(fields: RecordFields) -> Self {
        let now = Utc::now();
        Self {
            record_id: new_record_id(),
            fields,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every field except the id, refreshing `updated_at`.
    pub fn replace_fields(&mut self, fields: RecordFields) {
        self.fields = fields;
        self.updated_at = Utc::now();
    }

    /// Project the record down to the public basic-info view.
    pub fn basic_info(&self) -> BasicInfo {
        BasicInfo {
            name: self.fields.name.clone(),
            roll: self.fields.roll,
            batch: self.fields.batch.clone(),
        }
    }
}

// ============================================================================
// BASIC INFO PROJECTION
// ============================================================================

/// Public projection of a record: descriptive fields only, never scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BasicInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub roll: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,
}
