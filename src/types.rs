//! Common types for query results

use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};

/// A query result bundle: column ordering, rows, and the foreign keys
/// of the table that was queried. All three are produced by one query
/// and are only consistent with each other for that result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowSet {
    pub table: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl RowSet {
    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Foreign key on the given column, if any
    pub fn foreign_key(&self, column: &str) -> Option<&ForeignKey> {
        self.foreign_keys.iter().find(|fk| fk.from_column == column)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Table row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    pub values: Vec<CellValue>,
}

/// Cell value, mirroring SQLite's storage classes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Text form used for display and CSV export. Nulls render empty,
    /// blobs render as a byte-count placeholder instead of raw content.
    pub fn display(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Real(r) => r.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Blob(b) => format!("[{} bytes]", b.len()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Parse a user-supplied filter argument: integers and reals are
    /// recognized, everything else stays text.
    pub fn from_literal(s: &str) -> Self {
        if let Ok(i) = s.parse::<i64>() {
            CellValue::Integer(i)
        } else if let Ok(r) = s.parse::<f64>() {
            CellValue::Real(r)
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

impl From<ValueRef<'_>> for CellValue {
    fn from(v: ValueRef<'_>) -> Self {
        match v {
            ValueRef::Null => CellValue::Null,
            ValueRef::Integer(i) => CellValue::Integer(i),
            ValueRef::Real(r) => CellValue::Real(r),
            ValueRef::Text(t) => CellValue::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => CellValue::Blob(b.to_vec()),
        }
    }
}

impl ToSql for CellValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            CellValue::Null => Ok(ToSqlOutput::from(rusqlite::types::Null)),
            CellValue::Integer(i) => i.to_sql(),
            CellValue::Real(r) => r.to_sql(),
            CellValue::Text(s) => s.to_sql(),
            CellValue::Blob(b) => b.to_sql(),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// A directional reference from one table's column to another table's
/// column. Navigation follows it forward only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub from_column: String,
    pub target_table: String,
    pub target_column: String,
}

/// Database file statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbStats {
    pub file_size: u64,
    pub table_count: usize,
    pub total_rows: usize,
    pub largest_table: String,
    pub largest_table_rows: usize,
}
