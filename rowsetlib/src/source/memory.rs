//! In-memory tables and the cursors that read them.
//!
//! A `MemoryTable` stands in for a database table: it declares its columns
//! in order and holds rows of typed values. `select` plays the part of a
//! `SELECT a, b FROM t` projection, yielding a cursor over a reordered subset.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use super::{ColumnType, RowSource, Value};
use crate::error::RowsetError;
use crate::Result;

/// Failures raised by a [`MemoryCursor`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    /// Values were read before `advance` or after the last row
    #[error("cursor is not positioned on a row")]
    NoCurrentRow,

    /// The column is not part of this result
    #[error("no column '{0}' in result")]
    UnknownColumn(String),

    /// Column index past the end of the result
    #[error("column index {0} out of range")]
    IndexOutOfRange(usize),
}

/// A column declaration: name and declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// A named table held entirely in memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryTable {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl MemoryTable {
    /// Create an empty table. Column names must be unique.
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDef>) -> Result<Self> {
        let table = Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        };
        table.validate()?;
        Ok(table)
    }

    /// Parse a table document.
    pub fn from_json(json: &str) -> Result<Self> {
        let table: MemoryTable =
            serde_json::from_str(json).map_err(|e| RowsetError::InvalidTable(e.to_string()))?;
        table.validate()?;
        Ok(table)
    }

    /// Read and parse a table document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading table");
        Self::from_json(&json)
    }

    /// Append a row. Its arity must match the column count.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        check_arity(&self.name, self.columns.len(), self.rows.len(), &row)?;
        self.rows.push(row);
        Ok(())
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Cursor over every column, in declaration order.
    pub fn scan(&self) -> MemoryCursor<'_> {
        MemoryCursor {
            table: self,
            selected: (0..self.columns.len()).collect(),
            current: None,
        }
    }

    /// Cursor over `columns`, in the order given.
    pub fn select<S: AsRef<str>>(&self, columns: &[S]) -> Result<MemoryCursor<'_>> {
        let selected = columns
            .iter()
            .map(|name| {
                self.columns
                    .iter()
                    .position(|c| c.name == name.as_ref())
                    .ok_or_else(|| RowsetError::SchemaMismatch {
                        column: name.as_ref().to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(MemoryCursor {
            table: self,
            selected,
            current: None,
        })
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(RowsetError::InvalidTable(format!(
                    "duplicate column '{}' in table '{}'",
                    column.name, self.name
                )));
            }
        }
        for (idx, row) in self.rows.iter().enumerate() {
            check_arity(&self.name, self.columns.len(), idx, row)?;
        }
        Ok(())
    }
}

fn check_arity(table: &str, expected: usize, idx: usize, row: &[Value]) -> Result<()> {
    if row.len() != expected {
        return Err(RowsetError::InvalidTable(format!(
            "row {} of table '{}' has {} values, expected {}",
            idx + 1,
            table,
            row.len(),
            expected
        )));
    }
    Ok(())
}

/// Forward-only cursor over a projection of a [`MemoryTable`].
#[derive(Debug, Clone)]
pub struct MemoryCursor<'a> {
    table: &'a MemoryTable,
    /// Table column indices, in result order
    selected: Vec<usize>,
    /// Index of the current row, once advanced
    current: Option<usize>,
}

impl MemoryCursor<'_> {
    fn current_row(&self) -> std::result::Result<&[Value], CursorError> {
        self.current
            .and_then(|idx| self.table.rows.get(idx))
            .map(Vec::as_slice)
            .ok_or(CursorError::NoCurrentRow)
    }
}

impl RowSource for MemoryCursor<'_> {
    fn column_names(&self) -> Result<Vec<String>> {
        Ok(self
            .selected
            .iter()
            .map(|&idx| self.table.columns[idx].name.clone())
            .collect())
    }

    fn column_type(&self, index: usize) -> Result<ColumnType> {
        self.selected
            .get(index)
            .map(|&idx| self.table.columns[idx].column_type)
            .ok_or_else(|| RowsetError::from_source(CursorError::IndexOutOfRange(index)))
    }

    fn table_columns(&self) -> Result<Vec<String>> {
        Ok(self.table.column_names())
    }

    fn advance(&mut self) -> Result<bool> {
        let next = self.current.map_or(0, |idx| idx + 1);
        // Park one past the end so later reads report NoCurrentRow.
        self.current = Some(next.min(self.table.rows.len()));
        Ok(next < self.table.rows.len())
    }

    fn value(&self, column: &str) -> Result<Value> {
        let table_idx = self
            .selected
            .iter()
            .copied()
            .find(|&idx| self.table.columns[idx].name == column)
            .ok_or_else(|| RowsetError::from_source(CursorError::UnknownColumn(column.into())))?;
        let row = self.current_row().map_err(RowsetError::from_source)?;
        row.get(table_idx)
            .cloned()
            .ok_or_else(|| RowsetError::from_source(CursorError::IndexOutOfRange(table_idx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comics() -> MemoryTable {
        let mut table = MemoryTable::new(
            "Comics",
            vec![
                ColumnDef::new("ComicName", ColumnType::Varchar),
                ColumnDef::new("IssueNumber", ColumnType::Integer),
                ColumnDef::new("IssueValue", ColumnType::Double),
            ],
        )
        .unwrap();
        table
            .push_row(vec!["Amazing SM".into(), 89i64.into(), 6.5f64.into()])
            .unwrap();
        table
            .push_row(vec!["Web Of SM".into(), 35i64.into(), 6.5f64.into()])
            .unwrap();
        table
    }

    #[test]
    fn test_select_reorders() {
        let table = comics();
        let cursor = table.select(&["IssueValue", "ComicName"]).unwrap();
        assert_eq!(cursor.column_names().unwrap(), vec!["IssueValue", "ComicName"]);
        assert_eq!(cursor.column_type(0).unwrap(), ColumnType::Double);
        assert_eq!(
            cursor.table_columns().unwrap(),
            vec!["ComicName", "IssueNumber", "IssueValue"]
        );
    }

    #[test]
    fn test_select_unknown_column() {
        let table = comics();
        let err = table.select(&["Publisher"]).unwrap_err();
        assert!(matches!(err, RowsetError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_iteration() {
        let table = comics();
        let mut cursor = table.select(&["ComicName"]).unwrap();
        assert!(cursor.advance().unwrap());
        assert_eq!(cursor.value("ComicName").unwrap(), Value::from("Amazing SM"));
        assert!(cursor.advance().unwrap());
        assert_eq!(cursor.value("ComicName").unwrap(), Value::from("Web Of SM"));
        assert!(!cursor.advance().unwrap());
        assert!(!cursor.advance().unwrap());
    }

    #[test]
    fn test_value_before_advance() {
        let table = comics();
        let cursor = table.scan();
        let err = cursor.value("ComicName").unwrap_err();
        assert!(matches!(err, RowsetError::Source(_)));
        assert!(err.to_string().contains("not positioned"));
    }

    #[test]
    fn test_value_outside_projection() {
        let table = comics();
        let mut cursor = table.select(&["ComicName"]).unwrap();
        cursor.advance().unwrap();
        let err = cursor.value("IssueNumber").unwrap_err();
        assert!(err.to_string().contains("no column 'IssueNumber'"));
    }

    #[test]
    fn test_push_row_arity() {
        let mut table = comics();
        assert!(table.push_row(vec![Value::Null]).is_err());
    }

    #[test]
    fn test_short_row_is_an_error() {
        let mut table = MemoryTable::new(
            "T",
            vec![
                ColumnDef::new("A", ColumnType::Varchar),
                ColumnDef::new("B", ColumnType::Varchar),
            ],
        )
        .unwrap();
        // Bypasses push_row, so the arity is never checked.
        table.rows.push(vec![Value::from("x")]);

        let mut cursor = table.select(&["B"]).unwrap();
        assert!(cursor.advance().unwrap());
        let err = cursor.value("B").unwrap_err();
        assert!(matches!(err, RowsetError::Source(_)));
        assert!(err.to_string().contains("column index 1 out of range"));
        assert_eq!(cursor.value("A").unwrap(), Value::from("x"));
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let err = MemoryTable::new(
            "T",
            vec![
                ColumnDef::new("A", ColumnType::Integer),
                ColumnDef::new("A", ColumnType::Varchar),
            ],
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate column 'A'"));
    }

    #[test]
    fn test_from_json() {
        let table = MemoryTable::from_json(
            r#"{
                "name": "Comics",
                "columns": [
                    {"name": "ComicName", "type": "varchar"},
                    {"name": "IssueValue", "type": "double"}
                ],
                "rows": [["Amazing SM", 6.5], ["Web Of SM", null]]
            }"#,
        )
        .unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1][1], Value::Null);
    }

    #[test]
    fn test_from_json_bad_arity() {
        let err = MemoryTable::from_json(
            r#"{"name": "T", "columns": [{"name": "A", "type": "int"}], "rows": [[1, 2]]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, RowsetError::InvalidTable(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        std::fs::write(
            &path,
            r#"{"name": "T", "columns": [{"name": "A", "type": "int"}], "rows": [[1]]}"#,
        )
        .unwrap();
        let table = MemoryTable::load(&path).unwrap();
        assert_eq!(table.column_names(), vec!["A"]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = MemoryTable::load("/nonexistent/table.json").unwrap_err();
        assert!(matches!(err, RowsetError::Io(_)));
    }
}
