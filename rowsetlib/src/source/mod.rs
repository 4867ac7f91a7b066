//! Row sources: where result sets come from.
//!
//! Printing never issues queries itself. It reads from a [`RowSource`], a
//! cursor over one query result that also knows the full column list of the
//! table the result was drawn from.
//!
//! - **RowSource**: the cursor contract the printers consume
//! - **Value / ColumnType**: typed cells and declared column types
//! - **MemoryTable**: an in-memory table (loadable from JSON) with cursors

pub mod memory;

pub use memory::{ColumnDef, CursorError, MemoryCursor, MemoryTable};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Result;

/// Declared type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[serde(alias = "int", alias = "bigint")]
    Integer,
    /// Floating point; rendered as currency
    #[serde(alias = "real", alias = "float")]
    Double,
    #[serde(alias = "text", alias = "string", alias = "char")]
    Varchar,
    #[serde(alias = "bool")]
    Boolean,
}

impl ColumnType {
    /// Whether values of this type are shown as currency.
    pub fn is_currency(&self) -> bool {
        matches!(self, ColumnType::Double)
    }
}

/// A single typed cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Real(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Integer(v) => write!(f, "{}", v),
            // Whole values keep their fractional part: `4.0`, not `4`.
            Value::Real(v) => write!(f, "{:?}", v),
            Value::Text(v) => f.write_str(v),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// A cursor over one query result.
///
/// Implementations report their own failures as [`RowsetError::Source`]
/// (see [`RowsetError::from_source`]); printers pass them through untouched.
///
/// [`RowsetError::Source`]: crate::RowsetError::Source
/// [`RowsetError::from_source`]: crate::RowsetError::from_source
pub trait RowSource {
    /// Column names of the result, in result order.
    fn column_names(&self) -> Result<Vec<String>>;

    /// Declared type of the result column at `index` (0-based).
    fn column_type(&self, index: usize) -> Result<ColumnType>;

    /// All columns of the underlying table, in declaration order.
    fn table_columns(&self) -> Result<Vec<String>>;

    /// Move to the next row. Returns `false` once the rows are exhausted.
    fn advance(&mut self) -> Result<bool>;

    /// Value of `column` in the current row.
    fn value(&self, column: &str) -> Result<Value>;
}
