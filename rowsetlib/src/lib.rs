//! # rowsetlib
//!
//! Console formatting for tabular query results, driven by printf-style
//! column patterns such as `"%-15s%12s%15s %-40s"`.
//!
//! ## Overview
//!
//! A pattern is written once, against a table's full column order. Queries
//! then select any subset of those columns, in any order, and each selected
//! column still gets the specifier written for it:
//!
//! - **Stretching**: a pattern with fewer specifiers than columns is repeated
//!   to cover them (`%20s` covers any number of columns)
//! - **Binding**: result columns are looked up in the table's declaration
//!   order, so `SELECT c, a` picks the third and first specifiers
//! - **Value formatting**: currency columns render as `$1,234.50`, NULLs as a
//!   configurable marker
//! - **Pure data in, text out**: rows come from any [`RowSource`]; output goes
//!   to any `std::io::Write`
//!
//! ## Example
//!
//! ```rust
//! use rowsetlib::{print_bound, Align, MemoryTable, PrintOptions};
//!
//! let table = MemoryTable::from_json(r#"{
//!     "name": "Comics",
//!     "columns": [{"name": "ComicName", "type": "varchar"},
//!                 {"name": "IssueNumber", "type": "int"}],
//!     "rows": [["Amazing SM", 89], ["Web Of SM", 35]]
//! }"#).unwrap();
//!
//! let mut cursor = table.select(&["IssueNumber", "ComicName"]).unwrap();
//! let options = PrintOptions::new().default_pattern_width(12, Align::Left);
//! let mut out = Vec::new();
//! let rows = print_bound(&mut cursor, &options, &mut out).unwrap();
//! assert_eq!(rows, 2);
//! ```

pub mod binding;
pub mod error;
pub mod options;
pub mod output;
pub mod pattern;
pub mod source;

pub use binding::{bind, render, ColumnBinding};
pub use error::{RowsetError, SourceError};
pub use options::{Layout, PrintOptions};
pub use output::{
    format_value, print_bound, print_positional, CurrencyFormat, PrintPlan, ResultTable, TableRow,
};
pub use pattern::{stretch, stretch_with, Align, Pattern, Specifier, StretchPolicy};
pub use source::{ColumnDef, ColumnType, MemoryCursor, MemoryTable, RowSource, Value};

/// Result type for rowsetlib operations
pub type Result<T> = std::result::Result<T, RowsetError>;
