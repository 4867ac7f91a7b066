//! Output: turning a result set into text.
//!
//! This module handles the final stage of a print call:
//!
//! - **value**: typed cell values to display strings (currency, NULL)
//! - **printer**: resolve a `PrintPlan` and stream header + rows to a sink
//! - **table**: the same output collected as a serializable `ResultTable`
//!
//! ## Example
//!
//! ```rust
//! use rowsetlib::output::print_bound;
//! use rowsetlib::{MemoryTable, Pattern, PrintOptions};
//!
//! let table = MemoryTable::from_json(r#"{
//!     "name": "Comics",
//!     "columns": [{"name": "ComicName", "type": "varchar"},
//!                 {"name": "IssueValue", "type": "double"}],
//!     "rows": [["Amazing SM", 6.5]]
//! }"#).unwrap();
//!
//! let mut cursor = table.select(&["IssueValue", "ComicName"]).unwrap();
//! let options = PrintOptions::new().default_pattern(Pattern::parse("%-12s%8s").unwrap());
//! let mut out = Vec::new();
//! print_bound(&mut cursor, &options, &mut out).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "IssueValueComicName   \n\n   $6.50Amazing SM  \n"
//! );
//! ```

pub mod printer;
pub mod table;
pub mod value;

pub use printer::{print_bound, print_positional, PrintPlan};
pub use table::{ResultTable, TableRow};
pub use value::{format_value, CurrencyFormat};
