//! Table-ready result data for structured output.
//!
//! `ResultTable` holds the same strings the printers would write, collected
//! instead of streamed, so it can be serialized to JSON or inspected.
//!
//! The data flow is:
//! 1. RowSource (cursor over a query result)
//! 2. PrintPlan (columns, types, resolved pattern)
//! 3. ResultTable (formatted strings for display)

use serde::{Deserialize, Serialize};

use crate::options::PrintOptions;
use crate::output::printer::PrintPlan;
use crate::pattern::Pattern;
use crate::source::RowSource;
use crate::Result;

/// A single data row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Display string per column, before padding
    pub values: Vec<String>,
    /// The row rendered through the pattern
    pub line: String,
}

/// A fully formatted result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTable {
    /// Source table name, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Result column names
    pub columns: Vec<String>,
    /// Resolved pattern, one specifier per column
    pub pattern: Pattern,
    /// The header rendered through the pattern
    pub header: String,
    pub rows: Vec<TableRow>,
}

impl ResultTable {
    /// Collect every remaining row of `source` through `plan`.
    pub fn collect<S: RowSource + ?Sized>(
        plan: &PrintPlan,
        source: &mut S,
        options: &PrintOptions,
    ) -> Result<Self> {
        let header = plan.header()?;
        let mut rows = Vec::new();
        while source.advance()? {
            let values = plan.row_values(&*source, options)?;
            let line = plan.pattern.apply(&values)?;
            rows.push(TableRow { values, line });
        }

        Ok(ResultTable {
            title: None,
            columns: plan.columns.clone(),
            pattern: plan.pattern.clone(),
            header,
            rows,
        })
    }

    /// Collect `source` with the default pattern bound through the table order.
    pub fn bound<S: RowSource + ?Sized>(source: &mut S, options: &PrintOptions) -> Result<Self> {
        let plan = PrintPlan::bound(&*source, options)?;
        Self::collect(&plan, source, options)
    }

    /// Collect `source` with `pattern` applied positionally.
    pub fn positional<S: RowSource + ?Sized>(
        source: &mut S,
        pattern: &Pattern,
        options: &PrintOptions,
    ) -> Result<Self> {
        let plan = PrintPlan::positional(&*source, pattern, options)?;
        Self::collect(&plan, source, options)
    }

    /// Builder: set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
