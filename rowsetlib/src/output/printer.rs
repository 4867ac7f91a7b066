//! Writing result sets to an output sink.
//!
//! Two printers cover the two ways a pattern can be matched to a result:
//!
//! - [`print_positional`]: the given pattern is stretched to the result's
//!   column count and applied left to right, ignoring the table schema.
//! - [`print_bound`]: the default pattern is read as describing the table's
//!   full column order, then bound to whichever columns the result selected.
//!
//! Both resolve a [`PrintPlan`] first, so a schema mismatch or a malformed
//! specifier is reported before anything is written. Once rows start flowing,
//! a failure stops the print and leaves the rows already written in place.

use std::io::Write;
use std::time::Instant;

use crate::binding::{bind, render};
use crate::error::RowsetError;
use crate::options::PrintOptions;
use crate::output::value::format_value;
use crate::pattern::{stretch_with, Pattern};
use crate::source::{ColumnType, RowSource};
use crate::Result;

/// Everything resolved about a result before its rows are read.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintPlan {
    /// Result column names, in result order
    pub columns: Vec<String>,
    /// Declared type per result column
    pub types: Vec<ColumnType>,
    /// One specifier per result column (or the stretched pattern, positionally)
    pub pattern: Pattern,
}

impl PrintPlan {
    /// Stretch `pattern` over the result's columns, positionally.
    pub fn positional<S: RowSource + ?Sized>(
        source: &S,
        pattern: &Pattern,
        options: &PrintOptions,
    ) -> Result<Self> {
        if pattern.is_empty() {
            return Err(RowsetError::EmptyPattern);
        }
        let columns = source.column_names()?;
        let types = column_types(source, columns.len())?;
        let pattern = stretch_with(pattern.clone(), columns.len(), options.stretch_policy);
        Ok(Self {
            columns,
            types,
            pattern,
        })
    }

    /// Bind the default pattern to the result through the table's column order.
    pub fn bound<S: RowSource + ?Sized>(source: &S, options: &PrintOptions) -> Result<Self> {
        if options.default_pattern.is_empty() {
            return Err(RowsetError::EmptyPattern);
        }
        let columns = source.column_names()?;
        let absolute = source.table_columns()?;
        let types = column_types(source, columns.len())?;

        let specifiers = stretch_with(
            options.default_pattern.clone(),
            absolute.len(),
            options.stretch_policy,
        );
        let binding = bind(&columns, &absolute, &specifiers)?;
        let pattern = render(&columns, &binding)?;

        tracing::debug!(
            table_columns = absolute.len(),
            result_columns = columns.len(),
            pattern = %pattern,
            "resolved bound pattern"
        );

        Ok(Self {
            columns,
            types,
            pattern,
        })
    }

    /// The column names rendered through the plan's pattern.
    pub fn header(&self) -> Result<String> {
        self.pattern.apply(&self.columns)
    }

    /// Display strings for the source's current row.
    pub fn row_values<S: RowSource + ?Sized>(
        &self,
        source: &S,
        options: &PrintOptions,
    ) -> Result<Vec<String>> {
        self.columns
            .iter()
            .zip(&self.types)
            .map(|(column, &column_type)| {
                let value = source.value(column)?;
                Ok(format_value(
                    column_type,
                    &value,
                    &options.currency,
                    &options.null_marker,
                ))
            })
            .collect()
    }

    /// Write the header, then every remaining row of `source`.
    ///
    /// Returns the number of rows written.
    pub fn write<S, W>(&self, source: &mut S, options: &PrintOptions, out: &mut W) -> Result<usize>
    where
        S: RowSource + ?Sized,
        W: Write + ?Sized,
    {
        let started = Instant::now();
        let header = self.header()?;

        if options.bold_header {
            writeln!(out, "{}", console::style(header).bold())?;
        } else {
            writeln!(out, "{}", header)?;
        }
        for _ in 0..options.layout.blank_lines {
            writeln!(out)?;
        }

        let mut rows = 0;
        while source.advance()? {
            let values = self.row_values(&*source, options)?;
            let line = self.pattern.apply(&values)?;
            out.write_all(line.as_bytes())?;
            out.write_all(options.layout.row_terminator.as_bytes())?;
            rows += 1;
            tracing::trace!(row = rows, "wrote row");
        }
        out.flush()?;

        tracing::debug!(
            rows,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "printed result set"
        );
        Ok(rows)
    }
}

fn column_types<S: RowSource + ?Sized>(source: &S, count: usize) -> Result<Vec<ColumnType>> {
    (0..count).map(|idx| source.column_type(idx)).collect()
}

/// Print `source` with `pattern` applied positionally.
///
/// The pattern is stretched to the result's column count according to
/// `options.stretch_policy`; `options.default_pattern` is not consulted.
pub fn print_positional<S, W>(
    source: &mut S,
    pattern: &Pattern,
    options: &PrintOptions,
    out: &mut W,
) -> Result<usize>
where
    S: RowSource + ?Sized,
    W: Write + ?Sized,
{
    let plan = PrintPlan::positional(&*source, pattern, options)?;
    plan.write(source, options, out)
}

/// Print `source` with `options.default_pattern` bound through the table's
/// column order.
pub fn print_bound<S, W>(source: &mut S, options: &PrintOptions, out: &mut W) -> Result<usize>
where
    S: RowSource + ?Sized,
    W: Write + ?Sized,
{
    let plan = PrintPlan::bound(&*source, options)?;
    plan.write(source, options, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RowsetError;
    use crate::options::Layout;
    use crate::pattern::Align;
    use crate::source::{ColumnDef, MemoryTable, Value};

    fn comics() -> MemoryTable {
        MemoryTable::from_json(
            r#"{
                "name": "Comics",
                "columns": [
                    {"name": "ComicName", "type": "varchar"},
                    {"name": "IssueNumber", "type": "int"},
                    {"name": "IssueDate", "type": "varchar"},
                    {"name": "IssueName", "type": "varchar"},
                    {"name": "IssueValue", "type": "double"},
                    {"name": "MintCondition", "type": "varchar"}
                ],
                "rows": [
                    ["Amazing SM", 89, "10/1/70", "Doc Ock Lives", 6.50, "No"],
                    ["Spectacular SM", 92, "7/1/84", "What Is The Answer", 4.50, "No"],
                    ["Web Of SM", 35, "2/1/88", "You Can Go Home Again", 6.50, "No"],
                    ["Amazing SM", 382, "10/1/93", "Emerald Rage", 4.00, "Yes"]
                ]
            }"#,
        )
        .unwrap()
    }

    fn partitioned() -> Pattern {
        Pattern::parse("%-15s%12s%15s %-40s%13s%17s").unwrap()
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_bound_end_to_end() {
        let table = comics();
        let mut cursor = table
            .select(&["ComicName", "IssueDate", "IssueNumber", "IssueValue"])
            .unwrap();
        let options = PrintOptions::new().default_pattern(partitioned());
        let mut buf = Vec::new();

        let rows = print_bound(&mut cursor, &options, &mut buf).unwrap();
        assert_eq!(rows, 4);

        let text = output(buf);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        // ComicName %-15s, IssueDate "%15s ", IssueNumber %12s, IssueValue %13s
        assert_eq!(
            lines[0],
            format!(
                "{:<15}{:>15} {:>12}{:>13}",
                "ComicName", "IssueDate", "IssueNumber", "IssueValue"
            )
        );
        assert_eq!(lines[1], "");
        assert_eq!(
            lines[2],
            format!("{:<15}{:>15} {:>12}{:>13}", "Amazing SM", "10/1/70", "89", "$6.50")
        );
        assert_eq!(
            lines[5],
            format!("{:<15}{:>15} {:>12}{:>13}", "Amazing SM", "10/1/93", "382", "$4.00")
        );
        for line in &lines[2..] {
            assert_eq!(line.len(), lines[0].len());
        }
    }

    #[test]
    fn test_bound_second_query() {
        let table = comics();
        let mut cursor = table
            .select(&["IssueName", "ComicName", "IssueNumber", "IssueDate"])
            .unwrap();
        let options = PrintOptions::new().default_pattern(partitioned());
        let mut buf = Vec::new();
        print_bound(&mut cursor, &options, &mut buf).unwrap();

        let text = output(buf);
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            format!(
                "{:<40}{:<15}{:>12}{:>15} ",
                "IssueName", "ComicName", "IssueNumber", "IssueDate"
            )
        );
    }

    #[test]
    fn test_bound_with_single_default_specifier() {
        let table = comics();
        let mut cursor = table.select(&["MintCondition", "ComicName"]).unwrap();
        let options = PrintOptions::new().default_pattern_width(6, Align::Left);
        let mut buf = Vec::new();
        print_bound(&mut cursor, &options, &mut buf).unwrap();

        let text = output(buf);
        assert!(text.starts_with("MintConditionComicName\n\nNo    Amazing SM\n"));
    }

    #[test]
    fn test_unknown_column_writes_nothing() {
        let table = comics();
        let narrow = MemoryTable::new("Narrow", vec![ColumnDef::new("ComicName", ColumnType::Varchar)])
            .unwrap();
        // A cursor whose result columns are not in the table it claims.
        struct Mismatched<'a> {
            inner: crate::source::MemoryCursor<'a>,
            table: &'a MemoryTable,
        }
        impl RowSource for Mismatched<'_> {
            fn column_names(&self) -> Result<Vec<String>> {
                self.inner.column_names()
            }
            fn column_type(&self, index: usize) -> Result<ColumnType> {
                self.inner.column_type(index)
            }
            fn table_columns(&self) -> Result<Vec<String>> {
                Ok(self.table.column_names())
            }
            fn advance(&mut self) -> Result<bool> {
                self.inner.advance()
            }
            fn value(&self, column: &str) -> Result<Value> {
                self.inner.value(column)
            }
        }

        let mut source = Mismatched {
            inner: table.select(&["ComicName", "IssueValue"]).unwrap(),
            table: &narrow,
        };
        let mut buf = Vec::new();
        let err = print_bound(&mut source, &PrintOptions::new(), &mut buf).unwrap_err();
        assert!(matches!(err, RowsetError::SchemaMismatch { ref column } if column == "IssueValue"));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_legacy_stretch_too_short_for_table() {
        // 6 table columns over a 4-specifier pattern: 4 <= 6 < 8, so the
        // pattern is not stretched and IssueValue (position 5) has no specifier.
        let table = comics();
        let mut cursor = table.select(&["IssueValue"]).unwrap();
        let options =
            PrintOptions::new().default_pattern(Pattern::parse("%5s%5s%5s%5s").unwrap());
        let mut buf = Vec::new();
        let err = print_bound(&mut cursor, &options, &mut buf).unwrap_err();
        assert!(matches!(err, RowsetError::PatternTooShort { required: 5, .. }));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_exact_stretch_covers_table() {
        let table = comics();
        let mut cursor = table.select(&["IssueValue"]).unwrap();
        let options = PrintOptions::new()
            .default_pattern(Pattern::parse("%5s%6s%7s%8s").unwrap())
            .stretch_policy(crate::pattern::StretchPolicy::Exact);
        let mut buf = Vec::new();
        print_bound(&mut cursor, &options, &mut buf).unwrap();
        // Position 5 wraps around to the first specifier.
        assert!(output(buf).starts_with("IssueValue\n\n$6.50\n"));
    }

    #[test]
    fn test_positional_layout() {
        let table = comics();
        let mut cursor = table.select(&["ComicName", "IssueNumber"]).unwrap();
        let options = PrintOptions::new().layout(Layout::positional());
        let mut buf = Vec::new();
        print_positional(&mut cursor, &Pattern::parse("%-15s%5s").unwrap(), &options, &mut buf)
            .unwrap();

        let text = output(buf);
        let mut expected = format!("{:<15}{:>5}\n", "ComicName", "IssueNumber");
        expected.push_str(&format!("{:<15}{:>5}", "Amazing SM", "89"));
        expected.push_str(&format!("{:<15}{:>5}", "Spectacular SM", "92"));
        expected.push_str(&format!("{:<15}{:>5}", "Web Of SM", "35"));
        expected.push_str(&format!("{:<15}{:>5}", "Amazing SM", "382"));
        assert_eq!(text, expected);
    }

    #[test]
    fn test_positional_stretches_single_specifier() {
        let table = comics();
        let mut cursor = table.scan();
        let mut buf = Vec::new();
        print_positional(
            &mut cursor,
            &Pattern::single(22, Align::Right),
            &PrintOptions::new(),
            &mut buf,
        )
        .unwrap();
        let text = output(buf);
        assert_eq!(text.lines().next().unwrap().len(), 22 * 6);
    }

    #[test]
    fn test_positional_pattern_longer_than_result() {
        let table = comics();
        let mut cursor = table.select(&["ComicName"]).unwrap();
        let mut buf = Vec::new();
        let err = print_positional(&mut cursor, &partitioned(), &PrintOptions::new(), &mut buf)
            .unwrap_err();
        assert!(matches!(err, RowsetError::MissingValue { position: 2, .. }));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_empty_pattern_writes_nothing() {
        let table = comics();
        let empty: Pattern = std::iter::empty().collect();
        let mut buf = Vec::new();

        let err = print_positional(&mut table.scan(), &empty, &PrintOptions::new(), &mut buf)
            .unwrap_err();
        assert!(matches!(err, RowsetError::EmptyPattern));

        let options = PrintOptions::new().default_pattern(empty);
        let err = print_bound(&mut table.scan(), &options, &mut buf).unwrap_err();
        assert!(matches!(err, RowsetError::EmptyPattern));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_invalid_specifier_surfaces_on_use() {
        let table = comics();
        let mut cursor = table.select(&["ComicName"]).unwrap();
        let options = PrintOptions::new().default_pattern(Pattern::parse("%20").unwrap());
        let mut buf = Vec::new();
        let err = print_bound(&mut cursor, &options, &mut buf).unwrap_err();
        assert!(matches!(err, RowsetError::InvalidSpecifier { .. }));
    }

    #[test]
    fn test_null_marker() {
        let table = MemoryTable::from_json(
            r#"{"name": "T",
                "columns": [{"name": "A", "type": "varchar"}, {"name": "V", "type": "double"}],
                "rows": [[null, null]]}"#,
        )
        .unwrap();
        let mut cursor = table.scan();
        let options = PrintOptions::new()
            .default_pattern(Pattern::parse("%-4s%4s").unwrap())
            .null_marker("-");
        let mut buf = Vec::new();
        print_bound(&mut cursor, &options, &mut buf).unwrap();
        assert_eq!(output(buf), "A      V\n\n-      -\n");
    }

    #[test]
    fn test_source_failure_keeps_written_rows() {
        struct Flaky {
            served: usize,
        }
        impl RowSource for Flaky {
            fn column_names(&self) -> Result<Vec<String>> {
                Ok(vec!["N".to_string()])
            }
            fn column_type(&self, _index: usize) -> Result<ColumnType> {
                Ok(ColumnType::Integer)
            }
            fn table_columns(&self) -> Result<Vec<String>> {
                Ok(vec!["N".to_string()])
            }
            fn advance(&mut self) -> Result<bool> {
                if self.served == 2 {
                    let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "gone");
                    return Err(RowsetError::from_source(io));
                }
                self.served += 1;
                Ok(true)
            }
            fn value(&self, _column: &str) -> Result<Value> {
                Ok(Value::Integer(self.served as i64))
            }
        }

        let mut source = Flaky { served: 0 };
        let options = PrintOptions::new().default_pattern_width(3, Align::Right);
        let mut buf = Vec::new();
        let err = print_bound(&mut source, &options, &mut buf).unwrap_err();
        assert!(matches!(err, RowsetError::Source(_)));
        assert_eq!(output(buf), "  N\n\n  1\n  2\n");
    }

    #[test]
    fn test_dyn_source() {
        let table = comics();
        let mut cursor = table.select(&["IssueNumber"]).unwrap();
        let source: &mut dyn RowSource = &mut cursor;
        let mut buf = Vec::new();
        let rows = print_bound(
            source,
            &PrintOptions::new().default_pattern_width(4, Align::Right),
            &mut buf,
        )
        .unwrap();
        assert_eq!(rows, 4);
    }

    #[test]
    fn test_plan_is_stable() {
        let table = comics();
        let cursor = table.select(&["IssueValue", "ComicName"]).unwrap();
        let options = PrintOptions::new().default_pattern(partitioned());
        let first = PrintPlan::bound(&cursor, &options).unwrap();
        let second = PrintPlan::bound(&cursor, &options).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.pattern.to_string(), "%13s%-15s");
    }
}
