//! Output rendering for the CLI: streamed text or a JSON document.

use std::io::Write;
use std::str::FromStr;

use anyhow::Context;
use rowsetlib::{print_bound, print_positional, MemoryCursor, Pattern, PrintOptions, ResultTable};

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Header and rows through the pattern
    #[default]
    Text,
    /// A `ResultTable` as pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "table" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Which printer to drive.
#[derive(Debug, Clone)]
pub enum Mode {
    /// Bind the default pattern through the table's column order
    Bound,
    /// Apply this pattern left to right
    Positional(Pattern),
}

/// Render `cursor` in `format` to `out`.
pub fn render(
    cursor: &mut MemoryCursor<'_>,
    title: &str,
    mode: &Mode,
    options: &PrintOptions,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            let rows = match mode {
                Mode::Bound => print_bound(cursor, options, out),
                Mode::Positional(pattern) => print_positional(cursor, pattern, options, out),
            }
            .with_context(|| format!("failed to print table '{}'", title))?;
            tracing::info!(rows, table = title, "printed");
        }
        OutputFormat::Json => {
            let table = match mode {
                Mode::Bound => ResultTable::bound(cursor, options),
                Mode::Positional(pattern) => ResultTable::positional(cursor, pattern, options),
            }
            .with_context(|| format!("failed to format table '{}'", title))?
            .with_title(title);
            serde_json::to_writer_pretty(&mut *out, &table)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
