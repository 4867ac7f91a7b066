//! # rowset
//!
//! Print a table through printf-style column patterns.
//!
//! ## Overview
//!
//! rowset is built on top of rowsetlib. It loads a table from a JSON document,
//! projects the requested columns and prints them with a pattern written
//! against the table's full column order.
//!
//! ## Usage
//!
//! ```bash
//! # Every column, 20 characters wide, right-aligned
//! rowset comics.json
//!
//! # A reordered subset; each column keeps the specifier written for it
//! rowset comics.json --select IssueName,ComicName --pattern "%-15s%12s%15s %-40s%13s%17s"
//!
//! # Single specifier for every column
//! rowset comics.json --width 14 --align left
//!
//! # Apply the pattern left to right instead of binding by column name
//! rowset comics.json --select ComicName,IssueValue --pattern "%-20s%10s" --positional
//!
//! # Structured output
//! rowset comics.json --output json
//! ```
//!
//! Set `RUST_LOG=rowset=debug,rowsetlib=debug` to trace pattern resolution.

mod render;

use std::process::ExitCode;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use render::{Mode, OutputFormat};
use rowsetlib::{Align, Layout, MemoryTable, Pattern, PrintOptions, StretchPolicy};
use tracing_subscriber::EnvFilter;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("rowset")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Print JSON tables through printf-style column patterns")
        .arg(
            Arg::new("table")
                .help("Path to a JSON table document")
                .required(true),
        )
        .arg(
            Arg::new("select")
                .short('s')
                .long("select")
                .value_delimiter(',')
                .help("Columns to print, in order (comma-separated; defaults to all)"),
        )
        .arg(
            Arg::new("pattern")
                .short('p')
                .long("pattern")
                .conflicts_with("width")
                .help("Format specifiers, e.g. \"%-15s%12s%15s \""),
        )
        .arg(
            Arg::new("width")
                .short('w')
                .long("width")
                .value_parser(value_parser!(usize))
                .help("Use one specifier of this width for every column"),
        )
        .arg(
            Arg::new("align")
                .short('a')
                .long("align")
                .value_parser(["left", "right"])
                .requires("width")
                .help("Alignment for --width (defaults to right)"),
        )
        .arg(
            Arg::new("positional")
                .long("positional")
                .action(ArgAction::SetTrue)
                .help("Apply the pattern left to right instead of binding by column name"),
        )
        .arg(
            Arg::new("exact")
                .long("exact")
                .action(ArgAction::SetTrue)
                .help("Stretch the pattern whenever it is shorter than the column count"),
        )
        .arg(
            Arg::new("layout")
                .short('l')
                .long("layout")
                .value_parser(["bound", "positional"])
                .help("Line layout (defaults to one row per line after a blank line)"),
        )
        .arg(
            Arg::new("null-marker")
                .long("null-marker")
                .default_value(rowsetlib::options::DEFAULT_NULL_MARKER)
                .help("Text printed for NULL values"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Output format"),
        )
}

/// Build print options from matches
fn build_options(matches: &ArgMatches) -> anyhow::Result<PrintOptions> {
    let mut options = PrintOptions::new().bold_header(console::user_attended());

    if let Some(raw) = matches.get_one::<String>("pattern") {
        let pattern = Pattern::parse(raw).with_context(|| format!("invalid pattern '{}'", raw))?;
        options = options.default_pattern(pattern);
    } else if let Some(&width) = matches.get_one::<usize>("width") {
        let align = matches
            .get_one::<String>("align")
            .map(|s| s.parse::<Align>())
            .transpose()
            .map_err(anyhow::Error::msg)?
            .unwrap_or_default();
        options = options.default_pattern_width(width, align);
    }

    if matches.get_flag("exact") {
        options = options.stretch_policy(StretchPolicy::Exact);
    }

    if let Some(layout) = matches.get_one::<String>("layout") {
        options = options.layout(layout.parse::<Layout>().map_err(anyhow::Error::msg)?);
    } else if matches.get_flag("positional") {
        options = options.layout(Layout::custom(0, "\n"));
    }

    if let Some(marker) = matches.get_one::<String>("null-marker") {
        options = options.null_marker(marker.clone());
    }

    Ok(options)
}

/// Extract the selected columns from matches
fn extract_columns(matches: &ArgMatches) -> Option<Vec<String>> {
    matches
        .get_many::<String>("select")
        .map(|v| v.cloned().collect())
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let path = matches
        .get_one::<String>("table")
        .context("missing table path")?;
    let table =
        MemoryTable::load(path).with_context(|| format!("failed to load table '{}'", path))?;
    tracing::debug!(table = %table.name, columns = table.columns.len(), rows = table.rows.len(), "loaded");

    let options = build_options(matches)?;
    let format = matches
        .get_one::<String>("output")
        .map(|s| s.parse::<OutputFormat>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();

    let mode = if matches.get_flag("positional") {
        Mode::Positional(options.default_pattern.clone())
    } else {
        Mode::Bound
    };

    let mut cursor = match extract_columns(matches) {
        Some(columns) => table.select(&columns)?,
        None => table.scan(),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render::render(&mut cursor, &table.name, &mode, &options, format, &mut out)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = build_command().get_matches();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
