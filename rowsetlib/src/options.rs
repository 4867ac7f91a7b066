//! Print configuration.
//!
//! Everything a print call needs besides the row source travels in a
//! [`PrintOptions`] value, built with chained setters:
//!
//! ```rust
//! use rowsetlib::{Align, Layout, PrintOptions, StretchPolicy};
//!
//! let options = PrintOptions::new()
//!     .default_pattern_width(12, Align::Left)
//!     .stretch_policy(StretchPolicy::Exact)
//!     .layout(Layout::positional());
//! assert_eq!(options.default_pattern.to_string(), "%-12s");
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::output::value::CurrencyFormat;
use crate::pattern::{Align, Pattern, StretchPolicy};

/// Width of the built-in default specifier.
pub const DEFAULT_WIDTH: usize = 20;

/// Marker printed in place of absent values.
pub const DEFAULT_NULL_MARKER: &str = "null";

/// Line structure of printed output.
///
/// The header line always ends with a newline; `blank_lines` empty lines
/// follow it, and each data row is followed by `row_terminator`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub blank_lines: usize,
    pub row_terminator: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self::bound()
    }
}

impl Layout {
    /// One blank line after the header, one row per line.
    pub fn bound() -> Self {
        Self {
            blank_lines: 1,
            row_terminator: "\n".to_string(),
        }
    }

    /// Header on its own line, rows written back to back.
    pub fn positional() -> Self {
        Self {
            blank_lines: 0,
            row_terminator: String::new(),
        }
    }

    pub fn custom(blank_lines: usize, row_terminator: impl Into<String>) -> Self {
        Self {
            blank_lines,
            row_terminator: row_terminator.into(),
        }
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bound" | "lines" => Ok(Layout::bound()),
            "positional" | "packed" => Ok(Layout::positional()),
            _ => Err(format!("Unknown layout: {}", s)),
        }
    }
}

/// Options for a single print call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintOptions {
    /// Pattern written against the table's declaration order
    pub default_pattern: Pattern,
    /// How short patterns are stretched
    pub stretch_policy: StretchPolicy,
    pub layout: Layout,
    /// Printed for NULL values
    pub null_marker: String,
    /// Convention for currency columns
    pub currency: CurrencyFormat,
    /// Embolden the header line
    pub bold_header: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            default_pattern: Pattern::single(DEFAULT_WIDTH, Align::Right),
            stretch_policy: StretchPolicy::default(),
            layout: Layout::default(),
            null_marker: DEFAULT_NULL_MARKER.to_string(),
            currency: CurrencyFormat::default(),
            bold_header: false,
        }
    }
}

impl PrintOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `pattern` as the default pattern.
    pub fn default_pattern(mut self, pattern: Pattern) -> Self {
        self.default_pattern = pattern;
        self
    }

    /// Use a single `%[-]{width}s` specifier as the default pattern.
    pub fn default_pattern_width(mut self, width: usize, align: Align) -> Self {
        self.default_pattern = Pattern::single(width, align);
        self
    }

    pub fn stretch_policy(mut self, policy: StretchPolicy) -> Self {
        self.stretch_policy = policy;
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn null_marker(mut self, marker: impl Into<String>) -> Self {
        self.null_marker = marker.into();
        self
    }

    pub fn currency(mut self, currency: CurrencyFormat) -> Self {
        self.currency = currency;
        self
    }

    pub fn bold_header(mut self, bold: bool) -> Self {
        self.bold_header = bold;
        self
    }
}
