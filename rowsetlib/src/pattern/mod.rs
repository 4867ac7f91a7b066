//! Format patterns: ordered sequences of column specifiers.
//!
//! A pattern string such as `"%-15s%12s%15s "` is split on the `%` marker into
//! one [`Specifier`] per column. Everything from one marker up to the next
//! belongs to the same specifier, so literal text after a field (the trailing
//! space in `%15s `) travels with it when columns are reordered.
//!
//! - **Specifier**: one column's directive, parsed lazily on use
//! - **Pattern**: the ordered specifier sequence, applied positionally to values
//! - **stretch**: repeat a short pattern to cover more columns

pub mod specifier;
pub mod stretch;

pub use specifier::{Align, Directive, Specifier, MARKER};
pub use stretch::{stretch, stretch_with, StretchPolicy};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RowsetError;
use crate::Result;

/// An ordered sequence of specifiers covering a set of columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Pattern {
    specifiers: Vec<Specifier>,
}

impl Pattern {
    /// Split a raw pattern string into specifiers.
    ///
    /// Only the split happens here; each specifier is validated when applied.
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(Pattern {
            specifiers: lex(raw)?,
        })
    }

    /// A pattern holding one `%[-]{width}s` specifier.
    pub fn single(width: usize, align: Align) -> Self {
        Pattern {
            specifiers: vec![Specifier::new(width, align)],
        }
    }

    /// Build a pattern from already-split specifiers.
    pub fn from_specifiers(specifiers: Vec<Specifier>) -> Result<Self> {
        if specifiers.is_empty() {
            return Err(RowsetError::EmptyPattern);
        }
        Ok(Pattern { specifiers })
    }

    pub fn len(&self) -> usize {
        self.specifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specifiers.is_empty()
    }

    pub fn specifiers(&self) -> &[Specifier] {
        &self.specifiers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Specifier> {
        self.specifiers.iter()
    }

    /// Parse every specifier up front.
    pub fn directives(&self) -> Result<Vec<Directive>> {
        self.specifiers.iter().map(Specifier::directive).collect()
    }

    /// Render `values` positionally: specifier `i` formats value `i`.
    ///
    /// Values beyond the pattern's length are ignored. A specifier without a
    /// value is an error.
    pub fn apply<S: AsRef<str>>(&self, values: &[S]) -> Result<String> {
        let mut out = String::new();
        for (position, spec) in self.specifiers.iter().enumerate() {
            let value = values.get(position).ok_or_else(|| RowsetError::MissingValue {
                position: position + 1,
                specifier: spec.to_string(),
            })?;
            out.push_str(&spec.apply(value.as_ref())?);
        }
        Ok(out)
    }

    pub(crate) fn into_specifiers(self) -> Vec<Specifier> {
        self.specifiers
    }
}

impl FromIterator<Specifier> for Pattern {
    fn from_iter<I: IntoIterator<Item = Specifier>>(iter: I) -> Self {
        Pattern {
            specifiers: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Pattern {
    type Item = &'a Specifier;
    type IntoIter = std::slice::Iter<'a, Specifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.specifiers.iter()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for spec in &self.specifiers {
            f.write_str(spec.as_str())?;
        }
        Ok(())
    }
}

impl FromStr for Pattern {
    type Err = RowsetError;

    fn from_str(s: &str) -> Result<Self> {
        Pattern::parse(s)
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.to_string()
    }
}

impl TryFrom<String> for Pattern {
    type Error = RowsetError;

    fn try_from(raw: String) -> Result<Self> {
        Pattern::parse(&raw)
    }
}

/// Split `raw` at every `%` marker, keeping the marker with the token it starts.
fn lex(raw: &str) -> Result<Vec<Specifier>> {
    if raw.is_empty() {
        return Err(RowsetError::EmptyPattern);
    }
    if !raw.starts_with(MARKER) {
        return Err(RowsetError::LeadingText {
            pattern: raw.to_string(),
        });
    }

    let starts: Vec<usize> = raw.match_indices(MARKER).map(|(idx, _)| idx).collect();
    let tokens = starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(raw.len());
            Specifier::raw(&raw[start..end])
        })
        .collect();
    Ok(tokens)
}
