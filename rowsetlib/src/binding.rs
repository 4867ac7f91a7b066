//! Binding specifiers to columns by their position in the table.
//!
//! A table declares its columns in a fixed ("absolute") order and the default
//! pattern is written against that order. A query may select a subset of the
//! columns, or reorder them; binding looks each selected column up in the
//! absolute order so it keeps the specifier written for it.
//!
//! ```rust
//! use rowsetlib::binding::{bind, render};
//! use rowsetlib::Pattern;
//!
//! let absolute = ["A", "B", "C", "D"];
//! let specifiers = Pattern::parse("%1s%2s%3s%4s").unwrap();
//! let binding = bind(&["C", "A"], &absolute, &specifiers).unwrap();
//! assert_eq!(render(&["C", "A"], &binding).unwrap().to_string(), "%3s%1s");
//! ```

use serde::Serialize;
use std::collections::HashMap;

use crate::error::RowsetError;
use crate::pattern::{Pattern, Specifier};
use crate::Result;

/// Immutable column-name → specifier lookup produced by [`bind`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ColumnBinding {
    by_name: HashMap<String, Specifier>,
}

impl ColumnBinding {
    /// The specifier bound to `column`.
    pub fn get(&self, column: &str) -> Result<&Specifier> {
        self.by_name
            .get(column)
            .ok_or_else(|| RowsetError::SchemaMismatch {
                column: column.to_string(),
            })
    }

    pub fn contains(&self, column: &str) -> bool {
        self.by_name.contains_key(column)
    }

    /// Number of bound columns.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// 1-based position of `column` within `absolute`.
pub fn position_of<S: AsRef<str>>(absolute: &[S], column: &str) -> Result<usize> {
    absolute
        .iter()
        .position(|name| name.as_ref() == column)
        .map(|idx| idx + 1)
        .ok_or_else(|| RowsetError::SchemaMismatch {
            column: column.to_string(),
        })
}

/// Greatest 1-based absolute position among `result` columns (0 when empty).
pub fn max_position<R: AsRef<str>, A: AsRef<str>>(result: &[R], absolute: &[A]) -> Result<usize> {
    let mut max = 0;
    for column in result {
        max = max.max(position_of(absolute, column.as_ref())?);
    }
    Ok(max)
}

/// Bind `absolute[i] -> specifiers[i]` for every column up to the rightmost
/// one selected by `result`.
///
/// Columns right of that point stay unbound; nothing in `result` can refer to
/// them. `specifiers` must already be stretched far enough to reach it.
pub fn bind<R: AsRef<str>, A: AsRef<str>>(
    result: &[R],
    absolute: &[A],
    specifiers: &Pattern,
) -> Result<ColumnBinding> {
    let max_index = max_position(result, absolute)?;

    if specifiers.len() < max_index {
        return Err(RowsetError::PatternTooShort {
            column: absolute[max_index - 1].as_ref().to_string(),
            required: max_index,
            available: specifiers.len(),
        });
    }

    let by_name = absolute
        .iter()
        .zip(specifiers.iter())
        .take(max_index)
        .map(|(name, spec)| (name.as_ref().to_string(), spec.clone()))
        .collect();

    tracing::debug!(
        result_columns = result.len(),
        bound = max_index,
        "bound specifiers to columns"
    );

    Ok(ColumnBinding { by_name })
}

/// The pattern for `result`, one bound specifier per column in result order.
pub fn render<R: AsRef<str>>(result: &[R], binding: &ColumnBinding) -> Result<Pattern> {
    result
        .iter()
        .map(|column| binding.get(column.as_ref()).cloned())
        .collect()
}
