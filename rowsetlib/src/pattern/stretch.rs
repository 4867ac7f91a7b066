//! Stretching a pattern to cover more columns than it declares.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::Pattern;

/// How [`stretch_with`] treats targets below twice the pattern length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StretchPolicy {
    /// Only stretch once the pattern fits at least twice into the target.
    /// For `len < target < 2 * len` the base pattern comes back untouched.
    #[default]
    Legacy,
    /// Stretch whenever the target exceeds the pattern length.
    Exact,
}

impl FromStr for StretchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" => Ok(StretchPolicy::Legacy),
            "exact" => Ok(StretchPolicy::Exact),
            _ => Err(format!("Unknown stretch policy: {}", s)),
        }
    }
}

/// Stretch `pattern` to `target` specifiers with the [`StretchPolicy::Legacy`] rule.
pub fn stretch(pattern: Pattern, target: usize) -> Pattern {
    stretch_with(pattern, target, StretchPolicy::Legacy)
}

/// Repeat `pattern` whole, then append the leading `target % len` specifiers.
///
/// A pattern already covering `target` columns is returned unchanged, even
/// when it is longer than `target`.
pub fn stretch_with(pattern: Pattern, target: usize, policy: StretchPolicy) -> Pattern {
    let base = pattern.len();
    if base == 0 || target <= base {
        return pattern;
    }

    let quotient = target / base;
    if policy == StretchPolicy::Legacy && quotient <= 1 {
        return pattern;
    }
    let remainder = target % base;

    let specifiers = pattern.into_specifiers();
    let mut stretched = Vec::with_capacity(target);
    for _ in 0..quotient {
        stretched.extend_from_slice(&specifiers);
    }
    stretched.extend_from_slice(&specifiers[..remainder]);
    stretched.into_iter().collect()
}
