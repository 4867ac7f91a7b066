//! Single-column format specifiers.
//!
//! A specifier is kept as the raw token produced by the lexer and only parsed
//! into a [`Directive`] when it is applied to a value, so a malformed token is
//! reported at the point where it is actually used.

use console::{measure_text_width, pad_str, Alignment};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RowsetError;
use crate::Result;

/// The marker character that begins every specifier.
pub const MARKER: char = '%';

/// Horizontal alignment of a field within its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Pad on the right (`%-20s`)
    Left,
    /// Pad on the left (`%20s`), the printf default
    #[default]
    Right,
}

impl FromStr for Align {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" | "l" => Ok(Align::Left),
            "right" | "r" => Ok(Align::Right),
            _ => Err(format!("Unknown alignment: {}", s)),
        }
    }
}

impl From<Align> for Alignment {
    fn from(align: Align) -> Self {
        match align {
            Align::Left => Alignment::Left,
            Align::Right => Alignment::Right,
        }
    }
}

/// A parsed specifier: everything needed to render one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub align: Align,
    /// Minimum field width in display columns
    pub width: Option<usize>,
    /// Maximum number of characters taken from the value
    pub precision: Option<usize>,
    /// Upper-case the value (`%S`)
    pub upper: bool,
    /// Literal text emitted after the field
    pub suffix: String,
}

impl Directive {
    /// Render `value` according to this directive.
    pub fn render(&self, value: &str) -> String {
        let mut text = match self.precision {
            Some(max) => value.chars().take(max).collect::<String>(),
            None => value.to_string(),
        };
        if self.upper {
            text = text.to_uppercase();
        }

        let mut out = match self.width {
            Some(width) if width > measure_text_width(&text) => {
                pad_str(&text, width, self.align.into(), None).into_owned()
            }
            _ => text,
        };
        out.push_str(&self.suffix);
        out
    }
}

/// One column's rendering directive, as written in a pattern string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Specifier(String);

impl Specifier {
    /// A plain `%[-]{width}s` specifier.
    pub fn new(width: usize, align: Align) -> Self {
        let flag = if align == Align::Left { "-" } else { "" };
        Specifier(format!("{MARKER}{flag}{width}s"))
    }

    /// Wrap a raw token. The token is validated when applied, not here.
    pub fn raw(token: impl Into<String>) -> Self {
        Specifier(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse this token into a [`Directive`].
    pub fn directive(&self) -> Result<Directive> {
        let token = self.0.as_str();
        let body = token
            .strip_prefix(MARKER)
            .ok_or_else(|| RowsetError::invalid_specifier(token, "missing '%' marker"))?;

        let mut chars = body.char_indices().peekable();

        let mut align = Align::Right;
        if let Some(&(_, '-')) = chars.peek() {
            align = Align::Left;
            chars.next();
        }

        let mut width: Option<usize> = None;
        while let Some(&(_, c)) = chars.peek() {
            let Some(digit) = c.to_digit(10) else { break };
            if width.is_none() && digit == 0 {
                return Err(RowsetError::invalid_specifier(
                    token,
                    "zero padding is not supported for text fields",
                ));
            }
            width = Some(push_digit(token, width, digit)?);
            chars.next();
        }

        if align == Align::Left && width.is_none() {
            return Err(RowsetError::invalid_specifier(
                token,
                "left alignment requires a width",
            ));
        }

        let mut precision: Option<usize> = None;
        if let Some(&(_, '.')) = chars.peek() {
            chars.next();
            let mut digits = 0;
            let mut value = 0;
            while let Some(&(_, c)) = chars.peek() {
                let Some(digit) = c.to_digit(10) else { break };
                value = push_digit(token, Some(value), digit)?;
                digits += 1;
                chars.next();
            }
            if digits == 0 {
                return Err(RowsetError::invalid_specifier(
                    token,
                    "precision requires at least one digit",
                ));
            }
            precision = Some(value);
        }

        let upper = match chars.next() {
            Some((_, 's')) => false,
            Some((_, 'S')) => true,
            Some((_, other)) => {
                return Err(RowsetError::invalid_specifier(
                    token,
                    format!("unsupported conversion '{}'", other),
                ))
            }
            None => return Err(RowsetError::invalid_specifier(token, "missing conversion")),
        };

        let suffix = match chars.peek() {
            Some(&(idx, _)) => body[idx..].to_string(),
            None => String::new(),
        };

        Ok(Directive {
            align,
            width,
            precision,
            upper,
            suffix,
        })
    }

    /// Render a single value through this specifier.
    pub fn apply(&self, value: &str) -> Result<String> {
        Ok(self.directive()?.render(value))
    }
}

fn push_digit(token: &str, acc: Option<usize>, digit: u32) -> Result<usize> {
    acc.unwrap_or(0)
        .checked_mul(10)
        .and_then(|v| v.checked_add(digit as usize))
        .ok_or_else(|| RowsetError::invalid_specifier(token, "width overflows"))
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
