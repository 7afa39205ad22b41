//! Raw token value carriers
//!
//! Configuration values arrive either as bare numbers (pixel counts,
//! unitless line heights) or as literal CSS text. Both render back to the
//! exact token a stylesheet would carry.

use serde::{Deserialize, Serialize};

use crate::breakpoints::Breakpoints;

/// A single raw token value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Number(f64),
    Text(String),
}

impl ScalarValue {
    /// The numeric value, if this scalar is (or trivially parses as) one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ScalarValue::Number(n) => Some(*n),
            ScalarValue::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Render the value as CSS token text. Integral numbers drop the
    /// fractional part (`16`, not `16.0`).
    pub fn render(&self) -> String {
        match self {
            ScalarValue::Number(n) => format_number(*n),
            ScalarValue::Text(s) => s.clone(),
        }
    }
}

impl std::fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// A token value that may be uniform or vary per breakpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleValue {
    PerBreakpoint(Breakpoints<ScalarValue>),
    Uniform(ScalarValue),
}

impl ScaleValue {
    /// Per-breakpoint numeric values, when every configured tier is numeric.
    pub fn numeric_breakpoints(&self) -> Option<Breakpoints<f64>> {
        match self {
            ScaleValue::Uniform(v) => v.as_number().map(Breakpoints::uniform),
            ScaleValue::PerBreakpoint(bp) => {
                let sm = bp.sm.as_number()?;
                let md = match &bp.md {
                    Some(v) => Some(v.as_number()?),
                    None => None,
                };
                let lg = match &bp.lg {
                    Some(v) => Some(v.as_number()?),
                    None => None,
                };
                Some(Breakpoints { sm, md, lg })
            }
        }
    }
}

/// Format a number the way the CSS output expects: no trailing `.0`, no
/// scientific notation for the magnitudes design tokens use.
pub fn format_number(n: f64) -> String {
    if n == n.trunc() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
