//! Color token classification
//!
//! Every color token is classified exactly once at configuration load into
//! a tagged union, so downstream code never re-inspects raw shapes. A value
//! is either a CSS literal (hex, gradient, keyword), an RGB triplet
//! (enabling opacity-parameterized `rgba()` output through a shared CSS
//! variable), or a triplet forced by the configuration regardless of its
//! literal form.

use serde::de::{Deserializer, Error as DeError};
use serde::{Deserialize, Serialize};

use crate::scalar::format_number;

/// A classified color token value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ColorValue {
    /// A CSS literal, embedded verbatim as a `var()` fallback.
    Literal(String),
    /// Three numeric components, emitted through `rgb(var(--...))`.
    RgbTriplet(u8, u8, u8),
    /// Triplet semantics forced by `isListedRgb` (or a numeric triplet
    /// whose components do not fit `u8`); carries the normalized text.
    RgbForced(String),
}

impl ColorValue {
    /// Classify a raw JSON color value.
    ///
    /// - arrays of three `0..=255` integers are triplets;
    /// - objects contribute their `value` field, with `isListedRgb: true`
    ///   forcing triplet interpretation;
    /// - everything else is stringified, separator-normalized, and tested
    ///   for exactly three strictly-numeric components.
    pub fn classify(raw: &serde_json::Value) -> ColorValue {
        match raw {
            serde_json::Value::Array(items) => {
                let normalized = normalize_separators(&join_components(items));
                if let Some((r, g, b)) = parse_triplet(&normalized) {
                    ColorValue::RgbTriplet(r, g, b)
                } else if !normalized.is_empty() && is_numeric_triplet(&normalized) {
                    ColorValue::RgbForced(normalized)
                } else {
                    ColorValue::Literal(normalized)
                }
            }
            serde_json::Value::Object(map) => {
                let forced = map
                    .get("isListedRgb")
                    .and_then(serde_json::Value::as_bool)
                    .unwrap_or(false);
                let value = map.get("value").cloned().unwrap_or_default();
                let normalized = normalize_separators(&stringify(&value));
                if forced {
                    ColorValue::RgbForced(normalized)
                } else {
                    Self::classify_text(&normalized)
                }
            }
            other => Self::classify_text(&normalize_separators(&stringify(other))),
        }
    }

    fn classify_text(normalized: &str) -> ColorValue {
        if let Some((r, g, b)) = parse_triplet(normalized) {
            ColorValue::RgbTriplet(r, g, b)
        } else if is_numeric_triplet(normalized) {
            ColorValue::RgbForced(normalized.to_string())
        } else {
            ColorValue::Literal(normalized.to_string())
        }
    }

    /// Whether this value carries RGB-triplet semantics.
    pub fn is_rgb(&self) -> bool {
        !matches!(self, ColorValue::Literal(_))
    }

    /// The literal text to embed as a `var()` fallback. Triplets render as
    /// space-separated components.
    pub fn literal_text(&self) -> String {
        match self {
            ColorValue::Literal(s) | ColorValue::RgbForced(s) => s.clone(),
            ColorValue::RgbTriplet(r, g, b) => format!("{r} {g} {b}"),
        }
    }
}

impl<'de> Deserialize<'de> for ColorValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        if raw.is_null() {
            return Err(D::Error::custom("color value must not be null"));
        }
        Ok(ColorValue::classify(&raw))
    }
}

fn stringify(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n
            .as_f64()
            .map(format_number)
            .unwrap_or_else(|| n.to_string()),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => String::new(),
        serde_json::Value::Array(items) => join_components(items),
        other => other.to_string(),
    }
}

fn join_components(items: &[serde_json::Value]) -> String {
    items
        .iter()
        .map(stringify)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapse comma and double-space separators down to single spaces.
fn normalize_separators(s: &str) -> String {
    s.replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strict numeric test: the trimmed component must round-trip through its
/// own numeric rendering. `"030"`, `".5"`, and `"+10"` all fail, so a
/// three-word color keyword is never mistaken for a triplet.
fn is_strict_number(s: &str) -> bool {
    let trimmed = s.trim();
    match trimmed.parse::<f64>() {
        Ok(n) => format_number(n) == trimmed,
        Err(_) => false,
    }
}

fn is_numeric_triplet(normalized: &str) -> bool {
    let parts: Vec<&str> = normalized.split(' ').collect();
    parts.len() == 3 && parts.iter().all(|p| is_strict_number(p))
}

fn parse_triplet(normalized: &str) -> Option<(u8, u8, u8)> {
    let parts: Vec<&str> = normalized.split(' ').collect();
    if parts.len() != 3 || !parts.iter().all(|p| is_strict_number(p)) {
        return None;
    }
    let mut channels = [0u8; 3];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        let n: f64 = part.parse().ok()?;
        if n < 0.0 || n > 255.0 || n.fract() != 0.0 {
            return None;
        }
        *slot = n as u8;
    }
    Some((channels[0], channels[1], channels[2]))
}
