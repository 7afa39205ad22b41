//! Typography token shapes
//!
//! The `fontSize` category is the one place the configuration nests two
//! levels deep: a token may group per-property values (`fontSize`,
//! `lineHeight`, ...), carry per-breakpoint values whose tiers are
//! themselves per-property objects, or just be a plain scalar. The shape is
//! resolved at decode time by inspecting the key set.

use indexmap::IndexMap;
use serde::de::{Deserializer, Error as DeError};
use serde::{Deserialize, Serialize};

use crate::breakpoints::Breakpoints;
use crate::scalar::{ScalarValue, ScaleValue};

/// The fixed typography property list.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextProperty {
    FontFamily,
    FontWeight,
    FontSize,
    FontStyle,
    LineHeight,
    LetterSpacing,
    TextCase,
    TextDecoration,
    ParagraphSpacing,
    ParagraphIndent,
}

impl TextProperty {
    /// Every property, in the order the text rule emits declarations.
    /// `FontSize` is handled separately by the rule generator and is not
    /// part of this list.
    pub const RULE_PROPERTIES: [TextProperty; 9] = [
        TextProperty::FontFamily,
        TextProperty::FontWeight,
        TextProperty::FontStyle,
        TextProperty::LineHeight,
        TextProperty::LetterSpacing,
        TextProperty::TextCase,
        TextProperty::TextDecoration,
        TextProperty::ParagraphIndent,
        TextProperty::ParagraphSpacing,
    ];

    /// The camelCase key used in configurations and CSS variable names.
    pub fn config_key(&self) -> &'static str {
        match self {
            TextProperty::FontFamily => "fontFamily",
            TextProperty::FontWeight => "fontWeight",
            TextProperty::FontSize => "fontSize",
            TextProperty::FontStyle => "fontStyle",
            TextProperty::LineHeight => "lineHeight",
            TextProperty::LetterSpacing => "letterSpacing",
            TextProperty::TextCase => "textCase",
            TextProperty::TextDecoration => "textDecoration",
            TextProperty::ParagraphSpacing => "paragraphSpacing",
            TextProperty::ParagraphIndent => "paragraphIndent",
        }
    }

    /// The CSS declaration target. Paragraph spacing has no CSS property
    /// and lands in a custom property instead.
    pub fn css_property(&self) -> &'static str {
        match self {
            TextProperty::FontFamily => "font-family",
            TextProperty::FontWeight => "font-weight",
            TextProperty::FontSize => "font-size",
            TextProperty::FontStyle => "font-style",
            TextProperty::LineHeight => "line-height",
            TextProperty::LetterSpacing => "letter-spacing",
            TextProperty::TextCase => "text-transform",
            TextProperty::TextDecoration => "text-decoration",
            TextProperty::ParagraphSpacing => "--theme-paragraphSpacing",
            TextProperty::ParagraphIndent => "text-indent",
        }
    }

    pub fn from_config_key(key: &str) -> Option<TextProperty> {
        match key {
            "fontFamily" => Some(TextProperty::FontFamily),
            "fontWeight" => Some(TextProperty::FontWeight),
            "fontSize" => Some(TextProperty::FontSize),
            "fontStyle" => Some(TextProperty::FontStyle),
            "lineHeight" => Some(TextProperty::LineHeight),
            "letterSpacing" => Some(TextProperty::LetterSpacing),
            "textCase" => Some(TextProperty::TextCase),
            "textDecoration" => Some(TextProperty::TextDecoration),
            "paragraphSpacing" => Some(TextProperty::ParagraphSpacing),
            "paragraphIndent" => Some(TextProperty::ParagraphIndent),
            _ => None,
        }
    }
}

/// One tier of a breakpoint-keyed typography token.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TextBreakpointValue {
    Scalar(ScalarValue),
    Properties(IndexMap<TextProperty, ScalarValue>),
}

/// One typography token's raw configuration value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FontSizeEntry {
    /// `{ fontSize: {...}, lineHeight: {...}, ... }`
    Properties(IndexMap<TextProperty, ScaleValue>),
    /// `{ sm: ..., md: ..., lg: ... }`; tiers may be scalars or
    /// per-property maps.
    PerBreakpoint(Breakpoints<TextBreakpointValue>),
    /// A single plain value.
    Scalar(ScalarValue),
}

impl<'de> Deserialize<'de> for FontSizeEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        decode_entry(&raw).map_err(D::Error::custom)
    }
}

fn decode_entry(raw: &serde_json::Value) -> Result<FontSizeEntry, String> {
    match raw {
        serde_json::Value::Object(map) => {
            let breakpoint_keyed = map.keys().all(|k| matches!(k.as_str(), "sm" | "md" | "lg"));
            if breakpoint_keyed && !map.is_empty() {
                let tier = |key: &str| -> Result<Option<TextBreakpointValue>, String> {
                    map.get(key).map(decode_tier).transpose()
                };
                let sm = tier("sm")?.ok_or("breakpoint-keyed font size token requires `sm`")?;
                return Ok(FontSizeEntry::PerBreakpoint(Breakpoints {
                    sm,
                    md: tier("md")?,
                    lg: tier("lg")?,
                }));
            }

            let mut properties = IndexMap::new();
            for (key, value) in map {
                let Some(property) = TextProperty::from_config_key(key) else {
                    return Err(format!("unknown typography property `{key}`"));
                };
                let scale: ScaleValue = serde_json::from_value(value.clone())
                    .map_err(|e| format!("invalid value for `{key}`: {e}"))?;
                properties.insert(property, scale);
            }
            Ok(FontSizeEntry::Properties(properties))
        }
        _ => {
            let scalar: ScalarValue = serde_json::from_value(raw.clone())
                .map_err(|e| format!("invalid font size value: {e}"))?;
            Ok(FontSizeEntry::Scalar(scalar))
        }
    }
}

fn decode_tier(raw: &serde_json::Value) -> Result<TextBreakpointValue, String> {
    match raw {
        serde_json::Value::Object(map) => {
            let mut properties = IndexMap::new();
            for (key, value) in map {
                let Some(property) = TextProperty::from_config_key(key) else {
                    return Err(format!("unknown typography property `{key}`"));
                };
                let scalar: ScalarValue = serde_json::from_value(value.clone())
                    .map_err(|e| format!("invalid value for `{key}`: {e}"))?;
                properties.insert(property, scalar);
            }
            Ok(TextBreakpointValue::Properties(properties))
        }
        _ => {
            let scalar: ScalarValue = serde_json::from_value(raw.clone())
                .map_err(|e| format!("invalid breakpoint value: {e}"))?;
            Ok(TextBreakpointValue::Scalar(scalar))
        }
    }
}
