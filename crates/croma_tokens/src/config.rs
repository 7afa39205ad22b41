//! The token configuration, the compiler's single input
//!
//! A configuration is decoded once from JSON into a fully-typed tree.
//! Top-level categories are validated against the canonical set: overriding
//! configurations may change values but must not introduce new categories,
//! and that convention is enforced here at the decode boundary rather than
//! re-checked downstream.

use indexmap::IndexMap;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::breakpoints::Breakpoints;
use crate::color_value::ColorValue;
use crate::error::ConfigError;
use crate::font_size::FontSizeEntry;
use crate::scalar::{ScalarValue, ScaleValue};

/// Viewport setup used for rem conversion and fluid value interpolation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewports {
    pub sm: f64,
    pub md: f64,
    pub lg: f64,
    pub base_font_size: f64,
}

impl Default for Viewports {
    fn default() -> Self {
        Viewports {
            sm: 375.0,
            md: 1440.0,
            lg: 1920.0,
            base_font_size: 16.0,
        }
    }
}

/// The design's maximum scaling width.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum LayoutMax {
    /// No maximum configured; fall back to the visual viewport width.
    Viewport,
    /// A pixel maximum the design stops scaling at.
    Px(f64),
}

fn de_layout_max<'de, D>(deserializer: D) -> Result<Option<LayoutMax>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(Some(match raw {
        Some(px) => LayoutMax::Px(px),
        None => LayoutMax::Viewport,
    }))
}

/// The `layout` category: page margin, gutter, column grid, and max width.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<ScaleValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gutter: Option<ScaleValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Breakpoints<u32>>,
    /// Present-but-null means "no max, scale with the viewport"; an absent
    /// key emits no `layout.max` branch at all.
    #[serde(deserialize_with = "de_layout_max", skip_serializing_if = "Option::is_none")]
    pub max: Option<LayoutMax>,
}

impl LayoutConfig {
    pub fn is_empty(&self) -> bool {
        self.margin.is_none()
            && self.gutter.is_none()
            && self.columns.is_none()
            && self.max.is_none()
    }
}

fn default_sm_viewport() -> f64 {
    Viewports::default().sm
}

fn default_md_viewport() -> f64 {
    Viewports::default().md
}

fn default_lg_viewport() -> f64 {
    Viewports::default().lg
}

fn default_base_font_size() -> f64 {
    Viewports::default().base_font_size
}

/// Per-token value maps, keyed by token name in configuration order.
pub type TokenMap<T> = IndexMap<String, T>;

/// The fully-merged theme configuration the compiler operates on.
///
/// All maps preserve configuration order; generated output key ordering
/// follows it deterministically.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenConfig {
    // Setup
    pub minify: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<ScalarValue>,
    pub base_font_size: f64,
    pub sm_viewport: f64,
    pub md_viewport: f64,
    pub lg_viewport: f64,
    pub disable_breakpoint_specific_custom_properties: bool,

    // Color categories
    pub colors: TokenMap<ColorValue>,
    pub background_colors: TokenMap<ColorValue>,
    pub text_colors: TokenMap<ColorValue>,
    pub border_colors: TokenMap<ColorValue>,

    // Layout and spacing categories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutConfig>,
    pub spacing: TokenMap<ScaleValue>,
    pub horizontal_spacing: TokenMap<ScaleValue>,
    pub vertical_spacing: TokenMap<ScaleValue>,
    pub border_radius: TokenMap<ScaleValue>,
    pub containers: TokenMap<ScalarValue>,

    // Typography
    pub font_size: TokenMap<FontSizeEntry>,

    // Manual per-property typography overrides, merged over the pivoted
    // `fontSize` buckets.
    pub font_family: TokenMap<ScaleValue>,
    pub font_weight: TokenMap<ScaleValue>,
    pub font_style: TokenMap<ScaleValue>,
    pub line_height: TokenMap<ScaleValue>,
    pub letter_spacing: TokenMap<ScaleValue>,
    pub text_case: TokenMap<ScaleValue>,
    pub text_decoration: TokenMap<ScaleValue>,
    pub paragraph_spacing: TokenMap<ScaleValue>,
    pub paragraph_indent: TokenMap<ScaleValue>,
}

impl Default for TokenConfig {
    fn default() -> Self {
        TokenConfig {
            minify: true,
            round: None,
            base_font_size: default_base_font_size(),
            sm_viewport: default_sm_viewport(),
            md_viewport: default_md_viewport(),
            lg_viewport: default_lg_viewport(),
            disable_breakpoint_specific_custom_properties: false,
            colors: TokenMap::default(),
            background_colors: TokenMap::default(),
            text_colors: TokenMap::default(),
            border_colors: TokenMap::default(),
            layout: None,
            spacing: TokenMap::default(),
            horizontal_spacing: TokenMap::default(),
            vertical_spacing: TokenMap::default(),
            border_radius: TokenMap::default(),
            containers: TokenMap::default(),
            font_size: TokenMap::default(),
            font_family: TokenMap::default(),
            font_weight: TokenMap::default(),
            font_style: TokenMap::default(),
            line_height: TokenMap::default(),
            letter_spacing: TokenMap::default(),
            text_case: TokenMap::default(),
            text_decoration: TokenMap::default(),
            paragraph_spacing: TokenMap::default(),
            paragraph_indent: TokenMap::default(),
        }
    }
}

/// Top-level keys of the canonical default configuration. Anything else in
/// an override is a category the default never declared.
const KNOWN_CATEGORIES: &[&str] = &[
    "minify",
    "round",
    "baseFontSize",
    "smViewport",
    "mdViewport",
    "lgViewport",
    "disableBreakpointSpecificCustomProperties",
    "colors",
    "backgroundColors",
    "textColors",
    "borderColors",
    "layout",
    "spacing",
    "horizontalSpacing",
    "verticalSpacing",
    "borderRadius",
    "containers",
    "fontSize",
    "fontFamily",
    "fontWeight",
    "fontStyle",
    "lineHeight",
    "letterSpacing",
    "textCase",
    "textDecoration",
    "paragraphSpacing",
    "paragraphIndent",
];

impl TokenConfig {
    /// Decode a configuration from a JSON value.
    ///
    /// `null` or any non-object input is the one precondition violation
    /// this crate reports as an error; within categories, irregular values
    /// are coerced rather than rejected wherever a deterministic
    /// interpretation exists.
    pub fn from_value(value: serde_json::Value) -> Result<TokenConfig, ConfigError> {
        let serde_json::Value::Object(ref map) = value else {
            return Err(ConfigError::NotAnObject);
        };
        for key in map.keys() {
            if !KNOWN_CATEGORIES.contains(&key.as_str()) {
                return Err(ConfigError::UnknownCategory(key.clone()));
            }
        }
        let config: TokenConfig = serde_json::from_value(value)?;
        debug!(
            colors = config.colors.len(),
            background_colors = config.background_colors.len(),
            spacing = config.spacing.len(),
            font_size = config.font_size.len(),
            "decoded theme configuration"
        );
        Ok(config)
    }

    /// Decode a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<TokenConfig, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn viewports(&self) -> Viewports {
        Viewports {
            sm: self.sm_viewport,
            md: self.md_viewport,
            lg: self.lg_viewport,
            base_font_size: self.base_font_size,
        }
    }

    /// Manual typography override maps present in the configuration, in
    /// declaration order, keyed by their config key.
    pub fn text_property_overrides(
        &self,
    ) -> impl Iterator<Item = (crate::font_size::TextProperty, &TokenMap<ScaleValue>)> {
        use crate::font_size::TextProperty as P;
        [
            (P::FontFamily, &self.font_family),
            (P::FontWeight, &self.font_weight),
            (P::FontStyle, &self.font_style),
            (P::LineHeight, &self.line_height),
            (P::LetterSpacing, &self.letter_spacing),
            (P::TextCase, &self.text_case),
            (P::TextDecoration, &self.text_decoration),
            (P::ParagraphSpacing, &self.paragraph_spacing),
            (P::ParagraphIndent, &self.paragraph_indent),
        ]
        .into_iter()
        .filter(|(_, map)| !map.is_empty())
    }
}
