//! Theme utility tree construction.
//!
//! The tree is the engine-facing value side of the compiler: every
//! token category folded into one nested map whose leaves are CSS value
//! expressions. Color leaves keep their [`ColorExpr`] structure so a
//! consumer can still compose opacity; everything else is plain CSS
//! text. Font sizes may carry line-height and letter-spacing extras and
//! serialize as a `[size, extras]` pair, matching the shape utility
//! engines expect for composite text tokens.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;
use tracing::{debug, trace};

use croma_tokens::{format_number, LayoutMax, TextProperty, TokenConfig};

use crate::color::{ColorCategory, ColorExpr};
use crate::columns::ColumnGrid;
use crate::fallback::ValueContext;
use crate::on_background::collect_relationships;
use crate::restructure::Typography;
use crate::sanitize::sanitize_key;

pub type ThemeTree = IndexMap<String, ThemeValue>;

/// One node of the theme utility tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeValue {
    /// A plain CSS value expression.
    Css(String),
    /// A resolved color, kept structured for opacity composition.
    Color(ColorExpr),
    /// A font size with optional companion values.
    FontSize {
        font_size: String,
        line_height: Option<String>,
        letter_spacing: Option<String>,
    },
    /// A nested group of values.
    Group(ThemeTree),
}

impl Serialize for ThemeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ThemeValue::Css(value) => serializer.serialize_str(value),
            ThemeValue::Color(expr) => serializer.serialize_str(&expr.css()),
            ThemeValue::FontSize {
                font_size,
                line_height,
                letter_spacing,
            } => {
                if line_height.is_none() && letter_spacing.is_none() {
                    return serializer.serialize_str(font_size);
                }
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(font_size)?;
                let mut extras = IndexMap::new();
                if let Some(line_height) = line_height {
                    extras.insert("lineHeight", line_height.as_str());
                }
                if let Some(letter_spacing) = letter_spacing {
                    extras.insert("letterSpacing", letter_spacing.as_str());
                }
                seq.serialize_element(&extras)?;
                seq.end()
            }
            ThemeValue::Group(tree) => {
                let mut map = serializer.serialize_map(Some(tree.len()))?;
                for (key, value) in tree {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

/// Builds the full theme utility tree for a configuration.
pub fn build_theme_utilities(config: &TokenConfig) -> ThemeTree {
    let typography = Typography::from_config(config);
    let ctx = ValueContext::new(config, &typography);
    let relationships = collect_relationships(config);
    let mut tree = ThemeTree::new();

    for category in ColorCategory::ALL {
        let tokens = category.tokens(config);
        let mut group = ThemeTree::new();
        if category == ColorCategory::Colors
            && (!tokens.is_empty()
                || relationships.iter().any(|r| r.category == category))
        {
            // The current background scope, set by the bg utilities.
            group.insert(
                "bgCurrent".to_string(),
                ThemeValue::Css("var(--bgCurrent, transparent)".to_string()),
            );
        }
        for (token, value) in tokens {
            let expr = ColorExpr::resolve(category.variable_prefix(), token, value);
            trace!(
                category = category.theme_key(),
                token = token.as_str(),
                rgb = expr.is_rgb()
            );
            group.insert(token.clone(), ThemeValue::Color(expr));
        }
        // Relationship entries resolve under the placeholder token
        // `<name>-on-X`; the bg utilities point that variable at the
        // matched background's concrete token at apply time. A plain
        // token sharing the short name is overwritten by the
        // relationship entry.
        for relationship in relationships.iter().filter(|r| r.category == category) {
            if let Some(value) = tokens.get(&relationship.full_name) {
                let placeholder = format!("{}-on-X", relationship.name);
                group.insert(
                    relationship.name.clone(),
                    ThemeValue::Color(ColorExpr::resolve(
                        category.variable_prefix(),
                        &placeholder,
                        value,
                    )),
                );
            }
        }
        if !group.is_empty() {
            tree.insert(category.theme_key().to_string(), ThemeValue::Group(group));
        }
    }

    if let Some(layout) = config.layout.as_ref().filter(|l| !l.is_empty()) {
        let mut group = ThemeTree::new();
        if layout.margin.is_some() {
            if let Some(value) = ctx.resolve("layout-margin") {
                group.insert("margin".to_string(), ThemeValue::Css(value));
            }
        }
        if layout.gutter.is_some() {
            if let Some(value) = ctx.resolve("layout-gutter") {
                group.insert("gutter".to_string(), ThemeValue::Css(value));
            }
        }
        if let Some(grid) = ColumnGrid::from_layout(layout) {
            let mut columns = ThemeTree::new();
            for (key, value) in grid.fraction_entries(&ctx, layout) {
                columns.insert(key, ThemeValue::Css(value));
            }
            group.insert("columns".to_string(), ThemeValue::Group(columns));
        }
        if let Some(max) = layout.max {
            let fallback = match max {
                LayoutMax::Px(px) => format!("{}px", format_number(px)),
                LayoutMax::Viewport => "var(--visual-viewport-width, 100vw)".to_string(),
            };
            group.insert(
                "max".to_string(),
                ThemeValue::Css(format!("var(--theme-layout-max, {fallback})")),
            );
        }
        if !group.is_empty() {
            tree.insert("layout".to_string(), ThemeValue::Group(group));
        }
    }

    let spacing_like: [(&str, &croma_tokens::TokenMap<croma_tokens::ScaleValue>); 4] = [
        ("spacing", &config.spacing),
        ("horizontalSpacing", &config.horizontal_spacing),
        ("verticalSpacing", &config.vertical_spacing),
        ("borderRadius", &config.border_radius),
    ];
    for (key, map) in spacing_like {
        if map.is_empty() {
            continue;
        }
        let mut group = ThemeTree::new();
        for token in map.keys() {
            let fragment = format!("{key}-{}", sanitize_key(token));
            if let Some(value) = ctx.resolve(&fragment) {
                group.insert(token.clone(), ThemeValue::Css(value));
            }
        }
        if !group.is_empty() {
            tree.insert(key.to_string(), ThemeValue::Group(group));
        }
    }

    for (property, bucket) in typography.buckets() {
        let key = property.config_key();
        let mut group = ThemeTree::new();
        for token in bucket.keys() {
            let fragment = format!("{key}-{}", sanitize_key(token));
            let Some(value) = ctx.resolve(&fragment) else {
                continue;
            };
            let node = if property == TextProperty::FontSize {
                let companion = |p: TextProperty| -> Option<String> {
                    if !typography.contains(p, token) {
                        return None;
                    }
                    ctx.resolve(&format!("{}-{}", p.config_key(), sanitize_key(token)))
                };
                ThemeValue::FontSize {
                    font_size: value,
                    line_height: companion(TextProperty::LineHeight),
                    letter_spacing: companion(TextProperty::LetterSpacing),
                }
            } else {
                ThemeValue::Css(value)
            };
            group.insert(token.clone(), node);
        }
        if !group.is_empty() {
            tree.insert(key.to_string(), ThemeValue::Group(group));
        }
    }

    if !config.containers.is_empty() {
        let mut group = ThemeTree::new();
        group.insert(
            "<layout-max".to_string(),
            ThemeValue::Css("(max-width: calc(var(--theme-layout-max) - 0.1px))".to_string()),
        );
        group.insert(
            ">=layout-max".to_string(),
            ThemeValue::Css("(min-width: var(--theme-layout-max))".to_string()),
        );
        for (token, value) in &config.containers {
            group.insert(
                token.clone(),
                ThemeValue::Css(format!("(min-width: {})", value.render())),
            );
        }
        tree.insert("containers".to_string(), ThemeValue::Group(group));
    }

    debug!(branches = tree.len(), "built theme utility tree");
    tree
}
