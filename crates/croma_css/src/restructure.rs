//! Typography restructuring.
//!
//! The `fontSize` category arrives token-major (`h1` carries its own
//! `fontSize`, `lineHeight`, ...). Everything downstream wants it
//! property-major (`lineHeight` carries a token map like every other
//! category). [`Typography::from_config`] performs that pivot and then
//! overlays the top-level per-property override maps, which win on key
//! collisions.

use indexmap::IndexMap;
use tracing::debug;

use croma_tokens::{
    Breakpoint, Breakpoints, FontSizeEntry, ScalarValue, ScaleValue, TextBreakpointValue,
    TextProperty, TokenConfig,
};

/// Property-major typography buckets.
#[derive(Debug, Clone, Default)]
pub struct Typography {
    buckets: IndexMap<TextProperty, IndexMap<String, ScaleValue>>,
}

impl Typography {
    pub fn from_config(config: &TokenConfig) -> Typography {
        let mut typography = Typography::default();
        for (token, entry) in &config.font_size {
            typography.pivot_entry(token, entry);
        }
        for (property, overrides) in config.text_property_overrides() {
            let bucket = typography.buckets.entry(property).or_default();
            for (token, scale) in overrides {
                bucket.insert(token.clone(), scale.clone());
            }
        }
        typography
    }

    fn pivot_entry(&mut self, token: &str, entry: &FontSizeEntry) {
        match entry {
            FontSizeEntry::Scalar(value) => {
                self.insert(TextProperty::FontSize, token, ScaleValue::Uniform(value.clone()));
            }
            FontSizeEntry::Properties(properties) => {
                for (property, scale) in properties {
                    self.insert(*property, token, scale.clone());
                }
            }
            FontSizeEntry::PerBreakpoint(tiers) => {
                for property in properties_in(tiers) {
                    match pivot_property(tiers, property) {
                        Some(values) => {
                            self.insert(property, token, ScaleValue::PerBreakpoint(values));
                        }
                        None => {
                            debug!(
                                token,
                                property = property.config_key(),
                                "typography property has no sm tier, skipping"
                            );
                        }
                    }
                }
            }
        }
    }

    fn insert(&mut self, property: TextProperty, token: &str, scale: ScaleValue) {
        self.buckets
            .entry(property)
            .or_default()
            .insert(token.to_string(), scale);
    }

    /// All buckets in first-appearance order.
    pub fn buckets(&self) -> impl Iterator<Item = (TextProperty, &IndexMap<String, ScaleValue>)> {
        self.buckets.iter().map(|(p, b)| (*p, b))
    }

    pub fn bucket(&self, property: TextProperty) -> Option<&IndexMap<String, ScaleValue>> {
        self.buckets.get(&property)
    }

    pub fn contains(&self, property: TextProperty, token: &str) -> bool {
        self.bucket(property).is_some_and(|b| b.contains_key(token))
    }

    /// The typography tokens the `text-*` utility can target.
    pub fn font_size_tokens(&self) -> Vec<&str> {
        self.bucket(TextProperty::FontSize)
            .map(|b| b.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// Properties mentioned on any tier, in first-appearance order. A tier
/// holding a bare scalar counts as a `fontSize` mention.
fn properties_in(tiers: &Breakpoints<TextBreakpointValue>) -> Vec<TextProperty> {
    let mut properties = Vec::new();
    for breakpoint in Breakpoint::ALL {
        let Some(tier) = tier_at(tiers, breakpoint) else {
            continue;
        };
        match tier {
            TextBreakpointValue::Scalar(_) => {
                if !properties.contains(&TextProperty::FontSize) {
                    properties.push(TextProperty::FontSize);
                }
            }
            TextBreakpointValue::Properties(map) => {
                for property in map.keys() {
                    if !properties.contains(property) {
                        properties.push(*property);
                    }
                }
            }
        }
    }
    properties
}

fn pivot_property(
    tiers: &Breakpoints<TextBreakpointValue>,
    property: TextProperty,
) -> Option<Breakpoints<ScalarValue>> {
    let at = |breakpoint| {
        tier_at(tiers, breakpoint).and_then(|tier| match tier {
            TextBreakpointValue::Scalar(value) if property == TextProperty::FontSize => {
                Some(value.clone())
            }
            TextBreakpointValue::Scalar(_) => None,
            TextBreakpointValue::Properties(map) => map.get(&property).cloned(),
        })
    };
    Some(Breakpoints {
        sm: at(Breakpoint::Sm)?,
        md: at(Breakpoint::Md),
        lg: at(Breakpoint::Lg),
    })
}

/// The raw tier at a breakpoint, without downward inheritance.
fn tier_at(
    tiers: &Breakpoints<TextBreakpointValue>,
    breakpoint: Breakpoint,
) -> Option<&TextBreakpointValue> {
    match breakpoint {
        Breakpoint::Sm => Some(&tiers.sm),
        Breakpoint::Md => tiers.md.as_ref(),
        Breakpoint::Lg => tiers.lg.as_ref(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use croma_tokens::TokenConfig;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn typography(config: serde_json::Value) -> Typography {
        Typography::from_config(&TokenConfig::from_value(config).unwrap())
    }

    #[test]
    fn pivots_property_maps_into_buckets() {
        let t = typography(json!({
            "fontSize": {
                "h1": {
                    "fontSize": { "sm": 32, "lg": 56 },
                    "lineHeight": 1.2
                },
                "body": { "fontSize": 16 }
            }
        }));
        assert_eq!(t.font_size_tokens(), vec!["h1", "body"]);
        assert!(t.contains(TextProperty::LineHeight, "h1"));
        assert!(!t.contains(TextProperty::LineHeight, "body"));
    }

    #[test]
    fn pivots_breakpoint_major_tokens() {
        let t = typography(json!({
            "fontSize": {
                "h2": {
                    "sm": { "fontSize": 24, "lineHeight": 1.3 },
                    "lg": { "fontSize": 40 }
                }
            }
        }));
        let sizes = t.bucket(TextProperty::FontSize).unwrap();
        let scale = sizes.get("h2").unwrap();
        let numbers = scale.numeric_breakpoints().unwrap();
        assert_eq!(numbers.sm, 24.0);
        assert_eq!(numbers.lg, Some(40.0));
        assert!(t.contains(TextProperty::LineHeight, "h2"));
    }

    #[test]
    fn bare_scalar_tiers_count_as_font_size() {
        let t = typography(json!({
            "fontSize": { "overline": { "sm": 12, "lg": 14 } }
        }));
        let numbers = t
            .bucket(TextProperty::FontSize)
            .unwrap()
            .get("overline")
            .unwrap()
            .numeric_breakpoints()
            .unwrap();
        assert_eq!(numbers.sm, 12.0);
        assert_eq!(numbers.lg, Some(14.0));
    }

    #[test]
    fn top_level_overrides_win_over_pivoted_values() {
        let t = typography(json!({
            "fontSize": {
                "h1": { "fontSize": 32, "lineHeight": 1.2 }
            },
            "lineHeight": { "h1": 1.5, "solo": 1.0 }
        }));
        let line_heights = t.bucket(TextProperty::LineHeight).unwrap();
        assert_eq!(
            line_heights.get("h1").unwrap().numeric_breakpoints().unwrap().sm,
            1.5
        );
        assert!(t.contains(TextProperty::LineHeight, "solo"));
    }

    #[test]
    fn plain_scalar_tokens_only_feed_font_size() {
        let t = typography(json!({ "fontSize": { "caption": 12 } }));
        assert_eq!(t.font_size_tokens(), vec!["caption"]);
        assert_eq!(t.buckets().count(), 1);
    }
}
