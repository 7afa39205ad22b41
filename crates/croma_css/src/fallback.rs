//! Breakpoint fallback resolution.
//!
//! Every spacing-like token renders through one of two modes. In the
//! default mode a value becomes a two-step variable chain,
//! `var(--theme-x, var(--theme-x--sm))`, so a runtime can override
//! either the token itself or its small-viewport tier. When
//! breakpoint-specific custom properties are disabled, no `--theme-*`
//! reference is emitted at all: numeric pixel scales inline a fluid
//! `clamp()` interpolated between the small and large viewports, and
//! everything else inlines its small-tier literal.

use rustc_hash::FxHashMap;

use croma_tokens::{
    format_number, Breakpoint, Breakpoints, ScalarValue, ScaleValue, TextProperty, TokenConfig,
    Viewports,
};

use crate::restructure::Typography;
use crate::sanitize::sanitize_key;

/// How a registered scale's numbers should be interpreted when they are
/// inlined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleUnit {
    /// Numbers are pixel counts and may interpolate fluidly.
    Px,
    /// Numbers are bare ratios (line heights, font weights) and are
    /// inlined as-is.
    Unitless,
}

#[derive(Debug, Clone)]
struct ScaleEntry {
    values: Breakpoints<ScalarValue>,
    unit: ScaleUnit,
}

/// Resolves token fragments to CSS values in either mode.
#[derive(Debug, Clone)]
pub struct ValueContext {
    suppress: bool,
    viewports: Viewports,
    scales: FxHashMap<String, ScaleEntry>,
}

impl ValueContext {
    pub fn new(config: &TokenConfig, typography: &Typography) -> ValueContext {
        let mut ctx = ValueContext {
            suppress: config.disable_breakpoint_specific_custom_properties,
            viewports: config.viewports(),
            scales: FxHashMap::default(),
        };

        if let Some(layout) = &config.layout {
            if let Some(margin) = &layout.margin {
                ctx.register("layout-margin", margin, ScaleUnit::Px);
            }
            if let Some(gutter) = &layout.gutter {
                ctx.register("layout-gutter", gutter, ScaleUnit::Px);
            }
        }
        for (token, scale) in &config.spacing {
            ctx.register(&format!("spacing-{}", sanitize_key(token)), scale, ScaleUnit::Px);
        }
        for (token, scale) in &config.horizontal_spacing {
            ctx.register_suffixed("horizontalSpacing", token, "/h", scale);
        }
        for (token, scale) in &config.vertical_spacing {
            ctx.register_suffixed("verticalSpacing", token, "/v", scale);
        }
        for (token, scale) in &config.border_radius {
            ctx.register(
                &format!("borderRadius-{}", sanitize_key(token)),
                scale,
                ScaleUnit::Px,
            );
        }
        for (property, bucket) in typography.buckets() {
            let unit = match property {
                TextProperty::LineHeight | TextProperty::FontWeight => ScaleUnit::Unitless,
                _ => ScaleUnit::Px,
            };
            for (token, scale) in bucket {
                ctx.register(
                    &format!("{}-{}", property.config_key(), sanitize_key(token)),
                    scale,
                    unit,
                );
            }
        }
        ctx
    }

    /// Whether breakpoint-specific custom properties are disabled.
    pub fn suppressed(&self) -> bool {
        self.suppress
    }

    pub fn viewports(&self) -> Viewports {
        self.viewports
    }

    fn register(&mut self, fragment: &str, scale: &ScaleValue, unit: ScaleUnit) {
        let values = match scale {
            ScaleValue::Uniform(value) => Breakpoints::uniform(value.clone()),
            ScaleValue::PerBreakpoint(values) => values.clone(),
        };
        self.scales.insert(fragment.to_string(), ScaleEntry { values, unit });
    }

    /// Registers a directional spacing token under both its full
    /// sanitized name (used by the theme tree, e.g.
    /// `horizontalSpacing-xs-h`) and its suffix-stripped alias (used by
    /// utility selectors, e.g. `horizontalSpacing-xs`).
    fn register_suffixed(&mut self, category: &str, token: &str, suffix: &str, scale: &ScaleValue) {
        self.register(
            &format!("{category}-{}", sanitize_key(token)),
            scale,
            ScaleUnit::Px,
        );
        let stripped = token.replacen(suffix, "", 1);
        if stripped != token {
            self.register(
                &format!("{category}-{}", sanitize_key(&stripped)),
                scale,
                ScaleUnit::Px,
            );
        }
    }

    /// Resolves a registered fragment to its CSS value.
    ///
    /// Default mode always produces the variable chain, whether or not
    /// the fragment was registered; suppressed mode can only inline
    /// values it knows about and returns `None` for the rest.
    pub fn resolve(&self, fragment: &str) -> Option<String> {
        if !self.suppress {
            return Some(format!(
                "var(--theme-{fragment}, var(--theme-{fragment}--sm))"
            ));
        }
        self.inline(fragment)
    }

    /// The inline (variable-free) rendering of a fragment.
    pub fn inline(&self, fragment: &str) -> Option<String> {
        let entry = self.scales.get(fragment)?;
        let sm = entry.values.sm.clone();
        let lg = entry.values.get(Breakpoint::Lg).clone();
        match (sm.as_number(), lg.as_number(), entry.unit) {
            (Some(sm), Some(lg), ScaleUnit::Px) => Some(self.fluid_px(sm, lg)),
            (Some(sm), None, ScaleUnit::Px) => Some(format!("{}px", format_number(sm))),
            (Some(sm), _, ScaleUnit::Unitless) => Some(format_number(sm)),
            (None, ..) => Some(sm.render()),
        }
    }

    /// A pixel value interpolated linearly between the small and large
    /// viewports, clamped to the configured extremes.
    pub fn fluid_px(&self, sm: f64, lg: f64) -> String {
        if sm == lg {
            return format!("{}px", format_number(sm));
        }
        let slope = (lg - sm) / (self.viewports.lg - self.viewports.sm);
        let intercept = sm - slope * self.viewports.sm;
        let (min, max) = if sm < lg { (sm, lg) } else { (lg, sm) };
        format!(
            "clamp({}px, calc({}px + {}vw), {}px)",
            format_number(min),
            round4(intercept),
            round4(slope * 100.0),
            format_number(max)
        )
    }
}

/// Wraps a resolved value for a `-`-prefixed utility. The expression is
/// only wrapped in `calc()`; the runtime is expected to hold a negative
/// literal in the referenced variable's negative counterpart.
pub fn negate(value: &str) -> String {
    format!("calc({value})")
}

fn round4(n: f64) -> String {
    format_number((n * 10_000.0).round() / 10_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use croma_tokens::TokenConfig;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn context(config: serde_json::Value) -> ValueContext {
        let config = TokenConfig::from_value(config).unwrap();
        let typography = Typography::from_config(&config);
        ValueContext::new(&config, &typography)
    }

    #[test]
    fn default_mode_builds_the_variable_chain() {
        let ctx = context(json!({ "spacing": { "small": { "sm": 16, "lg": 24 } } }));
        assert_eq!(
            ctx.resolve("spacing-small").unwrap(),
            "var(--theme-spacing-small, var(--theme-spacing-small--sm))"
        );
    }

    #[test]
    fn default_mode_does_not_require_registration() {
        let ctx = context(json!({}));
        assert_eq!(
            ctx.resolve("layout-gutter").unwrap(),
            "var(--theme-layout-gutter, var(--theme-layout-gutter--sm))"
        );
    }

    #[test]
    fn suppressed_mode_inlines_a_fluid_clamp() {
        let ctx = context(json!({
            "disableBreakpointSpecificCustomProperties": true,
            "spacing": { "small": { "sm": 16, "lg": 40 } }
        }));
        let value = ctx.resolve("spacing-small").unwrap();
        assert!(value.starts_with("clamp(16px, calc("), "got {value}");
        assert!(value.ends_with("40px)"), "got {value}");
        assert!(!value.contains("--theme"), "got {value}");
    }

    #[test]
    fn suppressed_mode_collapses_flat_scales_to_pixels() {
        let ctx = context(json!({
            "disableBreakpointSpecificCustomProperties": true,
            "spacing": { "small": 16 }
        }));
        assert_eq!(ctx.resolve("spacing-small").unwrap(), "16px");
    }

    #[test]
    fn suppressed_mode_returns_none_for_unknown_fragments() {
        let ctx = context(json!({ "disableBreakpointSpecificCustomProperties": true }));
        assert_eq!(ctx.resolve("spacing-small"), None);
    }

    #[test]
    fn suppressed_mode_keeps_unitless_scales_bare() {
        let ctx = context(json!({
            "disableBreakpointSpecificCustomProperties": true,
            "fontSize": { "h1": { "fontSize": { "sm": 32, "lg": 56 }, "lineHeight": 1.2 } }
        }));
        assert_eq!(ctx.resolve("lineHeight-h1").unwrap(), "1.2");
        let size = ctx.resolve("fontSize-h1").unwrap();
        assert!(size.starts_with("clamp(32px,"), "got {size}");
    }

    #[test]
    fn suppressed_mode_inlines_text_values_from_the_small_tier() {
        let ctx = context(json!({
            "disableBreakpointSpecificCustomProperties": true,
            "spacing": { "edge": { "sm": "4vw", "lg": "2vw" } }
        }));
        assert_eq!(ctx.resolve("spacing-edge").unwrap(), "4vw");
    }

    #[test]
    fn directional_spacing_registers_a_stripped_alias() {
        let ctx = context(json!({
            "disableBreakpointSpecificCustomProperties": true,
            "horizontalSpacing": { "xs/h": { "sm": 8, "lg": 8 } }
        }));
        assert_eq!(ctx.resolve("horizontalSpacing-xs-h").unwrap(), "8px");
        assert_eq!(ctx.resolve("horizontalSpacing-xs").unwrap(), "8px");
    }

    #[test]
    fn fluid_interpolation_uses_the_viewport_range() {
        // 16px at 375, 40px at 1920: slope = 24/1545 per px of viewport.
        let ctx = context(json!({
            "disableBreakpointSpecificCustomProperties": true,
            "spacing": { "s": { "sm": 16, "lg": 40 } }
        }));
        let value = ctx.resolve("spacing-s").unwrap();
        assert_eq!(value, "clamp(16px, calc(10.1748px + 1.5534vw), 40px)");
    }

    #[test]
    fn negation_wraps_in_calc_without_inverting() {
        assert_eq!(
            negate("var(--theme-spacing-small, var(--theme-spacing-small--sm))"),
            "calc(var(--theme-spacing-small, var(--theme-spacing-small--sm)))"
        );
    }
}
