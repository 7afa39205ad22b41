//! # croma_css
//!
//! Turns a decoded [`croma_tokens::TokenConfig`] into the two artifacts
//! a utility-CSS engine consumes:
//!
//! - a **theme utility tree** ([`build_theme_utilities`]): nested
//!   token-name → CSS-value maps backed by `--theme-*` custom
//!   properties with breakpoint fallback chains, and
//! - an ordered **utility rule list** ([`build_utility_rules`]):
//!   regex matchers paired with resolvers that produce declarations
//!   for selectors like `mt-small`, `w-4/12col` or `bg-primary`.
//!
//! Both honor the configuration's
//! `disableBreakpointSpecificCustomProperties` flag by inlining fluid
//! `clamp()` values instead of emitting variable chains.
//!
//! ```
//! use croma_tokens::TokenConfig;
//! use croma_css::{build_theme_utilities, build_utility_rules};
//!
//! let config = TokenConfig::from_json_str(
//!     r#"{ "spacing": { "small": { "sm": 16, "lg": 24 } } }"#,
//! ).unwrap();
//!
//! let tree = build_theme_utilities(&config);
//! assert!(tree.contains_key("spacing"));
//!
//! let rules = build_utility_rules(&config);
//! let decls = rules
//!     .iter()
//!     .find_map(|rule| rule.try_resolve("mt-small", "mt-small"))
//!     .unwrap();
//! assert_eq!(
//!     decls["margin-top"],
//!     "var(--theme-spacing-small, var(--theme-spacing-small--sm))"
//! );
//! ```

pub mod color;
pub mod columns;
pub mod fallback;
pub mod on_background;
pub mod pattern;
pub mod restructure;
pub mod rules;
pub mod sanitize;
pub mod theme_tree;

pub use color::{ColorCategory, ColorExpr};
pub use columns::ColumnGrid;
pub use fallback::{negate, ScaleUnit, ValueContext};
pub use on_background::{collect_relationships, split_on_background, OnBackground, Relationship};
pub use pattern::Pattern;
pub use restructure::Typography;
pub use rules::{build_utility_rules, Declarations, RuleDescriptor, RuleMatch, RuleMeta};
pub use sanitize::sanitize_key;
pub use theme_tree::{build_theme_utilities, ThemeTree, ThemeValue};

/// Resolves one color token to its CSS expression under a variable
/// prefix, classifying literal and triplet forms.
pub fn resolve_color_expression(
    prefix: &str,
    token: &str,
    value: &croma_tokens::ColorValue,
) -> ColorExpr {
    ColorExpr::resolve(prefix, token, value)
}
