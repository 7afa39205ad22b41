//! Utility rule generation.
//!
//! The rule list is the matcher side of the compiler: an ordered set of
//! descriptors, each pairing an anchored matcher with a resolver that
//! turns a matched selector into CSS declarations. Resolvers return
//! `None` when the rule does not apply, letting the consuming engine
//! fall through to the next rule. Registration order matters twice:
//! the `bg-scope` variant must follow the `bg` rule, and the layout
//! margin/gutter rule carries sort metadata so it wins over generic
//! margin shorthands.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use regex::{Captures, Regex};
use tracing::debug;

use croma_tokens::{LayoutMax, TextProperty, TokenConfig};

use crate::color::{ColorCategory, ColorExpr};
use crate::columns::ColumnGrid;
use crate::fallback::{negate, ValueContext};
use crate::on_background::{collect_relationships, Relationship};
use crate::pattern::Pattern;
use crate::restructure::Typography;
use crate::sanitize::sanitize_key;

/// CSS declarations in emission order.
pub type Declarations = IndexMap<String, String>;

/// Context handed to a resolver for one matched selector.
pub struct RuleMatch<'a> {
    pub captures: Captures<'a>,
    /// The selector as written, including any negation prefix.
    pub raw_selector: &'a str,
    /// The fragment the matcher ran against.
    pub current_selector: &'a str,
}

type Resolver = Box<dyn Fn(&RuleMatch<'_>) -> Option<Declarations> + Send + Sync>;

/// Autocomplete and ordering metadata attached to a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMeta {
    /// Template in selector DSL form, e.g. `(w|h)-(small|large)`.
    pub autocomplete: String,
    /// Pattern of rules this one must sort before, if any.
    pub sort_before: Option<&'static str>,
}

/// One utility rule: matcher, resolver, metadata.
pub struct RuleDescriptor {
    matcher: Regex,
    resolver: Resolver,
    meta: RuleMeta,
}

impl RuleDescriptor {
    pub fn matcher(&self) -> &Regex {
        &self.matcher
    }

    pub fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    /// Runs the matcher and, on a hit, the resolver. `raw_selector` is
    /// the selector as authored; `current_selector` the fragment with
    /// variant prefixes already stripped.
    pub fn try_resolve<'a>(
        &self,
        raw_selector: &'a str,
        current_selector: &'a str,
    ) -> Option<Declarations> {
        let captures = self.matcher.captures(current_selector)?;
        (self.resolver)(&RuleMatch {
            captures,
            raw_selector,
            current_selector,
        })
    }
}

impl fmt::Debug for RuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDescriptor")
            .field("matcher", &self.matcher.as_str())
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

// Utility name groups, mirroring the property sets the selectors
// compose over.
const SIZES: &[&str] = &["w", "h", "min-w", "min-h", "max-w", "max-h"];
const WIDTHS: &[&str] = &["w", "max-w", "min-w"];
const HEIGHTS: &[&str] = &["h", "max-h", "min-h"];
const MARGINS: &[&str] = &["m", "mx", "my", "mt", "mb", "ml", "mr"];
const MARGINS_X: &[&str] = &["mx", "ml", "mr"];
const MARGINS_Y: &[&str] = &["my", "mt", "mb"];
const PADDINGS: &[&str] = &["p", "px", "py", "pt", "pb", "pl", "pr"];
const PADDINGS_X: &[&str] = &["px", "pl", "pr"];
const PADDINGS_Y: &[&str] = &["py", "pt", "pb"];
const INSETS: &[&str] = &["inset", "inset-x", "inset-y", "top", "right", "bottom", "left"];
const INSETS_X: &[&str] = &["inset-x", "left", "right"];
const INSETS_Y: &[&str] = &["inset-y", "top", "bottom"];
const TRANSLATIONS: &[&str] = &["translate-x", "translate-y"];
const TRANSLATIONS_X: &[&str] = &["translate-x"];
const TRANSLATIONS_Y: &[&str] = &["translate-y"];
const GAPS: &[&str] = &["gap", "gap-x", "gap-y"];
const GAPS_X: &[&str] = &["gap-x"];
const GAPS_Y: &[&str] = &["gap-y"];
const BORDER_RADIUS: &[&str] = &[
    "rounded",
    "rounded-s",
    "rounded-e",
    "rounded-t",
    "rounded-r",
    "rounded-b",
    "rounded-l",
    "rounded-tl",
    "rounded-tr",
    "rounded-br",
    "rounded-bl",
];

/// The CSS properties a utility name targets. Logical corner utilities
/// expand to two declarations; unmapped names (`inset`, `top`, `gap`,
/// ...) pass through as-is.
fn css_properties(utility: &str) -> Vec<String> {
    let mapped: &[&str] = match utility {
        "text" => &["color"],
        "border" => &["border-color"],
        "bg" => &["background-color"],
        "w" => &["width"],
        "h" => &["height"],
        "min-w" => &["min-width"],
        "min-h" => &["min-height"],
        "max-w" => &["max-width"],
        "max-h" => &["max-height"],
        "p" => &["padding"],
        "px" => &["padding-inline"],
        "py" => &["padding-block"],
        "pt" => &["padding-top"],
        "pb" => &["padding-bottom"],
        "pl" => &["padding-left"],
        "pr" => &["padding-right"],
        "m" => &["margin"],
        "mx" => &["margin-inline"],
        "my" => &["margin-block"],
        "mt" => &["margin-top"],
        "mb" => &["margin-bottom"],
        "ml" => &["margin-left"],
        "mr" => &["margin-right"],
        "inset-x" => &["inset-inline"],
        "inset-y" => &["inset-block"],
        "translate-x" => &["--theme-translate-x"],
        "translate-y" => &["--theme-translate-y"],
        "gap-x" => &["column-gap"],
        "gap-y" => &["row-gap"],
        "rounded" => &["border-radius"],
        "rounded-s" => &["border-start-start-radius", "border-end-start-radius"],
        "rounded-e" => &["border-start-end-radius", "border-end-end-radius"],
        "rounded-t" => &["border-top-left-radius", "border-top-right-radius"],
        "rounded-r" => &["border-top-right-radius", "border-bottom-right-radius"],
        "rounded-b" => &["border-bottom-left-radius", "border-bottom-right-radius"],
        "rounded-l" => &["border-top-left-radius", "border-bottom-left-radius"],
        "rounded-tl" => &["border-top-left-radius"],
        "rounded-tr" => &["border-top-right-radius"],
        "rounded-br" => &["border-bottom-right-radius"],
        "rounded-bl" => &["border-bottom-left-radius"],
        _ => return vec![utility.to_string()],
    };
    mapped.iter().map(|s| (*s).to_string()).collect()
}

/// Whether the matched fragment is negated in the authored selector:
/// the character immediately before it must be `-`.
fn is_negative(raw_selector: &str, current_selector: &str) -> bool {
    match raw_selector.find(current_selector) {
        Some(index) if index > 0 => raw_selector.as_bytes()[index - 1] == b'-',
        _ => false,
    }
}

/// The synthetic `transform` declaration for translate utilities.
fn transform_value(current_selector: &str) -> Option<String> {
    if !current_selector.contains("translate-x") && !current_selector.contains("translate-y") {
        return None;
    }
    Some(
        "translateX(var(--theme-translate-x, 0)) translateY(var(--theme-translate-y, 0))"
            .to_string(),
    )
}

/// `(-?number)(unit)?`: values a color literal must not look like, so
/// sizing tokens that leaked into a color map fall through to the
/// sizing rules instead of producing a nonsense color declaration.
fn number_with_unit_re() -> Regex {
    Regex::new(
        r"(?i)^(-?\d*(?:\.\d+)?)(px|pt|pc|%|r?(?:em|ex|lh|cap|ch|ic)|(?:[sld]?v|cq)(?:[whib]|min|max)|in|cm|mm|rpx)?$",
    )
    .unwrap_or_else(|e| unreachable!("static regex: {e}"))
}

/// The token fragment after the matched utility name, e.g.
/// `mt-layout-margin` with utility `mt` yields `layout-margin`.
fn token_after<'a>(current_selector: &'a str, utility: &str) -> Option<&'a str> {
    let prefix = format!("{utility}-");
    let token = current_selector.split(&prefix).last()?;
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

fn alt_over(groups: &[&[&str]]) -> Pattern {
    Pattern::any_of(groups.iter().flat_map(|g| g.iter().copied()))
}

/// Colors overlaid with a category's own map; category entries win.
fn merged_colors(config: &TokenConfig, category: ColorCategory) -> IndexMap<String, ColorExpr> {
    let mut map = IndexMap::new();
    for (token, value) in &config.colors {
        map.insert(
            token.clone(),
            ColorExpr::resolve(ColorCategory::Colors.variable_prefix(), token, value),
        );
    }
    for (token, value) in category.tokens(config) {
        map.insert(
            token.clone(),
            ColorExpr::resolve(category.variable_prefix(), token, value),
        );
    }
    map
}

/// Builds the ordered utility rule list for a configuration.
pub fn build_utility_rules(config: &TokenConfig) -> Vec<RuleDescriptor> {
    let typography = Typography::from_config(config);
    let ctx = Arc::new(ValueContext::new(config, &typography));
    let relationships: Arc<[Relationship]> = collect_relationships(config).into();

    let mut rules = Vec::new();

    // Text and border color rules.
    for (utility, category, opacity) in [
        ("text", ColorCategory::Text, "--theme-text-opacity"),
        ("border", ColorCategory::Border, "--theme-border-opacity"),
    ] {
        let colors = merged_colors(config, category);
        if colors.is_empty() {
            continue;
        }
        let unit_re = number_with_unit_re();
        let property = css_properties(utility).remove(0);
        rules.push(RuleDescriptor {
            matcher: open_matcher(utility),
            resolver: Box::new(move |m| {
                let token = m.captures.get(1)?.as_str();
                let expr = colors.get(token)?;
                if expr.literal().is_some_and(|lit| unit_re.is_match(lit)) {
                    return None;
                }
                let mut decls = Declarations::new();
                decls.insert(
                    property.clone(),
                    expr.css_with_opacity(None, Some(opacity)),
                );
                Some(decls)
            }),
            meta: RuleMeta {
                autocomplete: format!("{utility}-${utility}Color"),
                sort_before: None,
            },
        });
    }

    // Background color rule plus its scope-only variant, in that order.
    let background_colors = {
        let mut map = IndexMap::new();
        if !config.colors.is_empty() || !config.background_colors.is_empty() {
            map.insert(
                "bgCurrent".to_string(),
                ColorExpr::var_with_fallback("--bgCurrent", "transparent"),
            );
            for (token, expr) in merged_colors(config, ColorCategory::Background) {
                map.insert(token, expr);
            }
        }
        map
    };
    if !background_colors.is_empty() {
        for scope_only in [false, true] {
            let utility = if scope_only { "bg-scope" } else { "bg" };
            let colors = background_colors.clone();
            let relationships = Arc::clone(&relationships);
            rules.push(RuleDescriptor {
                matcher: open_matcher(utility),
                resolver: Box::new(move |m| {
                    let token = m.captures.get(1)?.as_str();
                    let expr = colors.get(token)?;
                    let color = expr.css_with_opacity(None, Some("--theme-bg-opacity"));
                    let mut decls = Declarations::new();
                    if !scope_only {
                        decls.insert("background-color".to_string(), color.clone());
                    }
                    if token != "bgCurrent" {
                        decls.insert("--bgCurrent".to_string(), color);
                    }
                    for relationship in relationships.iter() {
                        if relationship.background != token {
                            continue;
                        }
                        let prefix = relationship.category.variable_prefix();
                        decls.insert(
                            format!(
                                "--theme-{prefix}-{}-on-X",
                                sanitize_key(&relationship.name)
                            ),
                            format!(
                                "var(--theme-{prefix}-{})",
                                sanitize_key(&relationship.full_name)
                            ),
                        );
                    }
                    Some(decls)
                }),
                meta: RuleMeta {
                    autocomplete: format!("{utility}-$backgroundColor"),
                    sort_before: None,
                },
            });
        }
    }

    // Layout rules.
    if let Some(layout) = config.layout.as_ref().filter(|l| !l.is_empty()) {
        let spacing_properties = alt_over(&[SIZES, MARGINS, PADDINGS, INSETS, TRANSLATIONS, GAPS]);

        // Margin and gutter, applicable across the full spacing set.
        {
            let ctx = Arc::clone(&ctx);
            let pattern = Pattern::Seq(vec![
                spacing_properties.clone(),
                Pattern::any_of(["layout-gutter", "layout-margin"]),
            ]);
            let autocomplete = pattern.template();
            rules.push(RuleDescriptor {
                matcher: compile(&pattern),
                resolver: Box::new(move |m| {
                    let utility = m.captures.get(1)?.as_str();
                    let token = token_after(m.current_selector, utility)?;
                    let mut value = ctx.resolve(&sanitize_key(token))?;
                    if is_negative(m.raw_selector, m.current_selector) {
                        value = negate(&value);
                    }
                    let mut decls = Declarations::new();
                    for property in css_properties(utility) {
                        decls.insert(property, value.clone());
                    }
                    if let Some(transform) = transform_value(m.current_selector) {
                        decls.insert("transform".to_string(), transform);
                    }
                    Some(decls)
                }),
                meta: RuleMeta {
                    autocomplete,
                    sort_before: Some(r"^ma?()-?(-?.+)$"),
                },
            });
        }

        // Layout max, width-like properties only.
        {
            let ctx = Arc::clone(&ctx);
            let max = layout.max;
            let pattern = Pattern::Seq(vec![
                Pattern::any_of(WIDTHS.iter().copied()),
                Pattern::literal("layout-max"),
            ]);
            let autocomplete = pattern.template();
            rules.push(RuleDescriptor {
                matcher: compile(&pattern),
                resolver: Box::new(move |m| {
                    let max = max?;
                    let utility = m.captures.get(1)?.as_str();
                    let mut value = if ctx.suppressed() {
                        match max {
                            LayoutMax::Px(px) => {
                                format!("{}px", croma_tokens::format_number(px))
                            }
                            LayoutMax::Viewport => {
                                "var(--visual-viewport-width, 100vw)".to_string()
                            }
                        }
                    } else {
                        "var(--theme-layout-max, var(--theme-layout-max--sm))".to_string()
                    };
                    if is_negative(m.raw_selector, m.current_selector) {
                        value = negate(&value);
                    }
                    let mut decls = Declarations::new();
                    for property in css_properties(utility) {
                        decls.insert(property, value.clone());
                    }
                    Some(decls)
                }),
                meta: RuleMeta {
                    autocomplete,
                    sort_before: None,
                },
            });
        }

        // Column fractions.
        if let Some(grid) = ColumnGrid::from_layout(layout) {
            let ctx = Arc::clone(&ctx);
            let layout = layout.clone();
            let pattern = Pattern::Seq(vec![
                spacing_properties.clone(),
                Pattern::Cat(vec![
                    Pattern::Number,
                    Pattern::literal("/"),
                    Pattern::any_of(grid.counts().iter().map(|n| n.to_string())),
                    Pattern::literal("col"),
                ]),
            ]);
            let autocomplete = pattern.template();
            rules.push(RuleDescriptor {
                matcher: compile(&pattern),
                resolver: Box::new(move |m| {
                    let utility = m.captures.get(1)?.as_str();
                    let token = token_after(m.current_selector, utility)?;
                    let fraction = token.strip_suffix("col")?;
                    let (columns, count) = fraction.split_once('/')?;
                    let columns: f64 = columns.parse().ok()?;
                    let count: u32 = count.parse().ok()?;
                    if !grid.contains(count) {
                        return None;
                    }
                    let value = grid.rule_fraction(&ctx, &layout, columns, count);
                    let mut decls = Declarations::new();
                    for property in css_properties(utility) {
                        decls.insert(property, value.clone());
                    }
                    if let Some(transform) = transform_value(m.current_selector) {
                        decls.insert("transform".to_string(), transform);
                    }
                    Some(decls)
                }),
                meta: RuleMeta {
                    autocomplete,
                    sort_before: None,
                },
            });
        }
    }

    // Spacing rules: the shared scale, then the directional ones.
    let spacing_rules: [(&str, Vec<&str>, Vec<&[&str]>); 3] = [
        (
            "spacing",
            config.spacing.keys().map(String::as_str).collect(),
            vec![SIZES, MARGINS, PADDINGS, INSETS, TRANSLATIONS, GAPS],
        ),
        (
            "horizontalSpacing",
            config.horizontal_spacing.keys().map(String::as_str).collect(),
            vec![WIDTHS, MARGINS_X, PADDINGS_X, INSETS_X, TRANSLATIONS_X, GAPS_X],
        ),
        (
            "verticalSpacing",
            config.vertical_spacing.keys().map(String::as_str).collect(),
            vec![HEIGHTS, MARGINS_Y, PADDINGS_Y, INSETS_Y, TRANSLATIONS_Y, GAPS_Y],
        ),
    ];
    for (category, tokens, groups) in spacing_rules {
        if tokens.is_empty() {
            continue;
        }
        let ctx = Arc::clone(&ctx);
        let pattern = Pattern::Seq(vec![alt_over(&groups), Pattern::any_of(tokens)]);
        let autocomplete = pattern.template();
        rules.push(RuleDescriptor {
            matcher: compile(&pattern),
            resolver: Box::new(move |m| {
                let utility = m.captures.get(1)?.as_str();
                let token = token_after(m.current_selector, utility)?;
                let fragment = format!("{category}-{}", sanitize_key(token));
                let mut value = ctx.resolve(&fragment)?;
                if is_negative(m.raw_selector, m.current_selector) {
                    value = negate(&value);
                }
                let mut decls = Declarations::new();
                for property in css_properties(utility) {
                    decls.insert(property, value.clone());
                }
                if let Some(transform) = transform_value(m.current_selector) {
                    decls.insert("transform".to_string(), transform);
                }
                Some(decls)
            }),
            meta: RuleMeta {
                autocomplete,
                sort_before: None,
            },
        });
    }

    // Text rule: font size plus every configured companion property.
    let font_size_tokens: Vec<String> = typography
        .font_size_tokens()
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    if !font_size_tokens.is_empty() {
        let pattern = Pattern::Seq(vec![
            Pattern::literal("text"),
            Pattern::any_of(font_size_tokens.iter().cloned()),
        ]);
        let autocomplete = pattern.template();
        let typography = typography.clone();
        rules.push(RuleDescriptor {
            matcher: compile(&pattern),
            resolver: Box::new(move |m| {
                let token = token_after(m.current_selector, "text")?;
                let key = sanitize_key(token);
                let mut decls = Declarations::new();
                decls.insert(
                    "font-size".to_string(),
                    format!("var(--theme-fontSize-{key})"),
                );
                for property in TextProperty::RULE_PROPERTIES {
                    if typography.bucket(property).is_none() {
                        continue;
                    }
                    let css_property = property.css_property().to_string();
                    let configured = typography.contains(property, token);
                    let value = match (property, configured) {
                        (TextProperty::ParagraphSpacing, true) => {
                            format!("var(--theme-paragraphSpacing-{key}, 0)")
                        }
                        (TextProperty::ParagraphSpacing, false) => "0".to_string(),
                        (_, true) => {
                            format!("var(--theme-{}-{key})", property.config_key())
                        }
                        (_, false) => "initial".to_string(),
                    };
                    decls.insert(css_property, value);
                }
                Some(decls)
            }),
            meta: RuleMeta {
                autocomplete,
                sort_before: None,
            },
        });
    }

    // Border radius rule.
    if !config.border_radius.is_empty() {
        let ctx = Arc::clone(&ctx);
        let pattern = Pattern::Seq(vec![
            Pattern::any_of(BORDER_RADIUS.iter().copied()),
            Pattern::any_of(config.border_radius.keys().cloned()),
        ]);
        let autocomplete = pattern.template();
        rules.push(RuleDescriptor {
            matcher: compile(&pattern),
            resolver: Box::new(move |m| {
                let utility = m.captures.get(1)?.as_str();
                let token = token_after(m.current_selector, utility)?;
                let value = ctx.resolve(&format!("borderRadius-{}", sanitize_key(token)))?;
                let mut decls = Declarations::new();
                for property in css_properties(utility) {
                    decls.insert(property, value.clone());
                }
                Some(decls)
            }),
            meta: RuleMeta {
                autocomplete,
                sort_before: None,
            },
        });
    }

    debug!(rules = rules.len(), "built utility rules");
    rules
}

/// Compiles a pattern, which is infallible for the patterns this module
/// assembles: every fragment is either escaped or a fixed sub-regex.
fn compile(pattern: &Pattern) -> Regex {
    pattern
        .compile()
        .unwrap_or_else(|e| unreachable!("selector pattern failed to compile: {e}"))
}

/// An open-ended matcher for color rules: any token after the utility
/// name, validated against the theme map at resolve time.
fn open_matcher(utility: &str) -> Regex {
    Regex::new(&format!("^{}-(.+)$", regex::escape(utility)))
        .unwrap_or_else(|e| unreachable!("static matcher: {e}"))
}
