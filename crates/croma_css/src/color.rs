//! Color expression resolution.
//!
//! Every configured color collapses into one of two CSS expressions:
//! a `var()` with the literal color as fallback, or an `rgb(var())`
//! wrapper around a custom property that is expected to hold a bare
//! `R G B` channel triplet. The second form is what makes opacity
//! composition possible at the utility level.

use croma_tokens::{ColorValue, TokenConfig, TokenMap};

use crate::sanitize::sanitize_key;

/// The color token categories a configuration can carry, in the order
/// they are folded into the theme tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorCategory {
    Colors,
    Background,
    Text,
    Border,
}

impl ColorCategory {
    pub const ALL: [ColorCategory; 4] = [
        ColorCategory::Colors,
        ColorCategory::Background,
        ColorCategory::Text,
        ColorCategory::Border,
    ];

    /// The key this category uses in the token configuration.
    pub fn config_key(self) -> &'static str {
        match self {
            ColorCategory::Colors => "colors",
            ColorCategory::Background => "backgroundColors",
            ColorCategory::Text => "textColors",
            ColorCategory::Border => "borderColors",
        }
    }

    /// The key this category occupies in the emitted theme tree.
    pub fn theme_key(self) -> &'static str {
        match self {
            ColorCategory::Colors => "colors",
            ColorCategory::Background => "backgroundColor",
            ColorCategory::Text => "textColor",
            ColorCategory::Border => "borderColor",
        }
    }

    /// The custom property prefix its tokens resolve under, without the
    /// leading `--theme-`.
    pub fn variable_prefix(self) -> &'static str {
        match self {
            ColorCategory::Colors => "colors",
            ColorCategory::Background => "colors-background",
            ColorCategory::Text => "colors-text",
            ColorCategory::Border => "colors-border",
        }
    }

    pub fn tokens(self, config: &TokenConfig) -> &TokenMap<ColorValue> {
        match self {
            ColorCategory::Colors => &config.colors,
            ColorCategory::Background => &config.background_colors,
            ColorCategory::Text => &config.text_colors,
            ColorCategory::Border => &config.border_colors,
        }
    }
}

/// A resolved color, ready to be rendered into declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorExpr {
    /// `var(<variable>, <literal>)` - the token held a literal color.
    Var { variable: String, literal: String },
    /// `rgb(var(<variable>))` - the token held an `R G B` triplet and
    /// stays open for opacity composition.
    Rgb { variable: String },
}

impl ColorExpr {
    /// Builds the expression for a token under a category prefix.
    pub fn resolve(prefix: &str, token: &str, value: &ColorValue) -> ColorExpr {
        let variable = format!(
            "--theme-{}-{}",
            sanitize_key(prefix),
            sanitize_key(token)
        );
        match value {
            ColorValue::Literal(literal) => ColorExpr::Var {
                variable,
                literal: literal.clone(),
            },
            ColorValue::RgbTriplet(..) | ColorValue::RgbForced(_) => ColorExpr::Rgb { variable },
        }
    }

    /// An expression that renders as a plain `var()` reference with a
    /// fallback, used for pseudo tokens that never had a config value.
    pub fn var_with_fallback(variable: impl Into<String>, literal: impl Into<String>) -> ColorExpr {
        ColorExpr::Var {
            variable: variable.into(),
            literal: literal.into(),
        }
    }

    pub fn variable(&self) -> &str {
        match self {
            ColorExpr::Var { variable, .. } | ColorExpr::Rgb { variable } => variable,
        }
    }

    pub fn is_rgb(&self) -> bool {
        matches!(self, ColorExpr::Rgb { .. })
    }

    /// The literal fallback, if this expression carries one.
    pub fn literal(&self) -> Option<&str> {
        match self {
            ColorExpr::Var { literal, .. } => Some(literal),
            ColorExpr::Rgb { .. } => None,
        }
    }

    /// Renders the plain CSS value.
    pub fn css(&self) -> String {
        match self {
            ColorExpr::Var { variable, literal } => format!("var({variable}, {literal})"),
            ColorExpr::Rgb { variable } => format!("rgb(var({variable}))"),
        }
    }

    /// Renders the value with an opacity slot.
    ///
    /// Only triplet-backed colors can take opacity; literal values are
    /// returned unchanged. A fixed `opacity_value` wins over an
    /// `opacity_variable`, and the variable form falls back to `1`.
    pub fn css_with_opacity(
        &self,
        opacity_value: Option<&str>,
        opacity_variable: Option<&str>,
    ) -> String {
        match self {
            ColorExpr::Var { .. } => self.css(),
            ColorExpr::Rgb { variable } => {
                if let Some(value) = opacity_value {
                    format!("rgba(var({variable}), {value})")
                } else if let Some(opacity) = opacity_variable {
                    format!("rgba(var({variable}), var({opacity}, 1))")
                } else {
                    format!("rgb(var({variable}))")
                }
            }
        }
    }
}
