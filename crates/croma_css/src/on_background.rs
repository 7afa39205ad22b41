//! On-background relationship resolution.
//!
//! Color tokens can declare that they are meant to sit on top of a
//! specific background, either in kebab form (`on-primary-strong`) or
//! in camelCase form (`onPrimaryStrong`). Both forms split the token
//! into the background it targets and the relationship's own name.

use croma_tokens::TokenConfig;

use crate::color::ColorCategory;

/// A token split into its background target and its own name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnBackground {
    /// The background token the relationship targets, e.g. `primary`.
    pub background: String,
    /// The relationship's own name with a lowercased first character,
    /// e.g. `strong`.
    pub name: String,
}

/// Splits an `on-*` / `on*` token against the configured background
/// names. Returns `None` when the token does not follow either form or
/// no background matches.
///
/// Longer background names win: with backgrounds `primary` and
/// `primary-dark`, the token `on-primary-dark-text` resolves against
/// `primary-dark`, not `primary`.
pub fn split_on_background(token: &str, backgrounds: &[&str]) -> Option<OnBackground> {
    let mut candidates: Vec<&str> = backgrounds.to_vec();
    candidates.sort_by(|a, b| b.len().cmp(&a.len()));

    if let Some(rest) = token.strip_prefix("on-") {
        for background in &candidates {
            if rest.starts_with(background) && rest.len() != background.len() {
                // Drop the matched background plus one separator char.
                let mut chars = rest[background.len()..].chars();
                chars.next();
                let remainder = chars.as_str();
                return Some(OnBackground {
                    background: (*background).to_string(),
                    name: lowercase_first(remainder),
                });
            }
        }
        return None;
    }

    // camelCase form: "on" followed by an uppercased background name.
    let rest = token.strip_prefix("on")?;
    if !rest.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        return None;
    }
    for background in &candidates {
        let capitalized = uppercase_first(background);
        if rest.starts_with(capitalized.as_str()) && rest.len() != capitalized.len() {
            let remainder = &rest[capitalized.len()..];
            return Some(OnBackground {
                background: (*background).to_string(),
                name: lowercase_first(remainder),
            });
        }
    }
    None
}

/// One resolved relationship across the color categories: the token
/// `full_name` in `category` targets `background` under the short
/// `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub category: ColorCategory,
    pub full_name: String,
    pub background: String,
    pub name: String,
}

/// Walks every color category and collects all tokens that resolve as
/// on-background relationships against the configured background
/// colors.
pub fn collect_relationships(config: &TokenConfig) -> Vec<Relationship> {
    let backgrounds: Vec<&str> = config.background_colors.keys().map(String::as_str).collect();
    if backgrounds.is_empty() {
        return Vec::new();
    }
    let mut relationships = Vec::new();
    for category in ColorCategory::ALL {
        for token in category.tokens(config).keys() {
            if let Some(split) = split_on_background(token, &backgrounds) {
                if !split.name.is_empty() {
                    relationships.push(Relationship {
                        category,
                        full_name: token.clone(),
                        background: split.background,
                        name: split.name,
                    });
                }
            }
        }
    }
    relationships
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn uppercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
