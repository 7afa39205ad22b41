//! Token key sanitization.
//!
//! Config authors are free to use characters like `/` or `.` in token
//! names (`"xs/h"`, `"1.5"`). Custom property names cannot carry those,
//! so every key is funneled through [`sanitize_key`] before it becomes
//! part of a `--theme-*` variable name.

/// Replaces every character outside `[a-zA-Z0-9]` with `-`.
///
/// The mapping is per character, so consecutive special characters
/// produce consecutive dashes and the output length always equals the
/// input length (in characters).
pub fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}
