//! Subset projection over configuration-shaped trees
//!
//! Consumers rarely want a whole theme configuration; this projects a
//! partial view out of any JSON tree sharing the configuration's shape.
//! Empty branches and null entries are dropped at every nesting level; a
//! selector that matches nothing yields `None`, never an empty object.

use indexmap::IndexMap;
use regex::Regex;

/// A projection selector.
///
/// - `Key` picks a single key;
/// - `Keys` picks a list of keys;
/// - `Pattern` picks every key matching a regular expression;
/// - `Nested` combines the above per key, with `/re/` spelled keys matched
///   as patterns over sibling keys.
#[derive(Clone, Debug)]
pub enum Selector {
    Key(String),
    Keys(Vec<String>),
    Pattern(Regex),
    Nested(IndexMap<String, SelectorEntry>),
}

/// One entry of a nested selector.
#[derive(Clone, Debug)]
pub enum SelectorEntry {
    /// `true` includes the whole subtree, `false` skips the key.
    Include(bool),
    /// Recurse with a nested selector.
    Select(Selector),
}

impl From<bool> for SelectorEntry {
    fn from(include: bool) -> Self {
        SelectorEntry::Include(include)
    }
}

impl From<Selector> for SelectorEntry {
    fn from(selector: Selector) -> Self {
        SelectorEntry::Select(selector)
    }
}

/// Project a subset out of a JSON tree.
///
/// Returns `None` when the input is not an object, the selector matches
/// nothing, or every matched branch collapses to empty.
pub fn subset(value: &serde_json::Value, selector: &Selector) -> Option<serde_json::Value> {
    let map = value.as_object()?;

    let mut result = serde_json::Map::new();
    match selector {
        Selector::Key(key) => {
            if let Some(v) = map.get(key) {
                insert_kept(&mut result, key, v.clone());
            }
        }
        Selector::Keys(keys) => {
            for key in keys {
                if let Some(v) = map.get(key) {
                    insert_kept(&mut result, key, v.clone());
                }
            }
        }
        Selector::Pattern(re) => {
            for (key, v) in map {
                if re.is_match(key) {
                    insert_kept(&mut result, key, v.clone());
                }
            }
        }
        Selector::Nested(entries) => {
            for (key, entry) in entries {
                match parse_pattern_key(key) {
                    Some(re) => {
                        for (obj_key, v) in map {
                            if re.is_match(obj_key) {
                                apply_entry(&mut result, obj_key, v, entry);
                            }
                        }
                    }
                    None => {
                        if let Some(v) = map.get(key) {
                            apply_entry(&mut result, key, v, entry);
                        }
                    }
                }
            }
        }
    }

    if result.is_empty() {
        None
    } else {
        Some(serde_json::Value::Object(result))
    }
}

fn apply_entry(
    out: &mut serde_json::Map<String, serde_json::Value>,
    key: &str,
    value: &serde_json::Value,
    entry: &SelectorEntry,
) {
    match entry {
        SelectorEntry::Include(false) => {}
        SelectorEntry::Include(true) => insert_kept(out, key, value.clone()),
        SelectorEntry::Select(selector) => {
            if let Some(projected) = subset(value, selector) {
                out.insert(key.to_string(), projected);
            }
        }
    }
}

/// Drop nulls and empty objects instead of inserting them.
fn insert_kept(
    out: &mut serde_json::Map<String, serde_json::Value>,
    key: &str,
    value: serde_json::Value,
) {
    let empty = match &value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(m) => m.is_empty(),
        _ => false,
    };
    if !empty {
        out.insert(key.to_string(), value);
    }
}

/// Keys spelled `/pattern/flags` select by pattern; only the `i` flag is
/// meaningful for key matching.
fn parse_pattern_key(key: &str) -> Option<Regex> {
    let rest = key.strip_prefix('/')?;
    let slash = rest.rfind('/')?;
    let (pattern, flags) = rest.split_at(slash);
    let flags = &flags[1..];
    let pattern = if flags.contains('i') {
        format!("(?i){pattern}")
    } else {
        pattern.to_string()
    };
    Regex::new(&pattern).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn string_selector_picks_one_key() {
        let v = json!({"a": 1, "b": 2});
        assert_eq!(subset(&v, &Selector::Key("a".into())), Some(json!({"a": 1})));
        assert_eq!(subset(&v, &Selector::Key("missing".into())), None);
    }

    #[test]
    fn nested_selector_projects_subtrees() {
        let v = json!({"a": {"b": 1, "c": 2}});
        let selector = Selector::Nested(IndexMap::from([(
            "a".to_string(),
            SelectorEntry::Select(Selector::Nested(IndexMap::from([(
                "b".to_string(),
                SelectorEntry::Include(true),
            )]))),
        )]));
        assert_eq!(subset(&v, &selector), Some(json!({"a": {"b": 1}})));
    }

    #[test]
    fn pattern_selector_matches_key_prefixes() {
        let v = json!({"onPrimary": 1, "onSecondary": 2, "primary": 3});
        let out = subset(&v, &Selector::Pattern(Regex::new("^on").unwrap())).unwrap();
        assert_eq!(out, json!({"onPrimary": 1, "onSecondary": 2}));
    }

    #[test]
    fn regex_spelled_keys_match_siblings() {
        let v = json!({"textColors": {"x": 1}, "borderColors": {"y": 2}, "layout": {}});
        let selector = Selector::Nested(IndexMap::from([(
            "/Colors$/".to_string(),
            SelectorEntry::Include(true),
        )]));
        assert_eq!(
            subset(&v, &selector),
            Some(json!({"textColors": {"x": 1}, "borderColors": {"y": 2}}))
        );
    }

    #[test]
    fn empty_branches_are_omitted_not_returned_as_empty_objects() {
        let v = json!({"a": {}});
        let selector = Selector::Nested(IndexMap::from([(
            "a".to_string(),
            SelectorEntry::Include(true),
        )]));
        assert_eq!(subset(&v, &selector), None);

        let v = json!({"a": {"b": {}}});
        let selector = Selector::Nested(IndexMap::from([(
            "a".to_string(),
            SelectorEntry::Select(Selector::Key("b".into())),
        )]));
        assert_eq!(subset(&v, &selector), None);
    }

    #[test]
    fn false_entries_and_nulls_are_skipped() {
        let v = json!({"a": 1, "b": null});
        let selector = Selector::Nested(IndexMap::from([
            ("a".to_string(), SelectorEntry::Include(false)),
            ("b".to_string(), SelectorEntry::Include(true)),
        ]));
        assert_eq!(subset(&v, &selector), None);
    }

    #[test]
    fn non_object_input_yields_none() {
        assert_eq!(subset(&json!("text"), &Selector::Key("a".into())), None);
        assert_eq!(subset(&json!(null), &Selector::Key("a".into())), None);
    }
}
