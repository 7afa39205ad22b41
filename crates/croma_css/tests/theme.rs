use croma_css::{build_theme_utilities, ThemeTree, ThemeValue};
use croma_tokens::TokenConfig;
use serde_json::json;

fn default_style_config() -> serde_json::Value {
    json!({
        "colors": {
            "white": "#ffffff",
            "brand": "0 82 255"
        },
        "backgroundColors": { "primary": "10 20 30", "canvas": "#f5f5f5" },
        "textColors": { "body": "30 30 30", "onPrimaryStrong": "240 240 240" },
        "layout": {
            "margin": { "sm": 24, "md": 48, "lg": 96 },
            "gutter": { "sm": 16, "md": 24, "lg": 24 },
            "columns": { "sm": 8, "md": 12, "lg": 12 },
            "max": 1920
        },
        "spacing": { "small": { "sm": 16, "md": 24, "lg": 32 } },
        "horizontalSpacing": { "xs/h": { "sm": 8, "lg": 12 } },
        "verticalSpacing": { "xs/v": { "sm": 8, "lg": 12 } },
        "borderRadius": { "card": 8 },
        "containers": { "content": "768px" },
        "fontSize": {
            "h1": {
                "fontSize": { "sm": 32, "md": 48, "lg": 56 },
                "lineHeight": 1.2
            },
            "body": { "fontSize": 16, "lineHeight": 1.5 }
        }
    })
}

fn tree_of(value: serde_json::Value) -> ThemeTree {
    build_theme_utilities(&TokenConfig::from_value(value).unwrap())
}

fn leaf(tree: &ThemeTree, path: &[&str]) -> String {
    let mut node = tree.get(path[0]).unwrap_or_else(|| panic!("missing {}", path[0]));
    for key in &path[1..] {
        let ThemeValue::Group(group) = node else {
            panic!("{key}: parent is not a group");
        };
        node = group.get(*key).unwrap_or_else(|| panic!("missing {key}"));
    }
    match serde_json::to_value(node).unwrap() {
        serde_json::Value::String(s) => s,
        other => panic!("expected string leaf, got {other}"),
    }
}

#[test]
fn full_tree_contains_every_configured_branch() {
    let tree = tree_of(default_style_config());
    let keys: Vec<&str> = tree.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "colors",
            "backgroundColor",
            "textColor",
            "layout",
            "spacing",
            "horizontalSpacing",
            "verticalSpacing",
            "borderRadius",
            "fontSize",
            "lineHeight",
            "containers",
        ]
    );
}

#[test]
fn literal_and_triplet_colors_render_distinctly() {
    let tree = tree_of(default_style_config());
    assert_eq!(
        leaf(&tree, &["colors", "white"]),
        "var(--theme-colors-white, #ffffff)"
    );
    assert_eq!(leaf(&tree, &["colors", "brand"]), "rgb(var(--theme-colors-brand))");
    assert_eq!(
        leaf(&tree, &["backgroundColor", "primary"]),
        "rgb(var(--theme-colors-background-primary))"
    );
}

#[test]
fn on_background_relationships_register_placeholder_entries() {
    let tree = tree_of(default_style_config());
    assert_eq!(
        leaf(&tree, &["textColor", "strong"]),
        "rgb(var(--theme-colors-text-strong-on-X))"
    );
}

#[test]
fn relationship_entries_win_over_plain_tokens_of_the_same_name() {
    let mut raw = default_style_config();
    // A plain "strong" token alongside "onPrimaryStrong": the
    // relationship placeholder takes the slot.
    raw["textColors"]["strong"] = json!("1 2 3");
    let tree = tree_of(raw);
    assert_eq!(
        leaf(&tree, &["textColor", "strong"]),
        "rgb(var(--theme-colors-text-strong-on-X))"
    );
}

#[test]
fn layout_max_uses_the_configured_pixel_fallback() {
    let tree = tree_of(default_style_config());
    assert_eq!(leaf(&tree, &["layout", "max"]), "var(--theme-layout-max, 1920px)");
}

#[test]
fn column_fractions_expand_for_every_distinct_count() {
    let tree = tree_of(default_style_config());
    let ThemeValue::Group(columns) = &tree["layout"] else {
        panic!("layout missing");
    };
    let ThemeValue::Group(columns) = &columns["columns"] else {
        panic!("columns missing");
    };
    assert_eq!(columns.len(), 8 + 12);
    assert!(columns.contains_key("1/8col"));
    assert!(columns.contains_key("12/12col"));
    assert_eq!(
        serde_json::to_value(&columns["2/8col"]).unwrap(),
        json!("calc(var(--theme-layout-column-of-8) * 2 + var(--theme-layout-gutter, var(--theme-layout-gutter--sm)) * 1)")
    );
}

#[test]
fn absent_categories_emit_no_branch() {
    let tree = tree_of(json!({ "spacing": { "small": 8 } }));
    let keys: Vec<&str> = tree.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["spacing"]);
}

#[test]
fn suppression_strips_every_breakpoint_variable() {
    let mut config = default_style_config();
    config["disableBreakpointSpecificCustomProperties"] = json!(true);
    let tree = tree_of(config);

    let spacing = leaf(&tree, &["spacing", "small"]);
    assert!(spacing.starts_with("clamp(16px,"), "got {spacing}");
    assert!(!spacing.contains("--theme-spacing-small"), "got {spacing}");
    assert!(!spacing.contains("--theme-spacing-small--sm"), "got {spacing}");

    let margin = leaf(&tree, &["layout", "margin"]);
    assert!(!margin.contains("--theme-layout-margin"), "got {margin}");

    let fraction = leaf(&tree, &["layout", "columns", "3/12col"]);
    assert!(!fraction.contains("--theme"), "got {fraction}");
    assert!(fraction.contains("min(100vw, 1920px)"), "got {fraction}");
}

#[test]
fn serialized_tree_is_plain_json() {
    let tree = tree_of(default_style_config());
    let value = serde_json::to_value(&tree).unwrap();
    assert_eq!(
        value["fontSize"]["h1"],
        json!([
            "var(--theme-fontSize-h1, var(--theme-fontSize-h1--sm))",
            { "lineHeight": "var(--theme-lineHeight-h1, var(--theme-lineHeight-h1--sm))" }
        ])
    );
    assert_eq!(value["containers"]["content"], json!("(min-width: 768px)"));
    assert_eq!(
        value["containers"][">=layout-max"],
        json!("(min-width: var(--theme-layout-max))")
    );
}

#[test]
fn building_twice_from_the_same_config_is_identical() {
    let raw = default_style_config();
    let config = TokenConfig::from_value(raw.clone()).unwrap();

    let first = build_theme_utilities(&config);
    let second = build_theme_utilities(&config);
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );

    // The raw input survives decode untouched.
    assert_eq!(raw, default_style_config());
}
