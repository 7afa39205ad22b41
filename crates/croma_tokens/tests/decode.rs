use croma_tokens::{
    Breakpoint, ColorValue, ConfigError, FontSizeEntry, LayoutMax, ScaleValue, TokenConfig,
};
use serde_json::json;

fn full_config() -> serde_json::Value {
    json!({
        "minify": true,
        "baseFontSize": 16,
        "smViewport": 375,
        "mdViewport": 1440,
        "lgViewport": 1920,
        "colors": {
            "white": "#ffffff",
            "brand": "0 82 255",
            "accent": [255, 100, 0],
            "shadow": { "value": "0 0 0", "isListedRgb": true }
        },
        "backgroundColors": { "primary": "10 20 30" },
        "textColors": { "onPrimaryStrong": "240 240 240" },
        "borderColors": {},
        "layout": {
            "margin": { "sm": 24, "md": 48, "lg": 96 },
            "gutter": { "sm": 16, "md": 24, "lg": 24 },
            "columns": { "sm": 8, "md": 12, "lg": 12 },
            "max": null
        },
        "spacing": { "small": { "sm": 16, "md": 24, "lg": 32 }, "flat": 8 },
        "horizontalSpacing": { "xs/h": { "sm": 8, "lg": 12 } },
        "verticalSpacing": { "xs/v": { "sm": 8, "lg": 12 } },
        "borderRadius": { "card": 8 },
        "containers": { "content": "768px" },
        "fontSize": {
            "h1": {
                "fontSize": { "sm": 32, "md": 48, "lg": 56 },
                "lineHeight": 1.2,
                "letterSpacing": { "sm": -0.5, "lg": -1 }
            },
            "body": { "fontSize": 16, "lineHeight": 1.5 },
            "overline": { "sm": 12, "lg": 14 },
            "caption": 12
        },
        "lineHeight": { "caption": 1.4 }
    })
}

#[test]
fn canonical_style_config_decodes() {
    let config = TokenConfig::from_value(full_config()).unwrap();
    assert!(config.minify);
    assert_eq!(config.viewports().sm, 375.0);
    assert_eq!(config.colors.len(), 4);
    assert_eq!(config.spacing.len(), 2);
    assert_eq!(config.font_size.len(), 4);
}

#[test]
fn color_shapes_classify_at_decode_time() {
    let config = TokenConfig::from_value(full_config()).unwrap();
    assert_eq!(
        config.colors.get("white"),
        Some(&ColorValue::Literal("#ffffff".to_string()))
    );
    assert_eq!(
        config.colors.get("brand"),
        Some(&ColorValue::RgbTriplet(0, 82, 255))
    );
    assert_eq!(
        config.colors.get("accent"),
        Some(&ColorValue::RgbTriplet(255, 100, 0))
    );
    assert_eq!(
        config.colors.get("shadow"),
        Some(&ColorValue::RgbForced("0 0 0".to_string()))
    );
}

#[test]
fn null_layout_max_means_viewport_scaling() {
    let config = TokenConfig::from_value(full_config()).unwrap();
    let layout = config.layout.as_ref().unwrap();
    assert_eq!(layout.max, Some(LayoutMax::Viewport));

    let without = TokenConfig::from_value(json!({ "layout": { "margin": 24 } })).unwrap();
    assert_eq!(without.layout.as_ref().unwrap().max, None);
}

#[test]
fn font_size_shapes_decode_by_key_set() {
    let config = TokenConfig::from_value(full_config()).unwrap();
    assert!(matches!(
        config.font_size.get("h1"),
        Some(FontSizeEntry::Properties(_))
    ));
    assert!(matches!(
        config.font_size.get("overline"),
        Some(FontSizeEntry::PerBreakpoint(_))
    ));
    assert!(matches!(
        config.font_size.get("caption"),
        Some(FontSizeEntry::Scalar(_))
    ));
}

#[test]
fn scale_values_inherit_downward() {
    let config = TokenConfig::from_value(full_config()).unwrap();
    let ScaleValue::PerBreakpoint(values) = config.spacing.get("small").unwrap() else {
        panic!("expected per-breakpoint spacing");
    };
    assert_eq!(values.get(Breakpoint::Md).as_number(), Some(24.0));

    let ScaleValue::PerBreakpoint(xs) = config.horizontal_spacing.get("xs/h").unwrap() else {
        panic!("expected per-breakpoint spacing");
    };
    // md is not configured and inherits from sm.
    assert_eq!(xs.get(Breakpoint::Md).as_number(), Some(8.0));
    assert_eq!(xs.get(Breakpoint::Lg).as_number(), Some(12.0));
}

#[test]
fn unknown_categories_are_rejected() {
    let mut config = full_config();
    config["dropShadows"] = json!({ "soft": "0 2px 4px" });
    let err = TokenConfig::from_value(config).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownCategory(key) if key == "dropShadows"));
}

#[test]
fn non_object_input_is_an_error() {
    assert!(matches!(
        TokenConfig::from_value(json!(null)),
        Err(ConfigError::NotAnObject)
    ));
    assert!(matches!(
        TokenConfig::from_value(json!([1, 2])),
        Err(ConfigError::NotAnObject)
    ));
    assert!(TokenConfig::from_json_str("{").is_err());
}

#[test]
fn empty_config_decodes_to_defaults() {
    let config = TokenConfig::from_value(json!({})).unwrap();
    assert!(config.colors.is_empty());
    assert!(config.layout.is_none());
    assert!(!config.disable_breakpoint_specific_custom_properties);
    assert_eq!(config.viewports().lg, 1920.0);
}

#[test]
fn token_maps_keep_configuration_order() {
    let config = TokenConfig::from_value(full_config()).unwrap();
    // "white" sorts after "brand" alphabetically; configuration order
    // must survive the decode untouched.
    let keys: Vec<&str> = config.colors.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["white", "brand", "accent", "shadow"]);

    let spacing: Vec<&str> = config.spacing.keys().map(String::as_str).collect();
    assert_eq!(spacing, vec!["small", "flat"]);
}
