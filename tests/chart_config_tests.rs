use balance_chart::ChartError;
use balance_chart::api::ChartConfig;
use balance_chart::core::LayoutBox;
use balance_chart::interaction::ImpactStyle;
use balance_chart::render::{Color, FontWeight, LineStrokeStyle};

#[test]
fn defaults_match_the_stock_chart() {
    let config = ChartConfig::default();

    assert_eq!(
        config.dimensions,
        LayoutBox::new(360.0, 360.0).with_margins(10.0, 10.0, 30.0, 10.0)
    );
    assert_eq!(config.colors.line.to_hex(), "#FF7A64");
    assert_eq!(config.colors.cursor, Color::WHITE);
    assert_eq!(config.colors.grid.to_hex(), "#4A4A53");
    assert_eq!(config.colors.tooltip_background.to_hex(), "#1F2937");
    assert_eq!((config.cursor.radius, config.cursor.stroke_width), (3.0, 2.0));
    assert_eq!(config.line.stroke_width, 2.0);
    assert_eq!((config.tooltip.offset_x, config.tooltip.offset_y), (10.0, -30.0));
    assert_eq!(
        config.grid.stroke_style,
        LineStrokeStyle::Dashed {
            on_px: 2.0,
            off_px: 10.0
        }
    );
    assert_eq!(config.typography.tooltip_value.weight, FontWeight::Bold);
    assert_eq!(config.default_caption, "Total");
    config.validate().expect("defaults are valid");
}

#[test]
fn partial_json_fills_missing_sections_with_defaults() {
    let config = ChartConfig::from_json_str(
        r##"{
            "dimensions": { "width": 320, "height": 240, "marginTop": 5,
                            "marginRight": 5, "marginBottom": 20, "marginLeft": 5 },
            "colors": { "line": "#00FF00" },
            "tooltip": { "padding": 12 },
            "haptics": { "pointChangedStyle": "Light" },
            "defaultCaption": "Total saved"
        }"##,
    )
    .expect("parse");

    assert_eq!(config.dimensions.width, 320.0);
    assert_eq!(config.dimensions.margin_bottom, 20.0);
    assert_eq!(config.colors.line, Color::rgb(0.0, 1.0, 0.0));
    assert_eq!(config.colors.cursor, Color::WHITE);
    assert_eq!(config.tooltip.padding, 12.0);
    assert_eq!(config.tooltip.border_radius, 6.0);
    assert_eq!(config.haptics.point_changed_style, ImpactStyle::Light);
    assert_eq!(config.haptics.gesture_start_style, ImpactStyle::Heavy);
    assert_eq!(config.default_caption, "Total saved");
}

#[test]
fn json_round_trip_preserves_config() {
    let mut config = ChartConfig::default();
    config.horizontal_inset = 32.0;
    config.colors.grid = Color::rgba(0.2, 0.4, 0.6, 0.5);

    let json = config.to_json_pretty().expect("serialize");
    let restored = ChartConfig::from_json_str(&json).expect("parse");

    assert_eq!(restored.horizontal_inset, 32.0);
    assert_eq!(restored.colors.grid.to_hex(), config.colors.grid.to_hex());
    assert_eq!(restored.grid, config.grid);
    assert_eq!(restored.dimensions, config.dimensions);
}

#[test]
fn malformed_json_reports_invalid_config() {
    let err = ChartConfig::from_json_str("{ not json").expect_err("must fail");
    assert!(matches!(err, ChartError::InvalidConfig(_)));

    let err = ChartConfig::from_json_str(r##"{ "colors": { "line": "#12" } }"##)
        .expect_err("bad color must fail");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}

#[test]
fn validation_rejects_bad_style_values() {
    let mut config = ChartConfig::default();
    config.line.stroke_width = 0.0;
    assert!(matches!(config.validate(), Err(ChartError::InvalidConfig(_))));

    let mut config = ChartConfig::default();
    config.tooltip.padding = -1.0;
    assert!(matches!(config.validate(), Err(ChartError::InvalidConfig(_))));

    let mut config = ChartConfig::default();
    config.dimensions.margin_left = f64::INFINITY;
    assert!(matches!(config.validate(), Err(ChartError::InvalidLayout { .. })));
}

#[test]
fn zero_length_grid_dash_is_rejected_at_load() {
    let json = r#"{ "grid": { "strokeStyle": { "Dashed": { "on_px": 0.0, "off_px": 10.0 } } } }"#;
    let err = ChartConfig::from_json_str(json).expect_err("zero dash must fail");
    assert!(matches!(err, ChartError::InvalidConfig(_)));

    let mut config = ChartConfig::default();
    config.grid.stroke_style = LineStrokeStyle::Dashed {
        on_px: 2.0,
        off_px: f64::NAN,
    };
    assert!(matches!(config.validate(), Err(ChartError::InvalidConfig(_))));

    let mut config = ChartConfig::default();
    config.grid.stroke_style = LineStrokeStyle::Solid;
    config.validate().expect("solid gridlines are valid");
}

#[test]
fn responsive_layout_subtracts_inset_and_keeps_height() {
    let config = ChartConfig::default();
    let layout = config.responsive_layout(414.0);
    assert_eq!(layout.width, 394.0);
    assert_eq!(layout.height, 360.0);
    assert_eq!(layout.margin_bottom, 30.0);
    assert_eq!(config.responsive_layout(5.0).width, 0.0);
}
