use crate::models::style::{StyleDocument, StyleRule, StyleValue};
use crate::models::theme::ThemeReference;
use crate::services::color::ColorVariantEngine;

/// Tint strengths for the layered controls: borders and resting icons,
/// scroll buttons, hovered layers, hovered scroll buttons.
const BORDER: f64 = 90.0;
const BUTTON: f64 = 120.0;
const HOVER: f64 = 150.0;
const BUTTON_HOVER: f64 = 180.0;

/// Build the sidebar style document for one scheme.
pub fn build_document(engine: &ColorVariantEngine, reference: &ThemeReference) -> StyleDocument {
    let bg = reference.background;
    let tint = |magnitude: f64| StyleValue::Color(engine.separator_variant(bg, magnitude));
    let separator = StyleValue::Color(engine.separator(bg));

    let layered = |class: &'static str, resting: f64, hover: f64| {
        StyleRule::new(class)
            .with("layer0.tint", tint(resting))
            .with("layer1.tint", tint(hover))
    };

    let rules = vec![
        StyleRule::new("tree_row").with("layer0.tint", separator.clone()),
        StyleRule::new("sidebar_container")
            .with("layer0.tint", separator.clone())
            .with("layer0.opacity", StyleValue::Opacity(1.0)),
        StyleRule::new("sidebar_tree")
            .with("layer0.tint", StyleValue::Color(engine.sidebar_background(bg)))
            .with("layer0.opacity", StyleValue::Integer(1))
            .with("dark_content", StyleValue::Flag(!engine.is_light(bg))),
        StyleRule::new("sidebar_label").with("color", StyleValue::Color(engine.label_color(bg))),
        StyleRule::new("sidebar_heading")
            .with("color", tint(BORDER))
            .with("shadow_offset", StyleValue::Offset(0, 0)),
        layered("disclosure_button_control", BORDER, HOVER),
        layered("fold_button_control", BORDER, HOVER),
        layered("scroll_tabs_left_button", BUTTON, BUTTON_HOVER),
        layered("scroll_tabs_right_button", BUTTON, BUTTON_HOVER),
        layered("show_tabs_dropdown_button", BUTTON, BUTTON_HOVER),
        StyleRule::new("icon_file_type").with("layer0.tint", tint(BUTTON)),
        StyleRule::new("icon_folder").with("layer0.tint", tint(BORDER)),
        StyleRule::new("grid_layout_control")
            .with("border_color", separator)
            .with("border_size", StyleValue::Integer(1)),
    ];

    StyleDocument { rules }
}
