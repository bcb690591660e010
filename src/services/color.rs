use crate::core::config::{LabelColorSource, Settings};
use crate::core::errors::Result;
use crate::models::color::Color;

/// Extra push applied to light backgrounds, which need a stronger change to
/// stay visually distinct.
const LIGHT_AMPLIFICATION: f64 = 1.4;
const LABEL_MAGNITUDE: f64 = 150.0;

/// Luma threshold separating light from dark backgrounds.
const LIGHT_THRESHOLD: f64 = 128.0;

pub fn to_channels(color: Color) -> (u8, u8, u8) {
    color.channels()
}

/// YIQ luma classification.
pub fn is_light(color: Color) -> bool {
    let (r, g, b) = color.channels();
    let luma = (299.0 * f64::from(r) + 587.0 * f64::from(g) + 114.0 * f64::from(b)) / 1000.0;
    luma >= LIGHT_THRESHOLD
}

/// Shift every channel by `offset`, clamped to the valid range.
pub fn variant(color: Color, offset: f64) -> Color {
    let delta = offset.round();
    let shift = |channel: u8| (f64::from(channel) + delta).clamp(0.0, 255.0) as u8;
    Color::rgb(shift(color.r), shift(color.g), shift(color.b))
}

/// [`variant`] over a textual color.
pub fn variant_hex(text: &str, offset: f64) -> Result<Color> {
    Ok(variant(Color::parse(text)?, offset))
}

/// Push away from the background: darker on light backgrounds, lighter on
/// dark ones.
pub fn separator_variant(bg: Color, magnitude: f64) -> Color {
    if is_light(bg) {
        variant(bg, -LIGHT_AMPLIFICATION * magnitude)
    } else {
        variant(bg, magnitude)
    }
}

/// Derives the sidebar palette from one background color.
#[derive(Debug, Clone)]
pub struct ColorVariantEngine {
    separator_magnitude: f64,
    sidebar_offset: f64,
    label_source: LabelColorSource,
    label_light: Color,
    label_dark: Color,
}

impl ColorVariantEngine {
    /// Fails only when the configured label colors are used and malformed.
    pub fn new(settings: &Settings) -> Result<Self> {
        let (label_light, label_dark) = match settings.label_color_source {
            LabelColorSource::Derived => (Color::BLACK, Color::WHITE),
            LabelColorSource::Configured => (
                Color::parse(&settings.label_color_light)?,
                Color::parse(&settings.label_color_dark)?,
            ),
        };
        Ok(Self {
            separator_magnitude: settings.side_bar_sep_line_brightness_change,
            sidebar_offset: settings.sidebar_bg_brightness_change,
            label_source: settings.label_color_source,
            label_light,
            label_dark,
        })
    }

    pub fn is_light(&self, color: Color) -> bool {
        is_light(color)
    }

    pub fn separator_variant(&self, bg: Color, magnitude: f64) -> Color {
        separator_variant(bg, magnitude)
    }

    /// Separator tint at the configured strength.
    pub fn separator(&self, bg: Color) -> Color {
        separator_variant(bg, self.separator_magnitude)
    }

    pub fn label_color(&self, bg: Color) -> Color {
        match self.label_source {
            LabelColorSource::Derived => separator_variant(bg, LABEL_MAGNITUDE),
            LabelColorSource::Configured if is_light(bg) => self.label_light,
            LabelColorSource::Configured => self.label_dark,
        }
    }

    pub fn sidebar_background(&self, bg: Color) -> Color {
        if self.sidebar_offset == 0.0 {
            bg
        } else {
            variant(bg, self.sidebar_offset)
        }
    }
}
