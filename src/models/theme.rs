use crate::models::color::Color;

/// Reference colors taken from a color scheme's line-highlight rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeReference {
    pub background: Color,
    pub foreground: Color,
    /// Identifier of the color scheme the colors came from.
    pub scheme: String,
}
