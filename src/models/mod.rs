pub mod color;
pub mod style;
pub mod theme;
