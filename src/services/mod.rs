pub mod color;
pub mod fs;
pub mod resources;
pub mod scheme;
pub mod session;
pub mod style;
