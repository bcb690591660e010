//! Keeps the editor sidebar in step with the active color scheme.
//!
//! A color scheme's line-highlight background is turned into a family of
//! tonal variants and written out as a `.sublime-theme` style document.

pub mod core;
pub mod models;
pub mod services;

pub use crate::core::config::Settings;
pub use crate::core::errors::{Error, Result};
pub use crate::services::session::{
    Activation, ActivationEvent, Session, SharedSession, SkipReason,
};
