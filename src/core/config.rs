use crate::core::errors::{Error, Result};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{info, warn};

pub const SETTINGS_FILE_NAME: &str = "SyncedSidebarBg.sublime-settings";
pub const SETTINGS_ENV_VAR: &str = "SIDEBAR_SYNC_SETTINGS";

/// Where the sidebar label color comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelColorSource {
    /// Tinted from the scheme background like the separators.
    #[default]
    Derived,
    /// Fixed pair picked by background lightness.
    Configured,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub side_bar_sep_line_brightness_change: f64,
    pub sidebar_bg_brightness_change: f64,
    pub label_color_light: String,
    pub label_color_dark: String,
    pub label_color_source: LabelColorSource,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            side_bar_sep_line_brightness_change: 15.0,
            sidebar_bg_brightness_change: 0.0,
            label_color_light: "#333333".into(),
            label_color_dark: "#cccccc".into(),
            label_color_source: LabelColorSource::Derived,
        }
    }
}

impl Settings {
    /// Parse settings text. Whole-line `//` comments are allowed, as in
    /// host settings files.
    pub fn from_json(text: &str) -> Result<Self> {
        static LINE_COMMENT: OnceLock<Regex> = OnceLock::new();
        let re = LINE_COMMENT
            .get_or_init(|| Regex::new(r"(?m)^\s*//.*$").expect("line comment pattern is valid"));
        let cleaned = re.replace_all(text, "");
        Ok(serde_json::from_str(&cleaned)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
            .map_err(|e| Error::Other(format!("{}: {e}", path.display())))
    }

    /// Load settings.
    /// Search order:
    ///   1. SIDEBAR_SYNC_SETTINGS env var
    ///   2. <config dir>/sidebar-sync/SyncedSidebarBg.sublime-settings
    ///   3. Defaults
    pub fn load() -> Self {
        let candidates = [
            std::env::var(SETTINGS_ENV_VAR).ok().map(PathBuf::from),
            dirs::config_dir().map(|d| d.join("sidebar-sync").join(SETTINGS_FILE_NAME)),
        ];

        for candidate in candidates.into_iter().flatten() {
            if !candidate.exists() {
                continue;
            }
            match Self::from_path(&candidate) {
                Ok(settings) => {
                    info!(path = %candidate.display(), "loaded settings");
                    return settings;
                }
                Err(e) => {
                    warn!(path = %candidate.display(), error = %e, "failed to load settings");
                }
            }
        }

        info!("no settings file found, using defaults");
        Self::default()
    }
}
