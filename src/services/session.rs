use crate::core::config::Settings;
use crate::core::errors::Result;
use crate::models::style::StyleDocument;
use crate::models::theme::ThemeReference;
use crate::services::color::ColorVariantEngine;
use crate::services::fs::artifacts;
use crate::services::resources::ResourceLoader;
use crate::services::scheme;
use crate::services::style;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, info};

/// Remembers the last color scheme that was applied.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeGuard {
    held: Option<String>,
}

impl ChangeGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_process(&self, scheme: &str) -> bool {
        self.held.as_deref() != Some(scheme)
    }

    pub fn hold(&mut self, scheme: impl Into<String>) {
        self.held = Some(scheme.into());
    }

    pub fn reset(&mut self) {
        self.held = None;
    }

    pub fn held(&self) -> Option<&str> {
        self.held.as_deref()
    }
}

/// What the host knows about the view that was just activated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ActivationEvent {
    pub is_widget: bool,
    /// Color scheme resource identifier.
    pub color_scheme: Option<String>,
    /// UI theme file name; the artifact is written under this name.
    pub theme: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Widget,
    NoColorScheme,
    NoTheme,
    Unchanged,
    ResourceUnavailable,
    NoLineHighlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Skipped(SkipReason),
    Applied {
        path: PathBuf,
        reference: ThemeReference,
    },
}

/// Per-process state for the activation pipeline.
///
/// Handlers take `&mut self`; share a session between threads through
/// [`SharedSession`].
pub struct Session {
    settings: Settings,
    guard: ChangeGuard,
    loader: Box<dyn ResourceLoader>,
    artifact_dir: PathBuf,
}

pub type SharedSession = Mutex<Session>;

impl Session {
    pub fn new(loader: impl ResourceLoader + 'static, artifact_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings: Settings::default(),
            guard: ChangeGuard::new(),
            loader: Box::new(loader),
            artifact_dir: artifact_dir.into(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn guard(&self) -> &ChangeGuard {
        &self.guard
    }

    /// Forget the last scheme and install fresh settings.
    pub fn startup(&mut self, settings: Settings) {
        self.guard.reset();
        self.settings = settings;
    }

    /// Remove every generated artifact from the artifact directory.
    pub fn shutdown(&self) -> Result<usize> {
        let removed = artifacts::cleanup_artifacts(&self.artifact_dir)?;
        info!(removed, dir = %self.artifact_dir.display(), "removed sidebar artifacts");
        Ok(removed)
    }

    /// Load a color scheme through the session's loader.
    pub fn load_scheme(&self, scheme: &str) -> Result<Vec<u8>> {
        self.loader.load(scheme)
    }

    /// Extract the reference colors from raw scheme bytes and build the
    /// style document. `Ok(None)` when the scheme has no line highlight.
    pub fn build(
        &self,
        scheme: &str,
        text: &[u8],
    ) -> Result<Option<(ThemeReference, StyleDocument)>> {
        let Some(reference) = scheme::extract_reference(text, scheme)? else {
            return Ok(None);
        };
        let engine = ColorVariantEngine::new(&self.settings)?;
        let document = style::build_document(&engine, &reference);
        Ok(Some((reference, document)))
    }

    /// Run the pipeline for one activation.
    ///
    /// Expected absences (widgets, unchanged or missing schemes, schemes
    /// without a line highlight) are `Ok(Activation::Skipped)`. Malformed
    /// schemes and write failures are errors; the session stays usable and
    /// the next activation retries.
    pub fn on_theme_activated(&mut self, event: &ActivationEvent) -> Result<Activation> {
        if event.is_widget {
            return Ok(Activation::Skipped(SkipReason::Widget));
        }
        let Some(scheme) = event.color_scheme.as_deref().filter(|s| !s.is_empty()) else {
            return Ok(Activation::Skipped(SkipReason::NoColorScheme));
        };
        if !self.guard.should_process(scheme) {
            return Ok(Activation::Skipped(SkipReason::Unchanged));
        }
        let Some(theme) = event.theme.as_deref().filter(|s| !s.is_empty()) else {
            return Ok(Activation::Skipped(SkipReason::NoTheme));
        };

        let text = match self.load_scheme(scheme) {
            Ok(text) => text,
            Err(e) => {
                debug!(%scheme, error = %e, "color scheme unavailable");
                return Ok(Activation::Skipped(SkipReason::ResourceUnavailable));
            }
        };

        let Some((reference, document)) = self.build(scheme, &text)? else {
            return Ok(Activation::Skipped(SkipReason::NoLineHighlight));
        };

        let json = document.to_json()?;
        let path = artifacts::write_artifact(&self.artifact_dir, theme, &json)?;
        info!(
            %scheme,
            background = %reference.background,
            path = %path.display(),
            "wrote sidebar theme"
        );

        self.guard.hold(scheme);
        Ok(Activation::Applied { path, reference })
    }
}
