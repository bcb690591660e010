use crate::core::errors::{Error, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Source of raw color scheme bytes, keyed by the host's resource
/// identifier.
pub trait ResourceLoader: Send + Sync {
    fn load(&self, id: &str) -> Result<Vec<u8>>;
}

/// Resolves `Packages/<package>/<file>` identifiers under a packages
/// directory on disk.
pub struct PackageResourceLoader {
    root: PathBuf,
}

impl PackageResourceLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, id: &str) -> Result<PathBuf> {
        let relative = Path::new(id.strip_prefix("Packages/").unwrap_or(id));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(Error::ResourceNotFound(id.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl ResourceLoader for PackageResourceLoader {
    fn load(&self, id: &str) -> Result<Vec<u8>> {
        let path = self.resolve(id)?;
        fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::ResourceNotFound(id.to_string()),
            _ => Error::Io(e),
        })
    }
}
