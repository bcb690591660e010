use crate::core::errors::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const ARTIFACT_EXTENSION: &str = "sublime-theme";

/// Write `contents` to `<dir>/<theme file name>`, replacing any existing
/// file. Only the last component of `theme` is used.
pub fn write_artifact(dir: &Path, theme: &str, contents: &str) -> Result<PathBuf> {
    let file_name = Path::new(theme)
        .file_name()
        .ok_or_else(|| Error::Other(format!("invalid theme file name '{theme}'")))?;
    let path = dir.join(file_name);
    fs::write(&path, contents)?;
    Ok(path)
}

/// Delete every `*.sublime-theme` in `dir`, whoever created it. Returns the
/// number of files removed.
pub fn cleanup_artifacts(dir: &Path) -> Result<usize> {
    let pattern = format!(
        "{}/*.{ARTIFACT_EXTENSION}",
        glob::Pattern::escape(&dir.to_string_lossy())
    );
    let entries = glob::glob(&pattern).map_err(|e| Error::Other(format!("bad pattern: {e}")))?;

    let mut removed = 0;
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) => tracing::warn!("Failed to remove {:?}: {}", path, e),
            },
            Ok(_) => {}
            Err(e) => tracing::warn!("Glob error: {}", e),
        }
    }
    Ok(removed)
}
