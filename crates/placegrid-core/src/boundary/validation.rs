//! Sidecar-file checks shared by boundary readers.

use std::path::{Path, PathBuf};

use crate::error::{PlacegridError, Result};

/// Verify that the sibling files a multi-part format needs are all present.
///
/// `base` is the path of the primary file; `required` lists the extensions
/// that must exist alongside it.
pub(crate) fn require_component_files(base: &Path, required: &[&str]) -> Result<()> {
    let mut missing: Vec<String> = Vec::new();
    for ext in required {
        if !base.with_extension(ext).exists() {
            missing.push(format!(".{ext}"));
        }
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(PlacegridError::BoundaryFormat {
            format: "Shapefile".to_string(),
            message: format!(
                "missing component file(s) {} next to {}",
                missing.join(", "),
                base.display()
            ),
        })
    }
}

/// Path of an optional sidecar next to the primary file, if it exists.
pub(crate) fn sidecar(base: &Path, ext: &str) -> Option<PathBuf> {
    let path = base.with_extension(ext);
    path.exists().then_some(path)
}
