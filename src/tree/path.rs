//! Root-relative path helpers for manifest entries

use crate::error::ManifestError;
use std::path::{Component, Path, PathBuf};

/// Canonicalize the walk root so relativization is stable across `.`/`..` and symlinked roots.
pub fn canonicalize_root(root: &Path) -> Result<PathBuf, ManifestError> {
    dunce::canonicalize(root).map_err(|e| ManifestError::io(root, e))
}

/// Path of `file` relative to `root`, with `/` separators.
///
/// Strips the root prefix and any leading separators. A file outside the
/// root is rejected rather than uploaded under an absolute name.
pub fn relative_name(root: &Path, file: &Path) -> Result<String, ManifestError> {
    let rel = file.strip_prefix(root).map_err(|_| {
        ManifestError::InvalidPath(format!(
            "{} is not under {}",
            file.display(),
            root.display()
        ))
    })?;

    let mut parts = Vec::new();
    for component in rel.components() {
        if let Component::Normal(part) = component {
            let part = part.to_str().ok_or_else(|| {
                ManifestError::InvalidPath(format!(
                    "{} is not valid UTF-8",
                    file.display()
                ))
            })?;
            parts.push(part);
        }
    }

    if parts.is_empty() {
        return Err(ManifestError::InvalidPath(format!(
            "{} has no name relative to {}",
            file.display(),
            root.display()
        )));
    }

    Ok(parts.join("/"))
}
