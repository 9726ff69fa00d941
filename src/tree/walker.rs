//! Filesystem walker for enumerating deployable files

use crate::error::ManifestError;
use crate::ignore::IgnoreRules;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

/// Filesystem walker configuration
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false)
    pub follow_symlinks: bool,
    /// Rules matched against each entry's base name
    pub rules: IgnoreRules,
    /// Maximum depth to traverse (None = unlimited)
    pub max_depth: Option<usize>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            rules: IgnoreRules::defaults(),
            max_depth: None,
        }
    }
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a walker for `root` filtering with the given rules
    pub fn new(root: PathBuf, rules: IgnoreRules) -> Self {
        Self {
            root,
            config: WalkerConfig {
                rules,
                ..WalkerConfig::default()
            },
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the filesystem and collect every non-ignored leaf file.
    ///
    /// Returns paths sorted for determinism. Directories are never emitted;
    /// a directory whose base name matches a rule is not descended into.
    pub fn walk(&self) -> Result<Vec<PathBuf>, ManifestError> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.should_ignore(entry));

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone());
                match e.into_io_error() {
                    Some(source) => ManifestError::io(path, source),
                    None => ManifestError::Walk {
                        path,
                        message: "filesystem loop detected".to_string(),
                    },
                }
            })?;

            if entry.file_type().is_dir() {
                continue;
            }

            // Without follow_symlinks a link is its own entry; it uploads as its target.
            if entry.file_type().is_symlink() {
                resolve_symlink(entry.path())?;
                trace!(path = %entry.path().display(), "Following symlinked file");
            }

            files.push(entry.into_path());
        }

        files.sort();
        debug!(root = %self.root.display(), file_count = files.len(), "Walked filesystem");
        Ok(files)
    }

    /// Check if an entry should be ignored based on its base name.
    /// The root itself is never filtered.
    fn should_ignore(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        self.config.rules.matches(&name)
    }
}

/// A symlink entry must resolve to a regular file. Dangling links and links
/// to directories are errors.
fn resolve_symlink(path: &Path) -> Result<(), ManifestError> {
    let target = std::fs::metadata(path).map_err(|e| ManifestError::io(path, e))?;
    if target.is_file() {
        return Ok(());
    }
    Err(ManifestError::io(
        path,
        io::Error::new(
            io::ErrorKind::Other,
            "symlink does not point at a regular file",
        ),
    ))
}
