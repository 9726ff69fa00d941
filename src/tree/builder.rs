//! Manifest builder: hash walked files and group them by digest

use crate::error::ManifestError;
use crate::ignore::IgnoreRules;
use crate::tree::hasher;
use crate::tree::manifest::{normalize_mode, ContentGroup, FileRecord, Manifest};
use crate::tree::path;
use crate::tree::walker::Walker;
use std::collections::btree_map::{BTreeMap, Entry};
use std::fs::{File, Metadata};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, instrument, trace};

/// Builds a [`Manifest`] from a list of files under one root
pub struct ManifestBuilder {
    root: PathBuf,
}

impl ManifestBuilder {
    /// Create a builder relativizing against `root`
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Hash every path in order and group the records by digest.
    ///
    /// Each file is opened, streamed through the digest and closed before the
    /// next one. Any failure aborts the whole build.
    #[instrument(skip(self, paths), fields(root = %self.root.display(), file_count = paths.len()))]
    pub fn build(&self, paths: &[PathBuf]) -> Result<Manifest, ManifestError> {
        let start = Instant::now();
        let mut groups: BTreeMap<String, ContentGroup> = BTreeMap::new();

        for file_path in paths {
            let record = self.hash_file(file_path)?;
            match groups.entry(record.sha.clone()) {
                Entry::Occupied(mut group) => {
                    trace!(sha = %record.sha, file = %record.file, "Duplicate content");
                    group.get_mut().names.push(record);
                }
                Entry::Vacant(slot) => {
                    slot.insert(ContentGroup::new(record, file_path.clone()));
                }
            }
        }

        let manifest = Manifest::from_groups(groups);
        info!(
            files = manifest.records().len(),
            digests = manifest.len(),
            unique_bytes = manifest.unique_size(),
            duration_ms = start.elapsed().as_millis(),
            "Manifest build completed"
        );
        Ok(manifest)
    }

    /// Digest one file and describe it as a [`FileRecord`]
    #[instrument(skip(self), fields(path = %file_path.display()))]
    fn hash_file(&self, file_path: &Path) -> Result<FileRecord, ManifestError> {
        let file = File::open(file_path).map_err(|e| {
            error!("Failed to open file: {}", e);
            ManifestError::io(file_path, e)
        })?;

        let metadata = file.metadata().map_err(|e| ManifestError::io(file_path, e))?;
        let (sha, _) = hasher::digest_reader(&file).map_err(|e| {
            error!("Failed to read file: {}", e);
            ManifestError::io(file_path, e)
        })?;
        drop(file);

        trace!(sha = %sha, "Computed content digest");

        Ok(FileRecord {
            sha,
            size: metadata.len(),
            file: path::relative_name(&self.root, file_path)?,
            mode: normalize_mode(raw_mode(&metadata)),
        })
    }
}

#[cfg(unix)]
fn raw_mode(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode()
}

#[cfg(not(unix))]
fn raw_mode(metadata: &Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}

/// Walk `root` with `rules` and build its manifest.
pub fn build_manifest(root: &Path, rules: IgnoreRules) -> Result<Manifest, ManifestError> {
    let root = path::canonicalize_root(root)?;
    let files = Walker::new(root.clone(), rules).walk()?;
    debug!(file_count = files.len(), "Building manifest");
    ManifestBuilder::new(root).build(&files)
}
