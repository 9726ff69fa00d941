//! Content-addressed upload manifest
//!
//! A [`Manifest`] maps each distinct content digest to the [`ContentGroup`]
//! of files carrying those exact bytes, and keeps the flat record list the
//! deployment-create request sends. The server only needs the bytes of a
//! group once, however many paths share it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Regular-file type bit (`S_IFREG`).
pub const REGULAR_FILE_BIT: u32 = 0o100000;

/// One physical file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Hex content digest
    pub sha: String,
    /// Size in bytes
    pub size: u64,
    /// Path relative to the walk root, `/`-separated
    pub file: String,
    /// Permission bits with the regular-file bit always set
    pub mode: u32,
}

/// All records sharing one digest (true content duplicates).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentGroup {
    pub sha: String,
    /// Records in walk order
    pub names: Vec<FileRecord>,
    /// Absolute path of the first file seen with this digest; the bytes are read from here on upload.
    pub path: PathBuf,
}

impl ContentGroup {
    pub(crate) fn new(record: FileRecord, path: PathBuf) -> Self {
        Self {
            sha: record.sha.clone(),
            names: vec![record],
            path,
        }
    }

    /// Size shared by every record in the group.
    pub fn size(&self) -> u64 {
        self.names.first().map(|r| r.size).unwrap_or(0)
    }

    /// Relative names in walk order.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|r| r.file.as_str())
    }
}

/// Digest -> group mapping plus the derived flat record sequence.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    groups: BTreeMap<String, ContentGroup>,
    records: Vec<FileRecord>,
}

impl Manifest {
    pub(crate) fn from_groups(groups: BTreeMap<String, ContentGroup>) -> Self {
        let records = groups
            .values()
            .flat_map(|g| g.names.iter().cloned())
            .collect();
        Self { groups, records }
    }

    /// Groups ordered by digest.
    pub fn groups(&self) -> impl Iterator<Item = &ContentGroup> {
        self.groups.values()
    }

    pub fn group(&self, sha: &str) -> Option<&ContentGroup> {
        self.groups.get(sha)
    }

    /// Every record across all groups, grouped and ordered by digest.
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn digests(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Number of distinct digests.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Bytes the server must receive if it has none of the content.
    pub fn unique_size(&self) -> u64 {
        self.groups.values().map(ContentGroup::size).sum()
    }

    /// Bytes across every record, duplicates included.
    pub fn total_size(&self) -> u64 {
        self.records.iter().map(|r| r.size).sum()
    }
}

/// Keep permission bits and force the regular-file type bit.
pub fn normalize_mode(raw_mode: u32) -> u32 {
    (raw_mode & 0o7777) | REGULAR_FILE_BIT
}
