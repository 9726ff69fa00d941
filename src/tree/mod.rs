//! Deployment file manifest
//!
//! Walks a project directory, digests every non-ignored file and groups the
//! results by content so identical bytes are uploaded once.

pub mod builder;
pub mod hasher;
pub mod manifest;
pub mod path;
pub mod walker;

pub use builder::{build_manifest, ManifestBuilder};
pub use manifest::{ContentGroup, FileRecord, Manifest};
pub use walker::{Walker, WalkerConfig};
