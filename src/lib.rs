//! Now: client SDK for the deployment platform API
//!
//! The core builds an upload manifest from a project directory: ignore rules
//! are loaded, the tree is walked, every file is SHA-1 hashed and files with
//! identical content are grouped under one digest. The API layer wraps the
//! platform's REST resources and uploads only the content the server lacks.

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod deploy;
pub mod error;
pub mod ignore;
pub mod logging;
pub mod project;
pub mod tree;
pub mod upload;

pub use api::Now;
pub use client::Client;
pub use error::{ApiError, ManifestError};
pub use tree::{build_manifest, ContentGroup, FileRecord, Manifest};
