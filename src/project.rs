//! Project type detection
//!
//! The project type decides which ignore files apply on top of the defaults
//! and is sent as the deployment type when creating a deployment.

use crate::error::ManifestError;
use crate::ignore::{IgnoreRules, DOCKERIGNORE, GITIGNORE, NPMIGNORE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProjectType {
    Docker,
    Npm,
    Static,
}

impl ProjectType {
    /// `Dockerfile` wins over `package.json`; anything else is static.
    pub fn detect(root: &Path) -> Self {
        if root.join("Dockerfile").exists() {
            ProjectType::Docker
        } else if root.join("package.json").exists() {
            ProjectType::Npm
        } else {
            ProjectType::Static
        }
    }

    /// Ignore files read at the root for this project type.
    pub fn ignore_files(self) -> &'static [&'static str] {
        match self {
            ProjectType::Docker => &[DOCKERIGNORE, GITIGNORE],
            ProjectType::Npm => &[NPMIGNORE, GITIGNORE],
            ProjectType::Static => &[GITIGNORE],
        }
    }

    /// Defaults plus this project type's ignore files.
    pub fn load_rules(self, root: &Path) -> Result<IgnoreRules, ManifestError> {
        IgnoreRules::load(root, self.ignore_files())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectType::Docker => "DOCKER",
            ProjectType::Npm => "NPM",
            ProjectType::Static => "STATIC",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
