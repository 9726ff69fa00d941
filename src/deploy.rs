//! End-to-end deploy: manifest, create, upload what the server lacks

use crate::api::{IncompleteDeployment, NewDeployment};
use crate::config::DeployConfig;
use crate::error::ApiError;
use crate::ignore::IgnoreRules;
use crate::project::ProjectType;
use crate::tree::{build_manifest, Manifest};
use crate::upload::{upload_missing, Transport};
use serde_json::{Map, Value};
use std::path::Path;
use std::time::Instant;
use tracing::{info, instrument};

/// Options for one deployment attempt
#[derive(Debug, Clone, Default)]
pub struct DeployOptions {
    pub name: Option<String>,
    /// Patterns added on top of the loaded ignore rules
    pub extra_ignore: Vec<String>,
    /// When false the built-in default table is left out
    pub skip_default_ignores: bool,
    /// Extra fields merged into the create request
    pub extra: Map<String, Value>,
}

impl DeployOptions {
    pub fn from_config(config: &DeployConfig) -> Self {
        Self {
            extra_ignore: config.extra_ignore.clone(),
            skip_default_ignores: !config.use_default_ignores,
            ..Self::default()
        }
    }
}

/// A project directory ready to deploy
#[derive(Debug, Clone)]
pub struct PreparedDeploy {
    pub project_type: ProjectType,
    pub rules: IgnoreRules,
    pub manifest: Manifest,
}

impl PreparedDeploy {
    pub fn request(&self, options: &DeployOptions) -> NewDeployment {
        NewDeployment {
            name: options.name.clone(),
            deployment_type: self.project_type,
            files: self.manifest.records().to_vec(),
            extra: options.extra.clone(),
        }
    }
}

/// Result of a deploy
#[derive(Debug, Clone)]
pub struct DeployOutcome {
    pub project_type: ProjectType,
    pub deployment: IncompleteDeployment,
    pub manifest: Manifest,
    /// Digests uploaded in this attempt
    pub uploaded: Vec<String>,
}

/// Detect the project type, load its ignore rules and build the manifest.
///
/// Purely local; every call re-walks and re-hashes the directory.
pub fn prepare(root: &Path, options: &DeployOptions) -> Result<PreparedDeploy, ApiError> {
    let project_type = ProjectType::detect(root);
    let mut rules = if options.skip_default_ignores {
        IgnoreRules::load_with_defaults(root, project_type.ignore_files(), &[])?
    } else {
        project_type.load_rules(root)?
    };
    rules.extend(options.extra_ignore.iter().cloned());

    let manifest = build_manifest(root, rules.clone())?;
    info!(
        project_type = %project_type,
        rule_count = rules.len(),
        files = manifest.records().len(),
        digests = manifest.len(),
        "Prepared deployment"
    );

    Ok(PreparedDeploy {
        project_type,
        rules,
        manifest,
    })
}

/// Deploy the directory at `root` through `transport`.
#[instrument(skip(transport, options), fields(root = %root.display()))]
pub async fn deploy<T: Transport + ?Sized>(
    transport: &T,
    root: &Path,
    options: &DeployOptions,
) -> Result<DeployOutcome, ApiError> {
    let start = Instant::now();
    let prepared = prepare(root, options)?;

    let deployment = transport
        .create_deployment(&prepared.request(options))
        .await?;
    info!(
        deployment_id = %deployment.deployment_id,
        missing = deployment.missing.len(),
        "Deployment created"
    );

    let uploaded = upload_missing(
        transport,
        &deployment.deployment_id,
        &prepared.manifest,
        &deployment.missing,
    )
    .await?;

    info!(
        deployment_id = %deployment.deployment_id,
        url = %deployment.url,
        duration_ms = start.elapsed().as_millis(),
        "Deploy completed"
    );

    Ok(DeployOutcome {
        project_type: prepared.project_type,
        deployment,
        manifest: prepared.manifest,
        uploaded,
    })
}
