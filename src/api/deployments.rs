//! Deployments, their file trees and aliases

use crate::client::Client;
use crate::error::ApiError;
use crate::project::ProjectType;
use crate::tree::FileRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const DEPLOYMENTS_ENDPOINT: &str = "/now/deployments";

/// A deployment object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub uid: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub state: String,
    #[serde(rename = "stateTs", default, skip_serializing_if = "Option::is_none")]
    pub state_ts: Option<DateTime<Utc>>,
}

/// A deployment as returned by create, before its files are uploaded.
///
/// `missing` lists the digests the server does not hold yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncompleteDeployment {
    #[serde(rename = "deploymentId", alias = "deploymentID")]
    pub deployment_id: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "totalSize", default)]
    pub total_size: u64,
    #[serde(default)]
    pub missing: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Body of a deployment-create request
#[derive(Debug, Clone, Serialize)]
pub struct NewDeployment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "deploymentType")]
    pub deployment_type: ProjectType,
    pub files: Vec<FileRecord>,
    /// Additional top-level fields passed through verbatim (env, config, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A node of a deployment's file tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DeploymentContent {
    Directory {
        name: String,
        #[serde(default)]
        children: Vec<DeploymentContent>,
    },
    File {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        uid: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scripts: Option<BTreeMap<String, String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dependencies: Option<BTreeMap<String, String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        version: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

impl DeploymentContent {
    pub fn name(&self) -> &str {
        match self {
            DeploymentContent::Directory { name, .. } | DeploymentContent::File { name, .. } => {
                name
            }
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, DeploymentContent::Directory { .. })
    }
}

/// A deployment alias
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alias {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(rename = "oldId", default, skip_serializing_if = "Option::is_none")]
    pub old_id: Option<String>,
    pub alias: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct AliasParams<'a> {
    alias: &'a str,
}

#[derive(Serialize)]
struct ScaleParams {
    min: u32,
    max: u32,
}

#[derive(Deserialize)]
struct DeploymentListResponse {
    #[serde(default)]
    deployments: Vec<Deployment>,
}

#[derive(Deserialize)]
struct AliasListResponse {
    #[serde(default)]
    aliases: Vec<Alias>,
}

pub struct DeploymentsClient<'a> {
    client: &'a Client,
}

impl<'a> DeploymentsClient<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Create a deployment from a file manifest. Upload the `missing` digests afterwards.
    pub async fn create(&self, request: &NewDeployment) -> Result<IncompleteDeployment, ApiError> {
        self.client.post(DEPLOYMENTS_ENDPOINT, request).await
    }

    pub async fn get(&self, id: &str) -> Result<Deployment, ApiError> {
        self.client
            .get(&format!("{}/{}", DEPLOYMENTS_ENDPOINT, id))
            .await
    }

    pub async fn list(&self) -> Result<Vec<Deployment>, ApiError> {
        let response: DeploymentListResponse = self.client.get(DEPLOYMENTS_ENDPOINT).await?;
        Ok(response.deployments)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete(&format!("{}/{}", DEPLOYMENTS_ENDPOINT, id))
            .await
    }

    /// File tree of a deployment
    pub async fn files(&self, id: &str) -> Result<Vec<DeploymentContent>, ApiError> {
        self.client
            .get(&format!("{}/{}/files", DEPLOYMENTS_ENDPOINT, id))
            .await
    }

    /// Point `alias` at the deployment
    pub async fn alias(&self, id: &str, alias: &str) -> Result<Alias, ApiError> {
        self.client
            .post(
                &format!("{}/{}/aliases", DEPLOYMENTS_ENDPOINT, id),
                &AliasParams { alias },
            )
            .await
    }

    pub async fn list_aliases(&self, id: &str) -> Result<Vec<Alias>, ApiError> {
        let response: AliasListResponse = self
            .client
            .get(&format!("{}/{}/aliases", DEPLOYMENTS_ENDPOINT, id))
            .await?;
        Ok(response.aliases)
    }

    /// Set the instance bounds of a deployment
    pub async fn scale(&self, id: &str, min: u32, max: u32) -> Result<Deployment, ApiError> {
        if min > max {
            return Err(ApiError::ConfigError(format!(
                "Invalid scale: min ({}) is greater than max ({})",
                min, max
            )));
        }
        self.client
            .patch(
                &format!("{}/{}/instances", DEPLOYMENTS_ENDPOINT, id),
                &ScaleParams { min, max },
            )
            .await
    }
}
