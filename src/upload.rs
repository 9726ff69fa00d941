//! Content upload
//!
//! After a deployment is created the server answers with the digests it is
//! missing. Each missing [`ContentGroup`] is uploaded once, tagged with every
//! relative name that shares its bytes.

use crate::api::{DeploymentsClient, IncompleteDeployment, NewDeployment};
use crate::client::Client;
use crate::error::ApiError;
use crate::tree::{ContentGroup, Manifest};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use tracing::{debug, info, instrument, warn};

pub const SYNC_ENDPOINT: &str = "/now/sync";
pub const HEADER_DEPLOYMENT_ID: &str = "x-now-deployment-id";
pub const HEADER_SHA: &str = "x-now-sha";
pub const HEADER_FILE: &str = "x-now-file";
pub const HEADER_SIZE: &str = "x-now-size";

/// One upload call: the bytes of a content group plus its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub deployment_id: String,
    pub sha: String,
    /// Relative names sharing this digest
    pub names: Vec<String>,
    pub size: u64,
    pub body: Vec<u8>,
}

impl FileUpload {
    /// Read the group's bytes from its first path.
    pub fn from_group(deployment_id: &str, group: &ContentGroup) -> Result<Self, ApiError> {
        let body = std::fs::read(&group.path)
            .map_err(|e| ApiError::Io(format!("Failed to read {:?}: {}", group.path, e)))?;
        Ok(Self {
            deployment_id: deployment_id.to_string(),
            sha: group.sha.clone(),
            names: group.file_names().map(str::to_string).collect(),
            size: group.size(),
            body,
        })
    }

    /// Comma-joined relative names
    pub fn file_header(&self) -> String {
        self.names.join(",")
    }

    pub fn headers(&self) -> [(&'static str, String); 4] {
        [
            (HEADER_DEPLOYMENT_ID, self.deployment_id.clone()),
            (HEADER_SHA, self.sha.clone()),
            (HEADER_FILE, self.file_header()),
            (HEADER_SIZE, self.size.to_string()),
        ]
    }
}

/// What a deploy needs from the server side.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Register a deployment and learn which digests are missing
    async fn create_deployment(
        &self,
        request: &NewDeployment,
    ) -> Result<IncompleteDeployment, ApiError>;

    /// Upload one content group
    async fn upload(&self, upload: FileUpload) -> Result<(), ApiError>;
}

#[async_trait]
impl Transport for Client {
    async fn create_deployment(
        &self,
        request: &NewDeployment,
    ) -> Result<IncompleteDeployment, ApiError> {
        DeploymentsClient::new(self).create(request).await
    }

    #[instrument(skip(self, upload), fields(sha = %upload.sha, size = upload.size))]
    async fn upload(&self, upload: FileUpload) -> Result<(), ApiError> {
        let mut req = self
            .request(Method::POST, SYNC_ENDPOINT)
            .header(CONTENT_TYPE, "application/octet-stream");
        for (name, value) in upload.headers() {
            req = req.header(name, value);
        }
        self.send(req.body(upload.body)).await?;
        debug!("Uploaded content group");
        Ok(())
    }
}

/// Upload every group whose digest is listed in `missing`, one at a time.
///
/// Returns the digests actually uploaded. A missing digest that the
/// manifest does not know about is logged and skipped.
pub async fn upload_missing<T: Transport + ?Sized>(
    transport: &T,
    deployment_id: &str,
    manifest: &Manifest,
    missing: &[String],
) -> Result<Vec<String>, ApiError> {
    let mut uploaded = Vec::with_capacity(missing.len());

    for sha in missing {
        let Some(group) = manifest.group(sha) else {
            warn!(sha = %sha, "Server requested a digest that is not in the manifest");
            continue;
        };
        if uploaded.contains(sha) {
            continue;
        }
        let upload = FileUpload::from_group(deployment_id, group)?;
        transport.upload(upload).await?;
        uploaded.push(sha.clone());
    }

    info!(
        deployment_id = %deployment_id,
        uploaded = uploaded.len(),
        requested = missing.len(),
        "Upload finished"
    );
    Ok(uploaded)
}
