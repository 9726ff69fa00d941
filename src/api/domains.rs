//! Domains

use crate::client::Client;
use crate::error::ApiError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub uid: String,
    pub name: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DomainParams<'a> {
    name: &'a str,
    is_external: bool,
}

#[derive(Deserialize)]
struct DomainListResponse {
    #[serde(default)]
    domains: Vec<Domain>,
}

pub struct DomainsClient<'a> {
    client: &'a Client,
}

impl<'a> DomainsClient<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Register a domain. `external` domains keep their own nameservers.
    pub async fn create(&self, name: &str, external: bool) -> Result<Domain, ApiError> {
        let params = DomainParams {
            name,
            is_external: external,
        };
        self.client.post("/domains", &params).await
    }

    pub async fn list(&self) -> Result<Vec<Domain>, ApiError> {
        let response: DomainListResponse = self.client.get("/domains").await?;
        Ok(response.domains)
    }

    pub async fn delete(&self, name: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/domains/{}", name)).await
    }
}
