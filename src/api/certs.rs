//! SSL certificates

use crate::client::Client;
use crate::error::ApiError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const CERTS_ENDPOINT: &str = "/now/certs";

/// An SSL certificate object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cert {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct CertParams<'a> {
    domains: &'a [String],
    renew: bool,
}

#[derive(Deserialize)]
struct CertListResponse {
    #[serde(default)]
    certificates: Vec<Cert>,
}

pub struct CertsClient<'a> {
    client: &'a Client,
}

impl<'a> CertsClient<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Issue a certificate for the given domain names
    pub async fn issue(&self, domains: &[String]) -> Result<Cert, ApiError> {
        let params = CertParams {
            domains,
            renew: false,
        };
        self.client.post(CERTS_ENDPOINT, &params).await
    }

    /// Renew an existing certificate
    pub async fn renew(&self, domains: &[String]) -> Result<Cert, ApiError> {
        let params = CertParams {
            domains,
            renew: true,
        };
        self.client.post(CERTS_ENDPOINT, &params).await
    }

    pub async fn list(&self) -> Result<Vec<Cert>, ApiError> {
        let response: CertListResponse = self.client.get(CERTS_ENDPOINT).await?;
        Ok(response.certificates)
    }

    pub async fn delete(&self, domain: &str) -> Result<(), ApiError> {
        self.client
            .delete(&format!("{}/{}", CERTS_ENDPOINT, domain))
            .await
    }
}
