//! HTTP core for the platform API
//!
//! Every resource wrapper goes through [`Client`]: build an authenticated
//! request, send it, map non-success statuses to [`ApiError::Api`] and decode
//! the JSON body. No retries; the caller decides what to do with a failure.

use crate::config::ApiConfig;
use crate::error::ApiError;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub const DEFAULT_API_URL: &str = "https://api.zeit.co";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(80);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("now-client-rs@", env!("CARGO_PKG_VERSION"));

/// Error body returned by the API. Older endpoints nest it under `err`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(alias = "err")]
    error: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
    url: Option<String>,
}

/// Authenticated API client
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    team_id: Option<String>,
}

/// Builder for [`Client`]
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    token: Option<String>,
    team_id: Option<String>,
    timeout: Duration,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
            team_id: None,
            timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

impl ClientBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn team_id(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<Client, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(self.timeout)
            .build()
            .map_err(|e| ApiError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Client {
            http,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            token: self.token.filter(|t| !t.is_empty()),
            team_id: self.team_id.filter(|t| !t.is_empty()),
        })
    }
}

impl Client {
    /// Client against the default API URL.
    pub fn new(token: impl Into<String>) -> Result<Self, ApiError> {
        Self::builder().token(token).build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Client from the `[api]` configuration section.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut builder = Self::builder()
            .base_url(config.url.clone())
            .timeout(Duration::from_secs(config.timeout_secs));
        if let Some(token) = &config.token {
            builder = builder.token(token.clone());
        }
        if let Some(team_id) = &config.team_id {
            builder = builder.team_id(team_id.clone());
        }
        builder.build()
    }

    /// Whether a bearer token is configured
    pub fn authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Scope subsequent requests to a team
    pub fn set_team_id(&mut self, team_id: Option<String>) {
        self.team_id = team_id.filter(|t| !t.is_empty());
    }

    pub fn team_id(&self) -> Option<&str> {
        self.team_id.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Start an authenticated request. The team scope is added as `teamId`.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.http.request(method, self.url(path));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        if let Some(team_id) = &self.team_id {
            req = req.query(&[("teamId", team_id)]);
        }
        req
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.send(self.request(Method::GET, path)).await?;
        decode(&body)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.send(self.request(Method::POST, path).json(body)).await?;
        decode(&body)
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.send(self.request(Method::PATCH, path).json(body)).await?;
        decode(&body)
    }

    /// POST whose response body is not needed.
    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.send(self.request(Method::POST, path).json(body)).await?;
        Ok(())
    }

    pub async fn patch_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.send(self.request(Method::PATCH, path).json(body)).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    /// Send a prepared request and return the raw body of a successful response.
    #[instrument(skip(self, req))]
    pub(crate) async fn send(&self, req: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = req.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        debug!(status = status.as_u16(), bytes = body.len(), "API response");

        match status {
            StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT => Ok(body),
            _ => Err(api_error(status, &body)),
        }
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    // 204 and other bodiless successes decode as JSON null (e.g. into `()` or `Option<_>`).
    let body: &[u8] = if body.is_empty() { b"null" } else { body };
    serde_json::from_slice(body).map_err(|e| {
        ApiError::Serialization(format!("Failed to parse response: {}", e))
    })
}

fn api_error(status: StatusCode, body: &[u8]) -> ApiError {
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => ApiError::Api {
            status: status.as_u16(),
            code: envelope.error.code,
            message: envelope.error.message,
            url: envelope.error.url,
        },
        Err(_) => {
            warn!(status = status.as_u16(), "Unstructured error response");
            ApiError::Api {
                status: status.as_u16(),
                code: "unknown".to_string(),
                message: String::from_utf8_lossy(body).into_owned(),
                url: None,
            }
        }
    }
}
