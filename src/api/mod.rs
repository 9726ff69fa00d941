//! Typed wrappers for the platform's REST resources
//!
//! [`Now`] owns one authenticated [`Client`] and hands out borrowed
//! per-resource clients.

pub mod certs;
pub mod deployments;
pub mod domains;
pub mod plans;
pub mod teams;

use crate::client::Client;
use crate::config::ApiConfig;
use crate::error::ApiError;

pub use certs::{Cert, CertsClient};
pub use deployments::{
    Alias, Deployment, DeploymentContent, DeploymentsClient, IncompleteDeployment, NewDeployment,
};
pub use domains::{Domain, DomainsClient};
pub use plans::{Plan, PlansClient, Subscription};
pub use teams::{Team, TeamMember, TeamsClient};

/// Entry point for every API resource
#[derive(Debug, Clone)]
pub struct Now {
    client: Client,
}

impl Now {
    /// Authenticated client against the default API URL.
    pub fn new(token: impl Into<String>) -> Result<Self, ApiError> {
        Ok(Self::with_client(Client::new(token)?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Ok(Self::with_client(Client::from_config(config)?))
    }

    /// Scope every subsequent request to a team.
    pub fn set_team_id(&mut self, team_id: Option<String>) {
        self.client.set_team_id(team_id);
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn certs(&self) -> CertsClient<'_> {
        CertsClient::new(&self.client)
    }

    pub fn deployments(&self) -> DeploymentsClient<'_> {
        DeploymentsClient::new(&self.client)
    }

    pub fn domains(&self) -> DomainsClient<'_> {
        DomainsClient::new(&self.client)
    }

    pub fn plans(&self) -> PlansClient<'_> {
        PlansClient::new(&self.client)
    }

    pub fn teams(&self) -> TeamsClient<'_> {
        TeamsClient::new(&self.client)
    }
}
