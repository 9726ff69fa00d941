//! Subscription plan

use crate::client::Client;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};

/// The account's subscription state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub plan: Plan,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub interval: String,
    #[serde(default)]
    pub interval_count: i64,
}

#[derive(Deserialize)]
struct PlanResponse {
    #[serde(default)]
    subscription: Subscription,
}

pub struct PlansClient<'a> {
    client: &'a Client,
}

impl<'a> PlansClient<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Current subscription of the authenticated user
    pub async fn current(&self) -> Result<Subscription, ApiError> {
        let response: PlanResponse = self.client.get("/plan").await?;
        Ok(response.subscription)
    }
}
