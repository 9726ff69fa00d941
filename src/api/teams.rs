//! Teams and team membership

use crate::client::Client;
use crate::error::ApiError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub creator_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

/// A membership to a team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub uid: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Serialize)]
struct TeamParams<'a> {
    slug: &'a str,
}

#[derive(Serialize)]
struct RenameParams<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct InviteParams<'a> {
    email: &'a str,
}

#[derive(Deserialize)]
struct TeamListResponse {
    #[serde(default)]
    teams: Vec<Team>,
}

pub struct TeamsClient<'a> {
    client: &'a Client,
}

impl<'a> TeamsClient<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn create(&self, slug: &str) -> Result<Team, ApiError> {
        self.client.post("/teams", &TeamParams { slug }).await
    }

    pub async fn list(&self) -> Result<Vec<Team>, ApiError> {
        let response: TeamListResponse = self.client.get("/teams").await?;
        Ok(response.teams)
    }

    pub async fn members(&self, team_id: &str) -> Result<Vec<TeamMember>, ApiError> {
        self.client
            .get(&format!("/teams/{}/members", team_id))
            .await
    }

    pub async fn delete(&self, team_id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/teams/{}", team_id)).await
    }

    /// Update the team's display name
    pub async fn rename(&self, team_id: &str, name: &str) -> Result<(), ApiError> {
        self.client
            .patch_unit(&format!("/teams/{}", team_id), &RenameParams { name })
            .await
    }

    /// Invite a user to the team by email
    pub async fn invite(&self, team_id: &str, email: &str) -> Result<(), ApiError> {
        self.client
            .post_unit(&format!("/teams/{}/members", team_id), &InviteParams { email })
            .await
    }
}
