//! CLI presentation: text and json formatters per command family.

mod account;
mod deployments;
mod manifest;
mod shared;

pub use account::{
    format_certs, format_domains, format_plan, format_team_members, format_teams,
};
pub use deployments::{
    format_aliases, format_deploy_outcome, format_deployment, format_deployment_files,
    format_deployments,
};
pub use manifest::{format_dry_run, format_manifest};
pub use shared::to_pretty_json;
