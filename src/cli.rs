//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; single route table dispatches to the API and deploy services.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{exit_code, map_error};
pub use parse::{
    CertCommands, Cli, Commands, DeploymentCommands, DomainCommands, TeamCommands,
};
pub use presentation::{
    format_aliases, format_certs, format_deploy_outcome, format_deployment,
    format_deployment_files, format_deployments, format_domains, format_dry_run,
    format_manifest, format_plan, format_team_members, format_teams, to_pretty_json,
};
pub use route::{command_name, load_config, RunContext};
