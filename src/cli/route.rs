//! CLI route: single route table and run context. Dispatches to the API and presentation.

use crate::api::Now;
use crate::config::{ConfigLoader, NowConfig};
use crate::deploy::{self, DeployOptions};
use crate::error::ApiError;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::cli::parse::{
    CertCommands, Cli, Commands, DeploymentCommands, DomainCommands, TeamCommands,
};
use crate::cli::presentation::{
    format_aliases, format_certs, format_deploy_outcome, format_deployment,
    format_deployment_files, format_deployments, format_domains, format_dry_run,
    format_manifest, format_plan, format_team_members, format_teams,
};

/// Load configuration for a workspace, or from one explicit file.
pub fn load_config(workspace_root: &Path, config_path: Option<&Path>) -> Result<NowConfig, ApiError> {
    let config = match config_path {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load(workspace_root)?,
    };
    Ok(config)
}

/// Runtime context for CLI execution: workspace, merged config, API facade and
/// the runtime the async API calls are driven on.
pub struct RunContext {
    runtime: Runtime,
    now: Now,
    config: NowConfig,
    workspace_root: PathBuf,
}

impl RunContext {
    /// Build from parsed arguments. CLI flags override every config source.
    pub fn new(cli: &Cli) -> Result<Self, ApiError> {
        let mut config = load_config(&cli.workspace, cli.config.as_deref())?;
        if let Some(token) = &cli.token {
            config.api.token = Some(token.clone());
        }
        if let Some(team) = &cli.team {
            config.api.team_id = Some(team.clone());
        }
        if let Some(url) = &cli.api_url {
            config.api.url = url.clone();
        }
        config.ensure_valid()?;
        Self::with_config(cli.workspace.clone(), config)
    }

    pub fn with_config(workspace_root: PathBuf, config: NowConfig) -> Result<Self, ApiError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::Io(format!("Failed to start async runtime: {}", e)))?;
        let now = Now::from_config(&config.api)?;
        debug!(
            api_url = %now.client().base_url(),
            team_id = ?now.client().team_id(),
            "Run context ready"
        );
        Ok(Self {
            runtime,
            now,
            config,
            workspace_root,
        })
    }

    pub fn config(&self) -> &NowConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = self.execute_inner(command);
        info!(
            command = command_name(command),
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Manifest {
                path,
                format,
                no_default_ignores,
            } => {
                let mut options = DeployOptions::from_config(&self.config.deploy);
                if *no_default_ignores {
                    options.skip_default_ignores = true;
                }
                let prepared = deploy::prepare(&self.resolve(path), &options)?;
                format_manifest(&prepared, format)
            }
            Commands::Deploy {
                path,
                name,
                ignore,
                dry_run,
            } => {
                let mut options = DeployOptions::from_config(&self.config.deploy);
                options.name = name.clone();
                options.extra_ignore.extend(ignore.iter().cloned());
                let root = self.resolve(path);
                if *dry_run {
                    let prepared = deploy::prepare(&root, &options)?;
                    return format_dry_run(&prepared.request(&options));
                }
                let client = self.authenticated()?.client();
                let outcome = self.block_on(deploy::deploy(client, &root, &options))?;
                Ok(format_deploy_outcome(&outcome))
            }
            Commands::Deployments { command } => self.handle_deployments(command),
            Commands::Domains { command } => self.handle_domains(command),
            Commands::Certs { command } => self.handle_certs(command),
            Commands::Teams { command } => self.handle_teams(command),
            Commands::Config => {
                let mut shown = self.config.clone();
                if shown.api.token.is_some() {
                    shown.api.token = Some("********".to_string());
                }
                toml::to_string_pretty(&shown)
                    .map_err(|e| ApiError::Serialization(e.to_string()))
            }
            Commands::Plan { format } => {
                let subscription = self.block_on(self.authenticated()?.plans().current())?;
                format_plan(&subscription, format)
            }
        }
    }

    fn handle_deployments(&self, command: &DeploymentCommands) -> Result<String, ApiError> {
        let deployments = self.authenticated()?.deployments();
        match command {
            DeploymentCommands::List { format } => {
                format_deployments(&self.block_on(deployments.list())?, format)
            }
            DeploymentCommands::Get { id, format } => {
                format_deployment(&self.block_on(deployments.get(id))?, format)
            }
            DeploymentCommands::Delete { id } => {
                self.block_on(deployments.delete(id))?;
                Ok(format!("Deleted deployment {}", id))
            }
            DeploymentCommands::Files { id, format } => {
                format_deployment_files(&self.block_on(deployments.files(id))?, format)
            }
            DeploymentCommands::Aliases { id, format } => {
                format_aliases(&self.block_on(deployments.list_aliases(id))?, format)
            }
            DeploymentCommands::Alias { id, alias } => {
                let created = self.block_on(deployments.alias(id, alias))?;
                Ok(format!("Aliased {} to {}", created.alias, id))
            }
            DeploymentCommands::Scale { id, min, max } => {
                let deployment = self.block_on(deployments.scale(id, *min, *max))?;
                Ok(format!(
                    "Scaled {} to {}..{} instance(s) ({})",
                    deployment.uid, min, max, deployment.state
                ))
            }
        }
    }

    fn handle_domains(&self, command: &DomainCommands) -> Result<String, ApiError> {
        let domains = self.authenticated()?.domains();
        match command {
            DomainCommands::List { format } => {
                format_domains(&self.block_on(domains.list())?, format)
            }
            DomainCommands::Add { name, external } => {
                let domain = self.block_on(domains.create(name, *external))?;
                let mut out = format!("Added domain {} ({})", domain.name, domain.uid);
                if let Some(token) = domain.verify_token.filter(|_| !domain.verified) {
                    out.push_str(&format!("\n  Verification token: {}", token));
                }
                Ok(out)
            }
            DomainCommands::Rm { name } => {
                self.block_on(domains.delete(name))?;
                Ok(format!("Removed domain {}", name))
            }
        }
    }

    fn handle_certs(&self, command: &CertCommands) -> Result<String, ApiError> {
        let certs = self.authenticated()?.certs();
        match command {
            CertCommands::List { format } => format_certs(&self.block_on(certs.list())?, format),
            CertCommands::Issue { domains } => {
                let cert = self.block_on(certs.issue(domains))?;
                Ok(format!("Issued certificate {} for {}", cert.uid, domains.join(", ")))
            }
            CertCommands::Renew { domains } => {
                let cert = self.block_on(certs.renew(domains))?;
                Ok(format!("Renewed certificate {} for {}", cert.uid, domains.join(", ")))
            }
            CertCommands::Rm { domain } => {
                self.block_on(certs.delete(domain))?;
                Ok(format!("Removed certificate for {}", domain))
            }
        }
    }

    fn handle_teams(&self, command: &TeamCommands) -> Result<String, ApiError> {
        let teams = self.authenticated()?.teams();
        match command {
            TeamCommands::List { format } => format_teams(&self.block_on(teams.list())?, format),
            TeamCommands::Create { slug } => {
                let team = self.block_on(teams.create(slug))?;
                Ok(format!("Created team {} ({})", team.slug, team.id))
            }
            TeamCommands::Members { team_id, format } => {
                format_team_members(&self.block_on(teams.members(team_id))?, format)
            }
            TeamCommands::Rename { team_id, name } => {
                self.block_on(teams.rename(team_id, name))?;
                Ok(format!("Renamed team {} to {}", team_id, name))
            }
            TeamCommands::Invite { team_id, email } => {
                self.block_on(teams.invite(team_id, email))?;
                Ok(format!("Invited {} to team {}", email, team_id))
            }
            TeamCommands::Rm { team_id } => {
                self.block_on(teams.delete(team_id))?;
                Ok(format!("Deleted team {}", team_id))
            }
        }
    }

    fn authenticated(&self) -> Result<&Now, ApiError> {
        if self.now.client().authenticated() {
            Ok(&self.now)
        } else {
            Err(ApiError::NotAuthenticated)
        }
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Relative command paths resolve against the workspace root.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        }
    }
}

/// Stable name of a command for log fields.
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Manifest { .. } => "manifest",
        Commands::Deploy { .. } => "deploy",
        Commands::Deployments { command } => match command {
            DeploymentCommands::List { .. } => "deployments.list",
            DeploymentCommands::Get { .. } => "deployments.get",
            DeploymentCommands::Delete { .. } => "deployments.delete",
            DeploymentCommands::Files { .. } => "deployments.files",
            DeploymentCommands::Aliases { .. } => "deployments.aliases",
            DeploymentCommands::Alias { .. } => "deployments.alias",
            DeploymentCommands::Scale { .. } => "deployments.scale",
        },
        Commands::Domains { command } => match command {
            DomainCommands::List { .. } => "domains.list",
            DomainCommands::Add { .. } => "domains.add",
            DomainCommands::Rm { .. } => "domains.rm",
        },
        Commands::Certs { command } => match command {
            CertCommands::List { .. } => "certs.list",
            CertCommands::Issue { .. } => "certs.issue",
            CertCommands::Renew { .. } => "certs.renew",
            CertCommands::Rm { .. } => "certs.rm",
        },
        Commands::Teams { command } => match command {
            TeamCommands::List { .. } => "teams.list",
            TeamCommands::Create { .. } => "teams.create",
            TeamCommands::Members { .. } => "teams.members",
            TeamCommands::Rename { .. } => "teams.rename",
            TeamCommands::Invite { .. } => "teams.invite",
            TeamCommands::Rm { .. } => "teams.rm",
        },
        Commands::Config => "config",
        Commands::Plan { .. } => "plan",
    }
}
