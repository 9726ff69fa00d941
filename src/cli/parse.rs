//! CLI parse: clap types for the `now` binary. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line client for the deployment platform
#[derive(Parser)]
#[command(name = "now")]
#[command(about = "Deploy directories and manage deployments, domains, certs and teams")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (where now.toml is looked up)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// API token (overrides NOW_TOKEN and config files)
    #[arg(long)]
    pub token: Option<String>,

    /// Team to scope every request to
    #[arg(long)]
    pub team: Option<String>,

    /// API base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the upload manifest of a directory without contacting the API
    Manifest {
        /// Directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Leave the built-in default ignore patterns out
        #[arg(long)]
        no_default_ignores: bool,
    },
    /// Deploy a directory
    Deploy {
        /// Directory to deploy
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Deployment name
        #[arg(long)]
        name: Option<String>,
        /// Extra ignore patterns (repeatable)
        #[arg(long = "ignore")]
        ignore: Vec<String>,
        /// Show what would be sent without contacting the API
        #[arg(long)]
        dry_run: bool,
    },
    /// Manage deployments
    Deployments {
        #[command(subcommand)]
        command: DeploymentCommands,
    },
    /// Manage domains
    Domains {
        #[command(subcommand)]
        command: DomainCommands,
    },
    /// Manage certificates
    Certs {
        #[command(subcommand)]
        command: CertCommands,
    },
    /// Manage teams
    Teams {
        #[command(subcommand)]
        command: TeamCommands,
    },
    /// Print the effective configuration as TOML (token redacted)
    Config,
    /// Show the current subscription plan
    Plan {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum DeploymentCommands {
    /// List deployments
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show one deployment
    Get {
        id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Delete a deployment
    Delete { id: String },
    /// List the file tree of a deployment
    Files {
        id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List aliases pointing at a deployment
    Aliases {
        id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Point an alias at a deployment
    Alias { id: String, alias: String },
    /// Set the instance range of a deployment
    Scale {
        id: String,
        #[arg(long)]
        min: u32,
        #[arg(long)]
        max: u32,
    },
}

#[derive(Subcommand)]
pub enum DomainCommands {
    /// List domains
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Add a domain
    Add {
        name: String,
        /// Domain is managed by an external DNS provider
        #[arg(long)]
        external: bool,
    },
    /// Remove a domain
    Rm { name: String },
}

#[derive(Subcommand)]
pub enum CertCommands {
    /// List certificates
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Issue a certificate for one or more domains
    Issue {
        #[arg(required = true)]
        domains: Vec<String>,
    },
    /// Renew the certificate of one or more domains
    Renew {
        #[arg(required = true)]
        domains: Vec<String>,
    },
    /// Remove the certificate of a domain
    Rm { domain: String },
}

#[derive(Subcommand)]
pub enum TeamCommands {
    /// List teams
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Create a team
    Create { slug: String },
    /// List members of a team
    Members {
        team_id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Rename a team
    Rename { team_id: String, name: String },
    /// Invite a user by email
    Invite { team_id: String, email: String },
    /// Delete a team
    Rm { team_id: String },
}
