//! Configuration System
//!
//! Layered configuration for the client and CLI. Sources, lowest to highest
//! precedence: built-in defaults, the global `config.toml`, the workspace
//! `now.toml`, `NOW__SECTION__KEY` environment variables, then the
//! `NOW_TOKEN` / `NOW_TEAM` shortcuts. CLI flags are applied on top by the
//! binary.

use crate::client::DEFAULT_API_URL;
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

mod merge;
mod sources;

pub use sources::global_file::global_config_path;
pub use sources::workspace_file::WORKSPACE_CONFIG_FILE;

pub const ENV_PREFIX: &str = "NOW";
pub const TOKEN_ENV: &str = "NOW_TOKEN";
pub const TEAM_ENV: &str = "NOW_TEAM";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NowConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub deploy: DeployConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API endpoint and credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub url: String,

    /// Bearer token. Prefer `NOW_TOKEN` over writing it to a file.
    #[serde(default)]
    pub token: Option<String>,

    /// Team scope for every request
    #[serde(default)]
    pub team_id: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    80
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            token: None,
            team_id: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Deploy-time file selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Patterns added to the ignore rules of every deploy
    #[serde(default)]
    pub extra_ignore: Vec<String>,

    /// Include the built-in default ignore table
    #[serde(default = "default_true")]
    pub use_default_ignores: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            extra_ignore: Vec::new(),
            use_default_ignores: true,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Api(String),
    Deploy(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Api(msg) => write!(f, "api: {}", msg),
            ValidationError::Deploy(msg) => write!(f, "deploy: {}", msg),
            ValidationError::Logging(msg) => write!(f, "logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ApiConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(format!("url must be http(s): {}", self.url));
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl DeployConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.extra_ignore.iter().any(|p| p.trim().is_empty()) {
            return Err("extra_ignore cannot contain empty patterns".to_string());
        }
        Ok(())
    }
}

impl NowConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.api.validate() {
            errors.push(ValidationError::Api(e));
        }
        if let Err(e) = self.deploy.validate() {
            errors.push(ValidationError::Deploy(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and fold every problem into one error.
    pub fn ensure_valid(&self) -> Result<(), ApiError> {
        self.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                msgs.join("\n")
            ))
        })
    }

    fn apply_env_shortcuts(&mut self) {
        if let Some(token) = non_empty_env(TOKEN_ENV) {
            self.api.token = Some(token);
        }
        if let Some(team) = non_empty_env(TEAM_ENV) {
            self.api.team_id = Some(team);
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Loads [`NowConfig`] from every configured source
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load with the workspace `now.toml` of `workspace_root`.
    pub fn load(workspace_root: &Path) -> Result<NowConfig, ConfigError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        Self::finish(builder.add_source(Self::environment()))
    }

    /// Load from one explicit file (plus defaults and environment).
    pub fn load_from_file(path: &Path) -> Result<NowConfig, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let builder = merge::merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .add_source(Self::environment());
        Self::finish(builder)
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<NowConfig, ConfigError> {
        let config: Config = builder.build()?;
        let mut now_config: NowConfig = config.try_deserialize()?;
        now_config.apply_env_shortcuts();
        Ok(now_config)
    }
}
