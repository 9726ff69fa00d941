//! Merge rules: defaults first, later sources override earlier ones key by key.

use crate::client::DEFAULT_API_URL;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("api.url", DEFAULT_API_URL)?
        .set_default("api.timeout_secs", 80)?
        .set_default("deploy.use_default_ignores", true)
}
