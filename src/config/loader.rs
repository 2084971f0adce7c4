//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ConnectConfig;
use crate::config::validation::{validate_config, ValidationError};

/// API token.
pub const TOKEN_ENV_VAR: &str = "HCLOUD_TOKEN";
/// API base URL override.
pub const ENDPOINT_ENV_VAR: &str = "HCLOUD_ENDPOINT";
/// Name or ID of the load balancer to register with.
pub const LOAD_BALANCER_ENV_VAR: &str = "HCLOUD_LOAD_BALANCER";
/// Any non-empty value enables private network targets.
pub const PRIVATE_NETWORK_ENV_VAR: &str = "HCLOUD_USE_PRIVATE_NETWORK";
/// Name of the node this process manages.
pub const NODE_NAME_ENV_VAR: &str = "NODE_NAME";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

/// Parse a TOML configuration file without validating it.
pub fn read_config_file(path: &Path) -> Result<ConnectConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Overlay environment values onto `config`.
///
/// `lookup` returns the value of a variable, or `None` if it is not set.
/// Only variables that are set take effect. A set but empty
/// `HCLOUD_LOAD_BALANCER` is kept as an empty name and fails resolution.
pub fn apply_env<F>(config: &mut ConnectConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = lookup(TOKEN_ENV_VAR) {
        config.api.token = Some(token);
    }
    if let Some(endpoint) = lookup(ENDPOINT_ENV_VAR).filter(|v| !v.is_empty()) {
        config.api.endpoint = endpoint;
    }
    if let Some(name) = lookup(LOAD_BALANCER_ENV_VAR) {
        config.load_balancer.name = Some(name);
    }
    if let Some(flag) = lookup(PRIVATE_NETWORK_ENV_VAR) {
        config.load_balancer.use_private_network = !flag.is_empty();
    }
    if let Some(node) = lookup(NODE_NAME_ENV_VAR).filter(|v| !v.is_empty()) {
        config.node.name = Some(node);
    }
}

/// Load configuration from an optional TOML file, apply process environment
/// overrides, and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<ConnectConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => ConnectConfig::default(),
    };

    apply_env(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
