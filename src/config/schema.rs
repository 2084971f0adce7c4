//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every field has a default so an empty file (or no file) is valid input
//! before environment overrides are applied.

use serde::{Deserialize, Serialize};

/// Default Hetzner Cloud API base URL.
pub const DEFAULT_ENDPOINT: &str = "https://api.hetzner.cloud/v1";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ConnectConfig {
    /// Cloud API access.
    pub api: ApiConfig,

    /// Load balancer target registration.
    pub load_balancer: LoadBalancerConfig,

    /// The node this process manages.
    pub node: NodeConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Cloud API client configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API base URL.
    pub endpoint: String,

    /// API token. Normally supplied through `HCLOUD_TOKEN`.
    #[serde(skip_serializing)]
    pub token: Option<String>,

    /// Per-request timeout applied by the HTTP client.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Load balancer registration settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoadBalancerConfig {
    /// Name or numeric ID of the load balancer. `None` disables registration.
    pub name: Option<String>,

    /// Register targets through the node's private network address.
    pub use_private_network: bool,
}

impl LoadBalancerConfig {
    /// The configured name. Only an absent value means unconfigured.
    pub fn configured_name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Node identity.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Node name; must match the name of the node's cloud server.
    pub name: Option<String>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}
