//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the API client from validated configuration
//! - Resolve the load balancer handle exactly once
//! - Assemble the session used by node lifecycle hooks
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Steps run in order, not concurrently

use std::sync::Arc;
use thiserror::Error;

use crate::cloud::Cloud;
use crate::config::ConnectConfig;
use crate::hcloud::{ApiError, CloudApi, HcloudClient};
use crate::load_balancer::{LoadBalancerError, LoadBalancerHandle};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("node name missing (set NODE_NAME or node.name)")]
    MissingNodeName,

    #[error("failed to build API client: {0}")]
    Client(#[from] ApiError),

    #[error(transparent)]
    Resolve(#[from] LoadBalancerError),
}

/// Everything a node lifecycle hook needs.
#[derive(Debug, Clone)]
pub struct Connector {
    pub cloud: Cloud,
    pub load_balancer: LoadBalancerHandle,
}

/// Build the API client described by `config`.
pub fn build_client(config: &ConnectConfig) -> Result<Arc<dyn CloudApi>, StartupError> {
    let client = HcloudClient::new(&config.api)?;
    tracing::debug!(endpoint = %client.endpoint(), "API client initialized");
    Ok(Arc::new(client))
}

/// Start against the real API.
pub async fn start(config: &ConnectConfig) -> Result<Connector, StartupError> {
    let client = build_client(config)?;
    start_with_client(client, config).await
}

/// Start against an existing client.
pub async fn start_with_client(
    client: Arc<dyn CloudApi>,
    config: &ConnectConfig,
) -> Result<Connector, StartupError> {
    let node_name = config
        .node
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or(StartupError::MissingNodeName)?
        .to_string();

    let load_balancer = LoadBalancerHandle::resolve(client.as_ref(), &config.load_balancer).await?;

    tracing::info!(
        node = %node_name,
        load_balancer = load_balancer.identifier(),
        use_private_network = load_balancer.use_private_network(),
        "Startup complete"
    );

    Ok(Connector {
        cloud: Cloud::new(client, node_name),
        load_balancer,
    })
}
