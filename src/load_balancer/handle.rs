//! Resolution of the configured load balancer.

use crate::config::loader::LOAD_BALANCER_ENV_VAR;
use crate::config::LoadBalancerConfig;
use crate::hcloud::{CloudApi, LoadBalancerId};
use crate::load_balancer::error::{LoadBalancerError, LoadBalancerResult, Operation};

/// Resolved, immutable binding to the load balancer this node registers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadBalancerHandle {
    load_balancer: Option<LoadBalancerId>,
    use_private_network: bool,
}

impl LoadBalancerHandle {
    pub fn new(load_balancer: Option<LoadBalancerId>, use_private_network: bool) -> Self {
        Self {
            load_balancer,
            use_private_network,
        }
    }

    /// Resolve `config` against the API.
    ///
    /// Issues one lookup when a load balancer is configured and none
    /// otherwise. A configured value that parses as an integer is looked up
    /// by ID, anything else by name.
    pub async fn resolve(
        client: &dyn CloudApi,
        config: &LoadBalancerConfig,
    ) -> LoadBalancerResult<Self> {
        let op = Operation::Resolve;

        let load_balancer = match config.configured_name() {
            Some(name) => {
                let found = client
                    .load_balancer(name)
                    .await
                    .map_err(|source| LoadBalancerError::LookupFailed { op, source })?
                    .ok_or_else(|| LoadBalancerError::NotFound {
                        op,
                        name: name.to_string(),
                    })?;

                tracing::info!(
                    configured = %name,
                    load_balancer = %found.id,
                    name = %found.name,
                    use_private_network = config.use_private_network,
                    "Load balancer resolved"
                );
                Some(found.id)
            }
            None => {
                tracing::info!(
                    env = LOAD_BALANCER_ENV_VAR,
                    "No load balancer configured, target registration disabled"
                );
                None
            }
        };

        Ok(Self {
            load_balancer,
            use_private_network: config.use_private_network,
        })
    }

    pub fn load_balancer(&self) -> Option<LoadBalancerId> {
        self.load_balancer
    }

    /// Raw remote ID, `0` when no load balancer is configured.
    pub fn identifier(&self) -> u64 {
        self.load_balancer.map_or(0, u64::from)
    }

    pub fn is_configured(&self) -> bool {
        self.load_balancer.is_some()
    }

    pub fn use_private_network(&self) -> bool {
        self.use_private_network
    }
}
