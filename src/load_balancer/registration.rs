//! Node target registration.
//!
//! # Responsibilities
//! - Find the node's server by name
//! - Find the resolved load balancer by ID
//! - Add or remove the server as a load balancer target
//!
//! Each operation is a fixed sequence of awaited calls with no retries and
//! no locking. An unconfigured handle makes no remote calls at all.

use crate::cloud::Cloud;
use crate::hcloud::{LoadBalancer, LoadBalancerId, Server};
use crate::load_balancer::error::{LoadBalancerError, LoadBalancerResult, Operation};
use crate::load_balancer::handle::LoadBalancerHandle;

impl LoadBalancerHandle {
    /// Add the session's node as a server target.
    pub async fn register(&self, cloud: &Cloud) -> LoadBalancerResult<()> {
        let op = Operation::Register;
        let Some(id) = self.load_balancer() else {
            tracing::info!(
                node = %cloud.node_name(),
                "No load balancer configured, skipping registration"
            );
            return Ok(());
        };

        let (server, load_balancer) = lookup(cloud, id, op).await?;

        cloud
            .client()
            .add_server_target(&load_balancer, &server, self.use_private_network())
            .await
            .map_err(|source| LoadBalancerError::Api { op, source })?;

        tracing::info!(
            node = %cloud.node_name(),
            server = %server.id,
            load_balancer = %load_balancer.id,
            use_private_ip = self.use_private_network(),
            "Registered node as load balancer target"
        );
        Ok(())
    }

    /// Remove the session's node from the load balancer's targets.
    pub async fn deregister(&self, cloud: &Cloud) -> LoadBalancerResult<()> {
        let op = Operation::Deregister;
        let Some(id) = self.load_balancer() else {
            tracing::info!(
                node = %cloud.node_name(),
                "No load balancer configured, skipping deregistration"
            );
            return Ok(());
        };

        let (server, load_balancer) = lookup(cloud, id, op).await?;

        cloud
            .client()
            .remove_server_target(&load_balancer, &server)
            .await
            .map_err(|source| LoadBalancerError::Api { op, source })?;

        tracing::info!(
            node = %cloud.node_name(),
            server = %server.id,
            load_balancer = %load_balancer.id,
            "Deregistered node from load balancer targets"
        );
        Ok(())
    }

    /// Whether the session's node is currently a server target.
    pub async fn is_registered(&self, cloud: &Cloud) -> LoadBalancerResult<bool> {
        let Some(id) = self.load_balancer() else {
            return Ok(false);
        };

        let (server, load_balancer) = lookup(cloud, id, Operation::Status).await?;
        Ok(load_balancer.has_server_target(server.id))
    }
}

async fn lookup(
    cloud: &Cloud,
    id: LoadBalancerId,
    op: Operation,
) -> LoadBalancerResult<(Server, LoadBalancer)> {
    let node = cloud.node_name();

    let server = cloud
        .client()
        .server_by_name(node)
        .await
        .map_err(|source| LoadBalancerError::LookupFailed { op, source })?
        .ok_or_else(|| LoadBalancerError::InstanceNotFound {
            op,
            node: node.to_string(),
        })?;

    let load_balancer = cloud
        .client()
        .load_balancer_by_id(id)
        .await
        .map_err(|source| LoadBalancerError::Api { op, source })?
        .ok_or(LoadBalancerError::LoadBalancerNotFound { op, id })?;

    Ok((server, load_balancer))
}
