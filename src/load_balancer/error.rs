//! Load balancer operation errors.

use std::fmt;
use thiserror::Error;

use crate::hcloud::{ApiError, LoadBalancerId};

/// The operation an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Resolve,
    Register,
    Deregister,
    Status,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Resolve => "load_balancer/resolve",
            Operation::Register => "load_balancer/register",
            Operation::Deregister => "load_balancer/deregister",
            Operation::Status => "load_balancer/status",
        };
        f.write_str(name)
    }
}

/// Errors from resolving a load balancer or changing its targets.
#[derive(Debug, Error)]
pub enum LoadBalancerError {
    /// A lookup request failed before an answer was obtained.
    #[error("{op}: lookup failed: {source}")]
    LookupFailed {
        op: Operation,
        #[source]
        source: ApiError,
    },

    /// The configured load balancer does not exist.
    #[error("{op}: load balancer {name} not found")]
    NotFound { op: Operation, name: String },

    /// No server exists with the node's name.
    #[error("{op}: instance not found: {node}")]
    InstanceNotFound { op: Operation, node: String },

    /// The resolved load balancer no longer exists.
    #[error("{op}: load balancer {id} not found")]
    LoadBalancerNotFound { op: Operation, id: LoadBalancerId },

    /// A remote call failed; the cause is passed through unchanged.
    #[error("{op}: {source}")]
    Api {
        op: Operation,
        #[source]
        source: ApiError,
    },
}

impl LoadBalancerError {
    pub fn operation(&self) -> Operation {
        match self {
            LoadBalancerError::LookupFailed { op, .. }
            | LoadBalancerError::NotFound { op, .. }
            | LoadBalancerError::InstanceNotFound { op, .. }
            | LoadBalancerError::LoadBalancerNotFound { op, .. }
            | LoadBalancerError::Api { op, .. } => *op,
        }
    }

    /// The underlying API error, if any.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            LoadBalancerError::LookupFailed { source, .. }
            | LoadBalancerError::Api { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type for load balancer operations.
pub type LoadBalancerResult<T> = Result<T, LoadBalancerError>;
