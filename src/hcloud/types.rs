//! Hetzner Cloud resource types and error definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Server ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerId(pub u64);

impl From<u64> for ServerId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ServerId> for u64 {
    fn from(id: ServerId) -> Self {
        id.0
    }
}

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Load balancer ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadBalancerId(pub u64);

impl From<u64> for LoadBalancerId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<LoadBalancerId> for u64 {
    fn from(id: LoadBalancerId) -> Self {
        id.0
    }
}

impl fmt::Display for LoadBalancerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cloud server. Only the fields this crate reads are decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub id: ServerId,
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub public_net: PublicNet,
    #[serde(default)]
    pub private_net: Vec<PrivateNet>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicNet {
    pub ipv4: Option<Ipv4Address>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ipv4Address {
    pub ip: String,
}

/// Attachment of a server to a private network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateNet {
    pub network: u64,
    pub ip: String,
}

/// A load balancer and its currently registered targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancer {
    pub id: LoadBalancerId,
    pub name: String,
    #[serde(default)]
    pub targets: Vec<LoadBalancerTarget>,
}

impl LoadBalancer {
    /// Whether `server` is registered as a server target.
    pub fn has_server_target(&self, server: ServerId) -> bool {
        self.targets
            .iter()
            .any(|t| t.target_type == TargetType::Server && t.server.map(|s| s.id) == Some(server))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    Server,
    LabelSelector,
    Ip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerTarget {
    #[serde(rename = "type")]
    pub target_type: TargetType,
    #[serde(default)]
    pub server: Option<ServerRef>,
    #[serde(default)]
    pub use_private_ip: bool,
}

/// Reference to a server by ID, as used in target payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRef {
    pub id: ServerId,
}

/// An asynchronous action started by a mutating API call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: u64,
    pub command: String,
    pub status: String,
    #[serde(default)]
    pub error: Option<ActionError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionError {
    pub code: String,
    pub message: String,
}

/// Errors returned by the cloud API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, TLS or timeout failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with an error document.
    #[error("{message} ({code}, HTTP {status})")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// The response body did not match the expected schema.
    #[error("invalid response: {0}")]
    Decode(String),

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("API token is not a valid header value")]
    InvalidToken,
}

impl ApiError {
    /// Whether the API reported the requested resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Api { code, .. } if code == "not_found")
    }
}

/// Result type for cloud API calls.
pub type ApiResult<T> = Result<T, ApiError>;
