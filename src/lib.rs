//! Hetzner Cloud load balancer target registration for cluster nodes.

pub mod cloud;
pub mod config;
pub mod hcloud;
pub mod lifecycle;
pub mod load_balancer;
pub mod observability;

pub use cloud::Cloud;
pub use config::ConnectConfig;
pub use hcloud::{CloudApi, HcloudClient};
pub use lifecycle::Connector;
pub use load_balancer::{LoadBalancerError, LoadBalancerHandle};
