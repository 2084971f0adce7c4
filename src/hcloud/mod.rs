//! Hetzner Cloud API subsystem.
//!
//! # Data Flow
//! ```text
//! ApiConfig (endpoint, token, timeout)
//!     → client.rs (authenticated HTTP, JSON envelopes)
//!     → types.rs (servers, load balancers, actions, errors)
//! ```
//!
//! Callers depend on the `CloudApi` trait rather than `HcloudClient` so the
//! registration logic can run against in-memory fakes.

pub mod client;
pub mod types;

pub use client::{CloudApi, HcloudClient};
pub use types::{
    Action, ApiError, ApiResult, LoadBalancer, LoadBalancerId, LoadBalancerTarget, Server, ServerId,
};
