//! Load balancer target registration subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     LoadBalancerConfig (name or ID, private network flag)
//!     → handle.rs (one remote lookup)
//!     → LoadBalancerHandle (immutable)
//!
//! Node lifecycle hook:
//!     LoadBalancerHandle + Cloud session
//!     → registration.rs (server by name → load balancer by ID)
//!     → add_target / remove_target
//! ```
//!
//! # Design Decisions
//! - "No load balancer configured" is `None`, and register/deregister on
//!   such a handle succeed without contacting the API
//! - Every error carries the operation it came from
//! - No retries; callers decide what to do with a failure

pub mod error;
pub mod handle;
pub mod registration;


pub use error::{LoadBalancerError, LoadBalancerResult, Operation};
pub use handle::LoadBalancerHandle;
