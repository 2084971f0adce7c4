//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Build API client → Resolve load balancer
//!
//! Node lifecycle hooks:
//!     Connector { cloud, load_balancer } → register / deregister
//! ```

pub mod startup;

pub use startup::{start, Connector, StartupError};
