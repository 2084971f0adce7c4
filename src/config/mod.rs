//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overrides)
//!     → validation.rs (semantic checks)
//!     → ConnectConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Only the loader reads the process environment; everything downstream
//!   receives explicit config structs
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ApiConfig, ConnectConfig, LoadBalancerConfig, LogFormat, NodeConfig, ObservabilityConfig};
pub use validation::ValidationError;
