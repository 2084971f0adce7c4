//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields (node, server, load_balancer)
//!
//! logging.rs installs the subscriber:
//!     → stderr, text or JSON
//! ```

pub mod logging;
