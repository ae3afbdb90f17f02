//! Monitoring stack status checker library.

pub mod cluster;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod query;
pub mod status;

pub use config::CheckerConfig;
pub use status::{is_degraded, DegradationStatus, HealthChecker, Reason};
