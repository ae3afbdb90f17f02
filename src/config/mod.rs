//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)          in-cluster environment
//!     → loader.rs                 → ClusterConfig::in_cluster()
//!     → validation.rs (semantic checks)
//!     → CheckerConfig (validated, immutable)
//!     → passed by reference to every check step
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - No global client state: each step receives the config it needs

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::CheckerConfig;
pub use schema::ClusterConfig;
pub use schema::MonitoringConfig;
pub use schema::ObservabilityConfig;
pub use schema::WatchConfig;
