//! Monitoring stack status subsystem.
//!
//! # Data Flow
//! ```text
//! checker.rs (HealthChecker):
//!     ClusterConfig
//!     → RouteClient + KubeClient
//!     → service account token
//!     → ThanosQuerierClient → ALERTS{namespace, severity}
//!     → result count
//!
//! decision.rs:
//!     Result<count, QueryError> → DegradationStatus
//!
//! monitor.rs (watch mode):
//!     Periodic timer → checker.rs → latest StatusReport
//! ```

pub mod checker;
pub mod decision;
pub mod error;
pub mod monitor;

pub use checker::{is_degraded, HealthChecker};
pub use decision::{decide, DegradationStatus, Reason, StatusReport};
pub use error::{QueryError, StatusError};
pub use monitor::StatusMonitor;
