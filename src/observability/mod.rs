//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every check produces:
//!     → logging.rs (structured log events, one span per check with a check_id)
//!     → metrics.rs (degraded gauge, check counter, firing alert gauge)
//!
//! Consumers:
//!     → stderr log stream
//!     → Metrics endpoint (Prometheus scrape, watch mode only)
//! ```

pub mod logging;
pub mod metrics;
