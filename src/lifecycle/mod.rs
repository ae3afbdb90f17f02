//! Lifecycle management for watch mode.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     broadcast → StatusMonitor exits after the check in flight
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
