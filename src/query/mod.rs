//! Alert queries against the metrics backend.
//!
//! # Data Flow
//! ```text
//! RouteClient → route host
//!     → client.rs (ThanosQuerierClient, bearer token)
//!     → GET /api/v1/query?query=ALERTS{...}
//!     → types.rs (QueryResponse, count = data.result.len())
//! ```

pub mod client;
pub mod types;

pub use client::ThanosQuerierClient;
pub use types::QueryResponse;
