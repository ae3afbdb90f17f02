//! Cluster API access.
//!
//! # Data Flow
//! ```text
//! ClusterConfig (endpoint + auth material)
//!     → client.rs (reqwest client, bearer auth, CA trust)
//!     → secrets.rs (KubeClient: list secrets → select token)
//!     → routes.rs  (RouteClient: route → exposed host)
//! ```
//!
//! # Design Decisions
//! - Typed views of the few fields read, not full API objects
//! - Every call is a single GET; no watches, no caching
//! - Timeouts come from the caller's ClusterConfig

pub mod client;
pub mod error;
pub mod routes;
pub mod secrets;

pub use client::ApiClient;
pub use error::{ClusterError, ClusterResult};
pub use routes::RouteClient;
pub use secrets::KubeClient;
