//! Errors raised while talking to the cluster API and the routes it exposes.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during cluster API operations.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// In-cluster configuration requested outside a pod.
    #[error("not running in a cluster: {0} is missing")]
    NotInCluster(&'static str),

    /// Base URL does not parse.
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Token or CA file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CA bundle is not valid PEM.
    #[error("invalid CA certificate {}: {source}", .path.display())]
    Certificate {
        path: PathBuf,
        #[source]
        source: reqwest::Error,
    },

    /// Bearer token cannot be sent as a header value.
    #[error("bearer token contains characters not allowed in an HTTP header")]
    InvalidToken,

    /// HTTP client construction failed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Request could not be sent or the body could not be read.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status.
    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    /// Response body is not the expected JSON document.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Route exists but does not expose a host.
    #[error("route {namespace}/{name} has no host")]
    RouteHostMissing { namespace: String, name: String },

    /// No usable token secret for the service account.
    #[error("cannot find token for {namespace}/{name} service account")]
    TokenNotFound { namespace: String, name: String },

    /// Token secret carries data that is not a base64 UTF-8 string.
    #[error("token in secret {namespace}/{secret} is malformed: {reason}")]
    TokenMalformed {
        namespace: String,
        secret: String,
        reason: String,
    },
}

/// Result type for cluster operations.
pub type ClusterResult<T> = Result<T, ClusterError>;
