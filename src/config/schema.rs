//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the checker.
//! All types derive Serde traits for deserialization from config files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cluster::ClusterError;

/// Mount point of the service account credentials inside a pod.
pub const IN_CLUSTER_SA_DIR: &str = "/var/run/secrets/kubernetes.io/serviceaccount";

/// Root configuration for the monitoring status checker.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CheckerConfig {
    /// How to reach the cluster API server.
    pub cluster: ClusterConfig,

    /// Which monitoring stack to inspect.
    pub monitoring: MonitoringConfig,

    /// Polling settings for `watch` mode.
    pub watch: WatchConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Cluster access configuration (API server endpoint + auth material).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// API server base URL (e.g., "https://kubernetes.default.svc").
    pub api_server: String,

    /// Bearer token used against the API server. Wins over `token_file`.
    pub bearer_token: Option<String>,

    /// File holding the bearer token.
    pub token_file: Option<PathBuf>,

    /// PEM bundle trusted for the API server certificate.
    pub ca_cert_path: Option<PathBuf>,

    /// Skip API server certificate verification.
    pub insecure_skip_tls_verify: bool,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            api_server: "https://kubernetes.default.svc".to_string(),
            bearer_token: None,
            token_file: None,
            ca_cert_path: None,
            insecure_skip_tls_verify: false,
            timeout_secs: 30,
        }
    }
}

impl ClusterConfig {
    /// Point `base` at the API server a pod sees in its environment and
    /// authenticate with the mounted service account. Timeout and TLS
    /// settings of `base` are kept.
    pub fn in_cluster(base: &ClusterConfig) -> Result<Self, ClusterError> {
        Self::in_cluster_from(
            base,
            std::env::var("KUBERNETES_SERVICE_HOST").ok(),
            std::env::var("KUBERNETES_SERVICE_PORT").ok(),
            Path::new(IN_CLUSTER_SA_DIR),
        )
    }

    pub(crate) fn in_cluster_from(
        base: &ClusterConfig,
        host: Option<String>,
        port: Option<String>,
        sa_dir: &Path,
    ) -> Result<Self, ClusterError> {
        let host = host
            .filter(|h| !h.is_empty())
            .ok_or(ClusterError::NotInCluster("KUBERNETES_SERVICE_HOST"))?;
        let port = port
            .filter(|p| !p.is_empty())
            .ok_or(ClusterError::NotInCluster("KUBERNETES_SERVICE_PORT"))?;

        // IPv6 service hosts need brackets in a URL authority.
        let authority = if host.contains(':') {
            format!("[{}]:{}", host, port)
        } else {
            format!("{}:{}", host, port)
        };

        let token_file = sa_dir.join("token");
        if !token_file.exists() {
            return Err(ClusterError::NotInCluster("service account token"));
        }
        let ca = sa_dir.join("ca.crt");

        Ok(Self {
            api_server: format!("https://{}", authority),
            bearer_token: None,
            token_file: Some(token_file),
            ca_cert_path: if ca.exists() {
                Some(ca)
            } else {
                base.ca_cert_path.clone()
            },
            ..base.clone()
        })
    }
}

/// Monitoring stack configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitoringConfig {
    /// Namespace the monitoring stack runs in.
    pub namespace: String,

    /// Service account whose token authenticates the alert query.
    pub service_account: String,

    /// Route exposing the query service.
    pub querier_route: String,

    /// Alert severity that marks the stack degraded.
    pub severity: String,

    /// Scheme used to reach the route host ("https" or "http").
    pub query_scheme: String,

    /// Accept self-signed router certificates on the query route.
    pub querier_insecure_skip_tls_verify: bool,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            namespace: "openshift-monitoring".to_string(),
            service_account: "cluster-monitoring-operator".to_string(),
            querier_route: "thanos-querier".to_string(),
            severity: "critical".to_string(),
            query_scheme: "https".to_string(),
            querier_insecure_skip_tls_verify: true,
        }
    }
}

impl MonitoringConfig {
    /// The alert-matching query issued against the query service.
    pub fn alert_query(&self) -> String {
        format!(
            r#"ALERTS{{namespace="{}", severity="{}"}}"#,
            escape_label_value(&self.namespace),
            escape_label_value(&self.severity)
        )
    }
}

/// Escape a value for a double-quoted PromQL label matcher.
fn escape_label_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str(r"\\"),
            '"' => escaped.push_str(r#"\""#),
            '\n' => escaped.push_str(r"\n"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Seconds between two checks.
    pub interval_secs: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { interval_secs: 60 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
