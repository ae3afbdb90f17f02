//! Thanos Querier client reached through its route.
//!
//! # Responsibilities
//! - Resolve the querier's route host
//! - Authenticate with a service account token
//! - Run instant queries against `/api/v1/query`

use std::time::Duration;

use url::Url;

use crate::cluster::client::{bearer_headers, get_text};
use crate::cluster::{ClusterError, ClusterResult, RouteClient};
use crate::config::MonitoringConfig;

/// Prometheus-compatible query client bound to one base URL.
#[derive(Debug, Clone)]
pub struct ThanosQuerierClient {
    http: reqwest::Client,
    base: Url,
}

impl ThanosQuerierClient {
    /// Build a client for `base` (e.g. `https://thanos-querier.apps.example`).
    pub fn new(
        base: &str,
        token: &str,
        insecure_skip_tls_verify: bool,
        timeout: Duration,
    ) -> ClusterResult<Self> {
        let base = Url::parse(base).map_err(|source| ClusterError::InvalidUrl {
            url: base.to_string(),
            source,
        })?;

        let http = reqwest::Client::builder()
            .default_headers(bearer_headers(token)?)
            .danger_accept_invalid_certs(insecure_skip_tls_verify)
            .timeout(timeout)
            .build()
            .map_err(ClusterError::Client)?;

        Ok(Self { http, base })
    }

    /// Build a client for the querier route described by `monitoring`.
    pub async fn from_route(
        routes: &RouteClient,
        monitoring: &MonitoringConfig,
        token: &str,
        timeout: Duration,
    ) -> ClusterResult<Self> {
        let host = routes
            .host(&monitoring.namespace, &monitoring.querier_route)
            .await?;

        tracing::debug!(
            route = %monitoring.querier_route,
            host = %host,
            "Resolved querier route"
        );

        Self::new(
            &format!("{}://{}", monitoring.query_scheme, host),
            token,
            monitoring.querier_insecure_skip_tls_verify,
            timeout,
        )
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Run an instant query and return the raw response body.
    pub async fn query(&self, expr: &str) -> ClusterResult<String> {
        let mut url = self.base.join("api/v1/query").map_err(|source| {
            ClusterError::InvalidUrl {
                url: self.base.to_string(),
                source,
            }
        })?;
        url.query_pairs_mut().append_pair("query", expr);

        get_text(&self.http, url).await
    }
}
