//! Monitoring stack health check.
//!
//! # Responsibilities
//! - Look up the service account token
//! - Query the Thanos Querier for critical alerts in the monitoring namespace
//! - Reduce the outcome to a `DegradationStatus`
//!
//! # Design Decisions
//! - Clients are built fresh for every check; nothing is cached between calls
//! - No retries: a failed step is reported as degraded right away
//! - Inability to determine alert state counts as degraded

use std::time::Duration;

use tracing::Instrument;
use uuid::Uuid;

use crate::cluster::{KubeClient, RouteClient};
use crate::config::{CheckerConfig, ClusterConfig, MonitoringConfig};
use crate::observability::metrics;
use crate::query::{QueryResponse, ThanosQuerierClient};
use crate::status::decision::{decide, DegradationStatus};
use crate::status::error::QueryError;

/// Runs the degraded check for one monitoring stack.
#[derive(Debug, Clone)]
pub struct HealthChecker {
    cluster: ClusterConfig,
    monitoring: MonitoringConfig,
}

impl HealthChecker {
    pub fn new(cluster: ClusterConfig, monitoring: MonitoringConfig) -> Self {
        Self {
            cluster,
            monitoring,
        }
    }

    pub fn from_config(config: &CheckerConfig) -> Self {
        Self::new(config.cluster.clone(), config.monitoring.clone())
    }

    /// Whether the monitoring stack should be reported degraded.
    pub async fn is_degraded(&self) -> DegradationStatus {
        let span = tracing::info_span!(
            "status_check",
            check_id = %Uuid::new_v4(),
            namespace = %self.monitoring.namespace,
        );

        async {
            let firing = self.alerts_firing().await;
            let count = firing.as_ref().ok().copied();
            let status = decide(firing);

            metrics::record_check(&status, count);

            match status.error() {
                Some(error) => tracing::warn!(
                    reason = status.reason_code(),
                    error = %error,
                    "Monitoring stack degraded"
                ),
                None => tracing::info!("Monitoring stack healthy"),
            }

            status
        }
        .instrument(span)
        .await
    }

    /// Number of critical alerts firing in the monitoring namespace.
    pub async fn alerts_firing(&self) -> Result<usize, QueryError> {
        let routes = RouteClient::new(&self.cluster).map_err(QueryError::RouteClient)?;
        let kube = KubeClient::new(&self.cluster).map_err(QueryError::KubeClient)?;

        let token = kube
            .service_account_token(&self.monitoring.namespace, &self.monitoring.service_account)
            .await
            .map_err(QueryError::TokenMissing)?;

        let querier = ThanosQuerierClient::from_route(
            &routes,
            &self.monitoring,
            &token,
            Duration::from_secs(self.cluster.timeout_secs),
        )
        .await
        .map_err(QueryError::QuerierClient)?;

        let query = self.monitoring.alert_query();
        tracing::debug!(querier = %querier.base(), query = %query, "Querying alerts");

        let body = querier.query(&query).await.map_err(QueryError::QueryFailed)?;
        let response = QueryResponse::from_body(&body).map_err(QueryError::InvalidResponse)?;

        let count = response.count();
        if count > 0 {
            tracing::warn!(
                count,
                alerts = ?response.alert_names(),
                response = %body,
                "Critical alerts firing"
            );
        }

        Ok(count)
    }
}

/// One-shot check with the given configuration.
pub async fn is_degraded(config: &CheckerConfig) -> DegradationStatus {
    HealthChecker::from_config(config).is_degraded().await
}
