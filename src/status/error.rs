//! Error definitions for the status check.

use thiserror::Error;

use crate::cluster::ClusterError;
use crate::status::decision::Reason;

/// A step of the alert query that failed.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("creating route client failed: {0}")]
    RouteClient(#[source] ClusterError),

    #[error("creating kube client failed: {0}")]
    KubeClient(#[source] ClusterError),

    #[error(transparent)]
    TokenMissing(ClusterError),

    #[error("creating thanos querier client failed: {0}")]
    QuerierClient(#[source] ClusterError),

    #[error("alert query failed: {0}")]
    QueryFailed(#[source] ClusterError),

    #[error("invalid alert query response: {0}")]
    InvalidResponse(#[source] serde_json::Error),
}

impl QueryError {
    /// Reason code reported for this failure.
    pub fn reason(&self) -> Reason {
        match self {
            QueryError::RouteClient(_) => Reason::OpenShiftRouteClientError,
            QueryError::KubeClient(_) => Reason::KubeConfigError,
            QueryError::TokenMissing(_) => Reason::ServiceAccountTokenMissing,
            QueryError::QuerierClient(_) => Reason::ThanosQuerierClientError,
            QueryError::QueryFailed(_) => Reason::ThanosQuerierQueryFailed,
            QueryError::InvalidResponse(_) => Reason::ThanosQuerierResponseInvalid,
        }
    }
}

/// Why the monitoring stack is reported degraded.
#[derive(Debug, Error)]
pub enum StatusError {
    /// Alert state could not be determined.
    #[error("could not query for alerts firing: {0}")]
    Query(#[source] QueryError),

    /// Critical alerts are firing.
    #[error("alerts around monitoring stack are firing")]
    AlertsFiring { count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_per_step() {
        let not_found = || ClusterError::TokenNotFound {
            namespace: "ns".into(),
            name: "sa".into(),
        };
        assert_eq!(
            QueryError::RouteClient(not_found()).reason(),
            Reason::OpenShiftRouteClientError
        );
        assert_eq!(QueryError::KubeClient(not_found()).reason(), Reason::KubeConfigError);
        assert_eq!(
            QueryError::TokenMissing(not_found()).reason(),
            Reason::ServiceAccountTokenMissing
        );
        assert_eq!(
            QueryError::QuerierClient(not_found()).reason(),
            Reason::ThanosQuerierClientError
        );
        assert_eq!(
            QueryError::QueryFailed(not_found()).reason(),
            Reason::ThanosQuerierQueryFailed
        );
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            QueryError::InvalidResponse(parse).reason(),
            Reason::ThanosQuerierResponseInvalid
        );
    }

    #[test]
    fn test_error_display() {
        let err = StatusError::Query(QueryError::TokenMissing(ClusterError::TokenNotFound {
            namespace: "openshift-monitoring".into(),
            name: "cluster-monitoring-operator".into(),
        }));
        assert_eq!(
            err.to_string(),
            "could not query for alerts firing: cannot find token for openshift-monitoring/cluster-monitoring-operator service account"
        );
        assert_eq!(
            StatusError::AlertsFiring { count: 3 }.to_string(),
            "alerts around monitoring stack are firing"
        );
    }
}
