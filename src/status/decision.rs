//! Degradation decision.
//!
//! # States
//! - Healthy: no critical alerts firing, reason empty, no error
//! - Degraded: alerts firing, or alert state could not be determined
//!
//! # Transitions
//! ```text
//! query failed          → Degraded(reason of the failed step)
//! alert count > 0       → Degraded(AlertsFiring)
//! otherwise             → Healthy
//! ```
//!
//! Reason and error are only reachable through `DegradationStatus::degraded`,
//! so an empty reason always means healthy.

use std::fmt;

use serde::Serialize;

use crate::status::error::{QueryError, StatusError};

/// Machine-readable reason for a degraded status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Reason {
    AlertsFiring,
    OpenShiftRouteClientError,
    KubeConfigError,
    ServiceAccountTokenMissing,
    ThanosQuerierClientError,
    ThanosQuerierQueryFailed,
    ThanosQuerierResponseInvalid,
}

impl Reason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Reason::AlertsFiring => "AlertsFiring",
            Reason::OpenShiftRouteClientError => "OpenShiftRouteClientError",
            Reason::KubeConfigError => "KubeConfigError",
            Reason::ServiceAccountTokenMissing => "ServiceAccountTokenMissing",
            Reason::ThanosQuerierClientError => "ThanosQuerierClientError",
            Reason::ThanosQuerierQueryFailed => "ThanosQuerierQueryFailed",
            Reason::ThanosQuerierResponseInvalid => "ThanosQuerierResponseInvalid",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one status check.
#[derive(Debug)]
pub struct DegradationStatus {
    degraded: Option<(Reason, StatusError)>,
}

impl DegradationStatus {
    pub fn healthy() -> Self {
        Self { degraded: None }
    }

    pub fn degraded(reason: Reason, error: StatusError) -> Self {
        Self {
            degraded: Some((reason, error)),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }

    pub fn reason(&self) -> Option<Reason> {
        self.degraded.as_ref().map(|(reason, _)| *reason)
    }

    /// Reason as reported to operators; empty when healthy.
    pub fn reason_code(&self) -> &'static str {
        self.reason().map(Reason::as_str).unwrap_or("")
    }

    pub fn error(&self) -> Option<&StatusError> {
        self.degraded.as_ref().map(|(_, error)| error)
    }

    /// `(is_degraded, reason_code, error)`
    pub fn into_parts(self) -> (bool, &'static str, Option<StatusError>) {
        match self.degraded {
            Some((reason, error)) => (true, reason.as_str(), Some(error)),
            None => (false, "", None),
        }
    }

    /// Serializable summary for CLI output.
    pub fn report(&self) -> StatusReport {
        StatusReport {
            degraded: self.is_degraded(),
            reason: self.reason_code(),
            error: self.error().map(ToString::to_string),
        }
    }
}

/// Flat, serializable view of a `DegradationStatus`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub degraded: bool,
    pub reason: &'static str,
    pub error: Option<String>,
}

/// Reduce the outcome of the alert query to a status.
pub fn decide(firing: Result<usize, QueryError>) -> DegradationStatus {
    match firing {
        Err(error) => DegradationStatus::degraded(error.reason(), StatusError::Query(error)),
        Ok(count) if count > 0 => {
            DegradationStatus::degraded(Reason::AlertsFiring, StatusError::AlertsFiring { count })
        }
        Ok(_) => DegradationStatus::healthy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::ClusterError;

    #[test]
    fn test_no_alerts_is_healthy() {
        let (degraded, reason, error) = decide(Ok(0)).into_parts();
        assert!(!degraded);
        assert_eq!(reason, "");
        assert!(error.is_none());
    }

    #[test]
    fn test_any_positive_count_is_degraded() {
        for count in [1, 2, 17, usize::MAX] {
            let status = decide(Ok(count));
            assert!(status.is_degraded());
            assert_eq!(status.reason(), Some(Reason::AlertsFiring));
            assert!(matches!(
                status.error(),
                Some(StatusError::AlertsFiring { count: c }) if *c == count
            ));
        }
    }

    #[test]
    fn test_query_error_is_degraded_with_step_reason() {
        let status = decide(Err(QueryError::TokenMissing(ClusterError::TokenNotFound {
            namespace: "openshift-monitoring".into(),
            name: "cluster-monitoring-operator".into(),
        })));
        assert!(status.is_degraded());
        assert_eq!(status.reason_code(), "ServiceAccountTokenMissing");
        assert!(matches!(status.error(), Some(StatusError::Query(_))));
    }

    #[test]
    fn test_empty_reason_only_when_healthy() {
        let parse = serde_json::from_str::<serde_json::Value>("").unwrap_err();
        let statuses = [
            decide(Ok(0)),
            decide(Ok(3)),
            decide(Err(QueryError::InvalidResponse(parse))),
        ];
        for status in statuses {
            assert_eq!(
                status.reason_code().is_empty(),
                !status.is_degraded() && status.error().is_none()
            );
        }
    }

    #[test]
    fn test_report_serializes() {
        let report = decide(Ok(1)).report();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["degraded"], true);
        assert_eq!(json["reason"], "AlertsFiring");
        assert_eq!(json["error"], "alerts around monitoring stack are firing");

        let json = serde_json::to_value(decide(Ok(0)).report()).unwrap();
        assert_eq!(json["reason"], "");
        assert!(json["error"].is_null());
    }
}
