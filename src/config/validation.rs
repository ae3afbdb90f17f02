//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, interval > 0)
//! - Check that names used to locate cluster objects are non-empty
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: CheckerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::CheckerConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("cluster.api_server '{value}' is not a valid http(s) URL")]
    ApiServer { value: String },

    #[error("monitoring.query_scheme must be \"http\" or \"https\", got '{value}'")]
    QueryScheme { value: String },

    #[error("observability.metrics_address '{value}' is not a socket address")]
    MetricsAddress { value: String },
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &CheckerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.cluster.api_server) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
        _ => errors.push(ValidationError::ApiServer {
            value: config.cluster.api_server.clone(),
        }),
    }

    if config.cluster.timeout_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "cluster.timeout_secs",
        });
    }

    let monitoring = &config.monitoring;
    for (field, value) in [
        ("monitoring.namespace", &monitoring.namespace),
        ("monitoring.service_account", &monitoring.service_account),
        ("monitoring.querier_route", &monitoring.querier_route),
        ("monitoring.severity", &monitoring.severity),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::Empty { field });
        }
    }

    if !matches!(monitoring.query_scheme.as_str(), "http" | "https") {
        errors.push(ValidationError::QueryScheme {
            value: monitoring.query_scheme.clone(),
        });
    }

    if config.watch.interval_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "watch.interval_secs",
        });
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress {
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&CheckerConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = CheckerConfig::default();
        config.cluster.api_server = "not a url".into();
        config.cluster.timeout_secs = 0;
        config.monitoring.namespace = "".into();
        config.monitoring.service_account = "  ".into();
        config.monitoring.query_scheme = "ftp".into();
        config.watch.interval_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 6);
        assert!(errors.contains(&ValidationError::Empty {
            field: "monitoring.namespace"
        }));
        assert!(errors.contains(&ValidationError::Zero {
            field: "watch.interval_secs"
        }));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = CheckerConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::MetricsAddress {
                value: "nowhere".into()
            }]
        );
    }

    #[test]
    fn test_rejects_non_http_api_server() {
        let mut config = CheckerConfig::default();
        config.cluster.api_server = "unix:///var/run/k8s.sock".into();
        assert!(validate_config(&config).is_err());
    }
}
