//! HTTP client bound to the cluster API server.
//!
//! # Responsibilities
//! - Turn a `ClusterConfig` into a configured reqwest client
//! - Attach bearer auth and trust the configured CA
//! - Fetch JSON resources and map transport failures to `ClusterError`

use std::fs;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use url::Url;

use crate::cluster::error::{ClusterError, ClusterResult};
use crate::config::ClusterConfig;

/// Client for one API server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    /// Build a client from the cluster access configuration.
    pub fn new(config: &ClusterConfig) -> ClusterResult<Self> {
        // Validate up front so every later join works on a known-good base.
        Url::parse(&config.api_server).map_err(|source| ClusterError::InvalidUrl {
            url: config.api_server.clone(),
            source,
        })?;

        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.insecure_skip_tls_verify);

        if let Some(token) = resolve_token(config)? {
            builder = builder.default_headers(bearer_headers(&token)?);
        }

        if let Some(path) = &config.ca_cert_path {
            let pem = fs::read(path).map_err(|source| ClusterError::ReadFile {
                path: path.clone(),
                source,
            })?;
            let cert = reqwest::Certificate::from_pem(&pem).map_err(|source| {
                ClusterError::Certificate {
                    path: path.clone(),
                    source,
                }
            })?;
            builder = builder.add_root_certificate(cert);
        }

        let http = builder.build().map_err(ClusterError::Client)?;

        Ok(Self {
            http,
            base: config.api_server.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL for an API path such as `/api/v1/namespaces`.
    pub fn url(&self, path: &str) -> ClusterResult<Url> {
        let raw = format!("{}{}", self.base, path);
        Url::parse(&raw).map_err(|source| ClusterError::InvalidUrl { url: raw, source })
    }

    /// GET an API path and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClusterResult<T> {
        let url = self.url(path)?;
        let body = get_text(&self.http, url.clone()).await?;
        serde_json::from_str(&body).map_err(|source| ClusterError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Token from the inline value, or from the token file.
fn resolve_token(config: &ClusterConfig) -> ClusterResult<Option<String>> {
    if let Some(token) = config.bearer_token.as_deref().filter(|t| !t.is_empty()) {
        return Ok(Some(token.to_string()));
    }
    match &config.token_file {
        Some(path) => {
            let token = fs::read_to_string(path).map_err(|source| ClusterError::ReadFile {
                path: path.clone(),
                source,
            })?;
            Ok(Some(token.trim().to_string()))
        }
        None => Ok(None),
    }
}

/// Default headers carrying `Authorization: Bearer <token>`.
pub(crate) fn bearer_headers(token: &str) -> ClusterResult<HeaderMap> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| ClusterError::InvalidToken)?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

/// GET a URL and return the body of a successful response.
pub(crate) async fn get_text(http: &reqwest::Client, url: Url) -> ClusterResult<String> {
    tracing::debug!(url = %url, "GET");

    let response = http
        .get(url.clone())
        .send()
        .await
        .map_err(|source| ClusterError::Request {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    let body = response.text().await.map_err(|source| ClusterError::Request {
        url: url.to_string(),
        source,
    })?;

    if !status.is_success() {
        return Err(ClusterError::Status {
            url: url.to_string(),
            status,
            body,
        });
    }

    Ok(body)
}
