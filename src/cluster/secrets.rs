//! Service account token lookup.
//!
//! Tokens live in secrets named `<service-account>-token-<suffix>`. Each
//! service account also owns a token secret minted for the internal image
//! registry; that one carries the dockercfg annotation and is skipped.
//!
//! When several secrets qualify the first one in the order returned by the
//! API server wins. That order is not guaranteed to be stable.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;

use crate::cluster::client::ApiClient;
use crate::cluster::error::{ClusterError, ClusterResult};
use crate::config::ClusterConfig;

/// Annotation marking the token secret used for the internal registry.
pub const DOCKERCFG_ANNOTATION: &str = "openshift.io/create-dockercfg-secrets";

/// Data key holding the token in a service account token secret.
pub const TOKEN_KEY: &str = "token";

/// `v1.SecretList`, reduced to what the lookup reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretList {
    #[serde(default)]
    pub items: Vec<Secret>,
}

/// `v1.Secret`, reduced to what the lookup reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Secret {
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Values are base64 encoded on the wire.
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

impl Secret {
    /// Whether this secret is the registry token secret.
    pub fn is_registry_token(&self) -> bool {
        self.metadata.annotations.contains_key(DOCKERCFG_ANNOTATION)
    }

    /// Whether this secret's name marks it as a token of `service_account`.
    pub fn is_token_of(&self, service_account: &str) -> bool {
        self.metadata
            .name
            .contains(&format!("{}-token-", service_account))
    }

    /// Decoded value of the `token` data key. A missing key yields an empty
    /// token.
    pub fn token(&self, namespace: &str) -> ClusterResult<String> {
        let Some(encoded) = self.data.get(TOKEN_KEY) else {
            return Ok(String::new());
        };
        let malformed = |reason: String| ClusterError::TokenMalformed {
            namespace: namespace.to_string(),
            secret: self.metadata.name.clone(),
            reason,
        };
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| malformed(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| malformed(e.to_string()))
    }
}

/// First secret that is a token of `service_account` and not the registry
/// token, in enumeration order.
pub fn select_token_secret<'a>(secrets: &'a [Secret], service_account: &str) -> Option<&'a Secret> {
    secrets
        .iter()
        .find(|secret| secret.is_token_of(service_account) && !secret.is_registry_token())
}

/// Core API client for secrets.
#[derive(Debug, Clone)]
pub struct KubeClient {
    api: ApiClient,
}

impl KubeClient {
    pub fn new(config: &ClusterConfig) -> ClusterResult<Self> {
        Ok(Self {
            api: ApiClient::new(config)?,
        })
    }

    /// List the secrets of a namespace, in API server order.
    pub async fn list_secrets(&self, namespace: &str) -> ClusterResult<Vec<Secret>> {
        let list: SecretList = self
            .api
            .get_json(&format!("/api/v1/namespaces/{}/secrets", namespace))
            .await?;
        Ok(list.items)
    }

    /// Token of `service_account` in `namespace`.
    pub async fn service_account_token(
        &self,
        namespace: &str,
        service_account: &str,
    ) -> ClusterResult<String> {
        let secrets = self.list_secrets(namespace).await?;

        let secret = select_token_secret(&secrets, service_account).ok_or_else(|| {
            ClusterError::TokenNotFound {
                namespace: namespace.to_string(),
                name: service_account.to_string(),
            }
        })?;

        tracing::debug!(
            namespace = %namespace,
            secret = %secret.metadata.name,
            "Found service account token secret"
        );

        secret.token(namespace)
    }
}
