//! Route lookup through the `route.openshift.io/v1` API.

use serde::Deserialize;

use crate::cluster::client::ApiClient;
use crate::cluster::error::{ClusterError, ClusterResult};
use crate::config::ClusterConfig;

/// `route.openshift.io/v1.Route`, reduced to the exposed host.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub spec: RouteSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteSpec {
    #[serde(default)]
    pub host: String,
}

/// Client for the route API group.
#[derive(Debug, Clone)]
pub struct RouteClient {
    api: ApiClient,
}

impl RouteClient {
    pub fn new(config: &ClusterConfig) -> ClusterResult<Self> {
        Ok(Self {
            api: ApiClient::new(config)?,
        })
    }

    pub async fn get(&self, namespace: &str, name: &str) -> ClusterResult<Route> {
        self.api
            .get_json(&format!(
                "/apis/route.openshift.io/v1/namespaces/{}/routes/{}",
                namespace, name
            ))
            .await
    }

    /// Host a route is exposed on.
    pub async fn host(&self, namespace: &str, name: &str) -> ClusterResult<String> {
        let route = self.get(namespace, name).await?;
        if route.spec.host.is_empty() {
            return Err(ClusterError::RouteHostMissing {
                namespace: namespace.to_string(),
                name: name.to_string(),
            });
        }
        Ok(route.spec.host)
    }
}
