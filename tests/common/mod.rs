//! Shared utilities for integration testing: an in-process API server that
//! also plays the Thanos Querier behind the route it advertises.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use monitoring_status::config::CheckerConfig;

pub const SECRETS_PATH: &str = "/api/v1/namespaces/openshift-monitoring/secrets";
pub const ROUTE_PATH: &str =
    "/apis/route.openshift.io/v1/namespaces/openshift-monitoring/routes/thanos-querier";
pub const QUERY_PATH: &str = "/api/v1/query";

pub const ADMIN_TOKEN: &str = "admin-token";
pub const SA_TOKEN: &str = "sa-token";

/// A running mock server and the request heads it has seen.
pub struct MockServer {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockServer {
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Request heads whose path starts with `prefix`.
    pub fn requests_to(&self, prefix: &str) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|head| request_path(head).starts_with(prefix))
            .collect()
    }
}

/// Start a programmable server. The handler receives the request path (with
/// query string) and the server's own address.
pub async fn start_programmable_server<F>(f: F) -> MockServer
where
    F: Fn(&str, SocketAddr) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let seen = requests.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let seen = seen.clone();
                    tokio::spawn(async move {
                        let Some(head) = read_head(&mut socket).await else {
                            return;
                        };
                        let (status, body) = f(request_path(&head), addr);
                        seen.lock().unwrap().push(head);

                        let response = format!(
                            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            status_text(status),
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockServer { addr, requests }
}

async fn read_head(socket: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    String::from_utf8(buf).ok()
}

fn request_path(head: &str) -> &str {
    head.lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("")
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// What the mock cluster answers on each endpoint.
#[derive(Clone)]
pub struct Fixture {
    pub secrets: (u16, String),
    /// `None` advertises the mock server itself as the querier host.
    pub route: Option<(u16, String)>,
    pub query: (u16, String),
}

impl Default for Fixture {
    fn default() -> Self {
        Self {
            secrets: (
                200,
                secret_list(vec![secret("cluster-monitoring-operator-token-abc", SA_TOKEN, false)]),
            ),
            route: None,
            query: (200, alerts(0)),
        }
    }
}

/// Start a mock cluster serving secrets, the querier route and queries.
pub async fn start_cluster(fixture: Fixture) -> MockServer {
    start_programmable_server(move |path, addr| {
        if path.starts_with(SECRETS_PATH) {
            fixture.secrets.clone()
        } else if path.starts_with(ROUTE_PATH) {
            fixture
                .route
                .clone()
                .unwrap_or_else(|| (200, route_to(&addr.to_string())))
        } else if path.starts_with(QUERY_PATH) {
            fixture.query.clone()
        } else {
            (404, r#"{"kind":"Status","reason":"NotFound"}"#.to_string())
        }
    })
    .await
}

/// Checker configuration pointing at a mock cluster over plain HTTP.
pub fn config_for(addr: SocketAddr) -> CheckerConfig {
    let mut config = CheckerConfig::default();
    config.cluster.api_server = format!("http://{}", addr);
    config.cluster.bearer_token = Some(ADMIN_TOKEN.to_string());
    config.cluster.timeout_secs = 5;
    config.monitoring.query_scheme = "http".to_string();
    config
}

pub fn secret(name: &str, token: &str, registry: bool) -> Value {
    let mut metadata = json!({ "name": name, "namespace": "openshift-monitoring" });
    if registry {
        metadata["annotations"] = json!({
            "openshift.io/create-dockercfg-secrets": format!("{}-dockercfg", name)
        });
    }
    json!({
        "metadata": metadata,
        "type": "kubernetes.io/service-account-token",
        "data": { "token": STANDARD.encode(token) }
    })
}

pub fn secret_list(items: Vec<Value>) -> String {
    json!({ "kind": "SecretList", "apiVersion": "v1", "items": items }).to_string()
}

pub fn route_to(host: &str) -> String {
    json!({ "kind": "Route", "metadata": { "name": "thanos-querier" }, "spec": { "host": host } })
        .to_string()
}

/// Query response with `count` firing critical alerts.
pub fn alerts(count: usize) -> String {
    let result: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "metric": {
                    "__name__": "ALERTS",
                    "alertname": format!("CriticalAlert{}", i),
                    "alertstate": "firing",
                    "namespace": "openshift-monitoring",
                    "severity": "critical"
                },
                "value": [1700000000.0, "1"]
            })
        })
        .collect();
    json!({ "status": "success", "data": { "resultType": "vector", "result": result } }).to_string()
}
