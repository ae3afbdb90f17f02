//! Typed Prometheus HTTP API query responses.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Body of `GET /api/v1/query`.
///
/// `data.result` is required: a body without it cannot say whether alerts
/// are firing and is rejected as malformed.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub status: String,

    pub data: QueryData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryData {
    #[serde(rename = "resultType", default)]
    pub result_type: String,

    pub result: Vec<Sample>,
}

/// One series of an instant vector.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sample {
    #[serde(default)]
    pub metric: BTreeMap<String, String>,

    /// `[<unix seconds>, "<value>"]`
    #[serde(default)]
    pub value: Option<(f64, String)>,
}

impl QueryResponse {
    pub fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Number of series in the result.
    pub fn count(&self) -> usize {
        self.data.result.len()
    }

    /// `alertname` labels of the result, in response order.
    pub fn alert_names(&self) -> Vec<&str> {
        self.data
            .result
            .iter()
            .filter_map(|sample| sample.metric.get("alertname").map(String::as_str))
            .collect()
    }
}
