//! Remote configuration parameter retrieval
//!
//! Parameter values live behind a local HTTP endpoint. One request carries
//! the full list of names; the response carries whatever name/value pairs
//! the endpoint knows. Retrieval fails wholesale: a transport failure or a
//! non-success status yields no partial results.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Default local endpoint serving configuration parameters
pub const DEFAULT_CONFIG_ENDPOINT: &str = "http://127.0.0.1:10999";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One retrieved configuration parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub value: String,
}

#[derive(Serialize)]
struct NameEntry<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct ConfigRequest<'a> {
    #[serde(rename = "paramList")]
    param_list: Vec<NameEntry<'a>>,
}

/// Client for the local configuration endpoint
pub struct ConfigClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ConfigClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Fetch the values for `names`.
    ///
    /// Duplicate names are permitted and forwarded in order. The result
    /// contains only the pairs present in the response, in the order the
    /// endpoint returned them; names the endpoint does not know are simply
    /// absent, not errors.
    pub async fn get_configuration(&self, names: &[String]) -> Result<Vec<Param>> {
        let request = ConfigRequest {
            param_list: names.iter().map(|name| NameEntry { name }).collect(),
        };

        debug!("requesting {} parameters from {}", names.len(), self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("configuration endpoint returned {}", status);
            return Err(Error::UpstreamStatus(status));
        }

        let body: Value = response.json().await?;
        Ok(extract_params(&body))
    }
}

/// Pull `{name, value}` pairs out of the response's paramList, in order.
///
/// The endpoint's value types are not fixed; non-string values keep their
/// JSON rendering. Entries without a name or value are skipped. A response
/// without a paramList yields zero pairs, which is still a success.
fn extract_params(body: &Value) -> Vec<Param> {
    let Some(entries) = body.get("paramList").and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let name = entry.get("name")?.as_str()?.to_string();
            let value = match entry.get("value")? {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some(Param { name, value })
        })
        .collect()
}
