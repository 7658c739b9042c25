use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use anyhow::{anyhow, Context};

/// Thin HTTP client for the Support Desk API; returns the `data` payload
pub struct DeskClient {
    http: reqwest::Client,
    base: url::Url,
}

impl DeskClient {
    pub fn new(server: &str) -> anyhow::Result<Self> {
        let base = url::Url::parse(server).with_context(|| format!("invalid server URL '{}'", server))?;
        if base.cannot_be_a_base() {
            return Err(anyhow!("invalid server URL '{}'", server));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self { http, base })
    }

    /// Base URL plus percent-encoded path segments
    pub fn url(&self, segments: &[&str]) -> anyhow::Result<url::Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("server URL cannot take a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get(&self, segments: &[&str], region: Option<&str>) -> anyhow::Result<Value> {
        let mut url = self.url(segments)?;
        if let Some(region) = region {
            url.query_pairs_mut().append_pair("region", region);
        }
        let response = self.http.get(url).send().await?;
        Self::unwrap_envelope(response).await
    }

    pub async fn post<B: Serialize>(&self, segments: &[&str], body: &B) -> anyhow::Result<Value> {
        let url = self.url(segments)?;
        let response = self.http.post(url).json(body).send().await?;
        Self::unwrap_envelope(response).await
    }

    /// `{"success": true, "data"}` -> data; anything else -> error with the
    /// server's message
    async fn unwrap_envelope(response: reqwest::Response) -> anyhow::Result<Value> {
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .with_context(|| format!("server returned {} with a non-JSON body", status))?;

        if status.is_success() && body.get("success").and_then(Value::as_bool) == Some(true) {
            return Ok(body.get("data").cloned().unwrap_or(Value::Null));
        }

        let message = body
            .get("message")
            .or_else(|| body.get("error"))
            .and_then(Value::as_str)
            .unwrap_or("request failed");
        Err(anyhow!("{} ({})", message, status))
    }
}
