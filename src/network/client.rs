//! HTTP client wrapper - the REST calls of the counter API

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;

use crate::constants::MAX_BODY_PREVIEW;
use crate::models::{
    CountAction, CountIncrementResponse, CountOutcome, CountResponse, HistoryItem, HistoryResponse,
};

/// Client for the counter API rooted at `base_url`
#[derive(Clone, Debug)]
pub struct CounterClient {
    http: reqwest::Client,
    base_url: String,
}

impl CounterClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url: String = base_url.into();
        CounterClient {
            http: create_client(timeout),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /count`
    pub async fn fetch_count(&self) -> Result<i64> {
        let resp = self.http.get(self.url("/count")).send().await;
        let body: CountResponse = decode(resp).await?;
        Ok(body.count)
    }

    /// Run one of the mutating calls and return the new count
    pub async fn apply(&self, action: CountAction) -> Result<CountOutcome> {
        let mut req = self
            .http
            .post(self.url(action.path()))
            .header("Content-Type", "application/json");
        if let Some(body) = action.body() {
            req = req.json(&body);
        }

        let resp = req.send().await;
        match action {
            CountAction::Increment => {
                let body: CountIncrementResponse = decode(resp).await?;
                Ok(CountOutcome {
                    count: body.count,
                    message: body.message,
                })
            }
            _ => {
                let body: CountResponse = decode(resp).await?;
                Ok(CountOutcome {
                    count: body.count,
                    message: None,
                })
            }
        }
    }

    /// `GET /count/history`, newest first
    pub async fn fetch_history(&self) -> Result<Vec<HistoryItem>> {
        let resp = self.http.get(self.url("/count/history")).send().await;
        let body: HistoryResponse = decode(resp).await?;
        Ok(body.history)
    }
}

async fn decode<T: DeserializeOwned>(result: reqwest::Result<reqwest::Response>) -> Result<T> {
    let resp = match result {
        Ok(resp) => resp,
        Err(e) if e.is_timeout() => bail!("Request timed out"),
        Err(e) if e.is_connect() => bail!("Connection failed: {}", e),
        Err(e) => bail!("Request failed: {}", e),
    };

    let status = resp.status();
    if !status.is_success() {
        bail!("Server answered {}", status);
    }

    let body = resp.text().await.context("Error reading body")?;
    serde_json::from_str(&body).with_context(|| format!("Unexpected response: {}", preview(&body)))
}

/// First `MAX_BODY_PREVIEW` characters of a body, marked when cut
fn preview(body: &str) -> String {
    match body.char_indices().nth(MAX_BODY_PREVIEW) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}

/// Create an HTTP client with default configuration
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
