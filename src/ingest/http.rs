// src/ingest/http.rs
use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::config::HttpConfig;
use crate::error::FetchError;

/// Text retrieval for one URL. Every feed and price lookup goes through it.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Retrieve `url` and decode the body as JSON.
pub async fn fetch_json<T: DeserializeOwned>(
    transport: &dyn Transport,
    url: &str,
) -> Result<T, FetchError> {
    let body = transport.get_text(url).await?;
    Ok(serde_json::from_str(&body)?)
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(cfg: &HttpConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("building http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.client.get(url).send().await?.error_for_status()?;
        let body = resp.text().await?;
        tracing::debug!(target: "ingest", url, bytes = body.len(), "fetched");
        Ok(body)
    }
}

// --- Test helper ---

/// Canned reply for one URL in [`StubTransport`].
#[derive(Debug, Clone)]
pub enum StubReply {
    Body(String),
    Status(u16),
    Timeout,
}

/// In-memory transport: URL → canned reply; unknown URLs are unreachable.
/// Records every requested URL in call order.
pub struct StubTransport {
    replies: HashMap<String, StubReply>,
    pub calls: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
            calls: Mutex::new(vec![]),
        }
    }

    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.replies.insert(url.into(), StubReply::Body(body.into()));
        self
    }

    pub fn with_reply(mut self, url: impl Into<String>, reply: StubReply) -> Self {
        self.replies.insert(url.into(), reply);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Default for StubTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(url.to_string());
        }
        match self.replies.get(url) {
            Some(StubReply::Body(b)) => Ok(b.clone()),
            Some(StubReply::Status(code)) => Err(FetchError::Status(*code)),
            Some(StubReply::Timeout) => Err(FetchError::Http("operation timed out".into())),
            None => Err(FetchError::Http(format!("connection refused: {url}"))),
        }
    }
}
