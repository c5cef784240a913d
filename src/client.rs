//! HTTP gateway to the scrape/parse API.
//!
//! Both calls are plain pass-throughs: one POST each, no retries, no timeout,
//! and the JSON body is handed back untouched for the caller to interpret.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::api::models::{ParseRequest, ScrapeRequest};
use crate::error::ClientError;

pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ApiGateway: Send + Sync + 'static {
    async fn scrape(&self, url: String) -> ClientResult<Value>;

    async fn parse(
        &self,
        question: String,
        dom_content: Option<String>,
        url: Option<String>,
        model: Option<String>,
    ) -> ClientResult<Value>;
}

pub struct ApiClient {
    client: Client,
    scrape_url: String,
    parse_url: String,
}

impl ApiClient {
    /// `base_url` is the API origin, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            client: Client::new(),
            scrape_url: format!("{}/api/scrape", base),
            parse_url: format!("{}/api/parse", base),
        }
    }

    async fn post_json<B: serde::Serialize + ?Sized>(&self, url: &str, body: &B) -> ClientResult<Value> {
        debug!("POST {}", url);
        let res = self.client.post(url).json(body).send().await?;

        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status,
                body: serde_json::from_str(&text).ok(),
            });
        }

        serde_json::from_str(&text).map_err(|e| ClientError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl ApiGateway for ApiClient {
    async fn scrape(&self, url: String) -> ClientResult<Value> {
        self.post_json(&self.scrape_url, &ScrapeRequest { url }).await
    }

    async fn parse(
        &self,
        question: String,
        dom_content: Option<String>,
        url: Option<String>,
        model: Option<String>,
    ) -> ClientResult<Value> {
        let body = ParseRequest {
            question,
            dom_content,
            url,
            model,
            max_chunk_chars: None,
        };
        self.post_json(&self.parse_url, &body).await
    }
}
