use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use reqwest::Client;
use tracing::{debug, instrument};

#[derive(Debug, thiserror::Error)]
pub enum OllamaError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("ollama error: {0}")]
    Upstream(String),

    #[error("ollama returned empty response")]
    Empty,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: String,
}

/// Anything that can turn a prompt into text for a given model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, OllamaError>;
}

/// Client for a local Ollama instance's `/api/generate`.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    url_generate: String,
}

impl OllamaClient {
    pub fn new(base_url: &str) -> Result<Self, OllamaError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        Ok(Self {
            client,
            url_generate: format!("{}/api/generate", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    /// Streams a completion and returns the concatenated text.
    #[instrument(skip_all, fields(model = %model, prompt_len = prompt.len()))]
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, OllamaError> {
        let body = GenerateRequest {
            model,
            prompt,
            stream: true,
        };

        debug!("POST {}", self.url_generate);
        let res = self.client.post(&self.url_generate).json(&body).send().await?;

        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(OllamaError::Upstream(text));
        }

        let text = res.text().await?;
        let response = concat_ndjson(&text);
        if response.is_empty() {
            return Err(OllamaError::Empty);
        }

        Ok(response)
    }
}

/// Joins the `response` field of every decodable NDJSON line.
pub fn concat_ndjson(body: &str) -> String {
    body.lines()
        .filter_map(|line| serde_json::from_str::<GenerateChunk>(line).ok())
        .map(|chunk| chunk.response)
        .collect()
}

pub fn build_prompt(content: &str, question: &str) -> String {
    format!(
        "Extract information from the following content:\n\n{}\n\nQuestion: {}",
        content, question
    )
}
