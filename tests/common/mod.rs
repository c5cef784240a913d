#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use llm_webscraper::{
    llm::{OllamaError, TextGenerator},
    AppState,
};
use tokio::net::TcpListener;

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Replies with `model|chunk`, where chunk is the content line of the prompt.
pub struct EchoGenerator;

#[async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, OllamaError> {
        let chunk = prompt.lines().nth(2).unwrap_or_default();
        Ok(format!("{}|{}", model, chunk))
    }
}

pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _model: &str, _prompt: &str) -> Result<String, OllamaError> {
        Err(OllamaError::Upstream("model not found".to_string()))
    }
}

pub struct SlowGenerator;

#[async_trait]
impl TextGenerator for SlowGenerator {
    async fn generate(&self, _model: &str, _prompt: &str) -> Result<String, OllamaError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok("too late".to_string())
    }
}

pub fn app_state(llm: Arc<dyn TextGenerator>) -> AppState {
    AppState::new(llm)
}
