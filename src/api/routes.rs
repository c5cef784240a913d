use axum::{
    routing::{get, post},
    Router,
    extract::{rejection::JsonRejection, Json, State},
};
use tower_http::cors::{CorsLayer, Any};
use chrono::Utc;
use std::time::Instant;
use tracing::{info, warn};

use crate::error::{Result, AppError};
use crate::api::models::{
    HealthResponse, Model, ParseRequest, ParseResponse, ScrapeRequest, ScrapeResponse,
};
use crate::llm::build_prompt;
use crate::scraper::{chunk_string, scrape_and_clean};
use crate::AppState;

pub const DEFAULT_MAX_CHUNK_CHARS: usize = 100_000;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/api/scrape", post(scrape_handler))
        .route("/api/parse", post(parse_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        time: Utc::now(),
    })
}

async fn scrape_handler(
    payload: std::result::Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Json<ScrapeResponse>> {
    let req = match payload {
        Ok(Json(req)) if !req.url.trim().is_empty() => req,
        _ => {
            return Err(AppError::BadRequest(
                "Provide a valid 'url' in JSON body.".to_string(),
            ))
        }
    };

    info!(url = %req.url, "processing scrape request");
    let start_time = Instant::now();

    let page = scrape_and_clean(&req.url).await.inspect_err(|err| {
        warn!(url = %req.url, error = %err, "scrape failed");
    })?;

    info!(
        url = %req.url,
        elapsed = ?start_time.elapsed(),
        cleaned_chars = page.cleaned.len(),
        "scrape finished"
    );
    Ok(Json(ScrapeResponse {
        url: req.url,
        html_length: page.html_length,
        body_length: page.body_length,
        cleaned: page.cleaned,
    }))
}

async fn parse_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ParseRequest>, JsonRejection>,
) -> Result<Json<ParseResponse>> {
    let req = match payload {
        Ok(Json(req)) if !req.question.trim().is_empty() => req,
        _ => {
            return Err(AppError::BadRequest(
                "Provide 'question' and either 'domContent' or 'url'.".to_string(),
            ))
        }
    };

    // Step 1: page content, scraping the url only when none was supplied
    let mut content = req.dom_content.as_deref().unwrap_or_default().trim().to_string();
    if content.is_empty() {
        if let Some(url) = req.url.as_deref().filter(|u| !u.trim().is_empty()) {
            let page = scrape_and_clean(url)
                .await
                .map_err(|e| AppError::FetchError(format!("Scrape failed: {}", e.message())))?;
            content = page.cleaned;
        }
    }

    if content.is_empty() {
        return Err(AppError::BadRequest(
            "No DOM content to parse. Provide 'domContent' or 'url'.".to_string(),
        ));
    }

    // Step 2: chunk
    let max_chars = match req.max_chunk_chars {
        Some(n) if n > 0 => n as usize,
        _ => DEFAULT_MAX_CHUNK_CHARS,
    };
    let chunks = chunk_string(&content, max_chars);
    let model = req
        .model
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(Model::default().as_str())
        .to_string();

    info!(chunks = chunks.len(), model = %model, "parse started");

    // Step 3: one generation per chunk, in order
    let mut answers = Vec::with_capacity(chunks.len());
    for (i, chunk) in chunks.iter().enumerate() {
        let prompt = build_prompt(chunk, &req.question);
        info!(chunk = i + 1, of = chunks.len(), len = chunk.len(), "sending chunk");

        let reply = tokio::time::timeout(state.chunk_timeout, state.llm.generate(&model, &prompt))
            .await
            .map_err(|_| AppError::Timeout("Ollama request timed out".to_string()))?
            .map_err(|e| AppError::LlmError(e.to_string()))?;

        answers.push(reply);
    }

    Ok(Json(ParseResponse {
        model,
        chunks: chunks.len(),
        answer: answers.join("\n"),
    }))
}
