mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::{response::Html, routing::get, Router};
use llm_webscraper::api::routes::create_router;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{app_state, spawn, EchoGenerator, FailingGenerator, SlowGenerator};

async fn post(base: &str, path: &str, body: Value) -> (StatusCode, Value) {
    let res = reqwest::Client::new()
        .post(format!("{}{}", base, path))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

async fn echo_server() -> String {
    spawn(create_router(app_state(Arc::new(EchoGenerator)))).await
}

#[tokio::test]
async fn healthz_reports_ok() {
    let base = echo_server().await;
    let body: Value = reqwest::get(format!("{}/healthz", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["ok"], json!(true));
    assert!(body["time"].is_string());
}

#[tokio::test]
async fn scrape_rejects_blank_url() {
    let base = echo_server().await;
    let (status, body) = post(&base, "/api/scrape", json!({ "url": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Provide a valid 'url' in JSON body." }));
}

#[tokio::test]
async fn scrape_rejects_malformed_json() {
    let base = echo_server().await;
    let res = reqwest::Client::new()
        .post(format!("{}/api/scrape", base))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Provide a valid 'url' in JSON body.");
}

#[tokio::test]
async fn scrape_cleans_a_served_page() {
    let page = Router::new().route(
        "/article",
        get(|| async {
            Html("<html><body><h1>Hello</h1><script>ignored()</script><p>  some   text </p></body></html>")
        }),
    );
    let page_base = spawn(page).await;
    let base = echo_server().await;

    let url = format!("{}/article", page_base);
    let (status, body) = post(&base, "/api/scrape", json!({ "url": url })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cleaned"], "Hello\nsome text");
    assert_eq!(body["url"], json!(url));
    assert!(body["htmlLength"].as_u64().unwrap() > 0);
    assert!(body["bodyLength"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn scrape_reports_unreachable_host_as_bad_gateway() {
    let base = echo_server().await;
    let (status, body) = post(&base, "/api/scrape", json!({ "url": "http://127.0.0.1:1/" })).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().len() > 0);
}

#[tokio::test]
async fn parse_requires_question() {
    let base = echo_server().await;
    let (status, body) = post(&base, "/api/parse", json!({ "domContent": "text" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Provide 'question' and either 'domContent' or 'url'.");
}

#[tokio::test]
async fn parse_requires_some_content() {
    let base = echo_server().await;
    let (status, body) = post(&base, "/api/parse", json!({ "question": "q", "domContent": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No DOM content to parse. Provide 'domContent' or 'url'.");
}

#[tokio::test]
async fn parse_chunks_content_and_joins_answers() {
    let base = echo_server().await;
    let (status, body) = post(
        &base,
        "/api/parse",
        json!({ "question": "q", "domContent": "abcdefghij", "maxChunkChars": 4 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "model": "gemma2:2b",
            "chunks": 3,
            "answer": "gemma2:2b|abcd\ngemma2:2b|efgh\ngemma2:2b|ij"
        })
    );
}

#[tokio::test]
async fn parse_uses_requested_model_and_default_chunk_size() {
    let base = echo_server().await;
    let (status, body) = post(
        &base,
        "/api/parse",
        json!({ "question": "q", "domContent": "page", "model": "llama3.2", "maxChunkChars": -1 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["chunks"], 1);
    assert_eq!(body["answer"], "llama3.2|page");
}

#[tokio::test]
async fn parse_surfaces_generator_failure() {
    let base = spawn(create_router(app_state(Arc::new(FailingGenerator)))).await;
    let (status, body) = post(&base, "/api/parse", json!({ "question": "q", "domContent": "x" })).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "ollama error: model not found");
}

#[tokio::test]
async fn parse_times_out_slow_chunks() {
    let mut state = app_state(Arc::new(SlowGenerator));
    state.chunk_timeout = Duration::from_millis(50);
    let base = spawn(create_router(state)).await;

    let (status, body) = post(&base, "/api/parse", json!({ "question": "q", "domContent": "x" })).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error"], "Ollama request timed out");
}

#[tokio::test]
async fn parse_scrapes_url_when_no_content_is_given() {
    let page = Router::new().route(
        "/faq",
        get(|| async { Html("<html><body><p>  Rust   is fast </p><style>p{}</style></body></html>") }),
    );
    let page_base = spawn(page).await;
    let base = echo_server().await;

    let (status, body) = post(
        &base,
        "/api/parse",
        json!({ "question": "q", "domContent": " ", "url": format!("{}/faq", page_base) }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["chunks"], 1);
    assert_eq!(body["answer"], "gemma2:2b|Rust is fast");
}

#[tokio::test]
async fn parse_reports_scrape_failure_as_bad_gateway() {
    let base = echo_server().await;
    let (status, body) = post(
        &base,
        "/api/parse",
        json!({ "question": "q", "url": "http://127.0.0.1:1/" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Scrape failed: "), "unexpected error: {}", error);
    assert!(error.len() > "Scrape failed: ".len());
}
