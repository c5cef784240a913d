use axum::{
    response::{IntoResponse, Response},
    Json,
    http::StatusCode,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

/// Errors raised by the companion API. Every variant renders as `{"error": msg}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Failed to fetch data: {0}")]
    FetchError(String),

    #[error("LLM processing error: {0}")]
    LlmError(String),

    #[error("Error parsing content: {0}")]
    ParseError(String),

    #[error("{0}")]
    Timeout(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::FetchError(_) | AppError::LlmError(_) | AppError::ParseError(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the caller. Upstream failures carry the bare cause.
    pub fn message(&self) -> String {
        match self {
            AppError::BadRequest(msg)
            | AppError::FetchError(msg)
            | AppError::LlmError(msg)
            | AppError::ParseError(msg)
            | AppError::Timeout(msg)
            | AppError::ConfigError(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.message(),
        });

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::FetchError(err.to_string())
    }
}

impl From<std::env::VarError> for AppError {
    fn from(err: std::env::VarError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Failures of the API gateway. The gateway does not classify them further;
/// [`ClientError::user_message`] is all the controller needs.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx status. `body` is kept when it parsed as JSON.
    #[error("Http failure response for {url}: {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: Option<serde_json::Value>,
    },

    #[error("Http failure during parsing for {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl ClientError {
    /// The server-provided `error` string when the body carries one,
    /// otherwise the transport-level message.
    pub fn user_message(&self) -> String {
        if let ClientError::Status { body: Some(body), .. } = self {
            if let Some(msg) = body
                .get("error")
                .and_then(|v| v.as_str())
                .filter(|m| !m.is_empty())
            {
                return msg.to_string();
            }
        }
        self.to_string()
    }
}
