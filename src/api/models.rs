use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Backend language models a parse request can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Model {
    #[default]
    #[serde(rename = "gemma2:2b")]
    Gemma2_2b,
    #[serde(rename = "gemma3:12b")]
    Gemma3_12b,
    #[serde(rename = "llama3.2")]
    Llama3_2,
}

impl Model {
    pub const ALL: [Model; 3] = [Model::Gemma2_2b, Model::Gemma3_12b, Model::Llama3_2];

    pub fn as_str(&self) -> &'static str {
        match self {
            Model::Gemma2_2b => "gemma2:2b",
            Model::Gemma3_12b => "gemma3:12b",
            Model::Llama3_2 => "llama3.2",
        }
    }

    pub fn next(self) -> Model {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Model {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Model {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| format!("unknown model '{}'", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResponse {
    pub url: String,
    pub html_length: usize,
    pub body_length: usize,
    pub cleaned: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dom_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_chunk_chars: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResponse {
    pub model: String,
    pub chunks: usize,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub time: chrono::DateTime<chrono::Utc>,
}
