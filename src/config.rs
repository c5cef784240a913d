use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use crate::error::{AppError, Result};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080";

/// Settings for the companion API server.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub ollama_url: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
        let ollama_url = env::var("OLLAMA_URL").unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string());

        Self::from_parts(&host, &port, &ollama_url)
    }

    pub fn from_parts(host: &str, port: &str, ollama_url: &str) -> Result<Self> {
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;
        let ollama_url = validate_base_url("OLLAMA_URL", ollama_url)?;

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            ollama_url,
        })
    }
}

/// Settings for the terminal client.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub log_file: PathBuf,
}

impl ClientConfig {
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let api_base_url = env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "llm-webscraper.log".to_string());

        Ok(ClientConfig {
            api_base_url: validate_base_url("API_BASE_URL", &api_base_url)?,
            log_file: PathBuf::from(log_file),
        })
    }
}

/// Requires an http(s) scheme and strips trailing slashes.
fn validate_base_url(name: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(AppError::ConfigError(format!("{} must be an http(s) URL, got '{}'", name, value)));
    }
    Ok(value.trim_end_matches('/').to_string())
}
