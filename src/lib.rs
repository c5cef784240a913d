pub mod api;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod llm;
pub mod scraper;
pub mod telemetry;
pub mod view;

use std::sync::Arc;
use std::time::Duration;
use llm::TextGenerator;

/// Per-chunk deadline for a generation call.
pub const CHUNK_TIMEOUT: Duration = Duration::from_secs(60);

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn TextGenerator>,
    pub chunk_timeout: Duration,
}

impl AppState {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self {
            llm,
            chunk_timeout: CHUNK_TIMEOUT,
        }
    }
}
