use std::sync::Arc;
use llm_webscraper::{
    client::ApiClient,
    config::ClientConfig,
    controller::ScraperController,
    telemetry,
    view::{self, AlertQueue},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = ClientConfig::load()?;
    telemetry::init_file(&config.log_file)?;
    tracing::info!(api = %config.api_base_url, "starting client");

    let alerts = Arc::new(AlertQueue::default());
    let controller = ScraperController::new(
        Arc::new(ApiClient::new(&config.api_base_url)),
        alerts.clone(),
    );

    view::run(controller, alerts).await?;

    Ok(())
}
