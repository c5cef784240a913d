use std::sync::Arc;
use tokio::net::TcpListener;
use llm_webscraper::{
    config::Config,
    api::routes::create_router,
    llm::OllamaClient,
    telemetry,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_stdout();

    // Load configuration
    let config = Config::load()?;
    let server_addr = config.server_addr;
    tracing::info!(ollama = %config.ollama_url, "starting server on {}", server_addr);

    let ollama = OllamaClient::new(&config.ollama_url)?;
    let app_state = AppState::new(Arc::new(ollama));

    // Build the router with routes
    let app = create_router(app_state);

    // Create the listener
    let listener = TcpListener::bind(server_addr).await?;

    // Start the server
    tracing::info!("listening on {}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
