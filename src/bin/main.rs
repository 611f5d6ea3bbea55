use rtrwh_advisor::{
    api::start_server, config::Config, controller::ReportController, gemini::GeminiClient,
};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    // Fail fast: no credential, no server.
    let config = Config::from_env().map_err(|e| {
        error!("Startup aborted: {}", e);
        e
    })?;

    info!("RTRWH Advisor - starting on port {}", config.port);

    let client = Arc::new(GeminiClient::new(config.gemini_api_key.clone()));
    let controller = Arc::new(ReportController::new(client));

    start_server(controller, config.port).await?;

    Ok(())
}
