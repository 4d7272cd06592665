mod catalog;
mod config;
mod eligibility;
mod llm;
mod model;
mod normalizer;
mod parser;
mod prompt;
mod server;
mod service;
mod utils;

use catalog::load_catalog;
use config::{AppConfig, load_config};
use llm::OpenAiClient;
use server::AppState;
use service::{RecommendationService, ServiceSettings};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "config.json";

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        error!("😱 Panic occurred: {}", panic_info);
    }));

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("EXTRASABAQ_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    // Load configuration from file
    let config: AppConfig = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            std::process::exit(1);
        }
    };

    // The catalog is loaded once and never changes while the process runs
    let catalog = match load_catalog(&config.catalog_dir).await {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!("Failed to load catalog: {}", e);
            std::process::exit(1);
        }
    };

    let client = match OpenAiClient::new(&config.llm) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to initialize model client: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        "Model client ready: {} (temperature {}, timeout {:?}s)",
        client.model(),
        config.llm.temperature,
        config.llm.timeout_seconds
    );

    let service = RecommendationService::new(
        catalog.clone(),
        Arc::new(client),
        ServiceSettings::from_config(&config),
    );
    let state = AppState::new(service, catalog).with_cors_origins(config.server.cors_origins.clone());

    let address = format!("{}:{}", config.server.host, config.server.port);
    if let Err(e) = server::serve(&address, state).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
