pub mod error;
pub mod handlers;

use crate::catalog::Catalog;
use crate::service::RecommendationService;
use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use handlers::{
    activity_handler, categories_handler, category_activity_handler, category_handler,
    health_handler, recommendations_handler,
};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub service: Arc<RecommendationService>,
    pub cors_origins: Vec<String>,
}

impl AppState {
    pub fn new(service: RecommendationService, catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            service: Arc::new(service),
            cors_origins: Vec::new(),
        }
    }

    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let allowed = origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin '{}'", origin);
                    None
                }
            })
            .collect::<Vec<_>>();
        AllowOrigin::list(allowed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60))
}

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origins);

    Router::new()
        .route("/api/recommendations", post(recommendations_handler))
        .route("/api/categories", get(categories_handler))
        .route("/api/categories/:slug", get(category_handler))
        .route("/api/categories/:slug/:id", get(category_activity_handler))
        .route("/api/activities/:id", get(activity_handler))
        .route("/healthz", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Binds the listener and serves until Ctrl+C or SIGTERM.
pub async fn serve(address: &str, state: AppState) -> std::io::Result<()> {
    let app = create_router(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(address).await?;
    info!("🚀 Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("🛑 Server shut down.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
