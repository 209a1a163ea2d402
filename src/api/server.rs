use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::handlers;
use crate::api::swap::{self, DexService};
use crate::core::config::SwapConfig;
use crate::core::errors::SwapError;
use crate::i18n::Translator;

/// Shared state behind every handler.
pub struct AppState {
    pub dex: DexService,
    pub translator: Translator,
}

#[derive(Clone)]
pub struct SwapServer {
    pub host: String,
    pub port: u16,
    pub state: Arc<AppState>,
}

impl SwapServer {
    pub fn new(host: String, port: u16, config: &SwapConfig, translator: Translator) -> Result<Self, SwapError> {
        let dex = DexService::from_config(config)?;
        Ok(Self::with_service(host, port, dex, translator))
    }

    /// Server around an already wired service (tests inject stub collaborators here).
    pub fn with_service(host: String, port: u16, dex: DexService, translator: Translator) -> Self {
        Self { host, port, state: Arc::new(AppState { dex, translator }) }
    }

    pub fn create_router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health_check))
            .route("/api/health", get(handlers::health_check))
            .route("/api/swap/order", post(swap::swap_order))
            .route("/api/swap/price", post(swap::swap_price))
            .route("/api/i18n/:key", get(handlers::i18n::translate_key))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }

    pub async fn start(self) -> Result<(), anyhow::Error> {
        let app = self.create_router();
        let addr = format!("{}:{}", self.host, self.port);
        tracing::info!("Server listening on {}", addr);
        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}
