//! QuakeCast — earthquake magnitude prediction service.
//!
//! A visitor submits eleven location/time/seismic readings through an HTML
//! form; the server scales them with statistics fitted at training time,
//! runs a single-timestep recurrent model over them, and renders the
//! predicted magnitude with a severity classification.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                        QUAKECAST                           │
//! ├────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌─────────────┐   ┌────────────────────┐  │
//! │  │  HTTP    │   │  Pipeline   │   │  Model Artifacts   │  │
//! │  │  (Axum)  │──▶│ parse→scale │──▶│  MinMaxScaler +    │  │
//! │  │          │   │ →infer→tier │   │  ONNX session      │  │
//! │  └──────────┘   └─────────────┘   └────────────────────┘  │
//! │        loaded once at startup, immutable thereafter        │
//! └────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod features;
mod handlers;
mod model;
mod pipeline;
mod render;
mod severity;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use model::ModelArtifacts;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quakecast=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("QuakeCast starting...");
    tracing::info!("Model artifact: {}", config.model_path);
    tracing::info!("Scaler artifact: {}", config.scaler_path);

    // Load inference artifacts; failures leave None sentinels and the
    // service starts degraded rather than not at all
    let artifacts = ModelArtifacts::load(&config);
    tracing::info!(
        engine = artifacts.engine(),
        scaler_loaded = artifacts.scaler_loaded(),
        model_loaded = artifacts.predictor_loaded(),
        layout_hash = features::layout::layout_hash(),
        "artifacts ready"
    );

    // Build application state
    let state = AppState {
        artifacts: Arc::new(artifacts),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub artifacts: Arc<ModelArtifacts>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::pages::welcome))
        .route("/input", post(handlers::pages::input))
        .route("/predict", post(handlers::predict::submit))
        .route("/health", get(handlers::health::check))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
