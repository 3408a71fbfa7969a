//! Health check handler

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::features::layout::LayoutInfo;
use crate::model::ArtifactInfo;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    scaler_loaded: bool,
    model_loaded: bool,
    engine: &'static str,
    layout: LayoutInfo,
    scaler: Option<ArtifactInfo>,
    model: Option<ArtifactInfo>,
}

/// Report whether the service can actually predict.
///
/// `healthy` means both artifacts are loaded; `degraded` means the process
/// is up but predictions will answer 503.
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let artifacts = &state.artifacts;
    let ready = artifacts.scaler_loaded() && artifacts.predictor_loaded();

    Json(HealthResponse {
        status: if ready { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        scaler_loaded: artifacts.scaler_loaded(),
        model_loaded: artifacts.predictor_loaded(),
        engine: artifacts.engine(),
        layout: LayoutInfo::current(),
        scaler: artifacts.scaler_info().cloned(),
        model: artifacts.predictor_info().cloned(),
    })
}
