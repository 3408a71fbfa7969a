//! Prediction submission handler

use std::time::Duration;

use axum::extract::State;
use axum::response::Html;
use axum::Form;
use uuid::Uuid;

use crate::features::RawObservation;
use crate::{pipeline, render, AppError, AppResult, AppState};

/// Run one observation through the pipeline and render the result.
///
/// Inference is synchronous CPU work, so it runs on the blocking pool with
/// a deadline around it. A request that blows the deadline answers 504 and
/// is not retried; the loaded artifacts are untouched either way.
pub async fn submit(
    State(state): State<AppState>,
    Form(raw): Form<RawObservation>,
) -> AppResult<Html<String>> {
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, "prediction requested");

    let artifacts = state.artifacts.clone();
    let policy = state.config.missing_field_policy;
    let deadline = Duration::from_millis(state.config.inference_timeout_ms);

    let joined = tokio::time::timeout(
        deadline,
        tokio::task::spawn_blocking(move || {
            pipeline::predict_magnitude(&raw, &artifacts, policy)
        }),
    )
    .await;

    let outcome = match joined {
        Err(_) => {
            return Err(AppError::InferenceTimeout {
                elapsed_ms: deadline.as_millis() as u64,
            })
        }
        Ok(Err(join_err)) => return Err(AppError::InferenceFailed(join_err.to_string())),
        Ok(Ok(result)) => result?,
    };

    tracing::info!(
        %request_id,
        magnitude = outcome.magnitude,
        tier = %outcome.tier,
        engine = outcome.engine,
        "prediction served"
    );
    Ok(Html(render::result_page(&outcome)))
}
