//! The prediction pipeline.
//!
//! One entry point, `predict_magnitude`, runs the whole chain: parse the
//! raw form fields, check that both artifacts are loaded, scale, infer,
//! classify. Stages are strictly ordered and the first failure wins, so a
//! request with a bad field never touches the model and a request against
//! an unloaded model never fabricates a magnitude.

use std::fmt;
use std::time::Instant;

use serde::Serialize;

use crate::features::{
    parse_observation, FeatureVector, MissingFieldPolicy, ParseError, RawObservation,
};
use crate::model::{InferenceError, ModelArtifacts};
use crate::severity::SeverityTier;

// ============================================================================
// TYPES
// ============================================================================

/// Which artifact slot a `ModelUnavailable` error is talking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Scaler,
    Model,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Scaler => write!(f, "scaler"),
            ArtifactKind::Model => write!(f, "model"),
        }
    }
}

/// One finished prediction, ready for rendering.
///
/// Deliberately holds no timing data: two identical observations against
/// the same artifacts produce equal outcomes. Latency goes to the logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionOutcome {
    pub magnitude: f32,
    pub tier: SeverityTier,
    pub inputs: FeatureVector,
    pub engine: &'static str,
}

impl PredictionOutcome {
    /// Magnitude rounded to two decimals for display.
    pub fn magnitude_display(&self) -> String {
        format!("{:.2}", self.magnitude)
    }
}

/// Everything that can go wrong between a raw form and an outcome.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("the {0} artifact is not loaded; predictions are disabled")]
    ModelUnavailable(ArtifactKind),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Run the full pipeline for one observation.
pub fn predict_magnitude(
    raw: &RawObservation,
    artifacts: &ModelArtifacts,
    policy: MissingFieldPolicy,
) -> Result<PredictionOutcome, PredictError> {
    let inputs = parse_observation(raw, policy)?;

    // Both artifacts must be present before any inference is attempted.
    let scaler = artifacts
        .scaler()
        .ok_or(PredictError::ModelUnavailable(ArtifactKind::Scaler))?;
    let predictor = artifacts
        .predictor()
        .ok_or(PredictError::ModelUnavailable(ArtifactKind::Model))?;

    let started = Instant::now();
    let scaled = scaler.transform(&inputs);
    let magnitude = predictor.predict(&scaled)?;
    let tier = SeverityTier::classify(magnitude);

    tracing::debug!(
        magnitude,
        tier = %tier,
        level = tier.severity_level(),
        engine = predictor.engine(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "prediction complete"
    );

    Ok(PredictionOutcome {
        magnitude,
        tier,
        inputs,
        engine: predictor.engine(),
    })
}

// ============================================================================
// TESTS
// ============================================================================
