//! Opaque magnitude predictor.
//!
//! The trained model is reached only through [`MagnitudePredictor`], so the
//! pipeline can run against a deterministic stub in tests and the ONNX
//! runtime stays swappable.

use ndarray::Array3;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use crate::features::{ScaledVector, FEATURE_COUNT};

// ============================================================================
// ERROR
// ============================================================================

/// The predictor rejected or failed an invocation. Never retried; the
/// underlying runtime message rides along for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("inference failed: {0}")]
pub struct InferenceError(pub String);

// ============================================================================
// PREDICTOR CAPABILITY
// ============================================================================

/// Capability interface for the trained regression model.
pub trait MagnitudePredictor: Send + Sync {
    /// Predict a magnitude from one scaled observation.
    fn predict(&self, scaled: &ScaledVector) -> Result<f32, InferenceError>;

    /// Short engine name for logs and the health report.
    fn engine(&self) -> &'static str;
}

// ============================================================================
// INPUT SHAPE
// ============================================================================

/// Pack a scaled vector into the rank-3 tensor the recurrent model expects:
/// batch 1, a single timestep, [`FEATURE_COUNT`] features. The model was
/// trained on single-timestep sequences; any other shape is rejected by the
/// runtime.
pub(crate) fn to_model_input(scaled: &ScaledVector) -> Array3<f32> {
    Array3::from_shape_fn((1, 1, FEATURE_COUNT), |(_, _, i)| scaled.0[i])
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

/// ONNX Runtime session wrapper.
///
/// `Session::run` needs exclusive access, so the session sits behind a
/// mutex: one inference slot, requests queue on it. Inference itself is a
/// pure function of the loaded artifact and the input.
pub struct OnnxPredictor {
    session: Mutex<Session>,
}

impl OnnxPredictor {
    /// Load a model from disk.
    pub fn load(path: &str) -> Result<Self, InferenceError> {
        if !std::path::Path::new(path).exists() {
            return Err(InferenceError(format!("model not found: {path}")));
        }

        let session = Session::builder()
            .map_err(|e| InferenceError(format!("session builder: {e}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError(format!("optimization level: {e}")))?
            .commit_from_file(path)
            .map_err(|e| InferenceError(format!("load model: {e}")))?;

        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

impl MagnitudePredictor for OnnxPredictor {
    fn predict(&self, scaled: &ScaledVector) -> Result<f32, InferenceError> {
        let mut session = self.session.lock();

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| InferenceError("model declares no outputs".to_string()))?;

        let input_tensor = Value::from_array(to_model_input(scaled))
            .map_err(|e| InferenceError(format!("input tensor: {e}")))?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError(format!("session run: {e}")))?;

        let output = outputs
            .get(&output_name)
            .ok_or_else(|| InferenceError(format!("output `{output_name}` missing")))?;

        let (_shape, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError(format!("extract output: {e}")))?;

        // Single-sample batch: the first scalar is the magnitude.
        data.first()
            .copied()
            .ok_or_else(|| InferenceError("model returned an empty output".to_string()))
    }

    fn engine(&self) -> &'static str {
        "onnx"
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_input_is_rank_three_single_timestep() {
        let mut values = [0.0f32; FEATURE_COUNT];
        for (i, v) in values.iter_mut().enumerate() {
            *v = i as f32 / 10.0;
        }
        let input = to_model_input(&ScaledVector(values));

        assert_eq!(input.shape(), &[1, 1, FEATURE_COUNT]);
        assert_eq!(input[[0, 0, 0]], 0.0);
        assert_eq!(input[[0, 0, 4]], 0.4);
        assert_eq!(input[[0, 0, 10]], 1.0);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = OnnxPredictor::load("no/such/model.onnx").unwrap_err();
        assert!(err.to_string().contains("model not found"));
    }
}
