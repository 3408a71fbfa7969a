//! Fitted min-max scaler.
//!
//! The scaler's statistics were captured once, at training time, and are
//! persisted as a JSON artifact next to the model. At inference time they
//! are consumed read-only; nothing here refits.
//!
//! The transform does not clamp. The fitted scaler maps out-of-range
//! inputs outside [0, 1], and the model was trained against exactly that
//! behavior; clamping here would shift its predictions.

use serde::{Deserialize, Serialize};

use crate::features::layout::{self, LayoutMismatchError, FEATURE_COUNT};
use crate::features::{FeatureVector, ScaledVector};

// ============================================================================
// SCALER CAPABILITY
// ============================================================================

/// Capability interface for the fitted feature scaler.
///
/// Narrow on purpose: the pipeline only ever transforms, so tests can
/// substitute a deterministic stub.
pub trait FeatureScaler: Send + Sync {
    fn transform(&self, features: &FeatureVector) -> ScaledVector;
}

// ============================================================================
// PERSISTED PARAMETERS
// ============================================================================

/// The scaler artifact as persisted by the training job.
///
/// Carries the feature layout it was fitted against so a reordered or
/// renamed layout is caught at load time instead of producing silently
/// wrong magnitudes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerParams {
    pub feature_version: u8,
    pub layout_hash: u32,
    pub feature_names: Vec<String>,
    pub data_min: Vec<f32>,
    pub data_max: Vec<f32>,
}

/// The scaler artifact disagrees with this build's feature layout.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScalerError {
    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),

    #[error("scaler `{field}` has {actual} entries, expected {expected}")]
    WrongLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("scaler column {index} is `{actual}`, expected `{expected}`")]
    NameMismatch {
        index: usize,
        expected: String,
        actual: String,
    },
}

// ============================================================================
// MIN-MAX SCALER
// ============================================================================

/// Element-wise `(x - min) / (max - min)` with training-time statistics.
#[derive(Debug, Clone)]
pub struct MinMaxScaler {
    data_min: [f32; FEATURE_COUNT],
    /// Precomputed `max - min`; constant columns are stored as 1 so they
    /// pass through shifted, the fitted-scaler convention.
    range: [f32; FEATURE_COUNT],
}

impl MinMaxScaler {
    /// Build from persisted parameters, verifying the declared layout.
    pub fn from_params(params: &ScalerParams) -> Result<Self, ScalerError> {
        layout::validate_layout(params.feature_version, params.layout_hash)?;

        for (field, len) in [
            ("feature_names", params.feature_names.len()),
            ("data_min", params.data_min.len()),
            ("data_max", params.data_max.len()),
        ] {
            if len != FEATURE_COUNT {
                return Err(ScalerError::WrongLength {
                    field,
                    expected: FEATURE_COUNT,
                    actual: len,
                });
            }
        }

        for (index, (actual, expected)) in params
            .feature_names
            .iter()
            .zip(layout::FEATURE_LAYOUT.iter())
            .enumerate()
        {
            if actual != expected {
                return Err(ScalerError::NameMismatch {
                    index,
                    expected: (*expected).to_string(),
                    actual: actual.clone(),
                });
            }
        }

        let mut data_min = [0.0f32; FEATURE_COUNT];
        let mut range = [1.0f32; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            data_min[i] = params.data_min[i];
            let r = params.data_max[i] - params.data_min[i];
            range[i] = if r == 0.0 { 1.0 } else { r };
        }

        Ok(Self { data_min, range })
    }

    /// Unit-range scaler: transform is the identity. Used by the demo
    /// fallback when no fitted artifact exists.
    pub fn identity() -> Self {
        Self {
            data_min: [0.0; FEATURE_COUNT],
            range: [1.0; FEATURE_COUNT],
        }
    }
}

impl FeatureScaler for MinMaxScaler {
    fn transform(&self, features: &FeatureVector) -> ScaledVector {
        let raw = features.to_array();
        let mut scaled = [0.0f32; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            scaled[i] = (raw[i] - self.data_min[i]) / self.range[i];
        }
        ScaledVector(scaled)
    }
}

// ============================================================================
// TESTS
// ============================================================================
