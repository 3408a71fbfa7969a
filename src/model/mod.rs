//! Model layer: scaling, inference, and artifact loading.
//!
//! Everything behind the `FeatureScaler` and `MagnitudePredictor` traits so
//! the pipeline and the handlers never know which engine is underneath.

pub mod demo;
pub mod loader;
pub mod predictor;
pub mod scaler;

// Re-export common types
pub use loader::{ArtifactInfo, ModelArtifacts};
pub use predictor::{InferenceError, MagnitudePredictor, OnnxPredictor};
pub use scaler::{FeatureScaler, MinMaxScaler, ScalerParams};
