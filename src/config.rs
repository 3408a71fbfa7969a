//! Configuration module

use std::env;

use crate::features::MissingFieldPolicy;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Path to the trained ONNX model
    pub model_path: String,

    /// Path to the fitted scaler parameters (JSON)
    pub scaler_path: String,

    /// What to do when a form field is absent
    pub missing_field_policy: MissingFieldPolicy,

    /// Upper bound on a single model invocation, in milliseconds
    pub inference_timeout_ms: u64,

    /// Serve fabricated magnitudes when no model is loaded (demo only,
    /// ignored in production)
    pub demo_fallback: bool,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            model_path: env::var("MODEL_PATH")
                .unwrap_or_else(|_| "artifacts/quake_lstm.onnx".to_string()),

            scaler_path: env::var("SCALER_PATH")
                .unwrap_or_else(|_| "artifacts/scaler.json".to_string()),

            missing_field_policy: env::var("MISSING_FIELD_POLICY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or_default(),

            inference_timeout_ms: env::var("INFERENCE_TIMEOUT_MS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(2000),

            demo_fallback: env::var("DEMO_FALLBACK")
                .ok()
                .and_then(|d| d.parse().ok())
                .unwrap_or(false),

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
impl Config {
    /// Baseline config for tests: nothing on disk, strict parsing.
    pub(crate) fn for_tests() -> Self {
        Self {
            port: 0,
            model_path: "no/such/model.onnx".to_string(),
            scaler_path: "no/such/scaler.json".to_string(),
            missing_field_policy: MissingFieldPolicy::Strict,
            inference_timeout_ms: 2000,
            demo_fallback: false,
            environment: "test".to_string(),
        }
    }
}
