//! Startup artifact loading.
//!
//! The scaler and the predictor are deserialized once, at process start,
//! and handed around read-only for the life of the process. A missing or
//! unreadable artifact never crashes startup: its slot stays `None`, the
//! failure is logged, and requests answer "model unavailable" until an
//! operator fixes the deployment. Per-request failures never invalidate
//! loaded state.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::config::Config;

use super::demo::DemoPredictor;
use super::predictor::{MagnitudePredictor, OnnxPredictor};
use super::scaler::{FeatureScaler, MinMaxScaler, ScalerParams};

// ============================================================================
// ARTIFACT INFO
// ============================================================================

/// Provenance of one loaded artifact, surfaced by `/health`.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactInfo {
    pub path: String,
    pub sha256: String,
    pub loaded_at: DateTime<Utc>,
}

// ============================================================================
// MODEL ARTIFACTS
// ============================================================================

/// The process-wide inference context: fitted scaler plus trained
/// predictor, or `None` sentinels where loading failed.
///
/// Constructed explicitly in `main` and injected through `AppState`;
/// nothing reads ambient globals.
pub struct ModelArtifacts {
    scaler: Option<Box<dyn FeatureScaler>>,
    predictor: Option<Box<dyn MagnitudePredictor>>,
    scaler_info: Option<ArtifactInfo>,
    predictor_info: Option<ArtifactInfo>,
}

impl ModelArtifacts {
    /// Load both artifacts per the configuration. Infallible by design;
    /// failures leave `None` sentinels behind.
    pub fn load(config: &Config) -> Self {
        let mut artifacts = Self::empty();

        match load_scaler(&config.scaler_path) {
            Ok((scaler, info)) => {
                tracing::info!(path = %info.path, sha256 = %info.sha256, "scaler loaded");
                artifacts.scaler = Some(Box::new(scaler));
                artifacts.scaler_info = Some(info);
            }
            Err(e) => {
                tracing::error!(path = %config.scaler_path, error = %format!("{e:#}"), "scaler unavailable");
            }
        }

        match load_predictor(&config.model_path) {
            Ok((predictor, info)) => {
                tracing::info!(path = %info.path, sha256 = %info.sha256, "model loaded");
                artifacts.predictor = Some(Box::new(predictor));
                artifacts.predictor_info = Some(info);
            }
            Err(e) => {
                tracing::error!(path = %config.model_path, error = %format!("{e:#}"), "model unavailable");
            }
        }

        if config.demo_fallback {
            artifacts.apply_demo_fallback(config);
        }

        artifacts
    }

    /// Both slots empty: the sentinel state.
    pub fn empty() -> Self {
        Self {
            scaler: None,
            predictor: None,
            scaler_info: None,
            predictor_info: None,
        }
    }

    /// Assemble from parts. Tests use this to inject stubs.
    pub fn with_parts(
        scaler: Option<Box<dyn FeatureScaler>>,
        predictor: Option<Box<dyn MagnitudePredictor>>,
    ) -> Self {
        Self {
            scaler,
            predictor,
            scaler_info: None,
            predictor_info: None,
        }
    }

    /// Substitute the demo predictor where no real model loaded.
    ///
    /// Only the predictor slot is faked, and the identity scaler is paired
    /// with it only when the real scaler is also absent — a real model
    /// never runs against a fake scaler, and vice versa.
    fn apply_demo_fallback(&mut self, config: &Config) {
        if config.is_production() {
            tracing::warn!("DEMO_FALLBACK is set but ENVIRONMENT=production; ignoring");
            return;
        }
        if self.predictor.is_some() {
            return;
        }

        tracing::warn!("demo fallback active: magnitudes will be fabricated, not predicted");
        self.predictor = Some(Box::new(DemoPredictor));
        if self.scaler.is_none() {
            self.scaler = Some(Box::new(MinMaxScaler::identity()));
        }
    }

    pub fn scaler(&self) -> Option<&dyn FeatureScaler> {
        self.scaler.as_deref()
    }

    pub fn predictor(&self) -> Option<&dyn MagnitudePredictor> {
        self.predictor.as_deref()
    }

    pub fn scaler_loaded(&self) -> bool {
        self.scaler.is_some()
    }

    pub fn predictor_loaded(&self) -> bool {
        self.predictor.is_some()
    }

    /// Engine name for the health report: `onnx`, `demo`, or `none`.
    pub fn engine(&self) -> &'static str {
        self.predictor.as_deref().map_or("none", |p| p.engine())
    }

    pub fn scaler_info(&self) -> Option<&ArtifactInfo> {
        self.scaler_info.as_ref()
    }

    pub fn predictor_info(&self) -> Option<&ArtifactInfo> {
        self.predictor_info.as_ref()
    }
}

// ============================================================================
// LOADERS
// ============================================================================

fn load_scaler(path: &str) -> anyhow::Result<(MinMaxScaler, ArtifactInfo)> {
    let bytes = std::fs::read(path).with_context(|| format!("read scaler artifact `{path}`"))?;
    let params: ScalerParams =
        serde_json::from_slice(&bytes).context("parse scaler artifact JSON")?;
    let scaler = MinMaxScaler::from_params(&params).context("validate scaler artifact")?;
    Ok((scaler, artifact_info(path, &bytes)))
}

fn load_predictor(path: &str) -> anyhow::Result<(OnnxPredictor, ArtifactInfo)> {
    let bytes = std::fs::read(path).with_context(|| format!("read model artifact `{path}`"))?;
    let predictor = OnnxPredictor::load(path).context("load ONNX model")?;
    Ok((predictor, artifact_info(path, &bytes)))
}

fn artifact_info(path: &str, bytes: &[u8]) -> ArtifactInfo {
    ArtifactInfo {
        path: path.to_string(),
        sha256: hex::encode(Sha256::digest(bytes)),
        loaded_at: Utc::now(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
