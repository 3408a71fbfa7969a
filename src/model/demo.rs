//! Demo fallback predictor.
//!
//! Answers with a pseudo-random magnitude so the UI can be exercised with
//! no trained model on disk. Fenced: opt-in via `DEMO_FALLBACK=true`,
//! refused in production, and its results are labelled `demo` everywhere
//! they surface. The production path never fabricates a prediction.

use rand::Rng;

use crate::features::ScaledVector;

use super::predictor::{InferenceError, MagnitudePredictor};

/// Emits a plausible-looking magnitude without consulting any model.
pub struct DemoPredictor;

/// Band the fake magnitudes are drawn from. Wide enough to exercise every
/// severity tier a demo visitor is likely to care about.
const DEMO_RANGE: std::ops::Range<f32> = 2.0..7.0;

impl MagnitudePredictor for DemoPredictor {
    fn predict(&self, _scaled: &ScaledVector) -> Result<f32, InferenceError> {
        Ok(rand::thread_rng().gen_range(DEMO_RANGE))
    }

    fn engine(&self) -> &'static str {
        "demo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FEATURE_COUNT;

    #[test]
    fn demo_magnitudes_stay_in_band() {
        let predictor = DemoPredictor;
        let scaled = ScaledVector([0.0; FEATURE_COUNT]);
        for _ in 0..200 {
            let magnitude = predictor.predict(&scaled).unwrap();
            assert!((2.0..7.0).contains(&magnitude));
        }
    }

    #[test]
    fn demo_engine_is_labelled() {
        assert_eq!(DemoPredictor.engine(), "demo");
    }
}
