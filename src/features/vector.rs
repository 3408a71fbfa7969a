//! Feature vector types.
//!
//! One [`FeatureVector`] is built per prediction request and dropped when
//! the response is rendered; nothing here is persisted. The struct keeps
//! the fields typed the way they were parsed (floats vs calendar integers)
//! so the confirmation echo can reproduce what the user submitted;
//! [`FeatureVector::to_array`] is the single place where the typed fields
//! flatten into the model's fixed-order numeric encoding.

use serde::{Deserialize, Serialize};

use super::layout::FEATURE_COUNT;

// ============================================================================
// FEATURE VECTOR
// ============================================================================

/// One parsed prediction request, in model feature order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub longitude: f32,
    pub latitude: f32,
    /// Kilometers below surface.
    pub depth: f32,
    /// Root-mean-square residual of the reading.
    pub rms: f32,
    /// Label-encoded event type, as encoded at training time.
    pub event_type: f32,
    /// Day of month (the training frame calls this column `date`).
    pub day: i32,
    pub month: i32,
    pub year: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
}

impl FeatureVector {
    /// Flatten into the fixed-order encoding the scaler was fitted on.
    ///
    /// Index positions are pinned to [`super::layout::FEATURE_LAYOUT`];
    /// the test below keeps the two in sync.
    pub fn to_array(&self) -> [f32; FEATURE_COUNT] {
        [
            self.longitude,
            self.latitude,
            self.depth,
            self.rms,
            self.event_type,
            self.day as f32,
            self.month as f32,
            self.year as f32,
            self.hour as f32,
            self.minute as f32,
            self.second as f32,
        ]
    }

    /// Formatted field values for the confirmation echo on the result page.
    pub fn echoed(&self) -> EchoedFields {
        EchoedFields {
            longitude: format!("{:.4}", self.longitude),
            latitude: format!("{:.4}", self.latitude),
            depth: format!("{:.2}", self.depth),
            rms: format!("{:.2}", self.rms),
            event_type: format!("{}", self.event_type),
            day: format!("{:02}", self.day),
            month: format!("{:02}", self.month),
            year: format!("{}", self.year),
            hour: format!("{:02}", self.hour),
            minute: format!("{:02}", self.minute),
            second: format!("{:02}", self.second),
        }
    }
}

// ============================================================================
// ECHOED FIELDS
// ============================================================================

/// Display strings for redisplaying the submitted values.
///
/// Part of the observable contract: the result page echoes these back so
/// the user can confirm what the prediction was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EchoedFields {
    pub longitude: String,
    pub latitude: String,
    pub depth: String,
    pub rms: String,
    pub event_type: String,
    pub day: String,
    pub month: String,
    pub year: String,
    pub hour: String,
    pub minute: String,
    pub second: String,
}

// ============================================================================
// SCALED VECTOR
// ============================================================================

/// A feature vector after the fitted scaler has been applied.
///
/// Separate type so an unscaled vector cannot reach the predictor.
/// Transient: produced, fed to one inference, dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledVector(pub [f32; FEATURE_COUNT]);

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::layout::{feature_index, FEATURE_LAYOUT};

    fn sample() -> FeatureVector {
        FeatureVector {
            longitude: 29.0,
            latitude: 41.0,
            depth: 10.0,
            rms: 0.8,
            event_type: 0.0,
            day: 15,
            month: 8,
            year: 1999,
            hour: 3,
            minute: 2,
            second: 37,
        }
    }

    #[test]
    fn to_array_matches_layout_order() {
        let array = sample().to_array();
        assert_eq!(array.len(), FEATURE_LAYOUT.len());

        assert_eq!(array[feature_index("longitude").unwrap()], 29.0);
        assert_eq!(array[feature_index("latitude").unwrap()], 41.0);
        assert_eq!(array[feature_index("depth").unwrap()], 10.0);
        assert_eq!(array[feature_index("rms").unwrap()], 0.8);
        assert_eq!(array[feature_index("type").unwrap()], 0.0);
        assert_eq!(array[feature_index("date").unwrap()], 15.0);
        assert_eq!(array[feature_index("month").unwrap()], 8.0);
        assert_eq!(array[feature_index("year").unwrap()], 1999.0);
        assert_eq!(array[feature_index("hour").unwrap()], 3.0);
        assert_eq!(array[feature_index("minute").unwrap()], 2.0);
        assert_eq!(array[feature_index("second").unwrap()], 37.0);
    }

    #[test]
    fn echo_formats_for_display() {
        let echoed = sample().echoed();
        assert_eq!(echoed.longitude, "29.0000");
        assert_eq!(echoed.latitude, "41.0000");
        assert_eq!(echoed.depth, "10.00");
        assert_eq!(echoed.rms, "0.80");
        assert_eq!(echoed.event_type, "0");
        assert_eq!(echoed.day, "15");
        assert_eq!(echoed.month, "08");
        assert_eq!(echoed.year, "1999");
        assert_eq!(echoed.hour, "03");
        assert_eq!(echoed.minute, "02");
        assert_eq!(echoed.second, "37");
    }

    #[test]
    fn echo_pads_single_digit_day() {
        let mut vector = sample();
        vector.day = 5;
        assert_eq!(vector.echoed().day, "05");
    }
}
