//! Canonical feature layout for the magnitude model.
//!
//! The scaler and the predictor were fitted against columns in one specific
//! order. Feeding the model a reordered vector produces wrong magnitudes
//! with no runtime error, so the order lives here, once, and everything
//! else (parsing, scaling, artifacts) derives from it.
//!
//! Changing anything below — adding a column, renaming, reordering —
//! requires bumping [`FEATURE_VERSION`]. Persisted artifacts carry the
//! version and the layout hash and are refused at load when they disagree.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version. Bump on any layout change.
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT
// ============================================================================

/// Feature names in the exact order the model was trained on.
///
/// The names double as the form field keys, so they are kept as the
/// training frame's column names even where those read oddly (`date` is
/// the day of month; `type` is the label-encoded event type).
pub const FEATURE_LAYOUT: &[&str] = &[
    "longitude", // 0: decimal degrees
    "latitude",  // 1: decimal degrees
    "depth",     // 2: kilometers
    "rms",       // 3: root-mean-square residual
    "type",      // 4: event type, label-encoded at training time
    "date",      // 5: day of month
    "month",     // 6: calendar month
    "year",      // 7: calendar year
    "hour",      // 8: hour of day
    "minute",    // 9: minute
    "second",    // 10: second
];

/// Total number of features. Must match `FEATURE_LAYOUT.len()`.
pub const FEATURE_COUNT: usize = 11;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 over the version byte and the ordered feature names.
///
/// Stored inside the scaler artifact; a mismatch at load time means the
/// artifact was fitted against a different column order.
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }
    hasher.finalize()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Layout summary for the health endpoint and logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
        }
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// An artifact declared a layout this build does not have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "feature layout mismatch: expected v{} (hash {:08x}), got v{} (hash {:08x})",
            self.expected_version, self.expected_hash, self.actual_version, self.actual_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

/// Validate a (version, hash) pair declared by persisted data.
pub fn validate_layout(version: u8, hash: u32) -> Result<(), LayoutMismatchError> {
    let current = layout_hash();
    if version != FEATURE_VERSION || hash != current {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current,
            actual_version: version,
            actual_hash: hash,
        });
    }
    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Index of a feature by name. O(n), but n is 11.
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Name of the feature at `index`.
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_has_eleven_features() {
        assert_eq!(FEATURE_COUNT, 11);
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn layout_order_matches_training_frame() {
        // The order the columns left the training frame in. Frozen.
        let expected = [
            "longitude", "latitude", "depth", "rms", "type", "date", "month", "year", "hour",
            "minute", "second",
        ];
        assert_eq!(FEATURE_LAYOUT, &expected);
    }

    #[test]
    fn layout_hash_is_stable_and_nonzero() {
        let hash = layout_hash();
        assert_eq!(hash, layout_hash());
        assert_ne!(hash, 0);
    }

    #[test]
    fn validate_accepts_current_layout() {
        assert!(validate_layout(FEATURE_VERSION, layout_hash()).is_ok());
    }

    #[test]
    fn validate_rejects_version_mismatch() {
        let err = validate_layout(FEATURE_VERSION + 1, layout_hash()).unwrap_err();
        assert_eq!(err.expected_version, FEATURE_VERSION);
        assert_eq!(err.actual_version, FEATURE_VERSION + 1);
    }

    #[test]
    fn validate_rejects_hash_mismatch() {
        assert!(validate_layout(FEATURE_VERSION, layout_hash().wrapping_add(1)).is_err());
    }

    #[test]
    fn feature_lookup_round_trips() {
        assert_eq!(feature_index("longitude"), Some(0));
        assert_eq!(feature_index("type"), Some(4));
        assert_eq!(feature_index("second"), Some(10));
        assert_eq!(feature_index("magnitude"), None);

        assert_eq!(feature_name(0), Some("longitude"));
        assert_eq!(feature_name(10), Some("second"));
        assert_eq!(feature_name(11), None);
    }
}
