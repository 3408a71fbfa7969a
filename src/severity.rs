//! Severity tiers for predicted magnitudes.
//!
//! Five ordered bands over the Richter-style magnitude scale. All tier
//! metadata is a static table lookup, never computed.

use serde::{Deserialize, Serialize};

// ============================================================================
// SEVERITY TIER
// ============================================================================

/// Discrete severity band for a predicted magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeverityTier {
    /// Below 3.0.
    Minor,
    /// 3.0 up to (not including) 4.0.
    Light,
    /// 4.0 up to (not including) 5.0.
    Moderate,
    /// 5.0 up to (not including) 6.0.
    Strong,
    /// 6.0 and above, open-ended.
    Major,
}

impl SeverityTier {
    /// Classify a magnitude into its tier.
    ///
    /// Upper bounds are strict: exactly 3.0, 4.0, 5.0 or 6.0 lands in the
    /// higher tier.
    pub fn classify(magnitude: f32) -> Self {
        if magnitude < 3.0 {
            SeverityTier::Minor
        } else if magnitude < 4.0 {
            SeverityTier::Light
        } else if magnitude < 5.0 {
            SeverityTier::Moderate
        } else if magnitude < 6.0 {
            SeverityTier::Strong
        } else {
            SeverityTier::Major
        }
    }

    /// Human-readable risk description.
    pub fn label(&self) -> &'static str {
        match self {
            SeverityTier::Minor => "Minor – usually not felt",
            SeverityTier::Light => "Light – often felt, rarely damaging",
            SeverityTier::Moderate => "Moderate – may damage weak structures",
            SeverityTier::Strong => "Strong – damage in populated areas",
            SeverityTier::Major => "Major/Great – serious damage over large areas",
        }
    }

    /// Display glyph for the result page.
    pub fn glyph(&self) -> &'static str {
        match self {
            SeverityTier::Minor => "🟢",
            SeverityTier::Light => "🟡",
            SeverityTier::Moderate => "🟠",
            SeverityTier::Strong => "🔴",
            SeverityTier::Major => "🔴🔴",
        }
    }

    /// Accent color for rendering.
    pub fn color(&self) -> &'static str {
        match self {
            SeverityTier::Minor => "#10b981",    // Green
            SeverityTier::Light => "#eab308",    // Yellow
            SeverityTier::Moderate => "#f59e0b", // Orange
            SeverityTier::Strong => "#ef4444",   // Red
            SeverityTier::Major => "#b91c1c",    // Dark red
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityTier::Minor => "minor",
            SeverityTier::Light => "light",
            SeverityTier::Moderate => "moderate",
            SeverityTier::Strong => "strong",
            SeverityTier::Major => "major",
        }
    }

    /// Ordinal rank, Minor = 0 through Major = 4.
    pub fn severity_level(&self) -> u8 {
        match self {
            SeverityTier::Minor => 0,
            SeverityTier::Light => 1,
            SeverityTier::Moderate => 2,
            SeverityTier::Strong => 3,
            SeverityTier::Major => 4,
        }
    }
}

impl std::fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn classifies_interior_points() {
        assert_eq!(SeverityTier::classify(0.0), SeverityTier::Minor);
        assert_eq!(SeverityTier::classify(2.9), SeverityTier::Minor);
        assert_eq!(SeverityTier::classify(3.5), SeverityTier::Light);
        assert_eq!(SeverityTier::classify(4.63), SeverityTier::Moderate);
        assert_eq!(SeverityTier::classify(5.5), SeverityTier::Strong);
        assert_eq!(SeverityTier::classify(7.8), SeverityTier::Major);
    }

    #[test]
    fn boundary_values_land_in_the_higher_tier() {
        assert_eq!(SeverityTier::classify(3.0), SeverityTier::Light);
        assert_eq!(SeverityTier::classify(4.0), SeverityTier::Moderate);
        assert_eq!(SeverityTier::classify(5.0), SeverityTier::Strong);
        assert_eq!(SeverityTier::classify(6.0), SeverityTier::Major);
    }

    #[test]
    fn tiers_are_ordered_by_level() {
        assert!(SeverityTier::Minor < SeverityTier::Light);
        assert!(SeverityTier::Strong < SeverityTier::Major);
        assert_eq!(SeverityTier::Minor.severity_level(), 0);
        assert_eq!(SeverityTier::Major.severity_level(), 4);
    }

    #[test]
    fn labels_match_the_published_table() {
        assert_eq!(SeverityTier::Minor.label(), "Minor – usually not felt");
        assert_eq!(
            SeverityTier::Moderate.label(),
            "Moderate – may damage weak structures"
        );
        assert_eq!(
            SeverityTier::Major.label(),
            "Major/Great – serious damage over large areas"
        );
    }

    // Property: every finite magnitude falls into exactly the tier whose
    // band contains it; classification is total and deterministic.
    #[quickcheck]
    fn prop_classification_is_total_and_consistent(magnitude: f32) -> bool {
        if !magnitude.is_finite() {
            return true;
        }
        let tier = SeverityTier::classify(magnitude);
        let expected = if magnitude < 3.0 {
            SeverityTier::Minor
        } else if magnitude < 4.0 {
            SeverityTier::Light
        } else if magnitude < 5.0 {
            SeverityTier::Moderate
        } else if magnitude < 6.0 {
            SeverityTier::Strong
        } else {
            SeverityTier::Major
        };
        tier == expected && SeverityTier::classify(magnitude) == tier
    }
}
