//! Form field coercion.
//!
//! The prediction form submits eleven raw text fields. This module turns
//! them into a [`FeatureVector`] or a [`ParseError`] that names the first
//! offending field; a half-parsed vector never escapes.
//!
//! Fields are coerced in layout order, floats first, so the error the user
//! sees always points at the earliest bad field.

use serde::Deserialize;
use std::str::FromStr;

use super::vector::FeatureVector;

// ============================================================================
// RAW OBSERVATION
// ============================================================================

/// The prediction form payload, before any coercion.
///
/// Every field is optional at this layer; presence policy is applied by
/// [`parse_observation`]. Field keys match the training frame's column
/// names (`type`, `date`), which is what the form posts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawObservation {
    pub longitude: Option<String>,
    pub latitude: Option<String>,
    pub depth: Option<String>,
    pub rms: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    /// Day of month.
    pub date: Option<String>,
    pub month: Option<String>,
    pub year: Option<String>,
    pub hour: Option<String>,
    pub minute: Option<String>,
    pub second: Option<String>,
}

// ============================================================================
// MISSING FIELD POLICY
// ============================================================================

/// What to do when a form field is absent (or submitted blank).
///
/// `Strict` rejects the request naming the field. `Defaults` substitutes
/// the documented stand-ins: 0 for numeric fields, 1 for day and month,
/// 2024 for year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingFieldPolicy {
    #[default]
    Strict,
    Defaults,
}

impl FromStr for MissingFieldPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "defaults" => Ok(Self::Defaults),
            other => Err(format!("unknown missing-field policy: {other}")),
        }
    }
}

// ============================================================================
// PARSE ERROR
// ============================================================================

/// A raw field could not be coerced to its declared numeric type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("field `{field}` is required")]
    MissingField { field: &'static str },

    #[error("field `{field}` is not a valid number: `{value}`")]
    InvalidNumber { field: &'static str, value: String },
}

impl ParseError {
    /// The form field this error is about.
    pub fn field(&self) -> &'static str {
        match self {
            ParseError::MissingField { field } => field,
            ParseError::InvalidNumber { field, value: _ } => field,
        }
    }
}

// ============================================================================
// COERCION
// ============================================================================

/// Coerce the raw form fields into a [`FeatureVector`].
pub fn parse_observation(
    raw: &RawObservation,
    policy: MissingFieldPolicy,
) -> Result<FeatureVector, ParseError> {
    Ok(FeatureVector {
        longitude: float_field(&raw.longitude, "longitude", policy, 0.0)?,
        latitude: float_field(&raw.latitude, "latitude", policy, 0.0)?,
        depth: float_field(&raw.depth, "depth", policy, 0.0)?,
        rms: float_field(&raw.rms, "rms", policy, 0.0)?,
        event_type: float_field(&raw.event_type, "type", policy, 0.0)?,
        day: int_field(&raw.date, "date", policy, 1)?,
        month: int_field(&raw.month, "month", policy, 1)?,
        year: int_field(&raw.year, "year", policy, 2024)?,
        hour: int_field(&raw.hour, "hour", policy, 0)?,
        minute: int_field(&raw.minute, "minute", policy, 0)?,
        second: int_field(&raw.second, "second", policy, 0)?,
    })
}

/// A present, non-blank value after trimming. Browsers submit blank inputs
/// as empty strings, so blank counts as absent.
fn present(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn float_field(
    raw: &Option<String>,
    field: &'static str,
    policy: MissingFieldPolicy,
    default: f32,
) -> Result<f32, ParseError> {
    match (present(raw), policy) {
        (Some(value), _) => value.parse::<f32>().map_err(|_| ParseError::InvalidNumber {
            field,
            value: value.to_string(),
        }),
        (None, MissingFieldPolicy::Defaults) => Ok(default),
        (None, MissingFieldPolicy::Strict) => Err(ParseError::MissingField { field }),
    }
}

fn int_field(
    raw: &Option<String>,
    field: &'static str,
    policy: MissingFieldPolicy,
    default: i32,
) -> Result<i32, ParseError> {
    match (present(raw), policy) {
        (Some(value), _) => value.parse::<i32>().map_err(|_| ParseError::InvalidNumber {
            field,
            value: value.to_string(),
        }),
        (None, MissingFieldPolicy::Defaults) => Ok(default),
        (None, MissingFieldPolicy::Strict) => Err(ParseError::MissingField { field }),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn full_form() -> RawObservation {
        RawObservation {
            longitude: Some("29.0".into()),
            latitude: Some("41.0".into()),
            depth: Some("10.0".into()),
            rms: Some("0.8".into()),
            event_type: Some("0".into()),
            date: Some("15".into()),
            month: Some("8".into()),
            year: Some("1999".into()),
            hour: Some("3".into()),
            minute: Some("2".into()),
            second: Some("37".into()),
        }
    }

    #[test]
    fn parses_complete_form() {
        let vector = parse_observation(&full_form(), MissingFieldPolicy::Strict).unwrap();
        assert_eq!(vector.longitude, 29.0);
        assert_eq!(vector.latitude, 41.0);
        assert_eq!(vector.depth, 10.0);
        assert_eq!(vector.rms, 0.8);
        assert_eq!(vector.event_type, 0.0);
        assert_eq!(vector.day, 15);
        assert_eq!(vector.month, 8);
        assert_eq!(vector.year, 1999);
        assert_eq!(vector.hour, 3);
        assert_eq!(vector.minute, 2);
        assert_eq!(vector.second, 37);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let mut form = full_form();
        form.longitude = Some("  29.0 ".into());
        form.hour = Some(" 3".into());
        let vector = parse_observation(&form, MissingFieldPolicy::Strict).unwrap();
        assert_eq!(vector.longitude, 29.0);
        assert_eq!(vector.hour, 3);
    }

    #[test]
    fn invalid_float_names_the_field() {
        let mut form = full_form();
        form.longitude = Some("abc".into());
        let err = parse_observation(&form, MissingFieldPolicy::Strict).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidNumber {
                field: "longitude",
                value: "abc".into()
            }
        );
        assert_eq!(err.field(), "longitude");
    }

    #[test]
    fn calendar_fields_reject_fractions() {
        // calendar fields are integers; fractions are rejected, not truncated
        let mut form = full_form();
        form.hour = Some("3.5".into());
        let err = parse_observation(&form, MissingFieldPolicy::Strict).unwrap_err();
        assert_eq!(err.field(), "hour");
    }

    #[test]
    fn event_type_accepts_float_literals() {
        let mut form = full_form();
        form.event_type = Some("2.0".into());
        let vector = parse_observation(&form, MissingFieldPolicy::Strict).unwrap();
        assert_eq!(vector.event_type, 2.0);
    }

    #[test]
    fn strict_policy_rejects_missing_field() {
        let mut form = full_form();
        form.rms = None;
        let err = parse_observation(&form, MissingFieldPolicy::Strict).unwrap_err();
        assert_eq!(err, ParseError::MissingField { field: "rms" });
    }

    #[test]
    fn strict_policy_treats_blank_as_missing() {
        let mut form = full_form();
        form.depth = Some("   ".into());
        let err = parse_observation(&form, MissingFieldPolicy::Strict).unwrap_err();
        assert_eq!(err, ParseError::MissingField { field: "depth" });
    }

    #[test]
    fn defaults_policy_substitutes_documented_values() {
        let vector =
            parse_observation(&RawObservation::default(), MissingFieldPolicy::Defaults).unwrap();
        assert_eq!(vector.longitude, 0.0);
        assert_eq!(vector.rms, 0.0);
        assert_eq!(vector.event_type, 0.0);
        assert_eq!(vector.day, 1);
        assert_eq!(vector.month, 1);
        assert_eq!(vector.year, 2024);
        assert_eq!(vector.hour, 0);
        assert_eq!(vector.minute, 0);
        assert_eq!(vector.second, 0);
    }

    #[test]
    fn defaults_policy_still_rejects_garbage() {
        let mut form = RawObservation::default();
        form.latitude = Some("north".into());
        let err = parse_observation(&form, MissingFieldPolicy::Defaults).unwrap_err();
        assert_eq!(err.field(), "latitude");
    }

    #[test]
    fn first_bad_field_in_layout_order_wins() {
        let mut form = full_form();
        form.depth = Some("deep".into());
        form.minute = Some("soon".into());
        let err = parse_observation(&form, MissingFieldPolicy::Strict).unwrap_err();
        assert_eq!(err.field(), "depth");
    }

    #[test]
    fn policy_parses_from_config_strings() {
        assert_eq!(
            "strict".parse::<MissingFieldPolicy>().unwrap(),
            MissingFieldPolicy::Strict
        );
        assert_eq!(
            "Defaults".parse::<MissingFieldPolicy>().unwrap(),
            MissingFieldPolicy::Defaults
        );
        assert!("lenient".parse::<MissingFieldPolicy>().is_err());
    }
}
