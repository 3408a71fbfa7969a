//! Feature handling: canonical layout, per-request vectors, form coercion.

pub mod layout;
pub mod parse;
pub mod vector;

// Re-export common types
pub use layout::{FEATURE_COUNT, FEATURE_VERSION};
pub use parse::{parse_observation, MissingFieldPolicy, ParseError, RawObservation};
pub use vector::{EchoedFields, FeatureVector, ScaledVector};
