//! HTML rendering.
//!
//! Pages are plain strings assembled with `format!` and served as
//! `axum::response::Html`. No template engine; the whole UI is four small
//! pages sharing one shell. User-supplied text goes through `escape_html`
//! before it is interpolated anywhere.

use crate::pipeline::PredictionOutcome;

/// Form field name/label pairs, in submission order. The `name` attribute
/// of each input must match the deserialization key of `RawObservation`.
const FORM_FIELDS: [(&str, &str); 11] = [
    ("longitude", "Longitude (decimal degrees)"),
    ("latitude", "Latitude (decimal degrees)"),
    ("depth", "Depth (km)"),
    ("rms", "RMS residual"),
    ("type", "Event type code"),
    ("date", "Day"),
    ("month", "Month"),
    ("year", "Year"),
    ("hour", "Hour"),
    ("minute", "Minute"),
    ("second", "Second"),
];

// ============================================================================
// PAGES
// ============================================================================

/// Landing page: asks for the visitor's name before showing the form.
pub fn welcome_page() -> String {
    page(
        "QuakeCast",
        r#"<h1>QuakeCast</h1>
<p>Estimate the magnitude of a seismic event from its location, time and
station readings.</p>
<form method="post" action="/input">
  <label for="name">Your name</label>
  <input type="text" id="name" name="name" required>
  <button type="submit">Continue</button>
</form>"#,
    )
}

/// Observation form, greeting the visitor by name.
pub fn input_page(name: &str) -> String {
    let mut rows = String::new();
    for (field, label) in FORM_FIELDS {
        rows.push_str(&format!(
            r#"  <label for="{field}">{label}</label>
  <input type="text" id="{field}" name="{field}">
"#
        ));
    }

    page(
        "QuakeCast – observation",
        &format!(
            r#"<h1>Hello, {name}</h1>
<p>Enter the observation below. All eleven readings are needed for a
prediction.</p>
<form method="post" action="/predict">
{rows}  <button type="submit">Predict magnitude</button>
</form>"#,
            name = escape_html(name),
        ),
    )
}

/// Result page: headline magnitude, severity tier, and the inputs echoed
/// back exactly as the pipeline understood them.
pub fn result_page(outcome: &PredictionOutcome) -> String {
    let tier = outcome.tier;
    let echoed = outcome.inputs.echoed();

    let demo_notice = if outcome.engine == "demo" {
        "\n<p class=\"notice\">Demo engine: this magnitude is randomly \
         generated, not a model prediction.</p>"
    } else {
        ""
    };

    page(
        "QuakeCast – prediction",
        &format!(
            r#"<div class="banner" style="border-color: {color}">
  <span class="glyph">{glyph}</span>
  <span class="magnitude">Estimated magnitude {magnitude}</span>
</div>
<p class="tier" style="color: {color}">{label}</p>{demo_notice}
<h2>Observation</h2>
<table>
  <tr><th>Longitude</th><td>{longitude}</td></tr>
  <tr><th>Latitude</th><td>{latitude}</td></tr>
  <tr><th>Depth (km)</th><td>{depth}</td></tr>
  <tr><th>RMS</th><td>{rms}</td></tr>
  <tr><th>Type</th><td>{event_type}</td></tr>
  <tr><th>Day</th><td>{day}</td></tr>
  <tr><th>Month</th><td>{month}</td></tr>
  <tr><th>Year</th><td>{year}</td></tr>
  <tr><th>Hour</th><td>{hour}</td></tr>
  <tr><th>Minute</th><td>{minute}</td></tr>
  <tr><th>Second</th><td>{second}</td></tr>
</table>
<p><a href="/">New prediction</a></p>"#,
            color = tier.color(),
            glyph = tier.glyph(),
            magnitude = outcome.magnitude_display(),
            label = tier.label(),
            longitude = echoed.longitude,
            latitude = echoed.latitude,
            depth = echoed.depth,
            rms = echoed.rms,
            event_type = echoed.event_type,
            day = echoed.day,
            month = echoed.month,
            year = echoed.year,
            hour = echoed.hour,
            minute = echoed.minute,
            second = echoed.second,
        ),
    )
}

/// Error page: what failed and a way back to the form.
pub fn error_page(heading: &str, message: &str) -> String {
    page(
        "QuakeCast – error",
        &format!(
            r#"<h1>{heading}</h1>
<p>{message}</p>
<p><a href="/">Return and try again</a></p>"#,
            heading = escape_html(heading),
            message = escape_html(message),
        ),
    )
}

// ============================================================================
// SHELL
// ============================================================================

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <style>
    body {{ font-family: system-ui, sans-serif; background: #f8fafc; color: #0f172a;
           max-width: 40rem; margin: 3rem auto; padding: 0 1rem; }}
    label {{ display: block; margin-top: 0.75rem; font-weight: 600; }}
    input {{ width: 100%; padding: 0.4rem; margin-top: 0.25rem; }}
    button {{ margin-top: 1.25rem; padding: 0.5rem 1.5rem; }}
    table {{ border-collapse: collapse; margin-top: 0.5rem; }}
    th, td {{ border: 1px solid #cbd5e1; padding: 0.3rem 0.8rem; text-align: left; }}
    .banner {{ border-left: 6px solid; padding: 0.75rem 1rem; background: #fff;
              font-size: 1.25rem; }}
    .glyph {{ margin-right: 0.5rem; }}
    .tier {{ font-weight: 600; }}
    .notice {{ color: #92400e; background: #fef3c7; padding: 0.5rem 0.8rem; }}
  </style>
</head>
<body>
{body}
</body>
</html>"#
    )
}

// ============================================================================
// UTILITIES
// ============================================================================

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureVector;
    use crate::severity::SeverityTier;

    fn sample_outcome() -> PredictionOutcome {
        PredictionOutcome {
            magnitude: 4.63,
            tier: SeverityTier::Moderate,
            inputs: FeatureVector {
                longitude: 29.0,
                latitude: 41.0,
                depth: 10.0,
                rms: 0.8,
                event_type: 1.0,
                day: 15,
                month: 8,
                year: 1999,
                hour: 3,
                minute: 2,
                second: 37,
            },
            engine: "onnx",
        }
    }

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("hi")</script>"#),
            "&lt;script&gt;alert(&quot;hi&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("a & b"), "a &amp; b");
    }

    #[test]
    fn welcome_page_posts_to_input() {
        let html = welcome_page();
        assert!(html.contains(r#"action="/input""#));
        assert!(html.contains(r#"name="name""#));
    }

    #[test]
    fn input_page_greets_and_lists_all_fields() {
        let html = input_page("Ayşe");
        assert!(html.contains("Hello, Ayşe"));
        assert!(html.contains(r#"action="/predict""#));
        for (field, _) in FORM_FIELDS {
            assert!(
                html.contains(&format!(r#"name="{field}""#)),
                "missing input for `{field}`"
            );
        }
    }

    #[test]
    fn input_page_escapes_visitor_name() {
        let html = input_page("<script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn result_page_shows_magnitude_tier_and_echoes() {
        let html = result_page(&sample_outcome());
        assert!(html.contains("Estimated magnitude 4.63"));
        assert!(html.contains("Moderate – may damage weak structures"));
        assert!(html.contains("🟠"));
        for echoed in [
            "29.0000", "41.0000", "10.00", "0.80", "15", "08", "1999", "03", "02", "37",
        ] {
            assert!(html.contains(echoed), "missing echoed value `{echoed}`");
        }
        assert!(!html.contains("Demo engine"));
    }

    #[test]
    fn result_page_flags_demo_engine() {
        let mut outcome = sample_outcome();
        outcome.engine = "demo";
        assert!(result_page(&outcome).contains("Demo engine"));
    }

    #[test]
    fn error_page_escapes_message_and_offers_retry() {
        let html = error_page("Invalid input", "field `depth` is not a valid number: `<deep>`");
        assert!(html.contains("Invalid input"));
        assert!(html.contains("&lt;deep&gt;"));
        assert!(!html.contains("<deep>"));
        assert!(html.contains(r#"href="/""#));
    }
}
