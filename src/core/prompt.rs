//! Prompt rendering for the disambiguation call.
//!
//! Output is stable for identical input: no randomness, no timestamps.
//! The embedded feature list is capped before it reaches this module, so
//! the payload stays bounded no matter how many features the provider
//! returned.

use serde::Serialize;

use crate::domain::{DisambiguationContext, Feature};

/// Compact feature view embedded in the prompt: name, type, distance only
#[derive(Serialize)]
struct FeatureView<'a> {
    name: &'a str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    feature_type: Option<&'a str>,
    distance: f64,
}

impl<'a> From<&'a Feature> for FeatureView<'a> {
    fn from(f: &'a Feature) -> Self {
        Self {
            name: &f.name,
            feature_type: f.feature_type.as_deref(),
            distance: f.distance_meters,
        }
    }
}

/// Render the disambiguation prompt for a prepared context.
pub fn render_prompt(context: &DisambiguationContext) -> String {
    let views: Vec<FeatureView<'_>> = context.nearby.iter().map(FeatureView::from).collect();
    // FeatureView is plain data; serialization cannot fail
    let features_json = serde_json::to_string(&views).unwrap_or_else(|_| "[]".to_string());

    format!(
        "You are given:\n\
         - user coordinates: {lat}, {lon}\n\
         - user landmark text: \"{text}\"\n\
         - nearby map features (name, type, distance): {features}\n\
         \n\
         Task:\n\
         1) Based on the nearby features and the user's description, say whether \
         the description plausibly matches a nearby feature.\n\
         2) If yes, produce a 1-2 sentence \"Verified Instruction\" a delivery \
         rider can follow.\n\
         3) If unsure, be explicit and suggest the best fallback (closest named \
         feature with distance).\n\
         \n\
         Respond in JSON:\n\
         {{ \"plausible\": true|false, \"confidence\": 0.0-1.0, \"instruction\": \"...\" }}",
        lat = context.coordinates.lat,
        lon = context.coordinates.lon,
        text = context.user_text,
        features = features_json,
    )
}
