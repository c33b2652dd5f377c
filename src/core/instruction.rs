//! Rider instruction synthesis.
//!
//! Builds the human-readable arrival instruction from a confirmed feature,
//! plus the deterministic fallback used when no confident match exists.

use crate::domain::Feature;

/// Label used when a feature carries no description, name, or tags
const UNNAMED_FEATURE: &str = "unnamed feature";

/// Build the arrival instruction for a confirmed feature.
///
/// Prefers the description, then the name, then the first tag value,
/// then a placeholder.
pub fn from_feature(feature: &Feature) -> String {
    let label = feature
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .or_else(|| Some(feature.name.as_str()).filter(|n| !n.is_empty()))
        .or_else(|| {
            feature
                .tags
                .as_ref()
                .and_then(|tags| tags.values().next())
                .map(String::as_str)
        })
        .unwrap_or(UNNAMED_FEATURE);

    format!(
        "Entrance: {} - approximately {}m from pin. Call on arrival.",
        label,
        feature.rounded_distance()
    )
}

/// Build the fallback instruction when nothing matched confidently.
///
/// With no nearby features the only option is to ask the customer for
/// more signal; otherwise name the closest feature (ties broken by
/// provider order) and ask for confirmation.
pub fn fallback(features: &[Feature], _user_text: &str) -> String {
    let Some(closest) = features.iter().reduce(|a, b| {
        if b.distance_meters < a.distance_meters {
            b
        } else {
            a
        }
    }) else {
        return "No nearby named features. Ask customer to provide a photo \
                or alternative landmark."
            .to_string();
    };

    format!(
        "Closest named feature: '{}' ~{}m. Ask customer to confirm or provide a photo.",
        closest.name,
        closest.rounded_distance()
    )
}
