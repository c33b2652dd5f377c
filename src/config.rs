//! Tunable policy values for the handshake pipeline.
//!
//! Everything here is policy, not structure: changing a value changes
//! which verdicts come out, never whether the pipeline runs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Policy configuration for a [`crate::Handshake`] pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandshakeConfig {
    /// Search radius passed to the spatial provider (default: 100 m)
    #[serde(default = "default_max_distance")]
    pub max_distance_meters: f64,

    /// Minimum accepted disambiguator confidence, inclusive (default: 0.75)
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// Maximum number of nearby features embedded in the prompt (default: 8)
    #[serde(default = "default_max_prompt_features")]
    pub max_prompt_features: usize,

    /// Disambiguator call timeout in seconds (default: 30)
    #[serde(default = "default_disambiguator_timeout")]
    pub disambiguator_timeout_seconds: u64,

    /// Allow brace-slice JSON extraction from prose-wrapped replies.
    /// Known fragility: can mis-extract when a reply contains several
    /// JSON-like fragments.
    #[serde(default = "default_lenient_parsing")]
    pub lenient_parsing: bool,
}

fn default_max_distance() -> f64 {
    100.0
}
fn default_confidence_threshold() -> f64 {
    0.75
}
fn default_max_prompt_features() -> usize {
    8
}
fn default_disambiguator_timeout() -> u64 {
    30
}
fn default_lenient_parsing() -> bool {
    true
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            max_distance_meters: default_max_distance(),
            confidence_threshold: default_confidence_threshold(),
            max_prompt_features: default_max_prompt_features(),
            disambiguator_timeout_seconds: default_disambiguator_timeout(),
            lenient_parsing: default_lenient_parsing(),
        }
    }
}

impl HandshakeConfig {
    /// Disambiguator timeout as a [`Duration`]
    pub fn disambiguator_timeout(&self) -> Duration {
        Duration::from_secs(self.disambiguator_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HandshakeConfig::default();
        assert_eq!(config.max_distance_meters, 100.0);
        assert_eq!(config.confidence_threshold, 0.75);
        assert_eq!(config.max_prompt_features, 8);
        assert_eq!(config.disambiguator_timeout(), Duration::from_secs(30));
        assert!(config.lenient_parsing);
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let config: HandshakeConfig =
            serde_json::from_str(r#"{"confidence_threshold": 0.9}"#).unwrap();
        assert_eq!(config.confidence_threshold, 0.9);
        assert_eq!(config.max_prompt_features, 8);
        assert_eq!(config.max_distance_meters, 100.0);
    }
}
