//! Disambiguation payloads: the context sent to the model and the
//! structured reply extracted from its answer.

use serde::{Deserialize, Serialize};

use super::feature::{Coordinates, Feature};

/// Context assembled once per ambiguous case.
///
/// `nearby` is the bounded list actually shown to the disambiguator; the
/// orchestrator keeps the full provider result separately for evidence.
#[derive(Debug, Clone, Serialize)]
pub struct DisambiguationContext {
    /// User-reported coordinates
    pub coordinates: Coordinates,

    /// Raw landmark text as the user wrote it
    pub user_text: String,

    /// Nearby features, capped to the configured prompt limit
    pub nearby: Vec<Feature>,
}

impl DisambiguationContext {
    /// Build a context, truncating the feature list to `max_features`
    pub fn new(
        coordinates: Coordinates,
        user_text: impl Into<String>,
        features: &[Feature],
        max_features: usize,
    ) -> Self {
        Self {
            coordinates,
            user_text: user_text.into(),
            nearby: features.iter().take(max_features).cloned().collect(),
        }
    }
}

/// Structured output extracted from a disambiguator reply.
///
/// Parse failure is represented by absence (`Option::None`), never by an
/// error; confidence is only meaningful when a parse succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedDisambiguation {
    /// Whether the model considers the description plausible
    pub plausible: bool,

    /// Model confidence in [0, 1]
    pub confidence: f64,

    /// Rider instruction proposed by the model, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
}

impl ParsedDisambiguation {
    /// Instruction if present and non-blank
    pub fn usable_instruction(&self) -> Option<&str> {
        self.instruction
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_caps_feature_list() {
        let features: Vec<Feature> = (0..20)
            .map(|i| Feature::new(format!("feature-{i}"), i as f64))
            .collect();

        let ctx = DisambiguationContext::new(
            Coordinates::new(-1.2921, 36.8219),
            "near the gate",
            &features,
            8,
        );

        assert_eq!(ctx.nearby.len(), 8);
        assert_eq!(ctx.nearby[0].name, "feature-0");
    }

    #[test]
    fn test_usable_instruction_rejects_blank() {
        let mut parsed = ParsedDisambiguation {
            plausible: true,
            confidence: 0.9,
            instruction: Some("  ".to_string()),
        };
        assert_eq!(parsed.usable_instruction(), None);

        parsed.instruction = Some("Use the blue gate.".to_string());
        assert_eq!(parsed.usable_instruction(), Some("Use the blue gate."));

        parsed.instruction = None;
        assert_eq!(parsed.usable_instruction(), None);
    }
}
