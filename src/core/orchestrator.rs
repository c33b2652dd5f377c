//! Handshake orchestrator: the only component with branching policy.
//!
//! Per request: spatial query, deterministic match attempt, conditional
//! disambiguation under a timeout, verdict construction. The two external
//! calls are the only suspension points; everything between them is pure.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::adapters::{Disambiguator, SpatialProvider};
use crate::config::HandshakeConfig;
use crate::domain::{
    Coordinates, DisambiguationContext, Evidence, Feature, Verdict, VerdictStatus,
};

use super::{instruction, matcher, parser, prompt};

/// Boundary rejection of malformed input.
///
/// This is the only error `validate` returns; once input passes the
/// boundary check the pipeline is total and every outcome is a [`Verdict`].
#[derive(Debug, Clone, Error)]
pub enum InputError {
    #[error("invalid coordinates: lat={lat}, lon={lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },

    #[error("landmark text is empty")]
    EmptyLandmarkText,
}

/// Landmark verification pipeline
pub struct Handshake {
    provider: Arc<dyn SpatialProvider>,
    disambiguator: Option<Arc<dyn Disambiguator>>,
    config: HandshakeConfig,
}

impl Handshake {
    /// Create a pipeline with a spatial provider and default policy
    pub fn new(provider: Arc<dyn SpatialProvider>) -> Self {
        Self {
            provider,
            disambiguator: None,
            config: HandshakeConfig::default(),
        }
    }

    /// Attach a disambiguator for the ambiguous path
    pub fn with_disambiguator(mut self, disambiguator: Arc<dyn Disambiguator>) -> Self {
        self.disambiguator = Some(disambiguator);
        self
    }

    /// Override the policy configuration
    pub fn with_config(mut self, config: HandshakeConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve a landmark description into a verdict.
    ///
    /// Returns `Err` only for malformed input; provider and disambiguator
    /// faults surface as a `failed` verdict, never as an error.
    #[instrument(skip(self, landmark))]
    pub async fn validate(
        &self,
        coords: Coordinates,
        landmark: &str,
    ) -> Result<Verdict, InputError> {
        if !coords.is_valid() {
            return Err(InputError::InvalidCoordinates {
                lat: coords.lat,
                lon: coords.lon,
            });
        }
        if landmark.trim().is_empty() {
            return Err(InputError::EmptyLandmarkText);
        }

        let request_id = Uuid::new_v4();
        info!(%request_id, "starting landmark validation");

        // 1) Spatial query, the one piece of I/O that cannot be skipped
        let nearby = match self
            .provider
            .query(coords, self.config.max_distance_meters)
            .await
        {
            Ok(features) => features,
            Err(e) => {
                warn!(error = %e, "spatial provider fault");
                return Ok(Verdict::new(
                    request_id,
                    VerdictStatus::Failed,
                    "Could not verify the landmark: spatial lookup failed. \
                     Retry or contact dispatch.",
                    Evidence::fault(format!("spatial provider: {e:#}")),
                ));
            }
        };
        debug!(feature_count = nearby.len(), "provider query complete");

        // 2) Deterministic match, first hit in provider order wins
        if let Some(matched) = nearby.iter().find(|f| matcher::matches_landmark(f, landmark)) {
            info!(feature = %matched.name, "deterministic match");
            return Ok(Verdict::new(
                request_id,
                VerdictStatus::Verified,
                instruction::from_feature(matched),
                Evidence::matched(matched.clone()),
            ));
        }

        // 3) No deterministic hit: hand off to the disambiguator if we have one
        if let Some(disambiguator) = &self.disambiguator {
            return Ok(self
                .disambiguate(request_id, disambiguator.as_ref(), coords, landmark, nearby)
                .await);
        }

        // 4) No disambiguator configured
        info!("no match and no disambiguator, falling back");
        let fallback = instruction::fallback(&nearby, landmark);
        Ok(Verdict::new(
            request_id,
            VerdictStatus::Ambiguous,
            fallback,
            Evidence::inconclusive(nearby, None),
        ))
    }

    /// Run the disambiguation branch and fold its outcome into a verdict
    async fn disambiguate(
        &self,
        request_id: Uuid,
        disambiguator: &dyn Disambiguator,
        coords: Coordinates,
        landmark: &str,
        nearby: Vec<Feature>,
    ) -> Verdict {
        let context = DisambiguationContext::new(
            coords,
            landmark,
            &nearby,
            self.config.max_prompt_features,
        );
        let rendered = prompt::render_prompt(&context);

        let reply = match tokio::time::timeout(
            self.config.disambiguator_timeout(),
            disambiguator.generate(&rendered),
        )
        .await
        {
            // Timed out: a slow model is "no confident answer", not a fault
            Err(_) => {
                warn!(
                    timeout_s = self.config.disambiguator_timeout_seconds,
                    "disambiguator timed out, degrading to fallback"
                );
                let fallback = instruction::fallback(&nearby, landmark);
                return Verdict::new(
                    request_id,
                    VerdictStatus::Ambiguous,
                    fallback,
                    Evidence::inconclusive(nearby, None),
                );
            }
            // The client itself broke: infrastructure failure
            Ok(Err(e)) => {
                warn!(error = %e, "disambiguator transport fault");
                return Verdict::new(
                    request_id,
                    VerdictStatus::Failed,
                    "Could not verify the landmark: disambiguation service failed. \
                     Retry or contact dispatch.",
                    Evidence::fault(format!("disambiguator: {e:#}")),
                );
            }
            Ok(Ok(text)) => text,
        };

        let parsed = parser::parse_reply(&reply, self.config.lenient_parsing);

        if let Some(parsed) = parsed {
            // Inclusive threshold: exactly at the boundary counts
            if parsed.confidence >= self.config.confidence_threshold {
                if let Some(inst) = parsed.usable_instruction() {
                    info!(confidence = parsed.confidence, "disambiguator answer accepted");
                    let inst = inst.to_string();
                    return Verdict::new(
                        request_id,
                        VerdictStatus::Verified,
                        inst,
                        Evidence::disambiguated(parsed, nearby),
                    );
                }
            }

            debug!(
                confidence = parsed.confidence,
                threshold = self.config.confidence_threshold,
                "disambiguator answer below threshold or unusable"
            );
            let instruction = parsed
                .usable_instruction()
                .map(str::to_string)
                .unwrap_or_else(|| instruction::fallback(&nearby, landmark));
            let mut evidence = Evidence::inconclusive(nearby, Some(reply));
            evidence.disambiguation = Some(parsed);
            return Verdict::new(request_id, VerdictStatus::Ambiguous, instruction, evidence);
        }

        info!("disambiguator reply did not parse, falling back");
        let fallback = instruction::fallback(&nearby, landmark);
        Verdict::new(
            request_id,
            VerdictStatus::Ambiguous,
            fallback,
            Evidence::inconclusive(nearby, Some(reply)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::StaticFeatureIndex;

    #[tokio::test]
    async fn test_rejects_invalid_coordinates() {
        let pipeline = Handshake::new(Arc::new(StaticFeatureIndex::new(vec![])));
        let result = pipeline
            .validate(Coordinates::new(f64::NAN, 36.8), "kiosk")
            .await;
        assert!(matches!(result, Err(InputError::InvalidCoordinates { .. })));
    }

    #[tokio::test]
    async fn test_rejects_blank_landmark() {
        let pipeline = Handshake::new(Arc::new(StaticFeatureIndex::new(vec![])));
        let result = pipeline
            .validate(Coordinates::new(-1.2921, 36.8219), "   ")
            .await;
        assert!(matches!(result, Err(InputError::EmptyLandmarkText)));
    }
}
