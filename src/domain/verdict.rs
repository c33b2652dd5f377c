//! Pipeline output: the verdict and its audit evidence.
//!
//! A verdict is immutable once constructed. The orchestrator is the only
//! writer of `status`; everything else reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::disambiguation::ParsedDisambiguation;
use super::feature::Feature;

/// Outcome of a handshake validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    /// A feature was confirmed, deterministically or via the disambiguator
    Verified,
    /// No confident match; the instruction is a best-effort fallback
    Ambiguous,
    /// Infrastructure fault (provider or disambiguator transport)
    Failed,
}

impl VerdictStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictStatus::Verified => "verified",
            VerdictStatus::Ambiguous => "ambiguous",
            VerdictStatus::Failed => "failed",
        }
    }
}

/// Auditable record of what led to a verdict
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Evidence {
    /// Feature confirmed by the deterministic matcher
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_feature: Option<Feature>,

    /// Structured disambiguator output that was accepted or considered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disambiguation: Option<ParsedDisambiguation>,

    /// Full nearby-feature set passed to disambiguation (not capped)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearby_features: Option<Vec<Feature>>,

    /// Raw disambiguator reply text, kept when it was not accepted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_disambiguator_output: Option<String>,

    /// Infrastructure error for failed verdicts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Evidence {
    /// Evidence for a deterministic match
    pub fn matched(feature: Feature) -> Self {
        Self {
            matched_feature: Some(feature),
            ..Default::default()
        }
    }

    /// Evidence for an accepted disambiguator answer
    pub fn disambiguated(parsed: ParsedDisambiguation, nearby: Vec<Feature>) -> Self {
        Self {
            disambiguation: Some(parsed),
            nearby_features: Some(nearby),
            ..Default::default()
        }
    }

    /// Evidence for a rejected or unusable disambiguator answer
    pub fn inconclusive(nearby: Vec<Feature>, raw_output: Option<String>) -> Self {
        Self {
            nearby_features: Some(nearby),
            raw_disambiguator_output: raw_output,
            ..Default::default()
        }
    }

    /// Evidence for an infrastructure failure
    pub fn fault(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

/// Final pipeline output returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    /// Request id for log correlation
    pub request_id: uuid::Uuid,

    /// Outcome of the validation
    pub status: VerdictStatus,

    /// Rider-actionable instruction, never empty for verified verdicts
    pub instruction: String,

    /// Audit record of the inputs/outputs behind the decision
    pub evidence: Evidence,

    /// When the verdict was constructed
    pub decided_at: DateTime<Utc>,
}

impl Verdict {
    pub fn new(
        request_id: uuid::Uuid,
        status: VerdictStatus,
        instruction: impl Into<String>,
        evidence: Evidence,
    ) -> Self {
        Self {
            request_id,
            status,
            instruction: instruction.into(),
            evidence,
            decided_at: Utc::now(),
        }
    }

    pub fn is_verified(&self) -> bool {
        self.status == VerdictStatus::Verified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&VerdictStatus::Verified).unwrap();
        assert_eq!(json, "\"verified\"");
        assert_eq!(VerdictStatus::Ambiguous.as_str(), "ambiguous");
        assert_eq!(VerdictStatus::Failed.as_str(), "failed");
    }

    #[test]
    fn test_evidence_omits_absent_fields() {
        let evidence = Evidence::matched(Feature::new("Kiosk", 12.0));
        let json = serde_json::to_value(&evidence).unwrap();

        assert!(json.get("matched_feature").is_some());
        assert!(json.get("nearby_features").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_fault_evidence_carries_error() {
        let evidence = Evidence::fault("overpass: connection refused");
        assert_eq!(
            evidence.error.as_deref(),
            Some("overpass: connection refused")
        );
        assert!(evidence.matched_feature.is_none());
    }
}
