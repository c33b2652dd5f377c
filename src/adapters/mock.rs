//! Mock disambiguators for tests and demos.
//!
//! `MockDisambiguator` mimics a real model deterministically: it inspects
//! the rendered prompt and returns a canned JSON reply. `FixedReplyDisambiguator`
//! returns one configured reply verbatim, which makes threshold and
//! parse-failure cases easy to stage.

use anyhow::Result;
use async_trait::async_trait;

use super::Disambiguator;

/// Keyword-scripted disambiguator with deterministic canned replies
#[derive(Default)]
pub struct MockDisambiguator;

#[async_trait]
impl Disambiguator for MockDisambiguator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let lower = prompt.to_lowercase();

        if lower.contains("mama") || lower.contains("amina") {
            return Ok(serde_json::json!({
                "plausible": true,
                "confidence": 0.9,
                "instruction":
                    "Entrance: next to 'Mama Amina Kiosk' (blue sign). Call customer on arrival."
            })
            .to_string());
        }

        if lower.contains("fuel") || lower.contains("station") {
            return Ok(serde_json::json!({
                "plausible": true,
                "confidence": 0.8,
                "instruction":
                    "Landmark: fuel station canopy. Park near the pump and call the customer."
            })
            .to_string());
        }

        Ok(serde_json::json!({
            "plausible": false,
            "confidence": 0.4,
            "instruction":
                "Closest named feature: 'Fuel Station' ~30m. Request photo or confirm landmark."
        })
        .to_string())
    }
}

/// Disambiguator that always returns the same reply text
pub struct FixedReplyDisambiguator {
    reply: String,
}

impl FixedReplyDisambiguator {
    pub fn new(reply: impl Into<String>) -> Self {
        Self { reply: reply.into() }
    }
}

#[async_trait]
impl Disambiguator for FixedReplyDisambiguator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.reply.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replies_track_prompt_keywords() {
        let mock = MockDisambiguator;

        let fuel = mock.generate("user mentioned a fuel station").await.unwrap();
        assert!(fuel.contains("canopy"));

        let amina = mock.generate("looking for mama amina").await.unwrap();
        assert!(amina.contains("Mama Amina"));

        let other = mock.generate("nothing recognizable").await.unwrap();
        assert!(other.contains("\"plausible\":false"));
    }

    #[tokio::test]
    async fn test_fixed_reply_is_verbatim() {
        let fixed = FixedReplyDisambiguator::new("not json");
        assert_eq!(fixed.generate("anything").await.unwrap(), "not json");
    }
}
