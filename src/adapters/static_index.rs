//! File- and memory-backed spatial provider.
//!
//! Serves a fixed feature list, filtering by distance at query time.
//! Useful for tests, demos, and pre-geocoded delivery zones where the
//! feature set is known ahead of time.

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use crate::domain::{Coordinates, Feature};

use super::SpatialProvider;

/// Spatial provider backed by a static feature list
pub struct StaticFeatureIndex {
    features: Vec<Feature>,
}

impl StaticFeatureIndex {
    /// Create an index over an in-memory feature list
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Load an index from a JSON file containing an array of features.
    ///
    /// Rejects features with negative distances at load time so the
    /// pipeline never sees them.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read feature index {}", path.display()))?;

        let features: Vec<Feature> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse feature index {}", path.display()))?;

        if let Some(bad) = features.iter().find(|f| f.distance_meters < 0.0) {
            anyhow::bail!(
                "feature '{}' has negative distance {}",
                bad.name,
                bad.distance_meters
            );
        }

        debug!(count = features.len(), path = %path.display(), "loaded feature index");
        Ok(Self::new(features))
    }

    /// Number of features in the index
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[async_trait]
impl SpatialProvider for StaticFeatureIndex {
    async fn query(
        &self,
        _coords: Coordinates,
        max_distance_meters: f64,
    ) -> Result<Vec<Feature>> {
        Ok(self
            .features
            .iter()
            .filter(|f| f.distance_meters <= max_distance_meters)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn coords() -> Coordinates {
        Coordinates::new(-1.2921, 36.8219)
    }

    #[tokio::test]
    async fn test_query_filters_by_distance() {
        let index = StaticFeatureIndex::new(vec![
            Feature::new("Near Kiosk", 12.0),
            Feature::new("Far Tower", 250.0),
        ]);

        let features = index.query(coords(), 100.0).await.unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].name, "Near Kiosk");
    }

    #[tokio::test]
    async fn test_load_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"name": "Mama Amina Kiosk", "type": "kiosk", "distance": 12}},
                {{"name": "Fuel Station", "type": "fuel", "distance": 30}}
            ]"#
        )
        .unwrap();

        let index = StaticFeatureIndex::from_json_file(file.path()).await.unwrap();
        assert_eq!(index.len(), 2);

        let features = index.query(coords(), 100.0).await.unwrap();
        assert_eq!(features[0].name, "Mama Amina Kiosk");
        assert_eq!(features[1].feature_type.as_deref(), Some("fuel"));
    }

    #[tokio::test]
    async fn test_negative_distance_rejected_at_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name": "Broken", "distance": -5}}]"#).unwrap();

        let result = StaticFeatureIndex::from_json_file(file.path()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();

        assert!(StaticFeatureIndex::from_json_file(file.path()).await.is_err());
    }
}
