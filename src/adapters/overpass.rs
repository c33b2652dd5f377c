//! Overpass API spatial provider.
//!
//! Queries named OSM nodes around the user's pin and maps them into
//! pipeline features, computing distances with the haversine formula.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{Coordinates, Feature};

use super::SpatialProvider;

const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Mean earth radius in meters
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Tag keys tried, in order, for a feature's type
const TYPE_TAGS: [&str; 4] = ["amenity", "shop", "building", "highway"];

/// Spatial provider backed by the Overpass API
pub struct OverpassProvider {
    endpoint: String,
    client: reqwest::Client,
}

/// Top-level Overpass response
#[derive(Debug, Deserialize)]
struct OverpassResponse {
    elements: Vec<OverpassElement>,
}

/// A single OSM node from an Overpass reply
#[derive(Debug, Deserialize)]
struct OverpassElement {
    lat: f64,
    lon: f64,
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

impl Default for OverpassProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl OverpassProvider {
    /// Create a provider against the public Overpass endpoint
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Create a provider against a custom endpoint (self-hosted mirror)
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Render the Overpass QL query for named nodes around a point
    fn build_query(coords: Coordinates, radius_m: f64) -> String {
        format!(
            "[out:json][timeout:10];node(around:{:.1},{},{})[\"name\"];out body 50;",
            radius_m, coords.lat, coords.lon
        )
    }

    /// Convert an OSM node into a pipeline feature
    fn to_feature(origin: Coordinates, element: OverpassElement) -> Option<Feature> {
        let name = element.tags.get("name")?.clone();
        let feature_type = TYPE_TAGS
            .iter()
            .find_map(|key| element.tags.get(*key).cloned());
        let distance = haversine_meters(origin, Coordinates::new(element.lat, element.lon));

        let mut feature = Feature::new(name, distance).with_tags(element.tags);
        feature.feature_type = feature_type;
        Some(feature)
    }
}

#[async_trait]
impl SpatialProvider for OverpassProvider {
    async fn query(
        &self,
        coords: Coordinates,
        max_distance_meters: f64,
    ) -> Result<Vec<Feature>> {
        let query = Self::build_query(coords, max_distance_meters);

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("data", query.as_str())])
            .send()
            .await
            .context("overpass request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("overpass returned status {}", response.status());
        }

        let body: OverpassResponse = response
            .json()
            .await
            .context("failed to parse overpass response")?;

        let mut features: Vec<Feature> = body
            .elements
            .into_iter()
            .filter_map(|e| Self::to_feature(coords, e))
            .filter(|f| f.distance_meters <= max_distance_meters)
            .collect();

        // Closest first so the deterministic matcher prefers nearby hits
        features.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));

        debug!(count = features.len(), "overpass query complete");
        Ok(features)
    }
}

/// Great-circle distance between two points in meters
fn haversine_meters(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}
