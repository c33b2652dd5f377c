//! Spatial input types: user coordinates and nearby map features.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A user-reported geographic location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees, [-90, 90]
    pub lat: f64,

    /// Longitude in degrees, [-180, 180]
    pub lon: f64,
}

impl Coordinates {
    /// Create coordinates from latitude and longitude
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Check that both components are finite and within range
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// A nearby known place or entrance returned by a spatial provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Feature name as known to the spatial source
    pub name: String,

    /// Feature kind (e.g. "kiosk", "fuel_station")
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub feature_type: Option<String>,

    /// Distance from the user's pin in meters, never negative
    #[serde(rename = "distance")]
    pub distance_meters: f64,

    /// Free-text description, preferred over the name when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Raw source tags. BTreeMap so "first tag value" is deterministic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
}

impl Feature {
    /// Create a named feature at a given distance
    pub fn new(name: impl Into<String>, distance_meters: f64) -> Self {
        Self {
            name: name.into(),
            feature_type: None,
            distance_meters,
            description: None,
            tags: None,
        }
    }

    /// Set the feature type
    pub fn with_type(mut self, feature_type: impl Into<String>) -> Self {
        self.feature_type = Some(feature_type.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the source tags
    pub fn with_tags(mut self, tags: BTreeMap<String, String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Distance rounded to whole meters, clamped at zero
    pub fn rounded_distance(&self) -> i64 {
        self.distance_meters.max(0.0).round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinates::new(-1.2921, 36.8219).is_valid());
        assert!(Coordinates::new(90.0, 180.0).is_valid());

        assert!(!Coordinates::new(f64::NAN, 36.8).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -180.5).is_valid());
    }

    #[test]
    fn test_rounded_distance() {
        assert_eq!(Feature::new("Kiosk", 12.4).rounded_distance(), 12);
        assert_eq!(Feature::new("Kiosk", 12.5).rounded_distance(), 13);
        assert_eq!(Feature::new("Kiosk", 0.0).rounded_distance(), 0);
    }

    #[test]
    fn test_feature_serde_field_names() {
        let feature = Feature::new("Fuel Station", 30.0).with_type("fuel");
        let json = serde_json::to_value(&feature).unwrap();

        assert_eq!(json["name"], "Fuel Station");
        assert_eq!(json["type"], "fuel");
        assert_eq!(json["distance"], 30.0);
        // Absent optionals are omitted entirely
        assert!(json.get("description").is_none());
    }
}
