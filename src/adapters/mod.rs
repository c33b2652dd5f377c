//! Collaborator contracts for external systems.
//!
//! The pipeline talks to exactly two kinds of collaborators: a spatial
//! feature source and an optional language-model disambiguator. Both are
//! injected behind these traits; concrete adapters live in this module.

pub mod mock;
pub mod overpass;
pub mod static_index;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{Coordinates, Feature};

pub use mock::{FixedReplyDisambiguator, MockDisambiguator};
pub use overpass::OverpassProvider;
pub use static_index::StaticFeatureIndex;

/// Source of nearby map features
#[async_trait]
pub trait SpatialProvider: Send + Sync {
    /// Return features near `coords`, expected to be within
    /// `max_distance_meters`. Callers defensively tolerate providers that
    /// return more.
    async fn query(&self, coords: Coordinates, max_distance_meters: f64)
        -> Result<Vec<Feature>>;
}

/// Language-model-backed disambiguator.
///
/// Absence of this collaborator is a valid configuration: the pipeline
/// skips disambiguation entirely and goes straight to the fallback.
#[async_trait]
pub trait Disambiguator: Send + Sync {
    /// Generate a free-text reply for a rendered prompt
    async fn generate(&self, prompt: &str) -> Result<String>;
}
