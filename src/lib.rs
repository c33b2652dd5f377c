//! handshake - Landmark verification pipeline for delivery handoff
//!
//! Resolves an ambiguous human-written landmark description into a
//! verified, rider-actionable arrival instruction.
//!
//! # Pipeline
//!
//! Per request, strictly sequential:
//! 1. Query the spatial provider around the user's pin
//! 2. Attempt a deterministic text match against nearby features
//! 3. Only on a miss, ask the configured disambiguator and gate its
//!    answer behind a confidence threshold
//! 4. Fall back to the closest named feature (or a photo request)
//!
//! Every outcome is a [`Verdict`] with audit [`Evidence`]; infrastructure
//! faults surface as a `failed` verdict rather than an error.
//!
//! # Modules
//!
//! - `adapters`: collaborator traits and concrete providers (static
//!   index, Overpass, mocks)
//! - `core`: matching, instruction synthesis, prompt rendering, reply
//!   parsing, and the orchestrator
//! - `domain`: data structures (Coordinates, Feature, Verdict, Evidence)
//! - `config`: tunable policy (threshold, prompt cap, radius, timeout)
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use handshake::{Coordinates, Feature, Handshake, StaticFeatureIndex};
//!
//! # async fn example() -> Result<(), handshake::InputError> {
//! let index = StaticFeatureIndex::new(vec![Feature::new("Mama Amina Kiosk", 12.0)]);
//! let pipeline = Handshake::new(Arc::new(index));
//!
//! let verdict = pipeline
//!     .validate(Coordinates::new(-1.2921, 36.8219), "Mama Amina Kiosk")
//!     .await?;
//! assert!(verdict.is_verified());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use adapters::{
    Disambiguator, FixedReplyDisambiguator, MockDisambiguator, OverpassProvider,
    SpatialProvider, StaticFeatureIndex,
};
pub use config::HandshakeConfig;
pub use core::{Handshake, InputError};
pub use domain::{
    Coordinates, DisambiguationContext, Evidence, Feature, ParsedDisambiguation, Verdict,
    VerdictStatus,
};
