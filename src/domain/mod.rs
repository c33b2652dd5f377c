//! Data structures for the handshake pipeline.
//!
//! - `feature`: spatial inputs (Coordinates, Feature)
//! - `disambiguation`: payloads exchanged with the disambiguator
//! - `verdict`: pipeline output (Verdict, VerdictStatus, Evidence)

pub mod disambiguation;
pub mod feature;
pub mod verdict;

pub use disambiguation::{DisambiguationContext, ParsedDisambiguation};
pub use feature::{Coordinates, Feature};
pub use verdict::{Evidence, Verdict, VerdictStatus};
