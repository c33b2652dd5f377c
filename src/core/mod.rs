//! Verification pipeline internals.
//!
//! `matcher`, `instruction`, `prompt`, and `parser` are pure, side-effect
//! free transformations. `orchestrator` composes them and owns every
//! branching decision.

pub mod instruction;
pub mod matcher;
pub mod orchestrator;
pub mod parser;
pub mod prompt;

pub use orchestrator::{Handshake, InputError};
