//! Critique parsing: free-text AI critique in, scored `StructuredCritique` out.
//!
//! Pure and synchronous. The only nondeterminism is the fallback score,
//! drawn from an RNG the caller passes in.

pub mod grammar;
pub mod models;
pub mod parser;
pub mod tiering;

pub use models::{ImprovementSuggestions, ParseFailure, StructuredCritique, Suggestion};
pub use parser::{CritiqueParser, OutOfRangePolicy};
