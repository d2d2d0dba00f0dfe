//! Name matching for asset folder pairing.
//!
//! Scores file names with one of four string similarity algorithms and picks
//! the best candidate per source name. Everything here is pure: no I/O, no
//! shared state.

mod engine;
pub mod score;
mod utils;

pub use engine::{ConfidenceLevel, DuplicateTarget, MatchEngine, PairingResult, best_match, rank};
pub use score::{similarity, similarity_all};
pub use utils::{lowercase_keywords, passes_keyword_filter};
