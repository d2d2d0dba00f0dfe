pub mod algorithm;
pub mod error;
pub mod guid;
pub mod options;
pub mod plan;
pub mod record;

pub use algorithm::SimilarityAlgorithm;
pub use error::{ModelError, Result};
pub use guid::Guid;
pub use options::{DEFAULT_THRESHOLD, MatchOptions, parse_keywords};
pub use plan::{SwapEntry, SwapPlan};
pub use record::{MatchPair, MatchResult, NameRecord};
