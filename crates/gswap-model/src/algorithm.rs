//! Similarity algorithm selector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Algorithm used to score one name against another.
///
/// A pure selector: it carries no state, the scoring itself lives in
/// `gswap-match`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimilarityAlgorithm {
    /// Shared prefix length over the longer length, bumped for containment.
    Sequential,
    /// Jaro-Winkler similarity.
    #[default]
    Fuzzy,
    /// Longest common substring over the longer length.
    #[serde(rename = "longest-substring")]
    LongestConsecutiveSubstring,
    /// Jaccard index over word tokens.
    TokenJaccard,
}

impl SimilarityAlgorithm {
    /// All algorithms in display order.
    pub const ALL: [SimilarityAlgorithm; 4] = [
        SimilarityAlgorithm::Sequential,
        SimilarityAlgorithm::Fuzzy,
        SimilarityAlgorithm::LongestConsecutiveSubstring,
        SimilarityAlgorithm::TokenJaccard,
    ];

    /// Canonical identifier, as accepted on the command line and in plan files.
    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityAlgorithm::Sequential => "sequential",
            SimilarityAlgorithm::Fuzzy => "fuzzy",
            SimilarityAlgorithm::LongestConsecutiveSubstring => "longest-substring",
            SimilarityAlgorithm::TokenJaccard => "token-jaccard",
        }
    }

    /// One-line description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            SimilarityAlgorithm::Sequential => {
                "shared prefix over longer length; containment scores min/max length"
            }
            SimilarityAlgorithm::Fuzzy => {
                "Jaro-Winkler: common characters in a window plus a prefix bonus"
            }
            SimilarityAlgorithm::LongestConsecutiveSubstring => {
                "longest common substring over longer length"
            }
            SimilarityAlgorithm::TokenJaccard => "shared word tokens over all word tokens",
        }
    }
}

impl FromStr for SimilarityAlgorithm {
    type Err = ModelError;

    /// Parse an algorithm name (case-insensitive, with common aliases).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");

        match normalized.as_str() {
            "sequential" | "prefix" => Ok(SimilarityAlgorithm::Sequential),
            "fuzzy" | "jaro-winkler" | "jarowinkler" | "jw" => Ok(SimilarityAlgorithm::Fuzzy),
            "longest-substring" | "longest-consecutive-substring" | "lcs" => {
                Ok(SimilarityAlgorithm::LongestConsecutiveSubstring)
            }
            "token-jaccard" | "jaccard" | "tokens" => Ok(SimilarityAlgorithm::TokenJaccard),
            _ => Err(ModelError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for SimilarityAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
