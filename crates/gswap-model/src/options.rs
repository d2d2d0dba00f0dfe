//! Matching options shared by the selector, ingest and the CLI.

use serde::{Deserialize, Serialize};

use crate::{ModelError, Result, SimilarityAlgorithm};

/// Default minimum similarity for a candidate to be accepted.
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Options controlling one matching pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Scoring algorithm.
    pub algorithm: SimilarityAlgorithm,
    /// Minimum score (inclusive) for a match.
    pub threshold: f64,
    /// Lowercased keyword filter; empty means no filtering.
    pub keywords: Vec<String>,
    /// Keep file extensions in the names being compared.
    pub keep_extension: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            algorithm: SimilarityAlgorithm::default(),
            threshold: DEFAULT_THRESHOLD,
            keywords: Vec::new(),
            keep_extension: false,
        }
    }
}

impl MatchOptions {
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: SimilarityAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the threshold, rejecting negative or non-finite values.
    pub fn with_threshold(mut self, threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ModelError::InvalidThreshold(threshold.to_string()));
        }
        self.threshold = threshold;
        Ok(self)
    }

    #[must_use]
    pub fn with_keywords(mut self, raw: &str) -> Self {
        self.keywords = parse_keywords(raw);
        self
    }

    #[must_use]
    pub fn with_keep_extension(mut self, keep: bool) -> Self {
        self.keep_extension = keep;
        self
    }
}

/// Split a comma-separated keyword list.
///
/// Entries are trimmed and lowercased; blank entries are dropped.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_lowercase)
        .collect()
}
