//! Best-match selection and folder-to-folder pairing.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use gswap_model::{MatchOptions, MatchPair, MatchResult, NameRecord, SimilarityAlgorithm};
use tracing::{debug, trace};

use crate::score::similarity;
use crate::utils::{lowercase_keywords, passes_keyword_filter};

/// Confidence level categories for displaying match quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfidenceLevel {
    /// Below the medium threshold.
    Low,
    /// At or above the medium threshold.
    Medium,
    /// At or above the high threshold; near-certain.
    High,
}

impl ConfidenceLevel {
    /// High confidence starts here.
    pub const HIGH: f64 = 0.95;
    /// Medium confidence starts here.
    pub const MEDIUM: f64 = 0.80;

    /// Categorizes a score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= Self::HIGH {
            Self::High
        } else if score >= Self::MEDIUM {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Select the best candidate for `source`.
///
/// Candidates failing the keyword filter are skipped without being scored.
/// The first candidate wins ties, and a candidate must beat a score of zero
/// to be considered at all. Returns `None` when the best score is below
/// `threshold`.
pub fn best_match<S: AsRef<str>>(
    source: &str,
    candidates: &[S],
    algorithm: SimilarityAlgorithm,
    threshold: f64,
    keywords: &[String],
) -> Option<MatchResult> {
    let keywords = lowercase_keywords(keywords);
    let mut best_score = 0.0;
    let mut best_index = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let candidate: &str = candidate.as_ref();
        if !passes_keyword_filter(candidate, &keywords) {
            continue;
        }
        let score = similarity(source, candidate, algorithm);
        trace!(source, candidate, score, "scored candidate");
        if score > best_score {
            best_score = score;
            best_index = Some(index);
        }
    }

    let candidate_index = best_index?;
    (best_score >= threshold).then_some(MatchResult {
        candidate_index,
        score: best_score,
    })
}

/// Score every candidate that passes the keyword filter.
///
/// Sorted by descending score; equal scores keep candidate order.
pub fn rank<S: AsRef<str>>(
    source: &str,
    candidates: &[S],
    algorithm: SimilarityAlgorithm,
    keywords: &[String],
) -> Vec<MatchResult> {
    let keywords = lowercase_keywords(keywords);
    let mut results = Vec::with_capacity(candidates.len());
    for (candidate_index, candidate) in candidates.iter().enumerate() {
        let candidate: &str = candidate.as_ref();
        if passes_keyword_filter(candidate, &keywords) {
            results.push(MatchResult {
                candidate_index,
                score: similarity(source, candidate, algorithm),
            });
        }
    }

    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    results
}

/// Several sources that selected the same target.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateTarget {
    pub target: NameRecord,
    pub sources: Vec<NameRecord>,
}

/// Result of pairing one folder against another.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairingResult {
    /// Matched pairs, in source order.
    pub pairs: Vec<MatchPair>,
    /// Sources with no candidate at or above the threshold.
    pub unmatched: Vec<NameRecord>,
    /// Targets chosen by more than one source.
    pub duplicate_targets: Vec<DuplicateTarget>,
}

impl PairingResult {
    pub fn has_duplicates(&self) -> bool {
        !self.duplicate_targets.is_empty()
    }

    /// Returns the count of pairs at each confidence level.
    #[must_use]
    pub fn count_by_level(&self) -> BTreeMap<ConfidenceLevel, usize> {
        let mut counts = BTreeMap::new();
        for pair in &self.pairs {
            *counts
                .entry(ConfidenceLevel::from_score(pair.score))
                .or_insert(0) += 1;
        }
        counts
    }

    /// Returns the mean score among all pairs, if any.
    #[must_use]
    pub fn mean_score(&self) -> Option<f64> {
        if self.pairs.is_empty() {
            return None;
        }
        let sum: f64 = self.pairs.iter().map(|p| p.score).sum();
        Some(sum / self.pairs.len() as f64)
    }
}

/// Engine pairing source names with target names under fixed options.
///
/// # Example
///
/// ```ignore
/// use gswap_match::MatchEngine;
/// use gswap_model::MatchOptions;
///
/// let engine = MatchEngine::new(MatchOptions::default());
/// let result = engine.pair_all(&sources, &targets);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MatchEngine {
    options: MatchOptions,
}

impl MatchEngine {
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    /// Best candidate for a single name.
    pub fn best_match<S: AsRef<str>>(
        &self,
        source: &str,
        candidates: &[S],
    ) -> Option<MatchResult> {
        best_match(
            source,
            candidates,
            self.options.algorithm,
            self.options.threshold,
            &self.options.keywords,
        )
    }

    /// Ranked candidates for a single name, truncated to `limit`.
    pub fn top<S: AsRef<str>>(
        &self,
        source: &str,
        candidates: &[S],
        limit: usize,
    ) -> Vec<MatchResult> {
        let mut ranked = rank(
            source,
            candidates,
            self.options.algorithm,
            &self.options.keywords,
        );
        ranked.truncate(limit);
        ranked
    }

    /// Run [`best_match`] once per source against all targets.
    ///
    /// Sources may select the same target; such collisions are reported in
    /// [`PairingResult::duplicate_targets`] rather than resolved.
    pub fn pair_all(&self, sources: &[NameRecord], targets: &[NameRecord]) -> PairingResult {
        let target_names: Vec<&str> = targets.iter().map(|t| t.name.as_str()).collect();
        let mut result = PairingResult::default();
        let mut chosen: BTreeMap<usize, Vec<usize>> = BTreeMap::new();

        for (source_pos, source) in sources.iter().enumerate() {
            match self.best_match(&source.name, &target_names) {
                Some(found) => {
                    let target = &targets[found.candidate_index];
                    debug!(
                        source = %source.file_name,
                        target = %target.file_name,
                        score = found.score,
                        "paired"
                    );
                    chosen
                        .entry(found.candidate_index)
                        .or_default()
                        .push(source_pos);
                    result.pairs.push(MatchPair {
                        source: source.clone(),
                        target: target.clone(),
                        score: found.score,
                    });
                }
                None => {
                    debug!(source = %source.file_name, "no match above threshold");
                    result.unmatched.push(source.clone());
                }
            }
        }

        for (target_index, source_positions) in chosen {
            if source_positions.len() > 1 {
                result.duplicate_targets.push(DuplicateTarget {
                    target: targets[target_index].clone(),
                    sources: source_positions
                        .into_iter()
                        .map(|pos| sources[pos].clone())
                        .collect(),
                });
            }
        }

        debug!(
            source_count = sources.len(),
            target_count = targets.len(),
            paired = result.pairs.len(),
            unmatched = result.unmatched.len(),
            duplicates = result.duplicate_targets.len(),
            "pairing complete"
        );
        result
    }
}
