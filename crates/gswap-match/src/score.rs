//! String similarity scoring.
//!
//! Every algorithm maps a pair of pre-lowercased names to a score in
//! `[0, 1]`. Degenerate inputs never error: an empty name scores `0.0`
//! against anything, including another empty name.

use std::collections::BTreeSet;

use gswap_model::SimilarityAlgorithm;
use rapidfuzz::distance::jaro;

/// Jaro score at which the Winkler prefix bonus starts to apply.
pub const WINKLER_BOOST_THRESHOLD: f64 = 0.7;
/// Bonus weight per shared leading character.
pub const WINKLER_PREFIX_SCALE: f64 = 0.1;
/// Maximum number of leading characters that earn the bonus.
pub const WINKLER_MAX_PREFIX: usize = 4;

/// Score two names with the selected algorithm.
pub fn similarity(a: &str, b: &str, algorithm: SimilarityAlgorithm) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let score = match algorithm {
        SimilarityAlgorithm::Sequential => sequential(a, b),
        SimilarityAlgorithm::Fuzzy => jaro_winkler(a, b),
        SimilarityAlgorithm::LongestConsecutiveSubstring => longest_substring(a, b),
        SimilarityAlgorithm::TokenJaccard => token_jaccard(a, b),
    };

    score.clamp(0.0, 1.0)
}

/// Score two names with every algorithm, in [`SimilarityAlgorithm::ALL`] order.
pub fn similarity_all(a: &str, b: &str) -> Vec<(SimilarityAlgorithm, f64)> {
    SimilarityAlgorithm::ALL
        .iter()
        .map(|&algorithm| (algorithm, similarity(a, b, algorithm)))
        .collect()
}

/// Shared prefix over the longer length.
///
/// When one name contains the other, `min_len / max_len` is also
/// considered and the larger of the two wins.
pub fn sequential(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let (len_a, len_b) = (a.chars().count(), b.chars().count());
    let max_len = len_a.max(len_b);
    if max_len == 0 {
        return 0.0;
    }

    let prefix_score = common_prefix_len(a, b) as f64 / max_len as f64;
    if a.contains(b) || b.contains(a) {
        let containment_score = len_a.min(len_b) as f64 / max_len as f64;
        prefix_score.max(containment_score)
    } else {
        prefix_score
    }
}

/// Jaro-Winkler similarity.
///
/// The base Jaro score uses a matching window of `max_len / 2 - 1`. The
/// prefix bonus is only added once the base score reaches
/// [`WINKLER_BOOST_THRESHOLD`].
pub fn jaro_winkler(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // Greedy window matching depends on argument order for equal-length
    // inputs; a canonical order keeps the score symmetric.
    let (first, second) = if (a.chars().count(), a) <= (b.chars().count(), b) {
        (a, b)
    } else {
        (b, a)
    };
    let base = jaro::similarity(first.chars(), second.chars());

    if base < WINKLER_BOOST_THRESHOLD {
        return base;
    }

    let prefix = common_prefix_len(a, b).min(WINKLER_MAX_PREFIX) as f64;
    base + prefix * WINKLER_PREFIX_SCALE * (1.0 - base)
}

/// Longest common substring (contiguous) over the longer length.
pub fn longest_substring(a: &str, b: &str) -> f64 {
    if a == b {
        return if a.is_empty() { 0.0 } else { 1.0 };
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let max_len = a.len().max(b.len());
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    longest_common_substring_len(&a, &b) as f64 / max_len as f64
}

/// Length of the longest run shared by both sequences.
///
/// Classic O(n·m) table, kept as two rolling rows.
pub fn longest_common_substring_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    let mut best = 0;

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb { prev[j] + 1 } else { 0 };
            best = best.max(curr[j + 1]);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}

/// Jaccard index over word tokens.
///
/// Returns `0.0` when either side has no tokens, even if the inputs are equal.
pub fn token_jaccard(a: &str, b: &str) -> f64 {
    let left = tokenize(a);
    let right = tokenize(b);
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let intersection = left.intersection(&right).count();
    let union = left.union(&right).count();
    intersection as f64 / union as f64
}

/// Split on runs of non-word characters and case-fold the pieces.
///
/// Word characters are alphanumerics and `_`.
pub fn tokenize(s: &str) -> BTreeSet<String> {
    s.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Number of leading characters the two names share.
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}
