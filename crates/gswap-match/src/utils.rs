//! Utility functions for matching.

/// Lowercases keywords and drops blank entries.
pub fn lowercase_keywords(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// True when `keywords` is empty or `candidate` contains any of them.
///
/// Expects keywords already lowercased; the candidate is folded here.
pub fn passes_keyword_filter(candidate: &str, keywords: &[String]) -> bool {
    if keywords.is_empty() {
        return true;
    }
    let candidate = candidate.to_lowercase();
    keywords.iter().any(|k| candidate.contains(k.as_str()))
}
