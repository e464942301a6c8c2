//! similarity.rs - Heuristic overlap check between two regex patterns.
//!
//! Two patterns are compared through their skeletons (see [`crate::simplifier`]).
//! They are similar when the skeletons are equal ignoring case, when a raw
//! pattern finds a match inside a skeleton, or when one skeleton, used as a
//! case-insensitive regex, matches inside the other.
//!
//! The check is approximate: it flags near-duplicate rules and does not
//! prove that two patterns are equivalent.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use serde::{Deserialize, Serialize};

use crate::simplifier::simplify;
use crate::validators::try_compile_case_insensitive;

/// Which skeleton each raw pattern is searched in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityStrategy {
    /// Candidate pattern against the existing skeleton, and vice versa.
    #[default]
    CrossCheck,
    /// Each pattern against its own skeleton. Matches whenever a pattern
    /// matches its own literal residue, which is most plain patterns.
    SelfContainment,
}

/// Returns `true` if `candidate` overlaps `existing` under the default strategy.
///
/// ```
/// use regsub_core::is_similar;
///
/// assert!(is_similar("Hello", "(?i)hello"));
/// assert!(is_similar("foobar", "foo"));
/// assert!(!is_similar("apple", "banana"));
/// ```
pub fn is_similar(candidate: &str, existing: &str) -> bool {
    is_similar_with(candidate, existing, SimilarityStrategy::default())
}

/// Returns `true` if `candidate` overlaps `existing` under `strategy`.
///
/// Equal skeletons (ignoring case) are always similar; `strategy` decides
/// which skeleton each raw pattern is searched in.
pub fn is_similar_with(candidate: &str, existing: &str, strategy: SimilarityStrategy) -> bool {
    let skeleton_a = simplify(candidate);
    let skeleton_b = simplify(existing);

    if skeleton_a.to_lowercase() == skeleton_b.to_lowercase() {
        debug!("'{}' and '{}' share skeleton '{}'.", candidate, existing, skeleton_a);
        return true;
    }

    let (candidate_haystack, existing_haystack) = match strategy {
        SimilarityStrategy::CrossCheck => (&skeleton_b, &skeleton_a),
        SimilarityStrategy::SelfContainment => (&skeleton_a, &skeleton_b),
    };

    if matches_inside(candidate, candidate_haystack) {
        debug!("'{}' matches inside skeleton '{}'.", candidate, candidate_haystack);
        return true;
    }
    if matches_inside(existing, existing_haystack) {
        debug!("'{}' matches inside skeleton '{}'.", existing, existing_haystack);
        return true;
    }

    matches_inside(&skeleton_a, &skeleton_b) || matches_inside(&skeleton_b, &skeleton_a)
}

/// Case-insensitive search of `pattern` in `haystack`. A pattern that does not compile never matches.
fn matches_inside(pattern: &str, haystack: &str) -> bool {
    try_compile_case_insensitive(pattern)
        .map(|regex| regex.is_match(haystack))
        .unwrap_or(false)
}
