// File: regsub-core/src/validators.rs
//! Admission checks for candidate pattern keys.
//!
//! A pattern may only enter the replacement table if it compiles in the
//! target engine and its skeleton is long enough not to match arbitrary text.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::errors::RegsubError;
use crate::simplifier::simplify;

/// Skeletons shorter than this are considered catch-all patterns.
pub const MIN_SKELETON_LEN: usize = 3;

/// Upper bound on the compiled size of a stored pattern.
pub const COMPILED_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Returns `true` if `pattern` would match too much text to be registered.
///
/// # Examples
///
/// ```
/// use regsub_core::is_too_broad;
///
/// assert!(is_too_broad("ab"));
/// assert!(!is_too_broad("abc"));
/// ```
pub fn is_too_broad(pattern: &str) -> bool {
    is_too_broad_with(pattern, MIN_SKELETON_LEN)
}

/// Same as [`is_too_broad`] with an explicit minimum skeleton length.
pub fn is_too_broad_with(pattern: &str, min_skeleton_len: usize) -> bool {
    let skeleton_len = simplify(pattern).chars().count();
    debug!(
        "Pattern '{}' has skeleton length {} (minimum {}).",
        pattern, skeleton_len, min_skeleton_len
    );
    skeleton_len < min_skeleton_len
}

/// Compiles `pattern` the way stored keys are compiled, reporting failures as `InvalidPattern`.
pub fn compile_pattern(pattern: &str) -> Result<Regex, RegsubError> {
    RegexBuilder::new(pattern)
        .size_limit(COMPILED_SIZE_LIMIT)
        .build()
        .map_err(|e| RegsubError::InvalidPattern(pattern.to_string(), e))
}

/// Compiles `pattern` case-insensitively, returning `None` instead of an error.
///
/// Skeletons are frequently not valid regexes on their own; callers treat a
/// failed compile as "no match".
pub(crate) fn try_compile_case_insensitive(pattern: &str) -> Option<Regex> {
    match RegexBuilder::new(pattern)
        .case_insensitive(true)
        .size_limit(COMPILED_SIZE_LIMIT)
        .build()
    {
        Ok(regex) => Some(regex),
        Err(e) => {
            debug!("'{}' does not compile as a regex: {}", pattern, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadness_threshold() {
        assert!(is_too_broad("ab"));
        assert!(!is_too_broad("abc"));
        assert!(is_too_broad(""));
        assert!(is_too_broad(".*"));
        assert!(is_too_broad("[a-z]+x"));
    }

    #[test]
    fn test_broadness_counts_skeleton_not_pattern() {
        // Skeleton of "^colou?r$" is "color".
        assert!(!is_too_broad("^colou?r$"));
        // Skeleton of "a?b?c" is "c".
        assert!(is_too_broad("a?b?c"));
    }

    #[test]
    fn test_broadness_custom_threshold() {
        assert!(!is_too_broad_with("ab", 2));
        assert!(is_too_broad_with("abcd", 5));
    }

    #[test]
    fn test_broadness_counts_chars_not_bytes() {
        assert!(is_too_broad("éé"));
        assert!(!is_too_broad("ééé"));
    }

    #[test]
    fn test_compile_pattern_reports_invalid() {
        assert!(compile_pattern("fo+").is_ok());
        match compile_pattern("(unclosed") {
            Err(RegsubError::InvalidPattern(p, _)) => assert_eq!(p, "(unclosed"),
            other => panic!("expected InvalidPattern, got {:?}", other),
        }
    }

    #[test]
    fn test_lookaround_is_invalid_in_target_engine() {
        assert!(compile_pattern("foo(?=bar)").is_err());
    }

    #[test]
    fn test_try_compile_case_insensitive() {
        let re = try_compile_case_insensitive("hello").unwrap();
        assert!(re.is_match("say HELLO"));
        assert!(try_compile_case_insensitive("a)").is_none());
    }
}
