//! simplifier.rs - Reduces a regex pattern to its literal "skeleton".
//!
//! The skeleton is what is left of a pattern once inline groups, whitespace,
//! optional atoms, character classes, structural metacharacters and a handful of
//! class escapes are stripped. It is a comparison key, not a regex: the
//! similarity and broadness checks both work on it.
//!
//! The passes run in a fixed order and each one sees the output of the previous
//! one, so the result is not idempotent in general.
//!
//! License: MIT OR APACHE 2.0

use once_cell::sync::Lazy;
use regex::Regex;

/// `(?...)` spans: inline flags and non-capturing group openers, up to the first `)`.
static INLINE_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\?[^)]*\)").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Any character followed by `?`. Also eats the literal the quantifier applies to.
static OPTIONAL_ATOM: Lazy<Regex> = Lazy::new(|| Regex::new(r".\?").unwrap());

static CHAR_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]").unwrap());

static CLASS_ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\[bSDWBQEs]").unwrap());

/// Metacharacters removed by the structural pass when they are not escaped.
const STRUCTURAL_METACHARS: [char; 12] =
    ['.', '?', '+', '*', '{', '}', ')', '(', '[', ']', '^', '$'];

/// Returns the literal skeleton of `pattern`.
///
/// Never fails: empty or purely structural input yields an empty string.
///
/// ```
/// use regsub_core::simplify;
///
/// assert_eq!(simplify("(?i)hello"), "hello");
/// assert_eq!(simplify("a.b?c[xyz]d"), "acd");
/// ```
pub fn simplify(pattern: &str) -> String {
    let skeleton = INLINE_GROUP.replace_all(pattern, "");
    let skeleton = WHITESPACE.replace_all(&skeleton, "");
    let skeleton = OPTIONAL_ATOM.replace_all(&skeleton, "");
    let skeleton = CHAR_CLASS.replace_all(&skeleton, "");
    let skeleton = strip_unescaped_metachars(&skeleton);
    CLASS_ESCAPE.replace_all(&skeleton, "").into_owned()
}

/// Drops structural metacharacters, keeping any character that follows a backslash.
///
/// `\\` is consumed as one escaped backslash, so in `\\.` the dot is unescaped.
fn strip_unescaped_metachars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            out.push(c);
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else if !STRUCTURAL_METACHARS.contains(&c) {
            out.push(c);
        }
    }
    out
}
