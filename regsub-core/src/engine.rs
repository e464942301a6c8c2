// regsub-core/src/engine.rs
//! Applies the stored replacement rules to a piece of text.
//!
//! Each table entry is compiled once into a [`CompiledReplacement`]; the rules
//! then run one after the other, in table order, each over the output of the
//! previous one. `$1`, `$2`, ... in the replacement text expand to the
//! corresponding capture group; everything else is inserted literally,
//! including `$n` for a group the pattern does not have.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::errors::RegsubError;
use crate::table::ReplacementTable;
use crate::validators::compile_pattern;

/// A `$` followed by an optional group number.
static GROUP_REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$([0-9]+)?").unwrap());

#[derive(Debug)]
pub struct CompiledReplacement {
    pub pattern: String,
    pub regex: Regex,
    pub replace_with: String,
    /// `replace_with` rewritten into `regex` expansion syntax.
    expansion: String,
}

impl CompiledReplacement {
    pub fn new(pattern: String, regex: Regex, replace_with: String) -> Self {
        let expansion = expansion_template(&replace_with, regex.captures_len());
        Self {
            pattern,
            regex,
            replace_with,
            expansion,
        }
    }

    /// Replaces every match of this rule in `text`.
    pub fn apply(&self, text: &str) -> String {
        self.regex
            .replace_all(text, self.expansion.as_str())
            .into_owned()
    }
}

/// Compiles every rule in `table`, in order.
///
/// Stored keys are validated on insertion, so a failure here means the
/// backing store was edited by hand.
pub fn compile_table<T: ReplacementTable + ?Sized>(
    table: &T,
) -> Result<Vec<CompiledReplacement>, RegsubError> {
    debug!("Starting compilation of {} replacements.", table.len());
    table
        .entries()
        .into_iter()
        .map(|(pattern, entry)| {
            let regex = compile_pattern(&pattern)?;
            Ok(CompiledReplacement::new(pattern, regex, entry.text))
        })
        .collect()
}

/// Runs `rules` over `text` in order.
pub fn apply_replacements(rules: &[CompiledReplacement], text: &str) -> String {
    rules.iter().fold(text.to_string(), |acc, rule| {
        let replaced = rule.apply(&acc);
        if replaced != acc {
            debug!("Rule '{}' rewrote the text.", rule.pattern);
        }
        replaced
    })
}

/// Rewrites `$n` as `${n}` when `1 <= n < group_count` and escapes every
/// other `$`, so the expansion done by `Regex::replace_all` touches only real
/// group references and never re-reads captured text.
fn expansion_template(template: &str, group_count: usize) -> String {
    GROUP_REFERENCE
        .replace_all(template, |caps: &Captures| {
            let group = caps
                .get(1)
                .and_then(|digits| digits.as_str().parse::<usize>().ok())
                .filter(|n| (1..group_count).contains(n));
            match group {
                Some(n) => format!("${{{}}}", n),
                None => format!("${}", &caps[0]),
            }
        })
        .into_owned()
}
