//! command.rs - Parser for sed-style `s<sep>old<sep>new<sep>[g]` commands.
//!
//! The character right after the leading `s` is the separator for the rest of
//! the command. A separator preceded by an odd number of backslashes is part of
//! the field; `\\` is an escaped backslash. Fields are returned exactly as
//! written, escapes included.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::Regex;
use serde::Serialize;

/// A successfully parsed replace command. Transient; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedCommand {
    pub separator: char,
    /// Leading inline flag group such as `(?i)`, if present.
    pub flags: Option<String>,
    pub old_pattern: String,
    pub new_text: String,
    /// True when the command ends with `g`.
    pub global_flag: bool,
}

/// Parses `input` as `s<sep>[(?flags)]old<sep>new<sep>[g]`.
///
/// Returns `None` unless the whole input matches. Both fields must be
/// non-empty. The old pattern is not checked for validity.
///
/// ```
/// use regsub_core::parse_replace_command;
///
/// let cmd = parse_replace_command("s/foo/bar/").unwrap();
/// assert_eq!(cmd.old_pattern, "foo");
/// assert_eq!(cmd.new_text, "bar");
/// assert!(!cmd.global_flag);
///
/// assert!(parse_replace_command("s/foo/bar").is_none());
/// ```
pub fn parse_replace_command(input: &str) -> Option<ParsedCommand> {
    let mut chars = input.chars();
    if chars.next() != Some('s') {
        return None;
    }
    let separator = chars.next()?;

    let grammar = command_grammar(separator);
    let Some(caps) = grammar.captures(input) else {
        debug!("Input does not match the replace grammar for separator {:?}.", separator);
        return None;
    };

    Some(ParsedCommand {
        separator,
        flags: caps.get(1).map(|m| m.as_str().to_string()),
        old_pattern: caps.get(2)?.as_str().to_string(),
        new_text: caps.get(3)?.as_str().to_string(),
        global_flag: caps.get(4).is_some_and(|m| !m.as_str().is_empty()),
    })
}

/// Builds the anchored grammar for one separator. The separator is escaped, so
/// metacharacters like `|` or `.` act as plain delimiters.
fn command_grammar(separator: char) -> Regex {
    let sep = regex::escape(&separator.to_string());
    let field = r"(.*?[^\\](?:\\\\)*)";
    let pattern = format!(r"^s{sep}(\(\?[a-zA-Z]+\))?{field}{sep}{field}{sep}(g?)$");
    // Only the escaped separator varies, so the grammar always compiles.
    Regex::new(&pattern).unwrap()
}
