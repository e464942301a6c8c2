//! manager.rs - Add, edit, remove, list and apply replacement rules.
//!
//! [`ReplacementManager`] owns an injected [`ReplacementTable`] and
//! [`PermissionOracle`] and runs every admission check before it writes.
//! Each mutating call is a check-then-write sequence against the table; the
//! caller must make sure no other writer touches the same table meanwhile.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::command::{parse_replace_command, ParsedCommand};
use crate::engine::{apply_replacements, compile_table};
use crate::errors::RegsubError;
use crate::permissions::{Capability, PermissionOracle};
use crate::similarity::{is_similar_with, SimilarityStrategy};
use crate::simplifier::simplify;
use crate::table::{ReplacementEntry, ReplacementTable};
use crate::validators::{compile_pattern, is_too_broad_with, MIN_SKELETON_LEN};

/// Leading `(?...)` group, optionally right after an opening backtick.
static LEADING_INLINE_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(`)?\(\?[^)]*\)").unwrap());

/// Tunables for the admission checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerPolicy {
    pub similarity: SimilarityStrategy,
    pub min_skeleton_len: usize,
}

impl Default for ManagerPolicy {
    fn default() -> Self {
        Self {
            similarity: SimilarityStrategy::default(),
            min_skeleton_len: MIN_SKELETON_LEN,
        }
    }
}

/// Diagnostic view of how a pattern would fare against the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternReport {
    pub pattern: String,
    pub skeleton: String,
    /// Compile error message, if the pattern is invalid.
    pub invalid: Option<String>,
    pub too_broad: bool,
    pub exists: bool,
    /// Stored keys the pattern is similar to, in table order.
    pub similar_to: Vec<String>,
}

/// Admission rules and ownership checks on top of a replacement table.
///
/// Mutating calls persist the table before returning. The caller must make
/// sure only one manager writes a given table at a time.
#[derive(Debug)]
pub struct ReplacementManager<T, P> {
    table: T,
    permissions: P,
    policy: ManagerPolicy,
}

impl<T: ReplacementTable, P: PermissionOracle> ReplacementManager<T, P> {
    /// Creates a manager with the default policy.
    pub fn new(table: T, permissions: P) -> Self {
        Self::with_policy(table, permissions, ManagerPolicy::default())
    }

    /// Creates a manager with an explicit similarity strategy and broadness threshold.
    pub fn with_policy(table: T, permissions: P, policy: ManagerPolicy) -> Self {
        Self {
            table,
            permissions,
            policy,
        }
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn into_table(self) -> T {
        self.table
    }

    pub fn policy(&self) -> ManagerPolicy {
        self.policy
    }

    /// Registers a new rule from a `s/old/new/` command, owned by `user_id`.
    ///
    /// Checks, in order: grammar, compilability, exact key, broadness,
    /// similarity to every stored key.
    pub fn add(&mut self, input: &str, user_id: &str) -> Result<ParsedCommand, RegsubError> {
        let cmd = parse_replace_command(input).ok_or(RegsubError::ParseError)?;
        let pattern = cmd.old_pattern.as_str();
        compile_pattern(pattern)?;

        if self.table.contains(pattern) {
            return Err(RegsubError::AlreadyExists(pattern.to_string()));
        }
        if is_too_broad_with(pattern, self.policy.min_skeleton_len) {
            return Err(RegsubError::TooBroad(pattern.to_string()));
        }
        if let Some((existing, entry)) = self.find_similar(pattern) {
            return Err(RegsubError::DuplicateOrSimilar {
                existing,
                replacement: entry.text,
            });
        }

        self.table
            .set(pattern, ReplacementEntry::new(cmd.new_text.as_str(), user_id));
        self.table.persist()?;
        info!("User '{}' added replacement '{}' -> '{}'.", user_id, pattern, cmd.new_text);
        Ok(cmd)
    }

    /// Replaces the text of an existing rule. The editor becomes the owner.
    pub fn edit(&mut self, input: &str, user_id: &str) -> Result<ParsedCommand, RegsubError> {
        let cmd = parse_replace_command(input).ok_or(RegsubError::ParseError)?;
        let pattern = cmd.old_pattern.as_str();
        compile_pattern(pattern)?;

        if is_too_broad_with(pattern, self.policy.min_skeleton_len) {
            return Err(RegsubError::TooBroad(pattern.to_string()));
        }
        self.authorize("edit", pattern, user_id)?;

        self.table
            .set(pattern, ReplacementEntry::new(cmd.new_text.as_str(), user_id));
        self.table.persist()?;
        info!("User '{}' edited replacement '{}' -> '{}'.", user_id, pattern, cmd.new_text);
        Ok(cmd)
    }

    /// Deletes a rule by key and returns the removed key and entry.
    ///
    /// A leading `(?...)` group is ignored, and a key wrapped in backticks is
    /// tried unwrapped if the wrapped form is not stored.
    pub fn remove(
        &mut self,
        pattern: &str,
        user_id: &str,
    ) -> Result<(String, ReplacementEntry), RegsubError> {
        let key = self.resolve_key(pattern)?;
        self.authorize("delete", &key, user_id)?;

        let entry = self
            .table
            .delete(&key)
            .ok_or_else(|| RegsubError::NotFound(key.clone()))?;
        self.table.persist()?;
        info!("User '{}' removed replacement '{}'.", user_id, key);
        Ok((key, entry))
    }

    /// All rules in table order.
    pub fn list(&self) -> Vec<(String, ReplacementEntry)> {
        self.table.entries()
    }

    /// Runs every stored rule over `text`, in table order.
    pub fn apply(&self, text: &str) -> Result<String, RegsubError> {
        let rules = compile_table(&self.table)?;
        Ok(apply_replacements(&rules, text))
    }

    /// First stored key (in table order) that `pattern` is similar to.
    pub fn find_similar(&self, pattern: &str) -> Option<(String, ReplacementEntry)> {
        self.table
            .entries()
            .into_iter()
            .find(|(key, _)| is_similar_with(pattern, key, self.policy.similarity))
    }

    /// Evaluates every admission check for `pattern` without stopping at the first failure.
    pub fn check(&self, pattern: &str) -> PatternReport {
        let similar_to = self
            .table
            .keys()
            .into_iter()
            .filter(|key| is_similar_with(pattern, key, self.policy.similarity))
            .collect();

        PatternReport {
            pattern: pattern.to_string(),
            skeleton: simplify(pattern),
            invalid: compile_pattern(pattern).err().map(|e| e.to_string()),
            too_broad: is_too_broad_with(pattern, self.policy.min_skeleton_len),
            exists: self.table.contains(pattern),
            similar_to,
        }
    }

    fn resolve_key(&self, pattern: &str) -> Result<String, RegsubError> {
        let normalized = LEADING_INLINE_GROUP.replace(pattern, "${1}").into_owned();
        if self.table.contains(&normalized) {
            return Ok(normalized);
        }

        let unwrapped = normalized
            .strip_prefix('`')
            .and_then(|s| s.strip_suffix('`'))
            .filter(|s| self.table.contains(s));
        match unwrapped {
            Some(key) => {
                debug!("Resolved '{}' to stored key '{}'.", pattern, key);
                Ok(key.to_string())
            }
            None => Err(RegsubError::NotFound(normalized)),
        }
    }

    /// Owners may always touch their rules; anyone else needs `ManageMessages`.
    fn authorize(&self, action: &'static str, key: &str, user_id: &str) -> Result<(), RegsubError> {
        let entry = self
            .table
            .get(key)
            .ok_or_else(|| RegsubError::NotFound(key.to_string()))?;

        if entry.owner == user_id
            || self.permissions.has_permission(user_id, Capability::ManageMessages)
        {
            Ok(())
        } else {
            Err(RegsubError::PermissionDenied {
                action,
                pattern: key.to_string(),
                user_id: user_id.to_string(),
            })
        }
    }
}

/// One `"pattern" -> "replacement"` line per entry.
pub fn format_listing(entries: &[(String, ReplacementEntry)]) -> String {
    entries
        .iter()
        .map(|(key, entry)| format!("\"{}\" -> \"{}\"", key, entry.text))
        .collect::<Vec<_>>()
        .join("\n")
}
